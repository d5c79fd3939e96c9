// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use validator::Validate;

use crate::application::dto::crawl_response::{ScreenshotResponseDto, ScreenshotResultDto};
use crate::application::dto::probe_request::ScreenshotRequestDto;
use crate::config::settings::Settings;
use crate::domain::models::tool::Tool;
use crate::domain::repositories::tool_repository::ToolRepository;
use crate::engines::browser_engine::BrowserEngine;
use crate::infrastructure::storage::LocalStorage;
use crate::presentation::errors::AppError;

/// 每批并行截图的数量
const BATCH_SIZE: usize = 3;

/// 截图批处理
///
/// 固定宽度的批处理：每批3个工具并行截图，批次之间等待
/// 固定延迟。单个工具的失败记录在结果里，不中止批次。
pub async fn screenshots<R>(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(repo): Extension<Arc<R>>,
    Extension(storage): Extension<Arc<LocalStorage>>,
    Json(payload): Json<ScreenshotRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    payload.validate()?;

    let tools = repo.find_by_ids(&payload.tool_ids).await?;
    let engine = BrowserEngine::launch(&settings.browser).await?;
    let delay = Duration::from_millis(settings.crawler.screenshot_batch_delay_ms);

    let mut results = Vec::with_capacity(tools.len());

    for (index, batch) in tools.chunks(BATCH_SIZE).enumerate() {
        if index > 0 {
            tokio::time::sleep(delay).await;
        }

        let captures =
            futures::future::join_all(batch.iter().map(|tool| capture(&engine, &storage, tool)))
                .await;

        for (tool, capture) in batch.iter().zip(captures) {
            match capture {
                Ok(path) => {
                    if let Err(e) = repo.update_screenshot(tool.id, &path).await {
                        warn!("Screenshot persistence failed for {}: {}", tool.id, e);
                    }
                    results.push(ScreenshotResultDto {
                        id: tool.id,
                        path: Some(path),
                        error: None,
                    });
                }
                Err(message) => {
                    warn!("Screenshot failed for {}: {}", tool.id, message);
                    results.push(ScreenshotResultDto {
                        id: tool.id,
                        path: None,
                        error: Some(message),
                    });
                }
            }
        }
    }

    engine.close().await;

    Ok(Json(ScreenshotResponseDto {
        success: true,
        results,
    }))
}

/// 截取单个工具的整页截图并写入本地存储
async fn capture(
    engine: &BrowserEngine,
    storage: &LocalStorage,
    tool: &Tool,
) -> Result<String, String> {
    let bytes = engine
        .screenshot(&tool.website_url)
        .await
        .map_err(|e| e.to_string())?;
    let path = storage
        .save(&format!("{}.jpg", tool.slug), &bytes)
        .await
        .map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().into_owned())
}
