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

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

use crate::application::dto::crawl_response::{BatchCrawlResponseDto, ToolProbeResultDto};
use crate::application::dto::probe_request::BatchCrawlRequestDto;
use crate::domain::repositories::tool_repository::ToolRepository;
use crate::engines::probe_engine::ProbeEngine;
use crate::presentation::errors::AppError;

/// 批量探测工具URL
///
/// 对每个工具解析DNS、跟随重定向，并把状态码链与最终URL
/// 回写到条目上。单个工具的探测或回写失败不会中止批次。
pub async fn batch_crawl<R>(
    Extension(repo): Extension<Arc<R>>,
    Extension(probe): Extension<Arc<ProbeEngine>>,
    Json(payload): Json<BatchCrawlRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    payload.validate()?;

    let tools = repo.find_by_ids(&payload.tool_ids).await?;
    let mut results = Vec::with_capacity(tools.len());

    for tool in tools {
        let outcome = probe.probe(&tool.website_url).await;

        if let Err(e) = repo
            .update_probe_result(tool.id, outcome.final_code, &outcome.chain, &outcome.final_url)
            .await
        {
            warn!("Probe persistence failed for tool {}: {}", tool.id, e);
        }

        results.push(ToolProbeResultDto {
            id: tool.id,
            name: tool.name,
            original_url: tool.website_url,
            final_url: outcome.final_url,
            http_code: outcome.final_code,
            http_chain: outcome.chain,
        });
    }

    Ok((
        StatusCode::OK,
        Json(BatchCrawlResponseDto {
            success: true,
            results,
        }),
    ))
}
