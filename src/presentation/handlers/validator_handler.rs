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
use tracing::info;
use validator::Validate;

use crate::application::dto::probe_request::UrlValidatorRequestDto;
use crate::domain::repositories::tool_repository::{RepositoryError, ToolRepository};
use crate::domain::services::validation_service::ValidationService;
use crate::engines::probe_engine::ProbeEngine;
use crate::presentation::errors::AppError;

/// 验证URL并回写激活标志
///
/// 探测URL并归类为验证终态。请求指明 `tool_id` 或 `slug`
/// 时，终态无条件写入该工具的 `is_active`：仅有效URL激活，
/// 其余一律停用。
pub async fn url_validator<R>(
    Extension(repo): Extension<Arc<R>>,
    Extension(probe): Extension<Arc<ProbeEngine>>,
    Json(payload): Json<UrlValidatorRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    payload.validate()?;

    let outcome = probe.probe(&payload.url).await;
    let result = ValidationService::classify(&payload.url, &outcome);

    let tool = if let Some(id) = payload.tool_id {
        Some(repo.find_by_id(id).await?.ok_or(RepositoryError::NotFound)?)
    } else if let Some(slug) = &payload.slug {
        Some(
            repo.find_by_slug(slug)
                .await?
                .ok_or(RepositoryError::NotFound)?,
        )
    } else {
        None
    };

    if let Some(tool) = tool {
        let is_active = result.status.is_active();
        repo.set_active(tool.id, is_active).await?;
        info!(
            "Tool {} ({}) set {} after validation ({})",
            tool.slug,
            tool.id,
            if is_active { "active" } else { "inactive" },
            result.message
        );
    }

    Ok(Json(result))
}
