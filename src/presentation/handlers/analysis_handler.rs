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
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::application::dto::crawl_request::AnalyzeRequestDto;
use crate::config::settings::Settings;
use crate::domain::models::crawl::CrawlOutcome;
use crate::domain::services::analysis_service::AnalysisService;
use crate::presentation::errors::AppError;

/// 对既有内容运行通用分析
///
/// 输入来自一次先前的爬取调用，不再访问网络页面，
/// 只执行LLM分析
pub async fn analyze(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(analysis): Extension<Arc<AnalysisService>>,
    Json(payload): Json<AnalyzeRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut outcome = CrawlOutcome {
        final_url: payload.url.unwrap_or_default(),
        title: payload.title,
        content: payload.content,
        ..Default::default()
    };
    outcome.truncate_content(settings.crawler.max_content_chars);

    let result = analysis.analyze_content(&outcome).await;

    Ok(Json(json!({ "analysis": result })))
}
