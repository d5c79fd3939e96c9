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
use std::time::Duration;
use tracing::warn;
use validator::Validate;

use crate::application::dto::crawl_request::CrawlRequestDto;
use crate::application::dto::crawl_response::CrawlResponseDto;
use crate::config::settings::{CrawlerSettings, Settings};
use crate::domain::models::crawl::{AnalysisOutcome, CrawlTarget};
use crate::domain::models::tool::SocialLinks;
use crate::domain::repositories::tool_repository::ToolRepository;
use crate::domain::services::analysis_service::{self, AnalysisService};
use crate::domain::services::crawler_engine::{CrawlReport, CrawlSpec, CrawlerEngine};
use crate::domain::services::extraction_service::{ExtractionService, ExtractionStrategy};
use crate::domain::services::frontier::PriorityStrategy;
use crate::engines::browser_engine::BrowserEngine;
use crate::presentation::errors::AppError;
use crate::utils::url_utils;

/// 爬虫端点类型
///
/// 四个端点共用同一个爬取循环，差异收敛在默认边界、
/// 提取策略、优先级策略和分析提示词上
#[derive(Debug, Clone, Copy)]
enum CrawlerKind {
    /// 通用内容分析
    Content,
    /// 定价分析，定价链接优先
    Pricing,
    /// 详细描述生成
    Description,
    /// 页脚链接与联盟推广分析
    Affiliate,
}

impl CrawlerKind {
    /// 端点的默认边界与策略
    ///
    /// 通用内容端点跟随全局爬取配置，其余端点带有自己的边界
    fn defaults(&self, crawler: &CrawlerSettings) -> (u32, usize, ExtractionStrategy, PriorityStrategy) {
        match self {
            CrawlerKind::Content => (
                crawler.default_max_depth,
                crawler.default_max_pages,
                ExtractionStrategy::MainContent,
                PriorityStrategy::Fifo,
            ),
            CrawlerKind::Pricing => (
                2,
                10,
                ExtractionStrategy::MainContent,
                PriorityStrategy::PricingFirst,
            ),
            CrawlerKind::Description => {
                (2, 20, ExtractionStrategy::MainContent, PriorityStrategy::Fifo)
            }
            CrawlerKind::Affiliate => {
                (1, 10, ExtractionStrategy::FooterLinks, PriorityStrategy::Fifo)
            }
        }
    }
}

/// 通用内容爬虫
pub async fn content_crawler<R>(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(analysis): Extension<Arc<AnalysisService>>,
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    run_crawler(CrawlerKind::Content, settings, analysis, repo, payload).await
}

/// 定价爬虫
///
/// 定价关键词链接优先入队；没有命中任何定价页面时退回
/// 首页内容分析
pub async fn pricing_crawler<R>(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(analysis): Extension<Arc<AnalysisService>>,
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    run_crawler(CrawlerKind::Pricing, settings, analysis, repo, payload).await
}

/// 详细描述爬虫
pub async fn description_crawler<R>(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(analysis): Extension<Arc<AnalysisService>>,
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    run_crawler(CrawlerKind::Description, settings, analysis, repo, payload).await
}

/// 联盟推广与社交链接爬虫
pub async fn affiliate_crawler<R>(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(analysis): Extension<Arc<AnalysisService>>,
    Extension(repo): Extension<Arc<R>>,
    Json(payload): Json<CrawlRequestDto>,
) -> Result<impl IntoResponse, AppError>
where
    R: ToolRepository + 'static,
{
    run_crawler(CrawlerKind::Affiliate, settings, analysis, repo, payload).await
}

/// 共享的爬取流程
///
/// 规范化URL → 启动浏览器 → 有界爬取 → 关闭浏览器 →
/// LLM分析 → 可选回写。浏览器实例与本次请求同生共死。
async fn run_crawler<R>(
    kind: CrawlerKind,
    settings: Arc<Settings>,
    analysis: Arc<AnalysisService>,
    repo: Arc<R>,
    payload: CrawlRequestDto,
) -> Result<Json<CrawlResponseDto>, AppError>
where
    R: ToolRepository + 'static,
{
    payload.validate()?;

    let seed = url_utils::normalize_url(&payload.url)
        .map_err(|e| anyhow::anyhow!("invalid url '{}': {}", payload.url, e))?;

    let (default_depth, default_pages, extraction, priority) =
        kind.defaults(&settings.crawler);
    let target = CrawlTarget::new(
        seed,
        payload.max_depth.unwrap_or(default_depth),
        payload.max_pages.unwrap_or(default_pages),
    );
    let spec = CrawlSpec {
        extraction,
        priority,
        timeout: Duration::from_secs(settings.browser.navigation_timeout),
        settle: Duration::from_millis(settings.browser.settle_ms),
        max_content_chars: settings.crawler.max_content_chars,
    };

    let engine = BrowserEngine::launch(&settings.browser).await?;
    let crawl_result = CrawlerEngine::crawl(&engine, &target, &spec).await;
    engine.close().await;
    let report = crawl_result?;

    let analysis_outcome = analyze(kind, &analysis, &report).await;

    if let Some(tool_id) = payload.tool_id {
        persist(kind, repo.as_ref(), tool_id, &report, &analysis_outcome).await;
    }

    Ok(Json(CrawlResponseDto::from_outcome(
        report.outcome,
        analysis_outcome,
    )))
}

/// 端点对应的LLM分析
async fn analyze(
    kind: CrawlerKind,
    analysis: &AnalysisService,
    report: &CrawlReport,
) -> Option<AnalysisOutcome> {
    match kind {
        CrawlerKind::Content => analysis.analyze_content(&report.outcome).await,
        CrawlerKind::Pricing => analysis.analyze_pricing(&report.outcome).await,
        CrawlerKind::Description => analysis
            .generate_description(&report.outcome)
            .await
            .map(|html| AnalysisOutcome::Structured(json!({ "descriptionHtml": html }))),
        CrawlerKind::Affiliate => {
            let social = ExtractionService::classify_social_links(&report.links);
            let candidates = ExtractionService::affiliate_candidates(&report.links);
            analysis
                .analyze_links(&report.outcome, &social, &candidates)
                .await
        }
    }
}

/// 把分析结果回写到工具条目
///
/// 回写失败只记录日志，响应仍然返回爬取与分析结果
async fn persist<R>(
    kind: CrawlerKind,
    repo: &R,
    tool_id: uuid::Uuid,
    report: &CrawlReport,
    analysis_outcome: &Option<AnalysisOutcome>,
) where
    R: ToolRepository,
{
    let result = match kind {
        CrawlerKind::Content => Ok(()),
        CrawlerKind::Pricing => {
            let Some(outcome) = analysis_outcome else {
                return;
            };
            let pricing_type = analysis_service::infer_pricing_type(outcome);
            let details = match outcome {
                AnalysisOutcome::Structured(value) => value
                    .get("pricingDetailsHtml")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
                AnalysisOutcome::Raw(text) => {
                    Some(analysis_service::clean_description_html(text))
                }
            };
            repo.update_pricing(tool_id, pricing_type, details.as_deref())
                .await
        }
        CrawlerKind::Description => {
            let Some(AnalysisOutcome::Structured(value)) = analysis_outcome else {
                return;
            };
            let Some(html) = value.get("descriptionHtml").and_then(|v| v.as_str()) else {
                return;
            };
            repo.update_description(tool_id, html).await
        }
        CrawlerKind::Affiliate => {
            let extracted = ExtractionService::classify_social_links(&report.links);
            let candidates = ExtractionService::affiliate_candidates(&report.links);

            let structured = analysis_outcome
                .as_ref()
                .and_then(|a| a.as_structured().cloned());
            let field = |name: &str| -> Option<String> {
                structured
                    .as_ref()
                    .and_then(|v| v.get(name))
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
            };

            // Model answer wins over the raw extraction when present
            let links = SocialLinks {
                twitter_url: field("twitterUrl").or(extracted.twitter_url),
                linkedin_url: field("linkedinUrl").or(extracted.linkedin_url),
                youtube_url: field("youtubeUrl").or(extracted.youtube_url),
                instagram_url: field("instagramUrl").or(extracted.instagram_url),
            };
            let has_affiliate = structured
                .as_ref()
                .and_then(|v| v.get("hasAffiliateProgram"))
                .and_then(|v| v.as_bool())
                .unwrap_or(!candidates.is_empty());
            let affiliate_url =
                field("affiliateUrl").or_else(|| candidates.first().map(|l| l.url.to_string()));

            match repo.update_social_links(tool_id, &links).await {
                Ok(()) => {
                    repo.update_affiliate(tool_id, has_affiliate, affiliate_url.as_deref())
                        .await
                }
                Err(e) => Err(e),
            }
        }
    };

    if let Err(e) = result {
        warn!("Persistence failed for tool {}: {}", tool_id, e);
    }
}
