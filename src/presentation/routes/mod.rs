// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::infrastructure::repositories::tool_repo_impl::ToolRepositoryImpl;
use crate::presentation::handlers::{
    analysis_handler, crawler_handler, probe_handler, screenshot_handler, validator_handler,
};
use crate::presentation::middleware::admin_auth::admin_auth_middleware;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 创建应用路由
///
/// # 参数
///
/// * `settings` - 应用配置，管理鉴权中间件需要
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(settings: Arc<Settings>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let admin_routes = Router::new()
        .route(
            "/v1/admin/crawl",
            post(probe_handler::batch_crawl::<ToolRepositoryImpl>),
        )
        .route(
            "/v1/admin/url-validator",
            post(validator_handler::url_validator::<ToolRepositoryImpl>),
        )
        .route(
            "/v1/admin/content-crawler",
            post(crawler_handler::content_crawler::<ToolRepositoryImpl>),
        )
        .route(
            "/v1/admin/pricing-crawler",
            post(crawler_handler::pricing_crawler::<ToolRepositoryImpl>),
        )
        .route(
            "/v1/admin/description-crawler",
            post(crawler_handler::description_crawler::<ToolRepositoryImpl>),
        )
        .route(
            "/v1/admin/affiliate-crawler",
            post(crawler_handler::affiliate_crawler::<ToolRepositoryImpl>),
        )
        .route("/v1/admin/analyze", post(analysis_handler::analyze))
        .route(
            "/v1/admin/screenshots",
            post(screenshot_handler::screenshots::<ToolRepositoryImpl>),
        )
        .layer(middleware::from_fn_with_state(
            settings,
            admin_auth_middleware,
        ));

    Router::new().merge(public_routes).merge(admin_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
