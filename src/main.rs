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

use axum::Extension;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use migration::{Migrator, MigratorTrait};
use toolscout::config::settings::Settings;
use toolscout::domain::services::analysis_service::AnalysisService;
use toolscout::engines::probe_engine::ProbeEngine;
use toolscout::infrastructure::database::connection;
use toolscout::infrastructure::llm::gemini_client::GeminiClient;
use toolscout::infrastructure::repositories::tool_repo_impl::ToolRepositoryImpl;
use toolscout::infrastructure::storage::LocalStorage;
use toolscout::presentation::routes;
use toolscout::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting toolscout...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    if settings.server.admin_token.is_empty() {
        warn!("Admin token is empty, admin routes are NOT protected");
    }
    if settings.llm.api_key.is_empty() {
        warn!("LLM API key is empty, analysis endpoints will return null analysis");
    }

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize components
    let tool_repo = Arc::new(ToolRepositoryImpl::new(db.clone()));
    let probe_engine = Arc::new(ProbeEngine::new(
        Duration::from_secs(settings.crawler.probe_timeout),
        &settings.browser.user_agent,
    ));
    let gemini_client = Arc::new(GeminiClient::new(&settings.llm));
    let analysis_service = Arc::new(AnalysisService::new(gemini_client));
    let storage = Arc::new(LocalStorage::new(settings.storage.local_path.clone()));

    // 5. Start HTTP server
    let app = routes::routes(settings.clone())
        .layer(Extension(tool_repo))
        .layer(Extension(probe_engine))
        .layer(Extension(analysis_service))
        .layer(Extension(storage))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
