// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use toolscout::config::settings::{
    BrowserSettings, CrawlerSettings, DatabaseSettings, LlmSettings, ServerSettings, Settings,
    StorageSettings,
};
use toolscout::domain::models::tool::{PricingType, SocialLinks, Tool};
use toolscout::domain::repositories::tool_repository::{RepositoryError, ToolRepository};
use toolscout::domain::services::analysis_service::TextGenerator;
use toolscout::engines::traits::{EngineError, RenderEngine, RenderRequest, RenderedPage};

/// 测试用配置
pub fn test_settings(admin_token: &str) -> Settings {
    Settings {
        database: DatabaseSettings {
            url: "postgres://unused".to_string(),
            max_connections: None,
            min_connections: None,
            connect_timeout: None,
            idle_timeout: None,
        },
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            admin_token: admin_token.to_string(),
        },
        browser: BrowserSettings {
            navigation_timeout: 5,
            settle_ms: 0,
            user_agent: "toolscout-test".to_string(),
        },
        crawler: CrawlerSettings {
            default_max_depth: 2,
            default_max_pages: 15,
            max_content_chars: 100_000,
            probe_timeout: 5,
            screenshot_batch_delay_ms: 0,
        },
        llm: LlmSettings {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            temperature: 0.4,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        },
        storage: StorageSettings {
            local_path: "./screenshots".to_string(),
        },
    }
}

/// 测试用工具条目
pub fn test_tool(slug: &str, website_url: &str) -> Tool {
    let now = Utc::now();
    Tool {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: slug.to_string(),
        website_url: website_url.to_string(),
        http_code: None,
        http_chain: None,
        is_active: true,
        pricing_type: None,
        pricing_details: None,
        description: None,
        logo_url: None,
        screenshot_path: None,
        twitter_url: None,
        linkedin_url: None,
        youtube_url: None,
        instagram_url: None,
        has_affiliate_program: false,
        affiliate_url: None,
        created_at: now,
        updated_at: now,
    }
}

/// 内存工具仓库
///
/// 以哈希表模拟 tools 表，更新直接改写内存中的条目
pub struct MockToolRepository {
    tools: Mutex<HashMap<Uuid, Tool>>,
}

impl MockToolRepository {
    pub fn with_tools(tools: Vec<Tool>) -> Self {
        Self {
            tools: Mutex::new(tools.into_iter().map(|t| (t.id, t)).collect()),
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Tool> {
        self.tools.lock().unwrap().get(&id).cloned()
    }

    fn update<F>(&self, id: Uuid, f: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut Tool),
    {
        let mut tools = self.tools.lock().unwrap();
        let tool = tools.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        f(tool);
        tool.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ToolRepository for MockToolRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, RepositoryError> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tool>, RepositoryError> {
        Ok(self
            .tools
            .lock()
            .unwrap()
            .values()
            .find(|t| t.slug == slug)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tool>, RepositoryError> {
        let tools = self.tools.lock().unwrap();
        Ok(ids.iter().filter_map(|id| tools.get(id).cloned()).collect())
    }

    async fn update_probe_result(
        &self,
        id: Uuid,
        http_code: i32,
        http_chain: &str,
        final_url: &str,
    ) -> Result<(), RepositoryError> {
        self.update(id, |t| {
            t.http_code = Some(http_code);
            t.http_chain = Some(http_chain.to_string());
            t.website_url = final_url.to_string();
        })
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), RepositoryError> {
        self.update(id, |t| t.is_active = is_active)
    }

    async fn update_pricing(
        &self,
        id: Uuid,
        pricing_type: Option<PricingType>,
        pricing_details: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let details = pricing_details.map(|s| s.to_string());
        self.update(id, |t| {
            t.pricing_type = pricing_type;
            if details.is_some() {
                t.pricing_details = details;
            }
        })
    }

    async fn update_description(
        &self,
        id: Uuid,
        description: &str,
    ) -> Result<(), RepositoryError> {
        self.update(id, |t| t.description = Some(description.to_string()))
    }

    async fn update_social_links(
        &self,
        id: Uuid,
        links: &SocialLinks,
    ) -> Result<(), RepositoryError> {
        let links = links.clone();
        self.update(id, |t| {
            t.twitter_url = links.twitter_url;
            t.linkedin_url = links.linkedin_url;
            t.youtube_url = links.youtube_url;
            t.instagram_url = links.instagram_url;
        })
    }

    async fn update_affiliate(
        &self,
        id: Uuid,
        has_affiliate_program: bool,
        affiliate_url: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let url = affiliate_url.map(|s| s.to_string());
        self.update(id, |t| {
            t.has_affiliate_program = has_affiliate_program;
            t.affiliate_url = url;
        })
    }

    async fn update_screenshot(&self, id: Uuid, path: &str) -> Result<(), RepositoryError> {
        self.update(id, |t| t.screenshot_path = Some(path.to_string()))
    }
}

/// 固定HTML的渲染引擎
///
/// 按URL返回固定的HTML，并记录渲染顺序
pub struct MockRenderEngine {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MockRenderEngine {
    pub fn new(pages: Vec<(&str, &str)>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 渲染调用的URL顺序
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RenderEngine for MockRenderEngine {
    async fn render(&self, request: &RenderRequest) -> Result<RenderedPage, EngineError> {
        self.calls.lock().unwrap().push(request.url.clone());
        match self.pages.get(&request.url) {
            Some(html) => Ok(RenderedPage {
                url: request.url.clone(),
                html: html.clone(),
                status_code: 200,
            }),
            None => Err(EngineError::Navigation(format!(
                "no fixture for {}",
                request.url
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// 固定响应的文本生成器
pub struct MockTextGenerator {
    response: Option<String>,
}

impl MockTextGenerator {
    pub fn with_response(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { response: None }
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => anyhow::bail!("simulated LLM failure"),
        }
    }
}
