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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、服务器、浏览器、爬取和LLM等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 爬取配置
    pub crawler: CrawlerSettings,
    /// LLM配置
    pub llm: LlmSettings,
    /// 存储配置
    pub storage: StorageSettings,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 管理接口的Bearer令牌
    pub admin_token: String,
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 页面导航超时时间（秒）
    pub navigation_timeout: u64,
    /// 动态内容等待时间（毫秒）
    pub settle_ms: u64,
    /// 桌面端User-Agent
    pub user_agent: String,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 默认最大爬取深度
    pub default_max_depth: u32,
    /// 默认最大页面数
    pub default_max_pages: usize,
    /// 发送给LLM的内容字符上限
    pub max_content_chars: usize,
    /// 重定向探测超时时间（秒）
    pub probe_timeout: u64,
    /// 截图批次之间的等待时间（毫秒）
    pub screenshot_batch_delay_ms: u64,
}

/// LLM配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// API密钥（通过环境变量注入，禁止写入源码）
    pub api_key: String,
    /// 模型名称
    pub model: String,
    /// API基础URL
    pub base_url: String,
    /// 生成温度
    pub temperature: f32,
    /// Top-K采样参数
    pub top_k: u32,
    /// Top-P采样参数
    pub top_p: f32,
    /// 最大输出token数
    pub max_output_tokens: u32,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 截图本地存储路径
    pub local_path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.admin_token", "")?
            // Default DB pool settings
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default browser settings
            .set_default("browser.navigation_timeout", 30)?
            .set_default("browser.settle_ms", 3000)?
            .set_default(
                "browser.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            )?
            // Default crawler settings
            .set_default("crawler.default_max_depth", 2)?
            .set_default("crawler.default_max_pages", 15)?
            .set_default("crawler.max_content_chars", 100_000)?
            .set_default("crawler.probe_timeout", 10)?
            .set_default("crawler.screenshot_batch_delay_ms", 2000)?
            // Default LLM settings
            .set_default("llm.api_key", "")?
            .set_default("llm.model", "gemini-1.5-flash")?
            .set_default(
                "llm.base_url",
                "https://generativelanguage.googleapis.com",
            )?
            .set_default("llm.temperature", 0.4)?
            .set_default("llm.top_k", 40)?
            .set_default("llm.top_p", 0.95)?
            .set_default("llm.max_output_tokens", 8192)?
            // Default storage settings
            .set_default("storage.local_path", "./screenshots")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("TOOLSCOUT").separator("__"));

        builder.build()?.try_deserialize()
    }
}
