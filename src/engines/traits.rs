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

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动失败
    #[error("Browser launch failed: {0}")]
    Launch(String),
    /// 页面导航失败
    #[error("Navigation failed: {0}")]
    Navigation(String),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 判断错误是否会中止整个爬取
    ///
    /// 仅浏览器启动失败是致命的；单页面的导航失败或超时
    /// 只跳过该页面，爬取继续
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::Launch(_))
    }
}

/// 渲染请求
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// 目标URL
    pub url: String,
    /// 导航超时时间
    pub timeout: Duration,
    /// 动态内容等待时间
    pub settle: Duration,
}

/// 渲染后的页面
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// 页面实际URL（重定向后）
    pub url: String,
    /// 渲染后的完整HTML
    pub html: String,
    /// HTTP状态码
    pub status_code: u16,
}

/// 渲染引擎特质
///
/// 爬取循环通过该接口驱动页面渲染，测试中以固定HTML的
/// 模拟实现替换真实浏览器
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// 渲染页面
    async fn render(&self, request: &RenderRequest) -> Result<RenderedPage, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
