// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{EngineError, RenderEngine, RenderRequest, RenderedPage};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// 浏览器渲染引擎
///
/// 基于chromiumoxide的无头浏览器引擎。实例的生命周期与
/// 单次爬取请求绑定：请求开始时启动，结束时关闭，不跨
/// 请求复用。每个页面提取完成后立即关闭以控制内存。
pub struct BrowserEngine {
    browser: Browser,
    handler_task: JoinHandle<()>,
    settings: BrowserSettings,
}

impl BrowserEngine {
    /// 启动浏览器实例
    ///
    /// # 参数
    ///
    /// * `settings` - 浏览器配置
    ///
    /// # 返回值
    ///
    /// * `Ok(BrowserEngine)` - 就绪的引擎
    /// * `Err(EngineError::Launch)` - 启动失败，中止整个请求
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, EngineError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .request_timeout(Duration::from_secs(settings.navigation_timeout))
            .build()
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::Launch(e.to_string()))?;

        // Drain browser events until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            settings: settings.clone(),
        })
    }

    /// 关闭浏览器实例
    ///
    /// 爬取完成后调用，消费自身
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close error: {}", e);
        }
        // The event stream ends once the browser is gone, abort covers the
        // case where close itself failed
        self.handler_task.abort();
    }

    /// 对URL截取整页JPEG截图
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<u8>)` - JPEG字节
    /// * `Err(EngineError)` - 导航或截图失败
    pub async fn screenshot(&self, url: &str) -> Result<Vec<u8>, EngineError> {
        let timeout = Duration::from_secs(self.settings.navigation_timeout);

        tokio::time::timeout(timeout, async {
            let page = self
                .browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            page.set_user_agent(self.settings.user_agent.as_str())
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            page.goto(url)
                .await
                .map_err(|e| EngineError::Navigation(e.to_string()))?;

            tokio::time::sleep(Duration::from_millis(self.settings.settle_ms)).await;

            let params = ScreenshotParams::builder()
                .format(CaptureScreenshotFormat::Jpeg)
                .quality(80)
                .full_page(true)
                .build();

            let bytes = page
                .screenshot(params)
                .await
                .map_err(|e| EngineError::Other(format!("Screenshot failed: {}", e)))?;

            page.close().await.ok();
            Ok(bytes)
        })
        .await
        .map_err(|_| EngineError::Timeout)?
    }
}

#[async_trait]
impl RenderEngine for BrowserEngine {
    /// 渲染页面
    ///
    /// 打开新页面，设置桌面User-Agent，导航并等待动态内容
    /// 稳定，然后返回渲染后的HTML。页面在返回前关闭。
    async fn render(&self, request: &RenderRequest) -> Result<RenderedPage, EngineError> {
        tokio::time::timeout(request.timeout + request.settle, async {
            let page = self
                .browser
                .new_page("about:blank")
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            page.set_user_agent(self.settings.user_agent.as_str())
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;

            if let Err(e) = page.goto(request.url.as_str()).await {
                page.close().await.ok();
                return Err(EngineError::Navigation(e.to_string()));
            }

            // Fixed settle delay for client-side rendered content
            tokio::time::sleep(request.settle).await;

            let final_url = page
                .evaluate("window.location.href")
                .await
                .ok()
                .and_then(|v| v.into_value::<String>().ok())
                .unwrap_or_else(|| request.url.clone());

            let html = page.content().await.map_err(|e| {
                debug!("Content extraction failed for {}: {}", request.url, e);
                EngineError::Other(e.to_string())
            });

            page.close().await.ok();

            Ok(RenderedPage {
                url: final_url,
                html: html?,
                // goto resolves once the document loads, treat it as a 200
                status_code: 200,
            })
        })
        .await
        .map_err(|_| EngineError::Timeout)?
    }

    /// 引擎名称
    fn name(&self) -> &'static str {
        "browser"
    }
}
