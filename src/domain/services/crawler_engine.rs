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

use crate::domain::models::crawl::{CrawlOutcome, CrawlTarget, DiscoveredLink};
use crate::domain::services::extraction_service::{ExtractionService, ExtractionStrategy};
use crate::domain::services::frontier::{LinkFrontier, PriorityStrategy};
use crate::engines::traits::{EngineError, RenderEngine, RenderRequest};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// 爬取规格
///
/// 五个爬虫端点共用同一个爬取循环，差异全部收敛在规格里：
/// 提取策略、链接优先级策略和各项边界
#[derive(Debug, Clone)]
pub struct CrawlSpec {
    /// 内容提取策略
    pub extraction: ExtractionStrategy,
    /// 链接优先级策略
    pub priority: PriorityStrategy,
    /// 页面导航超时时间
    pub timeout: Duration,
    /// 动态内容等待时间
    pub settle: Duration,
    /// 发送给LLM的内容字符上限
    pub max_content_chars: usize,
}

/// 爬取报告
///
/// 累加结果与全部发现链接（含被同源过滤拒绝的外部链接，
/// 社交链接分类需要它们）
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// 累加的爬取结果
    pub outcome: CrawlOutcome,
    /// 去重后的全部发现链接
    pub links: Vec<DiscoveredLink>,
}

/// 爬取引擎
///
/// 可复用的顺序爬取循环：渲染 → 提取 → 边界扩张 → 折叠。
/// 页面严格逐个访问，单页失败只跳过该页，仅浏览器启动
/// 失败会中止整个爬取。
pub struct CrawlerEngine;

impl CrawlerEngine {
    /// 执行一次有界爬取
    ///
    /// # 参数
    ///
    /// * `render` - 渲染引擎
    /// * `target` - 爬取目标（种子URL与边界）
    /// * `spec` - 爬取规格
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 爬取报告，部分页面失败时仍返回
    /// * `Err(EngineError)` - 仅致命错误
    pub async fn crawl(
        render: &dyn RenderEngine,
        target: &CrawlTarget,
        spec: &CrawlSpec,
    ) -> Result<CrawlReport, EngineError> {
        let mut frontier = LinkFrontier::new(target, spec.priority);
        let mut outcome = CrawlOutcome::default();
        let mut links = Vec::new();
        let mut seen_links: HashSet<String> = HashSet::new();

        info!(
            "Starting crawl of {} (max_depth={}, max_pages={})",
            target.seed_url, target.max_depth, target.max_pages
        );

        while let Some(entry) = frontier.next_entry() {
            let request = RenderRequest {
                url: entry.url.to_string(),
                timeout: spec.timeout,
                settle: spec.settle,
            };

            let page = match render.render(&request).await {
                Ok(page) => page,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Skipping {}: {}", entry.url, e);
                    continue;
                }
            };

            let page_url = Url::parse(&page.url).unwrap_or_else(|_| entry.url.clone());
            if outcome.final_url.is_empty() {
                outcome.final_url = page_url.to_string();
            }

            let result = ExtractionService::page_result(&page.html, &page_url, spec.extraction);
            debug!(
                "Processed {} ({} chars, {} links)",
                page_url,
                result.text.chars().count(),
                result.links.len()
            );

            for link in &result.links {
                if seen_links.insert(link.url.as_str().to_string()) {
                    links.push(link.clone());
                }
                frontier.enqueue(link.url.clone(), entry.depth + 1, &link.text);
            }

            outcome.fold(&result);
        }

        outcome.pages_discovered = frontier.pages_discovered();
        outcome.truncate_content(spec.max_content_chars);

        info!(
            "Crawl of {} finished: {} pages processed, {} discovered, {} chars",
            target.seed_url, outcome.pages_processed, outcome.pages_discovered, outcome.content_length
        );

        Ok(CrawlReport { outcome, links })
    }
}
