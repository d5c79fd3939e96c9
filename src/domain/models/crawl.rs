// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use url::Url;

/// 爬取目标
///
/// 每次请求创建一个，爬取完成后丢弃
#[derive(Debug, Clone)]
pub struct CrawlTarget {
    /// 种子URL，爬取的起点，同源过滤的基准
    pub seed_url: Url,
    /// 最大爬取深度，种子页面深度为0
    pub max_depth: u32,
    /// 最大处理页面数
    pub max_pages: usize,
}

impl CrawlTarget {
    /// 创建新的爬取目标
    ///
    /// # 参数
    ///
    /// * `seed_url` - 种子URL
    /// * `max_depth` - 最大深度，种子为深度0
    /// * `max_pages` - 最大页面数，必须大于0
    pub fn new(seed_url: Url, max_depth: u32, max_pages: usize) -> Self {
        // max_pages = 0 would make the crawl a no-op, clamp to at least the seed
        Self {
            seed_url,
            max_depth,
            max_pages: max_pages.max(1),
        }
    }
}

/// 队列条目
///
/// 爬取边界中的一个待访问(URL, 深度)对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    /// 待访问URL
    pub url: Url,
    /// 距离种子页面的深度
    pub depth: u32,
}

/// 页面结果
///
/// 每个被访问的URL产出一次，创建后不可变
#[derive(Debug, Clone)]
pub struct PageResult {
    /// 页面实际URL（重定向后）
    pub url: Url,
    /// 页面标题
    pub title: Option<String>,
    /// 提取出的正文文本
    pub text: String,
    /// 页面上发现的链接及其锚文本
    pub links: Vec<DiscoveredLink>,
}

/// 发现的链接
///
/// 锚文本参与定价关键词匹配
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    /// 绝对URL
    pub url: Url,
    /// 锚文本
    pub text: String,
}

/// 爬取结果累加器
///
/// 随着每个页面结果的折叠而增量更新
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlOutcome {
    /// 种子页面重定向后的最终URL
    pub final_url: String,
    /// 站点标题（仅取自第一个页面）
    pub title: Option<String>,
    /// 拼接后的全部页面文本
    pub content: String,
    /// 发现的页面数（含种子）
    pub pages_discovered: usize,
    /// 实际处理的页面数
    pub pages_processed: usize,
    /// 截断后的内容长度（字符数）
    pub content_length: usize,
}

impl CrawlOutcome {
    /// 折叠一个页面结果
    pub fn fold(&mut self, page: &PageResult) {
        if self.title.is_none() {
            self.title = page.title.clone();
        }
        if !page.text.is_empty() {
            if !self.content.is_empty() {
                self.content.push_str("\n\n");
            }
            self.content.push_str(&format!("--- {} ---\n", page.url));
            self.content.push_str(&page.text);
        }
        self.pages_processed += 1;
    }

    /// 截断内容到字符上限并回填长度
    ///
    /// 在字符边界截断，避免破坏UTF-8
    pub fn truncate_content(&mut self, max_chars: usize) {
        if let Some((idx, _)) = self.content.char_indices().nth(max_chars) {
            self.content.truncate(idx);
        }
        self.content_length = self.content.chars().count();
    }
}

/// 分析结果
///
/// LLM响应解码的产物：成功时为结构化JSON，全部解码策略
/// 失败时保留原始文本，让调用方能区分"没有数据"与
/// "有数据但未解析"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisOutcome {
    /// 结构化字段
    Structured(serde_json::Value),
    /// 未能解析的原始文本
    Raw(String),
}

impl AnalysisOutcome {
    /// 获取结构化值（如有）
    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            AnalysisOutcome::Structured(value) => Some(value),
            AnalysisOutcome::Raw(_) => None,
        }
    }
}
