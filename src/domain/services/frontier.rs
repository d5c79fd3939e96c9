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

use crate::domain::models::crawl::{CrawlTarget, QueueEntry};
use crate::utils::url_utils;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// 定价页面关键词
///
/// 命中路径或锚文本即视为定价相关链接
pub const PRICING_KEYWORDS: [&str; 7] = [
    "pricing",
    "tarif",
    "plan",
    "abonnement",
    "price",
    "subscription",
    "premium",
];

/// 链接优先级策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityStrategy {
    /// 先进先出，广度优先
    #[default]
    Fifo,
    /// 定价相关链接插入队首
    PricingFirst,
}

/// 判断链接是否与定价相关
///
/// # 参数
///
/// * `url` - 链接URL，匹配其路径部分
/// * `anchor_text` - 锚文本
pub fn is_pricing_link(url: &Url, anchor_text: &str) -> bool {
    let path = url.path().to_lowercase();
    let text = anchor_text.to_lowercase();
    PRICING_KEYWORDS
        .iter()
        .any(|kw| path.contains(kw) || text.contains(kw))
}

/// 链接边界
///
/// 驱动广度优先站点探索的(URL, 深度)队列。不变量：
/// - 同一URL至多入队一次（已访问集合与现有队列双重去重）
/// - 深度超过上限或主机名与种子不同的URL被拒绝
/// - 出队在达到页面数上限后停止
/// - `PricingFirst` 策略下定价链接插入队首
pub struct LinkFrontier {
    seed: Url,
    max_depth: u32,
    max_pages: usize,
    strategy: PriorityStrategy,
    visited: HashSet<String>,
    queue: VecDeque<QueueEntry>,
    pages_discovered: usize,
    pages_processed: usize,
}

impl LinkFrontier {
    /// 创建新的链接边界
    ///
    /// 种子URL以深度0入队，计入发现数
    pub fn new(target: &CrawlTarget, strategy: PriorityStrategy) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(QueueEntry {
            url: target.seed_url.clone(),
            depth: 0,
        });

        Self {
            seed: target.seed_url.clone(),
            max_depth: target.max_depth,
            max_pages: target.max_pages,
            strategy,
            visited: HashSet::new(),
            queue,
            pages_discovered: 1,
            pages_processed: 0,
        }
    }

    /// 取出下一个待访问条目
    ///
    /// 取出时标记为已访问并计入处理数；队列耗尽或达到
    /// 页面数上限时返回 `None`
    pub fn next_entry(&mut self) -> Option<QueueEntry> {
        if self.pages_processed >= self.max_pages {
            return None;
        }
        let entry = self.queue.pop_front()?;
        self.visited.insert(entry.url.as_str().to_string());
        self.pages_processed += 1;
        Some(entry)
    }

    /// 尝试入队一个发现的链接
    ///
    /// # 参数
    ///
    /// * `url` - 绝对URL
    /// * `depth` - 链接所在的深度
    /// * `anchor_text` - 锚文本，参与定价关键词匹配
    ///
    /// # 返回值
    ///
    /// 链接被接受时返回 `true`
    pub fn enqueue(&mut self, url: Url, depth: u32, anchor_text: &str) -> bool {
        if depth > self.max_depth {
            return false;
        }
        // Same-origin filter against the seed host
        if !url_utils::same_origin(&self.seed, &url) {
            return false;
        }
        let key = url.as_str().to_string();
        if self.visited.contains(&key) || self.queue.iter().any(|e| e.url.as_str() == key) {
            return false;
        }

        let entry = QueueEntry { url, depth };
        let prioritized = self.strategy == PriorityStrategy::PricingFirst
            && is_pricing_link(&entry.url, anchor_text);
        if prioritized {
            self.queue.push_front(entry);
        } else {
            self.queue.push_back(entry);
        }
        self.pages_discovered += 1;
        true
    }

    /// 发现的页面总数（含种子）
    pub fn pages_discovered(&self) -> usize {
        self.pages_discovered
    }

    /// 已处理的页面数
    pub fn pages_processed(&self) -> usize {
        self.pages_processed
    }

    /// 已访问的URL数
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
