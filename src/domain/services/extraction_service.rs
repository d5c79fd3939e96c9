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

use crate::domain::models::crawl::{DiscoveredLink, PageResult};
use crate::domain::models::tool::SocialLinks;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// 正文容器的语义选择器，按优先级排列
const CONTENT_SELECTORS: [&str; 7] = [
    "main",
    "article",
    r#"[role="main"]"#,
    ".content",
    "#content",
    ".main-content",
    "#main",
];

/// 页脚容器选择器，按优先级排列
const FOOTER_SELECTORS: [&str; 5] = [
    "footer",
    r#"[role="contentinfo"]"#,
    ".footer",
    "#footer",
    ".site-footer",
];

/// class/id 命中即排除的噪音关键词
const NOISE_KEYWORDS: [&str; 8] = [
    "header", "footer", "nav", "menu", "cookie", "banner", "sidebar", "modal",
];

/// 不产生可见文本的标签
const INVISIBLE_TAGS: [&str; 5] = ["script", "style", "noscript", "svg", "template"];

/// 联盟推广链接关键词
const AFFILIATE_KEYWORDS: [&str; 5] = ["affili", "partner", "parrain", "ambassador", "referral"];

/// 正文降级提取的最小文本长度
const MIN_BLOCK_TEXT_LEN: usize = 50;

/// 提取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionStrategy {
    /// 正文文本 + 全部链接
    #[default]
    MainContent,
    /// 正文文本 + 页脚区域链接
    FooterLinks,
}

/// 提取服务
///
/// 基于DOM查询的内容与链接提取启发式。所有函数都是纯
/// 函数，直接作用于渲染后的HTML。
pub struct ExtractionService;

impl ExtractionService {
    /// 对一个渲染后的页面执行完整提取
    pub fn page_result(html: &str, page_url: &Url, strategy: ExtractionStrategy) -> PageResult {
        let document = Html::parse_document(html);
        let links = match strategy {
            ExtractionStrategy::MainContent => Self::harvest_links(&document, page_url),
            ExtractionStrategy::FooterLinks => Self::footer_links(&document, page_url),
        };

        PageResult {
            url: page_url.clone(),
            title: Self::title(&document),
            text: Self::main_content(&document),
            links,
        }
    }

    /// 提取页面标题
    pub fn title(document: &Html) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        let title = document
            .select(&selector)
            .next()
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))?;
        if title.is_empty() {
            None
        } else {
            Some(title)
        }
    }

    /// 提取正文文本
    ///
    /// 先按语义选择器尝试，第一个产生非空文本的选择器获胜；
    /// 全部落空时降级为收集所有长度超过阈值、且class/id未
    /// 命中噪音关键词的文本块
    pub fn main_content(document: &Html) -> String {
        for selector_str in CONTENT_SELECTORS {
            let Ok(selector) = Selector::parse(selector_str) else {
                continue;
            };
            let text = document
                .select(&selector)
                .map(|el| visible_text(el))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if !text.is_empty() {
                return text;
            }
        }

        Self::fallback_content(document)
    }

    /// 正文降级提取
    fn fallback_content(document: &Html) -> String {
        let Ok(selector) = Selector::parse("body p, body div, body section, body li") else {
            return String::new();
        };

        let mut blocks = Vec::new();
        let mut seen = HashSet::new();
        for el in document.select(&selector) {
            if is_noise_element(&el) || has_noise_ancestor(&el) {
                continue;
            }
            let text = normalize_whitespace(&direct_text(&el));
            if text.chars().count() > MIN_BLOCK_TEXT_LEN && seen.insert(text.clone()) {
                blocks.push(text);
            }
        }

        blocks.join("\n")
    }

    /// 收集页面上的全部链接
    ///
    /// 解析为绝对URL，仅保留http(s)，移除片段，按首次出现
    /// 顺序去重
    pub fn harvest_links(document: &Html, base: &Url) -> Vec<DiscoveredLink> {
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for el in document.select(&selector) {
            let Some(href) = el.value().attr("href") else {
                continue;
            };
            // Ignore fragment identifiers, mailto, javascript and tel links
            if href.starts_with('#')
                || href.starts_with("mailto:")
                || href.starts_with("javascript:")
                || href.starts_with("tel:")
            {
                continue;
            }
            let Ok(mut url) = base.join(href) else {
                continue;
            };
            if url.scheme() != "http" && url.scheme() != "https" {
                continue;
            }
            // Remove fragment to improve deduplication
            url.set_fragment(None);

            if seen.insert(url.as_str().to_string()) {
                links.push(DiscoveredLink {
                    text: normalize_whitespace(&el.text().collect::<String>()),
                    url,
                });
            }
        }

        links
    }

    /// 提取页脚区域链接
    ///
    /// 依次尝试页脚容器选择器；全部落空时降级为文档顺序
    /// 末尾30%的链接；仍为空时返回全部链接
    pub fn footer_links(document: &Html, base: &Url) -> Vec<DiscoveredLink> {
        for selector_str in FOOTER_SELECTORS {
            let Ok(selector) = Selector::parse(selector_str) else {
                continue;
            };
            let mut seen = HashSet::new();
            let mut links = Vec::new();
            for container in document.select(&selector) {
                let Ok(anchor) = Selector::parse("a[href]") else {
                    continue;
                };
                for el in container.select(&anchor) {
                    let Some(href) = el.value().attr("href") else {
                        continue;
                    };
                    if href.starts_with('#')
                        || href.starts_with("mailto:")
                        || href.starts_with("javascript:")
                    {
                        continue;
                    }
                    let Ok(mut url) = base.join(href) else {
                        continue;
                    };
                    if url.scheme() != "http" && url.scheme() != "https" {
                        continue;
                    }
                    url.set_fragment(None);
                    if seen.insert(url.as_str().to_string()) {
                        links.push(DiscoveredLink {
                            text: normalize_whitespace(&el.text().collect::<String>()),
                            url,
                        });
                    }
                }
            }
            if !links.is_empty() {
                return links;
            }
        }

        // Document-order approximation of the "bottom of the page" region
        let all = Self::harvest_links(document, base);
        let start = (all.len() * 7) / 10;
        let tail = &all[start..];
        if tail.is_empty() {
            all
        } else {
            tail.to_vec()
        }
    }

    /// 从链接集合中识别社交网络主页
    ///
    /// 每个网络取第一个命中的链接
    pub fn classify_social_links(links: &[DiscoveredLink]) -> SocialLinks {
        let mut social = SocialLinks::default();

        for link in links {
            let Some(host) = link.url.host_str() else {
                continue;
            };
            let host = host.to_lowercase();

            if social.twitter_url.is_none()
                && (host.ends_with("twitter.com") || host.ends_with("x.com"))
            {
                social.twitter_url = Some(link.url.to_string());
            } else if social.linkedin_url.is_none() && host.ends_with("linkedin.com") {
                social.linkedin_url = Some(link.url.to_string());
            } else if social.youtube_url.is_none()
                && (host.ends_with("youtube.com") || host.ends_with("youtu.be"))
            {
                social.youtube_url = Some(link.url.to_string());
            } else if social.instagram_url.is_none() && host.ends_with("instagram.com") {
                social.instagram_url = Some(link.url.to_string());
            }
        }

        social
    }

    /// 从链接集合中筛选联盟推广候选链接
    pub fn affiliate_candidates(links: &[DiscoveredLink]) -> Vec<DiscoveredLink> {
        links
            .iter()
            .filter(|link| {
                let path = link.url.path().to_lowercase();
                let text = link.text.to_lowercase();
                AFFILIATE_KEYWORDS
                    .iter()
                    .any(|kw| path.contains(kw) || text.contains(kw))
            })
            .cloned()
            .collect()
    }
}

/// 收集元素的可见文本
///
/// 跳过脚本、样式等不可见标签的内容
fn visible_text(el: ElementRef) -> String {
    let mut out = String::new();
    collect_visible_text(el, &mut out);
    normalize_whitespace(&out)
}

fn collect_visible_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if !INVISIBLE_TAGS.contains(&child_el.value().name()) {
                collect_visible_text(child_el, out);
            }
        }
    }
}

/// 元素自身的直接文本（不含子元素）
fn direct_text(el: &ElementRef) -> String {
    el.children()
        .filter_map(|c| c.value().as_text().map(|t| t.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 元素的class/id是否命中噪音关键词
fn is_noise_element(el: &ElementRef) -> bool {
    let mut haystack = String::new();
    if let Some(class) = el.value().attr("class") {
        haystack.push_str(&class.to_lowercase());
    }
    if let Some(id) = el.value().attr("id") {
        haystack.push(' ');
        haystack.push_str(&id.to_lowercase());
    }
    NOISE_KEYWORDS.iter().any(|kw| haystack.contains(kw))
}

/// 祖先链中是否存在结构性噪音标签
fn has_noise_ancestor(el: &ElementRef) -> bool {
    el.ancestors().any(|node| {
        node.value()
            .as_element()
            .map(|e| matches!(e.name(), "header" | "footer" | "nav" | "aside"))
            .unwrap_or(false)
    })
}

/// 折叠连续空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
