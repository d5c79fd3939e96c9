// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{AnalysisOutcome, CrawlOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 爬虫端点通用响应体
///
/// `analysis` 仅在LLM调用本身失败时为 `null`；解码失败
/// 以 `{"raw": ...}` 形式返回
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlResponseDto {
    pub final_url: String,
    pub title: Option<String>,
    pub content: String,
    pub pages_discovered: usize,
    pub pages_processed: usize,
    pub content_length: usize,
    pub analysis: Option<AnalysisOutcome>,
}

impl CrawlResponseDto {
    /// 由爬取结果与分析结果组装响应
    pub fn from_outcome(outcome: CrawlOutcome, analysis: Option<AnalysisOutcome>) -> Self {
        Self {
            final_url: outcome.final_url,
            title: outcome.title,
            content: outcome.content,
            pages_discovered: outcome.pages_discovered,
            pages_processed: outcome.pages_processed,
            content_length: outcome.content_length,
            analysis,
        }
    }
}

/// 批量探测响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchCrawlResponseDto {
    pub success: bool,
    pub results: Vec<ToolProbeResultDto>,
}

/// 单个工具的探测结果
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolProbeResultDto {
    pub id: Uuid,
    pub name: String,
    pub original_url: String,
    pub final_url: String,
    pub http_code: i32,
    pub http_chain: String,
}

/// 截图批处理响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenshotResponseDto {
    pub success: bool,
    pub results: Vec<ScreenshotResultDto>,
}

/// 单个工具的截图结果
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotResultDto {
    pub id: Uuid,
    pub path: Option<String>,
    pub error: Option<String>,
}
