// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 爬虫端点通用请求体
///
/// 四个爬虫端点（内容、定价、描述、联盟）共用此结构；
/// `tool_id` 存在时分析结果会回写到对应工具条目
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequestDto {
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(range(min = 0, max = 5))]
    pub max_depth: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub max_pages: Option<usize>,
    pub tool_id: Option<Uuid>,
}

/// 独立分析请求体
///
/// 对一次先前爬取的内容直接运行LLM分析
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequestDto {
    #[validate(length(min = 1))]
    pub content: String,
    pub title: Option<String>,
    pub url: Option<String>,
}
