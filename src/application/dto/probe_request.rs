// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// 批量探测请求体
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchCrawlRequestDto {
    #[validate(length(min = 1, max = 100))]
    pub tool_ids: Vec<Uuid>,
}

/// URL验证请求体
///
/// `tool_id` 或 `slug` 存在时，验证终态会写入该工具的
/// 激活标志
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UrlValidatorRequestDto {
    #[validate(length(min = 1))]
    pub url: String,
    pub tool_id: Option<Uuid>,
    pub slug: Option<String>,
}

/// 截图批处理请求体
#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequestDto {
    #[validate(length(min = 1, max = 50))]
    pub tool_ids: Vec<Uuid>,
}
