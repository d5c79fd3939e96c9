// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// ```json 围栏代码块
static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap());

/// 普通 ``` 围栏代码块
static PLAIN_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```\s*(.*?)\s*```").unwrap());

/// 从LLM自由文本响应中提取JSON对象
///
/// 按顺序尝试一组解码策略，第一个成功解析的候选获胜：
/// 1. ```json 围栏代码块
/// 2. 普通 ``` 围栏代码块
/// 3. 文本中第一个配对完整的 `{...}` 片段
///
/// 全部失败时返回 `None`，由调用方降级为原始文本
pub fn extract_json(text: &str) -> Option<Value> {
    for candidate in candidates(text) {
        if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
            if value.is_object() || value.is_array() {
                return Some(value);
            }
        }
    }
    None
}

/// 按策略顺序产出候选JSON字符串
fn candidates(text: &str) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(caps) = JSON_FENCE.captures(text) {
        out.push(caps[1].to_string());
    }

    if let Some(caps) = PLAIN_FENCE.captures(text) {
        out.push(caps[1].to_string());
    }

    if let Some(span) = first_balanced_object(text) {
        out.push(span.to_string());
    }

    out
}

/// 定位文本中第一个花括号配对完整的片段
///
/// 跳过字符串字面量内部的花括号，避免被内容中的 `{`/`}` 干扰
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}
