// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// DNS解析失败的状态码约定
pub const DNS_FAILURE_CODE: i32 = -1;

/// 重定向探测结果
///
/// 探测过程中的网络故障被编码为数据而不是错误：
/// DNS失败 → 链为 `DNS`、状态码-1；超时 → 链为 `Timeout`、
/// 状态码0；其他网络错误 → 链为 `Erreur`、状态码0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// 状态码链，以 `>` 连接（如 `301>200`）
    pub chain: String,
    /// 重定向后的最终URL
    pub final_url: String,
    /// 最终状态码
    pub final_code: i32,
}

impl ProbeOutcome {
    /// DNS解析失败
    pub fn dns_failure(url: &str) -> Self {
        Self {
            chain: "DNS".to_string(),
            final_url: url.to_string(),
            final_code: DNS_FAILURE_CODE,
        }
    }

    /// 请求超时
    pub fn timeout(url: &str) -> Self {
        Self {
            chain: "Timeout".to_string(),
            final_url: url.to_string(),
            final_code: 0,
        }
    }

    /// 其他网络错误
    pub fn network_error(url: &str) -> Self {
        Self {
            chain: "Erreur".to_string(),
            final_url: url.to_string(),
            final_code: 0,
        }
    }
}

/// URL验证状态
///
/// 状态机终态，驱动工具条目 `is_active` 的写入：
/// 仅 `Valid` 置为激活，其余一律停用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// 2xx响应，URL可用
    Valid,
    /// 4xx客户端错误
    ClientError,
    /// 5xx服务端错误
    ServerError,
    /// DNS解析失败
    DnsFailure,
    /// 跳数耗尽仍停留在3xx
    RedirectIncomplete,
}

impl ValidationStatus {
    /// 终态对应的激活标志
    pub fn is_active(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }
}

/// URL验证结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// 用户提交的原始URL
    pub original_url: String,
    /// 重定向后的最终URL
    pub final_url: String,
    /// 最终状态码（206规范化为200）
    pub status_code: i32,
    /// 是否发生过重定向
    pub is_redirected: bool,
    /// 重定向链中的各状态码
    pub redirect_chain: Vec<String>,
    /// 是否判定为有效
    pub is_valid: bool,
    /// 验证状态
    pub status: ValidationStatus,
    /// 人类可读的说明信息
    pub message: String,
}
