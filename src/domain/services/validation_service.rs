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

use crate::domain::models::validation::{
    ProbeOutcome, ValidationResult, ValidationStatus, DNS_FAILURE_CODE,
};

/// 验证服务
///
/// 把探测结果归类为验证终态。终态驱动工具条目 `is_active`
/// 的写入：仅 `Valid` 激活，其余一律停用（回写由处理器
/// 通过仓库完成）。
pub struct ValidationService;

impl ValidationService {
    /// 归类一次探测结果
    ///
    /// 206部分内容规范化为200
    pub fn classify(original_url: &str, probe: &ProbeOutcome) -> ValidationResult {
        let redirect_chain: Vec<String> =
            probe.chain.split('>').map(|s| s.to_string()).collect();
        // The HEAD->GET fallback also lengthens the chain, only 3xx codes
        // mean an actual redirect happened
        let is_redirected = redirect_chain.iter().any(|c| c.starts_with('3'));

        let mut status_code = probe.final_code;
        if status_code == 206 {
            status_code = 200;
        }

        let (status, message) = match status_code {
            DNS_FAILURE_CODE => (
                ValidationStatus::DnsFailure,
                "Résolution DNS impossible".to_string(),
            ),
            200..=299 => (
                ValidationStatus::Valid,
                format!("URL valide ({})", status_code),
            ),
            300..=399 => (
                ValidationStatus::RedirectIncomplete,
                "Chaîne de redirection incomplète".to_string(),
            ),
            400..=499 => (
                ValidationStatus::ClientError,
                format!("Erreur client ({})", status_code),
            ),
            _ => (
                ValidationStatus::ServerError,
                format!("Erreur serveur ou réseau ({})", probe.chain),
            ),
        };

        ValidationResult {
            original_url: original_url.to_string(),
            final_url: probe.final_url.clone(),
            status_code,
            is_redirected,
            redirect_chain,
            is_valid: status.is_active(),
            status,
            message,
        }
    }
}
