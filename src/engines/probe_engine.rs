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

use crate::domain::models::validation::ProbeOutcome;
use crate::utils::url_utils;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// 最大重定向跳数
const MAX_REDIRECT_HOPS: usize = 5;

/// DNS解析超时时间
const DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// 重定向/DNS探测引擎
///
/// 对URL执行一次性探测：先做有界超时的DNS解析，再以
/// `HEAD` 请求手动跟随 `Location` 重定向，最多5跳；终点
/// 状态为404/405时用 `GET` 重试一次。探测不重试，网络
/// 故障降级为数据（见 `ProbeOutcome`）而非错误。
pub struct ProbeEngine {
    client: reqwest::Client,
}

impl ProbeEngine {
    /// 创建新的探测引擎
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次HTTP请求的超时时间
    /// * `user_agent` - 请求使用的User-Agent
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            // Builder only fails on TLS backend initialization
            .expect("failed to build probe http client");

        Self { client }
    }

    /// 探测URL
    ///
    /// # 参数
    ///
    /// * `raw_url` - 原始URL，缺少协议时补全 `https://`
    ///
    /// # 返回值
    ///
    /// 始终返回 `ProbeOutcome`，故障编码在链和状态码中
    pub async fn probe(&self, raw_url: &str) -> ProbeOutcome {
        let url = match url_utils::normalize_url(raw_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("URL invalide {}: {}", raw_url, e);
                return ProbeOutcome::network_error(raw_url);
            }
        };

        if let Some(outcome) = self.check_dns(&url).await {
            return outcome;
        }

        let mut current = url;
        let mut codes: Vec<i32> = Vec::new();

        for _hop in 0..MAX_REDIRECT_HOPS {
            let response = match self.client.head(current.as_str()).send().await {
                Ok(response) => response,
                Err(e) if e.is_timeout() => return ProbeOutcome::timeout(current.as_str()),
                Err(e) => {
                    warn!("Probe failed for {}: {}", current, e);
                    return ProbeOutcome::network_error(current.as_str());
                }
            };

            let status = response.status();
            codes.push(status.as_u16() as i32);

            if !status.is_redirection() {
                break;
            }

            let Some(next) = next_location(&current, &response) else {
                // Redirect without a usable Location header, chain ends here
                break;
            };
            debug!("Redirect {} -> {}", current, next);
            current = next;
        }

        let mut final_code = codes.last().copied().unwrap_or(0);

        // Some servers reject HEAD outright, retry the terminal URL with GET
        if final_code == StatusCode::NOT_FOUND.as_u16() as i32
            || final_code == StatusCode::METHOD_NOT_ALLOWED.as_u16() as i32
            || final_code == 0
        {
            match self.client.get(current.as_str()).send().await {
                Ok(response) => {
                    final_code = response.status().as_u16() as i32;
                    codes.push(final_code);
                }
                Err(e) if e.is_timeout() => return ProbeOutcome::timeout(current.as_str()),
                Err(e) => {
                    warn!("GET fallback failed for {}: {}", current, e);
                    return ProbeOutcome::network_error(current.as_str());
                }
            }
        }

        ProbeOutcome {
            chain: codes
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(">"),
            final_url: current.to_string(),
            final_code,
        }
    }

    /// DNS解析检查
    ///
    /// 解析失败或超时返回 `DNS` 链结果，成功返回 `None`
    async fn check_dns(&self, url: &Url) -> Option<ProbeOutcome> {
        let host = match url.host_str() {
            Some(host) => host.to_string(),
            None => return Some(ProbeOutcome::network_error(url.as_str())),
        };
        let port = url.port_or_known_default().unwrap_or(443);

        let outcome =
            match tokio::time::timeout(DNS_TIMEOUT, tokio::net::lookup_host((host.as_str(), port)))
                .await
            {
                Ok(Ok(mut addrs)) => {
                    if addrs.next().is_none() {
                        Some(ProbeOutcome::dns_failure(url.as_str()))
                    } else {
                        None
                    }
                }
                Ok(Err(e)) => {
                    debug!("DNS lookup failed for {}: {}", host, e);
                    Some(ProbeOutcome::dns_failure(url.as_str()))
                }
                Err(_) => Some(ProbeOutcome::dns_failure(url.as_str())),
            };
        outcome
    }
}

/// 从响应中解析下一跳URL
///
/// `Location` 可能是相对路径，需要基于当前URL解析
fn next_location(current: &Url, response: &reqwest::Response) -> Option<Url> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(_) => url_utils::resolve_url(current, location).ok(),
    }
}
