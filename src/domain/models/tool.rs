// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 工具实体
///
/// 表示目录中的一个AI视频工具条目。爬取管道只负责回写
/// 由探测和分析得到的衍生字段，条目本身的生命周期由
/// 目录管理端维护。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// 工具唯一标识符
    pub id: Uuid,
    /// URL友好的短标识，目录中唯一
    pub slug: String,
    /// 工具名称
    pub name: String,
    /// 官网URL
    pub website_url: String,
    /// 最近一次探测得到的HTTP状态码
    pub http_code: Option<i32>,
    /// 重定向链，状态码以 `>` 连接
    pub http_chain: Option<String>,
    /// 是否在目录中展示，由URL验证结果驱动
    pub is_active: bool,
    /// 定价类型
    pub pricing_type: Option<PricingType>,
    /// 定价详情（HTML片段）
    pub pricing_details: Option<String>,
    /// 详细描述（HTML片段）
    pub description: Option<String>,
    /// Logo图片URL
    pub logo_url: Option<String>,
    /// 截图文件路径
    pub screenshot_path: Option<String>,
    /// Twitter/X 主页URL
    pub twitter_url: Option<String>,
    /// LinkedIn 主页URL
    pub linkedin_url: Option<String>,
    /// YouTube 频道URL
    pub youtube_url: Option<String>,
    /// Instagram 主页URL
    pub instagram_url: Option<String>,
    /// 是否提供联盟推广计划
    pub has_affiliate_program: bool,
    /// 联盟推广链接
    pub affiliate_url: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 定价类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingType {
    /// 完全免费
    Free,
    /// 免费增值，有免费层级和付费层级
    Freemium,
    /// 纯付费
    Paid,
}

impl fmt::Display for PricingType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PricingType::Free => write!(f, "FREE"),
            PricingType::Freemium => write!(f, "FREEMIUM"),
            PricingType::Paid => write!(f, "PAID"),
        }
    }
}

impl FromStr for PricingType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FREE" => Ok(PricingType::Free),
            "FREEMIUM" => Ok(PricingType::Freemium),
            "PAID" => Ok(PricingType::Paid),
            _ => Err(()),
        }
    }
}

/// 社交链接集合
///
/// 社交链接分析端点的持久化载体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    pub twitter_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub youtube_url: Option<String>,
    pub instagram_url: Option<String>,
}
