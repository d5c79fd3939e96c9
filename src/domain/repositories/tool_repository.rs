// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::tool::{PricingType, SocialLinks, Tool};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 工具仓库特质
///
/// 定义爬取管道对工具条目的数据访问接口。爬取结果的回写
/// 全部经由此接口，处理器对具体存储实现保持无感知。
#[async_trait]
pub trait ToolRepository: Send + Sync {
    /// 根据ID查找工具
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, RepositoryError>;
    /// 根据slug查找工具
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tool>, RepositoryError>;
    /// 批量查找工具
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tool>, RepositoryError>;
    /// 回写重定向探测结果
    async fn update_probe_result(
        &self,
        id: Uuid,
        http_code: i32,
        http_chain: &str,
        final_url: &str,
    ) -> Result<(), RepositoryError>;
    /// 设置激活标志
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), RepositoryError>;
    /// 回写定价信息
    async fn update_pricing(
        &self,
        id: Uuid,
        pricing_type: Option<PricingType>,
        pricing_details: Option<&str>,
    ) -> Result<(), RepositoryError>;
    /// 回写详细描述
    async fn update_description(&self, id: Uuid, description: &str)
        -> Result<(), RepositoryError>;
    /// 回写社交链接
    async fn update_social_links(
        &self,
        id: Uuid,
        links: &SocialLinks,
    ) -> Result<(), RepositoryError>;
    /// 回写联盟推广信息
    async fn update_affiliate(
        &self,
        id: Uuid,
        has_affiliate_program: bool,
        affiliate_url: Option<&str>,
    ) -> Result<(), RepositoryError>;
    /// 回写截图路径
    async fn update_screenshot(&self, id: Uuid, path: &str) -> Result<(), RepositoryError>;
}
