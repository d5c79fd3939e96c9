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

use crate::domain::models::tool::{PricingType, SocialLinks, Tool};
use crate::domain::repositories::tool_repository::{RepositoryError, ToolRepository};
use crate::infrastructure::database::entities::tool as tool_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 工具仓库实现
pub struct ToolRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ToolRepositoryImpl {
    /// 创建新的工具仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 以主键为锚点构造只更新时间戳的活动模型
    fn touch(id: Uuid) -> tool_entity::ActiveModel {
        tool_entity::ActiveModel {
            id: Unchanged(id),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
    }
}

/// 更新失败时把"无记录被更新"映射为未找到
fn map_update_err(e: DbErr) -> RepositoryError {
    match e {
        DbErr::RecordNotUpdated => RepositoryError::NotFound,
        other => RepositoryError::Database(other),
    }
}

/// 实体模型到领域模型的转换
fn to_domain(m: tool_entity::Model) -> Tool {
    Tool {
        id: m.id,
        slug: m.slug,
        name: m.name,
        website_url: m.website_url,
        http_code: m.http_code,
        http_chain: m.http_chain,
        is_active: m.is_active,
        pricing_type: m.pricing_type.and_then(|s| s.parse().ok()),
        pricing_details: m.pricing_details,
        description: m.description,
        logo_url: m.logo_url,
        screenshot_path: m.screenshot_path,
        twitter_url: m.twitter_url,
        linkedin_url: m.linkedin_url,
        youtube_url: m.youtube_url,
        instagram_url: m.instagram_url,
        has_affiliate_program: m.has_affiliate_program,
        affiliate_url: m.affiliate_url,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    }
}

#[async_trait]
impl ToolRepository for ToolRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, RepositoryError> {
        let model = tool_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tool>, RepositoryError> {
        let model = tool_entity::Entity::find()
            .filter(tool_entity::Column::Slug.eq(slug))
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(to_domain))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tool>, RepositoryError> {
        let models = tool_entity::Entity::find()
            .filter(tool_entity::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn update_probe_result(
        &self,
        id: Uuid,
        http_code: i32,
        http_chain: &str,
        final_url: &str,
    ) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            http_code: Set(Some(http_code)),
            http_chain: Set(Some(http_chain.to_string())),
            website_url: Set(final_url.to_string()),
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            is_active: Set(is_active),
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }

    async fn update_pricing(
        &self,
        id: Uuid,
        pricing_type: Option<PricingType>,
        pricing_details: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            pricing_type: Set(pricing_type.map(|t| t.to_string())),
            pricing_details: match pricing_details {
                Some(details) => Set(Some(details.to_string())),
                None => NotSet,
            },
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }

    async fn update_description(
        &self,
        id: Uuid,
        description: &str,
    ) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            description: Set(Some(description.to_string())),
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }

    async fn update_social_links(
        &self,
        id: Uuid,
        links: &SocialLinks,
    ) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            twitter_url: Set(links.twitter_url.clone()),
            linkedin_url: Set(links.linkedin_url.clone()),
            youtube_url: Set(links.youtube_url.clone()),
            instagram_url: Set(links.instagram_url.clone()),
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }

    async fn update_affiliate(
        &self,
        id: Uuid,
        has_affiliate_program: bool,
        affiliate_url: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            has_affiliate_program: Set(has_affiliate_program),
            affiliate_url: Set(affiliate_url.map(|s| s.to_string())),
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }

    async fn update_screenshot(&self, id: Uuid, path: &str) -> Result<(), RepositoryError> {
        let active = tool_entity::ActiveModel {
            screenshot_path: Set(Some(path.to_string())),
            ..Self::touch(id)
        };
        active
            .update(self.db.as_ref())
            .await
            .map_err(map_update_err)?;
        Ok(())
    }
}
