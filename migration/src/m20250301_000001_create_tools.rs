use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create tools table
        manager
            .create_table(
                Table::create()
                    .table(Tools::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tools::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Tools::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Tools::Name).string().not_null())
                    .col(ColumnDef::new(Tools::WebsiteUrl).string().not_null())
                    .col(ColumnDef::new(Tools::HttpCode).integer())
                    .col(ColumnDef::new(Tools::HttpChain).string())
                    .col(
                        ColumnDef::new(Tools::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Tools::PricingType).string())
                    .col(ColumnDef::new(Tools::PricingDetails).text())
                    .col(ColumnDef::new(Tools::Description).text())
                    .col(ColumnDef::new(Tools::LogoUrl).string())
                    .col(ColumnDef::new(Tools::TwitterUrl).string())
                    .col(ColumnDef::new(Tools::LinkedinUrl).string())
                    .col(ColumnDef::new(Tools::YoutubeUrl).string())
                    .col(ColumnDef::new(Tools::InstagramUrl).string())
                    .col(
                        ColumnDef::new(Tools::HasAffiliateProgram)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Tools::AffiliateUrl).string())
                    .col(
                        ColumnDef::new(Tools::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Tools::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_tools_slug")
                    .table(Tools::Table)
                    .col(Tools::Slug)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tools_is_active")
                    .table(Tools::Table)
                    .col(Tools::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tools::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tools {
    Table,
    Id,
    Slug,
    Name,
    WebsiteUrl,
    HttpCode,
    HttpChain,
    IsActive,
    PricingType,
    PricingDetails,
    Description,
    LogoUrl,
    TwitterUrl,
    LinkedinUrl,
    YoutubeUrl,
    InstagramUrl,
    HasAffiliateProgram,
    AffiliateUrl,
    CreatedAt,
    UpdatedAt,
}
