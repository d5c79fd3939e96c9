use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Tools::Table)
                    .add_column(ColumnDef::new(Tools::ScreenshotPath).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Tools::Table)
                    .drop_column(Tools::ScreenshotPath)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Tools {
    Table,
    ScreenshotPath,
}
