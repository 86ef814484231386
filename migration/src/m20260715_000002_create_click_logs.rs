//! 点击日志表迁移
//!
//! click_logs 每次成功跳转写入一行，用于分析统计：
//! - 时间戳
//! - 用户代理 (user_agent)
//! - IP 地址

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClickLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClickLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClickLogs::UrlId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClickLogs::ClickedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClickLogs::UserAgent).text().null())
                    .col(ColumnDef::new(ClickLogs::IpAddress).string_len(45).null())
                    .to_owned(),
            )
            .await?;

        // url_id 索引（单链接统计查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_logs_url_id")
                    .table(ClickLogs::Table)
                    .col(ClickLogs::UrlId)
                    .to_owned(),
            )
            .await?;

        // clicked_at 索引（时间范围查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_click_logs_clicked_at")
                    .table(ClickLogs::Table)
                    .col(ClickLogs::ClickedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_click_logs_clicked_at")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_click_logs_url_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClickLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ClickLogs {
    #[sea_orm(iden = "click_logs")]
    Table,
    Id,
    UrlId,
    ClickedAt,
    UserAgent,
    IpAddress,
}
