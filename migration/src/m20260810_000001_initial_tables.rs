//! 初始表迁移
//!
//! 创建 loves 表（每个访客一行，记录当前支持状态）和
//! love_events 表（首次支持的只追加分析日志）。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 loves 表
        manager
            .create_table(
                Table::create()
                    .table(Loves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Loves::VisitorKey)
                            .string_len(255)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Loves::IsActive).boolean().not_null())
                    .col(
                        ColumnDef::new(Loves::FirstSeenAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Loves::LastChangedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Loves::ClientHint).text().null())
                    .to_owned(),
            )
            .await?;

        // is_active 索引（活跃计数查询走这里）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_loves_is_active")
                    .table(Loves::Table)
                    .col(Loves::IsActive)
                    .to_owned(),
            )
            .await?;

        // 创建 love_events 表
        manager
            .create_table(
                Table::create()
                    .table(LoveEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoveEvents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LoveEvents::VisitorKey)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LoveEvents::ClientHint).text().null())
                    .col(ColumnDef::new(LoveEvents::Referrer).text().null())
                    .col(
                        ColumnDef::new(LoveEvents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // visitor_key 索引（按访客查事件）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_love_events_visitor_key")
                    .table(LoveEvents::Table)
                    .col(LoveEvents::VisitorKey)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除索引
        manager
            .drop_index(Index::drop().name("idx_love_events_visitor_key").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_loves_is_active").to_owned())
            .await?;

        // 删除表
        manager
            .drop_table(Table::drop().table(LoveEvents::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Loves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Loves {
    #[sea_orm(iden = "loves")]
    Table,
    VisitorKey,
    IsActive,
    FirstSeenAt,
    LastChangedAt,
    ClientHint,
}

#[derive(DeriveIden)]
enum LoveEvents {
    #[sea_orm(iden = "love_events")]
    Table,
    Id,
    VisitorKey,
    ClientHint,
    Referrer,
    OccurredAt,
}
