//! love_events 时间索引
//!
//! Admin 的最近事件列表按 occurred_at 倒序分页，补充时间索引。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_love_events_occurred_at")
                    .table(LoveEvents::Table)
                    .col(LoveEvents::OccurredAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_love_events_occurred_at").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LoveEvents {
    #[sea_orm(iden = "love_events")]
    Table,
    OccurredAt,
}
