//! First-activation analytics log entry
//!
//! One row per visitor key, written when the loves row is first created.
//! Append-only: never updated or deleted by the service.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "love_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub visitor_key: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub client_hint: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub referrer: Option<String>,
    pub occurred_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
