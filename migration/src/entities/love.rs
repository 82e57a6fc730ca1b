//! Per-visitor love state

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "loves")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub visitor_key: String,
    pub is_active: bool,
    pub first_seen_at: DateTimeUtc,
    pub last_changed_at: DateTimeUtc,
    #[sea_orm(column_type = "Text", nullable)]
    pub client_hint: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
