pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20260810_000001_initial_tables;
mod m20260818_000001_event_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_initial_tables::Migration),
            Box::new(m20260818_000001_event_indexes::Migration),
        ]
    }
}
