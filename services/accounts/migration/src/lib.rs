use sea_orm_migration::prelude::*;

mod m20260901_000001_create_companies;
mod m20260901_000002_create_users;
mod m20260901_000003_create_admins;
mod m20260901_000004_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260901_000001_create_companies::Migration),
            Box::new(m20260901_000002_create_users::Migration),
            Box::new(m20260901_000003_create_admins::Migration),
            Box::new(m20260901_000004_create_outbox_events::Migration),
        ]
    }
}
