//! Sea-ORM migrations for the rally-groups database schema

pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_groups_table;
mod m20260815_000002_create_group_members_table;
mod m20260815_000003_create_group_invites_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_groups_table::Migration),
            Box::new(m20260815_000002_create_group_members_table::Migration),
            Box::new(m20260815_000003_create_group_invites_table::Migration),
        ]
    }
}
