pub use sea_orm_migration::prelude::*;

mod m20251001_000001_create_users_table;
mod m20251001_000002_create_events_table;
mod m20251001_000003_create_event_participants_table;
mod m20251001_000004_create_achievements_table;
mod m20251001_000005_create_user_achievements_table;
mod m20251001_000006_create_products_table;
mod m20251001_000007_create_orders_table;
mod m20251001_000008_create_notifications_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_000001_create_users_table::Migration),
            Box::new(m20251001_000002_create_events_table::Migration),
            Box::new(m20251001_000003_create_event_participants_table::Migration),
            Box::new(m20251001_000004_create_achievements_table::Migration),
            Box::new(m20251001_000005_create_user_achievements_table::Migration),
            Box::new(m20251001_000006_create_products_table::Migration),
            Box::new(m20251001_000007_create_orders_table::Migration),
            Box::new(m20251001_000008_create_notifications_table::Migration),
        ]
    }
}
