pub use sea_orm_migration::prelude::*;

mod m20251020_081512_create_table_user;
mod m20251020_082037_create_table_student;
mod m20251020_083344_create_table_internal_mark;
mod m20251024_140210_add_unique_index_internal_mark;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_081512_create_table_user::Migration),
            Box::new(m20251020_082037_create_table_student::Migration),
            Box::new(m20251020_083344_create_table_internal_mark::Migration),
            Box::new(m20251024_140210_add_unique_index_internal_mark::Migration),
        ]
    }
}
