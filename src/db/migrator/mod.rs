use sea_orm_migration::prelude::*;

mod m20261019_add_users;
mod m20261019_add_gadgets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_add_users::Migration),
            Box::new(m20261019_add_gadgets::Migration),
        ]
    }
}
