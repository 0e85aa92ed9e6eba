//! Schema management for the local ledger.
//!
//! Running [`Migrator::up`] on every startup is safe: each migration is
//! recorded once and the table itself is created with `IF NOT EXISTS`, so a
//! database whose `transactions` table predates the migration bookkeeping is
//! adopted as is.
pub use sea_orm_migration::prelude::*;

mod m20251019_000001_transactions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20251019_000001_transactions::Migration)]
    }
}
