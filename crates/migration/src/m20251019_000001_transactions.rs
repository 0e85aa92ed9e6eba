//! Creates the `transactions` table.
//!
//! Column names are camelCase to stay compatible with databases created by
//! earlier releases, which can be opened unchanged.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Title,
    Amount,
    #[iden = "createdAt"]
    CreatedAt,
    Type,
    #[iden = "isDeleted"]
    IsDeleted,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Title).text().not_null())
                    .col(ColumnDef::new(Transactions::Amount).double().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .custom(Alias::new("DATETIME"))
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Transactions::Type).text().not_null())
                    .col(ColumnDef::new(Transactions::IsDeleted).integer().default(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await
    }
}
