//! Create `clientes` table.
//!
//! Email carries the unique constraint that arbitrates concurrent registrations.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(pk_auto(Clientes::Id))
                    .col(string_len(Clientes::Nome, 255).not_null())
                    .col(string_len(Clientes::Email, 255).unique_key().not_null())
                    .col(
                        ColumnDef::new(Clientes::Telefone)
                            .string_len(20)
                            .null(),
                    )
                    .col(
                        timestamp_with_time_zone(Clientes::CriadoEm)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Stays NULL until the row is first modified
                    .col(
                        ColumnDef::new(Clientes::AtualizadoEm)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clientes::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clientes { Table, Id, Nome, Email, Telefone, CriadoEm, AtualizadoEm }
