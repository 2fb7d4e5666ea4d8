use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Clientes: listing and name search both order by nome
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_clientes_nome")
                    .table(Clientes::Table)
                    .col(Clientes::Nome)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clientes_nome").table(Clientes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clientes { Table, Nome }
