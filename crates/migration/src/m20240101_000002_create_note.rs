//! Create `note` table with a unique constraint on `titre`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Note::Table)
                    .if_not_exists()
                    .col(uuid(Note::Id).primary_key())
                    .col(string_len(Note::Titre, 100).unique_key().not_null())
                    .col(text(Note::Contenue).not_null())
                    .col(timestamp_with_time_zone(Note::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Note::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Note::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Note { Table, Id, Titre, Contenue, CreatedAt, UpdatedAt }
