//! Secondary indexes for the hot query paths: note listing sorts by
//! `created_at` and the user listing sorts by `username` or `created_at`.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_note_created_at")
                    .table(Note::Table)
                    .col(Note::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_user_created_at")
                    .table(User::Table)
                    .col(User::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_note_created_at").table(Note::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_user_created_at").table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Note { Table, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, CreatedAt }
