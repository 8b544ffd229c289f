//! Create `book` table. No relations; books are immutable once created.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Book::Table)
                    .if_not_exists()
                    .col(uuid(Book::Id).primary_key())
                    .col(string_len(Book::Title, 255).not_null())
                    .col(string_len(Book::Author, 255).not_null())
                    .col(text(Book::Summary).not_null())
                    .col(timestamp_with_time_zone(Book::PublishedDate).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Book::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Book { Table, Id, Title, Author, Summary, PublishedDate }
