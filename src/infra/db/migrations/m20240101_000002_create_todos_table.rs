//! Migration: Create todos table with a nullable owner reference.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use crate::config::MAX_TITLE_LENGTH;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todos::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Todos::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Todos::Title)
                            .string_len(MAX_TITLE_LENGTH as u32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Todos::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Todos::UserId).uuid().null())
                    // Deleting a user orphans its todos instead of removing them
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_todos_user_id")
                            .from(Todos::Table, Todos::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_todos_user_id")
                    .table(Todos::Table)
                    .col(Todos::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_todos_user_id")
                    .table(Todos::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Todos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Todos {
    Table,
    Id,
    Title,
    Completed,
    UserId,
}
