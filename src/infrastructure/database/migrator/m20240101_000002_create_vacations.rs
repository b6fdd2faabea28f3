//! Create vacations table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vacations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vacations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vacations::UserId).string().not_null())
                    .col(ColumnDef::new(Vacations::UserName).string_len(255).not_null())
                    .col(ColumnDef::new(Vacations::UserEmail).string_len(255).not_null())
                    .col(ColumnDef::new(Vacations::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Vacations::Description).text().null())
                    .col(ColumnDef::new(Vacations::StartDate).date().not_null())
                    .col(ColumnDef::new(Vacations::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Vacations::VacationType)
                            .string_len(20)
                            .not_null()
                            .default("vacation"),
                    )
                    .col(
                        ColumnDef::new(Vacations::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Vacations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vacations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_vacations_user_id", Vacations::UserId),
            ("idx_vacations_status", Vacations::Status),
            ("idx_vacations_start_date", Vacations::StartDate),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Vacations::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vacations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vacations {
    Table,
    Id,
    UserId,
    UserName,
    UserEmail,
    Title,
    Description,
    StartDate,
    EndDate,
    VacationType,
    Status,
    CreatedAt,
    UpdatedAt,
}
