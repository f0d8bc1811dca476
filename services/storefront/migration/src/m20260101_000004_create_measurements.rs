use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Measurements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Measurements::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Measurements::MeasurerId).string().not_null())
                    .col(ColumnDef::new(Measurements::OrderId).string().null())
                    .col(ColumnDef::new(Measurements::Address).string().not_null())
                    .col(
                        ColumnDef::new(Measurements::ScheduledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Measurements::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Measurements::Notes).text().null())
                    .col(
                        ColumnDef::new(Measurements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Measurements::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Measurements {
    Table,
    Key,
    MeasurerId,
    OrderId,
    Address,
    ScheduledAt,
    Status,
    Notes,
    CreatedAt,
}
