use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gadgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Gadgets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Gadgets::Name).string().not_null())
                    .col(
                        ColumnDef::new(Gadgets::Codename)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Gadgets::Description).text().null())
                    .col(
                        ColumnDef::new(Gadgets::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(ColumnDef::new(Gadgets::DecommissionedAt).string().null())
                    .col(ColumnDef::new(Gadgets::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Gadgets::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Listing is always newest-first, optionally filtered by status
        manager
            .create_index(
                Index::create()
                    .name("idx_gadgets_status_created_at")
                    .table(Gadgets::Table)
                    .col(Gadgets::Status)
                    .col(Gadgets::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gadgets_created_at")
                    .table(Gadgets::Table)
                    .col(Gadgets::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gadgets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Gadgets {
    Table,
    Id,
    Name,
    Codename,
    Description,
    Status,
    DecommissionedAt,
    CreatedAt,
    UpdatedAt,
}
