use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Tbl, Col); 6] = [
    ("idx_users_role", Tbl::Users, Col::Role),
    ("idx_products_name", Tbl::Products, Col::Name),
    ("idx_products_material", Tbl::Products, Col::Material),
    ("idx_products_price", Tbl::Products, Col::Price),
    ("idx_orders_customer_id", Tbl::Orders, Col::CustomerId),
    ("idx_photos_product_id", Tbl::Photos, Col::ProductId),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .table(table)
                        .col(col)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum Tbl {
    Users,
    Products,
    Orders,
    Photos,
}

#[derive(Iden, Clone, Copy)]
enum Col {
    Role,
    Name,
    Material,
    Price,
    CustomerId,
    ProductId,
}
