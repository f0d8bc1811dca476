use sea_orm::entity::prelude::*;

/// Placed order. `product_price` and `product_name` are captured at order time.
/// `customer_id` and `product_id` are plain keys; the store does not enforce them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub customer_id: String,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub quantity: i32,
    pub address: String,
    pub comments: Option<String>,
    pub status: String,
    pub total_price: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
