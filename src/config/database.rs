//! Database connection and table creation using `SeaORM`.
//!
//! Tables are generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL or separate migration tooling.

use crate::entities::{Order, OrderItem, Product};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Opens a connection to the configured database.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the products, orders, and order items tables from the entities.
///
/// # Errors
/// Returns an error if any of the create-table statements fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // if_not_exists keeps this safe to run on every boot
    let mut product_table = schema.create_table_from_entity(Product);
    product_table.if_not_exists();
    let mut order_table = schema.create_table_from_entity(Order);
    order_table.if_not_exists();
    let mut order_item_table = schema.create_table_from_entity(OrderItem);
    order_item_table.if_not_exists();

    db.execute(builder.build(&product_table)).await?;
    db.execute(builder.build(&order_table)).await?;
    db.execute(builder.build(&order_item_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{OrderItemModel, OrderModel, ProductModel};
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<OrderItemModel> = OrderItem::find().limit(1).all(&db).await?;

        Ok(())
    }
}
