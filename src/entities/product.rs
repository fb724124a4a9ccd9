//! Product entity - Represents one item in the store catalog.
//!
//! Each product has a unique name, a price in minor currency units, a stock
//! level, a description, and an image reference produced by the upload store.
//! Products are created through the admin surface and never deleted; stock is
//! decremented when an order is materialized and may go negative since no
//! reservation is performed at checkout time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product, unique across the catalog
    #[sea_orm(unique)]
    pub name: String,
    /// Unit price in minor currency units (e.g. cents)
    pub price: i64,
    /// Units currently in stock; not guarded against going negative
    pub stock: i64,
    /// Free-text description shown on the product page
    pub description: String,
    /// Stable reference to the product image (path or URL)
    pub image: String,
    /// When the product was created
    pub created_at: DateTimeUtc,
    /// When the product was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One product appears in many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
