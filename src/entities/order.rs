//! Order entity - Represents a checkout submitted by a customer.
//!
//! Each order carries the contact and shipping details captured at checkout,
//! a display reference code, a free-text status (initially `"PENDING"`), and
//! a payment type label. The line items live in the `order_items` table;
//! totals are recomputed from current product prices rather than stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display reference code; random, not guaranteed unique
    pub reference: String,
    /// Customer first name
    pub first_name: String,
    /// Customer last name
    pub last_name: String,
    /// Customer phone number, stored as entered
    pub phone_number: String,
    /// Customer email address
    pub email: String,
    /// Shipping street address
    pub address: String,
    /// Shipping city
    pub city: String,
    /// Shipping country
    pub country: String,
    /// Free-text order status, `"PENDING"` on creation
    pub status: String,
    /// Payment type label; no payment processing is attached to it
    pub payment_type: String,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One order owns many order items
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
