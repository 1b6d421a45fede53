//! Product entity - Represents an item of farm inventory.
//!
//! Products are keyed by `(owner_id, id)` where `id` is generated by the client
//! and acts as the merge key for sync reconciliation. The server never assigns
//! product identifiers.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Owning account; scopes all visibility and mutation
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner_id: String,
    /// Client-generated identifier, unique within the owner's namespace
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the product (e.g., "Tomatoes")
    pub name: String,
    /// Quantity on hand; whole units only. Concurrent sales may drive this
    /// negative, which is permitted (inventory correction happens out of band).
    pub stock: i64,
    /// Unit cost in dollars, 2 decimal places
    pub cost: f64,
    /// Unit sale price in dollars, 2 decimal places
    pub price: f64,
    /// Set at first insert and never overwritten by later upserts
    pub created_at: DateTimeUtc,
    /// Refreshed on every successful write
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
