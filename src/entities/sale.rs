//! Sale entity - Represents a recorded sale transaction.
//!
//! Sales are keyed by `(owner_id, id)`; the `id` is client-generated when the
//! record arrives through sync and server-assigned (UUID v4) when it is created
//! by the transactional sale path. `product_id` points into the owner's product
//! namespace but is not enforced as a foreign key: a sale may outlive the
//! product it references, and such orphans are valid records.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Owning account; scopes all visibility and mutation
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner_id: String,
    /// Identifier, unique within the owner's namespace
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// The product this sale drew stock from; may no longer resolve
    pub product_id: String,
    /// Units sold; always positive
    pub quantity: i64,
    /// Unit price charged at the time of sale, 2 decimal places. Deliberately
    /// decoupled from the product's current price.
    pub price: f64,
    /// Time of sale; client-supplied in sync mode so offline sales keep their
    /// true timestamp, server-assigned otherwise
    pub created_at: DateTimeUtc,
    /// Refreshed on every successful write
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Sale and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
