//! Full-state sync reads.
//!
//! A client bootstrapping (or periodically resyncing) asks for everything it
//! owns in one response. Both reads run inside a single read transaction so
//! the two result sets come from one snapshot and a sale never references a
//! product invisible in the same response.

use crate::{
    core::sale::{SaleRecord, with_product_names},
    entities::{Product, Sale, product, sale},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use serde::Serialize;

/// Everything an owner has: the payload of `GET /sync`.
#[derive(Debug, Serialize)]
pub struct SyncSnapshot {
    /// All of the owner's products, newest first
    pub products: Vec<product::Model>,
    /// All of the owner's sales, newest first, with product names joined
    pub sales: Vec<SaleRecord>,
}

/// Reads the full current state for one owner: all products and all sales,
/// each ordered by creation time descending.
///
/// # Errors
/// Returns [`Error::Validation`] if `owner_id` is missing, or
/// [`Error::Storage`] if either read fails.
pub async fn sync_owner(db: &DatabaseConnection, owner_id: &str) -> Result<SyncSnapshot> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "ownerId is required".to_string(),
        });
    }

    let txn = db.begin().await?;

    let products = Product::find()
        .filter(product::Column::OwnerId.eq(owner_id))
        .order_by_desc(product::Column::CreatedAt)
        .all(&txn)
        .await?;
    let sales = Sale::find()
        .filter(sale::Column::OwnerId.eq(owner_id))
        .order_by_desc(sale::Column::CreatedAt)
        .all(&txn)
        .await?;

    txn.commit().await?;

    let sales = with_product_names(sales, &products);
    Ok(SyncSnapshot { products, sales })
}
