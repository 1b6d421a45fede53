//! Upsert reconciliation - merges client-originated records into server state.
//!
//! An offline client re-sends records without knowing whether an earlier
//! attempt landed, so every operation here is an idempotent insert-or-update
//! keyed on `(owner_id, id)`: submitting the identical payload twice produces
//! the same stored row and never a duplicate. The conflict policy is
//! last-write-wins by arrival order, expressed as the pure [`merge_product`]
//! and [`merge_sale`] functions so it can be swapped (e.g., for timestamp
//! comparison) without touching the write plumbing.
//!
//! The write itself is a single conditional statement (`INSERT ... ON CONFLICT
//! DO UPDATE`), so two racing reconciliations of the same key interleave
//! safely: whichever commits last wins, and `created_at` survives either way
//! because it is excluded from the product conflict-update column set.

use crate::{
    core::round2,
    entities::{Product, Sale, product, sale},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{DbErr, Set, prelude::*};

/// A client-submitted product record, as carried by the sync protocol.
#[derive(Debug, Clone)]
pub struct ProductUpsert {
    /// Client-generated merge key
    pub id: String,
    /// Display name
    pub name: String,
    /// Quantity on hand as counted by the client
    pub stock: i64,
    /// Unit cost in dollars
    pub cost: f64,
    /// Unit price in dollars
    pub price: f64,
}

/// A client-submitted sale record, as carried by the sync protocol.
#[derive(Debug, Clone)]
pub struct SaleUpsert {
    /// Client-generated merge key
    pub id: String,
    /// Product the sale drew stock from
    pub product_id: String,
    /// Units sold
    pub quantity: i64,
    /// Unit price charged at time of sale
    pub price: f64,
    /// True sale time as recorded by the client; `None` keeps the stored value
    /// (or the server clock on first insert)
    pub created_at: Option<DateTime<Utc>>,
}

/// Last-write-wins merge policy for products.
///
/// Produces the full row to store: every mutable field (name, stock, cost,
/// price) comes from the incoming record, `updated_at` is refreshed, and
/// `created_at` is preserved from the existing row when there is one.
pub fn merge_product(
    existing: Option<&product::Model>,
    incoming: &ProductUpsert,
    owner_id: &str,
    now: DateTime<Utc>,
) -> product::ActiveModel {
    product::ActiveModel {
        owner_id: Set(owner_id.to_string()),
        id: Set(incoming.id.clone()),
        name: Set(incoming.name.clone()),
        stock: Set(incoming.stock),
        cost: Set(round2(incoming.cost)),
        price: Set(round2(incoming.price)),
        created_at: Set(existing.map_or(now, |e| e.created_at)),
        updated_at: Set(now),
    }
}

/// Last-write-wins merge policy for sales.
///
/// Unlike products, `created_at` is a mutable field here: a client-supplied
/// sale time wins over the stored one (offline sales carry their true
/// timestamp). When the client omits it, the stored value is preserved, or the
/// server clock is used on first insert.
pub fn merge_sale(
    existing: Option<&sale::Model>,
    incoming: &SaleUpsert,
    owner_id: &str,
    now: DateTime<Utc>,
) -> sale::ActiveModel {
    let created_at = incoming
        .created_at
        .or_else(|| existing.map(|e| e.created_at))
        .unwrap_or(now);

    sale::ActiveModel {
        owner_id: Set(owner_id.to_string()),
        id: Set(incoming.id.clone()),
        product_id: Set(incoming.product_id.clone()),
        quantity: Set(incoming.quantity),
        price: Set(round2(incoming.price)),
        created_at: Set(created_at),
        updated_at: Set(now),
    }
}

/// Reconciles a client-submitted product into the canonical server row and
/// returns the row as stored, so the client can converge its local cache on
/// server-assigned fields (notably `updated_at`).
///
/// # Errors
/// Returns [`Error::Validation`] if `owner_id` or the record id is missing, or
/// if a monetary amount is not finite; [`Error::Storage`] if the store fails
/// (in which case nothing was applied - the write is a single statement).
pub async fn reconcile_product(
    db: &DatabaseConnection,
    owner_id: &str,
    incoming: ProductUpsert,
) -> Result<product::Model> {
    validate_key(owner_id, &incoming.id, "product")?;

    if !incoming.cost.is_finite() || !incoming.price.is_finite() {
        return Err(Error::Validation {
            message: "product cost and price must be finite numbers".to_string(),
        });
    }

    let now = Utc::now();
    let key = (owner_id.to_string(), incoming.id.clone());

    let existing = Product::find_by_id(key.clone()).one(db).await?;
    let row = merge_product(existing.as_ref(), &incoming, owner_id, now);

    // created_at is deliberately absent from the update set: a racing first
    // insert keeps whichever created_at landed first.
    Product::insert(row)
        .on_conflict(
            OnConflict::columns([product::Column::OwnerId, product::Column::Id])
                .update_columns([
                    product::Column::Name,
                    product::Column::Stock,
                    product::Column::Cost,
                    product::Column::Price,
                    product::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    canonical_product(db, key).await
}

/// Reconciles a client-submitted sale into the canonical server row.
///
/// This is the sync-mode path for sales created while the client was offline:
/// it writes the record only and never touches stock (the client syncs its own
/// adjusted product row). For the atomic record-and-decrement path see
/// [`crate::core::sale::record_sale`].
///
/// # Errors
/// Returns [`Error::Validation`] on a missing key, non-positive quantity, or a
/// non-finite price; [`Error::Storage`] if the store fails.
pub async fn reconcile_sale(
    db: &DatabaseConnection,
    owner_id: &str,
    incoming: SaleUpsert,
) -> Result<sale::Model> {
    validate_key(owner_id, &incoming.id, "sale")?;

    if incoming.product_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "sale productId is required".to_string(),
        });
    }
    if incoming.quantity < 1 {
        return Err(Error::Validation {
            message: format!("sale quantity must be a positive integer, got {}", incoming.quantity),
        });
    }
    if !incoming.price.is_finite() {
        return Err(Error::Validation {
            message: "sale price must be a finite number".to_string(),
        });
    }

    let now = Utc::now();
    let key = (owner_id.to_string(), incoming.id.clone());

    let existing = Sale::find_by_id(key.clone()).one(db).await?;
    let row = merge_sale(existing.as_ref(), &incoming, owner_id, now);

    Sale::insert(row)
        .on_conflict(
            OnConflict::columns([sale::Column::OwnerId, sale::Column::Id])
                .update_columns([
                    sale::Column::ProductId,
                    sale::Column::Quantity,
                    sale::Column::Price,
                    sale::Column::CreatedAt,
                    sale::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Sale::find_by_id(key.clone())
        .one(db)
        .await?
        .ok_or_else(|| Error::Storage(DbErr::RecordNotFound(format!("sales {}/{}", key.0, key.1))))
}

fn validate_key(owner_id: &str, record_id: &str, kind: &str) -> Result<()> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "ownerId is required".to_string(),
        });
    }
    if record_id.trim().is_empty() {
        return Err(Error::Validation {
            message: format!("{kind} id is required"),
        });
    }
    Ok(())
}

async fn canonical_product(
    db: &DatabaseConnection,
    key: (String, String),
) -> Result<product::Model> {
    Product::find_by_id(key.clone())
        .one(db)
        .await?
        .ok_or_else(|| {
            Error::Storage(DbErr::RecordNotFound(format!("products {}/{}", key.0, key.1)))
        })
}
