//! Sale recording business logic.
//!
//! [`record_sale`] is the transactional path: one database transaction inserts
//! the sale row and decrements the product's stock, so neither effect is ever
//! visible without the other. The stock decrement is expressed as a relative
//! update (`stock = stock - quantity`) at the store level rather than a
//! read-modify-write, so two concurrent sales against the same product both
//! apply without losing an update.
//!
//! There is deliberately no `stock >= quantity` check: concurrent sales
//! against low stock can drive it negative, and inventory correction happens
//! out of band. This is a preserved business rule, not an oversight.

use crate::{
    core::round2,
    entities::{Product, Sale, product, sale},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// A sale joined with the name of the product it references, as presented to
/// clients. The name is `None` for orphaned sales whose product was deleted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    /// The stored sale row
    #[serde(flatten)]
    pub sale: sale::Model,
    /// Name of the referenced product, if it still exists
    pub product_name: Option<String>,
}

/// Records a sale and decrements the matching product's stock, atomically.
///
/// The sale id is server-assigned (UUID v4) and `created_at`/`updated_at` are
/// stamped with the server clock. On any failure after the transaction opens,
/// both effects roll back; subsequent reads never observe a sale without its
/// stock decrement or vice versa.
///
/// # Errors
/// Returns [`Error::Validation`] before any write when `owner_id` or
/// `product_id` is missing, `quantity` is not positive, or `price` is negative
/// or non-finite; [`Error::Storage`] when the store fails (transaction rolled
/// back).
pub async fn record_sale(
    db: &DatabaseConnection,
    owner_id: &str,
    product_id: &str,
    quantity: i64,
    price: f64,
) -> Result<sale::Model> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "ownerId is required".to_string(),
        });
    }
    if product_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "productId is required".to_string(),
        });
    }
    if quantity < 1 {
        return Err(Error::Validation {
            message: format!("quantity must be a positive integer, got {quantity}"),
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::Validation {
            message: format!("price must be a non-negative amount, got {price}"),
        });
    }

    let now = Utc::now();

    // Both writes happen inside one transaction; dropping it without commit
    // (any `?` below) rolls both back.
    let txn = db.begin().await?;

    let sale_row = sale::ActiveModel {
        owner_id: Set(owner_id.to_string()),
        id: Set(Uuid::new_v4().to_string()),
        product_id: Set(product_id.to_string()),
        quantity: Set(quantity),
        price: Set(round2(price)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let inserted = sale_row.insert(&txn).await?;

    decrement_stock(&txn, owner_id, product_id, quantity, now).await?;

    txn.commit().await?;

    Ok(inserted)
}

/// Atomically applies `stock = stock - quantity` to one product, refreshing
/// its `updated_at`. A missing product updates zero rows and is not an error:
/// the sale still records, and renders as an orphan.
pub async fn decrement_stock<C>(
    db: &C,
    owner_id: &str,
    product_id: &str,
    quantity: i64,
    now: DateTime<Utc>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Product::update_many()
        .col_expr(
            product::Column::Stock,
            Expr::col(product::Column::Stock).sub(quantity),
        )
        .col_expr(product::Column::UpdatedAt, Expr::value(now))
        .filter(product::Column::OwnerId.eq(owner_id))
        .filter(product::Column::Id.eq(product_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Retrieves all of an owner's sales, newest first, each carrying the name of
/// its product (or `None` for orphans).
///
/// # Errors
/// Returns [`Error::Validation`] if `owner_id` is missing, or
/// [`Error::Storage`] if either read fails.
pub async fn list_sales(db: &DatabaseConnection, owner_id: &str) -> Result<Vec<SaleRecord>> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "ownerId is required".to_string(),
        });
    }

    let sales = Sale::find()
        .filter(sale::Column::OwnerId.eq(owner_id))
        .order_by_desc(sale::Column::CreatedAt)
        .all(db)
        .await?;
    let products = Product::find()
        .filter(product::Column::OwnerId.eq(owner_id))
        .all(db)
        .await?;

    Ok(with_product_names(sales, &products))
}

/// Joins sales with product names in memory. Sales referencing a product that
/// no longer exists keep a `None` name rather than failing.
pub fn with_product_names(
    sales: Vec<sale::Model>,
    products: &[product::Model],
) -> Vec<SaleRecord> {
    let names: HashMap<&str, &str> = products
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    sales
        .into_iter()
        .map(|sale| {
            let product_name = names.get(sale.product_id.as_str()).map(|n| (*n).to_string());
            SaleRecord { sale, product_name }
        })
        .collect()
}
