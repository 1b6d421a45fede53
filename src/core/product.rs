//! Product management business logic.
//!
//! These are the direct-management operations: parameterized pass-through
//! queries with no sync semantics. Creation and updates of products go through
//! [`crate::core::reconcile::reconcile_product`]; deletion here is independent
//! of reconciliation (sync never hard-deletes).

use crate::{
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves all of an owner's products, newest first.
///
/// # Errors
/// Returns [`Error::Validation`] if `owner_id` is missing, or
/// [`Error::Storage`] if the query fails.
pub async fn list_products(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<product::Model>> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "ownerId is required".to_string(),
        });
    }

    Product::find()
        .filter(product::Column::OwnerId.eq(owner_id))
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes one product by id within the owner's namespace. Sales that
/// reference it are left in place and become orphans (they sync with a null
/// product name).
///
/// # Errors
/// Returns [`Error::Validation`] on a missing field,
/// [`Error::ProductNotFound`] when no matching row exists, or
/// [`Error::Storage`] if the delete fails.
pub async fn delete_product(db: &DatabaseConnection, owner_id: &str, id: &str) -> Result<()> {
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "ownerId is required".to_string(),
        });
    }
    if id.trim().is_empty() {
        return Err(Error::Validation {
            message: "product id is required".to_string(),
        });
    }

    let result = Product::delete_by_id((owner_id.to_string(), id.to_string()))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: id.to_string() });
    }
    Ok(())
}
