//! Shared test utilities for farmsync.
//!
//! This module provides common helper functions for setting up test databases
//! and seeding records with sensible defaults.

use crate::{
    config,
    core::reconcile::{self, ProductUpsert},
    entities::{Product, product},
    errors::Result,
};
use sea_orm::{DatabaseConnection, EntityTrait};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = config::database::create_connection("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// Seeds a product through the reconciliation path (the only way products are
/// created in production), with cost defaulted to half the price.
pub async fn seed_product(
    db: &DatabaseConnection,
    owner_id: &str,
    id: &str,
    name: &str,
    stock: i64,
    price: f64,
) -> Result<product::Model> {
    reconcile::reconcile_product(
        db,
        owner_id,
        ProductUpsert {
            id: id.to_string(),
            name: name.to_string(),
            stock,
            cost: price / 2.0,
            price,
        },
    )
    .await
}

/// Fetches one product by its `(owner_id, id)` merge key.
pub async fn find_product(
    db: &DatabaseConnection,
    owner_id: &str,
    id: &str,
) -> Result<Option<product::Model>> {
    Product::find_by_id((owner_id.to_string(), id.to_string()))
        .one(db)
        .await
        .map_err(Into::into)
}
