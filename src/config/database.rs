//! Database configuration module for farmsync.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It uses `SeaORM`'s `Schema::create_table_from_entity` method to generate SQL
//! statements from the entity models, ensuring that the database schema matches the
//! Rust struct definitions without requiring manual SQL.

use crate::entities::{Product, Sale};
use crate::errors::Result;
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database named by `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation
/// from the entity definitions. Safe to call on every startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut product_table: TableCreateStatement = schema.create_table_from_entity(Product);
    let mut sale_table: TableCreateStatement = schema.create_table_from_entity(Sale);

    db.execute(builder.build(product_table.if_not_exists()))
        .await?;
    db.execute(builder.build(sale_table.if_not_exists())).await?;

    Ok(())
}
