//! Request and response types for the HTTP surface.
//!
//! Bodies are camelCase JSON. Missing string fields deserialize to empty
//! strings and are rejected by core validation, so clients always get the
//! uniform `{ok:false, error}` shape with a 400 rather than a serde error.
//! Client timestamps are accepted as either ISO-8601 strings or epoch
//! milliseconds, the two formats historical clients send.

use crate::core::reconcile::{ProductUpsert, SaleUpsert};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, de};

/// `POST /products` body: a client record to reconcile into server state.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductRequest {
    /// Owning account
    #[serde(default)]
    pub owner_id: String,
    /// The product record as the client last saw it
    pub product: ProductPayload,
}

/// The product portion of an upsert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Client-generated merge key
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Quantity on hand (whole units; fractional values are rejected by the
    /// integer type)
    #[serde(default)]
    pub stock: i64,
    /// Unit cost in dollars
    #[serde(default)]
    pub cost: f64,
    /// Unit price in dollars
    #[serde(default)]
    pub price: f64,
}

impl From<ProductPayload> for ProductUpsert {
    fn from(p: ProductPayload) -> Self {
        Self {
            id: p.id,
            name: p.name,
            stock: p.stock,
            cost: p.cost,
            price: p.price,
        }
    }
}

/// `POST /sales` body, dispatched on shape: a `sale` object means the
/// non-atomic sync upsert (no stock effect); the flat form means the
/// transactional record-and-decrement path.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SaleRequest {
    /// Sync-mode reconciliation of a client-created sale record
    Upsert(UpsertSaleRequest),
    /// Transactional sale recording with atomic stock decrement
    Record(RecordSaleRequest),
}

/// The sync-mode sale upsert body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSaleRequest {
    /// Owning account
    #[serde(default)]
    pub owner_id: String,
    /// The sale record as the client last saw it
    pub sale: SalePayload,
}

/// The sale portion of an upsert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    /// Client-generated merge key
    #[serde(default)]
    pub id: String,
    /// Product the sale drew stock from
    #[serde(default)]
    pub product_id: String,
    /// Units sold
    #[serde(default, alias = "quantity")]
    pub qty: i64,
    /// Unit price charged at time of sale
    #[serde(default)]
    pub price: f64,
    /// True sale time as recorded by the client, ISO-8601 or epoch millis
    #[serde(default)]
    pub created_at: Option<ClientTimestamp>,
}

impl From<SalePayload> for SaleUpsert {
    fn from(s: SalePayload) -> Self {
        Self {
            id: s.id,
            product_id: s.product_id,
            quantity: s.qty,
            price: s.price,
            created_at: s.created_at.map(|t| t.0),
        }
    }
}

/// The transactional sale body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSaleRequest {
    /// Owning account
    #[serde(default)]
    pub owner_id: String,
    /// Product to draw stock from
    pub product_id: String,
    /// Units sold
    pub quantity: i64,
    /// Unit price charged
    pub price: f64,
}

/// Owner scoping for the read endpoints (`?ownerId=...`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    /// Owning account
    #[serde(default)]
    pub owner_id: String,
}

/// A timestamp as clients send it: an ISO-8601 string or epoch milliseconds.
/// Always emitted back as ISO-8601 UTC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientTimestamp(pub DateTime<Utc>);

impl<'de> Deserialize<'de> for ClientTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millis(i64),
            Iso(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => Utc
                .timestamp_millis_opt(ms)
                .single()
                .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}")))?,
            Raw::Iso(s) => DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| de::Error::custom(format!("invalid ISO-8601 timestamp: {e}")))?,
        };
        Ok(Self(parsed))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_client_timestamp_accepts_both_formats() {
        let from_iso: ClientTimestamp =
            serde_json::from_str("\"2024-06-01T12:00:00Z\"").unwrap();
        let from_millis: ClientTimestamp = serde_json::from_str("1717243200000").unwrap();
        assert_eq!(from_iso, from_millis);

        assert!(serde_json::from_str::<ClientTimestamp>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_sale_request_dispatches_on_shape() {
        let upsert: SaleRequest = serde_json::from_str(
            r#"{"ownerId":"u1","sale":{"id":"s1","productId":"p1","qty":2,"price":3.0}}"#,
        )
        .unwrap();
        assert!(matches!(upsert, SaleRequest::Upsert(_)));

        let record: SaleRequest = serde_json::from_str(
            r#"{"ownerId":"u1","productId":"p1","quantity":2,"price":3.0}"#,
        )
        .unwrap();
        assert!(matches!(record, SaleRequest::Record(_)));
    }

    #[test]
    fn test_sale_payload_accepts_quantity_alias() {
        let payload: SalePayload = serde_json::from_str(
            r#"{"id":"s1","productId":"p1","quantity":4,"price":1.0}"#,
        )
        .unwrap();
        assert_eq!(payload.qty, 4);
    }
}
