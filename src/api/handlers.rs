//! Route handlers for the sync API.
//!
//! Each handler is a thin adapter: extract, call the core operation with an
//! explicit `owner_id`, wrap the result in the `{ok:true, ...}` envelope.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use crate::api::types::{OwnerQuery, SaleRequest, UpsertProductRequest};
use crate::api::{ApiError, ApiJson};
use crate::core;
use crate::errors::Error;

/// `GET /health` - liveness probe with the server clock.
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "now": Utc::now().to_rfc3339() }))
}

/// `GET /status` - health plus a database round-trip.
pub async fn status(State(db): State<DatabaseConnection>) -> Result<Json<Value>, ApiError> {
    db.ping().await.map_err(Error::from)?;
    Ok(Json(json!({
        "ok": true,
        "database": { "connected": true },
        "server": { "time": Utc::now().to_rfc3339() },
    })))
}

/// `POST /products` - reconcile a client product record and return the
/// canonical stored row.
pub async fn upsert_product(
    State(db): State<DatabaseConnection>,
    ApiJson(req): ApiJson<UpsertProductRequest>,
) -> Result<Json<Value>, ApiError> {
    let product =
        core::reconcile::reconcile_product(&db, &req.owner_id, req.product.into()).await?;
    Ok(Json(json!({ "ok": true, "product": product })))
}

/// `GET /products?ownerId=` - list an owner's products, newest first.
pub async fn list_products(
    State(db): State<DatabaseConnection>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Value>, ApiError> {
    let products = core::product::list_products(&db, &q.owner_id).await?;
    Ok(Json(json!({ "ok": true, "products": products })))
}

/// `DELETE /products/{id}?ownerId=` - direct product management, independent
/// of the sync path. Sales referencing the product become orphans.
pub async fn delete_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Value>, ApiError> {
    core::product::delete_product(&db, &q.owner_id, &id).await?;
    Ok(Json(json!({ "ok": true, "message": "product deleted" })))
}

/// `POST /sales` - either sale path, dispatched on body shape.
///
/// A body carrying a `sale` object is the sync-mode upsert: idempotent,
/// explicitly non-atomic, no stock effect (the client syncs its adjusted
/// product row itself). The flat body is the transactional variant: the sale
/// insert and the stock decrement commit together or not at all.
pub async fn post_sale(
    State(db): State<DatabaseConnection>,
    ApiJson(req): ApiJson<SaleRequest>,
) -> Result<Json<Value>, ApiError> {
    let sale = match req {
        SaleRequest::Upsert(upsert) => {
            core::reconcile::reconcile_sale(&db, &upsert.owner_id, upsert.sale.into()).await?
        }
        SaleRequest::Record(record) => {
            core::sale::record_sale(
                &db,
                &record.owner_id,
                &record.product_id,
                record.quantity,
                record.price,
            )
            .await?
        }
    };
    Ok(Json(json!({ "ok": true, "sale": sale })))
}

/// `GET /sales?ownerId=` - list an owner's sales with product names joined.
pub async fn list_sales(
    State(db): State<DatabaseConnection>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Value>, ApiError> {
    let sales = core::sale::list_sales(&db, &q.owner_id).await?;
    Ok(Json(json!({ "ok": true, "sales": sales })))
}

/// `GET /sync?ownerId=` - full current state for one owner, for client
/// bootstrap and periodic resync.
pub async fn sync(
    State(db): State<DatabaseConnection>,
    Query(q): Query<OwnerQuery>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = core::sync::sync_owner(&db, &q.owner_id).await?;
    Ok(Json(json!({
        "ok": true,
        "products": snapshot.products,
        "sales": snapshot.sales,
    })))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::api::router;
    use crate::test_utils::setup_test_db;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    async fn send(
        app: axum::Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(json_body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let db = setup_test_db().await.unwrap();
        let (status, body) = send(router(db), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert!(body["now"].is_string());
    }

    #[tokio::test]
    async fn test_upsert_product_missing_owner_is_400() {
        let db = setup_test_db().await.unwrap();
        let body = json!({ "product": { "id": "p1", "name": "Tomatoes" } });
        let (status, body) = send(router(db), "POST", "/products", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_sync_missing_owner_is_400() {
        let db = setup_test_db().await.unwrap();
        let (status, body) = send(router(db), "GET", "/sync", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], json!(false));
    }

    #[tokio::test]
    async fn test_malformed_body_keeps_error_shape() {
        let db = setup_test_db().await.unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router(db).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], json!(false));
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_404() {
        let db = setup_test_db().await.unwrap();
        let (status, body) =
            send(router(db), "DELETE", "/products/ghost?ownerId=u1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["ok"], json!(false));
    }

    /// The full client flow: upsert a product, record a transactional sale,
    /// sync back the decremented stock.
    #[tokio::test]
    async fn test_upsert_sell_sync_flow() {
        let db = setup_test_db().await.unwrap();
        let app = router(db);

        let body = json!({
            "ownerId": "u1",
            "product": { "id": "p1", "name": "Tomatoes", "stock": 100, "cost": 1.50, "price": 3.00 }
        });
        let (status, response) = send(app.clone(), "POST", "/products", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["ok"], json!(true));
        assert_eq!(response["product"]["id"], json!("p1"));
        assert_eq!(response["product"]["ownerId"], json!("u1"));
        assert_eq!(response["product"]["stock"], json!(100));
        assert!(response["product"]["createdAt"].is_string());

        let body = json!({ "ownerId": "u1", "productId": "p1", "quantity": 10, "price": 3.00 });
        let (status, response) = send(app.clone(), "POST", "/sales", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["sale"]["productId"], json!("p1"));
        assert_eq!(response["sale"]["quantity"], json!(10));

        let (status, response) = send(app.clone(), "GET", "/sync?ownerId=u1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response["products"][0]["stock"], json!(90));
        assert_eq!(response["sales"][0]["productName"], json!("Tomatoes"));

        // Other owners see none of it
        let (_, response) = send(app, "GET", "/sync?ownerId=u2", None).await;
        assert_eq!(response["products"], json!([]));
        assert_eq!(response["sales"], json!([]));
    }

    #[tokio::test]
    async fn test_sale_upsert_shape_is_idempotent_over_http() {
        let db = setup_test_db().await.unwrap();
        let app = router(db);

        let body = json!({
            "ownerId": "u1",
            "sale": { "id": "s1", "productId": "p1", "qty": 2, "price": 4.00,
                      "createdAt": "2024-06-01T12:00:00Z" }
        });
        let (status, first) = send(app.clone(), "POST", "/sales", Some(body.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, second) = send(app.clone(), "POST", "/sales", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["sale"]["id"], second["sale"]["id"]);
        assert_eq!(first["sale"]["createdAt"], second["sale"]["createdAt"]);

        let (_, listed) = send(app, "GET", "/sales?ownerId=u1", None).await;
        assert_eq!(listed["sales"].as_array().unwrap().len(), 1);
        // Orphan sale: product p1 was never synced, name renders null
        assert_eq!(listed["sales"][0]["productName"], Value::Null);
    }
}
