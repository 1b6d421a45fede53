//! HTTP interface - axum router, extractors, and error mapping.
//!
//! The routing framework is deliberately thin: handlers validate nothing
//! themselves, they hand the owner identifier and payload straight to the
//! core operations and translate the outcome. Every error leaves as
//! `{ok:false, error:<message>}`; storage detail goes to the server log only.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::errors::Error;

/// Request handlers, one per route
pub mod handlers;
/// Request/response body types
pub mod types;

/// Builds the application router over a shared database handle.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route(
            "/products",
            get(handlers::list_products).post(handlers::upsert_product),
        )
        .route("/products/:id", delete(handlers::delete_product))
        .route("/sales", get(handlers::list_sales).post(handlers::post_sale))
        .route("/sync", get(handlers::sync))
        .layer(CorsLayer::permissive())
        .with_state(db)
}

/// An error as the client sees it: a status code plus the uniform
/// `{ok:false, error}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message } => Self::bad_request(message),
            Error::ProductNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            Error::Conflict { message } => Self {
                status: StatusCode::CONFLICT,
                message,
            },
            Error::Storage(e) => {
                // Raw driver messages stay out of responses
                error!("storage failure: {e}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "storage failure".to_string(),
                }
            }
            other => {
                error!("internal error: {other}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "internal server error".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "ok": false, "error": self.message }));
        (self.status, body).into_response()
    }
}

/// JSON extractor whose rejection carries our error shape instead of axum's
/// plain-text default, so malformed bodies also answer
/// `{ok:false, error:...}` with a 400.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(match rejection {
                JsonRejection::JsonDataError(e) => ApiError::bad_request(e.to_string()),
                JsonRejection::JsonSyntaxError(e) => ApiError::bad_request(e.to_string()),
                other => ApiError::bad_request(other.to_string()),
            }),
        }
    }
}
