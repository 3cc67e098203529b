//! API errors and their JSON representation.
//!
//! Handlers return [`Result`]; an [`AppError`] turns into a status code and a
//! `{"error": "..."}` body. Storage failures are reported to Sentry and
//! answered with a generic message.

use std::sync::Arc;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;
use webshop_core::StorageError;

use crate::models::{CartId, CartIdError};

/// Error returned by storefront handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// A cart could not be created on disk.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Blocking cart work panicked or was cancelled.
    #[error("Cart task failed: {0}")]
    Task(#[from] Arc<JoinError>),

    /// The cart id in the request path is malformed.
    #[error("Invalid cart id: {0}")]
    InvalidCartId(#[from] CartIdError),

    /// Referenced cart, product, coupon or cart item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request is well-formed but asks for something not allowed.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JoinError> for AppError {
    fn from(err: JoinError) -> Self {
        Self::Task(Arc::new(err))
    }
}

impl AppError {
    /// HTTP status this error is answered with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Storage(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidCartId(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the client. Server-side details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Task(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "Cart request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Cart request rejected");
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a cart change as a Sentry breadcrumb.
///
/// If a later request on the same hub fails, the report shows which cart was
/// touched and how.
pub fn cart_breadcrumb(cart_id: &CartId, message: &str, subject: (&str, &str)) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    let (key, value) = subject;
    breadcrumb
        .data
        .insert("cart_id".to_string(), cart_id.as_str().into());
    breadcrumb.data.insert(key.to_string(), value.into());

    sentry::add_breadcrumb(breadcrumb);
}
