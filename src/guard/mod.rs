//! Route guards.
//!
//! A guard decides whether a request may reach its handler. Guards are
//! attached explicitly when routes are registered (see
//! [`crate::rest::RestApplication::register_guarded`]) through
//! [`GuardLayer`]; a rejected request is answered by the layer and the
//! handler never runs.

use crate::error::ErrorBody;
use async_trait::async_trait;
use axum::{
    Json,
    body::Body,
    http::{HeaderValue, Request, StatusCode, header},
    response::{IntoResponse, Response},
};

mod layer;
mod secured;

pub use layer::{GuardLayer, GuardMiddleware};
pub use secured::{Principal, SecuredGuard, StaticTokenAuthority, TokenAuthority};

/// Ok(()) lets the request through, Err rejects it.
pub type GuardResult = Result<(), GuardError>;

#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl GuardError {
    pub fn status(&self) -> StatusCode {
        match self {
            GuardError::Forbidden(_) => StatusCode::FORBIDDEN,
            GuardError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(ErrorBody::new(status, self.to_string()))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Implement this to protect routes.
///
/// Guards may annotate the request (for example with the authenticated
/// [`Principal`]) before it continues to the handler.
#[async_trait]
pub trait Guard: Send + Sync + 'static {
    async fn can_activate(&self, request: &mut Request<Body>) -> GuardResult;
}
