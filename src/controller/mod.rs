//! REST controllers.
//!
//! Each controller owns a base path, describes its routes, and builds an
//! axum router for them. Authorization is not a controller concern: guards
//! are attached when the controller is registered with
//! [`crate::rest::RestApplication`].

use axum::Router;
use serde::Serialize;
use std::sync::Arc;

mod api;
mod internal;

pub use api::ApiController;
pub use internal::InternalController;

pub const TEXT_PLAIN: &str = "text/plain";
pub const GREETING_TAG: &str = "Extension Name";

/// Static description of one route, used for API listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub method: &'static str,
    pub path: &'static str,
    pub produces: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    /// Hidden routes are served but left out of public API documentation.
    pub hidden: bool,
}

pub trait RestController: Send + Sync + 'static {
    fn base_path(&self) -> &'static str;

    fn routes(&self) -> &'static [RouteDescriptor];

    /// Router relative to [`RestController::base_path`].
    fn router(self: Arc<Self>) -> Router;
}
