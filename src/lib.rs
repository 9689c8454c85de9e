//! # extension-name
//!
//! Extension for a host application: it contributes an admin UI page
//! identifier and two greeting endpoints.
//!
//! | Method | Path | Access |
//! |---|---|---|
//! | GET | `/internal/hello` | open, hidden from API documentation |
//! | GET | `/api/hello` | [`guard::SecuredGuard`], documented |
//!
//! Both return `Hello from extension-name!` as `text/plain`. The API
//! handler obtains the text through the host's privileged-execution bridge
//! ([`privileged::PrivilegedExecutor`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use extension_name::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = ExtensionSettings::from_config(&ConfigService::from_env())?;
//!     let addr = settings.bind_address();
//!     let container = build_container(settings, Arc::new(DirectExecutor))?;
//!     let router = create_app(&container)?;
//!
//!     let listener = tokio::net::TcpListener::bind(addr).await?;
//!     axum::serve(listener, router)
//!         .with_graceful_shutdown(shutdown_signal())
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod controller;
pub mod di;
pub mod error;
pub mod greeting;
pub mod guard;
pub mod lifecycle;
pub mod module;
pub mod privileged;
pub mod rest;
pub mod ui;

pub use app::{build_container, create_app};
pub use config::{ConfigService, ExtensionSettings};
pub use error::{ExtensionError, Result};

pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use extension_name::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{build_container, create_app};
    pub use crate::config::{ConfigService, ExtensionSettings};
    pub use crate::controller::{ApiController, InternalController, RestController, RouteDescriptor};
    pub use crate::di::{Container, ContainerBuilder, Injectable};
    pub use crate::error::{ExtensionError, Result};
    pub use crate::greeting::{GREETING, GreetingProvider, StaticGreeting};
    pub use crate::guard::{
        Guard, GuardError, GuardLayer, GuardResult, Principal, SecuredGuard, StaticTokenAuthority,
        TokenAuthority,
    };
    pub use crate::lifecycle::shutdown_signal;
    pub use crate::module::{ExtensionModule, Module};
    pub use crate::privileged::{DirectExecutor, PrivilegedExecutor, PrivilegedExecutorExt};
    pub use crate::rest::{DocumentedRoute, ExtensionRestApplication, RestApplication};
    pub use crate::ui::{ADMIN_PAGE_ID, AdminUiPage, UiHost, UiRegistry};
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
