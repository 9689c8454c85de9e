//! Wiring helpers shared by the binary and the integration tests.

use crate::config::ExtensionSettings;
use crate::di::{Container, ContainerBuilder};
use crate::error::Result;
use crate::module::{ExtensionModule, Module};
use crate::privileged::PrivilegedExecutor;
use crate::rest::ExtensionRestApplication;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Container holding `settings`, the host's privileged bridge, and
/// everything [`ExtensionModule`] registers.
pub fn build_container<E: PrivilegedExecutor>(
    settings: ExtensionSettings,
    executor: Arc<E>,
) -> Result<Container> {
    let mut container = ContainerBuilder::new()
        .register(settings)
        .register_arc(executor)
        .bind::<dyn PrivilegedExecutor, E, _>(|e| e as Arc<dyn PrivilegedExecutor>)
        .build();

    ExtensionModule::register(&mut container)?;
    Ok(container)
}

/// HTTP surface of the extension with request tracing.
pub fn create_app(container: &Container) -> Result<Router> {
    Ok(ExtensionRestApplication::build(container)?
        .into_router()
        .layer(TraceLayer::new_for_http()))
}
