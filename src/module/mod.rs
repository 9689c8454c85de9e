use crate::config::ExtensionSettings;
use crate::controller::{ApiController, InternalController};
use crate::di::{Container, Injectable};
use crate::error::{ExtensionError, Result};
use crate::greeting::{GREETING, GreetingProvider, StaticGreeting};
use crate::guard::SecuredGuard;
use crate::privileged::PrivilegedExecutor;
use crate::ui::{ADMIN_PAGE_ID, AdminUiPage};
use std::sync::Arc;

/// Registers a group of providers and controllers into a [`Container`].
pub trait Module {
    fn register(container: &mut Container) -> Result<()>;
}

/// Wires the extension.
///
/// The container must already hold [`ExtensionSettings`] and a binding for
/// `dyn PrivilegedExecutor`; the bridge belongs to the host and is never
/// defaulted here. A greeting provider or [`SecuredGuard`] registered
/// beforehand is kept. Otherwise the greeting is [`GREETING`] and the guard is
/// built from the settings. The admin page is always [`ADMIN_PAGE_ID`].
pub struct ExtensionModule;

impl Module for ExtensionModule {
    fn register(container: &mut Container) -> Result<()> {
        let settings = container.resolve::<ExtensionSettings>().map_err(|e| {
            ExtensionError::ModuleRegistrationFailed {
                message: format!("ExtensionModule: {e}"),
            }
        })?;

        if !container.contains::<dyn PrivilegedExecutor>() {
            return Err(ExtensionError::ModuleRegistrationFailed {
                message: "ExtensionModule: no privileged executor bound".to_string(),
            });
        }

        if !container.contains::<dyn GreetingProvider>() {
            container.register(StaticGreeting::default());
            container.register_trait::<dyn GreetingProvider, StaticGreeting, _>(|g| {
                g as Arc<dyn GreetingProvider>
            });
        }

        if !container.contains::<SecuredGuard>() {
            container.register(SecuredGuard::from_settings(&settings));
        }

        let internal = InternalController::inject(container)?;
        container.register(internal);
        let api = ApiController::inject(container)?;
        container.register(api);

        container.register(AdminUiPage::default());

        tracing::debug!(page_id = ADMIN_PAGE_ID, greeting = GREETING, "ExtensionModule registered");
        Ok(())
    }
}
