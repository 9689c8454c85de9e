//! REST application registry.
//!
//! [`RestApplication`] collects the controllers to activate, nests each under
//! its base path, and wraps guarded ones in their [`GuardLayer`].
//! [`ExtensionRestApplication`] supplies this extension's controller set.

use crate::controller::{ApiController, InternalController, RestController};
use crate::di::Container;
use crate::error::Result;
use crate::guard::{Guard, GuardLayer, SecuredGuard};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;

struct Registration {
    controller: Arc<dyn RestController>,
    guards: Option<GuardLayer>,
}

/// A route as it appears in public API documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentedRoute {
    pub method: &'static str,
    pub path: String,
    pub produces: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub secured: bool,
}

#[derive(Default)]
pub struct RestApplication {
    registrations: Vec<Registration>,
}

impl RestApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a controller with no access control.
    pub fn register(mut self, controller: Arc<dyn RestController>) -> Self {
        self.registrations.push(Registration {
            controller,
            guards: None,
        });
        self
    }

    /// Activate a controller whose routes only run once `guards` admit the
    /// request.
    pub fn register_guarded(mut self, controller: Arc<dyn RestController>, guards: GuardLayer) -> Self {
        self.registrations.push(Registration {
            controller,
            guards: Some(guards),
        });
        self
    }

    pub fn base_paths(&self) -> Vec<&'static str> {
        self.registrations
            .iter()
            .map(|r| r.controller.base_path())
            .collect()
    }

    /// Every non-hidden route, with its full path.
    pub fn documented_routes(&self) -> Vec<DocumentedRoute> {
        self.registrations
            .iter()
            .flat_map(|registration| {
                let base = registration.controller.base_path();
                let secured = registration.guards.is_some();
                registration
                    .controller
                    .routes()
                    .iter()
                    .filter(|route| !route.hidden)
                    .map(move |route| DocumentedRoute {
                        method: route.method,
                        path: format!("{base}{}", route.path),
                        produces: route.produces,
                        summary: route.summary,
                        tag: route.tag,
                        secured,
                    })
            })
            .collect()
    }

    pub fn into_router(self) -> Router {
        self.registrations
            .into_iter()
            .fold(Router::new(), |app, registration| {
                let base = registration.controller.base_path();
                let guarded = registration.guards.is_some();
                let routes = registration.controller.router();
                let routes = match registration.guards {
                    Some(guards) => routes.route_layer(guards),
                    None => routes,
                };
                tracing::debug!(base, guarded, "controller mounted");
                app.nest(base, routes)
            })
    }
}

/// The extension's controller set: the secured [`ApiController`] and the
/// open [`InternalController`].
pub struct ExtensionRestApplication;

impl ExtensionRestApplication {
    /// Expects a container prepared by [`crate::module::ExtensionModule`].
    pub fn build(container: &Container) -> Result<RestApplication> {
        let api = container.resolve::<ApiController>()?;
        let internal = container.resolve::<InternalController>()?;
        let secured = container.resolve::<SecuredGuard>()?;

        Ok(RestApplication::new()
            .register_guarded(api, GuardLayer::new(vec![secured as Arc<dyn Guard>]))
            .register(internal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greeting::{GreetingProvider, StaticGreeting};
    use crate::guard::StaticTokenAuthority;
    use crate::privileged::DirectExecutor;

    fn application() -> RestApplication {
        let greeting: Arc<dyn GreetingProvider> = Arc::new(StaticGreeting::default());
        let secured = SecuredGuard::new(Arc::new(StaticTokenAuthority::new()));
        RestApplication::new()
            .register_guarded(
                Arc::new(ApiController::new(greeting.clone(), Arc::new(DirectExecutor))),
                GuardLayer::single(secured),
            )
            .register(Arc::new(InternalController::new(greeting)))
    }

    #[test]
    fn activates_both_controllers() {
        assert_eq!(application().base_paths(), vec!["/api", "/internal"]);
    }

    #[test]
    fn only_the_api_route_is_documented() {
        let routes = application().documented_routes();
        assert_eq!(
            routes,
            vec![DocumentedRoute {
                method: "GET",
                path: "/api/hello".to_string(),
                produces: "text/plain",
                summary: "Returns a greeting message",
                tag: "Extension Name",
                secured: true,
            }]
        );
    }
}
