use crate::controller::{GREETING_TAG, RestController, RouteDescriptor, TEXT_PLAIN};
use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::greeting::GreetingProvider;
use crate::privileged::{PrivilegedExecutor, PrivilegedExecutorExt};
use axum::{Router, routing::get};
use std::sync::Arc;

const ROUTES: &[RouteDescriptor] = &[RouteDescriptor {
    method: "GET",
    path: "/hello",
    produces: TEXT_PLAIN,
    summary: "Returns a greeting message",
    tag: GREETING_TAG,
    hidden: false,
}];

/// Public greeting under `/api`, produced through the privileged bridge.
///
/// Access control is applied at registration; see
/// [`crate::rest::RestApplication::register_guarded`].
pub struct ApiController {
    greeting: Arc<dyn GreetingProvider>,
    executor: Arc<dyn PrivilegedExecutor>,
}

impl ApiController {
    pub const BASE_PATH: &'static str = "/api";

    pub fn new(greeting: Arc<dyn GreetingProvider>, executor: Arc<dyn PrivilegedExecutor>) -> Self {
        Self { greeting, executor }
    }

    /// Same text as the internal endpoint. Any failure raised by the bridge
    /// or inside the privileged call is returned as is.
    pub fn hello(&self) -> Result<String> {
        let greeting = &self.greeting;
        self.executor.call_privileged(|| Ok(greeting.greeting()))
    }
}

impl Injectable for ApiController {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self::new(
            container.resolve_trait::<dyn GreetingProvider>()?,
            container.resolve_trait::<dyn PrivilegedExecutor>()?,
        ))
    }
}

impl RestController for ApiController {
    fn base_path(&self) -> &'static str {
        Self::BASE_PATH
    }

    fn routes(&self) -> &'static [RouteDescriptor] {
        ROUTES
    }

    fn router(self: Arc<Self>) -> Router {
        Router::new().route(
            "/hello",
            get(move || {
                let controller = self.clone();
                async move {
                    tracing::debug!("GET /api/hello");
                    controller.hello()
                }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::InternalController;
    use crate::error::ExtensionError;
    use crate::greeting::StaticGreeting;
    use crate::privileged::testing::CountingExecutor;
    use crate::privileged::{ErasedOutput, PrivilegedOperation};

    struct Refusing;

    impl PrivilegedExecutor for Refusing {
        fn execute(&self, _operation: PrivilegedOperation<'_>) -> Result<ErasedOutput> {
            Err(ExtensionError::PrivilegedExecution("no system session".into()))
        }
    }

    #[test]
    fn hello_matches_the_internal_greeting() {
        let greeting: Arc<dyn GreetingProvider> = Arc::new(StaticGreeting::default());
        let internal = InternalController::new(greeting.clone());
        let api = ApiController::new(greeting, Arc::new(CountingExecutor::default()));

        assert_eq!(api.hello().unwrap(), internal.hello());
    }

    #[test]
    fn hello_runs_through_the_executor() {
        let executor = Arc::new(CountingExecutor::default());
        let api = ApiController::new(Arc::new(StaticGreeting::default()), executor.clone());

        api.hello().unwrap();
        api.hello().unwrap();
        assert_eq!(executor.calls(), 2);
    }

    #[test]
    fn executor_failure_is_propagated() {
        let api = ApiController::new(Arc::new(StaticGreeting::default()), Arc::new(Refusing));
        let err = api.hello().unwrap_err();
        assert!(matches!(err, ExtensionError::PrivilegedExecution(ref msg) if msg == "no system session"));
    }

    #[test]
    fn route_is_documented() {
        let api = ApiController::new(Arc::new(StaticGreeting::default()), Arc::new(Refusing));
        assert!(api.routes().iter().all(|r| !r.hidden));
    }
}
