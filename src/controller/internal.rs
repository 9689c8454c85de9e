use crate::controller::{GREETING_TAG, RestController, RouteDescriptor, TEXT_PLAIN};
use crate::di::{Container, Injectable};
use crate::error::Result;
use crate::greeting::GreetingProvider;
use axum::{Router, routing::get};
use std::sync::Arc;

const ROUTES: &[RouteDescriptor] = &[RouteDescriptor {
    method: "GET",
    path: "/hello",
    produces: TEXT_PLAIN,
    summary: "Returns a greeting message",
    tag: GREETING_TAG,
    hidden: true,
}];

/// Unauthenticated greeting endpoint under `/internal`.
pub struct InternalController {
    greeting: Arc<dyn GreetingProvider>,
}

impl InternalController {
    pub const BASE_PATH: &'static str = "/internal";

    pub fn new(greeting: Arc<dyn GreetingProvider>) -> Self {
        Self { greeting }
    }

    pub fn hello(&self) -> String {
        self.greeting.greeting()
    }
}

impl Injectable for InternalController {
    fn inject(container: &Container) -> Result<Self> {
        Ok(Self::new(container.resolve_trait::<dyn GreetingProvider>()?))
    }
}

impl RestController for InternalController {
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
                    tracing::debug!("GET /internal/hello");
                    controller.hello()
                }
            }),
        )
    }
}
