use crate::guard::Guard;
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer running a chain of guards in order before the inner service.
#[derive(Clone)]
pub struct GuardLayer {
    guards: Arc<Vec<Arc<dyn Guard>>>,
}

impl GuardLayer {
    pub fn new(guards: Vec<Arc<dyn Guard>>) -> Self {
        Self {
            guards: Arc::new(guards),
        }
    }

    pub fn single<G: Guard>(guard: G) -> Self {
        Self::new(vec![Arc::new(guard) as Arc<dyn Guard>])
    }
}

impl<S> Layer<S> for GuardLayer {
    type Service = GuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GuardMiddleware {
            inner,
            guards: self.guards.clone(),
        }
    }
}

#[derive(Clone)]
pub struct GuardMiddleware<S> {
    inner: S,
    guards: Arc<Vec<Arc<dyn Guard>>>,
}

impl<S> Service<Request<Body>> for GuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let guards = self.guards.clone();
        // Keep the service that was polled ready, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            for guard in guards.iter() {
                if let Err(rejection) = guard.can_activate(&mut request).await {
                    tracing::warn!(
                        method = %request.method(),
                        uri = %request.uri(),
                        status = %rejection.status(),
                        "request rejected by guard: {rejection}"
                    );
                    return Ok(rejection.into_response());
                }
            }
            inner.call(request).await
        })
    }
}
