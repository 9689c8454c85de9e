use crate::di::Container;
use std::sync::Arc;

/// Fluent setup for a [`Container`].
///
/// ```
/// use extension_name::di::ContainerBuilder;
/// use extension_name::privileged::{DirectExecutor, PrivilegedExecutor};
/// use std::sync::Arc;
///
/// let container = ContainerBuilder::new()
///     .register(DirectExecutor)
///     .bind::<dyn PrivilegedExecutor, DirectExecutor, _>(|e| e as Arc<dyn PrivilegedExecutor>)
///     .build();
/// assert!(container.resolve_trait::<dyn PrivilegedExecutor>().is_ok());
/// ```
#[derive(Default)]
pub struct ContainerBuilder {
    container: Container,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(mut self, instance: T) -> Self {
        self.container.register(instance);
        self
    }

    pub fn register_arc<T: 'static + Send + Sync>(mut self, instance: Arc<T>) -> Self {
        self.container.register_arc(instance);
        self
    }

    /// Bind a trait to a registered concrete implementation.
    pub fn bind<Trait, Impl, F>(mut self, caster: F) -> Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        self.container.register_trait::<Trait, Impl, F>(caster);
        self
    }

    pub fn build(self) -> Container {
        self.container
    }
}
