use crate::error::{ExtensionError, Result};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

type AnyArc = Arc<dyn Any + Send + Sync>;

/// Casts a registered implementation into an `Arc<Arc<dyn Trait>>` erased as `Any`.
type CasterFn = Arc<dyn Fn(AnyArc) -> Option<AnyArc> + Send + Sync>;

/// Thread-safe registry of the extension's collaborators, keyed by type.
///
/// Concrete services are registered by value and resolved as `Arc<T>`.
/// Trait objects are resolved through a binding from the trait to a
/// registered implementation.
#[derive(Clone, Default)]
pub struct Container {
    services: DashMap<TypeId, AnyArc>,
    trait_mappings: DashMap<TypeId, TypeId>,
    casters: DashMap<TypeId, CasterFn>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: 'static + Send + Sync>(&mut self, instance: T) -> &mut Self {
        self.register_arc(Arc::new(instance))
    }

    /// Register an instance that is already shared elsewhere.
    pub fn register_arc<T: 'static + Send + Sync>(&mut self, instance: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), instance);
        self
    }

    pub fn register_trait<Trait, Impl, F>(&mut self, caster_fn: F) -> &mut Self
    where
        Trait: ?Sized + 'static + Send + Sync,
        Impl: 'static + Send + Sync,
        F: Fn(Arc<Impl>) -> Arc<Trait> + 'static + Send + Sync,
    {
        let trait_id = TypeId::of::<Trait>();
        self.trait_mappings.insert(trait_id, TypeId::of::<Impl>());

        let caster: CasterFn = Arc::new(move |instance: AnyArc| {
            let concrete = instance.downcast::<Impl>().ok()?;
            let trait_obj: Arc<Trait> = caster_fn(concrete);
            Some(Arc::new(trait_obj) as AnyArc)
        });
        self.casters.insert(trait_id, caster);
        self
    }

    pub fn resolve<T: 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(&TypeId::of::<T>())
            .ok_or_else(|| ExtensionError::DependencyNotFound {
                type_name: std::any::type_name::<T>().to_string(),
            })?;
        entry
            .value()
            .clone()
            .downcast::<T>()
            .map_err(|_| ExtensionError::DowncastFailed {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    pub fn resolve_trait<T: ?Sized + 'static + Send + Sync>(&self) -> Result<Arc<T>> {
        let trait_name = std::any::type_name::<T>();
        let trait_id = TypeId::of::<T>();

        let impl_id = *self
            .trait_mappings
            .get(&trait_id)
            .ok_or_else(|| ExtensionError::DependencyNotFound {
                type_name: format!("no binding for trait '{trait_name}'"),
            })?;
        let caster = self
            .casters
            .get(&trait_id)
            .map(|c| c.value().clone())
            .ok_or_else(|| ExtensionError::DependencyNotFound {
                type_name: trait_name.to_string(),
            })?;
        let instance = self
            .services
            .get(&impl_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| ExtensionError::DependencyNotFound {
                type_name: format!("implementation for trait '{trait_name}' not registered"),
            })?;

        caster(instance)
            .and_then(|erased| erased.downcast::<Arc<T>>().ok())
            .map(|wrapper| wrapper.as_ref().clone())
            .ok_or_else(|| ExtensionError::DowncastFailed {
                type_name: trait_name.to_string(),
            })
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        self.services.contains_key(&type_id) || self.trait_mappings.contains_key(&type_id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
