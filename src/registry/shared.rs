use super::{FilterConstructor, FilterRegistry};
use crate::field::{Field, Predicate};
use crate::filter::{FilterDescriptor, FilterKind, GridFilter};
use crate::kind::DeclaredType;
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// A registry shared between threads.
///
/// Lookups take the read lock and may run concurrently; registration
/// changes take the write lock.
#[derive(Debug, Clone, Default)]
pub struct SharedFilters {
    inner: Arc<RwLock<FilterRegistry>>,
}

impl SharedFilters {
    pub fn new(registry: FilterRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register(
        &self,
        declared: &DeclaredType,
        method: &str,
        constructor: FilterConstructor,
    ) -> Option<FilterConstructor> {
        self.inner.write().register(declared, method, constructor)
    }

    pub fn register_filter<F: FilterKind>(
        &self,
        declared: &DeclaredType,
        method: &str,
    ) -> Option<FilterConstructor> {
        self.register(declared, method, FilterConstructor::of::<F>())
    }

    pub fn unregister(&self, declared: &DeclaredType, method: &str) -> Option<FilterConstructor> {
        self.inner.write().unregister(declared, method)
    }

    pub fn get_filter(&self, declared: &DeclaredType, method: &str) -> Option<Box<dyn GridFilter>> {
        self.inner.read().dispatcher().get_filter(declared, method)
    }

    pub fn filter_for<R>(
        &self,
        field: &Field<R>,
        descriptor: &FilterDescriptor,
    ) -> Option<Predicate<R>> {
        self.inner.read().dispatcher().filter_for(field, descriptor)
    }

    /// Hold the read lock for several lookups
    pub fn read(&self) -> RwLockReadGuard<'_, FilterRegistry> {
        self.inner.read()
    }
}
