//! Mapping from (declared type, method) to the filter responsible
//!
//! Keys are normalized on the way in and on lookup: the nullable form of a
//! type shares its entry with the required form, and method names are
//! lowercased. The last registration for a key wins.

mod builtin;
mod dispatch;
mod shared;

pub use builtin::BuiltinFilter;
pub use dispatch::FilterDispatcher;
pub use shared::SharedFilters;

use crate::filter::{FilterKind, GridFilter};
use crate::kind::{DeclaredType, TypeKey};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Creates filter instances for a registered method
#[derive(Clone, Copy)]
pub struct FilterConstructor {
    name: fn() -> Cow<'static, str>,
    build: fn(&str) -> Box<dyn GridFilter>,
}

fn construct<F: FilterKind>(method: &str) -> Box<dyn GridFilter> {
    Box::new(F::with_method(method))
}

impl FilterConstructor {
    pub fn of<F: FilterKind>() -> Self {
        Self {
            name: F::kind_name,
            build: construct::<F>,
        }
    }

    pub fn name(&self) -> Cow<'static, str> {
        (self.name)()
    }

    pub fn build(&self, method: &str) -> Box<dyn GridFilter> {
        (self.build)(method)
    }
}

impl fmt::Debug for FilterConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilterConstructor")
            .field(&self.name())
            .finish()
    }
}

/// One registration, as listed by [`FilterRegistry::entries`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    #[serde(rename = "type")]
    pub type_key: String,
    pub method: String,
    pub filter: String,
}

#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: HashMap<TypeKey, HashMap<String, FilterConstructor>>,
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterRegistry {
    /// A registry holding the built-in filters
    pub fn new() -> Self {
        let mut registry = Self::empty();
        builtin::register_defaults(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Store a constructor, replacing any previous one for the same key
    pub fn register(
        &mut self,
        declared: &DeclaredType,
        method: &str,
        constructor: FilterConstructor,
    ) -> Option<FilterConstructor> {
        let method = method.to_lowercase();
        let previous = self
            .filters
            .entry(declared.canonical().clone())
            .or_default()
            .insert(method.clone(), constructor);

        match &previous {
            Some(old) => debug!(
                declared = %declared.canonical(),
                method = %method,
                filter = %constructor.name(),
                replaced = %old.name(),
                "Overriding filter registration"
            ),
            None => debug!(
                declared = %declared.canonical(),
                method = %method,
                filter = %constructor.name(),
                "Registered filter"
            ),
        }

        previous
    }

    pub fn register_filter<F: FilterKind>(
        &mut self,
        declared: &DeclaredType,
        method: &str,
    ) -> Option<FilterConstructor> {
        self.register(declared, method, FilterConstructor::of::<F>())
    }

    /// Remove a registration; removing a missing one does nothing
    pub fn unregister(
        &mut self,
        declared: &DeclaredType,
        method: &str,
    ) -> Option<FilterConstructor> {
        let key = declared.canonical();
        let methods = self.filters.get_mut(key)?;
        let removed = methods.remove(&method.to_lowercase());

        if methods.is_empty() {
            self.filters.remove(key);
        }
        if removed.is_some() {
            debug!(declared = %key, method, "Unregistered filter");
        }

        removed
    }

    pub fn get(&self, declared: &DeclaredType, method: &str) -> Option<&FilterConstructor> {
        let found = self
            .filters
            .get(declared.canonical())
            .and_then(|methods| methods.get(&method.to_lowercase()));

        if found.is_none() {
            trace!(declared = %declared, method, "No filter registered");
        }

        found
    }

    pub fn contains(&self, declared: &DeclaredType, method: &str) -> bool {
        self.get(declared, method).is_some()
    }

    /// Registered methods for a type, sorted
    pub fn methods(&self, declared: &DeclaredType) -> Vec<&str> {
        let mut methods: Vec<&str> = self
            .filters
            .get(declared.canonical())
            .map(|methods| methods.keys().map(String::as_str).collect())
            .unwrap_or_default();
        methods.sort_unstable();
        methods
    }

    pub fn len(&self) -> usize {
        self.filters.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// All registrations sorted by type then method
    pub fn entries(&self) -> Vec<RegistryEntry> {
        let mut keys: Vec<&TypeKey> = self.filters.keys().collect();
        keys.sort();

        keys.into_iter()
            .flat_map(|key| {
                let methods = &self.filters[key];
                let mut names: Vec<&String> = methods.keys().collect();
                names.sort();
                names.into_iter().map(move |method| RegistryEntry {
                    type_key: key.to_string(),
                    method: method.clone(),
                    filter: methods[method].name().into_owned(),
                })
            })
            .collect()
    }

    pub fn dispatcher(&self) -> FilterDispatcher<'_> {
        FilterDispatcher::new(self)
    }
}
