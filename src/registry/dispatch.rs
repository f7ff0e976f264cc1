use super::FilterRegistry;
use crate::field::{Field, Predicate};
use crate::filter::{ApplyFilter, FilterDescriptor, GridFilter};
use crate::kind::DeclaredType;

/// Entry point for rendering code: resolves and instantiates filters
#[derive(Debug, Clone, Copy)]
pub struct FilterDispatcher<'r> {
    registry: &'r FilterRegistry,
}

impl<'r> FilterDispatcher<'r> {
    pub fn new(registry: &'r FilterRegistry) -> Self {
        Self { registry }
    }

    /// The filter registered for a type and method, ignoring case and
    /// nullability, created for the lowercase method
    pub fn get_filter(&self, declared: &DeclaredType, method: &str) -> Option<Box<dyn GridFilter>> {
        let method = method.to_lowercase();
        let constructor = self.registry.get(declared, &method)?;

        Some(constructor.build(&method))
    }

    /// Resolve and apply a submitted filter to a field
    pub fn filter_for<R>(
        &self,
        field: &Field<R>,
        descriptor: &FilterDescriptor,
    ) -> Option<Predicate<R>> {
        let filter = self.get_filter(field.declared_type(), &descriptor.method)?;
        filter.apply(field, &descriptor.raw_values())
    }

    /// AND together every applicable column filter; inapplicable ones are
    /// skipped. Returns `None` when nothing applies.
    pub fn filter_all<'a, R, I>(&self, columns: I) -> Option<Predicate<R>>
    where
        R: 'a,
        I: IntoIterator<Item = (&'a Field<R>, &'a FilterDescriptor)>,
    {
        columns
            .into_iter()
            .filter_map(|(field, descriptor)| self.filter_for(field, descriptor))
            .reduce(Predicate::and)
    }
}
