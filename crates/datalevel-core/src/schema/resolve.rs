use super::{app::Model, Schema};

use std::sync::Arc;

/// Model lookup used by the engine.
///
/// [`Schema`] is the usual implementation. Callers can supply their own to
/// route lookups through another registry (per tenant, per test, ...). Model
/// IDs handed out by one resolver must be unique within it, since the engine
/// memoizes on them.
pub trait Resolve {
    /// Look up a model by name.
    fn resolve(&self, name: &str) -> Option<&Model>;
}

impl Resolve for Schema {
    fn resolve(&self, name: &str) -> Option<&Model> {
        self.model_by_name(name)
    }
}

impl<T: Resolve + ?Sized> Resolve for &T {
    fn resolve(&self, name: &str) -> Option<&Model> {
        (**self).resolve(name)
    }
}

impl<T: Resolve + ?Sized> Resolve for Arc<T> {
    fn resolve(&self, name: &str) -> Option<&Model> {
        (**self).resolve(name)
    }
}

impl<T: Resolve + ?Sized> Resolve for Box<T> {
    fn resolve(&self, name: &str) -> Option<&Model> {
        (**self).resolve(name)
    }
}
