//! Type-erased plugin handle.
//!
//! A [`PluginHandle`] wraps any `Send + Sync` value behind an `Arc` so the
//! registry can hold heterogeneous plugins in one map. Cloning shares the
//! instance.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased plugin instance.
#[derive(Clone)]
pub struct PluginHandle {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl PluginHandle {
    /// Wrap a value.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an existing `Arc` without re-boxing it.
    ///
    /// `downcast::<T>()` on the result yields a clone of `value`.
    pub fn from_arc<T>(value: Arc<T>) -> Self
    where
        T: Any + Send + Sync,
    {
        Self {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Borrow the instance as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).downcast_ref::<T>()
    }

    /// Get a shared pointer to the instance as `T`.
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// Check whether the instance is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        (*self.inner).is::<T>()
    }

    /// Rust type name of the wrapped value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether two handles point at the same instance.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginHandle")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}
