//! Thread-safe wrapper around [`PluginRegistry`].

use crate::plugin::handle::PluginHandle;
use crate::plugin::registry::{PluginInfo, PluginRegistry};
use std::any::Any;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable registry shared between threads.
///
/// Clones refer to the same underlying registry.
#[derive(Clone, Debug, Default)]
pub struct SharedPluginRegistry {
    inner: Arc<RwLock<PluginRegistry>>,
}

impl SharedPluginRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self::from_registry(PluginRegistry::new())
    }

    /// Wrap an existing registry.
    pub fn from_registry(registry: PluginRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    // A panic while holding the lock cannot leave the map half-updated,
    // so poisoned guards are taken as-is.
    fn read(&self) -> RwLockReadGuard<'_, PluginRegistry> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, PluginRegistry> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a plugin, replacing any previous instance.
    pub fn register<T>(&self, name: impl Into<String>, instance: T) -> Option<PluginHandle>
    where
        T: Any + Send + Sync,
    {
        self.write().register(name, instance)
    }

    /// Register a shared instance without re-wrapping it.
    pub fn register_arc<T>(&self, name: impl Into<String>, instance: Arc<T>) -> Option<PluginHandle>
    where
        T: Any + Send + Sync,
    {
        self.write().register_arc(name, instance)
    }

    /// Register an already type-erased handle.
    pub fn register_handle(&self, name: impl Into<String>, handle: PluginHandle) -> Option<PluginHandle> {
        self.write().register_handle(name, handle)
    }

    /// Get plugin by name.
    pub fn get_plugin(&self, name: &str) -> Option<PluginHandle> {
        self.read().get_plugin(name)
    }

    /// Get plugin by name as a concrete type.
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.read().get::<T>(name)
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    /// Get plugin count.
    pub fn plugin_count(&self) -> usize {
        self.read().plugin_count()
    }

    /// List all plugins, sorted by name.
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.read().list_plugins()
    }

    /// Run `f` with read access to the registry.
    ///
    /// The read lock is held while `f` runs, so `f` must not register
    /// through a clone of this same registry.
    pub fn with_registry<R>(&self, f: impl FnOnce(&PluginRegistry) -> R) -> R {
        f(&self.read())
    }
}

impl From<PluginRegistry> for SharedPluginRegistry {
    fn from(registry: PluginRegistry) -> Self {
        Self::from_registry(registry)
    }
}
