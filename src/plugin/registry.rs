//! Plugin registry mapping names to plugin instances.
//!
//! Registration is total: a second instance under an existing name replaces
//! the first. Lookups of unknown names return `None`. Entries are never
//! removed.

use crate::config::RegistryConfig;
use crate::core::{now, Error, Result, Timestamp};
use crate::plugin::handle::PluginHandle;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Snapshot of a registered plugin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Registered name
    pub name: String,
    /// Rust type name of the instance
    pub type_name: String,
    /// Registration time
    pub registered_at: Timestamp,
}

/// Registered plugin entry.
#[derive(Clone, Debug)]
pub struct RegisteredPlugin {
    /// Plugin instance
    pub handle: PluginHandle,
    /// Registration time
    pub registered_at: Timestamp,
}

/// Plugin registry.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Registered plugins
    plugins: HashMap<String, RegisteredPlugin>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Create an empty registry sized from configuration.
    pub fn with_config(config: &RegistryConfig) -> Self {
        Self {
            plugins: HashMap::with_capacity(config.initial_capacity),
        }
    }

    /// Register a plugin under `name`, replacing any previous instance.
    ///
    /// Returns the replaced handle, if there was one.
    ///
    /// The value is wrapped in a new `Arc`. Passing an `Arc<V>` here stores
    /// the `Arc` itself, so `get::<V>` will not find it; use
    /// [`register_arc`](Self::register_arc) for values that are already shared.
    pub fn register<T>(&mut self, name: impl Into<String>, instance: T) -> Option<PluginHandle>
    where
        T: Any + Send + Sync,
    {
        self.register_handle(name, PluginHandle::new(instance))
    }

    /// Register a shared instance without re-wrapping it.
    pub fn register_arc<T>(&mut self, name: impl Into<String>, instance: Arc<T>) -> Option<PluginHandle>
    where
        T: Any + Send + Sync,
    {
        self.register_handle(name, PluginHandle::from_arc(instance))
    }

    /// Register an already type-erased handle.
    pub fn register_handle(
        &mut self,
        name: impl Into<String>,
        handle: PluginHandle,
    ) -> Option<PluginHandle> {
        let name = name.into();
        let type_name = handle.type_name();

        let previous = self.plugins.insert(
            name.clone(),
            RegisteredPlugin {
                handle,
                registered_at: now(),
            },
        );

        match &previous {
            Some(old) => tracing::debug!(
                plugin = %name,
                type_name,
                replaced_type = old.handle.type_name(),
                "Replaced plugin"
            ),
            None => tracing::debug!(plugin = %name, type_name, "Registered plugin"),
        }

        previous.map(|entry| entry.handle)
    }

    /// Register a plugin, refusing to replace an existing one.
    pub fn try_register<T>(&mut self, name: impl Into<String>, instance: T) -> Result<()>
    where
        T: Any + Send + Sync,
    {
        let name = name.into();
        if self.plugins.contains_key(&name) {
            return Err(Error::AlreadyRegistered(name));
        }
        self.register(name, instance);
        Ok(())
    }

    /// Get plugin by name.
    pub fn get_plugin(&self, name: &str) -> Option<PluginHandle> {
        let found = self.plugins.get(name).map(|entry| entry.handle.clone());
        if found.is_none() {
            tracing::trace!(plugin = name, "Plugin lookup missed");
        }
        found
    }

    /// Get plugin by name as a concrete type.
    ///
    /// Returns `None` if the name is unknown or holds a different type.
    pub fn get<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.plugins.get(name)?.handle.downcast::<T>()
    }

    /// Get plugin by name as a concrete type, treating absence as an error.
    pub fn require<T>(&self, name: &str) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let entry = self
            .plugins
            .get(name)
            .ok_or_else(|| Error::PluginNotFound(name.to_string()))?;

        entry
            .handle
            .downcast::<T>()
            .ok_or_else(|| Error::PluginTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
                actual: entry.handle.type_name(),
            })
    }

    /// Get the full entry for a plugin.
    pub fn entry(&self, name: &str) -> Option<&RegisteredPlugin> {
        self.plugins.get(name)
    }

    /// Check if a plugin is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// List all plugins, sorted by name.
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = self
            .plugins
            .iter()
            .map(|(name, entry)| PluginInfo {
                name: name.clone(),
                type_name: entry.handle.type_name().to_string(),
                registered_at: entry.registered_at,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// Get plugin count.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Audio {
        volume: u8,
    }

    #[derive(Debug, PartialEq)]
    struct Physics {
        gravity: i32,
    }

    #[test]
    fn test_registry_creation() {
        let registry = PluginRegistry::new();
        assert_eq!(registry.plugin_count(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_fresh_registry_lookup_is_absent() {
        let registry = PluginRegistry::default();
        assert!(registry.get_plugin("audio").is_none());
        assert!(registry.get_plugin("").is_none());
        assert!(registry.get::<Audio>("audio").is_none());
    }

    #[test]
    fn test_register_then_get() {
        let mut registry = PluginRegistry::new();
        let audio = Arc::new(Audio { volume: 80 });
        registry.register_arc("audio", Arc::clone(&audio));

        let handle = registry.get_plugin("audio").unwrap();
        assert!(Arc::ptr_eq(&handle.downcast::<Audio>().unwrap(), &audio));
        assert_eq!(registry.get::<Audio>("audio").unwrap().volume, 80);
    }

    #[test]
    fn test_register_does_not_affect_other_names() {
        let mut registry = PluginRegistry::new();
        registry.register("audio", Audio { volume: 1 });
        registry.register("physics", Physics { gravity: -10 });
        registry.register("audio", Audio { volume: 2 });

        assert_eq!(registry.get::<Physics>("physics").unwrap().gravity, -10);
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = PluginRegistry::new();
        assert!(registry.register("audio", Audio { volume: 1 }).is_none());

        let replaced = registry.register("audio", Audio { volume: 2 }).unwrap();
        assert_eq!(replaced.downcast_ref::<Audio>(), Some(&Audio { volume: 1 }));

        assert_eq!(registry.get::<Audio>("audio").unwrap().volume, 2);
        assert_eq!(registry.plugin_count(), 1);
    }

    #[test]
    fn test_overwrite_with_different_type() {
        let mut registry = PluginRegistry::new();
        registry.register("slot", Audio { volume: 1 });
        registry.register("slot", Physics { gravity: 3 });

        assert!(registry.get::<Audio>("slot").is_none());
        assert_eq!(registry.get::<Physics>("slot").unwrap().gravity, 3);
    }

    #[test]
    fn test_register_same_instance_twice() {
        let mut registry = PluginRegistry::new();
        let audio = Arc::new(Audio { volume: 5 });
        registry.register_arc("audio", Arc::clone(&audio));
        registry.register_arc("audio", Arc::clone(&audio));

        assert_eq!(registry.plugin_count(), 1);
        assert!(Arc::ptr_eq(&registry.get::<Audio>("audio").unwrap(), &audio));
    }

    #[test]
    fn test_register_wraps_arc_values() {
        let mut registry = PluginRegistry::new();
        registry.register("wrapped", Arc::new(7u8));
        registry.register_arc("shared", Arc::new(7u8));

        assert!(registry.get::<u8>("wrapped").is_none());
        assert_eq!(registry.get::<Arc<u8>>("wrapped").map(|v| **v), Some(7));
        assert_eq!(registry.get::<u8>("shared").map(|v| *v), Some(7));
    }

    #[test]
    fn test_register_handle_shares_instance() {
        let mut first = PluginRegistry::new();
        first.register("audio", Audio { volume: 9 });

        let mut second = PluginRegistry::new();
        let handle = first.get_plugin("audio").unwrap();
        second.register_handle("sound", handle.clone());

        let shared = second.get_plugin("sound").unwrap();
        assert!(PluginHandle::ptr_eq(&handle, &shared));
    }

    #[test]
    fn test_try_register_rejects_duplicates() {
        let mut registry = PluginRegistry::new();
        registry.try_register("audio", Audio { volume: 1 }).unwrap();

        let result = registry.try_register("audio", Audio { volume: 2 });
        assert!(matches!(result, Err(Error::AlreadyRegistered(name)) if name == "audio"));
        assert_eq!(registry.get::<Audio>("audio").unwrap().volume, 1);
    }

    #[test]
    fn test_require() {
        let mut registry = PluginRegistry::new();
        registry.register("audio", Audio { volume: 3 });

        assert_eq!(registry.require::<Audio>("audio").unwrap().volume, 3);
        assert!(matches!(
            registry.require::<Audio>("renderer"),
            Err(Error::PluginNotFound(_))
        ));
        assert!(matches!(
            registry.require::<Physics>("audio"),
            Err(Error::PluginTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_list_plugins_sorted() {
        let mut registry = PluginRegistry::new();
        registry.register("physics", Physics { gravity: 0 });
        registry.register("audio", Audio { volume: 0 });

        assert_eq!(registry.names(), vec!["audio", "physics"]);

        let plugins = registry.list_plugins();
        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins[0].name, "audio");
        assert!(plugins[0].type_name.ends_with("Audio"));
        assert!(registry.contains("physics"));
        assert!(registry.entry("physics").is_some());
    }

    #[test]
    fn test_plugin_info_serialization() {
        let mut registry = PluginRegistry::new();
        registry.register("audio", Audio { volume: 0 });

        let json = serde_json::to_string(&registry.list_plugins()).unwrap();
        assert!(json.contains("\"name\":\"audio\""));
        assert!(json.contains("registered_at"));
    }

    #[test]
    fn test_with_config() {
        let config = RegistryConfig {
            initial_capacity: 32,
        };
        let registry = PluginRegistry::with_config(&config);
        assert!(registry.is_empty());
    }
}
