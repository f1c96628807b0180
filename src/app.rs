//! Application context owning the plugin registry.
//!
//! Collaborators receive the registry through the context rather than from
//! global state.

use crate::config::RuntimeConfig;
use crate::monitoring::init_logging;
use crate::plugin::{PluginRegistry, SharedPluginRegistry};

/// Per-application state.
#[derive(Debug)]
pub struct AppContext {
    config: RuntimeConfig,
    plugins: PluginRegistry,
}

impl AppContext {
    /// Create a context with an empty plugin registry.
    ///
    /// Does not install a log subscriber; call [`init_logging`](Self::init_logging)
    /// to apply `config.logging`.
    pub fn new(config: RuntimeConfig) -> Self {
        let plugins = PluginRegistry::with_config(&config.registry);
        tracing::info!(app = %config.app_name, "Application context created");
        Self { config, plugins }
    }

    /// Runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Install the global log subscriber from `config.logging`.
    ///
    /// Returns `false` if one was already installed.
    pub fn init_logging(&self) -> bool {
        init_logging(&self.config.logging)
    }

    /// Plugin registry.
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Mutable plugin registry.
    pub fn plugins_mut(&mut self) -> &mut PluginRegistry {
        &mut self.plugins
    }

    /// Move the registry into a thread-safe context.
    pub fn into_shared(self) -> SharedAppContext {
        SharedAppContext {
            config: self.config,
            plugins: SharedPluginRegistry::from_registry(self.plugins),
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

/// Application context whose registry can be handed to other threads.
#[derive(Clone, Debug)]
pub struct SharedAppContext {
    config: RuntimeConfig,
    plugins: SharedPluginRegistry,
}

impl SharedAppContext {
    /// Create a context with an empty shared registry.
    pub fn new(config: RuntimeConfig) -> Self {
        AppContext::new(config).into_shared()
    }

    /// Runtime configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Shared plugin registry.
    pub fn shared_plugins(&self) -> SharedPluginRegistry {
        self.plugins.clone()
    }
}
