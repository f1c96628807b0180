//! # plugin-registry
//!
//! Name-keyed plugin registry for game runtimes:
//! - **Registry**: register any `Send + Sync` value under a name, look it up later
//! - **Handles**: type-erased, shared plugin instances with typed downcasts
//! - **App context**: the registry is owned by the application, not a global
//!
//! ## Quick Start
//!
//! ```rust
//! use plugin_registry::PluginRegistry;
//!
//! struct Audio;
//!
//! let mut plugins = PluginRegistry::new();
//! plugins.register("audio", Audio);
//!
//! assert!(plugins.get::<Audio>("audio").is_some());
//! assert!(plugins.get_plugin("renderer").is_none());
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod plugin;

pub use app::{AppContext, SharedAppContext};
pub use config::{RegistryConfig, RuntimeConfig};
pub use self::core::error::{Error, Result};
pub use plugin::{PluginHandle, PluginInfo, PluginRegistry, SharedPluginRegistry};
