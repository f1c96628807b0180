//! Plugin Module
//!
//! Name-keyed plugin storage:
//! - Type-erased plugin handles
//! - Plugin registry
//! - Thread-safe shared registry

pub mod handle;
pub mod registry;
pub mod shared;

pub use handle::PluginHandle;
pub use registry::{PluginInfo, PluginRegistry, RegisteredPlugin};
pub use shared::SharedPluginRegistry;
