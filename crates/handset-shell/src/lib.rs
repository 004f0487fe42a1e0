//! Tab and view orchestration for the Handset shell.
//!
//! - [`tabs`]: tab lifecycle, switching and per-tab event handling
//! - [`theme_cache`]: per-domain theme colors with debounced persistence
//! - [`gateway`]: authentication and routing of surface messages
//! - [`controller`]: the [`Orchestrator`] the event loop drives

pub mod controller;
pub mod gateway;
pub mod tabs;
pub mod theme_cache;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{HostWindow, Orchestrator};
pub use gateway::{Command, IpcGateway, Routed};
pub use tabs::{CrashPolicy, TabManager, TabPolicy, TabState};
pub use theme_cache::{CacheEntry, ThemeColorCache};
