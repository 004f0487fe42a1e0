//! Content surfaces for Handset tabs.
//!
//! Provides:
//! - The [`ContentSurface`] capability the orchestration layer drives, and a
//!   `wry` backend implementing it
//! - The security gate (URL validation, sanitization, user agent selection)
//! - The IPC protocol between the trusted UI, content pages and Rust
//! - Generated blank and error documents with the error code table
//! - A `handset://` content provider for the bundled UI

pub mod color;
pub mod content;
pub mod events;
pub mod ipc;
pub mod pages;
pub mod security;
pub mod surface;
pub mod wry_backend;

pub use content::{ContentProvider, UI_ENTRY_URL, UI_SCHEME};
pub use events::{EventQueue, Inbound, PageLoadState, Sender, SurfaceEvent, SurfaceEventKind};
pub use ipc::{js_dispatch_message, CommandEnvelope, IpcMessage, IpcPayload};
pub use pages::{InternalPage, PageDocument, PageStore};
pub use security::{domain_of, normalize_url, sanitize_url, SecurityGate, UserAgents};
pub use surface::{ContentSurface, EditCommand, SurfaceFactory, SurfaceSpec};
pub use wry_backend::{UiSurface, WrySurface, WrySurfaceFactory};
