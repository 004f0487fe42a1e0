//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the trusted UI surface and the
//! orchestrator that manages every tab.

mod core;
mod event_handler;
mod host;
mod init;
mod polling;
mod shutdown;

pub use core::HandsetApp;
