//! IPC module for panel-viewer communication
//!
//! This module provides Unix socket based IPC so the settings panel (and the
//! headless commands) can push live settings snapshots to running viewers,
//! plus the on-disk registry used to find those viewers.

mod client;
mod protocol;
mod registry;
mod server;

pub use client::{is_page_alive, PanelClient};
pub use protocol::*;
pub use registry::{PageEntry, PageRegistry};
pub use server::PageServer;
