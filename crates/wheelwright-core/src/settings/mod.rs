//! Persisted scroll settings and the file store backing them.
//!
//! One record holds the enabled-site list and four scroll preferences;
//! each viewer derives a per-page snapshot from it at load or push time.

mod model;
mod store;

pub use model::{PageSettings, ScrollSettings};
pub use store::SettingsStore;
