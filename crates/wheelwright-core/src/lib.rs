pub mod config;
pub mod error;
pub mod ipc;
pub mod page;
pub mod settings;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use ipc::{PageRegistry, PageServer, PanelClient};
pub use settings::{PageSettings, ScrollSettings, SettingsStore};
