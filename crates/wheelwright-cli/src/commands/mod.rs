pub mod panel;
pub mod reset;
pub mod sites;
pub mod view;

use wheelwright_core::{AppConfig, PageRegistry, PanelClient, ScrollSettings};

/// Best-effort push of fresh snapshots to every live viewer
pub(crate) async fn push_to_live_pages(config: &AppConfig, settings: &ScrollSettings) {
    let registry = PageRegistry::open(config);
    for entry in registry.live_pages().await {
        let snapshot = settings.snapshot_for(&entry.hostname);
        let client = PanelClient::new(entry.socket.clone());
        client.push_settings(&snapshot).await;
    }
}
