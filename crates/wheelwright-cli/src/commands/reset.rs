use anyhow::Result;

use wheelwright_core::{AppConfig, SettingsStore};

use super::push_to_live_pages;

/// Reset speed and smoothing preferences. Per-site enablement is kept.
pub async fn run(config: &AppConfig) -> Result<()> {
    let store = SettingsStore::open(config);
    let mut settings = store.load()?;

    settings.reset_preferences();
    store.save(&settings)?;

    println!("Preferences reset to defaults.");
    if !settings.enabled_sites.is_empty() {
        println!("Kept {} enabled site(s).", settings.enabled_sites.len());
    }

    push_to_live_pages(config, &settings).await;
    Ok(())
}
