use anyhow::{bail, Result};

use wheelwright_core::page::normalize_url;
use wheelwright_core::{AppConfig, SettingsStore};

use super::push_to_live_pages;

pub async fn list(config: &AppConfig) -> Result<()> {
    let store = SettingsStore::open(config);
    let settings = store.load()?;

    if settings.enabled_sites.is_empty() {
        println!("No sites enabled.");
        println!("\nTo enable rescaling for a site, run:");
        println!("  wheelwright sites enable <hostname>");
        return Ok(());
    }

    println!("Enabled sites ({}):\n", settings.enabled_sites.len());
    for site in &settings.enabled_sites {
        println!("  {}", site);
    }

    Ok(())
}

pub async fn enable(config: &AppConfig, hostname: &str) -> Result<()> {
    let hostname = normalize_hostname(hostname)?;
    let store = SettingsStore::open(config);
    let mut settings = store.load()?;

    if settings.enable_site(&hostname) {
        store.save(&settings)?;
        println!("Enabled for {}", hostname);
    } else {
        println!("Already enabled for {}", hostname);
    }

    push_to_live_pages(config, &settings).await;
    Ok(())
}

pub async fn disable(config: &AppConfig, hostname: &str) -> Result<()> {
    let hostname = normalize_hostname(hostname)?;
    let store = SettingsStore::open(config);
    let mut settings = store.load()?;

    if settings.disable_site(&hostname) {
        store.save(&settings)?;
        println!("Disabled for {}", hostname);
    } else {
        println!("{} was not enabled", hostname);
    }

    push_to_live_pages(config, &settings).await;
    Ok(())
}

/// Accept either a bare hostname or a full URL
fn normalize_hostname(input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("hostname is empty");
    }

    if input.contains("://") || input.contains('/') {
        let url = normalize_url(input)?;
        match url.host_str() {
            Some(host) => Ok(host.to_string()),
            None => bail!("no hostname in {}", input),
        }
    } else {
        Ok(input.to_lowercase())
    }
}
