//! Active-page registry
//!
//! Each viewer writes a small JSON entry under the runtime directory next to
//! its socket; the panel and the headless commands use the registry to find
//! live viewers. The most recently started live entry plays the role of the
//! "active tab". Entries whose socket no longer answers are stale (crashed or
//! killed viewer) and are pruned opportunistically.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::client::is_page_alive;
use crate::config::AppConfig;
use crate::Result;

/// One registered viewer process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEntry {
    pub pid: u32,
    pub hostname: String,
    pub url: String,
    pub socket: PathBuf,
    /// Unix timestamp (seconds) of viewer startup
    pub started_at: u64,
}

impl PageEntry {
    pub fn new(hostname: impl Into<String>, url: impl Into<String>, socket: PathBuf) -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            pid: std::process::id(),
            hostname: hostname.into(),
            url: url.into(),
            socket,
            started_at,
        }
    }
}

/// Directory of per-page registry entries
pub struct PageRegistry {
    dir: PathBuf,
}

impl PageRegistry {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn open(config: &AppConfig) -> Self {
        Self::new(config.pages_dir())
    }

    fn entry_path(&self, pid: u32) -> PathBuf {
        self.dir.join(format!("{}.json", pid))
    }

    /// Write the registry entry for a viewer. Called after its socket is bound.
    pub fn register(&self, entry: &PageEntry) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(entry)?;
        std::fs::write(self.entry_path(entry.pid), content)?;
        debug!("registered page {} (pid {})", entry.hostname, entry.pid);
        Ok(())
    }

    /// Remove a viewer's registry entry. Best-effort.
    pub fn deregister(&self, pid: u32) {
        let _ = std::fs::remove_file(self.entry_path(pid));
    }

    /// All registry entries, newest first. Unreadable entries are skipped.
    pub fn list(&self) -> Vec<PageEntry> {
        let mut entries = Vec::new();

        let dir = match std::fs::read_dir(&self.dir) {
            Ok(dir) => dir,
            Err(_) => return entries,
        };

        for item in dir.flatten() {
            let path = item.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match std::fs::read_to_string(&path)
                .map_err(crate::Error::from)
                .and_then(|content| Ok(serde_json::from_str::<PageEntry>(&content)?))
            {
                Ok(entry) => entries.push(entry),
                Err(e) => debug!("skipping unreadable registry entry {:?}: {}", path, e),
            }
        }

        entries.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        entries
    }

    /// Entries whose viewer still answers a ping, newest first.
    ///
    /// Dead entries are removed from the registry along with their sockets.
    pub async fn live_pages(&self) -> Vec<PageEntry> {
        let mut live = Vec::new();

        for entry in self.list() {
            if is_page_alive(&entry.socket).await {
                live.push(entry);
            } else {
                debug!("pruning stale page entry for pid {}", entry.pid);
                self.deregister(entry.pid);
                let _ = std::fs::remove_file(&entry.socket);
            }
        }

        live
    }

    /// Resolve the active page: the newest live viewer, optionally filtered
    /// by hostname.
    pub async fn active_page(&self, site: Option<&str>) -> Option<PageEntry> {
        self.live_pages()
            .await
            .into_iter()
            .find(|entry| site.map_or(true, |host| entry.hostname == host))
    }
}
