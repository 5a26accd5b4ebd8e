//! IPC client for connecting to a viewer process
//!
//! Used by the panel and the headless commands. Settings pushes follow the
//! store's contract: delivery is best-effort and failures are swallowed, so
//! an exited viewer or stale socket never turns into a user-visible error.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;

use super::protocol::*;
use crate::settings::PageSettings;
use crate::{Error, Result};

/// Client for one viewer's socket
#[derive(Clone)]
pub struct PanelClient {
    socket_path: PathBuf,
}

impl PanelClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    /// Check whether a viewer is listening by sending a ping
    pub async fn ping(&self) -> bool {
        self.call(methods::PING, serde_json::Value::Null)
            .await
            .is_ok()
    }

    /// Query the viewer's hostname, url, and applied settings
    pub async fn status(&self) -> Result<PageStatusResponse> {
        let result = self
            .call(methods::PAGE_STATUS, serde_json::Value::Null)
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Push a full settings snapshot to the viewer
    pub async fn update_settings(&self, snapshot: &PageSettings) -> Result<()> {
        let params = serde_json::to_value(snapshot)?;
        self.call(methods::SETTINGS_UPDATE, params).await?;
        Ok(())
    }

    /// Best-effort settings push: failures are logged and discarded.
    ///
    /// Returns whether the snapshot was delivered.
    pub async fn push_settings(&self, snapshot: &PageSettings) -> bool {
        match self.update_settings(snapshot).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    "settings push to {} dropped: {}",
                    self.socket_path.display(),
                    e
                );
                false
            }
        }
    }

    /// Send a request and receive a response
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            Error::Ipc(format!(
                "Failed to connect to viewer at {}: {}",
                self.socket_path.display(),
                e
            ))
        })?;

        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        // Build request
        let request = Request::new(method).with_params(params);
        let request_json = serde_json::to_string(&request)?;

        // Send request
        writer.write_all(request_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        // Read response
        let mut response_line = String::new();
        reader.read_line(&mut response_line).await?;

        let response: Response = serde_json::from_str(&response_line)?;

        if let Some(error) = response.error {
            return Err(Error::Ipc(format!(
                "RPC error {}: {}",
                error.code, error.message
            )));
        }

        response
            .result
            .ok_or_else(|| Error::Ipc("Empty response".to_string()))
    }
}

/// Check if a viewer is reachable on a socket
pub async fn is_page_alive(socket_path: &std::path::Path) -> bool {
    PanelClient::new(socket_path.to_path_buf()).ping().await
}
