//! IPC server embedded in each viewer process
//!
//! Listens on the viewer's Unix socket and handles panel requests: liveness
//! pings, page status queries, and settings snapshot pushes. Pushed snapshots
//! are forwarded into the viewer's event loop through an unbounded channel;
//! the loop applies them and publishes the applied state back through a watch
//! channel so status queries reflect what is actually in effect.

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::protocol::*;
use crate::settings::PageSettings;
use crate::Result;

/// Shared per-connection context
#[derive(Clone)]
struct PageContext {
    hostname: String,
    url: String,
    updates_tx: mpsc::UnboundedSender<PageSettings>,
    applied_rx: watch::Receiver<PageSettings>,
}

/// IPC server for one viewer process
pub struct PageServer {
    socket_path: PathBuf,
    context: PageContext,
}

impl PageServer {
    pub fn new(
        socket_path: PathBuf,
        hostname: impl Into<String>,
        url: impl Into<String>,
        updates_tx: mpsc::UnboundedSender<PageSettings>,
        applied_rx: watch::Receiver<PageSettings>,
    ) -> Self {
        Self {
            socket_path,
            context: PageContext {
                hostname: hostname.into(),
                url: url.into(),
                updates_tx,
                applied_rx,
            },
        }
    }

    /// Run the IPC server until shutdown is signalled
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> Result<()> {
        // Remove old socket file if exists
        if self.socket_path.exists() {
            std::fs::remove_file(&self.socket_path)?;
        }

        // Ensure parent directory exists
        if let Some(parent) = self.socket_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let listener = UnixListener::bind(&self.socket_path)?;
        info!("page IPC listening on: {}", self.socket_path.display());

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, _)) => {
                            let context = self.context.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, context).await {
                                    warn!("Error handling connection: {}", e);
                                }
                            });
                        }
                        Err(e) => {
                            error!("Failed to accept connection: {}", e);
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("page IPC shutting down");
                        break;
                    }
                }
            }
        }

        // Cleanup socket file
        let _ = std::fs::remove_file(&self.socket_path);
        Ok(())
    }
}

async fn handle_connection(stream: UnixStream, context: PageContext) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // Connection closed
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                debug!("Received request: {} (id: {})", request.method, request.id);
                handle_request(request, &context)
            }
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Response::error(Uuid::nil(), ERR_PARSE, format!("Parse error: {}", e))
            }
        };

        let response_json = serde_json::to_string(&response)?;
        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}

fn handle_request(request: Request, context: &PageContext) -> Response {
    let id = request.id;

    match request.method.as_str() {
        methods::PING => Response::success(id, serde_json::json!({"ok": true})),

        methods::PAGE_STATUS => {
            let settings = *context.applied_rx.borrow();
            Response::success(
                id,
                serde_json::json!({
                    "hostname": context.hostname,
                    "url": context.url,
                    "settings": settings,
                }),
            )
        }

        methods::SETTINGS_UPDATE => {
            match serde_json::from_value::<PageSettings>(request.params) {
                Ok(snapshot) => {
                    debug!("settings push for {}: {:?}", context.hostname, snapshot);
                    match context.updates_tx.send(snapshot) {
                        Ok(()) => Response::ok(id),
                        Err(e) => Response::error(id, ERR_INTERNAL, e.to_string()),
                    }
                }
                Err(e) => Response::error(id, ERR_INVALID_PARAMS, e.to_string()),
            }
        }

        _ => Response::error(id, ERR_METHOD_NOT_FOUND, "Method not found"),
    }
}
