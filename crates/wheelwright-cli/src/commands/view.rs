use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::{mpsc, watch};

use wheelwright_core::ipc::PageEntry;
use wheelwright_core::page::{normalize_url, PageContent, PageFetcher};
use wheelwright_core::{AppConfig, PageRegistry, PageServer, PageSettings, SettingsStore};
use wheelwright_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_viewer_key, Action},
    theme::Theme,
    widgets::{PageViewWidget, StatusBarWidget},
};

/// Outcome of a background refetch
enum FetchResult {
    Success(PageContent),
    Failure(String),
}

pub async fn run(config: Arc<AppConfig>, url: &str) -> Result<()> {
    let url = normalize_url(url)?;

    // Fetch before touching the terminal so errors print normally
    let fetcher = PageFetcher::new(&config)?;
    let page = PageContent::new(fetcher.fetch(&url).await?);
    let hostname = page.hostname.clone();
    let page_url = page.url.clone();

    // The server forwards pushed snapshots into updates_tx; the app publishes
    // what it applied through applied_tx for status queries
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel::<PageSettings>();
    let (applied_tx, applied_rx) = watch::channel(PageSettings::default());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Announce this viewer so panels can find it
    let registry = PageRegistry::open(&config);
    let entry = PageEntry::new(
        hostname.clone(),
        page_url.clone(),
        config.socket_path(std::process::id()),
    );
    registry.register(&entry)?;

    let server = PageServer::new(
        entry.socket.clone(),
        hostname.clone(),
        page_url.clone(),
        updates_tx.clone(),
        applied_rx,
    );
    let server_handle = tokio::spawn(async move { server.run(shutdown_rx).await });

    // Load stored settings in the background. The snapshot arrives on the
    // same channel panel pushes use, so events before it lands see the
    // disabled defaults.
    {
        let tx = updates_tx.clone();
        let config = config.clone();
        let host = hostname.clone();
        tokio::spawn(async move {
            let store = SettingsStore::open(&config);
            match store.load() {
                Ok(settings) => {
                    let _ = tx.send(settings.snapshot_for(&host));
                }
                Err(e) => tracing::warn!("failed to load settings: {}", e),
            }
        });
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(format!("wheelwright - {}", hostname))
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), page, Theme::default(), applied_tx);

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Channel for async refetch results
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();

    // Checked at the END of each iteration to pick the NEXT iteration's
    // tick rate, so a wheel burst gets frequent wakeups immediately
    let mut needs_fast_update = false;

    // Main loop
    loop {
        // Apply settings pushed by panels (and the initial store load)
        while let Ok(snapshot) = updates_rx.try_recv() {
            app.apply_settings(snapshot);
        }

        // Process any completed refetch (non-blocking)
        while let Ok(result) = fetch_rx.try_recv() {
            app.is_fetching = false;
            match result {
                FetchResult::Success(page) => {
                    app.replace_page(page);
                    app.set_status("Reloaded");
                }
                FetchResult::Failure(error) => {
                    app.set_status(format!("Reload failed: {}", error));
                }
            }
        }

        // Flush elapsed quiet windows and advance the animation
        app.drive_scroll(Instant::now());

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: page content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            PageViewWidget::render(frame, main_layout[0], &mut app);
            StatusBarWidget::render(frame, main_layout[1], &mut app);
        })?;

        // Handle events (use faster tick rate while scrolling is active)
        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_viewer_key(key, app.pending_key == Some('g'));
                    handle_action(&mut app, action, &fetch_tx);
                }
                AppEvent::Wheel(direction) => {
                    app.on_wheel(direction, Instant::now());
                }
                AppEvent::Resize(_, _) => {
                    // The next draw re-renders at the new width
                }
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // Stop the page server and withdraw from the registry
    let _ = shutdown_tx.send(true);
    match server_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("page server exited with error: {}", e),
        Err(e) => tracing::warn!("page server task failed: {}", e),
    }
    registry.deregister(entry.pid);

    Ok(())
}

fn handle_action(app: &mut App, action: Action, fetch_tx: &mpsc::UnboundedSender<FetchResult>) {
    // Clear pending key on any action except PendingG
    if action != Action::PendingG && action != Action::JumpToTop {
        app.clear_pending_key();
    }

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::LineDown => app.line_down(),
        Action::LineUp => app.line_up(),
        Action::HalfPageDown => app.half_page_down(),
        Action::HalfPageUp => app.half_page_up(),
        Action::PageDown => app.page_down(),
        Action::PageUp => app.page_up(),
        Action::JumpToTop => {
            app.clear_pending_key();
            app.jump_to_top();
        }
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::PendingG => {
            app.pending_key = Some('g');
        }
        Action::OpenInBrowser => app.open_in_browser(),
        Action::Reload => {
            if app.is_fetching {
                app.set_status("Fetch already in progress...");
            } else {
                spawn_fetch(app, fetch_tx.clone());
            }
        }
        Action::None => {}
    }
}

/// Refetch the page as a background task
fn spawn_fetch(app: &mut App, tx: mpsc::UnboundedSender<FetchResult>) {
    app.is_fetching = true;
    let config = app.config.clone();
    let url_str = app.page.url.clone();

    tokio::spawn(async move {
        let result = async {
            let url = normalize_url(&url_str)?;
            let fetcher = PageFetcher::new(&config)?;
            let fetched = fetcher.fetch(&url).await?;
            Ok::<_, wheelwright_core::Error>(PageContent::new(fetched))
        }
        .await;

        match result {
            Ok(page) => {
                let _ = tx.send(FetchResult::Success(page));
            }
            Err(e) => {
                let _ = tx.send(FetchResult::Failure(e.to_string()));
            }
        }
    });
}
