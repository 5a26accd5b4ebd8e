use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
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

use wheelwright_core::ipc::PageEntry;
use wheelwright_core::{AppConfig, PageRegistry, PanelClient, SettingsStore};
use wheelwright_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_panel_key, PanelAction},
    panel::PanelApp,
    theme::Theme,
    widgets::{PanelFormWidget, PanelStatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, site: Option<String>) -> Result<()> {
    let store = SettingsStore::open(&config);
    let settings = store.load()?;

    // Target the newest live viewer, or the one on --site when given.
    // With --site and no matching viewer the form still edits that host,
    // the pushes just have nowhere to go.
    let registry = PageRegistry::open(&config);
    let target = registry.active_page(site.as_deref()).await;
    let hostname = site.or_else(|| target.as_ref().map(|t| t.hostname.clone()));
    let page_url = target.as_ref().map(|t| t.url.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        SetTitle("wheelwright settings")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = PanelApp::new(
        config.clone(),
        Theme::default(),
        settings,
        hostname,
        page_url,
    );

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.animation_fps);

    // Main loop
    loop {
        terminal.draw(|frame| {
            let size = frame.area();

            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            PanelFormWidget::render(frame, main_layout[0], &app);
            PanelStatusBarWidget::render(frame, main_layout[1], &app);
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let changed = match handle_panel_key(key) {
                        PanelAction::Quit => {
                            app.should_quit = true;
                            false
                        }
                        PanelAction::RowDown => {
                            app.row_down();
                            false
                        }
                        PanelAction::RowUp => {
                            app.row_up();
                            false
                        }
                        PanelAction::Activate => app.activate(),
                        PanelAction::Increase => app.increase(),
                        PanelAction::Decrease => app.decrease(),
                        PanelAction::None => false,
                    };

                    if changed {
                        save_and_push(&mut app, &store, target.as_ref()).await;
                    }
                }
                AppEvent::Wheel(_) | AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

/// Persist the edit, then push what the store actually holds
async fn save_and_push(app: &mut PanelApp, store: &SettingsStore, target: Option<&PageEntry>) {
    if let Err(e) = store.save(&app.settings) {
        app.set_status(format!("Save failed: {}", e));
        return;
    }

    // Re-read so the push carries exactly what was persisted
    match store.load() {
        Ok(fresh) => {
            app.settings = fresh;
            if let (Some(entry), Some(host)) = (target, app.hostname.clone()) {
                let snapshot = app.settings.snapshot_for(&host);
                let client = PanelClient::new(entry.socket.clone());
                client.push_settings(&snapshot).await;
            }
        }
        Err(e) => app.set_status(format!("Reload failed: {}", e)),
    }
}
