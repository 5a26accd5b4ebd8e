use std::sync::Arc;

use wheelwright_core::{AppConfig, ScrollSettings};

use crate::theme::Theme;

/// Scroll speed slider bounds
pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 5.0;
pub const SPEED_STEP: f64 = 0.1;

/// Smooth duration slider bounds in milliseconds
pub const DURATION_MIN: u64 = 50;
pub const DURATION_MAX: u64 = 1000;
pub const DURATION_STEP: u64 = 50;

/// A row in the settings form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    EnableSite,
    SpeedEnabled,
    ScrollSpeed,
    SmoothScrolling,
    SmoothDuration,
    Reset,
}

pub const PANEL_ROWS: [PanelRow; 6] = [
    PanelRow::EnableSite,
    PanelRow::SpeedEnabled,
    PanelRow::ScrollSpeed,
    PanelRow::SmoothScrolling,
    PanelRow::SmoothDuration,
    PanelRow::Reset,
];

/// Settings panel application state
pub struct PanelApp {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Color theme
    pub theme: Theme,
    /// Working copy of the stored settings
    pub settings: ScrollSettings,
    /// Hostname of the page being configured, if any viewer is up
    pub hostname: Option<String>,
    /// URL of that page, for the header line
    pub page_url: Option<String>,
    /// Selected form row
    pub selected: usize,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl PanelApp {
    pub fn new(
        config: Arc<AppConfig>,
        theme: Theme,
        settings: ScrollSettings,
        hostname: Option<String>,
        page_url: Option<String>,
    ) -> Self {
        Self {
            config,
            theme,
            settings,
            hostname,
            page_url,
            selected: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn selected_row(&self) -> PanelRow {
        PANEL_ROWS[self.selected.min(PANEL_ROWS.len() - 1)]
    }

    pub fn row_down(&mut self) {
        if self.selected < PANEL_ROWS.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn row_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Whether rescaling is enabled for the targeted site
    pub fn site_enabled(&self) -> bool {
        self.hostname
            .as_deref()
            .map(|host| self.settings.is_enabled_for(host))
            .unwrap_or(false)
    }

    /// Toggle or press the selected row. Returns true when settings changed.
    pub fn activate(&mut self) -> bool {
        match self.selected_row() {
            PanelRow::EnableSite => {
                let Some(host) = self.hostname.clone() else {
                    self.set_status("No page viewer is running");
                    return false;
                };
                if self.settings.is_enabled_for(&host) {
                    self.settings.disable_site(&host);
                    self.set_status(format!("Disabled for {}", host));
                } else {
                    self.settings.enable_site(&host);
                    self.set_status(format!("Enabled for {}", host));
                }
                true
            }
            PanelRow::SpeedEnabled => {
                self.settings.speed_enabled = !self.settings.speed_enabled;
                true
            }
            PanelRow::SmoothScrolling => {
                self.settings.smooth_scrolling = !self.settings.smooth_scrolling;
                true
            }
            PanelRow::Reset => {
                self.settings.reset_preferences();
                self.set_status("Preferences reset");
                true
            }
            // Sliders respond to increase/decrease only
            PanelRow::ScrollSpeed | PanelRow::SmoothDuration => false,
        }
    }

    /// Step the selected slider up. Returns true when settings changed.
    pub fn increase(&mut self) -> bool {
        match self.selected_row() {
            PanelRow::ScrollSpeed => {
                let next = round_speed(self.settings.scroll_speed + SPEED_STEP).min(SPEED_MAX);
                let changed = next != self.settings.scroll_speed;
                self.settings.scroll_speed = next;
                changed
            }
            PanelRow::SmoothDuration => {
                let next = (self.settings.smooth_duration + DURATION_STEP).min(DURATION_MAX);
                let changed = next != self.settings.smooth_duration;
                self.settings.smooth_duration = next;
                changed
            }
            _ => false,
        }
    }

    /// Step the selected slider down. Returns true when settings changed.
    pub fn decrease(&mut self) -> bool {
        match self.selected_row() {
            PanelRow::ScrollSpeed => {
                let next = round_speed(self.settings.scroll_speed - SPEED_STEP).max(SPEED_MIN);
                let changed = next != self.settings.scroll_speed;
                self.settings.scroll_speed = next;
                changed
            }
            PanelRow::SmoothDuration => {
                let next = self
                    .settings
                    .smooth_duration
                    .saturating_sub(DURATION_STEP)
                    .max(DURATION_MIN);
                let changed = next != self.settings.smooth_duration;
                self.settings.smooth_duration = next;
                changed
            }
            _ => false,
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

/// Keep the speed on a tenths grid so repeated stepping never drifts
fn round_speed(speed: f64) -> f64 {
    (speed * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_panel(hostname: Option<&str>) -> PanelApp {
        PanelApp::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            ScrollSettings::default(),
            hostname.map(String::from),
            hostname.map(|h| format!("https://{}/", h)),
        )
    }

    fn select(app: &mut PanelApp, row: PanelRow) {
        app.selected = PANEL_ROWS.iter().position(|r| *r == row).unwrap();
    }

    #[test]
    fn test_enable_toggles_site() {
        let mut app = test_panel(Some("example.com"));
        select(&mut app, PanelRow::EnableSite);

        assert!(!app.site_enabled());
        assert!(app.activate());
        assert!(app.site_enabled());
        assert!(app.activate());
        assert!(!app.site_enabled());
    }

    #[test]
    fn test_enable_without_page_is_noop() {
        let mut app = test_panel(None);
        select(&mut app, PanelRow::EnableSite);

        assert!(!app.activate());
        assert!(app.settings.enabled_sites.is_empty());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_speed_slider_steps_and_clamps() {
        let mut app = test_panel(Some("example.com"));
        select(&mut app, PanelRow::ScrollSpeed);

        assert!(app.increase());
        assert_eq!(app.settings.scroll_speed, 1.1);

        // Repeated stepping stays on the tenths grid
        for _ in 0..100 {
            app.increase();
        }
        assert_eq!(app.settings.scroll_speed, SPEED_MAX);
        assert!(!app.increase());

        for _ in 0..100 {
            app.decrease();
        }
        assert_eq!(app.settings.scroll_speed, SPEED_MIN);
        assert!(!app.decrease());
    }

    #[test]
    fn test_duration_slider_steps_and_clamps() {
        let mut app = test_panel(Some("example.com"));
        select(&mut app, PanelRow::SmoothDuration);

        assert!(app.increase());
        assert_eq!(app.settings.smooth_duration, 350);

        for _ in 0..50 {
            app.increase();
        }
        assert_eq!(app.settings.smooth_duration, DURATION_MAX);

        for _ in 0..50 {
            app.decrease();
        }
        assert_eq!(app.settings.smooth_duration, DURATION_MIN);
    }

    #[test]
    fn test_sliders_ignore_activate() {
        let mut app = test_panel(Some("example.com"));
        select(&mut app, PanelRow::ScrollSpeed);
        assert!(!app.activate());
        select(&mut app, PanelRow::SmoothDuration);
        assert!(!app.activate());
    }

    #[test]
    fn test_reset_keeps_enabled_sites() {
        let mut app = test_panel(Some("example.com"));
        select(&mut app, PanelRow::EnableSite);
        app.activate();
        select(&mut app, PanelRow::ScrollSpeed);
        app.increase();
        select(&mut app, PanelRow::Reset);

        assert!(app.activate());
        assert_eq!(app.settings.scroll_speed, 1.0);
        assert!(app.site_enabled());
    }

    #[test]
    fn test_row_navigation_saturates() {
        let mut app = test_panel(None);
        app.row_up();
        assert_eq!(app.selected, 0);

        for _ in 0..10 {
            app.row_down();
        }
        assert_eq!(app.selected, PANEL_ROWS.len() - 1);
        assert_eq!(app.selected_row(), PanelRow::Reset);
    }
}
