use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use wheelwright_core::page::PageContent;
use wheelwright_core::{AppConfig, PageSettings};

use crate::scroll::{ScrollAnimator, WheelAccumulator, WheelDecision};
use crate::theme::Theme;

/// Viewer application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// The page on display
    pub page: PageContent,
    /// Color theme
    pub theme: Theme,
    /// Settings snapshot wheel events are evaluated against
    pub settings: PageSettings,
    /// Debounced wheel accumulator
    pub accumulator: WheelAccumulator,
    /// Scroll position and animation driver
    pub animator: ScrollAnimator,
    /// Publishes the applied snapshot for status queries
    applied_tx: watch::Sender<PageSettings>,
    /// Inner text area width from the last draw
    pub viewport_width: u16,
    /// Inner text area height from the last draw
    pub viewport_height: u16,
    /// Whether the app should quit
    pub should_quit: bool,
    /// A refetch is in flight
    pub is_fetching: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        page: PageContent,
        theme: Theme,
        applied_tx: watch::Sender<PageSettings>,
    ) -> Self {
        Self {
            config,
            page,
            theme,
            // Disabled until the stored settings arrive
            settings: PageSettings::default(),
            accumulator: WheelAccumulator::new(),
            animator: ScrollAnimator::new(),
            applied_tx,
            viewport_width: 0,
            viewport_height: 0,
            should_quit: false,
            is_fetching: false,
            status_message: None,
            pending_key: None,
        }
    }

    /// Replace the settings snapshot; later events use the new values
    pub fn apply_settings(&mut self, settings: PageSettings) {
        self.settings = settings;
        let _ = self.applied_tx.send(settings);
        tracing::debug!(
            "applied settings for {}: enabled={} speed={} smooth={}",
            self.page.hostname,
            settings.enabled_on_site,
            settings.scroll_speed,
            settings.smooth_scrolling
        );
    }

    /// Replace the displayed page after a refetch
    pub fn replace_page(&mut self, page: PageContent) {
        self.page = page;
        // Position is clamped against the new height on the next update
    }

    /// Title for the terminal and status bar
    pub fn display_title(&self) -> String {
        self.page
            .title
            .clone()
            .unwrap_or_else(|| self.page.url.clone())
    }

    /// One wheel notch from the terminal
    pub fn on_wheel(&mut self, direction: i8, now: Instant) {
        let delta = f64::from(direction) * f64::from(self.config.ui.scroll_lines);
        let max = self.max_scroll();
        match self.accumulator.on_wheel(delta, &self.settings, now) {
            WheelDecision::PassThrough => self.animator.scroll_by(delta, max),
            WheelDecision::Captured => {}
        }
    }

    /// Flush the accumulator when its quiet window has elapsed and advance
    /// any running animation. Called once per loop iteration.
    pub fn drive_scroll(&mut self, now: Instant) {
        let max = self.max_scroll();
        if let Some(distance) = self.accumulator.poll(now) {
            if self.settings.smooth_scrolling {
                self.animator
                    .animate_by(distance, self.settings.animation_duration(), now, max);
            } else {
                self.animator.apply_jump(distance, max);
            }
        }
        self.animator.update(now, max);
    }

    /// Whether the next poll should use the animation tick rate
    pub fn needs_fast_update(&self) -> bool {
        self.accumulator.is_accumulating() || self.animator.needs_update()
    }

    /// Scroll one line per configured step, bypassing the wheel pipeline
    pub fn line_down(&mut self) {
        let max = self.max_scroll();
        self.animator
            .scroll_by(f64::from(self.config.ui.scroll_lines), max);
    }

    pub fn line_up(&mut self) {
        let max = self.max_scroll();
        self.animator
            .scroll_by(-f64::from(self.config.ui.scroll_lines), max);
    }

    pub fn half_page_down(&mut self) {
        let max = self.max_scroll();
        let jump = f64::from((self.viewport_height / 2).max(1));
        self.animator.scroll_by(jump, max);
    }

    pub fn half_page_up(&mut self) {
        let max = self.max_scroll();
        let jump = f64::from((self.viewport_height / 2).max(1));
        self.animator.scroll_by(-jump, max);
    }

    pub fn page_down(&mut self) {
        let max = self.max_scroll();
        self.animator
            .scroll_by(f64::from(self.viewport_height.max(1)), max);
    }

    pub fn page_up(&mut self) {
        let max = self.max_scroll();
        self.animator
            .scroll_by(-f64::from(self.viewport_height.max(1)), max);
    }

    pub fn jump_to_top(&mut self) {
        let max = self.max_scroll();
        self.animator.scroll_to(0.0, max);
    }

    pub fn jump_to_bottom(&mut self) {
        let max = self.max_scroll();
        self.animator.scroll_to(max, max);
    }

    /// Open the page in the system browser
    pub fn open_in_browser(&mut self) {
        if let Err(e) = open::that(&self.page.url) {
            self.set_status(format!("Failed to open browser: {}", e));
        } else {
            self.set_status(format!("Opening {}", self.page.url));
        }
    }

    /// Greatest scroll offset that still fills the viewport
    pub fn max_scroll(&mut self) -> f64 {
        if self.viewport_width == 0 {
            return 0.0;
        }
        let lines = self.page.line_count(self.viewport_width);
        lines.saturating_sub(self.viewport_height as usize) as f64
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Clear the pending key
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use url::Url;
    use wheelwright_core::page::FetchedPage;

    use super::*;

    fn test_app(settings: PageSettings) -> App {
        let html = format!(
            "<html><head><title>Test</title></head><body>{}</body></html>",
            "<p>line</p>".repeat(200)
        );
        let page = PageContent::new(FetchedPage {
            url: Url::parse("https://example.com/page").unwrap(),
            html,
        });
        let (applied_tx, _applied_rx) = watch::channel(PageSettings::default());
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            page,
            Theme::default(),
            applied_tx,
        );
        app.viewport_width = 80;
        app.viewport_height = 20;
        app.apply_settings(settings);
        app
    }

    fn enabled_settings(speed: f64) -> PageSettings {
        PageSettings {
            enabled_on_site: true,
            speed_enabled: true,
            scroll_speed: speed,
            smooth_scrolling: false,
            smooth_duration: 300,
        }
    }

    #[test]
    fn test_wheel_passes_through_when_disabled() {
        let mut app = test_app(PageSettings::default());
        let start = Instant::now();

        app.on_wheel(1, start);
        // Native scroll moves immediately by the configured line step
        assert_eq!(
            app.animator.position(),
            f64::from(app.config.ui.scroll_lines)
        );
        assert!(!app.accumulator.is_accumulating());
    }

    #[test]
    fn test_wheel_captured_and_flushed_scaled() {
        let mut app = test_app(enabled_settings(2.0));
        let start = Instant::now();

        app.on_wheel(1, start);
        app.on_wheel(1, start + Duration::from_millis(10));
        // Captured: nothing moves until the quiet window elapses
        assert_eq!(app.animator.position(), 0.0);

        app.drive_scroll(start + Duration::from_millis(70));
        let step = f64::from(app.config.ui.scroll_lines);
        assert_eq!(app.animator.position(), 2.0 * step * 2.0);
    }

    #[test]
    fn test_settings_change_applies_to_later_events() {
        let mut app = test_app(enabled_settings(2.0));
        let start = Instant::now();

        app.on_wheel(1, start);
        app.apply_settings(enabled_settings(4.0));
        app.on_wheel(1, start + Duration::from_millis(10));

        app.drive_scroll(start + Duration::from_millis(70));
        let step = f64::from(app.config.ui.scroll_lines);
        assert_eq!(app.animator.position(), 2.0 * step + 4.0 * step);
    }

    #[test]
    fn test_key_scroll_bypasses_pipeline() {
        let mut app = test_app(enabled_settings(3.0));

        app.line_down();
        // No scaling, no debounce
        assert_eq!(
            app.animator.position(),
            f64::from(app.config.ui.scroll_lines)
        );
    }

    #[test]
    fn test_jump_to_bottom_clamps_to_content() {
        let mut app = test_app(enabled_settings(1.0));

        app.jump_to_bottom();
        let max = app.max_scroll();
        assert!(max > 0.0);
        assert_eq!(app.animator.position(), max);
    }

    #[test]
    fn test_applied_snapshot_published() {
        let html = "<html><body><p>hi</p></body></html>".to_string();
        let page = PageContent::new(FetchedPage {
            url: Url::parse("https://example.com/").unwrap(),
            html,
        });
        let (applied_tx, applied_rx) = watch::channel(PageSettings::default());
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            page,
            Theme::default(),
            applied_tx,
        );

        app.apply_settings(enabled_settings(2.5));
        assert_eq!(applied_rx.borrow().scroll_speed, 2.5);
        assert!(applied_rx.borrow().enabled_on_site);
    }
}
