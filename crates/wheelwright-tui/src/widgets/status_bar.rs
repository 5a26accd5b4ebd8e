use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();

        let scroll_str = if app.settings.enabled_on_site {
            let mut s = format!("{:.1}x", app.settings.effective_multiplier());
            if app.settings.smooth_scrolling {
                s.push_str(&format!(" smooth {}ms", app.settings.smooth_duration));
            }
            s
        } else {
            "native".to_string()
        };

        let max = app.max_scroll();
        let percent = if max > 0.0 {
            ((app.animator.position() / max) * 100.0).round() as u16
        } else {
            100
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else if app.is_fetching {
            format!(" Fetching {} ...", app.page.url)
        } else {
            format!(
                " {} | {} | {}%",
                app.display_title(),
                scroll_str,
                percent
            )
        };

        let help_hint = " q:quit j/k:scroll o:browser r:reload ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.grey1).bg(theme.bg2),
            ),
        ]);

        let paragraph = Paragraph::new(line);
        frame.render_widget(paragraph, area);
    }
}
