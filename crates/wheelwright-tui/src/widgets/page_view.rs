use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct PageViewWidget;

impl PageViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
        let theme = app.theme.clone();

        let block = Block::default()
            .title(format!(" {} ", app.page.hostname))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Record the text viewport so scroll limits track the layout
        app.viewport_width = inner.width;
        app.viewport_height = inner.height;

        let offset = app.animator.offset_rows();
        // html2text already wrapped at this width, so no Paragraph wrap
        let text = app.page.text(inner.width).to_string();

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(theme.fg0))
            .scroll((offset, 0));
        frame.render_widget(paragraph, inner);
    }
}
