use url::Url;

use super::fetcher::FetchedPage;

/// A fetched page prepared for terminal display.
///
/// Text rendering is width-dependent (html2text reflows at a column width),
/// so the rendered form is cached per width and recomputed on resize.
pub struct PageContent {
    pub url: String,
    pub hostname: String,
    pub title: Option<String>,
    html: String,
    rendered: Option<Rendered>,
}

struct Rendered {
    width: u16,
    text: String,
    line_count: usize,
}

/// Narrowest width worth reflowing at; below this html2text output degrades
const MIN_RENDER_WIDTH: u16 = 10;

impl PageContent {
    pub fn new(page: FetchedPage) -> Self {
        let hostname = hostname_of(&page.url);
        let title = extract_title(&page.html);
        Self {
            url: page.url.to_string(),
            hostname,
            title,
            html: page.html,
            rendered: None,
        }
    }

    /// Rendered text at the given width, cached until the width changes
    pub fn text(&mut self, width: u16) -> &str {
        self.ensure_rendered(width);
        match &self.rendered {
            Some(rendered) => &rendered.text,
            None => "",
        }
    }

    /// Number of text lines at the given width
    pub fn line_count(&mut self, width: u16) -> usize {
        self.ensure_rendered(width);
        self.rendered.as_ref().map_or(0, |r| r.line_count)
    }

    fn ensure_rendered(&mut self, width: u16) {
        let width = width.max(MIN_RENDER_WIDTH);
        if self
            .rendered
            .as_ref()
            .map_or(false, |r| r.width == width)
        {
            return;
        }

        let text = html2text::from_read(self.html.as_bytes(), width as usize)
            .unwrap_or_else(|_| self.html.clone());
        let line_count = text.lines().count();
        tracing::debug!(
            "rendered {} at width {} ({} lines)",
            self.hostname,
            width,
            line_count
        );
        self.rendered = Some(Rendered {
            width,
            text,
            line_count,
        });
    }
}

fn hostname_of(url: &Url) -> String {
    url.host_str().unwrap_or("").to_string()
}

/// Pull the document title out of the raw HTML, entity-decoded
fn extract_title(html: &str) -> Option<String> {
    let lower = html.to_lowercase();
    let open = lower.find("<title")?;
    let start = lower[open..].find('>').map(|i| open + i + 1)?;
    let end = lower[start..].find("</title>").map(|i| start + i)?;

    let title = decode_entities(html[start..end].trim());
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
