mod content;
mod fetcher;

pub use content::PageContent;
pub use fetcher::{normalize_url, FetchedPage, PageFetcher};
