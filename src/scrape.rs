// src/scrape.rs
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    config::options::{ExtractOptions, SourceSelector},
    core::PageSource,
    data::DrawRecord,
    error::ScrapeError,
    specs::draws::{self, ParseSkip},
};

/// Records from one page, plus what was passed over on the way.
#[derive(Debug)]
pub struct Extraction {
    pub url: String,
    pub records: Vec<DrawRecord>,
    pub skips: Vec<ParseSkip>,
}

impl Extraction {
    pub fn skipped(&self) -> usize {
        self.skips.len()
    }
}

/// Fetches a results page and turns it into draw records.
/// Holds no state between calls.
pub struct ResultExtractor<'a> {
    source: &'a dyn PageSource,
    opts: ExtractOptions,
}

impl<'a> ResultExtractor<'a> {
    pub fn new(source: &'a dyn PageSource, opts: ExtractOptions) -> Self {
        Self { source, opts }
    }

    /// Fetch with the configured selector.
    pub fn fetch_configured(&self) -> Result<Extraction, ScrapeError> {
        self.fetch(&self.opts.source)
    }

    /// Network and structure failures are returned; per-row failures end up in `skips`.
    pub fn fetch(&self, selector: &SourceSelector) -> Result<Extraction, ScrapeError> {
        let url = selector.url(&self.opts.base_url);
        info!(%url, "fetching results page");
        let body = self.source.get(&url)?;

        let t = Instant::now();
        let page = if selector.is_latest() {
            draws::parse_latest(&body)?
        } else {
            draws::parse_doc(&body, self.opts.scope, self.opts.dates)?
        };
        debug!(%url, elapsed = ?t.elapsed(), "parsed page");

        if !page.skips.is_empty() {
            warn!(%url, skipped = page.skips.len(), "rows or groups skipped");
        }
        info!(%url, records = page.records.len(), "extracted draws");

        Ok(Extraction { url, records: page.records, skips: page.skips })
    }
}
