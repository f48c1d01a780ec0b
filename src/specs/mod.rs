//! # Scraping “specs” module
//!
//! Page-specific parsing for the Loto 3 results site. Each spec encodes
//! *where the ground truth lives in the HTML* and *how to extract it
//! without falling over* when the markup drifts.
//!
//! ## What lives here
//! - **Pure HTML parsing** of the year results page (`/loto-3/resultados/<year>`)
//!   and the year-less latest page (`/loto-3/resultados`).
//! - **Date normalization** of the Spanish short-month anchor text.
//! - **Row/group tolerance**: a broken row or number group becomes a `ParseSkip`,
//!   never an error for the whole page.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`) and URL building (`config::options`).
//! - **Ledger access and dedup** (`store`).
//! - **Deciding what "nothing parsed" means** for a run; that is the runner's call.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::ResultExtractor::fetch → PageSource::get
//!                                      ↘  specs::draws::parse_doc → ParsedPage
//!        → store::LedgerAppender::append_if_new (outside of specs)
//! ```
//!
//! ## Conventions & invariants
//! - Only a missing results table / number list is a page-level failure.
//! - Records come out in document order (newest first on the live site).
//! - A `DrawRecord` always has exactly three digits in `0..=9`.
//!
//! ## Testing notes
//! - Specs are tested **offline** against inline HTML snippets.
pub mod dates;
pub mod draws;
