// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling and image downloading.
//
// Pipeline for one page:
//   normalize -> fetch -> parse -> download images -> extract links -> push
//
// Submodules:
// - normalize: turns href/src values into absolute URLs (or rejects them)
// - fetch:     HTTP GET with the browser-like header set
// - document:  parsed page + link and image extractors
// - download:  image filtering, naming and writing
// - stop:      cancellation and deadline, shared by page and image fetches
// - engine:    the depth-first frontier walk tying it all together
// - run:       the spider program: output directory, crawl, optional JSON
// =============================================================================

mod document;
mod download;
mod engine;
mod fetch;
mod normalize;
mod run;
mod stop;

pub use document::PageDocument;
pub use download::{DownloadResult, ImageDownloader, ImageReference, PageImages};
pub use engine::{CrawlReport, CrawlTarget, Spider, VisitedSet};
pub use fetch::PageFetcher;
pub use normalize::normalize;
pub use run::run_spider;
pub use stop::{StopReason, StopSignal};
