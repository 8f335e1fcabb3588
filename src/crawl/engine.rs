// src/crawl/engine.rs
// =============================================================================
// The traversal engine: a depth-first, depth-limited walk over the link graph.
//
// How it works:
// 1. Push the start URL onto the frontier with the full depth budget
// 2. Pop a target; skip it if its budget is used up or it was already visited
// 3. Mark it visited, fetch it once, parse it once
// 4. Download the page's images (at every depth, not just the first page)
// 5. Normalize the page's links and push the unvisited ones with budget - 1
// 6. Repeat until the frontier is empty, the crawl is cancelled, or the
//    deadline passes
//
// The frontier is an explicit stack. Children are pushed in reverse so the
// first link on a page is popped first, and its whole subtree is explored
// before the second link is looked at. That is the same order a recursive
// walk would produce, without growing the call stack.
//
// Failures are isolated: a page that cannot be fetched or parsed is logged
// and its subtree is abandoned; the rest of the crawl carries on.
// =============================================================================

use std::collections::HashSet;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::CrawlConfig;
use crate::crawl::document::PageDocument;
use crate::crawl::download::{DownloadResult, ImageDownloader};
use crate::crawl::fetch::PageFetcher;
use crate::crawl::normalize::normalize;
use crate::crawl::stop::StopSignal;
use crate::errors::CrawlError;

/// An absolute URL plus the number of link-hops still allowed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,
    pub depth: i32,
}

/// URLs already expanded during this crawl.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<Url>,
}

impl VisitedSet {
    pub fn contains(&self, url: &Url) -> bool {
        self.urls.contains(url)
    }

    /// Check-and-insert in one step; `true` means the caller now owns the URL.
    pub fn insert_new(&mut self, url: &Url) -> bool {
        self.urls.insert(url.clone())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

// LIFO stack of discovered-but-not-yet-expanded targets
#[derive(Debug, Default)]
struct Frontier {
    stack: Vec<CrawlTarget>,
}

impl Frontier {
    fn push(&mut self, target: CrawlTarget) {
        self.stack.push(target);
    }

    // Pushes one page's children so that the first one is popped first
    fn push_children(&mut self, children: Vec<CrawlTarget>) {
        self.stack.extend(children.into_iter().rev());
    }

    fn pop(&mut self) -> Option<CrawlTarget> {
        self.stack.pop()
    }
}

/// Summary of one crawl, printed with `--json`.
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    /// Pages fetched and parsed, in expansion order
    pub pages: Vec<String>,
    /// Pages whose fetch or parse failed
    pub failed_pages: Vec<String>,
    /// One entry per attempted image download
    pub images: Vec<DownloadResult>,
    /// True when the crawl stopped on cancellation or deadline
    pub cancelled: bool,
}

impl CrawlReport {
    pub fn images_saved(&self) -> usize {
        self.images.iter().filter(|image| image.is_saved()).count()
    }
}

pub struct Spider {
    fetcher: PageFetcher,
    downloader: ImageDownloader,
    deadline: Option<std::time::Duration>,
    cancel: CancellationToken,
}

impl Spider {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let fetcher = PageFetcher::new(config)?;
        let downloader = ImageDownloader::new(fetcher.clone(), config);

        Ok(Self {
            fetcher,
            downloader,
            deadline: config.deadline,
            cancel: CancellationToken::new(),
        })
    }

    /// Use an externally owned token, e.g. one cancelled on Ctrl-C.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    // Crawls from `start`, following links while the depth budget lasts
    //
    // Parameters:
    //   start: the origin URL
    //   depth: link-hop budget; 1 means "only the start page", < 1 means nothing
    //
    // Never fails: every error is logged and recorded in the report
    pub async fn crawl(&self, start: Url, depth: i32) -> CrawlReport {
        let stop = StopSignal::new(self.cancel.clone()).with_limit(self.deadline);
        let mut visited = VisitedSet::default();
        let mut frontier = Frontier::default();
        let mut report = CrawlReport::default();

        frontier.push(CrawlTarget { url: start, depth });

        while let Some(target) = frontier.pop() {
            if target.depth < 1 || !visited.insert_new(&target.url) {
                continue;
            }

            if let Some(reason) = stop.check() {
                tracing::warn!("{}", reason);
                report.cancelled = true;
                break;
            }

            let document = match self.expand(&target.url).await {
                Ok(document) => document,
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.failed_pages.push(target.url.to_string());
                    continue;
                }
            };
            report.pages.push(target.url.to_string());

            let images = self.downloader.download_page_images(&document, &stop).await;
            report.images.extend(images.results);
            if images.interrupted {
                if let Some(reason) = stop.check() {
                    tracing::warn!("{}", reason);
                }
                report.cancelled = true;
                break;
            }

            let children = self.children_of(&document, target.depth - 1, &visited);
            frontier.push_children(children);
        }

        tracing::info!(
            "Crawl finished: {} page(s), {} failed, {} image(s) saved",
            report.pages.len(),
            report.failed_pages.len(),
            report.images_saved()
        );

        report
    }

    // Fetches and parses one page
    async fn expand(&self, url: &Url) -> Result<PageDocument, CrawlError> {
        tracing::debug!("Fetching {}", url);
        let body = self.fetcher.fetch_page(url).await?;
        PageDocument::parse(url, &body)
    }

    // Normalizes a page's links into targets one hop further down
    fn children_of(
        &self,
        document: &PageDocument,
        depth: i32,
        visited: &VisitedSet,
    ) -> Vec<CrawlTarget> {
        let links: Vec<&str> = document.links().collect();
        tracing::info!("Total links on {}: {}", document.url(), links.len());

        if depth < 1 {
            return Vec::new();
        }

        links
            .into_iter()
            .filter_map(|href| match normalize(document.url(), href) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Skipping link on {}: {}", document.url(), e);
                    None
                }
            })
            .filter(|url| !visited.contains(url))
            .map(|url| CrawlTarget { url, depth })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a Vec as the frontier instead of recursion?
//    - Vec::push / Vec::pop make a stack (last in, first out)
//    - A stack visits nodes in the same depth-first order as recursion
//    - The depth budget lives in each CrawlTarget, not in the call stack,
//      so a very deep site cannot overflow the thread's stack
//
// 2. What does insert_new return?
//    - HashSet::insert returns false if the value was already there
//    - Checking and marking in one call means there is no window where a URL
//      is "checked but not yet marked"
//
// 3. What is a CancellationToken?
//    - A cheap, cloneable flag from tokio-util
//    - One clone lives in the Ctrl-C task, another in the Spider
//    - The StopSignal wraps it together with the deadline and is asked
//      before every page and every image fetch
//
// 4. Why is depth an i32 and not a usize?
//    - Users may pass -l 0 or -l -1; both simply mean "fetch nothing"
//    - A signed type lets "depth < 1" cover all of those cases
// -----------------------------------------------------------------------------
