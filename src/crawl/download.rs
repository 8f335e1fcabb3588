// src/crawl/download.rs
// =============================================================================
// Downloads the images referenced by one page.
//
// For every <img src> on the page:
// 1. Normalize the reference (same rules as links, see normalize.rs)
// 2. Keep it only if the URL path ends with an allowed raster extension
// 3. Name the file after the last path segment of the URL
// 4. Fetch the bytes and write them to <save_path>/<filename>
//
// A file with the same name is overwritten without warning, so two images
// called logo.png from different folders end up as one file (last wins).
// Every failure is logged and the next image is tried.
// =============================================================================

use std::path::{Path, PathBuf};

use serde::Serialize;
use url::Url;

use crate::config::{has_image_extension, CrawlConfig};
use crate::crawl::document::PageDocument;
use crate::crawl::fetch::PageFetcher;
use crate::crawl::normalize::normalize;
use crate::crawl::stop::StopSignal;
use crate::errors::CrawlError;

/// A resolved image URL and the filename it will be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub url: Url,
    pub filename: String,
}

/// Outcome of one image fetch-and-write. Failures are not retried.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadResult {
    Saved {
        url: String,
        path: PathBuf,
        bytes: usize,
    },
    Failed {
        url: String,
        reason: String,
    },
}

impl DownloadResult {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadResult::Saved { .. })
    }
}

impl ImageReference {
    // Builds a reference from a raw src value
    //
    // Returns None (after a debug log) when the src cannot be resolved, is
    // not an allowed raster format, or has no usable filename
    pub fn resolve(page_url: &Url, src: &str, extensions: &[String]) -> Option<Self> {
        let url = match normalize(page_url, src) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping image on {}: {}", page_url, e);
                return None;
            }
        };

        if !has_image_extension(url.path(), extensions) {
            tracing::debug!("Skipping non-raster image: {}", url);
            return None;
        }

        let filename = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default()
            .to_string();

        if filename.is_empty() || filename == "/" {
            tracing::info!("Skipping invalid image URL: {}", url);
            return None;
        }

        Some(Self { url, filename })
    }
}

/// Everything attempted on one page.
#[derive(Debug, Default)]
pub struct PageImages {
    pub results: Vec<DownloadResult>,
    /// True when the stop signal fired before every image was tried
    pub interrupted: bool,
}

#[derive(Debug, Clone)]
pub struct ImageDownloader {
    fetcher: PageFetcher,
    save_path: PathBuf,
    extensions: Vec<String>,
}

impl ImageDownloader {
    pub fn new(fetcher: PageFetcher, config: &CrawlConfig) -> Self {
        Self {
            fetcher,
            save_path: config.save_path.clone(),
            extensions: config.image_extensions.clone(),
        }
    }

    // Downloads every qualifying image on the page, in document order
    //
    // Stops early (without error) once `stop` fires; the images already
    // fetched are kept
    pub async fn download_page_images(
        &self,
        document: &PageDocument,
        stop: &StopSignal,
    ) -> PageImages {
        let references: Vec<ImageReference> = document
            .images()
            .filter_map(|src| ImageReference::resolve(document.url(), src, &self.extensions))
            .collect();

        tracing::info!(
            "Total image tags on {}: {}",
            document.url(),
            document.images().count()
        );

        let mut page = PageImages {
            results: Vec::with_capacity(references.len()),
            interrupted: false,
        };
        for reference in references {
            if stop.is_stopped() {
                page.interrupted = true;
                break;
            }
            page.results.push(self.download(&reference).await);
        }
        page
    }

    // Fetches one image and writes it, overwriting any existing file
    pub async fn download(&self, reference: &ImageReference) -> DownloadResult {
        let path = self.save_path.join(&reference.filename);

        match self.fetch_and_write(reference, &path).await {
            Ok(bytes) => {
                tracing::info!("Downloaded: {}", path.display());
                DownloadResult::Saved {
                    url: reference.url.to_string(),
                    path,
                    bytes,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to download: {}: {}", path.display(), e);
                DownloadResult::Failed {
                    url: reference.url.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn fetch_and_write(
        &self,
        reference: &ImageReference,
        path: &Path,
    ) -> Result<usize, CrawlError> {
        let bytes = self.fetcher.fetch_bytes(&reference.url).await?;

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|source| CrawlError::DownloadWrite {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IMAGE_EXTENSIONS;
    use httpmock::{Method::GET, MockServer};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn extensions() -> Vec<String> {
        IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
    }

    fn downloader(dir: &Path) -> ImageDownloader {
        let config = CrawlConfig::default().with_save_path(dir);
        let fetcher = PageFetcher::new(&config).unwrap();
        ImageDownloader::new(fetcher, &config)
    }

    #[test]
    fn test_root_relative_image_resolves_against_page_host() {
        let page = Url::parse("https://example.com/a/b").unwrap();
        let reference = ImageReference::resolve(&page, "/img/photo.png", &extensions()).unwrap();

        assert_eq!(reference.url.as_str(), "https://example.com/img/photo.png");
        assert_eq!(reference.filename, "photo.png");
    }

    #[test]
    fn test_filter_is_case_insensitive_and_fixed() {
        let page = Url::parse("https://example.com/").unwrap();

        assert!(ImageReference::resolve(&page, "/pics/CAT.JPG", &extensions()).is_some());
        assert!(ImageReference::resolve(&page, "/pics/logo.svg", &extensions()).is_none());
    }

    #[test]
    fn test_query_string_does_not_hide_extension() {
        let page = Url::parse("https://example.com/").unwrap();
        let reference = ImageReference::resolve(&page, "/a/b.gif?v=3", &extensions()).unwrap();

        assert_eq!(reference.filename, "b.gif");
    }

    // Same-page-relative paths are a known gap: they are never resolved
    #[test]
    fn test_relative_image_path_is_not_resolved() {
        let page = Url::parse("https://example.com/gallery/").unwrap();

        assert!(ImageReference::resolve(&page, "photo.png", &extensions()).is_none());
        assert!(ImageReference::resolve(&page, "./photo.png", &extensions()).is_none());
    }

    #[tokio::test]
    async fn test_downloads_only_allowed_formats() {
        let server = MockServer::start_async().await;
        let jpg = server
            .mock_async(|when, then| {
                when.method(GET).path("/img/CAT.JPG");
                then.status(200).body("jpeg-bytes");
            })
            .await;
        let svg = server
            .mock_async(|when, then| {
                when.method(GET).path("/img/logo.svg");
                then.status(200).body("<svg/>");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let page_url = Url::parse(&server.url("/page")).unwrap();
        let html = r#"<img src="/img/CAT.JPG"><img src="/img/logo.svg">"#;
        let doc = PageDocument::parse(&page_url, html.as_bytes()).unwrap();

        let results = downloader(dir.path())
            .download_page_images(&doc, &StopSignal::default())
            .await
            .results;

        jpg.assert_calls_async(1).await;
        svg.assert_calls_async(0).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].is_saved());
        assert_eq!(
            std::fs::read(dir.path().join("CAT.JPG")).unwrap(),
            b"jpeg-bytes"
        );
        assert!(!dir.path().join("logo.svg").exists());
    }

    #[tokio::test]
    async fn test_same_filename_last_writer_wins() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a/logo.png");
                then.status(200).body("first");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/b/logo.png");
                then.status(200).body("second");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let page_url = Url::parse(&server.url("/")).unwrap();
        let html = r#"<img src="/a/logo.png"><img src="/b/logo.png">"#;
        let doc = PageDocument::parse(&page_url, html.as_bytes()).unwrap();

        let results = downloader(dir.path())
            .download_page_images(&doc, &StopSignal::default())
            .await
            .results;

        assert_eq!(results.iter().filter(|r| r.is_saved()).count(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("logo.png")).unwrap(),
            "second"
        );
    }

    #[tokio::test]
    async fn test_failed_image_does_not_stop_the_page() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken.png");
                then.status(500);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ok.png");
                then.status(200).body("png");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let page_url = Url::parse(&server.url("/")).unwrap();
        let html = r#"<img src="/broken.png"><img src="/ok.png">"#;
        let doc = PageDocument::parse(&page_url, html.as_bytes()).unwrap();

        let results = downloader(dir.path())
            .download_page_images(&doc, &StopSignal::default())
            .await
            .results;

        assert!(matches!(results[0], DownloadResult::Failed { .. }));
        assert!(results[1].is_saved());
        assert!(dir.path().join("ok.png").exists());
    }

    #[tokio::test]
    async fn test_missing_directory_is_write_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/x.bmp");
                then.status(200).body("bmp");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let downloader = downloader(&dir.path().join("does-not-exist"));
        let reference = ImageReference {
            url: Url::parse(&server.url("/x.bmp")).unwrap(),
            filename: "x.bmp".to_string(),
        };

        match downloader.download(&reference).await {
            DownloadResult::Failed { reason, .. } => assert!(reason.contains("Failed to write")),
            other => panic!("expected a write failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deadline_stops_between_images() {
        let server = MockServer::start_async().await;
        let mut mocks = Vec::new();
        for name in ["a", "b", "c", "d"] {
            let mock = server
                .mock_async(|when, then| {
                    when.method(GET).path(format!("/{name}.png"));
                    then.status(200)
                        .body("png")
                        .delay(Duration::from_millis(300));
                })
                .await;
            mocks.push(mock);
        }

        let dir = tempfile::tempdir().unwrap();
        let page_url = Url::parse(&server.url("/")).unwrap();
        let html = r#"<img src="/a.png"><img src="/b.png"><img src="/c.png"><img src="/d.png">"#;
        let doc = PageDocument::parse(&page_url, html.as_bytes()).unwrap();
        let stop = StopSignal::default().with_limit(Some(Duration::from_millis(450)));

        let page = downloader(dir.path()).download_page_images(&doc, &stop).await;

        assert!(page.interrupted);
        assert!(!page.results.is_empty());
        assert!(page.results.len() < 4);
        mocks[3].assert_calls_async(0).await;
        assert!(!dir.path().join("d.png").exists());
    }

    #[tokio::test]
    async fn test_cancelled_token_skips_downloads() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/a.png");
                then.status(200).body("png");
            })
            .await;

        let dir = tempfile::tempdir().unwrap();
        let page_url = Url::parse(&server.url("/")).unwrap();
        let doc = PageDocument::parse(&page_url, br#"<img src="/a.png">"#).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let page = downloader(dir.path())
            .download_page_images(&doc, &StopSignal::new(cancel))
            .await;

        assert!(page.interrupted);
        assert!(page.results.is_empty());
        mock.assert_calls_async(0).await;
    }
}
