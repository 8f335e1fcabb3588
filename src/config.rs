// src/config.rs
// =============================================================================
// Static configuration shared by the crawler and the inspector.
//
// The allow-list of image extensions and the browser-like header set are
// plain constants, and `CrawlConfig` carries copies of them so tests (or a
// future config file) can override any of them.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Raster formats the spider downloads and the scorpion inspects.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".gif", ".png", ".bmp"];

/// Headers sent with every request so servers treat us like a desktop browser.
///
/// `Accept-Encoding` is not listed: reqwest advertises gzip, deflate and br
/// itself and decodes the body transparently.
pub const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:118.0) Gecko/20100101 Firefox/118.0",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Referer", "https://www.google.com/"),
    ("Upgrade-Insecure-Requests", "1"),
];

pub const DEFAULT_SAVE_PATH: &str = "./spider";
pub const DEFAULT_DEPTH: i32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Everything the crawler needs to know besides the start URL and depth
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Directory images are written into (flat, no manifest)
    pub save_path: PathBuf,
    /// Header name/value pairs attached to every request
    pub headers: Vec<(String, String)>,
    /// Lowercase extensions including the leading dot
    pub image_extensions: Vec<String>,
    /// Upper bound for a single HTTP request
    pub request_timeout: Duration,
    /// Upper bound for the whole crawl, if any
    pub deadline: Option<Duration>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            image_extensions: IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            deadline: None,
        }
    }
}

impl CrawlConfig {
    pub fn with_save_path(mut self, save_path: impl Into<PathBuf>) -> Self {
        self.save_path = save_path.into();
        self
    }
}

// Case-insensitive suffix check against an extension allow-list
//
// Example:
//   has_image_extension("photo.JPG", &[".jpg"]) -> true
//   has_image_extension("logo.svg", &[".jpg"]) -> false
pub fn has_image_extension<S: AsRef<str>>(name: &str, extensions: &[S]) -> bool {
    let lowered = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lowered.ends_with(&ext.as_ref().to_lowercase()))
}
