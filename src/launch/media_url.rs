//! Canonical media URL derived from the page address

use crate::utils::error::{Result, WatchPageError};
use crate::utils::sanitize_filename;
use std::fmt;
use url::Url;

/// Path segment that marks the watch page; the media lives at the same path without it
const WATCH_SEGMENT: &str = "/watch/";

/// A validated http(s) media URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrl(Url);

impl MediaUrl {
    /// Derive the media URL from the address of the watch page
    ///
    /// The first `/watch/` segment is dropped; the rest must parse as an
    /// absolute http or https URL.
    pub fn from_page_address(address: &str) -> Result<Self> {
        let candidate = address.trim().replacen(WATCH_SEGMENT, "/", 1);
        Self::parse(&candidate)
    }

    /// Parse an absolute http(s) URL as-is
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| WatchPageError::InvalidUrl(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(WatchPageError::InvalidUrl(format!("{}: unsupported scheme '{}'", raw, other))),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lower-cased extension of the last path segment, or `file`
    pub fn file_extension(&self) -> String {
        let path = self.0.path();
        match path.rfind('.') {
            Some(dot) if dot > 0 && dot < path.len() - 1 && !path[dot..].contains('/') => {
                path[dot + 1..].to_ascii_lowercase()
            }
            _ => "file".to_string(),
        }
    }

    /// File name offered to the browser's download prompt
    pub fn download_file_name(&self, display_name: Option<&str>) -> String {
        let stem = sanitize_filename(display_name.filter(|n| !n.trim().is_empty()).unwrap_or("file"));
        let stem = if stem.is_empty() { "file".to_string() } else { stem };
        format!("{}.{}", stem, self.file_extension())
    }
}

impl fmt::Display for MediaUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
