//! Avatar image API abstraction
//!
//! Provides the request model for the external avatar generator and a common
//! interface for fetching rendered images.

mod client;
mod error;

pub use client::DicebearClient;
pub use error::FetchError;

use async_trait::async_trait;
use bytes::Bytes;
use std::fmt;
use std::sync::Arc;

/// Style that historically defaulted to a transparent background on the API
/// side; the explicit flag is preserved for it when no color is chosen.
pub const DEFAULT_STYLE: &str = "avataaars";

/// Output format offered by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Path segment and file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A fully assembled avatar request. `background_color` holds a resolved
/// hex code (no `#`), never a raw color name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarRequest {
    pub style: String,
    pub seed: String,
    pub format: ImageFormat,
    pub background_color: Option<String>,
}

impl AvatarRequest {
    /// Build the request URL: `<base>/<style>/<format>?seed=<seed>` plus
    /// either `backgroundColor=<hex>` or, for the default style with no
    /// color, the legacy `transparent=true` flag.
    pub fn url(&self, base: &str) -> Result<reqwest::Url, FetchError> {
        let endpoint = format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            self.style,
            self.format.extension()
        );
        let mut url = reqwest::Url::parse(&endpoint)
            .map_err(|e| FetchError::invalid_url(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("seed", &self.seed);
            if let Some(color) = &self.background_color {
                pairs.append_pair("backgroundColor", color);
            } else if self.style.eq_ignore_ascii_case(DEFAULT_STYLE) {
                pairs.append_pair("transparent", "true");
            }
        }
        Ok(url)
    }

    /// Attachment filename for the delivered image.
    pub fn filename(&self) -> String {
        format!("{}.{}", self.seed, self.format.extension())
    }
}

/// Common interface for avatar image providers
#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    /// Perform a single fetch for the given request. No retries; the full
    /// response body is buffered before returning.
    async fn fetch(&self, request: &AvatarRequest) -> Result<Bytes, FetchError>;
}

#[async_trait]
impl<T: AvatarFetcher + ?Sized> AvatarFetcher for Arc<T> {
    async fn fetch(&self, request: &AvatarRequest) -> Result<Bytes, FetchError> {
        (**self).fetch(request).await
    }
}
