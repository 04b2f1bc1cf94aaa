use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU32;

use crate::util::{validate_url, UrlValidationError};

/// Default search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com/search";

/// Topic keyword sent as `q`.
pub const DEFAULT_QUERY: &str = "art";

/// Only contributor tags are requested; they carry the author name.
const SHOW_TAGS: &str = "contributor";

/// Sort order accepted by the search API's `order-by` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Relevance => "relevance",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to build one search request.
///
/// Supplied by the caller per fetch; nothing here is persisted by the feed
/// layer. The API key is masked in `Debug` output.
pub struct FeedRequestConfig {
    pub base_url: String,
    pub order_by: OrderBy,
    pub page_size: NonZeroU32,
    pub query: String,
    pub api_key: SecretString,
}

impl FeedRequestConfig {
    /// Builds the full request URL.
    ///
    /// Parameters are appended in a fixed order: `order-by`, `show-tags`,
    /// `page-size`, `q`, `api-key`. Any query string already present on
    /// `base_url` is kept in front of them.
    pub fn request_url(&self) -> Result<url::Url, UrlValidationError> {
        let mut url = validate_url(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("order-by", self.order_by.as_str())
            .append_pair("show-tags", SHOW_TAGS)
            .append_pair("page-size", &self.page_size.to_string())
            .append_pair("q", &self.query)
            .append_pair("api-key", self.api_key.expose_secret());
        Ok(url)
    }
}

impl fmt::Debug for FeedRequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedRequestConfig")
            .field("base_url", &self.base_url)
            .field("order_by", &self.order_by)
            .field("page_size", &self.page_size)
            .field("query", &self.query)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}
