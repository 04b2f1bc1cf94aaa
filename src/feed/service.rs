use thiserror::Error;

use super::article::Article;
use super::client::{FeedClient, FetchError};
use super::parser::{parse_articles, ParseError};
use super::request::FeedRequestConfig;

/// Any failure of a full fetch: request, transport or document shape.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// What the list shows when there is nothing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The request never produced a usable response
    NoConnection,
    /// A response arrived but held no articles
    NoArticles,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoConnection => "No connection",
            Self::NoArticles => "No articles found",
        }
    }
}

impl FeedError {
    pub fn empty_state(&self) -> EmptyState {
        match self {
            Self::Fetch(_) => EmptyState::NoConnection,
            Self::Parse(_) => EmptyState::NoArticles,
        }
    }
}

/// Runs one complete fetch: build URL, GET, parse.
///
/// Holds no state besides its client, so a single service can serve any
/// number of concurrent callers.
#[derive(Debug, Clone)]
pub struct FeedService<C> {
    client: C,
}

impl<C: FeedClient> FeedService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetches one page of articles for `config`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if `config.base_url` is unusable
    /// - any other [`FetchError`] from the client
    /// - [`ParseError::MalformedDocument`] if the body is not a search response
    pub async fn fetch_articles(
        &self,
        config: &FeedRequestConfig,
    ) -> Result<Vec<Article>, FeedError> {
        let url = config.request_url().map_err(FetchError::from)?;
        let body = self.client.fetch(url.as_str()).await?;
        let parsed = parse_articles(Some(&body))?;

        if parsed.skipped > 0 {
            tracing::warn!(
                skipped = parsed.skipped,
                kept = parsed.articles.len(),
                "Search results with missing fields skipped"
            );
        }
        tracing::info!(
            count = parsed.articles.len(),
            order_by = %config.order_by,
            "Fetched articles"
        );

        Ok(parsed.articles)
    }
}
