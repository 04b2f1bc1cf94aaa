//! The fetch pipeline for the content search API.
//!
//! - [`request`] - per-fetch configuration and URL building
//! - [`client`] - the HTTP GET behind the [`FeedClient`] trait
//! - [`parser`] - JSON response to [`Article`] values
//! - [`service`] - [`FeedService::fetch_articles`], the single entry point
//!
//! # Example
//!
//! ```ignore
//! use artfeed::feed::{FeedService, HttpFeedClient};
//!
//! let service = FeedService::new(HttpFeedClient::new()?);
//! let articles = service.fetch_articles(&request).await?;
//! ```

mod article;
mod client;
mod parser;
mod request;
mod service;

pub use article::Article;
pub use client::{FeedClient, FetchError, HttpFeedClient};
pub use parser::{parse_articles, ParseError, ParseResult};
pub use request::{FeedRequestConfig, OrderBy, DEFAULT_BASE_URL, DEFAULT_QUERY};
pub use service::{EmptyState, FeedError, FeedService};
