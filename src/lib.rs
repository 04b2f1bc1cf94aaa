//! Terminal reader for the Guardian content search API.
//!
//! The library is split along the fetch pipeline:
//!
//! - [`feed`] - request building, HTTP fetching, JSON parsing and the
//!   [`feed::FeedService`] that ties them together
//! - [`theme`] - category to color mapping for the article list
//! - [`util`] - URL validation and terminal text helpers
//! - [`config`] - the optional `config.toml` file
//! - [`app`] / [`ui`] - the terminal front-end

pub mod app;
pub mod config;
pub mod feed;
pub mod theme;
pub mod ui;
pub mod util;
