//! Application state for the article list screen.

use std::time::{Duration, Instant};

use crate::feed::{Article, EmptyState, FeedError};

/// How long a status message stays in the status bar.
const STATUS_TTL: Duration = Duration::from_secs(5);

/// Results delivered from background tasks to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    ArticlesLoaded(Result<Vec<Article>, FeedError>),
}

/// State of the list screen.
pub struct App {
    pub articles: Vec<Article>,
    pub selected: usize,
    /// A fetch is in flight.
    pub loading: bool,
    /// Why the list is empty after the last fetch, if it is.
    pub empty_state: Option<EmptyState>,
    pub status_message: Option<(String, Instant)>,
    pub needs_redraw: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            articles: Vec::new(),
            selected: 0,
            loading: false,
            empty_state: None,
            status_message: None,
            needs_redraw: true,
        }
    }

    /// Replace the list with the outcome of a fetch.
    ///
    /// On error the list is cleared and the error kind decides which empty
    /// state is shown.
    pub fn apply_fetch_result(&mut self, result: Result<Vec<Article>, FeedError>) {
        self.loading = false;
        self.selected = 0;
        self.needs_redraw = true;

        match result {
            Ok(articles) => {
                self.empty_state = articles.is_empty().then_some(EmptyState::NoArticles);
                self.articles = articles;
                self.status_message = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Article fetch failed");
                self.articles.clear();
                self.empty_state = Some(e.empty_state());
                self.set_status(format!("Error: {}", e));
            }
        }
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.articles.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.articles.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.articles.len().saturating_sub(1);
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Drop an expired status message. Returns true if one was cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        match &self.status_message {
            Some((_, set_at)) if set_at.elapsed() >= STATUS_TTL => {
                self.status_message = None;
                true
            }
            _ => false,
        }
    }

    /// Text for the empty list placeholder.
    pub fn placeholder(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else {
            self.empty_state.map_or("", EmptyState::message)
        }
    }
}
