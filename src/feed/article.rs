/// One normalized article from the search feed.
///
/// Built once by the parser and never mutated afterwards. `published_at`
/// keeps the API's timestamp text verbatim; formatting for display happens
/// in [`crate::util::format_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    category: String,
    title: String,
    published_at: String,
    url: String,
    author: Option<String>,
}

impl Article {
    pub fn new(
        category: impl Into<String>,
        title: impl Into<String>,
        published_at: impl Into<String>,
        url: impl Into<String>,
        author: Option<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            published_at: published_at.into(),
            url: url.into(),
            author,
        }
    }

    /// Section name, e.g. "Art and design".
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set only when the record carried exactly one contributor tag.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }
}
