use serde::Deserialize;
use thiserror::Error;

use super::article::Article;

/// The document as a whole could not be interpreted.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Not JSON, or missing the `response.results` array
    #[error("Malformed search response: {0}")]
    MalformedDocument(#[from] serde_json::Error),
}

/// Articles recovered from one response, plus how many records were dropped.
#[derive(Debug, Default)]
pub struct ParseResult {
    pub articles: Vec<Article>,
    pub skipped: usize,
}

#[derive(Deserialize)]
struct Envelope {
    response: SearchResponse,
}

#[derive(Deserialize)]
struct SearchResponse {
    // Records are decoded one by one so a bad record doesn't sink the page
    results: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultRecord {
    section_name: String,
    web_title: String,
    web_publication_date: String,
    web_url: String,
    // Tag contents never sink a record; only the single-tag author is read
    #[serde(default)]
    tags: Vec<serde_json::Value>,
}

impl From<ResultRecord> for Article {
    fn from(record: ResultRecord) -> Self {
        // Several contributors is treated the same as none
        let author = match record.tags.as_slice() {
            [tag] => tag
                .get("webTitle")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        Article::new(
            record.section_name,
            record.web_title,
            record.web_publication_date,
            record.web_url,
            author,
        )
    }
}

/// Parses a search response body into articles, in source order.
///
/// `None`, empty and whitespace-only input yield an empty result. A
/// document without a `response.results` array is rejected as a whole with
/// [`ParseError::MalformedDocument`]. Individual records missing
/// `sectionName`, `webTitle`, `webPublicationDate` or `webUrl` (or whose
/// `tags` is not an array) are skipped and counted in
/// [`ParseResult::skipped`].
pub fn parse_articles(raw: Option<&str>) -> Result<ParseResult, ParseError> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(ParseResult::default());
    };

    let envelope: Envelope = serde_json::from_str(raw).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse search response");
        ParseError::MalformedDocument(e)
    })?;

    let records = envelope.response.results;
    let mut result = ParseResult {
        articles: Vec::with_capacity(records.len()),
        skipped: 0,
    };

    for (index, value) in records.into_iter().enumerate() {
        match serde_json::from_value::<ResultRecord>(value) {
            Ok(record) => result.articles.push(record.into()),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed search result");
                result.skipped += 1;
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(section: &str, title: &str, tags: &str) -> String {
        format!(
            r#"{{"sectionName":"{section}","webTitle":"{title}","webPublicationDate":"2018-05-09T16:49:09Z","webUrl":"https://www.theguardian.com/{title}","tags":{tags}}}"#
        )
    }

    fn document(records: &[String]) -> String {
        format!(
            r#"{{"response":{{"status":"ok","results":[{}]}}}}"#,
            records.join(",")
        )
    }

    #[test]
    fn test_empty_and_absent_input() {
        assert!(parse_articles(None).unwrap().articles.is_empty());
        assert!(parse_articles(Some("")).unwrap().articles.is_empty());
        assert!(parse_articles(Some("  \n\t")).unwrap().articles.is_empty());
    }

    #[test]
    fn test_fields_mapped() {
        let raw = document(&[record(
            "Art and design",
            "frieze",
            r#"[{"id":"profile/someone","webTitle":"Jonathan Jones"}]"#,
        )]);
        let result = parse_articles(Some(&raw)).unwrap();

        assert_eq!(
            result.articles,
            vec![Article::new(
                "Art and design",
                "frieze",
                "2018-05-09T16:49:09Z",
                "https://www.theguardian.com/frieze",
                Some("Jonathan Jones".to_string()),
            )]
        );
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_source_order_preserved() {
        let records: Vec<String> = (0..7)
            .map(|i| record("Culture", &format!("title-{i}"), "[]"))
            .collect();
        let result = parse_articles(Some(&document(&records))).unwrap();

        let titles: Vec<&str> = result.articles.iter().map(|a| a.title()).collect();
        assert_eq!(
            titles,
            vec!["title-0", "title-1", "title-2", "title-3", "title-4", "title-5", "title-6"]
        );
    }

    #[test]
    fn test_author_only_for_single_tag() {
        let raw = document(&[
            record("Film", "none", "[]"),
            record("Film", "one", r#"[{"webTitle":"Peter Bradshaw"}]"#),
            record(
                "Film",
                "two",
                r#"[{"webTitle":"Peter Bradshaw"},{"webTitle":"Mark Kermode"}]"#,
            ),
        ]);
        let articles = parse_articles(Some(&raw)).unwrap().articles;

        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].author(), None);
        assert_eq!(articles[1].author(), Some("Peter Bradshaw"));
        assert_eq!(articles[2].author(), None);
    }

    #[test]
    fn test_missing_tags_means_no_author() {
        let raw = r#"{"response":{"results":[{"sectionName":"Music","webTitle":"t","webPublicationDate":"d","webUrl":"u"}]}}"#;
        let articles = parse_articles(Some(raw)).unwrap().articles;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].author(), None);
    }

    #[test]
    fn test_single_tag_without_title_means_no_author() {
        let raw = document(&[record("Music", "t", r#"[{"id":"x"}]"#)]);
        let articles = parse_articles(Some(&raw)).unwrap().articles;
        assert_eq!(articles[0].author(), None);
    }

    #[test]
    fn test_malformed_tag_keeps_article() {
        let raw = document(&[
            record("Music", "numeric", r#"[{"webTitle":5}]"#),
            record("Music", "scalar", r#"["Alexis Petridis"]"#),
            record(
                "Music",
                "mixed",
                r#"[{"webTitle":"Alexis Petridis"},{"webTitle":5}]"#,
            ),
        ]);
        let result = parse_articles(Some(&raw)).unwrap();

        let titles: Vec<&str> = result.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["numeric", "scalar", "mixed"]);
        assert!(result.articles.iter().all(|a| a.author().is_none()));
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_non_array_tags_skips_record() {
        let raw = document(&[
            record("Music", "object", r#"{"webTitle":"Alexis Petridis"}"#),
            record("Music", "kept", "[]"),
        ]);
        let result = parse_articles(Some(&raw)).unwrap();
        assert_eq!(result.articles.len(), 1);
        assert_eq!(result.articles[0].title(), "kept");
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_malformed_record_skipped() {
        let raw = format!(
            r#"{{"response":{{"results":[{},{{"sectionName":"Opinion","webUrl":"u"}},{},42]}}}}"#,
            record("Opinion", "first", "[]"),
            record("Opinion", "last", "[]"),
        );
        let result = parse_articles(Some(&raw)).unwrap();

        let titles: Vec<&str> = result.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["first", "last"]);
        assert_eq!(result.skipped, 2);
    }

    #[test]
    fn test_wrong_field_type_skips_record() {
        let raw = r#"{"response":{"results":[{"sectionName":7,"webTitle":"t","webPublicationDate":"d","webUrl":"u","tags":[]}]}}"#;
        let result = parse_articles(Some(raw)).unwrap();
        assert!(result.articles.is_empty());
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn test_malformed_document_rejected() {
        for raw in [
            "not json",
            "[]",
            "null",
            r#"{"message":"Unauthorized"}"#,
            r#"{"response":{}}"#,
            r#"{"response":{"results":{}}}"#,
            r#"{"response":{"results":[{"sectionName":"#,
        ] {
            assert!(
                matches!(parse_articles(Some(raw)), Err(ParseError::MalformedDocument(_))),
                "expected MalformedDocument for {raw:?}"
            );
        }
    }

    #[test]
    fn test_empty_results_array() {
        let result = parse_articles(Some(r#"{"response":{"results":[]}}"#)).unwrap();
        assert!(result.articles.is_empty());
        assert_eq!(result.skipped, 0);
    }
}
