//! Pagination of CDO v2 responses.
//!
//! Listing endpoints wrap results in an envelope:
//!
//! ```json
//! {"metadata": {"resultset": {"offset": 1, "count": 1234, "limit": 25}},
//!  "results": [...]}
//! ```
//!
//! where `count` is the total across all pages and `offset` is 1-based.
//! Fetch-by-ID requests return the bare entity object instead; both shapes
//! parse through [`Page::from_body`].

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::Result;

/// Resultset bookkeeping from the response envelope.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResultSet {
    /// 1-based offset of the first record on this page.
    pub offset: u64,
    /// Total number of records matching the query, across all pages.
    pub count: u64,
    /// Page size the server applied.
    pub limit: u64,
}

#[derive(Debug, Deserialize)]
struct PageMetadata {
    resultset: ResultSet,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Envelope<T> {
    #[serde(default)]
    metadata: Option<PageMetadata>,
    #[serde(default)]
    results: Vec<T>,
}

/// A page of results.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The records on this page.
    pub items: Vec<T>,
    /// 1-based offset of the first record on this page.
    pub offset: u64,
    /// Total records matching the query, if the envelope reported one.
    pub total: Option<u64>,
    /// Whether records remain beyond this page.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a page from items and the envelope's resultset, if any.
    #[must_use]
    pub fn new(items: Vec<T>, resultset: Option<ResultSet>) -> Self {
        let (offset, total) = match resultset {
            Some(rs) => (rs.offset.max(1), Some(rs.count)),
            None => (1, None),
        };
        let has_more = match total {
            Some(t) => {
                let seen = offset - 1 + items.len() as u64;
                !items.is_empty() && seen < t
            }
            None => false,
        };
        Self {
            items,
            offset,
            total,
            has_more,
        }
    }

    /// The 1-based offset a request for the next page should use.
    #[must_use]
    pub fn next_offset(&self) -> u64 {
        self.offset + self.items.len() as u64
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Parse a page from a response body.
    ///
    /// Accepts the listing envelope, a bare entity object (fetch-by-ID),
    /// or an empty object (the service's way of reporting zero matches).
    pub fn from_body(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;

        if value.get("results").is_some() || value.get("metadata").is_some() {
            let envelope: Envelope<T> = serde_json::from_value(value)?;
            return Ok(Self::new(
                envelope.results,
                envelope.metadata.map(|m| m.resultset),
            ));
        }

        if value.as_object().is_some_and(serde_json::Map::is_empty) {
            return Ok(Self::new(Vec::new(), None));
        }

        let single: T = serde_json::from_value(value)?;
        Ok(Self::new(vec![single], None))
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn test_parse_listing_envelope() {
        let body = r#"{
            "metadata": {"resultset": {"offset": 1, "count": 5, "limit": 2}},
            "results": [{"id": "A"}, {"id": "B"}]
        }"#;
        let page: Page<Row> = Page::from_body(body).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.offset, 1);
        assert_eq!(page.total, Some(5));
        assert!(page.has_more);
        assert_eq!(page.next_offset(), 3);
    }

    #[test]
    fn test_parse_final_page() {
        let body = r#"{
            "metadata": {"resultset": {"offset": 5, "count": 5, "limit": 2}},
            "results": [{"id": "E"}]
        }"#;
        let page: Page<Row> = Page::from_body(body).unwrap();
        assert!(!page.has_more);
    }

    #[test]
    fn test_parse_bare_entity() {
        let page: Page<Row> = Page::from_body(r#"{"id": "GHCND"}"#).unwrap();
        assert_eq!(page.items, vec![Row { id: "GHCND".to_string() }]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_parse_empty_object_as_no_matches() {
        let page: Page<Row> = Page::from_body("{}").unwrap();
        assert!(page.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_envelope_without_metadata() {
        let page: Page<Row> = Page::from_body(r#"{"results": [{"id": "A"}]}"#).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total, None);
        assert!(!page.has_more);
    }
}
