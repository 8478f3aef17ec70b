//! Shared pagination types for list operations.
//!
//! List results are ordered by resource name. The continuation token is
//! opaque to callers: URL-safe base64 of the last name returned, so a page
//! stays stable when resources are added or removed between calls.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::errors::{AppMeshError, Result};

/// Upper bound of `limit` on resource list requests.
pub const MAX_LIST_LIMIT: i32 = 100;

/// Upper bound of `limit` on tag list requests.
pub const MAX_TAG_LIST_LIMIT: i32 = 50;

/// Decoded continuation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
    last_key: String,
}

impl PageToken {
    /// Token resuming after `last_key`.
    pub fn after(last_key: impl Into<String>) -> Self {
        Self { last_key: last_key.into() }
    }

    pub fn last_key(&self) -> &str {
        &self.last_key
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.last_key.as_bytes())
    }

    /// Parse a token previously produced by [`PageToken::encode`].
    pub fn decode(token: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| AppMeshError::bad_request_field("Invalid pagination token", "nextToken"))?;
        let last_key = String::from_utf8(bytes)
            .map_err(|_| AppMeshError::bad_request_field("Invalid pagination token", "nextToken"))?;
        if last_key.is_empty() {
            return Err(AppMeshError::bad_request_field("Invalid pagination token", "nextToken"));
        }
        Ok(Self { last_key })
    }
}

/// One page of a list result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Slice `items` into the page following `next_token`.
    ///
    /// `items` must already be sorted by `key`. A token is only returned
    /// when more items remain after this page.
    pub fn paginate<F>(items: Vec<T>, key: F, limit: usize, next_token: Option<&str>) -> Result<Self>
    where
        F: Fn(&T) -> &str,
    {
        let after = next_token.map(PageToken::decode).transpose()?;
        let limit = limit.max(1);

        let mut remaining = items
            .into_iter()
            .filter(|item| after.as_ref().map_or(true, |token| key(item) > token.last_key()))
            .peekable();

        let mut page = Vec::with_capacity(limit);
        while page.len() < limit {
            match remaining.next() {
                Some(item) => page.push(item),
                None => break,
            }
        }

        let next_token = match (remaining.peek(), page.last()) {
            (Some(_), Some(last)) => Some(PageToken::after(key(last)).encode()),
            _ => None,
        };

        Ok(Self { items: page, next_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("mesh-{i:02}")).collect()
    }

    #[test]
    fn test_token_is_opaque_and_reversible() {
        let token = PageToken::after("mesh-07");
        let encoded = token.encode();
        assert!(!encoded.contains("mesh"));
        assert_eq!(PageToken::decode(&encoded).unwrap(), token);
    }

    #[test]
    fn test_invalid_token_is_bad_request() {
        let err = PageToken::decode("%%%").unwrap_err();
        assert!(matches!(err, AppMeshError::BadRequest { field: Some(ref f), .. } if f == "nextToken"));
        assert!(PageToken::decode("").is_err());
    }

    #[test]
    fn test_walks_all_pages() {
        let items = names(5);
        let first = Page::paginate(items.clone(), |s| s.as_str(), 2, None).unwrap();
        assert_eq!(first.items, vec!["mesh-00", "mesh-01"]);

        let second =
            Page::paginate(items.clone(), |s| s.as_str(), 2, first.next_token.as_deref()).unwrap();
        assert_eq!(second.items, vec!["mesh-02", "mesh-03"]);

        let third = Page::paginate(items, |s| s.as_str(), 2, second.next_token.as_deref()).unwrap();
        assert_eq!(third.items, vec!["mesh-04"]);
        assert!(third.next_token.is_none());
    }

    #[test]
    fn test_exact_fit_has_no_token() {
        let page = Page::paginate(names(3), |s| s.as_str(), 3, None).unwrap();
        assert_eq!(page.items.len(), 3);
        assert!(page.next_token.is_none());
    }

    #[test]
    fn test_token_survives_deletion_of_last_key() {
        let token = PageToken::after("mesh-01").encode();
        let items: Vec<String> = names(4).into_iter().filter(|n| n != "mesh-01").collect();
        let page = Page::paginate(items, |s| s.as_str(), 10, Some(&token)).unwrap();
        assert_eq!(page.items, vec!["mesh-02", "mesh-03"]);
    }
}
