use serde::{Deserialize, Serialize};

/// Pagination block attached to paged list responses.
///
/// The backend reports it in two spellings depending on the endpoint:
/// `{total, pageNumber, pageSize, totalPages}` and
/// `{total, page, limit, totalPages}`. Both decode into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WirePagination {
    pub total: u64,
    #[serde(alias = "pageNumber")]
    pub page: u32,
    #[serde(rename = "pageSize", alias = "limit")]
    pub page_size: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

impl Default for WirePagination {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            page_size: 0,
            total_pages: 0,
        }
    }
}

/// One page of a server-paginated collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<WirePagination>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pagination: WirePagination) -> Self {
        Self {
            items,
            pagination: Some(pagination),
        }
    }

    /// A page for endpoints that return the full collection unpaged.
    pub fn unpaged(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_page_number_spelling() {
        let p: WirePagination = serde_json::from_str(
            r#"{"total":25,"pageNumber":2,"pageSize":10,"totalPages":3}"#,
        )
        .unwrap();
        assert_eq!((p.total, p.page, p.page_size, p.total_pages), (25, 2, 10, 3));
    }

    #[test]
    fn decodes_page_limit_spelling() {
        let p: WirePagination = serde_json::from_str(
            r#"{"total":4,"page":1,"limit":50,"totalPages":1}"#,
        )
        .unwrap();
        assert_eq!((p.page, p.page_size), (1, 50));
    }

    #[test]
    fn missing_fields_fall_back_to_first_empty_page() {
        let p: WirePagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p, WirePagination::default());
    }
}
