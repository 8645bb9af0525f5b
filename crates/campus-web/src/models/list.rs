//! Paginated list envelope shared by every list endpoint.

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::error::SchemaError;

/// `{ total, page, limit, data }` as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Total matching items across all pages.
    #[serde(default)]
    pub total: u64,

    /// Page number this response holds (1-based).
    #[serde(default = "first_page")]
    pub page: u32,

    /// Page size the server applied.
    #[serde(default)]
    pub limit: u32,

    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

fn first_page() -> u32 {
    1
}

impl<T> ListResponse<T> {
    /// Build a response (used by fakes and fixtures).
    #[must_use]
    pub fn new(total: u64, page: u32, limit: u32, data: Vec<T>) -> Self {
        Self { total, page, limit, data }
    }
}

impl<T: Validate> Validate for ListResponse<T> {
    fn validate(&self) -> Result<(), SchemaError> {
        if self.page == 0 {
            return Err(SchemaError::InvalidPage(self.page));
        }
        if self.limit > 0 && self.data.len() > self.limit as usize {
            return Err(SchemaError::OverLimit { count: self.data.len(), limit: self.limit });
        }
        if self.page == 1 && self.data.len() as u64 > self.total {
            return Err(SchemaError::OverTotal { count: self.data.len(), total: self.total });
        }
        for (index, item) in self.data.iter().enumerate() {
            item.validate().map_err(|e| SchemaError::at(index, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentItem;

    fn item(id: &str) -> serde_json::Value {
        serde_json::json!({"id": id, "slug": format!("item-{id}"), "title": "Title"})
    }

    #[test]
    fn test_decodes_with_defaults() {
        let list: ListResponse<ContentItem> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert_eq!(list.total, 0);
        assert_eq!(list.page, 1);
        assert!(list.validate().is_ok());
    }

    #[test]
    fn test_rejects_page_over_limit() {
        let json = serde_json::json!({"total": 10, "page": 2, "limit": 1, "data": [item("1"), item("2")]});
        let list: ListResponse<ContentItem> = serde_json::from_value(json).unwrap();
        assert_eq!(list.validate(), Err(SchemaError::OverLimit { count: 2, limit: 1 }));
    }

    #[test]
    fn test_rejects_first_page_over_total() {
        let json = serde_json::json!({"total": 1, "page": 1, "limit": 4, "data": [item("1"), item("2")]});
        let list: ListResponse<ContentItem> = serde_json::from_value(json).unwrap();
        assert!(matches!(list.validate(), Err(SchemaError::OverTotal { .. })));
    }

    #[test]
    fn test_reports_invalid_item_position() {
        let json = serde_json::json!({
            "total": 2, "page": 1, "limit": 4,
            "data": [item("1"), {"id": "2", "slug": "ok", "title": ""}]
        });
        let list: ListResponse<ContentItem> = serde_json::from_value(json).unwrap();
        let err = list.validate().unwrap_err();
        assert!(matches!(err, SchemaError::Item { index: 1, .. }));
    }
}
