//! Response envelope shared by every endpoint

use serde::Serialize;

use crate::repository::{Paginated, Pagination};

/// Success envelope: `{success, message, data, pagination?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            pagination: None,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn paginated(message: impl Into<String>, page: Paginated<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: page.data,
            pagination: Some(page.pagination),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::PageRequest;

    #[test]
    fn test_pagination_omitted_when_absent() {
        let json = serde_json::to_value(ApiResponse::ok("ok", 3)).unwrap();
        assert_eq!(json["success"], true);
        assert!(json.get("pagination").is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let page = Paginated {
            data: vec!["a", "b"],
            pagination: Pagination::new(PageRequest { page: 2, limit: 2 }, 5),
        };
        let json = serde_json::to_value(ApiResponse::paginated("Records retrieved", page)).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["totalPages"], 3);
    }

    #[test]
    fn test_empty_page_is_still_a_success() {
        let page: Paginated<String> = Paginated {
            data: Vec::new(),
            pagination: Pagination::new(PageRequest { page: 1, limit: 10 }, 0),
        };
        let json = serde_json::to_value(ApiResponse::paginated("Search completed", page)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([]));
        assert_eq!(json["pagination"]["total"], 0);
        assert_eq!(json["pagination"]["totalPages"], 0);
    }
}
