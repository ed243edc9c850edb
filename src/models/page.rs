use serde::Deserialize;

use crate::error::{Result, SyncError};
use crate::models::RawStationRecord;

/// One page of the collection's list endpoint, as it arrives on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub total_items: Option<i64>,
    pub total_pages: Option<i64>,
    pub items: Option<Vec<RawStationRecord>>,
}

/// A validated page: the records plus the page count declared alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<RawStationRecord>,
}

impl RecordPage {
    pub fn new(page: u32, total_pages: u32, items: Vec<RawStationRecord>) -> Self {
        Self {
            page,
            total_pages,
            items,
        }
    }
}

impl PageResponse {
    pub fn into_page(self, requested_page: u32) -> Result<RecordPage> {
        let items = self.items.ok_or_else(|| {
            SyncError::MalformedResponse(format!("page {} has no 'items' field", requested_page))
        })?;

        let total_pages = self.total_pages.ok_or_else(|| {
            SyncError::MalformedResponse(format!(
                "page {} has no 'totalPages' field",
                requested_page
            ))
        })?;

        let total_pages = u32::try_from(total_pages).map_err(|_| {
            SyncError::MalformedResponse(format!(
                "page {} declares invalid totalPages {}",
                requested_page, total_pages
            ))
        })?;

        Ok(RecordPage::new(
            self.page.unwrap_or(requested_page),
            total_pages,
            items,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_page() {
        let body = r#"{"page":2,"perPage":500,"totalItems":1010,"totalPages":3,"items":[{"lat":1,"lon":2}]}"#;
        let response: PageResponse = serde_json::from_str(body).unwrap();
        let page = response.into_page(2).unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_missing_total_pages_is_malformed() {
        let response: PageResponse = serde_json::from_str(r#"{"items":[]}"#).unwrap();
        assert!(matches!(
            response.into_page(1),
            Err(SyncError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_missing_items_is_malformed() {
        let response: PageResponse = serde_json::from_str(r#"{"totalPages":1}"#).unwrap();
        assert!(matches!(
            response.into_page(1),
            Err(SyncError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_negative_total_pages_is_malformed() {
        let response: PageResponse =
            serde_json::from_str(r#"{"items":[],"totalPages":-1}"#).unwrap();
        assert!(response.into_page(1).is_err());
    }

    #[test]
    fn test_empty_collection() {
        let response: PageResponse =
            serde_json::from_str(r#"{"page":1,"items":[],"totalPages":0}"#).unwrap();
        let page = response.into_page(1).unwrap();
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
