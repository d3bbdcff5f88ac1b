//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use rollcall_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Items per page (default: 25, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    25
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PaginationParams {
    /// Converts to a `PageRequest`, clamping out-of-range values.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest {
            page: self.page.max(1),
            page_size: self.per_page.clamp(1, 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_out_of_range() {
        let req = PaginationParams {
            page: 0,
            per_page: 9999,
        }
        .into_page_request();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 100);
    }

    #[test]
    fn test_defaults() {
        let req = PaginationParams::default().into_page_request();
        assert_eq!(req.page, 1);
        assert_eq!(req.page_size, 25);
    }
}
