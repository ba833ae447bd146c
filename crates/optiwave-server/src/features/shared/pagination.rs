//! Shared pagination utilities
//!
//! Common pagination types used by list queries. Defaults match the catalog
//! contract: page 1, 10 items per page, limit clamped to 1-100.

use serde::{Deserialize, Serialize};

/// Common pagination request parameters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,

    /// Items per page. Defaults to 10, clamped to 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PaginationParams {
    /// Create new pagination parameters
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    /// Get the page number (1-indexed), defaulting to 1
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get items per page, defaulting to 10 and clamped to 1-100
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Calculate the offset for SQL OFFSET clause
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Validate pagination parameters
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(page) = self.page {
            if page < 1 {
                return Err("Page must be greater than 0");
            }
        }
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err("Limit must be between 1 and 100");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_custom_values() {
        let params = PaginationParams::new(Some(3), Some(25));
        assert_eq!(params.page(), 3);
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_clamping() {
        let params = PaginationParams::new(Some(-2), Some(500));
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_validation() {
        assert!(PaginationParams::new(Some(1), Some(50)).validate().is_ok());
        assert_eq!(
            PaginationParams::new(Some(0), Some(10)).validate(),
            Err("Page must be greater than 0")
        );
        assert_eq!(
            PaginationParams::new(Some(1), Some(101)).validate(),
            Err("Limit must be between 1 and 100")
        );
    }
}
