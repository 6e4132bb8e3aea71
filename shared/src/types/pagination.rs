//! Pagination parameters for list endpoints

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum number of items per page
pub const MAX_LIMIT: u32 = 100;

/// Zero-indexed page/limit pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, starting at 0
    #[serde(default)]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Create a pagination, clamping the limit into `1..=MAX_LIMIT`
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Sanitize values coming from a request
    pub fn validate(self) -> Self {
        Self::new(self.page, self.limit)
    }

    /// Number of rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }

    /// Number of rows to take
    pub fn limit(&self) -> u64 {
        u64::from(self.limit)
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        let pagination = Pagination::new(3, 20);
        assert_eq!(pagination.offset(), 60);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(Pagination::new(0, 0).limit, 1);
        assert_eq!(Pagination::new(0, 5000).limit, MAX_LIMIT);
    }

    #[test]
    fn test_deserialize_defaults() {
        let pagination: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(pagination, Pagination::default());
    }
}
