//! Type definitions shared by the API layer
//!
//! - `pagination` - Page/limit parameters for list endpoints
//! - `response` - API response envelope and health checks

pub mod pagination;
pub mod response;

pub use pagination::Pagination;
pub use response::{ApiResponse, HealthResponse};
