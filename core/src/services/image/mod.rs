//! Image service module
//!
//! Generation through an external provider, visibility rules, favorites and
//! publishing of generated images.

mod service;
mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;


pub use service::ImageService;
pub use traits::{ImageGenerator, ImageStorage};
