//! Image route handlers

pub mod favorite;
pub mod generate;
pub mod view;
pub mod visibility;

pub use favorite::{add_favorite, is_favorite, remove_favorite};
pub use generate::generate;
pub use view::{get_image, list_public};
pub use visibility::{publish, unpublish};
