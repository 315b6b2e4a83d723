//! Gallery domain module.
//!
//! Published applets, their attribution, and the store they live in.

mod model;
mod repository;

pub use model::{GalleryEntry, GalleryMetadataUpdate};
pub use repository::{GalleryFilter, GalleryRepository};
