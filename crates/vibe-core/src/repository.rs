//! Repository trait re-exports.
//!
//! Centralized access to every storage port.

pub use crate::catalog::CatalogRepository;
pub use crate::gallery::GalleryRepository;
pub use crate::session::SessionRepository;
