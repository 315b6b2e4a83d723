//! Application layer for Vibe Studio.
//!
//! Use cases that coordinate the domain core with its collaborators: the
//! per-teacher session state machine, publishing, and gallery management.

pub mod gallery_usecase;
pub mod publish_usecase;
pub mod session;

pub use gallery_usecase::GalleryUseCase;
pub use publish_usecase::PublishUseCase;
pub use session::{CreateCommand, SessionController, SessionFactory};
