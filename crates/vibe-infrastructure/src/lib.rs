//! Storage and identity adapters for Vibe Studio.

pub mod config_service;
pub mod dir_gallery_repository;
pub mod dir_session_repository;
pub mod local_object_store;
pub mod memory;
pub mod paths;
pub mod roster_gate;
pub mod storage;
pub mod toml_catalog_repository;

pub use crate::config_service::ConfigService;
pub use crate::dir_gallery_repository::DirGalleryRepository;
pub use crate::dir_session_repository::DirSessionRepository;
pub use crate::local_object_store::LocalObjectStore;
pub use crate::memory::{InMemoryGalleryRepository, InMemorySessionRepository};
pub use crate::paths::VibePaths;
pub use crate::roster_gate::{Roster, RosterAuthorizationGate};
pub use crate::toml_catalog_repository::TomlCatalogRepository;
