//! Persona and activity-template catalog.
//!
//! # Module Structure
//!
//! - `model`: catalog entries (`Persona`, `ActivityTemplate`, `LocalizedText`)
//! - `preset`: built-in entries used when no catalog file exists
//! - `repository`: source of the catalog (`CatalogRepository`)

mod model;
mod preset;
mod repository;

pub use model::{ActivityTemplate, Catalog, LocalizedText, Persona};
pub use preset::{default_catalog, default_personas, default_templates};
pub use repository::CatalogRepository;
