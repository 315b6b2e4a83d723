//! Domain core of Vibe Studio.
//!
//! Holds the applet and session models, the prompt composer and output
//! contract, and the traits every external collaborator implements.

pub mod applet;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gallery;
pub mod generation;
pub mod language;
pub mod publish;
pub mod repository;
pub mod session;

pub use error::{Result, ValidationError, VibeError};
pub use language::Language;
