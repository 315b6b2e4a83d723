//! Session domain module.
//!
//! This module contains all session-related domain models, repository interfaces,
//! and the pure state transitions the session controller builds on.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`)
//! - `message`: Conversation log types (`Speaker`, `ConversationEntry`)
//! - `state`: Lifecycle states (`SessionState`)
//! - `snapshot`: Persisted form of a session (`SessionSnapshot`)
//! - `repository`: Repository trait for session persistence

mod message;
mod model;
mod repository;
mod snapshot;
mod state;

pub use message::{ConversationEntry, Speaker};
pub use model::Session;
pub use repository::{SessionFilter, SessionRepository};
pub use snapshot::{SessionSnapshot, StoredMessage};
pub use state::SessionState;
