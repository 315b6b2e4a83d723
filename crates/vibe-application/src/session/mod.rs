//! Session application services.
//!
//! The per-teacher state machine and the factory that wires it up.

mod controller;
mod factory;

pub use controller::{CreateCommand, SessionController};
pub use factory::SessionFactory;
