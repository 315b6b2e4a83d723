pub mod catalog;
pub mod gallery;
pub mod roster;
pub mod session;
