//! File-backed storage primitives.

mod atomic_toml;
mod json_dir;

pub use atomic_toml::AtomicTomlFile;
pub use json_dir::JsonDirStorage;
