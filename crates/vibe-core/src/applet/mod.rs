//! Applet domain module.
//!
//! An applet is the artifact a teacher produces: one self-contained HTML
//! document plus five descriptive metadata fields.

mod model;

pub use model::{Applet, AppletMetadata, GeneratedApplet, MetadataPatch};
