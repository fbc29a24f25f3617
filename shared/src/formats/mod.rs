//! Converted mesh data and its serialized forms
//!
//! `mesh_data` defines the deduplicated, renderer-ready vertex model.
//! `scene_file` encodes a whole converted scene to JSON or to the binary
//! `.mwscene` container.

pub mod mesh_data;
pub mod scene_file;

pub use mesh_data::*;
pub use scene_file::*;
