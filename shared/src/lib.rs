//! Shared types for the meshweld mesh conversion pipeline.
//!
//! Holds the renderer-ready output model produced by `meshweld-core` and the
//! on-disk scene container used by `meshweld-export`.

pub mod formats;
pub mod scene_format;

pub use formats::*;
pub use scene_format::{SceneFormat, SCENE_FORMAT};
