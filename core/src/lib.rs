//! meshweld core - vertex resolution and deduplication
//!
//! Turns one triangulated source mesh (shared control points plus
//! independently indexed per-corner attribute layers and a skin table) into a
//! single deduplicated vertex buffer with one index per triangle corner.
//!
//! # Pipeline
//!
//! - [`resolve`] - normalizes each attribute layer into per-control-point value lists
//! - [`occurrence`] - fuses resolved layers into occurrence vertices per control point
//! - [`skin`] - attaches bone influences to every occurrence of a control point
//! - [`weld`] - replays corner order, merges identical occurrences, compacts indices
//! - [`convert`] - runs the whole pipeline for one [`MeshSource`]
//!
//! Each conversion owns all of its working state, so independent meshes can be
//! converted on separate threads without synchronization.

pub mod convert;
pub mod error;
pub mod occurrence;
pub mod resolve;
pub mod skin;
pub mod source;
pub mod weld;

pub use convert::convert_mesh;
pub use error::{ConsistencyError, ConvertError, InputError};
pub use source::{
    Channel, Influence, LayerElement, MappingMode, MeshSource, ReferenceMode, SkinBinding,
    SourceMesh,
};

pub use meshweld_shared::{BoneWeight, MeshData, Vertex};
