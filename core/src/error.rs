//! Conversion errors
//!
//! Two categories: [`InputError`] means the source mesh is malformed and the
//! caller may skip it; [`ConsistencyError`] means a pipeline invariant broke and
//! the conversion result cannot be trusted.

use crate::source::{Channel, MappingMode, ReferenceMode};

/// Malformed or unsupported source data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{channel} layer uses unsupported mapping mode {mode:?}")]
    UnsupportedMapping { channel: Channel, mode: MappingMode },

    #[error("{channel} layer uses unsupported reference mode {mode:?}")]
    UnsupportedReference { channel: Channel, mode: ReferenceMode },

    #[error("Mesh '{mesh}' is not triangulated (polygon {polygon} has {size} corners)")]
    NotTriangulated {
        mesh: String,
        polygon: usize,
        size: u32,
    },

    #[error("Mesh '{mesh}' has no normal layer")]
    MissingNormals { mesh: String },

    #[error("Polygon sizes add up to {polygon_corners} corners but the mesh has {corners}")]
    CornerCountMismatch { polygon_corners: usize, corners: usize },

    #[error("Corner {corner} references control point {control_point} (mesh has {count})")]
    ControlPointOutOfRange {
        corner: usize,
        control_point: u32,
        count: usize,
    },

    #[error("{channel} layer index {position} points at direct entry {index} (layer has {len})")]
    DirectIndexOutOfRange {
        channel: Channel,
        position: usize,
        index: u32,
        len: usize,
    },

    #[error("{channel} layer has {actual} entries, expected {expected}")]
    LayerLengthMismatch {
        channel: Channel,
        expected: usize,
        actual: usize,
    },

    #[error("Bone '{bone}' influences control point {control_point} (mesh has {count})")]
    InfluenceOutOfRange {
        bone: String,
        control_point: u32,
        count: usize,
    },

    #[error("Mesh '{mesh}' is too large for 32-bit vertex indices")]
    MeshTooLarge { mesh: String },
}

/// A broken invariant between pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("Corner {corner} ran out of occurrences for control point {control_point}")]
    OccurrenceUnderflow { corner: usize, control_point: usize },

    #[error("Control point {control_point} has {remaining} occurrences no corner consumed")]
    UnconsumedOccurrences {
        control_point: usize,
        remaining: usize,
    },

    #[error(
        "{channel} layer recorded {actual} values for control point {control_point}, expected {expected}"
    )]
    OccurrenceCountMismatch {
        channel: Channel,
        control_point: usize,
        expected: usize,
        actual: usize,
    },
}

/// Any failure converting a single mesh. No partial result accompanies it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Internal consistency error: {0}")]
    Internal(#[from] ConsistencyError),
}

impl ConvertError {
    /// True for bad input that a caller may skip; false for broken invariants.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConvertError::Input(_))
    }
}
