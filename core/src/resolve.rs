//! Attribute layer resolution
//!
//! Normalizes a layer's mapping and reference modes into one ordered list of
//! values per control point. Values land in ascending order of the layer
//! position that produced them; for by-corner layers that is draw order, which
//! fixes each value's occurrence ordinal for the later stages.

use crate::error::{ConsistencyError, InputError};
use crate::source::{Channel, LayerElement, MappingMode, ReferenceMode};

/// A layer resolved to per-control-point value lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayer<T> {
    pub channel: Channel,
    /// Either `ByControlPoint` or `ByPolygonVertex`
    pub mapping: MappingMode,
    values: Vec<Vec<T>>,
}

/// The values a layer contributes to the occurrences of one control point.
#[derive(Debug, Clone, Copy)]
pub enum OccurrenceValues<'a, T> {
    /// Every occurrence shares one per-control-point value.
    Shared(T),
    /// One value per occurrence, in occurrence order.
    PerCorner(&'a [T]),
}

impl<T: Copy> OccurrenceValues<'_, T> {
    #[inline]
    pub fn get(&self, ordinal: usize) -> T {
        match self {
            OccurrenceValues::Shared(value) => *value,
            OccurrenceValues::PerCorner(values) => values[ordinal],
        }
    }
}

impl<T: Copy> ResolvedLayer<T> {
    /// Values recorded for a control point, in layer order.
    pub fn values_for(&self, control_point: usize) -> &[T] {
        self.values
            .get(control_point)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn control_point_count(&self) -> usize {
        self.values.len()
    }

    /// Values for the `count` occurrences of a control point.
    ///
    /// By-corner layers must have recorded exactly `count` values; by-control-point
    /// layers exactly one, shared by every occurrence.
    pub fn occurrence_values(
        &self,
        control_point: usize,
        count: usize,
    ) -> Result<OccurrenceValues<'_, T>, ConsistencyError> {
        let values = self.values_for(control_point);
        let expected = match self.mapping {
            MappingMode::ByControlPoint => 1,
            _ => count,
        };
        if values.len() != expected {
            return Err(ConsistencyError::OccurrenceCountMismatch {
                channel: self.channel,
                control_point,
                expected,
                actual: values.len(),
            });
        }

        Ok(match self.mapping {
            MappingMode::ByControlPoint => OccurrenceValues::Shared(values[0]),
            _ => OccurrenceValues::PerCorner(values),
        })
    }
}

/// Resolve one layer against the mesh's corner array.
///
/// `polygon_vertices` must already be validated against `control_point_count`.
pub fn resolve_layer<T: Copy>(
    layer: &LayerElement<T>,
    channel: Channel,
    polygon_vertices: &[u32],
    control_point_count: usize,
) -> Result<ResolvedLayer<T>, InputError> {
    let expected = match layer.mapping {
        MappingMode::ByControlPoint => control_point_count,
        MappingMode::ByPolygonVertex => polygon_vertices.len(),
        mode => return Err(InputError::UnsupportedMapping { channel, mode }),
    };

    let entries = match layer.reference {
        ReferenceMode::Direct => layer.direct.len(),
        ReferenceMode::IndexToDirect => layer.index.len(),
        mode => return Err(InputError::UnsupportedReference { channel, mode }),
    };

    if entries != expected {
        return Err(InputError::LayerLengthMismatch {
            channel,
            expected,
            actual: entries,
        });
    }

    let mut values: Vec<Vec<T>> = vec![Vec::new(); control_point_count];

    for position in 0..entries {
        let value = match layer.reference {
            ReferenceMode::IndexToDirect => {
                let index = layer.index[position];
                *layer.direct.get(index as usize).ok_or_else(|| {
                    InputError::DirectIndexOutOfRange {
                        channel,
                        position,
                        index,
                        len: layer.direct.len(),
                    }
                })?
            }
            _ => layer.direct[position],
        };

        let control_point = match layer.mapping {
            MappingMode::ByControlPoint => position,
            _ => polygon_vertices[position] as usize,
        };

        values[control_point].push(value);
    }

    tracing::trace!(
        "Resolved {} layer: {} entries, mapping={:?}, reference={:?}",
        channel,
        entries,
        layer.mapping,
        layer.reference
    );

    Ok(ResolvedLayer {
        channel,
        mapping: layer.mapping,
        values,
    })
}
