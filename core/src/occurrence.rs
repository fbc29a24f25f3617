//! Occurrence vertices
//!
//! Fuses resolved layers into candidate vertices. A control point referenced
//! by `k` corners gets `k` occurrence vertices; occurrence `j` takes the `j`-th
//! value of every by-corner layer, so all layers stay aligned on the same
//! physical corner. Unreferenced control points get no entry at all.

use crate::error::ConsistencyError;
use crate::resolve::{OccurrenceValues, ResolvedLayer};
use meshweld_shared::Vertex;

/// Occurrence vertices grouped by control point, in occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccurrenceTable {
    entries: Vec<Option<Vec<Vertex>>>,
}

impl OccurrenceTable {
    pub fn control_point_count(&self) -> usize {
        self.entries.len()
    }

    /// Occurrences of a control point, or `None` if no corner references it.
    pub fn occurrences(&self, control_point: usize) -> Option<&[Vertex]> {
        self.entries.get(control_point)?.as_deref()
    }

    pub fn occurrences_mut(&mut self, control_point: usize) -> Option<&mut [Vertex]> {
        self.entries.get_mut(control_point)?.as_deref_mut()
    }

    /// Total number of occurrence vertices across all control points.
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().flatten().map(Vec::len).sum()
    }

    pub fn into_entries(self) -> Vec<Option<Vec<Vertex>>> {
        self.entries
    }
}

/// Number of corners referencing each control point.
///
/// `polygon_vertices` must already be validated against `control_point_count`.
pub fn occurrence_counts(polygon_vertices: &[u32], control_point_count: usize) -> Vec<usize> {
    let mut counts = vec![0usize; control_point_count];
    for &control_point in polygon_vertices {
        counts[control_point as usize] += 1;
    }
    counts
}

/// Build occurrence vertices for every referenced control point.
///
/// Bone lists start empty; see [`crate::skin::attach_skin`].
pub fn build_occurrences(
    control_points: &[[f32; 3]],
    counts: &[usize],
    normals: &ResolvedLayer<[f32; 3]>,
    tangents: &[ResolvedLayer<[f32; 4]>],
    uvs: &[ResolvedLayer<[f32; 2]>],
) -> Result<OccurrenceTable, ConsistencyError> {
    let mut entries = Vec::with_capacity(control_points.len());

    for (control_point, (&position, &count)) in control_points.iter().zip(counts).enumerate() {
        if count == 0 {
            entries.push(None);
            continue;
        }

        let normal_values = normals.occurrence_values(control_point, count)?;
        let tangent_values = tangents
            .iter()
            .map(|layer| layer.occurrence_values(control_point, count))
            .collect::<Result<Vec<OccurrenceValues<'_, [f32; 4]>>, _>>()?;
        let uv_values = uvs
            .iter()
            .map(|layer| layer.occurrence_values(control_point, count))
            .collect::<Result<Vec<OccurrenceValues<'_, [f32; 2]>>, _>>()?;

        let occurrences = (0..count)
            .map(|ordinal| Vertex {
                position,
                normal: normal_values.get(ordinal),
                tangents: tangent_values.iter().map(|t| t.get(ordinal)).collect(),
                uvs: uv_values
                    .iter()
                    .map(|uv| {
                        let [u, v] = uv.get(ordinal);
                        [u, v, 0.0]
                    })
                    .collect(),
                bones: Vec::new(),
            })
            .collect();

        entries.push(Some(occurrences));
    }

    Ok(OccurrenceTable { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_layer;
    use crate::source::{Channel, LayerElement, MappingMode};

    const POSITIONS: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
    ];
    const CORNERS: [u32; 6] = [0, 1, 2, 2, 1, 3];

    fn normals(mapping: MappingMode, values: Vec<[f32; 3]>) -> ResolvedLayer<[f32; 3]> {
        resolve_layer(
            &LayerElement::direct(mapping, values),
            Channel::Normal,
            &CORNERS,
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_occurrence_counts() {
        assert_eq!(occurrence_counts(&CORNERS, 5), vec![1, 2, 2, 1, 0]);
    }

    #[test]
    fn test_one_occurrence_per_corner() {
        let normals = normals(MappingMode::ByPolygonVertex, vec![[0.0, 0.0, 1.0]; 6]);
        let uvs = resolve_layer(
            &LayerElement::direct(
                MappingMode::ByPolygonVertex,
                vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.5, 1.0], [1.0, 0.5], [1.0, 1.0]],
            ),
            Channel::Uv(0),
            &CORNERS,
            4,
        )
        .unwrap();
        let counts = occurrence_counts(&CORNERS, 4);

        let table = build_occurrences(&POSITIONS, &counts, &normals, &[], &[uvs]).unwrap();
        assert_eq!(table.occurrence_count(), 6);

        let cp2 = table.occurrences(2).unwrap();
        assert_eq!(cp2.len(), 2);
        assert_eq!(cp2[0].position, POSITIONS[2]);
        assert_eq!(cp2[0].uvs, vec![[0.0, 1.0, 0.0]]);
        assert_eq!(cp2[1].uvs, vec![[0.5, 1.0, 0.0]]);
        assert!(cp2[1].tangents.is_empty());
        assert!(cp2[1].bones.is_empty());
    }

    #[test]
    fn test_by_control_point_layer_is_shared() {
        let normals = normals(
            MappingMode::ByControlPoint,
            vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]],
        );
        let counts = occurrence_counts(&CORNERS, 4);
        let table = build_occurrences(&POSITIONS, &counts, &normals, &[], &[]).unwrap();

        let cp1 = table.occurrences(1).unwrap();
        assert_eq!(cp1.len(), 2);
        assert_eq!(cp1[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(cp1[1].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unreferenced_control_point_is_absent() {
        let positions = [POSITIONS[0], POSITIONS[1], POSITIONS[2], POSITIONS[3], [9.0; 3]];
        let normals = resolve_layer(
            &LayerElement::direct(MappingMode::ByPolygonVertex, vec![[0.0, 0.0, 1.0]; 6]),
            Channel::Normal,
            &CORNERS,
            5,
        )
        .unwrap();
        let counts = occurrence_counts(&CORNERS, 5);
        let table = build_occurrences(&positions, &counts, &normals, &[], &[]).unwrap();

        assert_eq!(table.control_point_count(), 5);
        assert!(table.occurrences(4).is_none());
        assert!(table.occurrences(3).is_some());
    }

    #[test]
    fn test_misaligned_counts_are_internal_errors() {
        let normals = normals(MappingMode::ByPolygonVertex, vec![[0.0, 0.0, 1.0]; 6]);
        // Claim control point 0 is referenced twice
        let counts = vec![2, 2, 2, 1];
        let err = build_occurrences(&POSITIONS, &counts, &normals, &[], &[]).unwrap_err();
        assert_eq!(
            err,
            ConsistencyError::OccurrenceCountMismatch {
                channel: Channel::Normal,
                control_point: 0,
                expected: 2,
                actual: 1,
            }
        );
    }
}
