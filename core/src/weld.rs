//! Vertex welding and index compaction
//!
//! Replays the corners in draw order, taking occurrence vertices from each
//! control point's queue in FIFO order so corner `n` of a control point always
//! consumes occurrence `n`.
//!
//! The output list is seeded with one slot per control point. The first
//! occurrence of a control point fills its own slot; later occurrences either
//! reuse that slot when bit-identical to it, or are appended after all slots.
//! Occurrences are compared against the first vertex of their control point
//! only, which keeps the pass linear. A control point whose occurrences form
//! three or more groups where only the later groups match each other will keep
//! duplicates. Slots never filled (unreferenced control points) are compacted
//! out at the end.

use std::collections::VecDeque;

use crate::error::ConsistencyError;
use crate::occurrence::OccurrenceTable;
use meshweld_shared::Vertex;

/// Deduplicated vertices plus one index per corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeldedMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Weld the occurrence table along the corner order.
///
/// Every corner must have an occurrence waiting in its control point's queue,
/// and every occurrence must be consumed by a corner.
pub fn weld_occurrences(
    table: OccurrenceTable,
    polygon_vertices: &[u32],
) -> Result<WeldedMesh, ConsistencyError> {
    let mut queues: Vec<VecDeque<Vertex>> = table
        .into_entries()
        .into_iter()
        .map(|entry| entry.map(VecDeque::from).unwrap_or_default())
        .collect();
    let control_point_count = queues.len();

    // Slot `c` holds the first final vertex of control point `c`
    let mut slots: Vec<Option<Vertex>> = vec![None; control_point_count];
    let mut indices: Vec<usize> = Vec::with_capacity(polygon_vertices.len());

    for (corner, &control_point) in polygon_vertices.iter().enumerate() {
        let control_point = control_point as usize;
        let occurrence = queues
            .get_mut(control_point)
            .and_then(VecDeque::pop_front)
            .ok_or(ConsistencyError::OccurrenceUnderflow {
                corner,
                control_point,
            })?;

        let index = match &slots[control_point] {
            None => {
                slots[control_point] = Some(occurrence);
                control_point
            }
            Some(first) if first.same_attributes(&occurrence) => control_point,
            Some(_) => {
                slots.push(Some(occurrence));
                slots.len() - 1
            }
        };
        indices.push(index);
    }

    if let Some((control_point, queue)) = queues.iter().enumerate().find(|(_, q)| !q.is_empty()) {
        return Err(ConsistencyError::UnconsumedOccurrences {
            control_point,
            remaining: queue.len(),
        });
    }

    Ok(compact(slots, &indices))
}

/// Drop empty slots and rewrite indices through an old-to-new map.
fn compact(slots: Vec<Option<Vertex>>, indices: &[usize]) -> WeldedMesh {
    let mut remap = vec![u32::MAX; slots.len()];
    let mut vertices = Vec::with_capacity(slots.len());

    for (old, slot) in slots.into_iter().enumerate() {
        if let Some(vertex) = slot {
            remap[old] = vertices.len() as u32;
            vertices.push(vertex);
        }
    }

    let indices = indices.iter().map(|&old| remap[old]).collect();

    WeldedMesh { vertices, indices }
}
