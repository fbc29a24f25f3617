//! Skin weight attachment
//!
//! Influences are authored per control point, so every occurrence of a control
//! point receives the same (bone, weight) pairs, in binding order.

use crate::error::InputError;
use crate::occurrence::OccurrenceTable;
use crate::source::SkinBinding;
use meshweld_shared::BoneWeight;

/// Append each binding's influences to the occurrences of the control points it names.
///
/// Control points without occurrences are skipped. Returns the number of
/// influences that reached at least one occurrence.
pub fn attach_skin(
    table: &mut OccurrenceTable,
    bindings: &[SkinBinding],
) -> Result<usize, InputError> {
    let count = table.control_point_count();
    let mut applied = 0;

    for binding in bindings {
        for influence in &binding.influences {
            let control_point = influence.control_point as usize;
            if control_point >= count {
                return Err(InputError::InfluenceOutOfRange {
                    bone: binding.bone.clone(),
                    control_point: influence.control_point,
                    count,
                });
            }

            let Some(occurrences) = table.occurrences_mut(control_point) else {
                continue;
            };

            for vertex in occurrences {
                vertex
                    .bones
                    .push(BoneWeight::new(binding.bone.as_str(), influence.weight));
            }
            applied += 1;
        }
    }

    Ok(applied)
}
