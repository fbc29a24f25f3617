//! Single-mesh conversion
//!
//! Validates a [`MeshSource`] and runs resolve -> occurrences -> skin -> weld.
//! Walking a scene and collecting one [`MeshData`] per mesh is left to the
//! caller.

use crate::error::{ConvertError, InputError};
use crate::occurrence::{build_occurrences, occurrence_counts};
use crate::resolve::{resolve_layer, ResolvedLayer};
use crate::skin::attach_skin;
use crate::source::{Channel, MeshSource};
use crate::weld::weld_occurrences;
use meshweld_shared::MeshData;

/// Convert one triangulated mesh into deduplicated vertices and corner indices.
///
/// Fails without a partial result. [`ConvertError::is_recoverable`] tells a
/// caller whether skipping the mesh is safe.
pub fn convert_mesh<M: MeshSource + ?Sized>(mesh: &M) -> Result<MeshData, ConvertError> {
    let name = mesh.name();
    let control_points = mesh.control_points();
    let polygon_vertices = mesh.polygon_vertices();

    validate_topology(mesh)?;

    let control_point_count = control_points.len();
    let normals = mesh
        .normals()
        .ok_or_else(|| InputError::MissingNormals {
            mesh: name.to_string(),
        })?;
    let normals = resolve_layer(normals, Channel::Normal, polygon_vertices, control_point_count)?;

    let tangents = mesh
        .tangent_layers()
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            resolve_layer(layer, Channel::Tangent(i), polygon_vertices, control_point_count)
        })
        .collect::<Result<Vec<ResolvedLayer<[f32; 4]>>, _>>()?;

    let uvs = mesh
        .uv_layers()
        .iter()
        .enumerate()
        .map(|(i, layer)| {
            resolve_layer(layer, Channel::Uv(i), polygon_vertices, control_point_count)
        })
        .collect::<Result<Vec<ResolvedLayer<[f32; 2]>>, _>>()?;

    let counts = occurrence_counts(polygon_vertices, control_point_count);
    let mut table = build_occurrences(control_points, &counts, &normals, &tangents, &uvs)?;
    let occurrence_count = table.occurrence_count();

    let influences = attach_skin(&mut table, mesh.skin_bindings())?;

    let welded = weld_occurrences(table, polygon_vertices)?;

    tracing::debug!(
        "Converted mesh '{}': {} control points, {} corners, {} occurrences -> {} vertices \
        ({} tangent sets, {} UV sets, {} skin influences)",
        name,
        control_point_count,
        polygon_vertices.len(),
        occurrence_count,
        welded.vertices.len(),
        tangents.len(),
        uvs.len(),
        influences
    );

    Ok(MeshData {
        name: name.to_string(),
        vertices: welded.vertices,
        vertex_indices: welded.indices,
    })
}

/// Checks the polygon and corner arrays before any layer is read.
fn validate_topology<M: MeshSource + ?Sized>(mesh: &M) -> Result<(), InputError> {
    let control_point_count = mesh.control_points().len();
    let polygon_vertices = mesh.polygon_vertices();

    if let Some((polygon, &size)) = mesh
        .polygon_sizes()
        .iter()
        .enumerate()
        .find(|(_, size)| **size != 3)
    {
        return Err(InputError::NotTriangulated {
            mesh: mesh.name().to_string(),
            polygon,
            size,
        });
    }

    let polygon_corners = mesh.polygon_sizes().len() * 3;
    if polygon_corners != polygon_vertices.len() {
        return Err(InputError::CornerCountMismatch {
            polygon_corners,
            corners: polygon_vertices.len(),
        });
    }

    // Every final vertex comes from a slot or a corner, so this bounds the index range
    let max_vertices = control_point_count as u64 + polygon_vertices.len() as u64;
    if max_vertices > u32::MAX as u64 {
        return Err(InputError::MeshTooLarge {
            mesh: mesh.name().to_string(),
        });
    }

    if let Some((corner, &control_point)) = polygon_vertices
        .iter()
        .enumerate()
        .find(|(_, cp)| **cp as usize >= control_point_count)
    {
        return Err(InputError::ControlPointOutOfRange {
            corner,
            control_point,
            count: control_point_count,
        });
    }

    Ok(())
}
