//! Import post-processing applied to converted meshes

use meshweld_shared::MeshData;

/// Mirror a mesh across the YZ plane.
///
/// Negates X of positions, normals and tangents, flips tangent handedness, and
/// swaps the last two corners of every triangle so front faces stay front-facing.
pub fn mirror_x(mesh: &mut MeshData) {
    for vertex in &mut mesh.vertices {
        vertex.position[0] = -vertex.position[0];
        vertex.normal[0] = -vertex.normal[0];
        for tangent in &mut vertex.tangents {
            tangent[0] = -tangent[0];
            tangent[3] = -tangent[3];
        }
    }
    flip_winding(&mut mesh.vertex_indices);
}

/// Reverse the winding of every triangle.
pub fn flip_winding(indices: &mut [u32]) {
    for triangle in indices.chunks_exact_mut(3) {
        triangle.swap(1, 2);
    }
}
