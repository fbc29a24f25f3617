//! Deduplicated mesh data
//!
//! One `MeshData` per converted mesh: a compact vertex list and one index per
//! triangle corner. Vertices own their attribute lists; nothing is shared
//! between meshes.

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A single bone influence on a vertex.
///
/// Weights are passed through as authored; they are not normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct BoneWeight {
    pub bone: String,
    pub weight: f32,
}

impl BoneWeight {
    pub fn new(bone: impl Into<String>, weight: f32) -> Self {
        Self {
            bone: bone.into(),
            weight,
        }
    }
}

/// Renderer-ready vertex.
///
/// Tangents and UVs hold one entry per channel, in channel order. UVs are
/// widened to three components with the third left at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    #[serde(default)]
    pub tangents: Vec<[f32; 4]>,
    #[serde(default)]
    pub uvs: Vec<[f32; 3]>,
    #[serde(default)]
    pub bones: Vec<BoneWeight>,
}

impl Vertex {
    /// Returns true when both vertices carry bit-identical geometry attributes.
    ///
    /// Compares position, normal, every tangent channel and every UV channel.
    /// Channel counts must match. Bone influences are ignored; they are a
    /// function of the control point and never distinguish two occurrences.
    pub fn same_attributes(&self, other: &Vertex) -> bool {
        bits_eq(&self.position, &other.position)
            && bits_eq(&self.normal, &other.normal)
            && self.tangents.len() == other.tangents.len()
            && self.uvs.len() == other.uvs.len()
            && self
                .tangents
                .iter()
                .zip(&other.tangents)
                .all(|(a, b)| bits_eq(a, b))
            && self.uvs.iter().zip(&other.uvs).all(|(a, b)| bits_eq(a, b))
    }
}

#[inline]
fn bits_eq<const N: usize>(a: &[f32; N], b: &[f32; N]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.to_bits() == y.to_bits())
}

/// One converted mesh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vertex>,
    /// One entry per triangle corner, indexing into `vertices`
    pub vertex_indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.vertex_indices.len() / 3
    }

    /// Index of the first corner whose vertex index is out of range, if any.
    pub fn first_invalid_index(&self) -> Option<usize> {
        let len = self.vertices.len();
        self.vertex_indices
            .iter()
            .position(|&index| index as usize >= len)
    }
}

/// All meshes converted from one source scene, in scene traversal order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct SceneData {
    pub meshes: Vec<MeshData>,
}

impl SceneData {
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertices.len()).sum()
    }

    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(|mesh| mesh.vertex_indices.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex() -> Vertex {
        Vertex {
            position: [1.0, 2.0, 3.0],
            normal: [0.0, 1.0, 0.0],
            tangents: vec![[1.0, 0.0, 0.0, 1.0]],
            uvs: vec![[0.25, 0.75, 0.0]],
            bones: vec![],
        }
    }

    #[test]
    fn test_same_attributes_identical() {
        assert!(vertex().same_attributes(&vertex()));
    }

    #[test]
    fn test_same_attributes_ignores_bones() {
        let mut other = vertex();
        other.bones.push(BoneWeight::new("spine", 0.5));
        assert!(vertex().same_attributes(&other));
    }

    #[test]
    fn test_same_attributes_detects_uv_seam() {
        let mut other = vertex();
        other.uvs[0][0] = 0.5;
        assert!(!vertex().same_attributes(&other));
    }

    #[test]
    fn test_same_attributes_detects_hard_normal() {
        let mut other = vertex();
        other.normal = [1.0, 0.0, 0.0];
        assert!(!vertex().same_attributes(&other));
    }

    #[test]
    fn test_same_attributes_channel_count_mismatch() {
        let mut other = vertex();
        other.uvs.push([0.0, 0.0, 0.0]);
        assert!(!vertex().same_attributes(&other));

        let mut other = vertex();
        other.tangents.clear();
        assert!(!vertex().same_attributes(&other));
    }

    #[test]
    fn test_same_attributes_is_bitwise() {
        let mut a = vertex();
        let mut b = vertex();
        a.position[0] = 0.0;
        b.position[0] = -0.0;
        assert!(!a.same_attributes(&b));

        a.position[0] = f32::NAN;
        b.position[0] = f32::NAN;
        assert!(a.same_attributes(&b));
    }

    #[test]
    fn test_first_invalid_index() {
        let mut mesh = MeshData {
            name: "tri".into(),
            vertices: vec![vertex(); 3],
            vertex_indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.first_invalid_index(), None);
        assert_eq!(mesh.triangle_count(), 1);

        mesh.vertex_indices[1] = 3;
        assert_eq!(mesh.first_invalid_index(), Some(1));
    }
}
