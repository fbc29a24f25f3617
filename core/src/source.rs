//! Source mesh input contract
//!
//! Mirrors the layer model of the exchange format: a mesh owns shared control
//! points, a flat corner-to-control-point array, and attribute layers that
//! each declare how they are mapped onto the mesh and how their values are
//! referenced. Any reader that can fill these types can feed the converter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How a layer's entries are mapped onto the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingMode {
    None,
    /// One entry per control point
    ByControlPoint,
    /// One entry per triangle corner, in draw order
    ByPolygonVertex,
    ByPolygon,
    ByEdge,
    AllSame,
}

/// How a layer's entries reach their values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMode {
    /// Entry `i` is `direct[i]`
    Direct,
    /// Obsolete alias of `IndexToDirect`; readers never produce it for
    /// geometry layers and it is rejected.
    Index,
    /// Entry `i` is `direct[index[i]]`
    IndexToDirect,
}

/// Identifies an attribute layer in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Normal,
    Tangent(usize),
    Uv(usize),
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Normal => write!(f, "normal"),
            Channel::Tangent(i) => write!(f, "tangent {}", i),
            Channel::Uv(i) => write!(f, "UV {}", i),
        }
    }
}

/// One attribute layer (normals, a tangent set, or a UV set).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerElement<T> {
    #[serde(default)]
    pub name: Option<String>,
    pub mapping: MappingMode,
    pub reference: ReferenceMode,
    pub direct: Vec<T>,
    #[serde(default)]
    pub index: Vec<u32>,
}

impl<T> LayerElement<T> {
    pub fn direct(mapping: MappingMode, values: Vec<T>) -> Self {
        Self {
            name: None,
            mapping,
            reference: ReferenceMode::Direct,
            direct: values,
            index: Vec::new(),
        }
    }

    pub fn indexed(mapping: MappingMode, values: Vec<T>, index: Vec<u32>) -> Self {
        Self {
            name: None,
            mapping,
            reference: ReferenceMode::IndexToDirect,
            direct: values,
            index,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A bone's weight on one control point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub control_point: u32,
    pub weight: f32,
}

/// A bone and the control points it deforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinBinding {
    pub bone: String,
    #[serde(default)]
    pub influences: Vec<Influence>,
}

impl SkinBinding {
    pub fn new(bone: impl Into<String>, influences: &[(u32, f32)]) -> Self {
        Self {
            bone: bone.into(),
            influences: influences
                .iter()
                .map(|&(control_point, weight)| Influence {
                    control_point,
                    weight,
                })
                .collect(),
        }
    }
}

/// Interface for the converter to query a triangulated source mesh.
///
/// Normals and tangents must already be generated; the converter only resolves
/// and deduplicates what the layers contain.
pub trait MeshSource {
    fn name(&self) -> &str;

    /// Shared positions, indexed by control point.
    fn control_points(&self) -> &[[f32; 3]];

    /// Control point of every corner, in draw order.
    fn polygon_vertices(&self) -> &[u32];

    /// Corner count of every polygon, in draw order.
    fn polygon_sizes(&self) -> &[u32];

    fn normals(&self) -> Option<&LayerElement<[f32; 3]>>;

    fn tangent_layers(&self) -> &[LayerElement<[f32; 4]>];

    fn uv_layers(&self) -> &[LayerElement<[f32; 2]>];

    fn skin_bindings(&self) -> &[SkinBinding];
}

/// Owned source mesh, as handed over by an exchange-format reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMesh {
    #[serde(default)]
    pub name: String,
    pub control_points: Vec<[f32; 3]>,
    pub polygon_vertices: Vec<u32>,
    pub polygon_sizes: Vec<u32>,
    #[serde(default)]
    pub normals: Option<LayerElement<[f32; 3]>>,
    #[serde(default)]
    pub tangents: Vec<LayerElement<[f32; 4]>>,
    #[serde(default)]
    pub uvs: Vec<LayerElement<[f32; 2]>>,
    #[serde(default)]
    pub skin: Vec<SkinBinding>,
}

impl SourceMesh {
    /// Builds a triangle mesh; polygon sizes are derived from the corner count.
    pub fn triangles(
        name: impl Into<String>,
        control_points: Vec<[f32; 3]>,
        polygon_vertices: Vec<u32>,
    ) -> Self {
        let polygon_sizes = vec![3; polygon_vertices.len() / 3];
        Self {
            name: name.into(),
            control_points,
            polygon_vertices,
            polygon_sizes,
            ..Default::default()
        }
    }
}

impl MeshSource for SourceMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn control_points(&self) -> &[[f32; 3]] {
        &self.control_points
    }

    fn polygon_vertices(&self) -> &[u32] {
        &self.polygon_vertices
    }

    fn polygon_sizes(&self) -> &[u32] {
        &self.polygon_sizes
    }

    fn normals(&self) -> Option<&LayerElement<[f32; 3]>> {
        self.normals.as_ref()
    }

    fn tangent_layers(&self) -> &[LayerElement<[f32; 4]>] {
        &self.tangents
    }

    fn uv_layers(&self) -> &[LayerElement<[f32; 2]>] {
        &self.uvs
    }

    fn skin_bindings(&self) -> &[SkinBinding] {
        &self.skin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_mesh_from_json() {
        let json = r#"{
            "name": "Tri",
            "control_points": [[0,0,0],[1,0,0],[0,1,0]],
            "polygon_vertices": [0,1,2],
            "polygon_sizes": [3],
            "normals": {
                "mapping": "by_polygon_vertex",
                "reference": "index_to_direct",
                "direct": [[0,0,1]],
                "index": [0,0,0]
            },
            "skin": [{ "bone": "root", "influences": [{ "control_point": 0, "weight": 1.0 }] }]
        }"#;
        let mesh: SourceMesh = serde_json::from_str(json).unwrap();
        assert_eq!(mesh.name(), "Tri");
        let normals = mesh.normals().unwrap();
        assert_eq!(normals.mapping, MappingMode::ByPolygonVertex);
        assert_eq!(normals.reference, ReferenceMode::IndexToDirect);
        assert!(mesh.uv_layers().is_empty());
        assert_eq!(mesh.skin_bindings()[0].influences[0].control_point, 0);
    }

    #[test]
    fn test_triangles_builder() {
        let mesh = SourceMesh::triangles("Quad", vec![[0.0; 3]; 4], vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(mesh.polygon_sizes(), &[3, 3]);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Normal.to_string(), "normal");
        assert_eq!(Channel::Tangent(2).to_string(), "tangent 2");
    }
}
