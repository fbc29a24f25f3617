//! Scene walking (parsed source scene -> SceneData)
//!
//! A [`SourceScene`] is the node list an exchange-format reader hands over,
//! already triangulated and with normals and tangents generated. Every
//! mesh-bearing node is converted independently; results keep node order.

use anyhow::{Context, Result};
use meshweld_core::{convert_mesh, ConvertError, SourceMesh};
use meshweld_shared::{MeshData, SceneData};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::postprocess::mirror_x;

/// One node of a parsed scene. Nodes without a mesh are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneNode {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mesh: Option<SourceMesh>,
}

/// Parsed source scene, in document node order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceScene {
    pub nodes: Vec<SceneNode>,
}

impl SourceScene {
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.mesh.is_some()).count()
    }
}

/// Options applied to every mesh of a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ExportOptions {
    /// Mirror meshes across the YZ plane (see [`mirror_x`]). Off unless
    /// requested; source scenes are taken in the output's handedness.
    #[serde(default)]
    pub mirror_x: bool,

    /// Skip meshes with malformed input instead of failing the whole scene.
    /// Internal consistency errors always fail.
    #[serde(default)]
    pub skip_invalid_meshes: bool,
}

/// Load a parsed source scene from JSON.
pub fn load_source_scene(path: &Path) -> Result<SourceScene> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read source scene: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse source scene: {}", path.display()))
}

/// Convert every mesh in the scene.
///
/// Meshes are converted in parallel; each conversion owns its working state.
pub fn convert_scene(scene: &SourceScene, options: &ExportOptions) -> Result<SceneData> {
    let converted: Vec<Option<(&SceneNode, Result<MeshData, ConvertError>)>> = scene
        .nodes
        .par_iter()
        .map(|node| node.mesh.as_ref().map(|mesh| (node, convert_mesh(mesh))))
        .collect();

    let mut meshes = Vec::with_capacity(scene.mesh_count());
    let mut skipped = 0usize;

    for (node, result) in converted.into_iter().flatten() {
        match result {
            Ok(mut mesh) => {
                if mesh.name.is_empty() {
                    mesh.name = node.name.clone();
                }
                if options.mirror_x {
                    mirror_x(&mut mesh);
                }
                meshes.push(mesh);
            }
            Err(err) if err.is_recoverable() && options.skip_invalid_meshes => {
                tracing::warn!("Skipping mesh in node '{}': {}", node.name, err);
                skipped += 1;
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to convert mesh in node '{}'", node.name));
            }
        }
    }

    let scene = SceneData { meshes };
    tracing::info!(
        "Converted {} meshes ({} skipped): {} vertices, {} indices",
        scene.meshes.len(),
        skipped,
        scene.vertex_count(),
        scene.index_count()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshweld_core::{LayerElement, MappingMode};

    fn triangle(name: &str) -> SourceMesh {
        let mut mesh = SourceMesh::triangles(
            name,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![0, 1, 2],
        );
        mesh.normals = Some(LayerElement::direct(
            MappingMode::ByControlPoint,
            vec![[0.0, 0.0, 1.0]; 3],
        ));
        mesh
    }

    fn quad_polygon(name: &str) -> SourceMesh {
        let mut mesh = triangle(name);
        mesh.control_points.push([1.0, 1.0, 0.0]);
        mesh.polygon_vertices = vec![0, 1, 3, 2];
        mesh.polygon_sizes = vec![4];
        mesh
    }

    fn node(name: &str, mesh: Option<SourceMesh>) -> SceneNode {
        SceneNode {
            name: name.to_string(),
            mesh,
        }
    }

    #[test]
    fn test_skips_nodes_without_meshes() {
        let scene = SourceScene {
            nodes: vec![
                node("Root", None),
                node("Body", Some(triangle("BodyMesh"))),
                node("Light", None),
                node("Head", Some(triangle("HeadMesh"))),
            ],
        };
        let data = convert_scene(&scene, &ExportOptions::default()).unwrap();
        let names: Vec<&str> = data.meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["BodyMesh", "HeadMesh"]);
    }

    #[test]
    fn test_unnamed_mesh_takes_node_name() {
        let scene = SourceScene {
            nodes: vec![node("Sword", Some(triangle("")))],
        };
        let data = convert_scene(&scene, &ExportOptions::default()).unwrap();
        assert_eq!(data.meshes[0].name, "Sword");
    }

    #[test]
    fn test_invalid_mesh_fails_scene_by_default() {
        let scene = SourceScene {
            nodes: vec![
                node("Body", Some(triangle("Body"))),
                node("Cape", Some(quad_polygon("Cape"))),
            ],
        };
        let err = convert_scene(&scene, &ExportOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Cape"));
        assert!(format!("{:#}", err).contains("not triangulated"));
    }

    #[test]
    fn test_invalid_mesh_skipped_when_requested() {
        let scene = SourceScene {
            nodes: vec![
                node("Cape", Some(quad_polygon("Cape"))),
                node("Body", Some(triangle("Body"))),
            ],
        };
        let options = ExportOptions {
            skip_invalid_meshes: true,
            ..Default::default()
        };
        let data = convert_scene(&scene, &options).unwrap();
        assert_eq!(data.meshes.len(), 1);
        assert_eq!(data.meshes[0].name, "Body");
    }

    #[test]
    fn test_mirror_option_applies_to_every_mesh() {
        let scene = SourceScene {
            nodes: vec![node("Body", Some(triangle("Body")))],
        };
        let options = ExportOptions {
            mirror_x: true,
            ..Default::default()
        };
        let data = convert_scene(&scene, &options).unwrap();
        assert_eq!(data.meshes[0].vertices[1].position, [-1.0, 0.0, 0.0]);
        assert_eq!(data.meshes[0].vertex_indices, vec![0, 2, 1]);
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "nodes": [
                { "name": "Root" },
                { "name": "Tri", "mesh": {
                    "control_points": [[0,0,0],[1,0,0],[0,1,0]],
                    "polygon_vertices": [0,1,2],
                    "polygon_sizes": [3],
                    "normals": { "mapping": "by_control_point", "reference": "direct",
                                 "direct": [[0,0,1],[0,0,1],[0,0,1]] }
                } }
            ]
        }"#;
        let scene: SourceScene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.mesh_count(), 1);
        let data = convert_scene(&scene, &ExportOptions::default()).unwrap();
        assert_eq!(data.meshes[0].name, "Tri");
        assert_eq!(data.meshes[0].vertices.len(), 3);
    }

    #[test]
    fn test_load_rejects_converted_scene() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("hero.meshes.json");
        std::fs::write(
            &path,
            r#"{ "meshes": [{ "name": "Hero", "vertices": [], "vertex_indices": [] }] }"#,
        )
        .unwrap();

        let err = load_source_scene(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse source scene"));
    }

    #[test]
    fn test_load_requires_node_list() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("empty.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(load_source_scene(&path).is_err());

        std::fs::write(&path, r#"{ "nodes": [{ "name": "Root", "children": [] }] }"#).unwrap();
        assert!(load_source_scene(&path).is_err());

        std::fs::write(&path, r#"{ "nodes": [] }"#).unwrap();
        assert_eq!(load_source_scene(&path).unwrap().nodes.len(), 0);
    }
}
