//! Summaries of converted scenes

use anyhow::Result;
use hashbrown::HashSet;
use meshweld_shared::{MeshData, SceneData};
use std::path::Path;

use crate::output::read_scene;

/// Per-mesh statistics shown by `meshweld-export inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSummary {
    pub name: String,
    pub vertices: usize,
    pub triangles: usize,
    pub tangent_sets: usize,
    pub uv_sets: usize,
    /// Distinct bones influencing any vertex
    pub bones: usize,
}

impl MeshSummary {
    pub fn of(mesh: &MeshData) -> Self {
        let bones: HashSet<&str> = mesh
            .vertices
            .iter()
            .flat_map(|v| v.bones.iter().map(|b| b.bone.as_str()))
            .collect();

        // Every vertex of a converted mesh carries the same number of sets
        let first = mesh.vertices.first();
        Self {
            name: mesh.name.clone(),
            vertices: mesh.vertices.len(),
            triangles: mesh.triangle_count(),
            tangent_sets: first.map_or(0, |v| v.tangents.len()),
            uv_sets: first.map_or(0, |v| v.uvs.len()),
            bones: bones.len(),
        }
    }
}

pub fn summarize(scene: &SceneData) -> Vec<MeshSummary> {
    scene.meshes.iter().map(MeshSummary::of).collect()
}

/// Log a summary of a converted scene file.
pub fn inspect_file(path: &Path) -> Result<Vec<MeshSummary>> {
    let (scene, format) = read_scene(path)?;
    let summaries = summarize(&scene);

    if summaries.is_empty() {
        tracing::info!("No meshes in {:?}", path);
        return Ok(summaries);
    }

    tracing::info!("Meshes in {:?} ({:?}):", path, format);
    for (i, s) in summaries.iter().enumerate() {
        tracing::info!(
            "  [{}] '{}': {} vertices, {} triangles, {} tangent sets, {} UV sets, {} bones",
            i,
            s.name,
            s.vertices,
            s.triangles,
            s.tangent_sets,
            s.uv_sets,
            s.bones
        );
    }
    tracing::info!(
        "Total: {} vertices, {} indices",
        scene.vertex_count(),
        scene.index_count()
    );

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshweld_shared::{BoneWeight, Vertex};

    fn vertex(bones: &[&str]) -> Vertex {
        Vertex {
            position: [0.0; 3],
            normal: [0.0, 0.0, 1.0],
            tangents: vec![[1.0, 0.0, 0.0, 1.0]],
            uvs: vec![[0.0; 3], [0.5, 0.5, 0.0]],
            bones: bones.iter().map(|b| BoneWeight::new(*b, 0.5)).collect(),
        }
    }

    #[test]
    fn test_summary_counts_distinct_bones() {
        let mesh = MeshData {
            name: "arm".into(),
            vertices: vec![
                vertex(&["upper", "lower"]),
                vertex(&["lower"]),
                vertex(&[]),
            ],
            vertex_indices: vec![0, 1, 2],
        };

        let summary = MeshSummary::of(&mesh);
        assert_eq!(summary.vertices, 3);
        assert_eq!(summary.triangles, 1);
        assert_eq!(summary.tangent_sets, 1);
        assert_eq!(summary.uv_sets, 2);
        assert_eq!(summary.bones, 2);
    }

    #[test]
    fn test_summary_of_empty_mesh() {
        let scene = SceneData {
            meshes: vec![MeshData {
                name: "empty".into(),
                vertices: Vec::new(),
                vertex_indices: Vec::new(),
            }],
        };

        let summaries = summarize(&scene);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].vertices, 0);
        assert_eq!(summaries[0].tangent_sets, 0);
        assert_eq!(summaries[0].bones, 0);
    }
}
