//! meshweld-export library
//!
//! Walks parsed source scenes, converts every mesh with `meshweld-core`, and
//! writes the results. Used by the `meshweld-export` binary and available to
//! other tools that already hold a [`SourceScene`] in memory.

pub mod inspect;
pub mod manifest;
pub mod output;
pub mod postprocess;
pub mod scene;

pub use output::{read_scene, write_scene, OutputFormat};
pub use scene::{convert_scene, load_source_scene, ExportOptions, SceneNode, SourceScene};

pub use meshweld_shared::{MeshData, SceneData, SCENE_FORMAT};
