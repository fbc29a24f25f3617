//! Serialized scene files
//!
//! Two encodings of [`SceneData`]:
//! - JSON, the hand-off format read by downstream model importers
//! - the binary `.mwscene` container:
//!
//! ```text
//! 0x00: magic "MWSC"
//! 0x04: version u32 (LE)
//! 0x08: bitcode-encoded SceneData
//! ```

use crate::formats::SceneData;
use crate::SCENE_FORMAT;

/// Error type for scene file encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum SceneFileError {
    #[error("Invalid scene magic bytes (expected {expected:?})")]
    InvalidMagic { expected: &'static [u8; 4] },

    #[error("Unsupported scene version: {found} (supported: 1..={supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Failed to decode scene payload: {0}")]
    Decode(String),

    #[error("Mesh '{mesh}' corner {corner} references a vertex past the end of its vertex list")]
    IndexOutOfRange { mesh: String, corner: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneData {
    /// Serialize to the binary container (magic + version + bitcode payload).
    pub fn to_bytes(&self) -> Vec<u8> {
        let encoded = bitcode::encode(self);
        let mut bytes = Vec::with_capacity(SCENE_FORMAT.header_size() + encoded.len());
        bytes.extend_from_slice(SCENE_FORMAT.magic);
        bytes.extend_from_slice(&SCENE_FORMAT.version.to_le_bytes());
        bytes.extend(encoded);
        bytes
    }

    /// Deserialize from the binary container and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneFileError> {
        let header_size = SCENE_FORMAT.header_size();
        if bytes.len() < header_size || &bytes[0..4] != SCENE_FORMAT.magic {
            return Err(SceneFileError::InvalidMagic {
                expected: SCENE_FORMAT.magic,
            });
        }

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        if version == 0 || version > SCENE_FORMAT.version {
            return Err(SceneFileError::UnsupportedVersion {
                found: version,
                supported: SCENE_FORMAT.version,
            });
        }

        let scene: SceneData = bitcode::decode(&bytes[header_size..])
            .map_err(|e| SceneFileError::Decode(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SceneFileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SceneFileError> {
        let scene: SceneData = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Checks that every corner index is inside its mesh's vertex list.
    pub fn validate(&self) -> Result<(), SceneFileError> {
        for mesh in &self.meshes {
            if let Some(corner) = mesh.first_invalid_index() {
                return Err(SceneFileError::IndexOutOfRange {
                    mesh: mesh.name.clone(),
                    corner,
                });
            }
        }
        Ok(())
    }
}
