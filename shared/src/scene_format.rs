//! Scene container format constants.
//!
//! `SceneFormat` is the single source of truth for the file extensions and
//! magic bytes used when writing converted scenes to disk.
//!
//! # Example
//!
//! ```
//! use meshweld_shared::SCENE_FORMAT;
//!
//! assert_eq!(SCENE_FORMAT.binary_ext, "mwscene");
//! assert_eq!(SCENE_FORMAT.magic, b"MWSC");
//! ```

/// Scene container format descriptor.
#[derive(Debug, Clone, Copy)]
pub struct SceneFormat {
    /// Binary container extension without dot
    pub binary_ext: &'static str,

    /// JSON hand-off extension without dot
    pub json_ext: &'static str,

    /// Magic bytes at start of a binary container (4 bytes)
    pub magic: &'static [u8; 4],

    /// Container version for backward compatibility
    pub version: u32,
}

impl SceneFormat {
    pub const fn new(
        binary_ext: &'static str,
        json_ext: &'static str,
        magic: &'static [u8; 4],
        version: u32,
    ) -> Self {
        Self {
            binary_ext,
            json_ext,
            magic,
            version,
        }
    }

    /// Size of the fixed header preceding the encoded payload (magic + version).
    pub const fn header_size(&self) -> usize {
        self.magic.len() + 4
    }
}

/// meshweld scene container format.
///
/// - Binary extension: `.mwscene`
/// - JSON extension: `.json`
/// - Magic bytes: `MWSC`
pub const SCENE_FORMAT: SceneFormat = SceneFormat::new("mwscene", "json", b"MWSC", 1);
