//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (render scale/freeze, demo flock size, camera
//! projection) are consolidated here. Options serialize to/from TOML.

mod camera;
mod render;

use std::path::Path;

pub use camera::CameraOptions;
pub use render::RenderOptions;
use serde::{Deserialize, Serialize};

use crate::error::FlockvisError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Instanced rendering parameters.
    pub render: RenderOptions,
    /// Camera projection and placement parameters.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns `FlockvisError` if the file cannot be read or is not valid
    /// TOML for this schema.
    pub fn load(path: &Path) -> Result<Self, FlockvisError> {
        let content =
            std::fs::read_to_string(path).map_err(FlockvisError::Io)?;
        toml::from_str(&content)
            .map_err(|e| FlockvisError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns `FlockvisError` if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), FlockvisError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FlockvisError::OptionsParse(e.to_string()))?;
        std::fs::write(path, content).map_err(FlockvisError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_round_trip() {
        let options = Options::default();
        let toml_str = toml::to_string_pretty(&options).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let toml_str = r"
[render]
freeze = 1
";
        let options: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(options.render.freeze, 1);
        // Everything else should be default
        assert_eq!(
            options.render.object_scale,
            RenderOptions::default().object_scale
        );
        assert_eq!(options.camera, CameraOptions::default());
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let parsed: Result<Options, _> = toml::from_str("render = 3");
        assert!(parsed.is_err());
    }
}
