//! Configuration options and session files.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{EitViewError, Result};
use crate::io::{load_matrix, TextMatrix};
use crate::mesh::Mesh;

/// Tunable viewer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Period of the playback tick in milliseconds.
    pub tick_period_ms: u32,

    /// Amount one scroll notch changes the normalization threshold.
    pub threshold_step: f32,

    /// Threshold restored by a view reset.
    pub default_threshold: f32,

    /// Whether the first electrode is drawn in the highlight color.
    pub highlight_first_electrode: bool,

    /// Color of the highlighted electrode.
    pub electrode_highlight_color: Vec3,

    /// Color of all other electrodes.
    pub electrode_color: Vec3,

    /// Background color.
    pub background_color: Vec3,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tick_period_ms: 20,
            threshold_step: 0.05,
            default_threshold: 0.1,
            highlight_first_electrode: true,
            electrode_highlight_color: Vec3::new(1.0, 0.0, 0.0),
            electrode_color: Vec3::ZERO,
            background_color: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Options {
    /// Tick period in seconds.
    pub fn tick_period_secs(&self) -> f64 {
        f64::from(self.tick_period_ms) / 1000.0
    }

    /// Checks the settings that drive playback and the threshold.
    pub fn validate(&self) -> Result<()> {
        if self.tick_period_ms == 0 {
            return Err(EitViewError::InvalidOption {
                name: "tick_period_ms",
                message: "must be at least 1".into(),
            });
        }
        if !self.threshold_step.is_finite() || self.threshold_step <= 0.0 {
            return Err(EitViewError::InvalidOption {
                name: "threshold_step",
                message: format!("must be positive and finite, got {}", self.threshold_step),
            });
        }
        if !self.default_threshold.is_finite() || self.default_threshold < 0.0 {
            return Err(EitViewError::InvalidOption {
                name: "default_threshold",
                message: format!(
                    "must be non-negative and finite, got {}",
                    self.default_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Mesh file references inside a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Node coordinate matrix (N×2).
    pub nodes: PathBuf,
    /// Triangle connectivity matrix (M×3).
    pub elements: PathBuf,
    /// Electrode segment matrix (E×4). Optional.
    #[serde(default)]
    pub electrodes: Option<PathBuf>,
    /// Radius used to scale coordinates into render space.
    pub radius: f32,
}

/// Model section of a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// The reconstruction mesh.
    pub mesh: MeshConfig,
}

/// A session file: which mesh to show and how.
///
/// ```json
/// {
///   "model": { "mesh": { "nodes": "nodes.txt", "elements": "elements.txt",
///                        "electrodes": "electrodes.txt", "radius": 0.085 } },
///   "viewer": { "default_threshold": 0.2 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Model description.
    pub model: ModelConfig,

    /// Viewer settings.
    #[serde(default)]
    pub viewer: Options,

    /// Directory relative mesh paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl SessionConfig {
    /// Parses a session from a JSON string. Relative paths resolve against the
    /// current directory.
    pub fn from_json(src: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(src)?;
        config.viewer.validate()?;
        Ok(config)
    }

    /// Loads a session file. Relative paths resolve against its directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&src)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        log::info!("loaded session {}", path.display());
        Ok(config)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Reads the referenced matrix files and builds the mesh.
    pub fn load_mesh(&self) -> Result<Mesh> {
        let mesh = &self.model.mesh;
        let nodes = load_matrix(self.resolve(&mesh.nodes))?;
        let elements = load_matrix(self.resolve(&mesh.elements))?;
        let electrodes = match &mesh.electrodes {
            Some(path) => load_matrix(self.resolve(path))?,
            None => TextMatrix::new(0, 4, Vec::new())?,
        };
        Mesh::from_matrices(&nodes, &elements, &electrodes, mesh.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert_eq!(options.tick_period_ms, 20);
        assert!((options.tick_period_secs() - 0.02).abs() < 1e-12);
        assert_eq!(options.threshold_step, 0.05);
        assert_eq!(options.default_threshold, 0.1);
        assert!(options.highlight_first_electrode);
    }

    #[test]
    fn test_session_from_json_with_partial_viewer() {
        let src = r#"{
            "model": { "mesh": { "nodes": "n.txt", "elements": "e.txt", "radius": 2.0 } },
            "viewer": { "default_threshold": 0.3 }
        }"#;
        let config = SessionConfig::from_json(src).unwrap();
        assert_eq!(config.model.mesh.radius, 2.0);
        assert!(config.model.mesh.electrodes.is_none());
        assert_eq!(config.viewer.default_threshold, 0.3);
        assert_eq!(config.viewer.tick_period_ms, 20);
    }

    #[test]
    fn test_session_missing_model_is_error() {
        assert!(SessionConfig::from_json("{}").is_err());
    }

    #[test]
    fn test_session_rejects_bad_threshold_step() {
        for step in ["-0.05", "0.0"] {
            let src = format!(
                r#"{{
                    "model": {{ "mesh": {{
                        "nodes": "n.txt", "elements": "e.txt", "radius": 1.0
                    }} }},
                    "viewer": {{ "threshold_step": {step} }}
                }}"#
            );
            assert!(matches!(
                SessionConfig::from_json(&src),
                Err(EitViewError::InvalidOption {
                    name: "threshold_step",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_validate_options() {
        assert!(Options::default().validate().is_ok());

        let options = Options {
            threshold_step: f32::NAN,
            ..Options::default()
        };
        assert!(options.validate().is_err());

        let options = Options {
            tick_period_ms: 0,
            ..Options::default()
        };
        assert!(options.validate().is_err());

        let options = Options {
            default_threshold: -1.0,
            ..Options::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_load_mesh_from_files() {
        let dir = std::env::temp_dir().join(format!("eitview-session-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("nodes.txt"), "0 0\n1 0\n0 1\n").unwrap();
        std::fs::write(dir.join("elements.txt"), "0 1 2\n").unwrap();
        std::fs::write(dir.join("electrodes.txt"), "0 0 1 0\n").unwrap();
        std::fs::write(
            dir.join("session.json"),
            r#"{"model": {"mesh": {"nodes": "nodes.txt", "elements": "elements.txt",
                "electrodes": "electrodes.txt", "radius": 1.0}}}"#,
        )
        .unwrap();

        let config = SessionConfig::load(dir.join("session.json")).unwrap();
        let mesh = config.load_mesh().unwrap();
        assert_eq!(mesh.num_nodes(), 3);
        assert_eq!(mesh.num_triangles(), 1);
        assert_eq!(mesh.num_electrodes(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
