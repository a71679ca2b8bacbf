use super::residue::SecondaryStructure;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// A (theta, tao) pair in degrees, as written in angle tables.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnglePair {
    pub theta: f64,
    pub tao: f64,
}

impl AnglePair {
    pub const fn new(theta: f64, tao: f64) -> Self {
        Self { theta, tao }
    }

    pub fn theta_radians(&self) -> f64 {
        self.theta.to_radians()
    }

    pub fn tao_radians(&self) -> f64 {
        self.tao.to_radians()
    }
}

/// Default internal coordinates per secondary-structure class.
///
/// Built once per session and handed to chain construction by reference.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AngleDefaults {
    pub unstructured: AnglePair,
    pub helix: AnglePair,
    pub strand: AnglePair,
    pub coil: AnglePair,
}

impl Default for AngleDefaults {
    fn default() -> Self {
        Self {
            unstructured: AnglePair::new(110.0, -150.0),
            helix: AnglePair::new(89.0, 50.0),
            strand: AnglePair::new(124.0, -170.0),
            coil: AnglePair::new(110.0, -150.0),
        }
    }
}

impl AngleDefaults {
    pub fn load(path: &Path) -> Result<Self, AngleDefaultsError> {
        let content = std::fs::read_to_string(path).map_err(|e| AngleDefaultsError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| AngleDefaultsError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn for_structure(&self, structure: Option<SecondaryStructure>) -> AnglePair {
        match structure {
            None => self.unstructured,
            Some(SecondaryStructure::Helix) => self.helix,
            Some(SecondaryStructure::Strand) => self.strand,
            Some(SecondaryStructure::Coil) => self.coil,
        }
    }
}

#[derive(Debug, Error)]
pub enum AngleDefaultsError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}
