use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::chain::ChainError;
use crate::core::models::residue::AngleKind;
use crate::core::reconstruction::ReconstructionError;
use crate::core::scoring::ScoringError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Chain error: {source}")]
    Chain {
        #[from]
        source: ChainError,
    },

    #[error("Reconstruction failed: {source}")]
    Reconstruction {
        #[from]
        source: ReconstructionError,
    },

    #[error("Scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Residue {index} has no editable {kind} angle in a chain of {len} residues")]
    InvalidAngleSlot {
        index: usize,
        kind: AngleKind,
        len: usize,
    },

    #[error("Angle value for residue {index} ({kind}) is not finite: {value}")]
    NonFiniteAngle {
        index: usize,
        kind: AngleKind,
        value: f64,
    },
}
