//! Conversion between internal coordinates and Cartesian positions.
//!
//! - [`forward`] places residues one after another from bond lengths, bond angles
//!   and dihedrals (the natural extension reference frame construction).
//! - [`backward`] measures those internal coordinates back out of a fixed set of
//!   positions, which is how a chain is initialised from a reference structure.

pub mod backward;
pub mod forward;

use thiserror::Error;

pub use backward::extract_angles;
pub use forward::{place_next, reconstruct, reconstruct_suffix};

/// Minimum number of residues for which every anchor can be placed.
pub const MIN_CHAIN_LENGTH: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconstructionError {
    #[error("Chain of {len} residue(s) is too short; at least {min} are required", min = MIN_CHAIN_LENGTH)]
    TooShort { len: usize },

    #[error("Got {positions} position(s) but {residue_types} residue type(s)")]
    LengthMismatch {
        positions: usize,
        residue_types: usize,
    },
}
