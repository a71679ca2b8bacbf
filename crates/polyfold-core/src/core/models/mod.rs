//! # Core Models Module
//!
//! Data structures for the reduced chain and the structures it is compared with.
//!
//! ## Key Components
//!
//! - [`residue`] - Residue identity, secondary-structure class and internal coordinates
//! - [`chain`] - The ordered residue chain with its cached positions and dirty suffix
//! - [`defaults`] - Default bond and dihedral angles per secondary-structure class
//! - [`reference`] - Reference positions or contact constraints used for scoring
//!
//! ## Usage
//!
//! ```ignore
//! use polyfold::core::models::{chain::Chain, defaults::AngleDefaults, residue::AminoAcidType};
//!
//! let sequence = [AminoAcidType::Alanine; 8];
//! let mut chain = Chain::from_sequence(&sequence, None, &AngleDefaults::default(), 3.8)?;
//! chain.apply_angle(3, AngleKind::Dihedral, 0.9)?;
//! chain.rebuild();
//! let positions = chain.current_positions()?;
//! ```

pub mod chain;
pub mod defaults;
pub mod reference;
pub mod residue;
