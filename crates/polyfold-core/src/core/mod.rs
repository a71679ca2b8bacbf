//! # Core Module
//!
//! Stateless building blocks of PolyFold.
//!
//! - **Chain Representation** ([`models`]) - Residues, chains, angle defaults and reference structures
//! - **Geometry** ([`utils`]) - Vector helpers, bond angles and dihedrals
//! - **Reconstruction** ([`reconstruction`]) - Internal coordinates to positions and back
//! - **Scoring** ([`scoring`]) - Distance-map and contact-map scores, clash detection
//! - **File I/O** ([`io`]) - Sequence, secondary-structure, PDB, contact and CSV files
//!
//! Nothing in this module keeps state between calls; the stateful editing loop
//! lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod reconstruction;
pub mod scoring;
pub mod utils;
