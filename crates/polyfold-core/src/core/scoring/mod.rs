//! # Scoring Module
//!
//! Measures how close the live chain is to its reference and whether it is
//! physically plausible.
//!
//! - [`distance_map`] compares every pairwise distance against a full reference
//!   structure, split into a reference and a live triangle.
//! - [`contact_map`] checks a sparse set of residue pairs expected to be in contact.
//! - [`clash`] finds non-adjacent residues placed closer than a threshold.
//! - [`weights`] is the separation-based pair weighting shared by both scores.
//!
//! [`QualityScorer`] wraps whichever reference mode is active and keeps its live
//! distances in step with the chain.

pub mod clash;
pub mod contact_map;
pub mod distance_map;
pub mod weights;

use crate::core::models::reference::ReferenceStructure;
use contact_map::{ContactMap, ContactScore};
use distance_map::{DistanceMap, DistanceScore};
use nalgebra::Point3;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Reference has {found} residue(s) but the chain has {expected}")]
    ReferenceLengthMismatch { expected: usize, found: usize },

    #[error("Contact ({a}, {b}) is out of range for a chain of {len} residues")]
    ContactOutOfRange { a: usize, b: usize, len: usize },

    #[error("Residue {index} cannot be in contact with itself")]
    SelfContact { index: usize },

    #[error("Contact ({a}, {b}) has invalid expected distance {value}")]
    InvalidExpectedDistance { a: usize, b: usize, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoringMode {
    DistanceMap(DistanceMap),
    ContactMap(ContactMap),
}

/// Snapshot of the current quality of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QualityReport {
    /// No reference loaded.
    Unscored,
    Distance(DistanceScore),
    Contact(ContactScore),
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unscored => write!(f, "no reference loaded"),
            Self::Distance(s) => write!(
                f,
                "distance map: weighted error {:.4}, raw MSE {:.2} / {:.2} (progress {:.1}%)",
                s.weighted_error,
                s.raw_mse,
                s.max_raw_mse,
                s.progress * 100.0
            ),
            Self::Contact(s) => write!(
                f,
                "contacts: {}/{} satisfied (weighted {:.1}%, graded {:.3})",
                s.satisfied,
                s.total,
                s.fraction * 100.0,
                s.graded
            ),
        }
    }
}

/// Holds the active reference mode, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityScorer {
    mode: Option<ScoringMode>,
}

impl QualityScorer {
    pub fn unscored() -> Self {
        Self::default()
    }

    /// Builds the scorer for `reference` against the current `live` positions.
    pub fn for_reference(
        reference: &ReferenceStructure,
        live: &[Point3<f64>],
        bond_length: f64,
        contact_threshold: f64,
    ) -> Result<Self, ScoringError> {
        let mode = match reference {
            ReferenceStructure::Positions(positions) => {
                ScoringMode::DistanceMap(DistanceMap::new(positions, live, bond_length)?)
            }
            ReferenceStructure::Contacts(constraints) => ScoringMode::ContactMap(ContactMap::new(
                constraints.clone(),
                live,
                contact_threshold,
            )?),
        };
        Ok(Self { mode: Some(mode) })
    }

    pub fn mode(&self) -> Option<&ScoringMode> {
        self.mode.as_ref()
    }

    pub fn distance_map(&self) -> Option<&DistanceMap> {
        match &self.mode {
            Some(ScoringMode::DistanceMap(map)) => Some(map),
            _ => None,
        }
    }

    pub fn contact_map(&self) -> Option<&ContactMap> {
        match &self.mode {
            Some(ScoringMode::ContactMap(map)) => Some(map),
            _ => None,
        }
    }

    pub fn refresh(
        &mut self,
        positions: &[Point3<f64>],
        first_changed: usize,
    ) -> Result<(), ScoringError> {
        match &mut self.mode {
            None => Ok(()),
            Some(ScoringMode::DistanceMap(map)) => map.refresh_live(positions, first_changed),
            Some(ScoringMode::ContactMap(map)) => map.refresh_live(positions, first_changed),
        }
    }

    pub fn report(&self) -> QualityReport {
        match &self.mode {
            None => QualityReport::Unscored,
            Some(ScoringMode::DistanceMap(map)) => QualityReport::Distance(map.score()),
            Some(ScoringMode::ContactMap(map)) => QualityReport::Contact(map.score()),
        }
    }
}
