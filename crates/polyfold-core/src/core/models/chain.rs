use super::defaults::AngleDefaults;
use super::residue::{AminoAcidType, AngleKind, Residue, SecondaryStructure, has_angle};
use crate::core::reconstruction::{self, MIN_CHAIN_LENGTH};
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChainError {
    #[error("Chain of {len} residue(s) is too short; at least {min} are required", min = MIN_CHAIN_LENGTH)]
    TooShort { len: usize },

    #[error("Secondary structure has {found} entries but the sequence has {expected}")]
    StructureLengthMismatch { expected: usize, found: usize },

    #[error("Residue {index} has no {kind} angle in a chain of {len} residues")]
    NoSuchAngle {
        index: usize,
        kind: AngleKind,
        len: usize,
    },

    #[error("Positions are stale from residue {dirty_from} onward; rebuild the chain first")]
    StalePositions { dirty_from: usize },
}

/// One residue as written to (or read from) a C-alpha trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRecord {
    pub sequence_number: usize, // 1-based
    pub residue_type: AminoAcidType,
    pub position: Point3<f64>,
}

/// An ordered, index-stable chain of residues and its last computed positions.
///
/// Positions are consistent with the internal coordinates whenever the chain is
/// clean. Every angle mutation marks the first stale position; [`Chain::rebuild`]
/// recomputes from there.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    residues: Vec<Residue>,
    positions: Vec<Point3<f64>>,
    dirty_from: Option<usize>,
}

impl Chain {
    /// Builds a chain from sequence tokens, filling angles from `defaults`.
    ///
    /// Fails without side effects if the chain is too short or the structure
    /// tokens do not line up with the sequence.
    pub fn from_sequence(
        residue_types: &[AminoAcidType],
        structure: Option<&[SecondaryStructure]>,
        defaults: &AngleDefaults,
        bond_length: f64,
    ) -> Result<Self, ChainError> {
        let n = residue_types.len();
        if n < MIN_CHAIN_LENGTH {
            return Err(ChainError::TooShort { len: n });
        }
        if let Some(structure) = structure {
            if structure.len() != n {
                return Err(ChainError::StructureLengthMismatch {
                    expected: n,
                    found: structure.len(),
                });
            }
        }

        let residues = residue_types
            .iter()
            .enumerate()
            .map(|(i, &residue_type)| {
                let secondary_structure = structure.map(|s| s[i]);
                let angles = defaults.for_structure(secondary_structure);
                let mut residue = Residue::new(i, residue_type, secondary_structure, bond_length);
                if has_angle(i, AngleKind::BondAngle, n) {
                    residue.bond_angle = Some(angles.theta_radians());
                }
                if has_angle(i, AngleKind::Dihedral, n) {
                    residue.dihedral_angle = Some(angles.tao_radians());
                }
                residue
            })
            .collect();

        Self::from_residues(residues)
    }

    /// Wraps already-complete residues (e.g. extracted from a reference) and
    /// places them.
    pub fn from_residues(mut residues: Vec<Residue>) -> Result<Self, ChainError> {
        let n = residues.len();
        if n < MIN_CHAIN_LENGTH {
            return Err(ChainError::TooShort { len: n });
        }
        for (i, residue) in residues.iter_mut().enumerate() {
            residue.index = i;
            if !has_angle(i, AngleKind::BondAngle, n) {
                residue.bond_angle = None;
            }
            if !has_angle(i, AngleKind::Dihedral, n) {
                residue.dihedral_angle = None;
            }
        }
        let positions = reconstruction::reconstruct(&residues);
        Ok(Self {
            residues,
            positions,
            dirty_from: None,
        })
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue(&self, index: usize) -> Option<&Residue> {
        self.residues.get(index)
    }

    pub fn residue_types(&self) -> Vec<AminoAcidType> {
        self.residues.iter().map(|r| r.residue_type).collect()
    }

    pub fn angle(&self, index: usize, kind: AngleKind) -> Result<f64, ChainError> {
        self.residues
            .get(index)
            .and_then(|r| r.angle(kind))
            .ok_or(ChainError::NoSuchAngle {
                index,
                kind,
                len: self.len(),
            })
    }

    pub fn has_angle(&self, index: usize, kind: AngleKind) -> bool {
        has_angle(index, kind, self.len())
    }

    /// Overwrites a single angle and returns the value it replaced.
    ///
    /// The value is stored as given; range checks belong to the caller. Positions
    /// from the first affected residue onward become stale.
    pub fn apply_angle(
        &mut self,
        index: usize,
        kind: AngleKind,
        value: f64,
    ) -> Result<f64, ChainError> {
        let len = self.len();
        if !has_angle(index, kind, len) {
            return Err(ChainError::NoSuchAngle { index, kind, len });
        }

        let residue = &mut self.residues[index];
        let slot = match kind {
            AngleKind::BondAngle => &mut residue.bond_angle,
            AngleKind::Dihedral => &mut residue.dihedral_angle,
        };
        let previous = slot.replace(value).ok_or(ChainError::NoSuchAngle { index, kind, len })?;

        let first_affected = first_affected_position(index, kind);
        self.dirty_from = Some(self.dirty_from.map_or(first_affected, |d| d.min(first_affected)));
        Ok(previous)
    }

    pub fn dirty_from(&self) -> Option<usize> {
        self.dirty_from
    }

    /// Recomputes stale positions and returns the first index that was recomputed.
    pub fn rebuild(&mut self) -> Option<usize> {
        let start = self.dirty_from.take()?;
        self.positions = reconstruction::reconstruct_suffix(&self.residues, &self.positions, start);
        Some(start)
    }

    pub fn current_positions(&self) -> Result<&[Point3<f64>], ChainError> {
        match self.dirty_from {
            Some(dirty_from) => Err(ChainError::StalePositions { dirty_from }),
            None => Ok(&self.positions),
        }
    }

    pub fn export_records(&self) -> Result<Vec<ExportRecord>, ChainError> {
        let positions = self.current_positions()?;
        Ok(self
            .residues
            .iter()
            .zip(positions)
            .map(|(residue, &position)| ExportRecord {
                sequence_number: residue.index + 1,
                residue_type: residue.residue_type,
                position,
            })
            .collect())
    }
}

/// First residue whose position depends on the angle at `(index, kind)`.
///
/// Theta at `k` is first read when placing residue `k + 1`; tao at `k` when
/// placing residue `k + 2`.
pub fn first_affected_position(index: usize, kind: AngleKind) -> usize {
    match kind {
        AngleKind::BondAngle => index + 1,
        AngleKind::Dihedral => index + 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::{angle_between, distance};

    fn sequence(n: usize) -> Vec<AminoAcidType> {
        vec![AminoAcidType::Alanine; n]
    }

    fn default_chain(n: usize) -> Chain {
        Chain::from_sequence(&sequence(n), None, &AngleDefaults::default(), 3.8).unwrap()
    }

    #[test]
    fn five_residue_default_chain_has_expected_anchors() {
        let chain = default_chain(5);
        let positions = chain.current_positions().unwrap();

        assert_eq!(positions[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(positions[1], Point3::new(3.8, 0.0, 0.0));
        assert!((distance(&positions[1], &positions[2]) - 3.8).abs() < 1e-9);
        let theta = angle_between(&positions[0], &positions[1], &positions[2]);
        assert!((theta.to_degrees() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn default_angles_fill_only_defined_slots() {
        let chain = default_chain(5);
        let residues = chain.residues();
        assert!(residues[0].bond_angle().is_none());
        assert!(residues[4].bond_angle().is_none());
        assert!(residues[0].dihedral_angle().is_none());
        assert!(residues[3].dihedral_angle().is_none());
        assert!(residues[4].dihedral_angle().is_none());
        assert!((residues[2].bond_angle().unwrap().to_degrees() - 110.0).abs() < 1e-12);
        assert!((residues[2].dihedral_angle().unwrap().to_degrees() + 150.0).abs() < 1e-12);
    }

    #[test]
    fn secondary_structure_supplies_per_residue_defaults() {
        let structure = [
            SecondaryStructure::Helix,
            SecondaryStructure::Helix,
            SecondaryStructure::Strand,
            SecondaryStructure::Coil,
            SecondaryStructure::Coil,
        ];
        let chain =
            Chain::from_sequence(&sequence(5), Some(&structure), &AngleDefaults::default(), 3.8)
                .unwrap();
        let residues = chain.residues();
        assert_eq!(residues[1].secondary_structure, Some(SecondaryStructure::Helix));
        assert!((residues[1].bond_angle().unwrap().to_degrees() - 89.0).abs() < 1e-12);
        assert!((residues[1].dihedral_angle().unwrap().to_degrees() - 50.0).abs() < 1e-12);
        assert!((residues[2].bond_angle().unwrap().to_degrees() - 124.0).abs() < 1e-12);
        assert!((residues[2].dihedral_angle().unwrap().to_degrees() + 170.0).abs() < 1e-12);
        assert!((residues[3].bond_angle().unwrap().to_degrees() - 110.0).abs() < 1e-12);
        assert!(residues[3].dihedral_angle().is_none());
    }

    #[test]
    fn rejects_structure_of_wrong_length() {
        let structure = [SecondaryStructure::Helix; 4];
        let result =
            Chain::from_sequence(&sequence(5), Some(&structure), &AngleDefaults::default(), 3.8);
        assert_eq!(
            result,
            Err(ChainError::StructureLengthMismatch {
                expected: 5,
                found: 4
            })
        );
    }

    #[test]
    fn rejects_chains_shorter_than_three() {
        let result = Chain::from_sequence(&sequence(2), None, &AngleDefaults::default(), 3.8);
        assert_eq!(result, Err(ChainError::TooShort { len: 2 }));
    }

    #[test]
    fn apply_angle_mutates_one_field_and_marks_suffix_stale() {
        let mut chain = default_chain(8);
        let before = chain.residues().to_vec();

        let previous = chain.apply_angle(3, AngleKind::Dihedral, 1.0).unwrap();

        assert!((previous.to_degrees() + 150.0).abs() < 1e-12);
        assert_eq!(chain.dirty_from(), Some(5));
        assert!(matches!(
            chain.current_positions(),
            Err(ChainError::StalePositions { dirty_from: 5 })
        ));
        for (i, (old, new)) in before.iter().zip(chain.residues()).enumerate() {
            if i == 3 {
                assert_eq!(old.bond_angle(), new.bond_angle());
                assert_eq!(new.dihedral_angle(), Some(1.0));
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn dirty_suffix_tracks_the_earliest_edit() {
        let mut chain = default_chain(10);
        chain.apply_angle(6, AngleKind::BondAngle, 1.5).unwrap();
        chain.apply_angle(2, AngleKind::Dihedral, 0.3).unwrap();
        chain.apply_angle(4, AngleKind::BondAngle, 1.7).unwrap();
        assert_eq!(chain.dirty_from(), Some(4));
        assert_eq!(chain.rebuild(), Some(4));
        assert!(chain.current_positions().is_ok());
        assert_eq!(chain.rebuild(), None);
    }

    #[test]
    fn model_stores_out_of_range_values_verbatim() {
        let mut chain = default_chain(6);
        chain.apply_angle(2, AngleKind::BondAngle, 7.5).unwrap();
        assert_eq!(chain.angle(2, AngleKind::BondAngle).unwrap(), 7.5);
    }

    #[test]
    fn apply_angle_rejects_endpoint_slots() {
        let mut chain = default_chain(6);
        for (index, kind) in [
            (0, AngleKind::BondAngle),
            (5, AngleKind::BondAngle),
            (0, AngleKind::Dihedral),
            (4, AngleKind::Dihedral),
            (5, AngleKind::Dihedral),
            (42, AngleKind::BondAngle),
        ] {
            assert_eq!(
                chain.apply_angle(index, kind, 1.0),
                Err(ChainError::NoSuchAngle { index, kind, len: 6 })
            );
        }
        assert!(chain.current_positions().is_ok());
    }

    #[test]
    fn rebuild_matches_fresh_reconstruction() {
        let mut chain = default_chain(12);
        chain.apply_angle(5, AngleKind::BondAngle, 1.2).unwrap();
        chain.rebuild();
        let fresh = reconstruction::reconstruct(chain.residues());
        assert_eq!(chain.current_positions().unwrap(), fresh.as_slice());
    }

    #[test]
    fn dihedral_edit_is_local_to_the_downstream_suffix() {
        let mut chain = default_chain(10);
        let before = chain.current_positions().unwrap().to_vec();
        let k = 4;

        chain.apply_angle(k, AngleKind::Dihedral, 0.5).unwrap();
        chain.rebuild();
        let after = chain.current_positions().unwrap();

        for i in 0..k - 1 {
            assert_eq!(before[i], after[i]);
        }
        assert!((k..10).any(|i| (before[i] - after[i]).norm() > 1e-6));
    }

    #[test]
    fn export_records_are_one_based_and_need_clean_positions() {
        let mut chain = default_chain(4);
        let records = chain.export_records().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].sequence_number, 1);
        assert_eq!(records[3].sequence_number, 4);
        assert_eq!(records[1].position, Point3::new(3.8, 0.0, 0.0));
        assert_eq!(records[2].residue_type, AminoAcidType::Alanine);

        chain.apply_angle(1, AngleKind::BondAngle, 1.0).unwrap();
        assert!(chain.export_records().is_err());
    }

    #[test]
    fn from_residues_reindexes_and_clears_undefined_slots() {
        let mut residues = default_chain(4).residues().to_vec();
        residues[0].bond_angle = Some(1.0);
        residues[3].index = 17;
        let chain = Chain::from_residues(residues).unwrap();
        assert!(chain.residues()[0].bond_angle().is_none());
        assert_eq!(chain.residues()[3].index, 3);
    }
}
