use super::{MIN_CHAIN_LENGTH, ReconstructionError};
use crate::core::models::residue::{AminoAcidType, Residue};
use crate::core::utils::geometry::{angle_between, dihedral, distance};
use nalgebra::Point3;
use tracing::debug;

/// Measures internal coordinates out of fixed positions.
///
/// Bond lengths are the measured consecutive distances, so reconstructing the
/// returned residues reproduces every pairwise distance of `positions` (the
/// result sits in the chain gauge, not in the frame of the input).
pub fn extract_angles(
    positions: &[Point3<f64>],
    residue_types: &[AminoAcidType],
) -> Result<Vec<Residue>, ReconstructionError> {
    let n = positions.len();
    if n != residue_types.len() {
        return Err(ReconstructionError::LengthMismatch {
            positions: n,
            residue_types: residue_types.len(),
        });
    }
    if n < MIN_CHAIN_LENGTH {
        return Err(ReconstructionError::TooShort { len: n });
    }

    debug!(residues = n, "Extracting internal coordinates from positions.");

    let residues = (0..n)
        .map(|i| {
            let incoming = if i == 0 { 1 } else { i };
            let bond_length = distance(&positions[incoming - 1], &positions[incoming]);
            let mut residue = Residue::new(i, residue_types[i], None, bond_length);

            if i >= 1 && i + 1 < n {
                residue.bond_angle = Some(angle_between(
                    &positions[i - 1],
                    &positions[i],
                    &positions[i + 1],
                ));
            }
            if i >= 1 && i + 2 < n {
                residue.dihedral_angle = Some(dihedral(
                    &positions[i - 1],
                    &positions[i],
                    &positions[i + 1],
                    &positions[i + 2],
                ));
            }
            residue
        })
        .collect();

    Ok(residues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reconstruction::forward::reconstruct;
    use nalgebra::{Rotation3, Vector3};

    fn helix_like_positions(n: usize) -> Vec<Point3<f64>> {
        (0..n)
            .map(|i| {
                let t = i as f64 * 100f64.to_radians();
                Point3::new(2.3 * t.cos(), 2.3 * t.sin(), 1.5 * i as f64)
            })
            .collect()
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let positions = helix_like_positions(4);
        let types = vec![AminoAcidType::Glycine; 3];
        assert_eq!(
            extract_angles(&positions, &types),
            Err(ReconstructionError::LengthMismatch {
                positions: 4,
                residue_types: 3
            })
        );
    }

    #[test]
    fn rejects_chains_shorter_than_three() {
        let positions = helix_like_positions(2);
        let types = vec![AminoAcidType::Glycine; 2];
        assert_eq!(
            extract_angles(&positions, &types),
            Err(ReconstructionError::TooShort { len: 2 })
        );
    }

    #[test]
    fn undefined_slots_stay_empty() {
        let positions = helix_like_positions(5);
        let residues = extract_angles(&positions, &[AminoAcidType::Alanine; 5]).unwrap();
        assert!(residues[0].bond_angle().is_none());
        assert!(residues[4].bond_angle().is_none());
        assert!(residues[0].dihedral_angle().is_none());
        assert!(residues[3].dihedral_angle().is_none());
        assert!(residues[4].dihedral_angle().is_none());
        assert!(residues[1..4].iter().all(|r| r.bond_angle().is_some()));
        assert!(residues[1..3].iter().all(|r| r.dihedral_angle().is_some()));
    }

    #[test]
    fn extraction_preserves_all_pairwise_distances() {
        let rotation = Rotation3::from_axis_angle(&Vector3::y_axis(), 0.7);
        let reference: Vec<Point3<f64>> = helix_like_positions(10)
            .into_iter()
            .map(|p| rotation * p + Vector3::new(5.0, -2.0, 11.0))
            .collect();

        let residues = extract_angles(&reference, &[AminoAcidType::Leucine; 10]).unwrap();
        let rebuilt = reconstruct(&residues);

        for i in 0..10 {
            for j in (i + 1)..10 {
                let expected = distance(&reference[i], &reference[j]);
                let actual = distance(&rebuilt[i], &rebuilt[j]);
                assert!((expected - actual).abs() < 1e-6, "pair ({i}, {j})");
            }
        }
    }

    #[test]
    fn round_trip_through_positions_reproduces_positions() {
        let original = helix_like_positions(16);
        let first = reconstruct(&extract_angles(&original, &[AminoAcidType::Serine; 16]).unwrap());
        let second = reconstruct(&extract_angles(&first, &[AminoAcidType::Serine; 16]).unwrap());

        for (a, b) in first.iter().zip(&second) {
            assert!((a - b).norm() < 1e-6);
        }
    }
}
