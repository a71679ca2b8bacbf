use crate::core::utils::geometry::distance;
use itertools::Itertools;
use nalgebra::Point3;
use std::cmp::Ordering;
use std::fmt;

/// Residues closer than this along the chain are bonded neighbours, never clashes.
pub const MIN_CLASH_SEPARATION: usize = 2;

/// Two non-adjacent residues placed closer than the clash threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clash {
    pub residue_a: usize,
    pub residue_b: usize,
    pub distance: f64,
}

impl Eq for Clash {}

impl PartialOrd for Clash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Clash {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .partial_cmp(&other.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| (self.residue_a, self.residue_b).cmp(&(other.residue_a, other.residue_b)))
    }
}

impl fmt::Display for Clash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "residues {} and {} are {:.3} A apart",
            self.residue_a, self.residue_b, self.distance
        )
    }
}

fn candidate_pairs(positions: &[Point3<f64>]) -> impl Iterator<Item = (usize, usize)> + '_ {
    (0..positions.len())
        .tuple_combinations()
        .filter(|&(a, b): &(usize, usize)| b - a >= MIN_CLASH_SEPARATION)
}

fn clash_between(positions: &[Point3<f64>], a: usize, b: usize, threshold: f64) -> Option<Clash> {
    let d = distance(&positions[a], &positions[b]);
    (d < threshold).then_some(Clash {
        residue_a: a,
        residue_b: b,
        distance: d,
    })
}

/// Returns the first clash found, stopping the scan at the first hit.
///
/// Pairs are visited in index order, so the clash reported is the one with the
/// lowest `(residue_a, residue_b)`.
pub fn find_first_clash(positions: &[Point3<f64>], threshold: f64) -> Option<Clash> {
    candidate_pairs(positions).find_map(|(a, b)| clash_between(positions, a, b, threshold))
}

/// Every clash in the chain, closest pair first.
pub fn find_clashes(positions: &[Point3<f64>], threshold: f64) -> Vec<Clash> {
    let mut clashes: Vec<Clash> = candidate_pairs(positions)
        .filter_map(|(a, b)| clash_between(positions, a, b, threshold))
        .collect();
    clashes.sort_unstable();
    clashes
}
