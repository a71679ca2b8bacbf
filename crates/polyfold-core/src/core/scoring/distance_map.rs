use super::ScoringError;
use super::weights::pair_weight;
use crate::core::utils::geometry::{EPSILON, distance};
use nalgebra::Point3;
use tracing::trace;

/// Value stored on the diagonal, where no pair exists.
pub const DIAGONAL_SENTINEL: f64 = -1.0;

/// Square map of pairwise distances split along the diagonal.
///
/// Cell `(i, j)` with `i < j` holds the reference distance, `i > j` the live one.
/// Reference cells never change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    size: usize,
    bond_length: f64,
    cells: Vec<f64>,
    max_raw_mse: f64,
}

/// Summary of how far the live chain is from the reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceScore {
    /// Weighted mean of squared per-pair errors in `[0, 1]`; 0 is a perfect match.
    pub weighted_error: f64,
    /// Weighted mean squared distance deviation, in square Angstroms.
    pub raw_mse: f64,
    /// Worst achievable `raw_mse` for this reference.
    pub max_raw_mse: f64,
    /// `raw_mse / max_raw_mse`, clamped to `[0, 1]`.
    pub progress: f64,
}

/// One lower-triangle pair, as exported to CSV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRecord {
    pub i: usize,
    pub j: usize,
    pub separation: usize,
    pub weight: f64,
    pub reference: f64,
    pub live: f64,
    pub error: f64,
}

impl DistanceMap {
    pub fn new(
        reference: &[Point3<f64>],
        live: &[Point3<f64>],
        bond_length: f64,
    ) -> Result<Self, ScoringError> {
        if reference.len() != live.len() {
            return Err(ScoringError::ReferenceLengthMismatch {
                expected: live.len(),
                found: reference.len(),
            });
        }
        let size = reference.len();
        let mut map = Self {
            size,
            bond_length,
            cells: vec![0.0; size * size],
            max_raw_mse: 0.0,
        };

        for i in 0..size {
            map.cells[i * size + i] = DIAGONAL_SENTINEL;
            for j in (i + 1)..size {
                map.cells[i * size + j] = distance(&reference[i], &reference[j]);
                map.cells[j * size + i] = distance(&live[j], &live[i]);
            }
        }
        map.max_raw_mse = map.compute_max_raw_mse();
        Ok(map)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw cell access; `None` outside the map.
    pub fn cell(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.size && col < self.size).then(|| self.cells[row * self.size + col])
    }

    /// Reference distance between `i` and `j` in either order.
    pub fn reference(&self, i: usize, j: usize) -> Option<f64> {
        if i == j {
            return None;
        }
        self.cell(i.min(j), i.max(j))
    }

    /// Live distance between `i` and `j` in either order.
    pub fn live(&self, i: usize, j: usize) -> Option<f64> {
        if i == j {
            return None;
        }
        self.cell(i.max(j), i.min(j))
    }

    pub fn max_raw_mse(&self) -> f64 {
        self.max_raw_mse
    }

    /// Recomputes every live cell that involves a residue at or after `first_changed`.
    pub fn refresh_live(
        &mut self,
        positions: &[Point3<f64>],
        first_changed: usize,
    ) -> Result<(), ScoringError> {
        if positions.len() != self.size {
            return Err(ScoringError::ReferenceLengthMismatch {
                expected: positions.len(),
                found: self.size,
            });
        }
        trace!(first_changed, "Refreshing live distances.");
        for i in first_changed.min(self.size)..self.size {
            for j in 0..i {
                self.cells[i * self.size + j] = distance(&positions[i], &positions[j]);
            }
        }
        Ok(())
    }

    /// Dimensionless error of the live distance for pair `(i, j)`, in `[0, 1]`.
    ///
    /// Too-short pairs are measured against collapse onto each other; too-long
    /// pairs against the fully extended chain.
    pub fn pair_error(&self, i: usize, j: usize) -> Option<f64> {
        let reference = self.reference(i, j)?;
        let live = self.live(i, j)?;
        Some(pair_error(live, reference, i.abs_diff(j), self.bond_length))
    }

    pub fn pairs(&self) -> impl Iterator<Item = PairRecord> + '_ {
        (0..self.size).flat_map(move |i| {
            (0..i).map(move |j| {
                let reference = self.cells[j * self.size + i];
                let live = self.cells[i * self.size + j];
                let separation = i - j;
                PairRecord {
                    i,
                    j,
                    separation,
                    weight: pair_weight(i, j),
                    reference,
                    live,
                    error: pair_error(live, reference, separation, self.bond_length),
                }
            })
        })
    }

    pub fn score(&self) -> DistanceScore {
        let mut weight_sum = 0.0;
        let mut error_sum = 0.0;
        let mut squared_sum = 0.0;
        for pair in self.pairs() {
            weight_sum += pair.weight;
            error_sum += pair.weight * pair.error * pair.error;
            squared_sum += pair.weight * (pair.live - pair.reference).powi(2);
        }

        let (weighted_error, raw_mse) = if weight_sum > 0.0 {
            (error_sum / weight_sum, squared_sum / weight_sum)
        } else {
            (0.0, 0.0)
        };
        let progress = if self.max_raw_mse > EPSILON {
            (raw_mse / self.max_raw_mse).clamp(0.0, 1.0)
        } else {
            0.0
        };

        DistanceScore {
            weighted_error,
            raw_mse,
            max_raw_mse: self.max_raw_mse,
            progress,
        }
    }

    fn compute_max_raw_mse(&self) -> f64 {
        let mut weight_sum = 0.0;
        let mut squared_sum = 0.0;
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let reference = self.cells[i * self.size + j];
                let extended = self.bond_length * (j - i) as f64;
                let worst = (extended - reference).max(reference);
                let weight = pair_weight(i, j);
                weight_sum += weight;
                squared_sum += weight * worst * worst;
            }
        }
        if weight_sum > 0.0 {
            squared_sum / weight_sum
        } else {
            0.0
        }
    }
}

fn pair_error(live: f64, reference: f64, separation: usize, bond_length: f64) -> f64 {
    let error = if live <= reference {
        if reference <= EPSILON {
            0.0
        } else {
            1.0 - live / reference
        }
    } else {
        let span = bond_length * separation as f64 - reference;
        if span <= EPSILON {
            0.0
        } else {
            (live - reference) / span
        }
    };
    error.clamp(0.0, 1.0)
}
