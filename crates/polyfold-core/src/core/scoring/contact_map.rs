use super::ScoringError;
use super::weights::pair_weight;
use crate::core::models::reference::ContactConstraint;
use crate::core::utils::geometry::{EPSILON, distance};
use nalgebra::Point3;
use tracing::trace;

/// Live distances for a fixed set of contact constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMap {
    constraints: Vec<ContactConstraint>,
    live: Vec<f64>,
    threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactScore {
    pub satisfied: usize,
    pub total: usize,
    /// Weight of satisfied contacts over the weight of all contacts.
    pub fraction: f64,
    /// Weighted mean of `min(1, expected / live)` over all contacts.
    pub graded: f64,
}

impl ContactMap {
    /// Validates the constraints against a chain of `positions.len()` residues.
    pub fn new(
        constraints: Vec<ContactConstraint>,
        positions: &[Point3<f64>],
        threshold: f64,
    ) -> Result<Self, ScoringError> {
        let len = positions.len();
        for c in &constraints {
            if c.a >= len || c.b >= len {
                return Err(ScoringError::ContactOutOfRange { a: c.a, b: c.b, len });
            }
            if c.a == c.b {
                return Err(ScoringError::SelfContact { index: c.a });
            }
            if !(c.expected_distance.is_finite() && c.expected_distance > 0.0) {
                return Err(ScoringError::InvalidExpectedDistance {
                    a: c.a,
                    b: c.b,
                    value: c.expected_distance,
                });
            }
        }

        let live = constraints
            .iter()
            .map(|c| distance(&positions[c.a], &positions[c.b]))
            .collect();
        Ok(Self {
            constraints,
            live,
            threshold,
        })
    }

    pub fn constraints(&self) -> &[ContactConstraint] {
        &self.constraints
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn live_distances(&self) -> &[f64] {
        &self.live
    }

    /// Recomputes the constraints with at least one end at or after `first_changed`.
    pub fn refresh_live(
        &mut self,
        positions: &[Point3<f64>],
        first_changed: usize,
    ) -> Result<(), ScoringError> {
        trace!(first_changed, "Refreshing contact distances.");
        for (c, live) in self.constraints.iter().zip(self.live.iter_mut()) {
            if c.a.max(c.b) < first_changed {
                continue;
            }
            let (Some(a), Some(b)) = (positions.get(c.a), positions.get(c.b)) else {
                return Err(ScoringError::ContactOutOfRange {
                    a: c.a,
                    b: c.b,
                    len: positions.len(),
                });
            };
            *live = distance(a, b);
        }
        Ok(())
    }

    pub fn score(&self) -> ContactScore {
        let mut satisfied = 0;
        let mut weight_sum = 0.0;
        let mut satisfied_weight = 0.0;
        let mut credit_sum = 0.0;

        for (c, &live) in self.constraints.iter().zip(&self.live) {
            let weight = pair_weight(c.a, c.b);
            weight_sum += weight;
            if live < self.threshold {
                satisfied += 1;
                satisfied_weight += weight;
            }
            let credit = if live <= EPSILON {
                1.0
            } else {
                (c.expected_distance / live).min(1.0)
            };
            credit_sum += weight * credit;
        }

        let (fraction, graded) = if weight_sum > 0.0 {
            (satisfied_weight / weight_sum, credit_sum / weight_sum)
        } else {
            (0.0, 0.0)
        };

        ContactScore {
            satisfied,
            total: self.constraints.len(),
            fraction,
            graded,
        }
    }
}
