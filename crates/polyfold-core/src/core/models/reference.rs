use nalgebra::Point3;

/// A pair of residues expected to lie close together in the folded chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactConstraint {
    pub a: usize, // 0-based residue index
    pub b: usize,
    pub expected_distance: f64, // Angstroms
}

impl ContactConstraint {
    pub fn new(a: usize, b: usize, expected_distance: f64) -> Self {
        Self {
            a,
            b,
            expected_distance,
        }
    }

    pub fn separation(&self) -> usize {
        self.a.abs_diff(self.b)
    }
}

/// The target a live chain is scored against. Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceStructure {
    /// One position per residue of the live chain.
    Positions(Vec<Point3<f64>>),
    /// Sparse contact constraints.
    Contacts(Vec<ContactConstraint>),
}

impl ReferenceStructure {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Positions(_) => "positions",
            Self::Contacts(_) => "contacts",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Positions(p) => p.len(),
            Self::Contacts(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
