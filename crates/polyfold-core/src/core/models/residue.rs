use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AminoAcidType {
    // --- Aliphatic, Nonpolar ---
    Alanine,
    Glycine,
    Isoleucine,
    Leucine,
    Proline,
    Valine,

    // --- Aromatic ---
    Phenylalanine,
    Tryptophan,
    Tyrosine,

    // --- Polar, Uncharged ---
    Asparagine,
    Cysteine,
    Glutamine,
    Serine,
    Threonine,
    Methionine,

    // --- Positively Charged (Basic) ---
    Arginine,
    Histidine,
    Lysine,

    // --- Negatively Charged (Acidic) ---
    AsparticAcid,
    GlutamicAcid,

    /// Residue of unknown identity (`X` / `UNK`).
    Unknown,
}

static THREE_LETTER_CODES: Map<&'static str, AminoAcidType> = phf_map! {
    "ALA" => AminoAcidType::Alanine,
    "GLY" => AminoAcidType::Glycine,
    "ILE" => AminoAcidType::Isoleucine,
    "LEU" => AminoAcidType::Leucine,
    "PRO" => AminoAcidType::Proline,
    "VAL" => AminoAcidType::Valine,
    "PHE" => AminoAcidType::Phenylalanine,
    "TRP" => AminoAcidType::Tryptophan,
    "TYR" => AminoAcidType::Tyrosine,
    "ASN" => AminoAcidType::Asparagine,
    "CYS" => AminoAcidType::Cysteine,
    "GLN" => AminoAcidType::Glutamine,
    "SER" => AminoAcidType::Serine,
    "THR" => AminoAcidType::Threonine,
    "MET" => AminoAcidType::Methionine,
    "ARG" => AminoAcidType::Arginine,
    "HIS" => AminoAcidType::Histidine,
    "HSE" => AminoAcidType::Histidine,
    "HSD" => AminoAcidType::Histidine,
    "HSP" => AminoAcidType::Histidine,
    "LYS" => AminoAcidType::Lysine,
    "ASP" => AminoAcidType::AsparticAcid,
    "GLU" => AminoAcidType::GlutamicAcid,
    "UNK" => AminoAcidType::Unknown,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResidueCodeError {
    #[error("Unknown one-letter residue code '{0}'")]
    OneLetter(char),
    #[error("Unknown three-letter residue name '{0}'")]
    ThreeLetter(String),
    #[error("Unknown secondary structure code '{0}'")]
    SecondaryStructure(char),
}

impl AminoAcidType {
    pub fn from_one_letter(code: char) -> Result<Self, ResidueCodeError> {
        match code.to_ascii_uppercase() {
            'A' => Ok(Self::Alanine),
            'G' => Ok(Self::Glycine),
            'I' => Ok(Self::Isoleucine),
            'L' => Ok(Self::Leucine),
            'P' => Ok(Self::Proline),
            'V' => Ok(Self::Valine),
            'F' => Ok(Self::Phenylalanine),
            'W' => Ok(Self::Tryptophan),
            'Y' => Ok(Self::Tyrosine),
            'N' => Ok(Self::Asparagine),
            'C' => Ok(Self::Cysteine),
            'Q' => Ok(Self::Glutamine),
            'S' => Ok(Self::Serine),
            'T' => Ok(Self::Threonine),
            'M' => Ok(Self::Methionine),
            'R' => Ok(Self::Arginine),
            'H' => Ok(Self::Histidine),
            'K' => Ok(Self::Lysine),
            'D' => Ok(Self::AsparticAcid),
            'E' => Ok(Self::GlutamicAcid),
            'X' => Ok(Self::Unknown),
            _ => Err(ResidueCodeError::OneLetter(code)),
        }
    }

    pub fn from_three_letter(name: &str) -> Result<Self, ResidueCodeError> {
        THREE_LETTER_CODES
            .get(name.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| ResidueCodeError::ThreeLetter(name.trim().to_string()))
    }

    pub fn to_one_letter(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::Glycine => 'G',
            Self::Isoleucine => 'I',
            Self::Leucine => 'L',
            Self::Proline => 'P',
            Self::Valine => 'V',
            Self::Phenylalanine => 'F',
            Self::Tryptophan => 'W',
            Self::Tyrosine => 'Y',
            Self::Asparagine => 'N',
            Self::Cysteine => 'C',
            Self::Glutamine => 'Q',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Methionine => 'M',
            Self::Arginine => 'R',
            Self::Histidine => 'H',
            Self::Lysine => 'K',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
            Self::Unknown => 'X',
        }
    }

    pub fn to_three_letter(self) -> &'static str {
        match self {
            Self::Alanine => "ALA",
            Self::Glycine => "GLY",
            Self::Isoleucine => "ILE",
            Self::Leucine => "LEU",
            Self::Proline => "PRO",
            Self::Valine => "VAL",
            Self::Phenylalanine => "PHE",
            Self::Tryptophan => "TRP",
            Self::Tyrosine => "TYR",
            Self::Asparagine => "ASN",
            Self::Cysteine => "CYS",
            Self::Glutamine => "GLN",
            Self::Serine => "SER",
            Self::Threonine => "THR",
            Self::Methionine => "MET",
            Self::Arginine => "ARG",
            Self::Histidine => "HIS",
            Self::Lysine => "LYS",
            Self::AsparticAcid => "ASP",
            Self::GlutamicAcid => "GLU",
            Self::Unknown => "UNK",
        }
    }
}

impl fmt::Display for AminoAcidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_three_letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryStructure {
    Helix,
    Strand,
    Coil,
}

impl SecondaryStructure {
    pub fn from_code(code: char) -> Result<Self, ResidueCodeError> {
        match code {
            'H' => Ok(Self::Helix),
            'E' => Ok(Self::Strand),
            'C' => Ok(Self::Coil),
            _ => Err(ResidueCodeError::SecondaryStructure(code)),
        }
    }

    pub fn to_code(self) -> char {
        match self {
            Self::Helix => 'H',
            Self::Strand => 'E',
            Self::Coil => 'C',
        }
    }
}

impl fmt::Display for SecondaryStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Helix => "Helix",
                Self::Strand => "Strand",
                Self::Coil => "Coil",
            }
        )
    }
}

#[derive(Debug, Error)]
#[error("Invalid angle kind string")]
pub struct ParseAngleKindError;

/// Which of a residue's two editable internal coordinates is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AngleKind {
    /// Theta: angle between the incoming and outgoing virtual bonds.
    #[serde(alias = "theta")]
    BondAngle,
    /// Tao: torsion over this residue and its neighbours `i-1..=i+2`.
    #[serde(alias = "tao", alias = "tau")]
    Dihedral,
}

impl FromStr for AngleKind {
    type Err = ParseAngleKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "theta" | "bond-angle" | "bond_angle" => Ok(Self::BondAngle),
            "tao" | "tau" | "dihedral" => Ok(Self::Dihedral),
            _ => Err(ParseAngleKindError),
        }
    }
}

impl fmt::Display for AngleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BondAngle => f.write_str("theta"),
            Self::Dihedral => f.write_str("tao"),
        }
    }
}

/// One element of the reduced chain and its internal coordinates.
///
/// Angles that are geometrically undefined for a residue (theta at either end,
/// tao at the first and the last two residues) are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub index: usize,                                     // Position in chain, 0-based
    pub residue_type: AminoAcidType,                      // Informational; needed for export
    pub secondary_structure: Option<SecondaryStructure>, // Source of default angles when set
    pub(crate) bond_length: f64,      // Length of the virtual bond from residue index-1
    pub(crate) bond_angle: Option<f64>,     // Theta, radians
    pub(crate) dihedral_angle: Option<f64>, // Tao, radians
}

impl Residue {
    pub(crate) fn new(
        index: usize,
        residue_type: AminoAcidType,
        secondary_structure: Option<SecondaryStructure>,
        bond_length: f64,
    ) -> Self {
        Self {
            index,
            residue_type,
            secondary_structure,
            bond_length,
            bond_angle: None,
            dihedral_angle: None,
        }
    }

    pub fn bond_length(&self) -> f64 {
        self.bond_length
    }

    pub fn bond_angle(&self) -> Option<f64> {
        self.bond_angle
    }

    pub fn dihedral_angle(&self) -> Option<f64> {
        self.dihedral_angle
    }

    pub fn angle(&self, kind: AngleKind) -> Option<f64> {
        match kind {
            AngleKind::BondAngle => self.bond_angle,
            AngleKind::Dihedral => self.dihedral_angle,
        }
    }
}

/// Whether residue `index` of an `n`-residue chain carries an angle of `kind`.
pub fn has_angle(index: usize, kind: AngleKind, n: usize) -> bool {
    match kind {
        AngleKind::BondAngle => index >= 1 && index + 1 < n,
        AngleKind::Dihedral => index >= 1 && index + 2 < n,
    }
}
