use crate::core::io::traits::RecordFile;
use crate::core::models::reference::ContactConstraint;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: ContactsParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum ContactsParseErrorKind {
    #[error("Expected at least two residue numbers")]
    MissingResidue,
    #[error("Invalid residue number '{0}' (residues are numbered from 1)")]
    InvalidResidue(String),
    #[error("Invalid {field} value '{value}'")]
    InvalidFloat { field: &'static str, value: String },
}

/// One line of a CASP RR contact list, residue numbers 1-based as in the file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RrContact {
    pub i: usize,
    pub j: usize,
    pub d_low: Option<f64>,
    pub d_high: Option<f64>,
    pub probability: Option<f64>,
}

impl RrContact {
    /// Converts to a 0-based constraint; without an upper bound the contact is
    /// expected at `default_distance`.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsParseErrorKind::InvalidResidue`] if either residue
    /// number is 0.
    pub fn to_constraint(
        &self,
        default_distance: f64,
    ) -> Result<ContactConstraint, ContactsParseErrorKind> {
        let zero_based = |n: usize| {
            n.checked_sub(1)
                .ok_or_else(|| ContactsParseErrorKind::InvalidResidue(n.to_string()))
        };
        Ok(ContactConstraint::new(
            zero_based(self.i)?,
            zero_based(self.j)?,
            self.d_high.unwrap_or(default_distance),
        ))
    }
}

pub fn to_constraints(
    contacts: &[RrContact],
    default_distance: f64,
) -> Result<Vec<ContactConstraint>, ContactsParseErrorKind> {
    contacts
        .iter()
        .map(|c| c.to_constraint(default_distance))
        .collect()
}

const HEADER_RECORDS: [&str; 7] = ["PFRMAT", "TARGET", "AUTHOR", "METHOD", "MODEL", "REMARK", "END"];

fn is_header(first: &str) -> bool {
    HEADER_RECORDS.contains(&first) || first.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_residue(token: Option<&str>) -> Result<usize, ContactsParseErrorKind> {
    let token = token.ok_or(ContactsParseErrorKind::MissingResidue)?;
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ContactsParseErrorKind::InvalidResidue(token.to_string())),
    }
}

fn parse_optional(
    token: Option<&str>,
    field: &'static str,
) -> Result<Option<f64>, ContactsParseErrorKind> {
    token
        .map(|t| {
            t.parse::<f64>().map_err(|_| ContactsParseErrorKind::InvalidFloat {
                field,
                value: t.to_string(),
            })
        })
        .transpose()
}

fn parse_line(line: &str) -> Result<Option<RrContact>, ContactsParseErrorKind> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };
    if is_header(first) {
        return Ok(None);
    }
    let i = parse_residue(Some(first))?;
    let j = parse_residue(tokens.next())?;
    let d_low = parse_optional(tokens.next(), "d_low")?;
    let d_high = parse_optional(tokens.next(), "d_high")?;
    let probability = parse_optional(tokens.next(), "probability")?;
    Ok(Some(RrContact {
        i,
        j,
        d_low,
        d_high,
        probability,
    }))
}

/// CASP RR contact list (`.rr`).
///
/// Header records and the one-letter sequence line are skipped; every other
/// line is `i j [d_low d_high [probability]]`.
pub struct ContactsFile;

impl RecordFile for ContactsFile {
    type Data = Vec<RrContact>;
    type Error = ContactsError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut contacts = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let parsed = parse_line(&line).map_err(|kind| ContactsError::Parse {
                line: line_num + 1,
                kind,
            })?;
            contacts.extend(parsed);
        }
        Ok(contacts)
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        for c in data {
            write!(writer, "{} {}", c.i, c.j)?;
            if let (Some(low), Some(high)) = (c.d_low, c.d_high) {
                write!(writer, " {} {}", low, high)?;
                if let Some(p) = c.probability {
                    write!(writer, " {}", p)?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }
}
