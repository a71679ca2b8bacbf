use crate::core::io::traits::RecordFile;
use crate::core::models::residue::{AminoAcidType, ResidueCodeError, SecondaryStructure};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid code on line {line}, column {column}: {source}")]
    InvalidCode {
        line: usize,
        column: usize,
        source: ResidueCodeError,
    },
    #[error("File contains no residue codes")]
    Empty,
}

/// One-letter amino-acid sequence (`.aa`).
///
/// Codes may be split over several lines; whitespace is ignored and lines
/// starting with `>` or `;` are treated as headers.
pub struct SequenceFile;

/// One-letter secondary-structure string (`.ss`): `H`, `E` or `C` per residue.
pub struct StructureFile;

fn read_codes<T>(
    reader: &mut impl BufRead,
    decode: impl Fn(char) -> Result<T, ResidueCodeError>,
) -> Result<Vec<T>, SequenceError> {
    let mut tokens = Vec::new();
    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let trimmed = line.trim_start();
        if trimmed.starts_with('>') || trimmed.starts_with(';') {
            continue;
        }
        for (col, c) in line.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let token = decode(c).map_err(|source| SequenceError::InvalidCode {
                line: line_num + 1,
                column: col + 1,
                source,
            })?;
            tokens.push(token);
        }
    }
    if tokens.is_empty() {
        return Err(SequenceError::Empty);
    }
    Ok(tokens)
}

impl RecordFile for SequenceFile {
    type Data = Vec<AminoAcidType>;
    type Error = SequenceError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        read_codes(reader, AminoAcidType::from_one_letter)
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let line: String = data.iter().map(|aa| aa.to_one_letter()).collect();
        writeln!(writer, "{}", line)?;
        Ok(())
    }
}

impl RecordFile for StructureFile {
    type Data = Vec<SecondaryStructure>;
    type Error = SequenceError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        read_codes(reader, SecondaryStructure::from_code)
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        let line: String = data.iter().map(|ss| ss.to_code()).collect();
        writeln!(writer, "{}", line)?;
        Ok(())
    }
}
