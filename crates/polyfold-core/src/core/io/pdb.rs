use crate::core::io::traits::RecordFile;
use crate::core::models::chain::ExportRecord;
use crate::core::models::residue::AminoAcidType;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("No C-alpha ATOM records found")]
    NoCaRecords,
}

#[derive(Debug, Error, PartialEq)]
pub enum PdbParseErrorKind {
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Unknown residue name '{0}'")]
    UnknownResidue(String),
    #[error("Line is too short for an ATOM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_coordinate(line: &str, start: usize, end: usize) -> Result<f64, PdbParseErrorKind> {
    let value = slice_and_trim(line, start, end);
    value
        .parse::<f64>()
        .map_err(|_| PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.to_string(),
        })
}

fn parse_ca_line(line: &str, sequence_number: usize) -> Result<ExportRecord, PdbParseErrorKind> {
    if line.len() < 54 {
        return Err(PdbParseErrorKind::LineTooShort);
    }
    let res_name = slice_and_trim(line, 17, 20);
    let residue_type = AminoAcidType::from_three_letter(res_name)
        .map_err(|_| PdbParseErrorKind::UnknownResidue(res_name.to_string()))?;
    let x = parse_coordinate(line, 30, 38)?;
    let y = parse_coordinate(line, 38, 46)?;
    let z = parse_coordinate(line, 46, 54)?;
    Ok(ExportRecord {
        sequence_number,
        residue_type,
        position: Point3::new(x, y, z),
    })
}

/// C-alpha-only PDB trace.
///
/// Reading keeps the `CA` atoms of the first model (alternate location `A` or
/// blank) in file order and renumbers them from 1. Writing emits one fixed-column
/// `ATOM` record per residue.
pub struct PdbFile;

impl RecordFile for PdbFile {
    type Data = Vec<ExportRecord>;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error> {
        let mut records = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let record_name = slice_and_trim(&line, 0, 6);
            match record_name {
                "ENDMDL" | "END" => break,
                "ATOM" | "HETATM" => {}
                _ => continue,
            }
            if slice_and_trim(&line, 12, 16) != "CA" {
                continue;
            }
            if !matches!(line.get(16..17), None | Some(" ") | Some("A")) {
                continue;
            }
            let record = parse_ca_line(&line, records.len() + 1).map_err(|kind| PdbError::Parse {
                line: line_num + 1,
                kind,
            })?;
            records.push(record);
        }
        if records.is_empty() {
            return Err(PdbError::NoCaRecords);
        }
        Ok(records)
    }

    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error> {
        for record in data {
            writeln!(
                writer,
                "ATOM  {:5}  CA  {:<3} {:5}    {:8.3}{:8.3}{:8.3}  1.00  0.00",
                record.sequence_number,
                record.residue_type.to_three_letter(),
                record.sequence_number,
                record.position.x,
                record.position.y,
                record.position.z,
            )?;
        }
        writeln!(writer, "END")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
HEADER    TEST
ATOM      1  N   MET A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  MET A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  CA ALYS A   2      10.500   9.700  -4.000  1.00  0.00           C
ATOM      4  CA BLYS A   2      99.000  99.000  99.000  1.00  0.00           C
HETATM    5  CA  HSE A   3       7.000  11.000  -2.500  1.00  0.00           C
TER
END
ATOM      6  CA  GLY A   4       0.000   0.000   0.000  1.00  0.00           C
";

    #[test]
    fn reads_first_model_ca_atoms_only() {
        let records = PdbFile::read_from(&mut Cursor::new(SAMPLE)).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].residue_type, AminoAcidType::Methionine);
        assert_eq!(records[0].position, Point3::new(11.639, 6.071, -5.147));
        assert_eq!(records[1].position, Point3::new(10.5, 9.7, -4.0));
        assert_eq!(records[2].residue_type, AminoAcidType::Histidine);
        assert_eq!(records[2].sequence_number, 3);
    }

    #[test]
    fn reports_line_of_malformed_coordinate() {
        let content = "ATOM      1  CA  ALA A   1      1.000    abc     3.000  1.00  0.00\n";
        match PdbFile::read_from(&mut Cursor::new(content)).unwrap_err() {
            PdbError::Parse { line, kind } => {
                assert_eq!(line, 1);
                assert_eq!(
                    kind,
                    PdbParseErrorKind::InvalidFloat {
                        columns: "39-46".to_string(),
                        value: "abc".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_residue_and_short_lines() {
        let unknown = "ATOM      1  CA  HOH A   1       1.000   2.000   3.000  1.00  0.00\n";
        assert!(matches!(
            PdbFile::read_from(&mut Cursor::new(unknown)),
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::UnknownResidue(_),
                ..
            })
        ));
        let short = "ATOM      1  CA  ALA A   1       1.000\n";
        assert!(matches!(
            PdbFile::read_from(&mut Cursor::new(short)),
            Err(PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            })
        ));
    }

    #[test]
    fn file_without_ca_atoms_is_an_error() {
        let content = "HEADER    EMPTY\nEND\n";
        assert!(matches!(
            PdbFile::read_from(&mut Cursor::new(content)),
            Err(PdbError::NoCaRecords)
        ));
    }

    #[test]
    fn writes_fixed_column_records() {
        let records = vec![ExportRecord {
            sequence_number: 1,
            residue_type: AminoAcidType::Alanine,
            position: Point3::new(3.8, -1.25, 0.0),
        }];
        let mut out = Vec::new();
        PdbFile::write_to(&records, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "ATOM      1  CA  ALA     1       3.800  -1.250   0.000  1.00  0.00\nEND\n"
        );
    }

    #[test]
    fn written_trace_reads_back() {
        let records: Vec<ExportRecord> = (0..5)
            .map(|i| ExportRecord {
                sequence_number: i + 1,
                residue_type: AminoAcidType::Serine,
                position: Point3::new(i as f64 * 3.5, 0.25 * i as f64, -1.0),
            })
            .collect();
        let file = NamedTempFile::new().unwrap();
        PdbFile::write_to_path(&records, file.path()).unwrap();
        assert_eq!(PdbFile::read_from_path(file.path()).unwrap(), records);
    }
}
