use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use polyfold::core::io::pdb::PdbFile;
use polyfold::core::io::traits::RecordFile;
use polyfold::core::models::chain::ExportRecord;
use polyfold::core::reconstruction;
use polyfold::core::scoring::clash;
use polyfold::engine::config::SessionConfigBuilder;
use polyfold::engine::error::EngineError;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Loading C-alpha trace from {:?}", &args.input);
    let records =
        PdbFile::read_from_path(&args.input).map_err(|e| CliError::parsing(&args.input, e))?;

    let mut builder = SessionConfigBuilder::new();
    if let Some(threshold) = args.clash_threshold {
        builder = builder.clash_threshold(threshold);
    }
    let config = builder.build()?;

    print!("{}", render(&records, config.clash_threshold)?);
    Ok(())
}

/// Formats the internal coordinates of `records` in degrees, then every clash
/// closer than `clash_threshold`.
pub fn render(records: &[ExportRecord], clash_threshold: f64) -> Result<String> {
    let positions: Vec<_> = records.iter().map(|r| r.position).collect();
    let residue_types: Vec<_> = records.iter().map(|r| r.residue_type).collect();
    let residues =
        reconstruction::extract_angles(&positions, &residue_types).map_err(EngineError::from)?;

    let degrees = |angle: Option<f64>| match angle {
        Some(radians) => format!("{:9.2}", radians.to_degrees()),
        None => format!("{:>9}", "-"),
    };

    let mut out = String::new();
    writeln!(out, "{:>5} {:>4} {:>8} {:>9} {:>9}", "#", "res", "bond", "theta", "tao")?;
    for (record, residue) in records.iter().zip(&residues) {
        let bond = if residue.index == 0 {
            format!("{:>8}", "-")
        } else {
            format!("{:8.3}", residue.bond_length())
        };
        writeln!(
            out,
            "{:5} {:>4} {} {} {}",
            record.sequence_number,
            residue.residue_type.to_three_letter(),
            bond,
            degrees(residue.bond_angle()),
            degrees(residue.dihedral_angle()),
        )?;
    }

    let clashes = clash::find_clashes(&positions, clash_threshold);
    if clashes.is_empty() {
        writeln!(out, "No clashes under {:.2} A.", clash_threshold)?;
    } else {
        writeln!(out, "{} clash(es) under {:.2} A:", clashes.len(), clash_threshold)?;
        for c in &clashes {
            // Residues are reported 1-based, as in the trace.
            writeln!(
                out,
                "  {} {} - {} {}: {:.3} A",
                records[c.residue_a].residue_type.to_three_letter(),
                c.residue_a + 1,
                records[c.residue_b].residue_type.to_three_letter(),
                c.residue_b + 1,
                c.distance
            )?;
        }
    }
    Ok(out)
}
