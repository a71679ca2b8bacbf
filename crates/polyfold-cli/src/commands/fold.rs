use crate::cli::FoldArgs;
use crate::config::PartialSessionConfig;
use crate::error::{CliError, Result};
use polyfold::core::io::contacts::{self, ContactsFile};
use polyfold::core::io::csv_export;
use polyfold::core::io::pdb::PdbFile;
use polyfold::core::io::sequence::{SequenceFile, StructureFile};
use polyfold::core::io::traits::RecordFile;
use polyfold::core::models::reference::ReferenceStructure;
use polyfold::core::scoring::QualityReport;
use polyfold::engine::session::FoldingSession;
use polyfold::workflows::replay::{self, EditScript, ReplayReport};
use tracing::{info, warn};

/// What a `fold` run did, for printing.
#[derive(Debug)]
pub struct FoldSummary {
    pub residues: usize,
    pub baseline: QualityReport,
    pub replay: Option<ReplayReport>,
    pub quality: QualityReport,
    pub clashes: usize,
}

pub fn run(args: FoldArgs) -> Result<()> {
    println!("Building chain...");
    let summary = fold(&args)?;

    println!("Chain of {} residues built.", summary.residues);
    println!("  Baseline: {}", summary.baseline);
    if let Some(report) = &summary.replay {
        println!(
            "  Edit script: {} applied, {} rejected by clash check, {} idle undo/redo",
            report.applied, report.rejected, report.idle
        );
    }
    println!("  Final:    {}", summary.quality);
    if summary.clashes > 0 {
        println!("  Warning: final conformation has {} clash(es).", summary.clashes);
    }
    println!("✓ C-alpha trace written to: {}", args.output.display());
    if let Some(path) = &args.distance_csv {
        println!("✓ Distance map written to: {}", path.display());
    }
    Ok(())
}

pub fn fold(args: &FoldArgs) -> Result<FoldSummary> {
    let partial = match &args.config {
        Some(path) => PartialSessionConfig::from_file(path)?,
        None => PartialSessionConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial.merge_with_cli(args)?;

    let reference = match &args.reference_pdb {
        Some(path) => {
            info!("Loading reference trace from {:?}", path);
            Some(PdbFile::read_from_path(path).map_err(|e| CliError::parsing(path, e))?)
        }
        None => None,
    };

    let mut session = match (&args.sequence, reference) {
        (Some(sequence_path), reference) => {
            info!("Loading sequence from {:?}", sequence_path);
            let residue_types = SequenceFile::read_from_path(sequence_path)
                .map_err(|e| CliError::parsing(sequence_path, e))?;
            let structure = match &args.structure {
                Some(path) => Some(
                    StructureFile::read_from_path(path).map_err(|e| CliError::parsing(path, e))?,
                ),
                None => None,
            };

            let mut session = FoldingSession::new(config, &residue_types, structure.as_deref())?;
            if let Some(records) = reference {
                let positions = records.iter().map(|r| r.position).collect();
                session.load_reference(ReferenceStructure::Positions(positions))?;
            }
            session
        }
        (None, Some(records)) => {
            let residue_types: Vec<_> = records.iter().map(|r| r.residue_type).collect();
            let positions = records.iter().map(|r| r.position).collect();
            FoldingSession::from_reference_positions(config, positions, &residue_types)?
        }
        (None, None) => {
            return Err(CliError::Argument(
                "either --sequence or --reference-pdb is required".to_string(),
            ));
        }
    };

    if let Some(path) = &args.contacts {
        info!("Loading contacts from {:?}", path);
        let rr = ContactsFile::read_from_path(path).map_err(|e| CliError::parsing(path, e))?;
        let constraints = contacts::to_constraints(&rr, session.config().contact_threshold)
            .map_err(|e| CliError::parsing(path, e))?;
        session.load_reference(ReferenceStructure::Contacts(constraints))?;
    }

    let baseline = session.quality();
    info!(%baseline, "Baseline quality computed.");

    let replay = match &args.script {
        Some(path) => {
            let script = EditScript::load(path).map_err(|e| CliError::parsing(path, e))?;
            Some(replay::run(&mut session, &script)?)
        }
        None => None,
    };

    let clashes = session.clashes()?;
    if let Some(closest) = clashes.first() {
        warn!(count = clashes.len(), %closest, "Final conformation has clashes.");
    }

    info!("Writing C-alpha trace to {:?}", &args.output);
    PdbFile::write_to_path(&session.export()?, &args.output)
        .map_err(|e| CliError::writing(&args.output, e))?;

    if let Some(path) = &args.distance_csv {
        let map = session.scorer().distance_map().ok_or_else(|| {
            CliError::Argument("--distance-csv needs a reference PDB".to_string())
        })?;
        info!("Writing distance map to {:?}", path);
        csv_export::write_distance_map_to_path(map, path).map_err(|e| CliError::writing(path, e))?;
    }

    Ok(FoldSummary {
        residues: session.chain().len(),
        baseline,
        replay,
        quality: session.quality(),
        clashes: clashes.len(),
    })
}
