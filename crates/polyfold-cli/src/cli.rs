use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "PolyFold Developers",
    version,
    about = "PolyFold CLI - build, edit and score reduced C-alpha protein chains from the command line.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a chain, optionally score it against a reference and replay an edit script.
    Fold(FoldArgs),
    /// Print the internal coordinates and clashes of a C-alpha trace.
    Inspect(InspectArgs),
}

/// Arguments for the `fold` subcommand.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("chain-source")
        .required(true)
        .multiple(true)
        .args(["sequence", "reference_pdb"]),
))]
pub struct FoldArgs {
    // --- Chain ---
    /// One-letter amino-acid sequence file (.aa).
    #[arg(short, long, value_name = "PATH")]
    pub sequence: Option<PathBuf>,

    /// One-letter secondary-structure file (.ss) used to pick default angles.
    #[arg(long, value_name = "PATH", requires = "sequence")]
    pub structure: Option<PathBuf>,

    // --- Reference ---
    /// C-alpha PDB trace to score against. Without --sequence the chain starts
    /// from this trace.
    #[arg(short, long, value_name = "PATH")]
    pub reference_pdb: Option<PathBuf>,

    /// Contact list in CASP RR format to score against.
    #[arg(long, value_name = "PATH", conflicts_with = "reference_pdb")]
    pub contacts: Option<PathBuf>,

    // --- Editing ---
    /// TOML edit script replayed after the chain is built.
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    // --- Output ---
    /// Path for the output C-alpha PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Also write the distance map as CSV (needs a reference PDB).
    #[arg(long, value_name = "PATH", requires = "reference_pdb")]
    pub distance_csv: Option<PathBuf>,

    // --- Configuration ---
    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the virtual bond length in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub bond_length: Option<f64>,

    /// Override the clash distance in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub clash_threshold: Option<f64>,

    /// Override the distance under which a contact counts as satisfied.
    #[arg(long, value_name = "FLOAT")]
    pub contact_threshold: Option<f64>,

    /// Override the TOML table of per-structure default angles.
    #[arg(long, value_name = "PATH")]
    pub angle_table: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// C-alpha PDB trace to inspect.
    #[arg(value_name = "PATH")]
    pub input: PathBuf,

    /// Clash distance in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub clash_threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fold_accepts_sequence_only() {
        let cli = Cli::parse_from(["polyfold", "fold", "-s", "chain.aa", "-o", "out.pdb"]);
        match cli.command {
            Commands::Fold(args) => {
                assert_eq!(args.sequence, Some(PathBuf::from("chain.aa")));
                assert!(args.reference_pdb.is_none());
            }
            _ => panic!("Expected 'fold' subcommand"),
        }
    }

    #[test]
    fn fold_requires_a_chain_source() {
        assert!(Cli::try_parse_from(["polyfold", "fold", "-o", "out.pdb"]).is_err());
    }

    #[test]
    fn contacts_and_reference_pdb_conflict() {
        let result = Cli::try_parse_from([
            "polyfold", "fold", "-s", "a.aa", "-r", "ref.pdb", "--contacts", "c.rr", "-o",
            "out.pdb",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["polyfold", "inspect", "trace.pdb", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }
}
