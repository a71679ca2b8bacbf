use crate::cli::FoldArgs;
use crate::error::{CliError, Result};
use polyfold::core::models::defaults::AngleDefaults;
use polyfold::engine::config::{SessionConfig, SessionConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Session parameters as written in a config file; every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialSessionConfig {
    bond_length: Option<f64>,
    clash_threshold: Option<f64>,
    contact_threshold: Option<f64>,
    angle_table: Option<PathBuf>,
}

impl PartialSessionConfig {
    /// Loads a config file. A relative `angle-table` is taken relative to the
    /// file's own directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut partial: Self = toml::from_str(&content).map_err(|e| CliError::parsing(path, e))?;

        if let (Some(table), Some(dir)) = (partial.angle_table.as_mut(), path.parent()) {
            if table.is_relative() {
                *table = dir.join(&*table);
            }
        }
        Ok(partial)
    }

    /// Command-line values win over file values; anything left unset takes the
    /// session default.
    pub fn merge_with_cli(self, args: &FoldArgs) -> Result<SessionConfig> {
        let mut builder = SessionConfigBuilder::new();

        if let Some(length) = args.bond_length.or(self.bond_length) {
            builder = builder.bond_length(length);
        }
        if let Some(threshold) = args.clash_threshold.or(self.clash_threshold) {
            builder = builder.clash_threshold(threshold);
        }
        if let Some(threshold) = args.contact_threshold.or(self.contact_threshold) {
            builder = builder.contact_threshold(threshold);
        }
        if let Some(table) = args.angle_table.as_ref().or(self.angle_table.as_ref()) {
            debug!("Loading angle defaults from {:?}", table);
            let defaults = AngleDefaults::load(table).map_err(|e| CliError::parsing(table, e))?;
            builder = builder.angle_defaults(defaults);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use polyfold::engine::config::DEFAULT_CONTACT_THRESHOLD;
    use std::fs;
    use tempfile::tempdir;

    fn fold_args(extra: &[&str]) -> FoldArgs {
        let mut args = vec!["polyfold", "fold", "-s", "chain.aa", "-o", "out.pdb"];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Fold(args) => args,
            _ => panic!("Expected 'fold' subcommand"),
        }
    }

    #[test]
    fn file_values_fill_in_and_defaults_cover_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polyfold.toml");
        fs::write(&path, "bond-length = 3.81\nclash-threshold = 4.0\n").unwrap();

        let config = PartialSessionConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&fold_args(&[]))
            .unwrap();

        assert_eq!(config.bond_length, 3.81);
        assert_eq!(config.clash_threshold, 4.0);
        assert_eq!(config.contact_threshold, DEFAULT_CONTACT_THRESHOLD);
        assert_eq!(config.angle_defaults, AngleDefaults::default());
    }

    #[test]
    fn cli_arguments_override_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polyfold.toml");
        fs::write(&path, "clash-threshold = 4.0\ncontact-threshold = 7.0\n").unwrap();

        let config = PartialSessionConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&fold_args(&["--clash-threshold", "3.5"]))
            .unwrap();

        assert_eq!(config.clash_threshold, 3.5);
        assert_eq!(config.contact_threshold, 7.0);
    }

    #[test]
    fn relative_angle_table_resolves_next_to_config_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("angles.toml"),
            "unstructured = { theta = 110.0, tao = -150.0 }\n\
             helix = { theta = 91.0, tao = 52.0 }\n\
             strand = { theta = 124.0, tao = -170.0 }\n\
             coil = { theta = 110.0, tao = -150.0 }\n",
        )
        .unwrap();
        let path = dir.path().join("polyfold.toml");
        fs::write(&path, "angle-table = \"angles.toml\"\n").unwrap();

        let config = PartialSessionConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&fold_args(&[]))
            .unwrap();

        assert_eq!(config.angle_defaults.helix.theta, 91.0);
        assert_eq!(config.angle_defaults.helix.tao, 52.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("polyfold.toml");
        fs::write(&path, "bond-lenght = 3.8\n").unwrap();

        let result = PartialSessionConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let result = PartialSessionConfig::default().merge_with_cli(&fold_args(&["--bond-length=-1"]));
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("bond_length")));
    }
}
