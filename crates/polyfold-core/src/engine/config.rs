use crate::core::models::defaults::AngleDefaults;
use thiserror::Error;

pub const DEFAULT_BOND_LENGTH: f64 = 3.8;
pub const DEFAULT_CLASH_THRESHOLD: f64 = 3.7;
pub const DEFAULT_CONTACT_THRESHOLD: f64 = 8.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Parameter '{name}' must be a positive, finite number (got {value})")]
    NotPositive { name: &'static str, value: f64 },
    #[error("Default {name} angle for {class} must be finite (got {value})")]
    NonFiniteDefault {
        class: &'static str,
        name: &'static str,
        value: f64,
    },
}

/// Parameters fixed for the lifetime of a folding session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Length of every virtual bond for chains built from a sequence, in Angstroms.
    pub bond_length: f64,
    /// Non-adjacent residues closer than this are a clash.
    pub clash_threshold: f64,
    /// Contacts closer than this count as satisfied.
    pub contact_threshold: f64,
    pub angle_defaults: AngleDefaults,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bond_length: DEFAULT_BOND_LENGTH,
            clash_threshold: DEFAULT_CLASH_THRESHOLD,
            contact_threshold: DEFAULT_CONTACT_THRESHOLD,
            angle_defaults: AngleDefaults::default(),
        }
    }
}

#[derive(Default)]
pub struct SessionConfigBuilder {
    bond_length: Option<f64>,
    clash_threshold: Option<f64>,
    contact_threshold: Option<f64>,
    angle_defaults: Option<AngleDefaults>,
}

impl SessionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bond_length(mut self, length: f64) -> Self {
        self.bond_length = Some(length);
        self
    }
    pub fn clash_threshold(mut self, threshold: f64) -> Self {
        self.clash_threshold = Some(threshold);
        self
    }
    pub fn contact_threshold(mut self, threshold: f64) -> Self {
        self.contact_threshold = Some(threshold);
        self
    }
    pub fn angle_defaults(mut self, defaults: AngleDefaults) -> Self {
        self.angle_defaults = Some(defaults);
        self
    }

    /// Fills unset parameters with their defaults and validates the result.
    pub fn build(self) -> Result<SessionConfig, ConfigError> {
        let config = SessionConfig {
            bond_length: positive(
                "bond_length",
                self.bond_length.unwrap_or(DEFAULT_BOND_LENGTH),
            )?,
            clash_threshold: positive(
                "clash_threshold",
                self.clash_threshold.unwrap_or(DEFAULT_CLASH_THRESHOLD),
            )?,
            contact_threshold: positive(
                "contact_threshold",
                self.contact_threshold.unwrap_or(DEFAULT_CONTACT_THRESHOLD),
            )?,
            angle_defaults: self.angle_defaults.unwrap_or_default(),
        };
        validate_defaults(&config.angle_defaults)?;
        Ok(config)
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn validate_defaults(defaults: &AngleDefaults) -> Result<(), ConfigError> {
    for (class, pair) in [
        ("unstructured", defaults.unstructured),
        ("helix", defaults.helix),
        ("strand", defaults.strand),
        ("coil", defaults.coil),
    ] {
        for (name, value) in [("theta", pair.theta), ("tao", pair.tao)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteDefault { class, name, value });
            }
        }
    }
    Ok(())
}
