use crate::core::models::residue::AngleKind;
use crate::core::scoring::QualityReport;
use crate::engine::error::EngineError;
use crate::engine::session::{EditOutcome, FoldingSession, HistoryOutcome};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// One scripted action, as written in a `[[step]]` table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum EditStep {
    Edit {
        index: usize,
        kind: AngleKind,
        degrees: f64,
    },
    Undo,
    Redo,
}

/// An ordered list of edits, undos and redos.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditScript {
    #[serde(rename = "step", default)]
    pub steps: Vec<EditStep>,
}

#[derive(Debug, Error)]
pub enum ScriptLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl EditScript {
    pub fn load(path: &Path) -> Result<Self, ScriptLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ScriptLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ScriptLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("Step {step} failed: {source}")]
pub struct ReplayError {
    /// 1-based position of the failing step in the script.
    pub step: usize,
    pub source: EngineError,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Edit(EditOutcome),
    History(HistoryOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub outcomes: Vec<StepOutcome>,
    pub applied: usize,
    pub rejected: usize,
    pub idle: usize,
    pub quality: QualityReport,
}

/// Runs every step of `script` against `session`, in order.
///
/// Clash rejections and idle undo/redo are counted, not treated as failures.
/// The first caller error (e.g. an angle slot that does not exist) stops the
/// replay; steps before it stay applied.
#[instrument(skip_all, name = "replay_workflow")]
pub fn run(
    session: &mut FoldingSession,
    script: &EditScript,
) -> Result<ReplayReport, ReplayError> {
    info!(steps = script.steps.len(), "Replaying edit script.");

    let mut outcomes = Vec::with_capacity(script.steps.len());
    let (mut applied, mut rejected, mut idle) = (0, 0, 0);

    for (i, step) in script.steps.iter().enumerate() {
        let outcome = apply_step(session, step).map_err(|source| ReplayError {
            step: i + 1,
            source,
        })?;
        match outcome {
            StepOutcome::Edit(EditOutcome::Applied(_))
            | StepOutcome::History(HistoryOutcome::Applied { .. }) => applied += 1,
            StepOutcome::Edit(EditOutcome::Rejected { clash }) => {
                warn!(step = i + 1, %clash, "Scripted edit rejected.");
                rejected += 1;
            }
            StepOutcome::History(HistoryOutcome::Idle) => idle += 1,
        }
        outcomes.push(outcome);
    }

    let quality = session.quality();
    info!(applied, rejected, idle, %quality, "Edit script finished.");

    Ok(ReplayReport {
        outcomes,
        applied,
        rejected,
        idle,
        quality,
    })
}

fn apply_step(session: &mut FoldingSession, step: &EditStep) -> Result<StepOutcome, EngineError> {
    match *step {
        EditStep::Edit {
            index,
            kind,
            degrees,
        } => session
            .edit(index, kind, degrees.to_radians())
            .map(StepOutcome::Edit),
        EditStep::Undo => session.undo().map(StepOutcome::History),
        EditStep::Redo => session.redo().map(StepOutcome::History),
    }
}
