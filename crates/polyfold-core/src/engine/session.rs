use super::config::SessionConfig;
use super::error::EngineError;
use super::history::{EditRecord, History};
use crate::core::models::chain::{Chain, ExportRecord};
use crate::core::models::reference::ReferenceStructure;
use crate::core::models::residue::{AminoAcidType, AngleKind, SecondaryStructure};
use crate::core::reconstruction;
use crate::core::scoring::clash::{self, Clash};
use crate::core::scoring::{QualityReport, QualityScorer};
use nalgebra::Point3;
use tracing::{debug, info};

/// Result of a requested edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    /// The edit was kept and recorded in the history.
    Applied(EditRecord),
    /// The edit produced a clash and was rolled back; nothing was recorded.
    Rejected { clash: Clash },
}

/// Result of an undo or redo request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryOutcome {
    /// Nothing to undo or redo.
    Idle,
    /// The angle at `(index, kind)` was set to `value`.
    Applied {
        index: usize,
        kind: AngleKind,
        value: f64,
    },
}

/// A chain under interactive editing, together with its reference and history.
///
/// Every public mutation is atomic: when it returns, positions and scores are
/// consistent with the internal coordinates. Access is `&mut self` only, so a
/// multi-threaded host has to serialise calls itself (e.g. behind a `Mutex`).
#[derive(Debug, Clone)]
pub struct FoldingSession {
    config: SessionConfig,
    chain: Chain,
    reference: Option<ReferenceStructure>,
    scorer: QualityScorer,
    history: History,
}

impl FoldingSession {
    /// Starts a session from a sequence, taking default angles from the
    /// secondary structure when given.
    pub fn new(
        config: SessionConfig,
        residue_types: &[AminoAcidType],
        structure: Option<&[SecondaryStructure]>,
    ) -> Result<Self, EngineError> {
        let chain = Chain::from_sequence(
            residue_types,
            structure,
            &config.angle_defaults,
            config.bond_length,
        )?;
        info!(
            residues = chain.len(),
            structured = structure.is_some(),
            "Created folding session from sequence."
        );
        Ok(Self::with_chain(config, chain))
    }

    /// Starts a session whose chain reproduces `positions` and is scored against
    /// them.
    pub fn from_reference_positions(
        config: SessionConfig,
        positions: Vec<Point3<f64>>,
        residue_types: &[AminoAcidType],
    ) -> Result<Self, EngineError> {
        let residues = reconstruction::extract_angles(&positions, residue_types)?;
        let chain = Chain::from_residues(residues)?;
        info!(
            residues = chain.len(),
            "Created folding session from reference positions."
        );
        let mut session = Self::with_chain(config, chain);
        session.load_reference(ReferenceStructure::Positions(positions))?;
        Ok(session)
    }

    fn with_chain(config: SessionConfig, chain: Chain) -> Self {
        Self {
            config,
            chain,
            reference: None,
            scorer: QualityScorer::unscored(),
            history: History::new(),
        }
    }

    /// Replaces the reference and returns the baseline score.
    ///
    /// On error the previous reference stays active.
    pub fn load_reference(
        &mut self,
        reference: ReferenceStructure,
    ) -> Result<QualityReport, EngineError> {
        let scorer = QualityScorer::for_reference(
            &reference,
            self.chain.current_positions()?,
            self.config.bond_length,
            self.config.contact_threshold,
        )?;
        info!(
            kind = reference.kind(),
            entries = reference.len(),
            "Loaded reference structure."
        );
        self.scorer = scorer;
        self.reference = Some(reference);
        Ok(self.scorer.report())
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
        self.scorer = QualityScorer::unscored();
    }

    /// Sets one angle (radians), keeping it only if the chain stays clash-free.
    ///
    /// Caller errors are reported before anything is touched. Once the edit is
    /// attempted the redo branch is gone, whatever the outcome. A clash is not
    /// an error: the previous value is restored and `Rejected` is returned.
    pub fn edit(
        &mut self,
        index: usize,
        kind: AngleKind,
        value: f64,
    ) -> Result<EditOutcome, EngineError> {
        if !self.chain.has_angle(index, kind) {
            return Err(EngineError::InvalidAngleSlot {
                index,
                kind,
                len: self.chain.len(),
            });
        }
        if !value.is_finite() {
            return Err(EngineError::NonFiniteAngle { index, kind, value });
        }

        self.history.clear_redo();
        let previous = self.chain.apply_angle(index, kind, value)?;
        self.refresh()?;

        let positions = self.chain.current_positions()?;
        if let Some(clash) = clash::find_first_clash(positions, self.config.clash_threshold) {
            self.chain.apply_angle(index, kind, previous)?;
            self.refresh()?;
            debug!(
                index,
                %kind,
                value,
                residue_a = clash.residue_a,
                residue_b = clash.residue_b,
                distance = clash.distance,
                "Edit rejected: clash."
            );
            return Ok(EditOutcome::Rejected { clash });
        }

        let record = EditRecord {
            index,
            kind,
            previous,
            new: value,
        };
        self.history.record(record);
        debug!(index, %kind, previous, value, "Edit applied.");
        Ok(EditOutcome::Applied(record))
    }

    /// Restores the value replaced by the most recent accepted edit.
    pub fn undo(&mut self) -> Result<HistoryOutcome, EngineError> {
        let Some(record) = self.history.step_back() else {
            return Ok(HistoryOutcome::Idle);
        };
        self.replay(record.index, record.kind, record.previous)
    }

    /// Re-applies the most recently undone edit.
    pub fn redo(&mut self) -> Result<HistoryOutcome, EngineError> {
        let Some(record) = self.history.step_forward() else {
            return Ok(HistoryOutcome::Idle);
        };
        self.replay(record.index, record.kind, record.new)
    }

    fn replay(
        &mut self,
        index: usize,
        kind: AngleKind,
        value: f64,
    ) -> Result<HistoryOutcome, EngineError> {
        self.chain.apply_angle(index, kind, value)?;
        self.refresh()?;
        debug!(index, %kind, value, "History step applied.");
        Ok(HistoryOutcome::Applied { index, kind, value })
    }

    /// Rebuilds stale positions and rescores; returns the first recomputed index.
    fn refresh(&mut self) -> Result<usize, EngineError> {
        let Some(first_changed) = self.chain.rebuild() else {
            return Ok(self.chain.len());
        };
        let positions = self.chain.current_positions()?;
        self.scorer.refresh(positions, first_changed)?;
        Ok(first_changed)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn quality(&self) -> QualityReport {
        self.scorer.report()
    }

    pub fn scorer(&self) -> &QualityScorer {
        &self.scorer
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn reference(&self) -> Option<&ReferenceStructure> {
        self.reference.as_ref()
    }

    pub fn angle(&self, index: usize, kind: AngleKind) -> Result<f64, EngineError> {
        Ok(self.chain.angle(index, kind)?)
    }

    pub fn positions(&self) -> Result<&[Point3<f64>], EngineError> {
        Ok(self.chain.current_positions()?)
    }

    /// All clashes in the current conformation, closest first.
    pub fn clashes(&self) -> Result<Vec<Clash>, EngineError> {
        Ok(clash::find_clashes(
            self.chain.current_positions()?,
            self.config.clash_threshold,
        ))
    }

    pub fn export(&self) -> Result<Vec<ExportRecord>, EngineError> {
        Ok(self.chain.export_records()?)
    }
}
