//! # Engine Module
//!
//! The stateful editing loop of PolyFold.
//!
//! A [`session::FoldingSession`] owns a chain, an optional reference structure and
//! the undo/redo [`history`]. Each edit goes through the same transaction: apply
//! the angle, rebuild the stale suffix of positions, refresh the live distances
//! touching moved residues, scan the moved residues for clashes and roll back if
//! one is found.
//!
//! - **Configuration** ([`config`]) - Bond length, thresholds and default angles
//! - **History** ([`history`]) - Command records carrying both old and new values
//! - **Session** ([`session`]) - Edit, undo, redo, scoring and export
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping the core errors

pub mod config;
pub mod error;
pub mod history;
pub mod session;
