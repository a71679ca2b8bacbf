//! # PolyFold Core Library
//!
//! A library for interactively folding a reduced protein chain, one virtual
//! Cα atom per residue, by editing its internal coordinates.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that the geometry can be
//! tested on its own and the stateful parts stay small.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Residue`, `Chain`,
//!   `ReferenceStructure`), the geometry kernel, the forward and backward
//!   reconstruction between internal coordinates and positions, the quality
//!   scorers, and the file collaborators that turn sequence, PDB and contact files
//!   into typed tokens.
//!
//! - **[`engine`]: The Logic Core.** The stateful `FoldingSession` that owns a chain,
//!   an optional reference and the undo/redo history. Every edit is applied,
//!   rescored and checked for clashes as a single transaction.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on the engine,
//!   such as replaying a scripted series of edits against a session.

pub mod core;
pub mod engine;
pub mod workflows;
