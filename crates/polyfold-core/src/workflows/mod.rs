//! # Workflows Module
//!
//! Complete procedures built on top of the [`crate::engine`].
//!
//! - [`replay`] applies a scripted sequence of edits, undos and redos to a
//!   folding session and summarises what happened.

pub mod replay;
