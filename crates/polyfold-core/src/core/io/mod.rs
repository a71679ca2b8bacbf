//! Plain-text file formats exchanged with the outside world.
//!
//! Each format is a unit struct implementing [`traits::RecordFile`], producing or
//! consuming the typed tokens the chain model works with: one-letter sequences
//! and secondary structures, C-alpha PDB traces and CASP RR contact lists. The
//! distance map can additionally be exported as CSV.

pub mod contacts;
pub mod csv_export;
pub mod pdb;
pub mod sequence;
pub mod traits;
