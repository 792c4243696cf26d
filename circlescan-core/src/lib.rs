//! Core models shared by the circlescan crates.
//!
//! [`AlignedRead`](models::AlignedRead) is the read-only view of one alignment record that the
//! circle detection works on. Its cigar is modelled as a closed [`CigarKind`](models::CigarKind)
//! enum, and reads are identified by a [`ReadId`](models::ReadId) assigned at ingestion.
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::{CircleScanError, Result};
