//! # circlescan
//!
//! Detection of candidate circular DNA junctions from soft-clipped aligned reads.
//!
//! A read that starts with a matched run and ends in a soft clip (a *start read*) may have
//! its clipped tail continue at an earlier reference position. For each such read the scan
//! looks up nearby reads (*end reads*) through a [`ReadIndex`], scores the overlap between
//! the start read's head and each end read's tail, and keeps the plausible pairings in a
//! [`CircleReport`].
//!
//! ## Example
//!
//! ```rust
//! use circlescan::{scan, render, InMemoryReadIndex, DEFAULT_SCORE_THRESHOLD};
//! use circlescan_core::models::{AlignedRead, ReadId};
//!
//! let start = AlignedRead::new(
//!     ReadId(0), "start", "chr1", 100, "10M5S".parse().unwrap(), b"AAAAAAAAAAXXXXX".to_vec(),
//! );
//! let end = AlignedRead::new(
//!     ReadId(1), "end", "chr1", 108, "8M0S".parse().unwrap(), b"GGGGGGGGAAAAAAAAAA".to_vec(),
//! );
//!
//! let index = InMemoryReadIndex::from_reads(vec![start, end]);
//! let report = scan(index.stream(), &mut &index, DEFAULT_SCORE_THRESHOLD).unwrap();
//! assert_eq!(report.len(), 1);
//! assert!(render(&report).unwrap().contains("score = 1.00"));
//! ```
pub mod bam;
pub mod circle;
pub mod classify;
pub mod consts;
pub mod index;
pub mod locate;
pub mod report;
pub mod scan;
pub mod score;

// re-exports
pub use self::bam::{BamReadIndex, BamReadSource, load_bam};
pub use self::circle::{CandidateMatch, CircleEntry, CircleReport};
pub use self::consts::DEFAULT_SCORE_THRESHOLD;
pub use self::index::{InMemoryReadIndex, ReadIndex};
pub use self::report::{ReportStyle, render, render_with};
pub use self::scan::scan;
pub use self::score::CircleMetrics;
