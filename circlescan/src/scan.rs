//! The scan pass: classify every read, locate and score candidates for each start read, and
//! collect the start reads that have any.
use circlescan_core::Result;
use circlescan_core::models::AlignedRead;

use crate::circle::CircleReport;
use crate::classify::has_trailing_clip_with_leading_match;
use crate::consts::DEFAULT_SCORE_THRESHOLD;
use crate::index::ReadIndex;
use crate::locate::locate_candidates;

///
/// Scan a stream of reads for candidate circle junctions.
///
/// Every start read is handed to the candidate locator, which always scores end reads against
/// [`DEFAULT_SCORE_THRESHOLD`]. `score_threshold` never filters individual candidates: a start
/// read is recorded when it has at least one candidate and its candidate *count* reaches
/// `score_threshold`. With the default of 1.0 both rules agree, and any
/// threshold at or below 1.0 keeps every start read with a non-empty candidate list. Above 1.0
/// the threshold stops being a score cutoff: start reads with fewer candidates than
/// `score_threshold` are dropped.
///
/// The first error (a malformed read, a failing index) aborts the scan.
///
/// # Arguments
/// - reads: the reads to scan, in any order; consumed lazily
/// - index: positional index over the same reads
/// - score_threshold: user-facing cutoff, see above
///
pub fn scan<I, R>(reads: I, index: &mut R, score_threshold: f64) -> Result<CircleReport>
where
    I: IntoIterator<Item = Result<AlignedRead>>,
    R: ReadIndex + ?Sized,
{
    let mut report = CircleReport::new();

    for read in reads {
        let read = read?;
        if !has_trailing_clip_with_leading_match(&read)? {
            continue;
        }

        let candidates = locate_candidates(&read, index, DEFAULT_SCORE_THRESHOLD)?;
        if !candidates.is_empty() && candidates.len() as f64 >= score_threshold {
            report.insert(read, candidates);
        }
    }

    Ok(report)
}
