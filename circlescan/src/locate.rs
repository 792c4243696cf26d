//! Locating end-read candidates for a start read.
//!
//! A start read's inferred extent runs from its first aligned block for `query_length` bases,
//! clipped tail included. Every block that stops short of that extent leaves a window
//! `[block.end, span_end)` in which a read carrying the other side of the junction may start.
use circlescan_core::Result;
use circlescan_core::models::AlignedRead;

use crate::circle::CandidateMatch;
use crate::classify::has_leading_clip_with_trailing_match;
use crate::index::ReadIndex;
use crate::score::circle_metrics;

/// The `[start, end)` windows the index is queried with for `start_read`, in block order.
///
/// Blocks ending exactly at the inferred span end are skipped. Windows are returned as-is, so
/// a block reaching past the span end gives an inverted (empty) window.
pub fn query_windows(start_read: &AlignedRead) -> Result<Vec<(u64, u64)>> {
    let span_start = start_read.first_block()?.start;
    let span_end = span_start + start_read.query_length();

    Ok(start_read
        .aligned_blocks()?
        .into_iter()
        .filter(|block| block.end != span_end)
        .map(|block| (block.end, span_end))
        .collect())
}

///
/// Collect every end read near `start_read` whose junction score reaches `score_threshold`.
///
/// Candidates are returned in scan order: by window, then in the order the index returns
/// them. A read found through two windows appears twice.
///
pub fn locate_candidates<R>(
    start_read: &AlignedRead,
    index: &mut R,
    score_threshold: f64,
) -> Result<Vec<CandidateMatch>>
where
    R: ReadIndex + ?Sized,
{
    let mut candidates = Vec::new();

    for (start, end) in query_windows(start_read)? {
        for end_read in index.fetch(&start_read.reference_name, start, end)? {
            if !has_leading_clip_with_trailing_match(&end_read)? {
                continue;
            }

            let metrics = circle_metrics(start_read, &end_read)?;
            if metrics.score >= score_threshold {
                candidates.push(CandidateMatch { end_read, metrics });
            }
        }
    }

    Ok(candidates)
}
