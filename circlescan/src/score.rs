//! Overlap and depth scoring of a (start read, end read) junction.
//!
//! The clipped head of the start read and the tail of the end read are compared for a
//! boundary overlap. The implied circle size ("depth") is then combined with that overlap into
//! a single plausibility score.
use circlescan_core::Result;
use circlescan_core::models::AlignedRead;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::consts::SCORE_NORMALIZER;

/// Metrics computed for one start/end read pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CircleMetrics {
    pub overlap: usize,
    pub depth: u64,
    pub score: f64,
}

/// Prefix of the start read's sequence covered by its first (matched) operation.
pub fn head_str(start_read: &AlignedRead) -> Result<&[u8]> {
    let len = start_read.first_op()?.len as usize;
    let seq = start_read.forward_sequence();
    Ok(&seq[..len.min(seq.len())])
}

/// Suffix of the end read's sequence past the length of its last operation.
pub fn tail_str(end_read: &AlignedRead) -> Result<&[u8]> {
    let from = end_read.last_op()?.len as usize;
    let seq = end_read.forward_sequence();
    Ok(seq.get(from..).unwrap_or_default())
}

///
/// Length of the longest prefix of `head` that is also a suffix of `tail`.
///
/// Every length from 0 up to the shorter of the two is tried in ascending order, so the
/// largest exact match wins. Comparison is byte-for-byte and case-sensitive.
///
pub fn overlap_length(head: &[u8], tail: &[u8]) -> usize {
    let min_len = head.len().min(tail.len());
    let mut max_overlap = 0;

    for i in 0..=min_len {
        if head[..i] == tail[tail.len() - i..] {
            max_overlap = i;
        }
    }

    max_overlap
}

/// Estimated circle size: the start read's inferred span plus the end read's trailing
/// segment, minus the bases counted twice by the overlap.
pub fn depth_of_circle(
    start_read: &AlignedRead,
    end_read: &AlignedRead,
    overlap: usize,
) -> Result<u64> {
    let trailing = end_read.last_op()?.len as u64;
    Ok((start_read.query_length() + trailing).saturating_sub(overlap as u64))
}

pub fn score(overlap: usize, depth: u64) -> f64 {
    (overlap as u64 * depth) as f64 / SCORE_NORMALIZER
}

/// Compute overlap, depth and score for a start read and a candidate end read.
pub fn circle_metrics(start_read: &AlignedRead, end_read: &AlignedRead) -> Result<CircleMetrics> {
    let overlap = overlap_length(head_str(start_read)?, tail_str(end_read)?);
    let depth = depth_of_circle(start_read, end_read, overlap)?;

    Ok(CircleMetrics {
        overlap,
        depth,
        score: score(overlap, depth),
    })
}
