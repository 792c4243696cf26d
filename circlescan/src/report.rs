//! Text rendering of a [`CircleReport`].
//!
//! Rendering is plain concatenation of the entries in discovery order; nothing is filtered
//! here.
use std::str::FromStr;

use circlescan_core::Result;
use circlescan_core::models::{AlignedBlock, AlignedRead};

use crate::circle::{CandidateMatch, CircleEntry, CircleReport};
use crate::score::{head_str, tail_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportStyle {
    /// One header per start read with its first block start; one line per candidate.
    #[default]
    Compact,
    /// Like `Compact`, but every aligned block is listed for each read.
    Blocks,
}

impl FromStr for ReportStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(ReportStyle::Compact),
            "blocks" => Ok(ReportStyle::Blocks),
            _ => Err(format!("Invalid report style: {}", s)),
        }
    }
}

fn text(seq: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(seq)
}

fn blocks_repr(blocks: &[AlignedBlock]) -> String {
    let inner: Vec<String> = blocks
        .iter()
        .map(|b| format!("({}, {})", b.start, b.end))
        .collect();
    format!("[{}]", inner.join(", "))
}

fn placement(read: &AlignedRead, style: ReportStyle) -> Result<String> {
    Ok(match style {
        ReportStyle::Compact => read.first_block()?.start.to_string(),
        ReportStyle::Blocks => blocks_repr(&read.aligned_blocks()?),
    })
}

fn render_candidate(
    out: &mut String,
    start_read: &AlignedRead,
    candidate: &CandidateMatch,
    style: ReportStyle,
) -> Result<()> {
    let end_read = &candidate.end_read;
    let metrics = &candidate.metrics;
    let head = text(head_str(start_read)?);
    let tail = text(tail_str(end_read)?);

    let (score, separator) = match style {
        ReportStyle::Compact => (format!("score = {:.2}", metrics.score), "<overlap>"),
        ReportStyle::Blocks => (format!("{:.2}", metrics.score), "<>"),
    };

    out.push_str(&format!(
        "\t{} :: {} / {} / {} / {} {} {} = {} / depth = {}\n",
        score,
        end_read.cigar,
        text(end_read.forward_sequence()),
        placement(end_read, style)?,
        tail,
        separator,
        head,
        metrics.overlap,
        metrics.depth,
    ));

    Ok(())
}

/// Render one start read and its candidates.
pub fn render_entry(entry: &CircleEntry, style: ReportStyle) -> Result<String> {
    let start_read = &entry.start_read;
    let mut out = format!(
        "{}: {} / {} @ {}\n",
        start_read.query_name,
        start_read.cigar,
        text(start_read.forward_sequence()),
        placement(start_read, style)?,
    );

    for candidate in entry.candidates.iter() {
        render_candidate(&mut out, start_read, candidate, style)?;
    }

    Ok(out)
}

pub fn render_with(report: &CircleReport, style: ReportStyle) -> Result<String> {
    let mut out = String::new();
    for entry in report {
        out.push_str(&render_entry(entry, style)?);
    }
    Ok(out)
}

/// Render a report in the default compact style.
pub fn render(report: &CircleReport) -> Result<String> {
    render_with(report, ReportStyle::Compact)
}
