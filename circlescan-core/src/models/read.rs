use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{CircleScanError, Result};
use crate::models::cigar::{Cigar, CigarOp};

/// Identity of one alignment record, assigned in ingestion order.
///
/// Query names are shared by every alignment of a fragment, so reads are told apart by this
/// id rather than by name or by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadId(pub u64);

impl Display for ReadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out increasing [`ReadId`]s.
#[derive(Debug, Default)]
pub struct ReadIdAllocator {
    next: u64,
}

impl ReadIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        ReadIdAllocator { next: first }
    }

    pub fn next_id(&mut self) -> ReadId {
        let id = ReadId(self.next);
        self.next += 1;
        id
    }
}

/// A contiguous reference interval covered by one matched run, `[start, end)`, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignedBlock {
    pub start: u64,
    pub end: u64,
}

///
/// One aligned sequencing read, as consumed by the circle scan
///
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlignedRead {
    pub id: ReadId,
    pub query_name: String,
    /// Bases in original read orientation.
    #[cfg_attr(feature = "serde", serde(with = "sequence_text"))]
    pub forward_sequence: Vec<u8>,
    pub cigar: Cigar,
    pub reference_name: String,
    /// 0-based reference position of the first reference-consuming operation.
    pub position: u64,
}

impl AlignedRead {
    pub fn new(
        id: ReadId,
        query_name: impl Into<String>,
        reference_name: impl Into<String>,
        position: u64,
        cigar: Cigar,
        forward_sequence: impl Into<Vec<u8>>,
    ) -> Self {
        AlignedRead {
            id,
            query_name: query_name.into(),
            forward_sequence: forward_sequence.into(),
            cigar,
            reference_name: reference_name.into(),
            position,
        }
    }

    pub fn forward_sequence(&self) -> &[u8] {
        &self.forward_sequence
    }

    ///
    /// Reference intervals of every matched run, in genomic coordinate order
    ///
    /// Deletions and skips move the reference cursor without emitting a block; insertions,
    /// clips and padding leave it where it is.
    pub fn aligned_blocks(&self) -> Result<Vec<AlignedBlock>> {
        self.ensure_cigar()?;

        let mut blocks = Vec::new();
        let mut pos = self.position;

        for op in self.cigar.iter() {
            let len = op.len as u64;
            if op.kind.is_aligned_run() {
                blocks.push(AlignedBlock {
                    start: pos,
                    end: pos + len,
                });
            }
            if op.kind.consumes_reference() {
                pos += len;
            }
        }

        Ok(blocks)
    }

    /// The first aligned block; reads with no matched run have none.
    pub fn first_block(&self) -> Result<AlignedBlock> {
        self.aligned_blocks()?.first().copied().ok_or_else(|| {
            CircleScanError::MalformedAlignment(format!(
                "read {} ({}) has no aligned blocks",
                self.query_name, self.cigar
            ))
        })
    }

    /// `[start, end)` on the reference from the first to the last reference-consuming op.
    pub fn reference_span(&self) -> Result<(u64, u64)> {
        self.ensure_cigar()?;
        let width: u64 = self
            .cigar
            .iter()
            .filter(|op| op.kind.consumes_reference())
            .map(|op| op.len as u64)
            .sum();
        Ok((self.position, self.position + width))
    }

    /// Inferred length of the query: matched, inserted and soft-clipped bases.
    pub fn query_length(&self) -> u64 {
        self.cigar
            .iter()
            .filter(|op| op.kind.consumes_query())
            .map(|op| op.len as u64)
            .sum()
    }

    pub fn first_op(&self) -> Result<CigarOp> {
        self.cigar.first().copied().ok_or_else(|| self.empty_cigar())
    }

    pub fn last_op(&self) -> Result<CigarOp> {
        self.cigar.last().copied().ok_or_else(|| self.empty_cigar())
    }

    fn ensure_cigar(&self) -> Result<()> {
        if self.cigar.is_empty() {
            return Err(self.empty_cigar());
        }
        Ok(())
    }

    fn empty_cigar(&self) -> CircleScanError {
        CircleScanError::MalformedAlignment(format!(
            "read {} has no cigar operations",
            self.query_name
        ))
    }
}

impl Display for AlignedRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}:{}\t{}",
            self.query_name, self.reference_name, self.position, self.cigar
        )
    }
}

#[cfg(feature = "serde")]
mod sequence_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(seq: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(seq))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        Ok(String::deserialize(deserializer)?.into_bytes())
    }
}
