use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CircleScanError;

/// The kind of a single alignment operation.
///
/// This is a closed set: every consumer matches on it exhaustively instead of comparing raw
/// op codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CigarKind {
    Match,
    Insertion,
    Deletion,
    Skip,
    SoftClip,
    HardClip,
    Pad,
    SequenceMatch,
    SequenceMismatch,
}

impl CigarKind {
    ///
    /// The SAM text character for this operation
    ///
    pub fn as_char(&self) -> char {
        match self {
            CigarKind::Match => 'M',
            CigarKind::Insertion => 'I',
            CigarKind::Deletion => 'D',
            CigarKind::Skip => 'N',
            CigarKind::SoftClip => 'S',
            CigarKind::HardClip => 'H',
            CigarKind::Pad => 'P',
            CigarKind::SequenceMatch => '=',
            CigarKind::SequenceMismatch => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(CigarKind::Match),
            'I' => Some(CigarKind::Insertion),
            'D' => Some(CigarKind::Deletion),
            'N' => Some(CigarKind::Skip),
            'S' => Some(CigarKind::SoftClip),
            'H' => Some(CigarKind::HardClip),
            'P' => Some(CigarKind::Pad),
            '=' => Some(CigarKind::SequenceMatch),
            'X' => Some(CigarKind::SequenceMismatch),
            _ => None,
        }
    }

    /// Whether bases of this operation are part of the inferred query length.
    ///
    /// Hard clips are not: their bases are absent from the stored sequence.
    pub fn consumes_query(&self) -> bool {
        match self {
            CigarKind::Match
            | CigarKind::Insertion
            | CigarKind::SoftClip
            | CigarKind::SequenceMatch
            | CigarKind::SequenceMismatch => true,
            CigarKind::Deletion | CigarKind::Skip | CigarKind::HardClip | CigarKind::Pad => false,
        }
    }

    /// Whether this operation moves along the reference.
    pub fn consumes_reference(&self) -> bool {
        match self {
            CigarKind::Match
            | CigarKind::Deletion
            | CigarKind::Skip
            | CigarKind::SequenceMatch
            | CigarKind::SequenceMismatch => true,
            CigarKind::Insertion | CigarKind::SoftClip | CigarKind::HardClip | CigarKind::Pad => {
                false
            }
        }
    }

    /// Whether this operation produces an aligned block (a run of bases placed on the reference).
    pub fn is_aligned_run(&self) -> bool {
        match self {
            CigarKind::Match | CigarKind::SequenceMatch | CigarKind::SequenceMismatch => true,
            CigarKind::Insertion
            | CigarKind::Deletion
            | CigarKind::Skip
            | CigarKind::SoftClip
            | CigarKind::HardClip
            | CigarKind::Pad => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CigarOp {
    pub kind: CigarKind,
    pub len: u32,
}

impl CigarOp {
    pub fn new(kind: CigarKind, len: u32) -> Self {
        CigarOp { kind, len }
    }
}

impl Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, self.kind.as_char())
    }
}

///
/// Ordered list of alignment operations for one read
///
/// Serialises as its SAM text form (`10M5S`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cigar {
    pub ops: Vec<CigarOp>,
}

impl Cigar {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CigarOp> {
        self.ops.iter()
    }

    pub fn first(&self) -> Option<&CigarOp> {
        self.ops.first()
    }

    pub fn last(&self) -> Option<&CigarOp> {
        self.ops.last()
    }
}

impl From<Vec<CigarOp>> for Cigar {
    fn from(ops: Vec<CigarOp>) -> Self {
        Cigar { ops }
    }
}

impl From<Vec<(CigarKind, u32)>> for Cigar {
    fn from(pairs: Vec<(CigarKind, u32)>) -> Self {
        Cigar {
            ops: pairs
                .into_iter()
                .map(|(kind, len)| CigarOp::new(kind, len))
                .collect(),
        }
    }
}

impl FromIterator<CigarOp> for Cigar {
    fn from_iter<T: IntoIterator<Item = CigarOp>>(iter: T) -> Self {
        Cigar {
            ops: iter.into_iter().collect(),
        }
    }
}

impl FromStr for Cigar {
    type Err = CircleScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" || s.is_empty() {
            return Ok(Cigar::default());
        }

        let mut ops = Vec::new();
        let mut len: Option<u32> = None;

        for c in s.chars() {
            if let Some(digit) = c.to_digit(10) {
                let current = len.unwrap_or(0);
                len = Some(
                    current
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit))
                        .ok_or_else(|| CircleScanError::InvalidCigar(s.to_string()))?,
                );
                continue;
            }

            let kind =
                CigarKind::from_char(c).ok_or_else(|| CircleScanError::InvalidCigar(s.to_string()))?;
            let op_len = len
                .take()
                .ok_or_else(|| CircleScanError::InvalidCigar(s.to_string()))?;
            ops.push(CigarOp::new(kind, op_len));
        }

        // trailing digits without an operation
        if len.is_some() {
            return Err(CircleScanError::InvalidCigar(s.to_string()));
        }

        Ok(Cigar { ops })
    }
}

impl Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "*");
        }
        for op in self.ops.iter() {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl Serialize for Cigar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Cigar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
