//! Soft-clip classification of aligned reads.
//!
//! A *start read* begins with a matched run and ends in a soft clip: its unmapped tail may
//! loop back to an earlier position. An *end read* begins with a matched run and carries a
//! soft clip somewhere.
use circlescan_core::Result;
use circlescan_core::models::{AlignedRead, CigarKind};

/// True iff any cigar operation of `read` is a soft clip.
pub fn is_softclipped(read: &AlignedRead) -> Result<bool> {
    // fail on an empty cigar instead of answering `false`
    read.first_op()?;
    Ok(read.cigar.iter().any(|op| op.kind == CigarKind::SoftClip))
}

/// True iff `read` qualifies as a start read: its first op is a match and its last op a soft clip.
pub fn has_trailing_clip_with_leading_match(read: &AlignedRead) -> Result<bool> {
    let first = read.first_op()?;
    let last = read.last_op()?;
    Ok(first.kind == CigarKind::Match && last.kind == CigarKind::SoftClip)
}

/// True iff `read` can serve as an end read for a junction.
///
/// Despite the name, the check is "first op is a match and the read is soft-clipped
/// anywhere"; a leading clip does not qualify.
pub fn has_leading_clip_with_trailing_match(read: &AlignedRead) -> Result<bool> {
    let first = read.first_op()?;
    Ok(first.kind == CigarKind::Match && is_softclipped(read)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use circlescan_core::CircleScanError;
    use circlescan_core::models::ReadId;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn read_with(cigar: &str) -> AlignedRead {
        AlignedRead::new(
            ReadId(1),
            "r",
            "chr1",
            0,
            cigar.parse().unwrap(),
            b"ACGTACGTACGTACGTACGT".to_vec(),
        )
    }

    #[rstest]
    #[case("10M5S", true)]
    #[case("5S10M", true)]
    #[case("2S10M3S", true)]
    #[case("15M", false)]
    #[case("3H12M", false)]
    fn test_is_softclipped(#[case] cigar: &str, #[case] expected: bool) {
        assert_eq!(is_softclipped(&read_with(cigar)).unwrap(), expected);
    }

    #[rstest]
    #[case("10M5S", true)]
    #[case("8M0S", true)]
    #[case("5M2I3M5S", true)]
    #[case("5S10M", false)]
    #[case("15M", false)]
    #[case("10=5S", false)]
    #[case("10M5S2H", false)]
    fn test_start_read_predicate(#[case] cigar: &str, #[case] expected: bool) {
        assert_eq!(
            has_trailing_clip_with_leading_match(&read_with(cigar)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case("10M5S", true)]
    #[case("10M5S2H", true)]
    #[case("4M1D4M2S", true)]
    #[case("5S10M", false)]
    #[case("15M", false)]
    #[case("3H12M", false)]
    fn test_end_read_predicate(#[case] cigar: &str, #[case] expected: bool) {
        assert_eq!(
            has_leading_clip_with_trailing_match(&read_with(cigar)).unwrap(),
            expected
        );
    }

    #[rstest]
    fn test_empty_cigar_is_malformed_for_every_predicate() {
        let read = read_with("*");
        assert!(matches!(
            is_softclipped(&read),
            Err(CircleScanError::MalformedAlignment(_))
        ));
        assert!(matches!(
            has_trailing_clip_with_leading_match(&read),
            Err(CircleScanError::MalformedAlignment(_))
        ));
        assert!(matches!(
            has_leading_clip_with_trailing_match(&read),
            Err(CircleScanError::MalformedAlignment(_))
        ));
    }
}
