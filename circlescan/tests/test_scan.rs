use circlescan::{
    CircleReport, DEFAULT_SCORE_THRESHOLD, InMemoryReadIndex, ReportStyle, render, render_with,
    scan,
};
use circlescan_core::CircleScanError;
use circlescan_core::models::{AlignedRead, Cigar, ReadId};

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

fn read(
    id: u64,
    name: &str,
    reference: &str,
    position: u64,
    cigar: &str,
    seq: &[u8],
) -> AlignedRead {
    AlignedRead::new(
        ReadId(id),
        name,
        reference,
        position,
        cigar.parse().unwrap(),
        seq.to_vec(),
    )
}

fn scan_reads(reads: Vec<AlignedRead>, threshold: f64) -> Result<CircleReport, CircleScanError> {
    let index = InMemoryReadIndex::from_reads(reads);
    scan(index.stream(), &mut &index, threshold)
}

/// One start read with a single end read whose tail repeats the start read's head.
#[fixture]
fn junction() -> Vec<AlignedRead> {
    vec![
        read(0, "start", "chr1", 100, "10M5S", b"AAAAAAAAAAXXXXX"),
        read(1, "end", "chr1", 108, "8M0S", b"GGGGGGGGAAAAAAAAAA"),
    ]
}

/// A start read whose two aligned blocks both open a window over the same end read.
#[fixture]
fn double_window() -> Vec<AlignedRead> {
    vec![
        read(0, "split", "chr1", 100, "5M1I4M5S", b"AAAAATTTTTGGGGG"),
        read(1, "end", "chr1", 108, "12M0S", b"CCCCCAAAAAAAAAA"),
    ]
}

#[rstest]
fn test_end_to_end_report(junction: Vec<AlignedRead>) {
    let report = scan_reads(junction, DEFAULT_SCORE_THRESHOLD).unwrap();

    assert_eq!(report.len(), 1);
    let entry = report.get(ReadId(0)).unwrap();
    assert_eq!(entry.candidates.len(), 1);
    assert_eq!(entry.candidates[0].end_read.id, ReadId(1));

    let expected = "start: 10M5S / AAAAAAAAAAXXXXX @ 100\n\
        \tscore = 1.00 :: 8M0S / GGGGGGGGAAAAAAAAAA / 108 / GGGGGGGGAAAAAAAAAA <overlap> AAAAAAAAAA = 10 / depth = 5\n";
    assert_eq!(render(&report).unwrap(), expected);
}

#[rstest]
fn test_blocks_report(double_window: Vec<AlignedRead>) {
    let report = scan_reads(double_window, DEFAULT_SCORE_THRESHOLD).unwrap();
    let rendered = render_with(&report, ReportStyle::Blocks).unwrap();

    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "split: 5M1I4M5S / AAAAATTTTTGGGGG @ [(100, 105), (105, 109)]"
    );
    assert_eq!(
        lines[1],
        "\t1.00 :: 12M0S / CCCCCAAAAAAAAAA / [(108, 120)] / CCCCCAAAAAAAAAA <> AAAAA = 5 / depth = 10"
    );
    assert_eq!(lines[1], lines[2]);
}

#[rstest]
fn test_scan_is_idempotent(junction: Vec<AlignedRead>) {
    let index = InMemoryReadIndex::from_reads(junction);

    let first = scan(index.stream(), &mut &index, DEFAULT_SCORE_THRESHOLD).unwrap();
    let second = scan(index.stream(), &mut &index, DEFAULT_SCORE_THRESHOLD).unwrap();

    assert_eq!(first, second);
    assert_eq!(render(&first).unwrap(), render(&second).unwrap());
}

#[rstest]
fn test_empty_input_gives_empty_report() {
    let report = scan_reads(Vec::new(), DEFAULT_SCORE_THRESHOLD).unwrap();
    assert!(report.is_empty());
    assert_eq!(render(&report).unwrap(), "");
}

#[rstest]
fn test_start_read_without_neighbours_is_not_recorded() {
    let reads = vec![read(0, "lonely", "chr1", 100, "10M5S", b"AAAAAAAAAAXXXXX")];
    let report = scan_reads(reads, 0.0).unwrap();
    assert!(report.is_empty());
}

#[rstest]
fn test_end_reads_on_other_references_are_ignored() {
    let reads = vec![
        read(0, "start", "chr1", 100, "10M5S", b"AAAAAAAAAAXXXXX"),
        read(1, "end", "chr2", 108, "8M0S", b"GGGGGGGGAAAAAAAAAA"),
    ];
    let report = scan_reads(reads, DEFAULT_SCORE_THRESHOLD).unwrap();
    assert!(report.is_empty());
}

#[rstest]
fn test_shared_query_names_stay_distinct() {
    let reads = vec![
        read(0, "dup", "chr1", 100, "10M5S", b"AAAAAAAAAAXXXXX"),
        read(1, "end", "chr1", 108, "8M0S", b"GGGGGGGGAAAAAAAAAA"),
        read(2, "dup", "chr1", 1000, "10M5S", b"AAAAAAAAAAXXXXX"),
        read(3, "end", "chr1", 1008, "8M0S", b"GGGGGGGGAAAAAAAAAA"),
    ];
    let report = scan_reads(reads, DEFAULT_SCORE_THRESHOLD).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(
        report.get(ReadId(0)).unwrap().candidates[0].end_read.id,
        ReadId(1)
    );
    assert_eq!(
        report.get(ReadId(2)).unwrap().candidates[0].end_read.id,
        ReadId(3)
    );
}

#[rstest]
fn test_candidates_found_twice_are_kept_twice(double_window: Vec<AlignedRead>) {
    let report = scan_reads(double_window, DEFAULT_SCORE_THRESHOLD).unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.candidate_count(), 2);
}

#[rstest]
#[case(0.0, 1)]
#[case(0.5, 1)]
#[case(1.0, 1)]
#[case(2.0, 0)]
fn test_threshold_gates_on_candidate_count(
    junction: Vec<AlignedRead>,
    #[case] threshold: f64,
    #[case] expected_entries: usize,
) {
    // the single candidate scores exactly 1.0; only the count is compared to the threshold
    let report = scan_reads(junction, threshold).unwrap();
    assert_eq!(report.len(), expected_entries);
}

#[rstest]
fn test_two_candidates_pass_a_threshold_of_two(double_window: Vec<AlignedRead>) {
    let report = scan_reads(double_window, 2.0).unwrap();
    assert_eq!(report.len(), 1);

    let report = scan_reads(
        vec![
            read(0, "split", "chr1", 100, "5M1I4M5S", b"AAAAATTTTTGGGGG"),
            read(1, "end", "chr1", 108, "12M0S", b"CCCCCAAAAAAAAAA"),
        ],
        2.5,
    )
    .unwrap();
    assert!(report.is_empty());
}

#[rstest]
fn test_low_scoring_candidates_are_dropped_regardless_of_threshold() {
    // overlap 4, depth 3: score 0.24
    let reads = vec![
        read(0, "start", "chr1", 300, "4M1S", b"CCCCA"),
        read(1, "end", "chr1", 302, "3M2S", b"TTCCCC"),
    ];
    let report = scan_reads(reads, 0.0).unwrap();
    assert!(report.is_empty());
}

#[rstest]
fn test_malformed_read_aborts_the_scan(junction: Vec<AlignedRead>) {
    let mut reads = junction;
    reads.push(AlignedRead::new(
        ReadId(9),
        "broken",
        "chr1",
        500,
        Cigar::default(),
        b"ACGT".to_vec(),
    ));

    let result = scan_reads(reads, DEFAULT_SCORE_THRESHOLD);
    assert!(matches!(result, Err(CircleScanError::MalformedAlignment(_))));
}

#[cfg(feature = "serde")]
#[rstest]
fn test_report_serializes_to_json(junction: Vec<AlignedRead>) {
    let report = scan_reads(junction, DEFAULT_SCORE_THRESHOLD).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    let entry = &json["entries"][0];
    assert_eq!(entry["start_read"]["query_name"], "start");
    assert_eq!(entry["start_read"]["cigar"], "10M5S");
    assert_eq!(entry["start_read"]["forward_sequence"], "AAAAAAAAAAXXXXX");
    assert_eq!(entry["candidates"][0]["metrics"]["overlap"], 10);
    assert_eq!(entry["candidates"][0]["metrics"]["score"], 1.0);
}
