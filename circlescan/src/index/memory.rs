use fxhash::FxHashMap as HashMap;
use gtars_overlaprs::{AIList, Interval, Overlapper};

use circlescan_core::Result;
use circlescan_core::models::AlignedRead;

use super::ReadIndex;

/// Reference spans of the stored reads, tagged with each read's slot in the arena.
type SpanList = AIList<u64, usize>;

///
/// A read index held entirely in memory: one Augmented Interval List per reference over each
/// read's reference span.
///
/// Reads are kept in ingestion order. Reads with no cigar operations or no aligned bases are
/// stored (so that iterating the index still yields them) but never returned by a fetch.
///
#[derive(Debug, Default)]
pub struct InMemoryReadIndex {
    reads: Vec<AlignedRead>,
    lists: HashMap<String, SpanList>,
}

impl InMemoryReadIndex {
    pub fn from_reads<I>(reads: I) -> Self
    where
        I: IntoIterator<Item = AlignedRead>,
    {
        let reads: Vec<AlignedRead> = reads.into_iter().collect();

        let mut spans_by_ref: HashMap<String, Vec<Interval<u64, usize>>> = HashMap::default();
        for (slot, read) in reads.iter().enumerate() {
            let Ok((start, end)) = read.reference_span() else {
                continue;
            };
            if end <= start {
                continue;
            }
            spans_by_ref
                .entry(read.reference_name.clone())
                .or_default()
                .push(Interval {
                    start,
                    end,
                    val: slot,
                });
        }

        let lists = spans_by_ref
            .into_iter()
            .map(|(reference, spans)| (reference, SpanList::build(spans)))
            .collect();

        InMemoryReadIndex { reads, lists }
    }

    /// Every stored read, in ingestion order.
    pub fn reads(&self) -> &[AlignedRead] {
        &self.reads
    }

    /// The stored reads as a scan source.
    pub fn stream(&self) -> impl Iterator<Item = Result<AlignedRead>> + '_ {
        self.reads.iter().cloned().map(Ok)
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    /// Reads overlapping `[start, end)` on `reference_name`, in ingestion order.
    pub fn query(&self, reference_name: &str, start: u64, end: u64) -> Vec<&AlignedRead> {
        if end <= start {
            return Vec::new();
        }
        let Some(list) = self.lists.get(reference_name) else {
            return Vec::new();
        };

        let mut slots: Vec<usize> = list
            .find(start, end)
            .into_iter()
            .map(|span| span.val)
            .collect();
        slots.sort_unstable();
        slots.into_iter().map(|slot| &self.reads[slot]).collect()
    }
}

impl ReadIndex for InMemoryReadIndex {
    fn fetch(&mut self, reference_name: &str, start: u64, end: u64) -> Result<Vec<AlignedRead>> {
        Ok(self
            .query(reference_name, start, end)
            .into_iter()
            .cloned()
            .collect())
    }
}

// lets a scan stream from the index while also querying it
impl ReadIndex for &InMemoryReadIndex {
    fn fetch(&mut self, reference_name: &str, start: u64, end: u64) -> Result<Vec<AlignedRead>> {
        Ok(self
            .query(reference_name, start, end)
            .into_iter()
            .cloned()
            .collect())
    }
}
