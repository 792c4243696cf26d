//! BAM-backed read source and read index.
//!
//! [`BamReadSource`] streams every mapped record of a BAM file in file order.
//! [`BamReadIndex`] answers positional queries through the file's `.bai` index; create one
//! with `samtools index your_file.bam`.
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use noodles::bam;
use noodles::bgzf;
use noodles::core::{Position, Region};
use noodles::sam;
use noodles::sam::alignment::RecordBuf;
use noodles::sam::alignment::record::cigar::op::Kind;

use circlescan_core::models::{AlignedRead, Cigar, CigarKind, CigarOp, ReadId, ReadIdAllocator};
use circlescan_core::utils::reverse_complement;
use circlescan_core::{CircleScanError, Result};

use crate::index::{InMemoryReadIndex, ReadIndex};

/// Fetched reads are numbered from here so they never share an id with streamed reads.
pub const FETCHED_READ_ID_OFFSET: u64 = 1 << 48;

/// Path of the `.bai` index noodles looks for next to `path`.
pub fn bai_path(path: &Path) -> PathBuf {
    let mut bai = path.as_os_str().to_owned();
    bai.push(".bai");
    PathBuf::from(bai)
}

pub fn has_bai(path: &Path) -> bool {
    bai_path(path).is_file()
}

fn cigar_kind(kind: Kind) -> CigarKind {
    match kind {
        Kind::Match => CigarKind::Match,
        Kind::Insertion => CigarKind::Insertion,
        Kind::Deletion => CigarKind::Deletion,
        Kind::Skip => CigarKind::Skip,
        Kind::SoftClip => CigarKind::SoftClip,
        Kind::HardClip => CigarKind::HardClip,
        Kind::Pad => CigarKind::Pad,
        Kind::SequenceMatch => CigarKind::SequenceMatch,
        Kind::SequenceMismatch => CigarKind::SequenceMismatch,
    }
}

///
/// Convert one BAM record into an [`AlignedRead`].
///
/// Returns `None` for records the scan never considers: unmapped records, records without a
/// reference or position, and records without cigar operations.
///
pub fn read_from_record(
    header: &sam::Header,
    record: &RecordBuf,
    id: ReadId,
) -> Result<Option<AlignedRead>> {
    let query_name = record
        .name()
        .map(|name| String::from_utf8_lossy(name.as_ref()).into_owned())
        .unwrap_or_else(|| "*".to_string());

    let flags = record.flags();
    if flags.is_unmapped() {
        debug!("skipping unmapped record {}", query_name);
        return Ok(None);
    }

    let (Some(reference_id), Some(start)) =
        (record.reference_sequence_id(), record.alignment_start())
    else {
        debug!("skipping record {} without a placement", query_name);
        return Ok(None);
    };

    if record.cigar().as_ref().is_empty() {
        debug!("skipping record {} without cigar operations", query_name);
        return Ok(None);
    }

    let reference_name = header
        .reference_sequences()
        .get_index(reference_id)
        .map(|(name, _)| name.to_string())
        .ok_or_else(|| {
            CircleScanError::UnknownReference(format!("{} (read {})", reference_id, query_name))
        })?;

    let cigar = record
        .cigar()
        .as_ref()
        .iter()
        .map(|op| {
            let len = u32::try_from(op.len()).map_err(|_| {
                CircleScanError::MalformedAlignment(format!(
                    "cigar operation of read {} is too long: {}",
                    query_name,
                    op.len()
                ))
            })?;
            Ok(CigarOp::new(cigar_kind(op.kind()), len))
        })
        .collect::<Result<Cigar>>()?;

    let sequence = record.sequence().as_ref();
    let forward_sequence = if flags.is_reverse_complemented() {
        reverse_complement(sequence)
    } else {
        sequence.to_vec()
    };

    Ok(Some(AlignedRead::new(
        id,
        query_name,
        reference_name,
        (usize::from(start) - 1) as u64,
        cigar,
        forward_sequence,
    )))
}

///
/// Streams the mapped records of a BAM file as [`AlignedRead`]s.
///
/// Ids are assigned in file order, counting skipped records too.
///
pub struct BamReadSource {
    reader: bam::io::Reader<bgzf::Reader<File>>,
    header: sam::Header,
    record: RecordBuf,
    ids: ReadIdAllocator,
}

impl BamReadSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = File::open(path.as_ref()).map(bam::io::Reader::new)?;
        let header = reader.read_header()?;

        Ok(BamReadSource {
            reader,
            header,
            record: RecordBuf::default(),
            ids: ReadIdAllocator::new(),
        })
    }

}

impl Iterator for BamReadSource {
    type Item = Result<AlignedRead>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record_buf(&self.header, &mut self.record) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }

            let id = self.ids.next_id();
            match read_from_record(&self.header, &self.record, id) {
                Ok(Some(read)) => return Some(Ok(read)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Read a whole BAM file into an [`InMemoryReadIndex`]. No `.bai` is needed.
pub fn load_bam<P: AsRef<Path>>(path: P) -> Result<InMemoryReadIndex> {
    let reads = BamReadSource::from_path(path)?.collect::<Result<Vec<_>>>()?;
    Ok(InMemoryReadIndex::from_reads(reads))
}

///
/// A [`ReadIndex`] backed by a `.bai`-indexed BAM file.
///
/// Every fetch is a region query against the file.
///
pub struct BamReadIndex {
    reader: bam::io::IndexedReader<bgzf::Reader<File>>,
    header: sam::Header,
    ids: ReadIdAllocator,
}

impl BamReadIndex {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !has_bai(path) {
            return Err(CircleScanError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no index found at {}", bai_path(path).display()),
            )));
        }

        let mut reader = bam::io::indexed_reader::Builder::default().build_from_path(path)?;
        let header = reader.read_header()?;

        Ok(BamReadIndex {
            reader,
            header,
            ids: ReadIdAllocator::starting_at(FETCHED_READ_ID_OFFSET),
        })
    }
}

impl ReadIndex for BamReadIndex {
    fn fetch(&mut self, reference_name: &str, start: u64, end: u64) -> Result<Vec<AlignedRead>> {
        if end <= start
            || !self
                .header
                .reference_sequences()
                .contains_key(reference_name.as_bytes())
        {
            return Ok(Vec::new());
        }

        // [start, end) 0-based is [start + 1, end] 1-based
        let (Some(first), Some(last)) = (
            Position::new(start as usize + 1),
            Position::new(end as usize),
        ) else {
            return Ok(Vec::new());
        };
        let region = Region::new(reference_name, first..=last);

        let mut reads = Vec::new();
        for result in self.reader.query(&self.header, &region)? {
            let record = result?;
            let record = RecordBuf::try_from_alignment_record(&self.header, &record)?;
            if let Some(read) = read_from_record(&self.header, &record, self.ids.next_id())? {
                reads.push(read);
            }
        }

        Ok(reads)
    }
}
