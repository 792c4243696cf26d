//! Positional read indexes.
//!
//! The circle scan asks one question of its index, over and over: which reads overlap
//! `[start, end)` on a given reference? [`ReadIndex`] is that question. Two answers are
//! provided: [`InMemoryReadIndex`] (an Augmented Interval List per reference) and, in
//! [`crate::bam`], an index backed by a `.bai`-indexed BAM file.
pub mod memory;

use circlescan_core::Result;
use circlescan_core::models::AlignedRead;

pub use self::memory::InMemoryReadIndex;

pub trait ReadIndex {
    ///
    /// All reads whose reference span overlaps the half-open interval `[start, end)` on
    /// `reference_name`.
    ///
    /// The order is unspecified but must be stable for a given index state. An empty or
    /// inverted window, or an unknown reference, yields no reads.
    ///
    fn fetch(&mut self, reference_name: &str, start: u64, end: u64) -> Result<Vec<AlignedRead>>;
}

impl<T: ReadIndex + ?Sized> ReadIndex for &mut T {
    fn fetch(&mut self, reference_name: &str, start: u64, end: u64) -> Result<Vec<AlignedRead>> {
        (**self).fetch(reference_name, start, end)
    }
}

impl<T: ReadIndex + ?Sized> ReadIndex for Box<T> {
    fn fetch(&mut self, reference_name: &str, start: u64, end: u64) -> Result<Vec<AlignedRead>> {
        (**self).fetch(reference_name, start, end)
    }
}
