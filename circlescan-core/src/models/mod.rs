pub mod cigar;
pub mod read;

// re-export for cleaner imports
pub use self::cigar::{Cigar, CigarKind, CigarOp};
pub use self::read::{AlignedBlock, AlignedRead, ReadId, ReadIdAllocator};
