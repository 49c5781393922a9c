//! Sector arithmetic for a single-level compound container.
//!
//! The data stream is stored in 512-byte big blocks starting at sector 0,
//! followed by one directory sector and then the big block depot sectors.
//! Every FAT sector is addressed from the 109 slots of the header, which caps
//! the payload at [`MAX_PAYLOAD_SIZE`].

use crate::error::{XlsError, XlsResult};

/// Big block size.
pub const SECTOR_SIZE: u64 = 512;

/// Streams below this size would live in the mini stream; the payload is
/// padded up to it so that only big blocks are needed.
pub const MIN_BOOK_SIZE: u64 = 4096;

/// Depot slots per FAT sector (512 / 4).
pub const SLOTS_PER_FAT_SECTOR: u32 = 128;

/// FAT sector pointers held in the header.
pub const HEADER_FAT_SLOTS: usize = 109;

/// (109 depot blocks × (128 − 1 marker) − 1 end of chain) × 512 bytes.
pub const MAX_PAYLOAD_SIZE: u64 = 7_087_104;

/// Size of one property storage entry.
pub const DIRECTORY_ENTRY_SIZE: usize = 128;

/// One slot of the big block depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorSlot {
    /// Unused slot (`-1`).
    Free,
    /// Last sector of a chain (`-2`).
    EndOfChain,
    /// Sector holding depot data itself (`-3`).
    FatMarker,
    /// Index of the next sector in the chain.
    Index(u32),
}

impl SectorSlot {
    const FREE: u32 = 0xFFFF_FFFF;
    const END_OF_CHAIN: u32 = 0xFFFF_FFFE;
    const FAT_MARKER: u32 = 0xFFFF_FFFD;

    /// Value as stored on disk.
    pub fn to_raw(self) -> u32 {
        match self {
            SectorSlot::Free => Self::FREE,
            SectorSlot::EndOfChain => Self::END_OF_CHAIN,
            SectorSlot::FatMarker => Self::FAT_MARKER,
            SectorSlot::Index(i) => i,
        }
    }

    pub fn from_raw(raw: u32) -> Self {
        match raw {
            Self::FREE => SectorSlot::Free,
            Self::END_OF_CHAIN => SectorSlot::EndOfChain,
            Self::FAT_MARKER => SectorSlot::FatMarker,
            i => SectorSlot::Index(i),
        }
    }

    pub fn to_le_bytes(self) -> [u8; 4] {
        self.to_raw().to_le_bytes()
    }
}

/// Sizes derived from the payload length, computed once by [`ContainerLayout::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLayout {
    payload_size: u64,
    book_size: u64,
    big_blocks: u32,
    list_blocks: u32,
    root_start: u32,
}

impl ContainerLayout {
    /// Compute the layout for a data stream of `payload_size` bytes.
    ///
    /// Fails with [`XlsError::SizeExceeded`] above [`MAX_PAYLOAD_SIZE`].
    pub fn new(payload_size: u64) -> XlsResult<Self> {
        if payload_size > MAX_PAYLOAD_SIZE {
            return Err(XlsError::SizeExceeded {
                size: payload_size,
                max: MAX_PAYLOAD_SIZE,
            });
        }

        let book_size = payload_size.max(MIN_BOOK_SIZE);
        // Bounded by MAX_PAYLOAD_SIZE / 512 = 13842, so the casts cannot truncate.
        let big_blocks = ((book_size + SECTOR_SIZE - 1) / SECTOR_SIZE) as u32;
        // 127 chain slots plus one marker per depot sector, plus the end of chain.
        let list_blocks = big_blocks / 127 + 1;

        Ok(Self {
            payload_size,
            book_size,
            big_blocks,
            list_blocks,
            root_start: big_blocks,
        })
    }

    /// Size of the BIFF stream as handed to the writer.
    pub fn payload_size(&self) -> u64 {
        self.payload_size
    }

    /// Payload size raised to [`MIN_BOOK_SIZE`]; the size declared for the stream.
    pub fn book_size(&self) -> u64 {
        self.book_size
    }

    /// Number of data sectors.
    pub fn big_blocks(&self) -> u32 {
        self.big_blocks
    }

    /// Number of big block depot (FAT) sectors.
    pub fn list_blocks(&self) -> u32 {
        self.list_blocks
    }

    /// Sector index of the directory, right after the data sectors.
    pub fn root_start(&self) -> u32 {
        self.root_start
    }

    /// Sector indices of the depot sectors, which follow the directory sector.
    pub fn fat_sectors(&self) -> impl Iterator<Item = u32> {
        let first = self.root_start + 1;
        first..first + self.list_blocks
    }

    /// Length of the data region once padded to whole sectors.
    pub fn data_region_len(&self) -> u64 {
        u64::from(self.big_blocks) * SECTOR_SIZE
    }

    /// Zero bytes written after the payload to fill the data region.
    pub fn padding_len(&self) -> u64 {
        self.data_region_len() - self.payload_size
    }

    /// Total number of depot slots written.
    pub fn depot_slot_count(&self) -> usize {
        (self.list_blocks * SLOTS_PER_FAT_SECTOR) as usize
    }

    /// Size of the complete container file.
    pub fn file_len(&self) -> u64 {
        SECTOR_SIZE // header
            + self.data_region_len()
            + SECTOR_SIZE // directory
            + u64::from(self.list_blocks) * SECTOR_SIZE
    }
}
