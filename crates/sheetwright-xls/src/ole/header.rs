//! Compound document header sector.

use super::layout::{ContainerLayout, SectorSlot, HEADER_FAT_SLOTS, SECTOR_SIZE};

pub const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

// Fixed fields of a version 3 header with 512-byte sectors. Readers check
// these values as written; none of them vary with the payload.
const MINOR_VERSION: u16 = 0x003E;
const MAJOR_VERSION: u16 = 0x0003;
const BYTE_ORDER_MARK: u16 = 0xFFFE;
const SECTOR_SHIFT: u16 = 9;
const MINI_SECTOR_SHIFT: u16 = 6;
const MINI_STREAM_CUTOFF: u32 = 0x1000;

/// Build the 512-byte header for `layout`.
pub fn header_bytes(layout: &ContainerLayout) -> Vec<u8> {
    let mut out = Vec::with_capacity(SECTOR_SIZE as usize);

    out.extend_from_slice(&OLE_MAGIC);
    out.extend_from_slice(&[0u8; 16]); // CLSID
    out.extend_from_slice(&MINOR_VERSION.to_le_bytes());
    out.extend_from_slice(&MAJOR_VERSION.to_le_bytes());
    out.extend_from_slice(&BYTE_ORDER_MARK.to_le_bytes());
    out.extend_from_slice(&SECTOR_SHIFT.to_le_bytes());
    out.extend_from_slice(&MINI_SECTOR_SHIFT.to_le_bytes());
    out.extend_from_slice(&[0u8; 6]); // reserved
    out.extend_from_slice(&0u32.to_le_bytes()); // directory sector count (v3: 0)

    out.extend_from_slice(&layout.list_blocks().to_le_bytes());
    out.extend_from_slice(&layout.root_start().to_le_bytes());

    out.extend_from_slice(&0u32.to_le_bytes()); // transaction signature
    out.extend_from_slice(&MINI_STREAM_CUTOFF.to_le_bytes());
    out.extend_from_slice(&SectorSlot::EndOfChain.to_le_bytes()); // first mini FAT sector
    out.extend_from_slice(&0u32.to_le_bytes()); // mini FAT sector count
    out.extend_from_slice(&SectorSlot::EndOfChain.to_le_bytes()); // first DIFAT sector
    out.extend_from_slice(&0u32.to_le_bytes()); // DIFAT sector count

    let mut slots = 0;
    for sector in layout.fat_sectors() {
        out.extend_from_slice(&sector.to_le_bytes());
        slots += 1;
    }
    for _ in slots..HEADER_FAT_SLOTS {
        out.extend_from_slice(&SectorSlot::Free.to_le_bytes());
    }

    out
}
