//! Property storage (directory) entries.
//!
//! The directory is always four 128-byte entries: the root storage, the
//! workbook stream, and two empty entries that fill the directory sector.

use super::layout::{ContainerLayout, SectorSlot, DIRECTORY_ENTRY_SIZE};
use crate::biff::parser::{read_u16, read_u32};
use crate::error::{XlsError, XlsResult};

/// Name field width in bytes (31 UTF-16 code units plus the terminator).
const NAME_FIELD_LEN: usize = 64;
const MAX_NAME_UNITS: usize = NAME_FIELD_LEN / 2 - 1;

/// Entry object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EntryType {
    Empty = 0x00,
    Storage = 0x01,
    Stream = 0x02,
    Root = 0x05,
}

impl EntryType {
    fn from_u8(v: u8) -> XlsResult<Self> {
        match v {
            0x00 => Ok(EntryType::Empty),
            0x01 => Ok(EntryType::Storage),
            0x02 => Ok(EntryType::Stream),
            0x05 => Ok(EntryType::Root),
            other => Err(XlsError::Parse(format!(
                "unknown directory entry type 0x{other:02X}"
            ))),
        }
    }
}

/// One property storage entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub entry_type: EntryType,
    /// Directory index of the first child, `None` for no child.
    pub child: Option<u32>,
    pub start_sector: SectorSlot,
    pub size: u32,
}

impl DirectoryEntry {
    fn new(
        name: &str,
        entry_type: EntryType,
        child: Option<u32>,
        start_sector: SectorSlot,
        size: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            entry_type,
            child,
            start_sector,
            size,
        }
    }

    /// Serialize to the 128-byte on-disk form.
    ///
    /// Sibling links are always empty, class id, state bits and both
    /// timestamps are zero.
    pub fn to_bytes(&self) -> [u8; DIRECTORY_ENTRY_SIZE] {
        let mut out = [0u8; DIRECTORY_ENTRY_SIZE];

        let units: Vec<u16> = self.name.encode_utf16().take(MAX_NAME_UNITS).collect();
        for (i, unit) in units.iter().enumerate() {
            out[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
        }
        let name_len = if units.is_empty() {
            0
        } else {
            ((units.len() + 1) * 2) as u16
        };

        out[0x40..0x42].copy_from_slice(&name_len.to_le_bytes());
        out[0x42] = self.entry_type as u8;
        // 0x43: node color, left as 0
        out[0x44..0x48].copy_from_slice(&SectorSlot::Free.to_le_bytes()); // left sibling
        out[0x48..0x4C].copy_from_slice(&SectorSlot::Free.to_le_bytes()); // right sibling
        let child = self.child.map_or(SectorSlot::Free, SectorSlot::Index);
        out[0x4C..0x50].copy_from_slice(&child.to_le_bytes());
        // 0x50..0x74: class id, state bits, creation and modification times
        out[0x74..0x78].copy_from_slice(&self.start_sector.to_le_bytes());
        out[0x78..0x7C].copy_from_slice(&self.size.to_le_bytes());
        out
    }

    /// Parse an entry previously produced by [`to_bytes`](Self::to_bytes).
    pub fn parse(data: &[u8]) -> XlsResult<Self> {
        if data.len() < DIRECTORY_ENTRY_SIZE {
            return Err(XlsError::Parse(format!(
                "directory entry too short: {} bytes",
                data.len()
            )));
        }

        let mut off = 0x40;
        let name_len = read_u16(data, &mut off)? as usize;
        if name_len > NAME_FIELD_LEN || name_len % 2 != 0 {
            return Err(XlsError::Parse(format!(
                "invalid directory name length {name_len}"
            )));
        }
        let units: Vec<u16> = data[..name_len.saturating_sub(2)]
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        let name = String::from_utf16(&units)
            .map_err(|e| XlsError::Parse(format!("invalid directory name: {e}")))?;

        let entry_type = EntryType::from_u8(data[0x42])?;

        let mut off = 0x4C;
        let child = match SectorSlot::from_raw(read_u32(data, &mut off)?) {
            SectorSlot::Index(i) => Some(i),
            _ => None,
        };

        let mut off = 0x74;
        let start_sector = SectorSlot::from_raw(read_u32(data, &mut off)?);
        let size = read_u32(data, &mut off)?;

        Ok(Self {
            name,
            entry_type,
            child,
            start_sector,
            size,
        })
    }
}

/// The fixed four entries for a container holding one stream named `stream_name`.
pub fn property_storage(layout: &ContainerLayout, stream_name: &str) -> [DirectoryEntry; 4] {
    // book_size is capped by MAX_PAYLOAD_SIZE and always fits in u32.
    let book_size = layout.book_size() as u32;
    [
        DirectoryEntry::new("Root Entry", EntryType::Root, Some(1), SectorSlot::EndOfChain, 0),
        DirectoryEntry::new(stream_name, EntryType::Stream, None, SectorSlot::Index(0), book_size),
        DirectoryEntry::new("", EntryType::Empty, None, SectorSlot::Index(0), 0),
        DirectoryEntry::new("", EntryType::Empty, None, SectorSlot::Index(0), 0),
    ]
}

/// Serialized directory sector.
pub fn property_storage_bytes(layout: &ContainerLayout, stream_name: &str) -> Vec<u8> {
    property_storage(layout, stream_name)
        .iter()
        .flat_map(|entry| entry.to_bytes())
        .collect()
}
