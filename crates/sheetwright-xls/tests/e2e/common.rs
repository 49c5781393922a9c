//! Common utilities for XLS E2E tests: a minimal container parser that
//! follows the header's own pointers instead of trusting the layout math.

use std::io::Cursor;

use sheetwright_xls::biff::parser::read_u32;
use sheetwright_xls::biff::{read_all_records, BiffRecord};
use sheetwright_xls::ole::DirectoryEntry;
use sheetwright_xls::{BiffWriter, SectorSlot, SubstreamKind};

pub const SECTOR: usize = 512;

/// A container split back into its regions.
#[derive(Debug)]
pub struct ParsedContainer {
    pub fat_sector_count: u32,
    pub root_start: u32,
    pub fat_sectors: Vec<u32>,
    pub depot: Vec<SectorSlot>,
    pub directory: Vec<DirectoryEntry>,
    pub data_region: Vec<u8>,
}

pub fn sector(bytes: &[u8], index: u32) -> &[u8] {
    let start = SECTOR + index as usize * SECTOR;
    &bytes[start..start + SECTOR]
}

pub fn parse_container(bytes: &[u8]) -> ParsedContainer {
    assert_eq!(bytes.len() % SECTOR, 0, "file is not sector aligned");
    assert_eq!(&bytes[..8], &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]);

    let mut off = 0x2C;
    let fat_sector_count = read_u32(bytes, &mut off).unwrap();
    let root_start = read_u32(bytes, &mut off).unwrap();

    let mut off = 0x4C;
    let mut fat_sectors = Vec::new();
    for _ in 0..109 {
        match SectorSlot::from_raw(read_u32(bytes, &mut off).unwrap()) {
            SectorSlot::Index(i) => fat_sectors.push(i),
            SectorSlot::Free => {}
            other => panic!("unexpected header FAT slot {other:?}"),
        }
    }

    let mut depot = Vec::new();
    for &fat in &fat_sectors {
        let data = sector(bytes, fat);
        let mut off = 0;
        while off < SECTOR {
            depot.push(SectorSlot::from_raw(read_u32(data, &mut off).unwrap()));
        }
    }

    let directory = sector(bytes, root_start)
        .chunks_exact(128)
        .map(|entry| DirectoryEntry::parse(entry).unwrap())
        .collect();

    let data_region = bytes[SECTOR..SECTOR + root_start as usize * SECTOR].to_vec();

    ParsedContainer {
        fat_sector_count,
        root_start,
        fat_sectors,
        depot,
        directory,
        data_region,
    }
}

/// Collect the bytes of the chain starting at `start` by following the depot.
pub fn read_chain(bytes: &[u8], depot: &[SectorSlot], start: u32) -> Vec<u8> {
    let chain = sheetwright_xls::ole::depot::walk_chain(depot, start).expect("chain must close");
    chain
        .into_iter()
        .flat_map(|s| sector(bytes, s).to_vec())
        .collect()
}

/// A workbook globals substream: BOF, `bodies.len()` records of type `id`, EOF.
pub fn globals_stream(id: u16, bodies: &[Vec<u8>]) -> BiffWriter {
    let mut biff = BiffWriter::new().unwrap();
    for body in bodies {
        biff.append_record(id, body);
    }
    biff.store_bof(SubstreamKind::WorkbookGlobals);
    biff.store_eof();
    biff
}

pub fn records_of(stream: &[u8], merge_continues: bool) -> Vec<BiffRecord> {
    read_all_records(&mut Cursor::new(stream), merge_continues).unwrap()
}
