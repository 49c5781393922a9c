//! Container layout checks against files produced end to end.

use pretty_assertions::assert_eq;
use sheetwright_xls::ole::EntryType;
use sheetwright_xls::{OleWriter, SectorSlot, WriteOptions, XlsWriter};

use crate::{globals_stream, parse_container, read_chain, SECTOR};

fn container_for(payload: &[u8]) -> Vec<u8> {
    let mut ole = OleWriter::new(Vec::new());
    ole.set_size(payload.len() as u64).unwrap();
    ole.write_header().unwrap();
    ole.write(payload).unwrap();
    ole.close().unwrap()
}

#[test]
fn test_small_workbook_is_padded_to_eight_sectors() {
    let biff = globals_stream(0x0022, &[vec![0x00, 0x00]]);
    let stream = biff.to_vec();
    let bytes = XlsWriter::write(biff, Vec::new(), &WriteOptions::default()).unwrap();

    assert_eq!(bytes.len(), SECTOR * (1 + 8 + 1 + 1));
    let parsed = parse_container(&bytes);
    assert_eq!(parsed.fat_sector_count, 1);
    assert_eq!(parsed.root_start, 8);
    assert_eq!(parsed.fat_sectors, vec![9]);

    assert_eq!(&parsed.data_region[..stream.len()], &stream[..]);
    assert!(parsed.data_region[stream.len()..].iter().all(|&b| b == 0));
}

#[test]
fn test_directory_entries() {
    let payload = vec![0x5A; 10_000];
    let parsed = parse_container(&container_for(&payload));

    assert_eq!(parsed.directory.len(), 4);

    let root = &parsed.directory[0];
    assert_eq!(root.name, "Root Entry");
    assert_eq!(root.entry_type, EntryType::Root);
    assert_eq!(root.child, Some(1));
    assert_eq!(root.size, 0);

    let book = &parsed.directory[1];
    assert_eq!(book.name, "Book");
    assert_eq!(book.entry_type, EntryType::Stream);
    assert_eq!(book.start_sector, SectorSlot::Index(0));
    assert_eq!(book.size, 10_000);

    for empty in &parsed.directory[2..] {
        assert_eq!(empty.entry_type, EntryType::Empty);
        assert_eq!(empty.name, "");
        assert_eq!(empty.size, 0);
    }
}

#[test]
fn test_stream_chain_reproduces_payload() {
    let payload: Vec<u8> = (0..70_001u32).map(|i| (i * 7 % 256) as u8).collect();
    let bytes = container_for(&payload);
    let parsed = parse_container(&bytes);

    let book = &parsed.directory[1];
    let data = read_chain(&bytes, &parsed.depot, 0);
    assert_eq!(data.len(), 137 * SECTOR);
    assert_eq!(&data[..book.size as usize], &payload[..]);

    let dir_chain = read_chain(&bytes, &parsed.depot, parsed.root_start);
    assert_eq!(dir_chain.len(), SECTOR);
}

#[test]
fn test_depot_grows_to_second_sector() {
    let parsed = parse_container(&container_for(&vec![1u8; 127 * SECTOR]));
    assert_eq!(parsed.fat_sector_count, 2);
    assert_eq!(parsed.fat_sectors, vec![128, 129]);
    assert_eq!(parsed.depot.len(), 256);
    assert_eq!(parsed.depot[128], SectorSlot::FatMarker);
    assert_eq!(parsed.depot[129], SectorSlot::FatMarker);
    assert_eq!(parsed.depot[130], SectorSlot::Free);
}

#[test]
fn test_file_sink_matches_memory_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xls");

    let bodies = vec![vec![0x11; 3000], vec![0x22; 40]];
    XlsWriter::write_file(globals_stream(0x00FC, &bodies), &path, &WriteOptions::default())
        .unwrap();
    let in_memory = XlsWriter::write(
        globals_stream(0x00FC, &bodies),
        Vec::new(),
        &WriteOptions::default(),
    )
    .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), in_memory);
}

#[test]
fn test_largest_container() {
    let payload = vec![0u8; 7_087_104];
    let bytes = container_for(&payload);
    let parsed = parse_container(&bytes);

    assert_eq!(parsed.fat_sector_count, 109);
    assert_eq!(parsed.root_start, 13_842);
    assert_eq!(bytes.len(), SECTOR * (1 + 13_842 + 1 + 109));
    assert!(!parsed.depot.contains(&SectorSlot::Free));
}
