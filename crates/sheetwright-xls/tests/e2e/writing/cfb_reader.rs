//! Produced containers must open in an independent compound file reader.

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use sheetwright_xls::{BiffVersion, BiffWriter, SubstreamKind, WriteOptions, XlsWriter};

use crate::records_of;

fn read_stream(bytes: Vec<u8>, path: &str) -> Vec<u8> {
    let mut cfb = cfb::CompoundFile::open(Cursor::new(bytes)).expect("valid compound file");
    assert!(cfb.exists(path), "{path} missing");
    let mut data = Vec::new();
    cfb.open_stream(path)
        .unwrap()
        .read_to_end(&mut data)
        .unwrap();
    data
}

fn workbook(version: BiffVersion, body_len: usize) -> BiffWriter {
    let mut biff = BiffWriter::with_version(version).unwrap();
    let body: Vec<u8> = (0..body_len).map(|i| (i % 97) as u8).collect();
    biff.append_record(0x00FC, &body);
    biff.store_bof(SubstreamKind::WorkbookGlobals);
    biff.store_eof();
    biff
}

#[test]
fn test_cfb_reads_small_book_stream() {
    let biff = workbook(BiffVersion::Biff5, 100);
    let stream = biff.to_vec();
    let bytes = XlsWriter::write(biff, Vec::new(), &WriteOptions::default()).unwrap();

    let data = read_stream(bytes, "/Book");
    assert_eq!(data.len(), 4096);
    assert_eq!(&data[..stream.len()], &stream[..]);
}

#[test]
fn test_cfb_reads_large_book_stream() {
    let biff = workbook(BiffVersion::Biff5, 300_000);
    let stream = biff.to_vec();
    let bytes = XlsWriter::write(biff, Vec::new(), &WriteOptions::default()).unwrap();

    let data = read_stream(bytes, "/Book");
    assert_eq!(data, stream);

    let merged = records_of(&data, true);
    assert_eq!(merged[1].data.len(), 300_000);
}

#[test]
fn test_cfb_reads_biff8_workbook_stream() {
    let options = WriteOptions {
        version: BiffVersion::Biff8,
        ..Default::default()
    };
    let biff = workbook(BiffVersion::Biff8, 20_000);
    let stream = biff.to_vec();
    let bytes = XlsWriter::write(biff, Vec::new(), &options).unwrap();

    assert_eq!(read_stream(bytes, "/Workbook"), stream);
}
