//! BIFF (Binary Interchange File Format) record streams.
//!
//! A BIFF stream is a sequence of records, each with a 4-byte header
//! (2 bytes record type + 2 bytes body length) followed by the body.
//! Records longer than the per-revision limit are continued in CONTINUE
//! records (type 0x003C).
//!
//! [`BiffWriter`] assembles streams; [`read_all_records`] walks one back,
//! which is how produced output is verified.

pub mod byte_order;
pub mod parser;
pub mod records;
pub mod writer;

pub use byte_order::FloatByteOrder;
pub use records::{BiffVersion, SubstreamKind};
pub use writer::{add_continue, frame_record, BiffWriter};

use crate::error::{XlsError, XlsResult};
use std::io::{Read, Seek};

/// A single BIFF record as found in a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiffRecord {
    /// Record type ID (e.g. `records::BOF`).
    pub record_type: u16,
    /// Record body bytes (CONTINUE bodies appended when merging).
    pub data: Vec<u8>,
    /// Byte offset of this record's header in the stream.
    pub stream_offset: u64,
}

/// Reads all records from a byte stream.
///
/// With `merge_continues`, CONTINUE bodies are concatenated onto the record
/// they follow; otherwise every segment is returned as its own record. A
/// body that runs past the end of the stream is a parse error.
pub fn read_all_records<R: Read + Seek>(
    stream: &mut R,
    merge_continues: bool,
) -> XlsResult<Vec<BiffRecord>> {
    let mut records: Vec<BiffRecord> = Vec::new();
    let mut header_buf = [0u8; 4];

    loop {
        let stream_offset = stream.stream_position()?;

        match stream.read_exact(&mut header_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(XlsError::Io(e)),
        }

        let record_type = u16::from_le_bytes([header_buf[0], header_buf[1]]);
        let body_len = u16::from_le_bytes([header_buf[2], header_buf[3]]) as usize;

        let mut body = vec![0u8; body_len];
        if body_len > 0 {
            stream.read_exact(&mut body).map_err(|_| {
                XlsError::Parse(format!(
                    "record 0x{record_type:04X} at offset {stream_offset} truncated, \
                     need {body_len} body bytes"
                ))
            })?;
        }

        if merge_continues && record_type == records::CONTINUE {
            match records.last_mut() {
                Some(prev) => prev.data.extend_from_slice(&body),
                None => {
                    return Err(XlsError::Parse(
                        "CONTINUE record without a preceding record".into(),
                    ))
                }
            }
        } else {
            records.push(BiffRecord {
                record_type,
                data: body,
                stream_offset,
            });
        }
    }

    Ok(records)
}

/// Extract the BOF record fields from a record body.
///
/// Returns `(version, substream_type)`.
pub fn parse_bof(data: &[u8]) -> XlsResult<(u16, u16)> {
    let mut offset = 0;
    let version = parser::read_u16(data, &mut offset)
        .map_err(|_| XlsError::Parse("BOF record too short".into()))?;
    let dt = parser::read_u16(data, &mut offset)
        .map_err(|_| XlsError::Parse("BOF record too short".into()))?;
    Ok((version, dt))
}
