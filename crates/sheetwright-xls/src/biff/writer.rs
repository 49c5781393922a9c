//! Record stream assembler.
//!
//! [`BiffWriter`] accumulates framed BIFF records into a double-ended byte
//! buffer. Records are appended in business order, except for stream-leading
//! records such as BOF that are prepended once the body that follows them is
//! complete. Any record whose framed length exceeds the revision's record
//! limit is rewritten as a CONTINUE chain before it is stored.

use std::collections::VecDeque;
use std::fmt::Write as _;

use super::byte_order::FloatByteOrder;
use super::records::{
    BiffVersion, SubstreamKind, BOF, BOF_BODY_LEN, BOF_BUILD, BOF_YEAR, CONTINUE, EOF,
    RECORD_HEADER_LEN,
};
use crate::error::XlsResult;

/// Assembles a BIFF record stream in memory.
#[derive(Debug)]
pub struct BiffWriter {
    byte_order: FloatByteOrder,
    version: BiffVersion,
    limit: usize,
    data: VecDeque<u8>,
    data_size: usize,
}

impl BiffWriter {
    /// Create an assembler for the default revision (BIFF5).
    ///
    /// Fails with [`XlsError::UnsupportedFloatFormat`] if the platform's `f64`
    /// layout cannot be used for NUMBER records.
    ///
    /// [`XlsError::UnsupportedFloatFormat`]: crate::XlsError::UnsupportedFloatFormat
    pub fn new() -> XlsResult<Self> {
        Self::with_version(BiffVersion::default())
    }

    /// Create an assembler for a specific format revision.
    pub fn with_version(version: BiffVersion) -> XlsResult<Self> {
        let byte_order = FloatByteOrder::detect()?;
        Ok(Self {
            byte_order,
            version,
            limit: version.record_limit(),
            data: VecDeque::new(),
            data_size: 0,
        })
    }

    pub fn version(&self) -> BiffVersion {
        self.version
    }

    /// Largest framed record stored without CONTINUE splitting.
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn byte_order(&self) -> FloatByteOrder {
        self.byte_order
    }

    /// Total number of bytes stored so far (after splitting).
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn is_empty(&self) -> bool {
        self.data_size == 0
    }

    /// Encode a double as the little-endian bytes numeric records carry.
    pub fn encode_f64(&self, value: f64) -> [u8; 8] {
        self.byte_order.encode_f64(value)
    }

    /// Store an already-framed record at the end of the stream.
    pub fn append(&mut self, data: &[u8]) {
        trace_bytes("append", data);
        if data.len() > self.limit {
            let chained = add_continue(data, self.limit);
            self.data.extend(chained.iter().copied());
            self.data_size += chained.len();
        } else {
            self.data.extend(data.iter().copied());
            self.data_size += data.len();
        }
    }

    /// Store an already-framed record at the front of the stream.
    pub fn prepend(&mut self, data: &[u8]) {
        trace_bytes("prepend", data);
        if data.len() > self.limit {
            let chained = add_continue(data, self.limit);
            self.push_front_bytes(&chained);
        } else {
            self.push_front_bytes(data);
        }
    }

    /// Frame `payload` as record `id` and append it.
    pub fn append_record(&mut self, id: u16, payload: &[u8]) {
        let record = frame_record(id, payload);
        self.append(&record);
    }

    /// Frame `payload` as record `id` and prepend it.
    pub fn prepend_record(&mut self, id: u16, payload: &[u8]) {
        let record = frame_record(id, payload);
        self.prepend(&record);
    }

    /// Prepend a BOF record opening a substream of the given kind.
    pub fn store_bof(&mut self, kind: SubstreamKind) {
        let mut record = Vec::with_capacity(RECORD_HEADER_LEN + BOF_BODY_LEN as usize);
        record.extend_from_slice(&BOF.to_le_bytes());
        record.extend_from_slice(&BOF_BODY_LEN.to_le_bytes());
        record.extend_from_slice(&self.version.version_word().to_le_bytes());
        record.extend_from_slice(&kind.code().to_le_bytes());
        record.extend_from_slice(&BOF_BUILD.to_le_bytes());
        record.extend_from_slice(&BOF_YEAR.to_le_bytes());
        self.prepend(&record);
    }

    /// Append the EOF record closing the current substream.
    pub fn store_eof(&mut self) {
        self.append_record(EOF, &[]);
    }

    /// Copy of the stream assembled so far.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.iter().copied().collect()
    }

    /// Hand the finished stream over, e.g. to [`OleWriter`](crate::ole::OleWriter).
    pub fn into_bytes(self) -> Vec<u8> {
        Vec::from(self.data)
    }

    fn push_front_bytes(&mut self, bytes: &[u8]) {
        self.data.reserve(bytes.len());
        for &b in bytes.iter().rev() {
            self.data.push_front(b);
        }
        self.data_size += bytes.len();
    }
}

/// Frame a record: 2-byte id, 2-byte body length, body.
///
/// Bodies longer than `u16::MAX` get a saturated length field; such records
/// always exceed the record limit and the field is rewritten by [`add_continue`].
pub fn frame_record(id: u16, payload: &[u8]) -> Vec<u8> {
    let len = u16::try_from(payload.len()).unwrap_or(u16::MAX);
    let mut record = Vec::with_capacity(RECORD_HEADER_LEN + payload.len());
    record.extend_from_slice(&id.to_le_bytes());
    record.extend_from_slice(&len.to_le_bytes());
    record.extend_from_slice(payload);
    record
}

/// Rewrite one framed record longer than `limit` as a CONTINUE chain.
///
/// The first `limit` bytes stay in place with the length field patched to
/// `limit - 4`. The rest is cut into `limit`-byte bodies, each behind a
/// CONTINUE header, with a final CONTINUE for the remainder. Records of at
/// most `limit` bytes are returned unchanged.
pub fn add_continue(data: &[u8], limit: usize) -> Vec<u8> {
    if data.len() <= limit {
        return data.to_vec();
    }

    let segments = 1 + (data.len() - limit + limit - 1) / limit;
    let mut out = Vec::with_capacity(data.len() + segments * RECORD_HEADER_LEN);

    let (head, mut rest) = data.split_at(limit);
    out.extend_from_slice(&head[..2]);
    out.extend_from_slice(&((limit - RECORD_HEADER_LEN) as u16).to_le_bytes());
    out.extend_from_slice(&head[RECORD_HEADER_LEN..]);

    while rest.len() > limit {
        let (chunk, tail) = rest.split_at(limit);
        push_continue(&mut out, chunk);
        rest = tail;
    }
    push_continue(&mut out, rest);

    log::debug!(
        "split {}-byte record 0x{:04X} into {} segments",
        data.len(),
        u16::from_le_bytes([data[0], data[1]]),
        segments
    );
    out
}

fn push_continue(out: &mut Vec<u8>, chunk: &[u8]) {
    out.extend_from_slice(&CONTINUE.to_le_bytes());
    out.extend_from_slice(&(chunk.len() as u16).to_le_bytes());
    out.extend_from_slice(chunk);
}

fn trace_bytes(op: &str, data: &[u8]) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    let mut dump = String::with_capacity(data.len() * 3 + data.len() / 16 + 1);
    for (i, b) in data.iter().enumerate() {
        if i % 16 == 0 {
            dump.push('\n');
        }
        let _ = write!(dump, "{b:02X} ");
    }
    log::trace!("BiffWriter::{op}() called:{dump}");
}
