//! BIFF record identifiers and format-revision constants.
//!
//! Reference: [MS-XLS] §2.3 (record enumeration) and the BIFF5 "Excel 5"
//! file format notes.

// ── Stream structure ────────────────────────────────────────────────────
pub const BOF: u16 = 0x0809;
pub const EOF: u16 = 0x000A;
pub const CONTINUE: u16 = 0x003C;

/// Size of a record header: 2 bytes id + 2 bytes body length.
pub const RECORD_HEADER_LEN: usize = 4;

/// Body length of a BOF record as written by [`BiffWriter::store_bof`].
///
/// [`BiffWriter::store_bof`]: super::BiffWriter::store_bof
pub const BOF_BODY_LEN: u16 = 0x0008;

// BOF build and year stamps. The SDK says both should be zero, but Excel 5
// warns on such files, so these values are kept for reader compatibility only.
pub const BOF_BUILD: u16 = 0x096C;
pub const BOF_YEAR: u16 = 0x07C9;

// ── BOF version words ───────────────────────────────────────────────────
pub const BIFF5_VERSION: u16 = 0x0500;
pub const BIFF8_VERSION: u16 = 0x0600;

// ── Maximum framed record size (header + body) before CONTINUE splitting ─
pub const BIFF5_RECORD_LIMIT: usize = 2080;
pub const BIFF8_RECORD_LIMIT: usize = 8224;

/// Substream kind carried in the BOF `dt` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum SubstreamKind {
    WorkbookGlobals = 0x0005,
    VisualBasicModule = 0x0006,
    Worksheet = 0x0010,
    Chart = 0x0020,
    MacroSheet = 0x0040,
    Workspace = 0x0100,
}

impl SubstreamKind {
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Target format revision.
///
/// The record limit, BOF version word and container stream name are tied to
/// the revision and always change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiffVersion {
    /// Excel 5/95
    #[default]
    Biff5,
    /// Excel 97-2003
    Biff8,
}

impl BiffVersion {
    /// Version word written into BOF records.
    pub fn version_word(self) -> u16 {
        match self {
            BiffVersion::Biff5 => BIFF5_VERSION,
            BiffVersion::Biff8 => BIFF8_VERSION,
        }
    }

    /// Largest framed record (header included) that is written without CONTINUE records.
    pub fn record_limit(self) -> usize {
        match self {
            BiffVersion::Biff5 => BIFF5_RECORD_LIMIT,
            BiffVersion::Biff8 => BIFF8_RECORD_LIMIT,
        }
    }

    /// Name of the compound-document stream that holds the workbook.
    pub fn stream_name(self) -> &'static str {
        match self {
            BiffVersion::Biff5 => "Book",
            BiffVersion::Biff8 => "Workbook",
        }
    }
}
