//! # sheetwright-xls
//!
//! Writer for the legacy Excel binary format (.xls).
//!
//! Two engines do the work:
//! - [`BiffWriter`] assembles framed BIFF records into one byte stream,
//!   splitting oversized records into CONTINUE chains.
//! - [`OleWriter`] wraps that stream in an OLE2 compound container: header,
//!   padded data sectors, directory and big block depot.
//!
//! [`XlsWriter`] composes both.
//!
//! ## Example
//!
//! ```rust
//! use sheetwright_xls::{BiffWriter, SubstreamKind, WriteOptions, XlsWriter};
//!
//! let mut biff = BiffWriter::new()?;
//! biff.append_record(0x0022, &[0x00, 0x00]); // DATEMODE
//! biff.store_bof(SubstreamKind::WorkbookGlobals);
//! biff.store_eof();
//!
//! let bytes = XlsWriter::write(biff, Vec::new(), &WriteOptions::default())?;
//! assert_eq!(&bytes[..4], &[0xD0, 0xCF, 0x11, 0xE0]);
//! # Ok::<(), sheetwright_xls::XlsError>(())
//! ```

pub mod biff;
pub mod error;
pub mod ole;
pub mod options;
pub mod writer;

pub use biff::{BiffVersion, BiffWriter, FloatByteOrder, SubstreamKind};
pub use error::{XlsError, XlsResult};
pub use ole::{ContainerLayout, OleWriter, SectorSlot};
pub use options::WriteOptions;
pub use writer::XlsWriter;
