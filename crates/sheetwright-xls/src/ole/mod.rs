//! OLE2 compound document container.
//!
//! Only the single-level layout is produced: one stream in big blocks
//! starting at sector 0, one directory sector, and up to 109 big block depot
//! sectors addressed directly from the header.
//!
//! ```text
//! | header | data sectors (padded) | directory | depot sectors |
//! ```

pub mod depot;
pub mod directory;
pub mod header;
pub mod layout;
pub mod writer;

pub use directory::{DirectoryEntry, EntryType};
pub use layout::{ContainerLayout, SectorSlot, MAX_PAYLOAD_SIZE};
pub use writer::OleWriter;
