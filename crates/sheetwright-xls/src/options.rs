//! Writer options

use crate::biff::BiffVersion;

/// Options for writing XLS files
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Format revision (default: BIFF5). Fixes the record limit, the BOF
    /// version word and the name of the container stream.
    pub version: BiffVersion,
    /// Emit only the BIFF stream, without compound container framing
    pub data_only: bool,
}

impl WriteOptions {
    /// Options for a raw BIFF stream without container framing.
    pub fn data_only() -> Self {
        Self {
            data_only: true,
            ..Default::default()
        }
    }
}
