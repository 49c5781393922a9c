//! Floating point capability probe.
//!
//! Every NUMBER-style record stores IEEE 754 doubles in little-endian order.
//! The probe encodes a known constant with the platform's native `f64`
//! representation and compares it against the reference bytes in both byte
//! orders. The resulting [`FloatByteOrder`] is the token numeric encoders need.

use crate::error::{XlsError, XlsResult};

/// Probe value; any constant with distinct bytes works.
const PROBE_VALUE: f64 = 1.2345;

/// `1.2345` as a little-endian IEEE 754 double.
const PROBE_LE: [u8; 8] = [0x8D, 0x97, 0x6E, 0x12, 0x83, 0xC0, 0xF3, 0x3F];

/// Native byte order of `f64` on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatByteOrder {
    Little,
    Big,
}

impl FloatByteOrder {
    /// Run the probe against the platform's native `f64` encoding.
    pub fn detect() -> XlsResult<Self> {
        Self::classify(PROBE_VALUE.to_ne_bytes())
    }

    /// Classify the native encoding of `1.2345`.
    pub(crate) fn classify(native: [u8; 8]) -> XlsResult<Self> {
        let mut reversed = native;
        reversed.reverse();

        if native == PROBE_LE {
            Ok(FloatByteOrder::Little)
        } else if reversed == PROBE_LE {
            Ok(FloatByteOrder::Big)
        } else {
            Err(XlsError::UnsupportedFloatFormat)
        }
    }

    /// Encode `value` as the little-endian bytes BIFF expects.
    pub fn encode_f64(self, value: f64) -> [u8; 8] {
        let mut bytes = value.to_ne_bytes();
        if self == FloatByteOrder::Big {
            bytes.reverse();
        }
        bytes
    }
}
