//! Low-level binary parsing helpers.
//!
//! All multi-byte integers in BIFF records and compound-file structures are
//! little-endian.

use crate::error::{XlsError, XlsResult};

/// Read a `u16` (little-endian) from a byte slice at `offset`, advancing `offset`.
#[inline]
pub fn read_u16(data: &[u8], offset: &mut usize) -> XlsResult<u16> {
    let bytes = take::<2>(data, offset)?;
    Ok(u16::from_le_bytes(bytes))
}

/// Read a `u32` (little-endian) from a byte slice at `offset`, advancing `offset`.
#[inline]
pub fn read_u32(data: &[u8], offset: &mut usize) -> XlsResult<u32> {
    let bytes = take::<4>(data, offset)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Read an `f64` (IEEE 754 double, little-endian) from a byte slice.
#[inline]
pub fn read_f64(data: &[u8], offset: &mut usize) -> XlsResult<f64> {
    let bytes = take::<8>(data, offset)?;
    Ok(f64::from_le_bytes(bytes))
}

fn take<const N: usize>(data: &[u8], offset: &mut usize) -> XlsResult<[u8; N]> {
    let end = offset.checked_add(N).filter(|&end| end <= data.len());
    let Some(end) = end else {
        return Err(XlsError::Parse(format!(
            "unexpected end of data at offset {}, need {} bytes",
            *offset, N
        )));
    };
    let mut out = [0u8; N];
    out.copy_from_slice(&data[*offset..end]);
    *offset = end;
    Ok(out)
}
