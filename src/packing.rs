//! Primitive packing and unpacking of wire fields.
//!
//! Multi-byte integers are little endian. Bits inside a byte are numbered
//! 0 (least significant) to 7 (most significant).
//!
//! The `pack_*` functions write into a buffer the caller has already sized
//! for the whole structure, so an out of range offset is a programming error
//! and panics like any slice index would. The `unpack_*` functions validate
//! the buffer first and report [DecodeError::TooShort] instead.

use crate::errors::DecodeError;

/// Fails with [DecodeError::TooShort] if `data` holds fewer than `required` bytes.
///
/// Decoders call this once up front, before reading any field.
pub fn check_len(data: &[u8], required: usize) -> Result<(), DecodeError> {
    if data.len() < required {
        return Err(DecodeError::too_short(data.len(), required));
    }
    Ok(())
}

/// Writes `v` at `offset`
pub fn pack_u8(v: u8, buf: &mut [u8], offset: usize) {
    buf[offset] = v;
}

/// Writes `v` little endian at `offset..offset + 2`
pub fn pack_u16_le(v: u16, buf: &mut [u8], offset: usize) {
    buf[offset..offset + 2].copy_from_slice(&v.to_le_bytes());
}

/// Writes `v` little endian at `offset..offset + 4`
pub fn pack_u32_le(v: u32, buf: &mut [u8], offset: usize) {
    buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
}

/// Copies `src` into `buf` starting at `offset`
pub fn pack_bytes(src: &[u8], buf: &mut [u8], offset: usize) {
    buf[offset..offset + src.len()].copy_from_slice(src);
}

/// Reads the byte at `offset`
pub fn unpack_u8(data: &[u8], offset: usize) -> Result<u8, DecodeError> {
    check_len(data, offset + 1)?;
    Ok(data[offset])
}

/// Reads a little endian u16 at `offset`
pub fn unpack_u16_le(data: &[u8], offset: usize) -> Result<u16, DecodeError> {
    let b = unpack_bytes(data, offset, 2)?;
    Ok(u16::from_le_bytes([b[0], b[1]]))
}

/// Reads a little endian u32 at `offset`
pub fn unpack_u32_le(data: &[u8], offset: usize) -> Result<u32, DecodeError> {
    let b = unpack_bytes(data, offset, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

/// Borrows `len` bytes starting at `offset`
pub fn unpack_bytes(data: &[u8], offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    check_len(data, offset + len)?;
    Ok(&data[offset..offset + len])
}

/// Returns true if bit `bit` (0..=7) of `byte` is set
pub const fn is_bit_set(byte: u8, bit: u8) -> bool {
    assert!(bit < 8, "bit index out of range");
    byte & (1 << bit) != 0
}

/// Returns `byte` with bit `bit` set
pub const fn set_bit(byte: u8, bit: u8) -> u8 {
    assert!(bit < 8, "bit index out of range");
    byte | (1 << bit)
}

/// Returns `byte` with bit `bit` cleared
pub const fn clear_bit(byte: u8, bit: u8) -> u8 {
    assert!(bit < 8, "bit index out of range");
    byte & !(1 << bit)
}

/// Returns `byte` with bit `bit` set when `on` is true and cleared otherwise
pub const fn with_bit(byte: u8, bit: u8, on: bool) -> u8 {
    if on {
        set_bit(byte, bit)
    } else {
        clear_bit(byte, bit)
    }
}
