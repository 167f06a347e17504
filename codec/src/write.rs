//! Writers for the framing read by [`crate::ByteCursor`].

use std::io::{self, Write};

use integer_encoding::{VarInt, VarIntWriter};

/// Write `value` as an unsigned LEB128 var-int.
pub fn write_var_u64<W: Write>(dest: &mut W, value: u64) -> io::Result<()> {
    dest.write_varint(value)?;
    Ok(())
}

/// Write a var-int length followed by `bytes`.
pub fn write_length_prefixed<W: Write>(dest: &mut W, bytes: &[u8]) -> io::Result<()> {
    write_var_u64(dest, bytes.len() as u64)?;
    dest.write_all(bytes)
}

/// Encoded size of `value` as a var-int.
pub fn var_u64_len(value: u64) -> usize {
    value.required_space()
}

/// Encoded size of `bytes` with its length prefix.
pub fn length_prefixed_len(bytes: &[u8]) -> usize {
    var_u64_len(bytes.len() as u64) + bytes.len()
}
