//! Cursor over proof bytes

use integer_encoding::VarInt;

use crate::{error::Error, MAX_VARINT_LEN};

/// Reads var-ints and length-prefixed fields from a borrowed buffer.
///
/// Every successful read advances the offset by exactly the number of bytes
/// it consumed. A failed read leaves the offset where it was. There is no way
/// to rewind; callers that need lookahead read from a clone of the cursor or
/// remember [`ByteCursor::offset`].
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `bytes`.
    pub const fn new(bytes: &'a [u8]) -> Self {
        ByteCursor { bytes, offset: 0 }
    }

    /// Current read offset.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Whether every byte has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// The unread part of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }

    /// Read an unsigned LEB128 var-int.
    pub fn read_var_u64(&mut self) -> Result<u64, Error> {
        let rest = self.rest();
        match u64::decode_var(rest) {
            Some((value, len)) => {
                self.offset += len;
                Ok(value)
            }
            // A var-int cut short by the end of the buffer is all continuation
            // bytes; anything else ran over the ten byte limit.
            None if rest.len() < MAX_VARINT_LEN && rest.iter().all(|b| b & 0x80 != 0) => {
                Err(Error::Truncated {
                    offset: self.offset,
                    needed: rest.len() + 1,
                    remaining: rest.len(),
                })
            }
            None => Err(Error::MalformedVarInt {
                offset: self.offset,
            }),
        }
    }

    /// Read a var-int as a two's complement `i64` (protobuf `int64`).
    pub fn read_var_i64(&mut self) -> Result<i64, Error> {
        Ok(self.read_var_u64()? as i64)
    }

    /// Read a var-int as a two's complement `i32` (protobuf `int32`).
    pub fn read_var_i32(&mut self) -> Result<i32, Error> {
        let start = self.offset;
        let value = self.read_var_i64()?;
        i32::try_from(value).map_err(|_| {
            self.offset = start;
            Error::OutOfRange {
                offset: start,
                value: value as i128,
                target: "i32",
            }
        })
    }

    /// Read exactly `n` bytes.
    pub fn read_fixed_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(Error::Truncated {
                offset: self.offset,
                needed: n,
                remaining,
            });
        }
        let bytes = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    /// Read a var-int length followed by that many bytes.
    pub fn read_length_prefixed(&mut self) -> Result<&'a [u8], Error> {
        let start = self.offset;
        let length = self.read_var_u64()?;
        let result = usize::try_from(length)
            .map_err(|_| Error::LengthOverflow {
                offset: start,
                length,
            })
            .and_then(|length| self.read_fixed_bytes(length));
        if result.is_err() {
            self.offset = start;
        }
        result
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_length_prefixed_str(&mut self) -> Result<&'a str, Error> {
        let start = self.offset;
        let bytes = self.read_length_prefixed()?;
        std::str::from_utf8(bytes).map_err(|_| {
            let offset = self.offset - bytes.len();
            self.offset = start;
            Error::InvalidUtf8 { offset }
        })
    }

    /// Read an element count, rejecting counts that the remaining bytes
    /// cannot hold when every element takes at least `min_entry_len` bytes.
    ///
    /// Callers allocate and loop on the returned count, so this is the only
    /// place a declared count is trusted.
    pub fn read_count(&mut self, min_entry_len: usize) -> Result<usize, Error> {
        debug_assert!(min_entry_len > 0);
        let start = self.offset;
        let count = self.read_var_u64()?;
        let remaining = self.remaining();
        let capacity = (remaining / min_entry_len.max(1)) as u64;
        if count > capacity {
            self.offset = start;
            return Err(Error::CountExceedsInput {
                offset: start,
                count,
                remaining,
            });
        }
        Ok(count as usize)
    }

    /// Consume the cursor, failing if any input is left.
    pub fn finish(self) -> Result<(), Error> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(Error::TrailingBytes {
                offset: self.offset,
                trailing: self.remaining(),
            })
        }
    }
}
