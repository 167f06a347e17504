/// Errors that can occur while reading framed bytes.
///
/// Every variant carries the offset, relative to the start of the cursor's
/// buffer, at which the failing read began.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A read needed more bytes than the buffer holds.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Offset of the short read
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes that were left
        remaining: usize,
    },

    /// A var-int did not terminate within ten bytes.
    #[error("malformed varint at offset {offset}")]
    MalformedVarInt {
        /// Offset of the first var-int byte
        offset: usize,
    },

    /// A declared length does not fit in memory.
    #[error("declared length {length} at offset {offset} does not fit in memory")]
    LengthOverflow {
        /// Offset of the length prefix
        offset: usize,
        /// The declared length
        length: u64,
    },

    /// An element count cannot possibly be backed by the remaining bytes.
    #[error("count {count} at offset {offset} exceeds the {remaining} remaining bytes")]
    CountExceedsInput {
        /// Offset of the count
        offset: usize,
        /// The declared count
        count: u64,
        /// Bytes left after the count
        remaining: usize,
    },

    /// An integer does not fit the type it is decoded into.
    #[error("value {value} at offset {offset} is out of range for {target}")]
    OutOfRange {
        /// Offset of the integer
        offset: usize,
        /// The decoded value
        value: i128,
        /// Name of the target type
        target: &'static str,
    },

    /// A length-prefixed string is not valid UTF-8.
    #[error("invalid utf-8 string at offset {offset}")]
    InvalidUtf8 {
        /// Offset of the string bytes
        offset: usize,
    },

    /// Input was left over after a complete structure.
    #[error("{trailing} trailing bytes at offset {offset}")]
    TrailingBytes {
        /// Offset of the first unread byte
        offset: usize,
        /// Number of unread bytes
        trailing: usize,
    },
}

impl Error {
    /// Offset at which the failing read began.
    pub fn offset(&self) -> usize {
        match self {
            Error::Truncated { offset, .. }
            | Error::MalformedVarInt { offset }
            | Error::LengthOverflow { offset, .. }
            | Error::CountExceedsInput { offset, .. }
            | Error::OutOfRange { offset, .. }
            | Error::InvalidUtf8 { offset }
            | Error::TrailingBytes { offset, .. } => *offset,
        }
    }

    /// Whether the input ended before the data it declares.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            Error::Truncated { .. } | Error::CountExceedsInput { .. }
        )
    }

    /// The same error with its offset moved by `base`, for errors raised by a
    /// cursor over a sub-slice that starts at `base` in an outer buffer.
    pub fn with_base_offset(self, base: usize) -> Self {
        match self {
            Error::Truncated {
                offset,
                needed,
                remaining,
            } => Error::Truncated {
                offset: offset + base,
                needed,
                remaining,
            },
            Error::MalformedVarInt { offset } => Error::MalformedVarInt {
                offset: offset + base,
            },
            Error::LengthOverflow { offset, length } => Error::LengthOverflow {
                offset: offset + base,
                length,
            },
            Error::CountExceedsInput {
                offset,
                count,
                remaining,
            } => Error::CountExceedsInput {
                offset: offset + base,
                count,
                remaining,
            },
            Error::OutOfRange {
                offset,
                value,
                target,
            } => Error::OutOfRange {
                offset: offset + base,
                value,
                target,
            },
            Error::InvalidUtf8 { offset } => Error::InvalidUtf8 {
                offset: offset + base,
            },
            Error::TrailingBytes { offset, trailing } => Error::TrailingBytes {
                offset: offset + base,
                trailing,
            },
        }
    }
}
