//! Framing primitives shared by the proof decoders.
//!
//! Everything that reads proof bytes goes through [`ByteCursor`], which never
//! reads past the end of its buffer and reports the byte offset of every
//! failure. The writing helpers produce the same var-int and length-prefixed
//! framing the cursor consumes.

#![warn(missing_docs)]

mod cursor;

/// Error types for cursor reads.
pub mod error;

mod write;

pub use cursor::ByteCursor;
pub use error::Error;
pub use write::{length_prefixed_len, var_u64_len, write_length_prefixed, write_var_u64};

/// Longest var-int encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;
