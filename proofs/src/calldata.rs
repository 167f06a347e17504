//! Call data of `handlePackage(bytes,bytes,uint64,uint64,uint8)`
//!
//! After the four byte selector comes the ABI head of five 32-byte words. The
//! two `bytes` arguments are offsets, relative to the start of the head, of a
//! length word followed by the data padded to a multiple of 32 bytes.

use byteorder::{BigEndian, ByteOrder};

use crate::package::{CrossChainPackage, PackageError};

/// First four bytes of `keccak256("handlePackage(bytes,bytes,uint64,uint64,uint8)")`.
pub const HANDLE_PACKAGE_SELECTOR: [u8; 4] = [0x84, 0x01, 0x3b, 0x6a];

const SELECTOR_LEN: usize = 4;
const WORD_LEN: usize = 32;
const HEAD_WORDS: usize = 5;

/// Minimum call data length: selector and head.
pub const MIN_CALL_DATA_LEN: usize = SELECTOR_LEN + HEAD_WORDS * WORD_LEN;

/// Names of the head words, in order.
const ARGUMENTS: [&str; HEAD_WORDS] = [
    "payload",
    "proof",
    "height",
    "packageSequence",
    "channelId",
];

/// Ways call data can fail to yield a proof.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// Shorter than the selector plus the ABI head.
    #[error("call data is {len} bytes, at least {needed} are required")]
    TooShort {
        /// Length of the call data.
        len: usize,
        /// Minimum length.
        needed: usize,
    },

    /// The selector is not the configured one.
    #[error("unexpected selector {}, expected {}", hex::encode(found), hex::encode(expected))]
    SelectorMismatch {
        /// Selector found in the call data.
        found: [u8; 4],
        /// Selector that was configured.
        expected: [u8; 4],
    },

    /// A `bytes` offset points outside the arguments.
    #[error("{argument} offset {offset} lies outside the {available} argument bytes")]
    OffsetOutOfBounds {
        /// Argument name.
        argument: &'static str,
        /// Declared offset.
        offset: u64,
        /// Bytes after the selector.
        available: usize,
    },

    /// A `bytes` length runs past the end of the arguments.
    #[error("{argument} length {length} runs past the {available} bytes after its length word")]
    LengthOutOfBounds {
        /// Argument name.
        argument: &'static str,
        /// Declared length.
        length: u64,
        /// Bytes after the length word.
        available: usize,
    },

    /// An integer word has bits set above its declared width.
    #[error("{argument} word does not fit in {bits} bits")]
    DirtyInteger {
        /// Argument name.
        argument: &'static str,
        /// Declared width of the argument.
        bits: u32,
    },
}

/// Arguments of one `handlePackage` call, borrowing from the call data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandlePackageCall<'a> {
    /// Method selector.
    pub selector: [u8; 4],
    /// Cross-chain package.
    pub payload: &'a [u8],
    /// Merkle proof of the package.
    pub proof: &'a [u8],
    /// Height the proof was taken at.
    pub height: u64,
    /// Sequence number of the package.
    pub package_sequence: u64,
    /// Channel the package was sent on.
    pub channel_id: u8,
}

impl HandlePackageCall<'_> {
    /// Decode the package carried in the payload argument.
    pub fn package(&self) -> Result<CrossChainPackage, PackageError> {
        CrossChainPackage::decode(self.payload)
    }
}

/// Pulls the proof argument out of `handlePackage` call data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallDataExtractor {
    expected_selector: Option<[u8; 4]>,
}

impl CallDataExtractor {
    /// An extractor that accepts any selector.
    pub const fn new() -> Self {
        CallDataExtractor {
            expected_selector: None,
        }
    }

    /// Reject call data whose selector is not `selector`.
    pub const fn expecting_selector(selector: [u8; 4]) -> Self {
        CallDataExtractor {
            expected_selector: Some(selector),
        }
    }

    /// The selector this extractor insists on, if any.
    pub const fn expected_selector(&self) -> Option<[u8; 4]> {
        self.expected_selector
    }

    /// Decode every argument of the call.
    pub fn extract<'a>(&self, call_data: &'a [u8]) -> Result<HandlePackageCall<'a>, ExtractionError> {
        if call_data.len() < MIN_CALL_DATA_LEN {
            return Err(ExtractionError::TooShort {
                len: call_data.len(),
                needed: MIN_CALL_DATA_LEN,
            });
        }
        let (selector, args) = call_data.split_at(SELECTOR_LEN);
        let mut found = [0; SELECTOR_LEN];
        found.copy_from_slice(selector);
        if let Some(expected) = self.expected_selector {
            if found != expected {
                return Err(ExtractionError::SelectorMismatch { found, expected });
            }
        }

        Ok(HandlePackageCall {
            selector: found,
            payload: dynamic_bytes(args, 0)?,
            proof: dynamic_bytes(args, 1)?,
            height: uint(args, 2, 64)?,
            package_sequence: uint(args, 3, 64)?,
            channel_id: uint(args, 4, 8)? as u8,
        })
    }

    /// Only the proof argument.
    pub fn extract_proof<'a>(&self, call_data: &'a [u8]) -> Result<&'a [u8], ExtractionError> {
        Ok(self.extract(call_data)?.proof)
    }
}

fn head_word(args: &[u8], index: usize) -> &[u8] {
    &args[index * WORD_LEN..(index + 1) * WORD_LEN]
}

/// Read a big-endian word as an unsigned integer of `bits` bits.
fn word_to_uint(word: &[u8], bits: u32) -> Option<u64> {
    let value_len = bits as usize / 8;
    let (high, low) = word.split_at(WORD_LEN - value_len);
    if high.iter().any(|b| *b != 0) {
        return None;
    }
    Some(BigEndian::read_uint(low, value_len))
}

fn uint(args: &[u8], index: usize, bits: u32) -> Result<u64, ExtractionError> {
    word_to_uint(head_word(args, index), bits).ok_or(ExtractionError::DirtyInteger {
        argument: ARGUMENTS[index],
        bits,
    })
}

fn dynamic_bytes(args: &[u8], index: usize) -> Result<&[u8], ExtractionError> {
    let argument = ARGUMENTS[index];
    let offset_out_of_bounds = |offset| ExtractionError::OffsetOutOfBounds {
        argument,
        offset,
        available: args.len(),
    };

    let offset = word_to_uint(head_word(args, index), 64).ok_or(offset_out_of_bounds(u64::MAX))?;
    let start = usize::try_from(offset)
        .ok()
        .filter(|start| start.checked_add(WORD_LEN).is_some_and(|end| end <= args.len()))
        .ok_or(offset_out_of_bounds(offset))?;

    let length_word = &args[start..start + WORD_LEN];
    let data = &args[start + WORD_LEN..];
    let length_out_of_bounds = |length| ExtractionError::LengthOutOfBounds {
        argument,
        length,
        available: data.len(),
    };
    let length = word_to_uint(length_word, 64).ok_or(length_out_of_bounds(u64::MAX))?;
    usize::try_from(length)
        .ok()
        .filter(|length| *length <= data.len())
        .map(|length| &data[..length])
        .ok_or(length_out_of_bounds(length))
}

fn padded_len(len: usize) -> usize {
    len.div_ceil(WORD_LEN) * WORD_LEN
}

fn uint_word(value: u64) -> [u8; WORD_LEN] {
    let mut word = [0; WORD_LEN];
    BigEndian::write_u64(&mut word[WORD_LEN - 8..], value);
    word
}

/// Build `handlePackage` call data with canonical ABI layout.
pub fn encode_handle_package(
    payload: &[u8],
    proof: &[u8],
    height: u64,
    package_sequence: u64,
    channel_id: u8,
) -> Vec<u8> {
    let payload_offset = HEAD_WORDS * WORD_LEN;
    let proof_offset = payload_offset + WORD_LEN + padded_len(payload.len());
    let mut call_data = Vec::with_capacity(
        MIN_CALL_DATA_LEN + 2 * WORD_LEN + padded_len(payload.len()) + padded_len(proof.len()),
    );

    call_data.extend_from_slice(&HANDLE_PACKAGE_SELECTOR);
    call_data.extend_from_slice(&uint_word(payload_offset as u64));
    call_data.extend_from_slice(&uint_word(proof_offset as u64));
    call_data.extend_from_slice(&uint_word(height));
    call_data.extend_from_slice(&uint_word(package_sequence));
    call_data.extend_from_slice(&uint_word(channel_id as u64));
    for bytes in [payload, proof] {
        call_data.extend_from_slice(&uint_word(bytes.len() as u64));
        call_data.extend_from_slice(bytes);
        call_data.resize(call_data.len() + padded_len(bytes.len()) - bytes.len(), 0);
    }
    call_data
}
