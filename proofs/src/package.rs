//! Cross-chain packages
//!
//! The `payload` argument of `handlePackage` is a 33 byte header, the package
//! type followed by the big-endian relayer fee, and an RLP encoded body. For
//! the token hub the body is a transfer-out synchronisation package.

use std::fmt;

pub use alloy_primitives::{Address, U256};
use alloy_rlp::{Decodable, Encodable, RlpDecodable, RlpEncodable};
#[cfg(feature = "serde")]
use serde::Serialize;

/// Length of the package header: type byte and 32-byte relayer fee.
pub const PACKAGE_HEADER_LEN: usize = 33;

/// Ways a payload can fail to decode as a transfer package.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    /// The payload does not even hold the header.
    #[error("package payload is {len} bytes, the header takes {needed}")]
    TooShort {
        /// Length of the payload.
        len: usize,
        /// Header length.
        needed: usize,
    },

    /// The body is not a transfer package.
    #[error("package body: {0}")]
    Rlp(alloy_rlp::Error),

    /// Bytes follow the RLP body.
    #[error("{trailing} bytes after the package body")]
    TrailingBytes {
        /// Number of extra bytes.
        trailing: usize,
    },
}

/// Body of a token hub transfer-out synchronisation package, fields in wire
/// order.
#[derive(Clone, Debug, PartialEq, Eq, RlpEncodable, RlpDecodable)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TransferOutPackage {
    /// Token symbol, zero padded.
    #[cfg_attr(feature = "serde", serde(serialize_with = "hex::serde::serialize"))]
    pub token_symbol: [u8; 32],
    /// BEP-20 contract of the token, zero for BNB.
    pub contract_address: Address,
    /// Amount in the token's smallest unit.
    pub amount: U256,
    /// Receiving account.
    pub recipient: Address,
    /// Account refunded if the transfer fails.
    pub refund_address: Address,
    /// Unix time after which the package is void.
    pub expire_time: u64,
}

impl TransferOutPackage {
    /// The token symbol without its zero padding.
    pub fn symbol(&self) -> String {
        let end = self
            .token_symbol
            .iter()
            .rposition(|b| *b != 0)
            .map_or(0, |last| last + 1);
        String::from_utf8_lossy(&self.token_symbol[..end]).into_owned()
    }
}

impl fmt::Display for TransferOutPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (contract {}) to {}, refund {}, expires {}",
            self.amount,
            self.symbol(),
            self.contract_address,
            self.recipient,
            self.refund_address,
            self.expire_time
        )
    }
}

/// Header and body of one package.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CrossChainPackage {
    /// Package type from the header.
    pub package_type: u8,
    /// Fee paid to the relayer.
    pub relay_fee: U256,
    /// Decoded body.
    pub transfer: TransferOutPackage,
}

impl CrossChainPackage {
    /// Decode a `handlePackage` payload. The RLP body must end the payload.
    pub fn decode(payload: &[u8]) -> Result<Self, PackageError> {
        if payload.len() < PACKAGE_HEADER_LEN {
            return Err(PackageError::TooShort {
                len: payload.len(),
                needed: PACKAGE_HEADER_LEN,
            });
        }
        let (header, mut body) = payload.split_at(PACKAGE_HEADER_LEN);
        let transfer = TransferOutPackage::decode(&mut body).map_err(PackageError::Rlp)?;
        if !body.is_empty() {
            return Err(PackageError::TrailingBytes {
                trailing: body.len(),
            });
        }
        Ok(CrossChainPackage {
            package_type: header[0],
            relay_fee: U256::from_be_slice(&header[1..]),
            transfer,
        })
    }

    /// Header followed by the RLP body.
    pub fn encode(&self) -> Vec<u8> {
        let mut payload = Vec::with_capacity(PACKAGE_HEADER_LEN + self.transfer.length());
        payload.push(self.package_type);
        payload.extend_from_slice(&self.relay_fee.to_be_bytes::<32>());
        self.transfer.encode(&mut payload);
        payload
    }
}
