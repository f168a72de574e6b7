//! Variable-width digest type shared by leaves, nodes and proof siblings.

use std::{fmt, str::FromStr};

use bincode::{Decode, Encode};

use crate::{BinaryMerkleError, Result};

/// Output of a [`MerkleHasher`](crate::MerkleHasher).
///
/// The width is whatever the hasher produces; a single tree requires every
/// node to have the same width. Equality and ordering are byte-wise, which is
/// the ordering used for sorted pairs.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digest {
    bytes: Vec<u8>,
}

impl Digest {
    /// Creates a digest from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Parse a hex string, with or without a `0x` prefix.
    ///
    /// Both cases are accepted. An empty string is rejected since it cannot
    /// be the output of a hash function.
    pub fn from_hex(input: &str) -> Result<Self> {
        let trimmed = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        if trimmed.is_empty() {
            return Err(BinaryMerkleError::InvalidInput(format!(
                "empty digest in {:?}",
                input
            )));
        }
        let bytes = hex::decode(trimmed).map_err(|e| {
            BinaryMerkleError::InvalidInput(format!("malformed hex digest {:?}: {}", input, e))
        })?;
        Ok(Self { bytes })
    }

    /// Lowercase hex with a `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.bytes))
    }

    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the digest and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Width in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for a zero-width digest, which no real hasher produces.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = BinaryMerkleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Digest {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Digest {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes.to_vec())
    }
}
