//! Immutable byte buffer with canonical conversions.
//!
//! Every cryptographic operation in Cachet consumes a [`ByteBuf`]. Two
//! buffers are equal iff their byte sequences are equal, regardless of the
//! representation they were built from (text, hex, structured value).
//! Slicing and concatenation produce new instances; nothing is mutated in
//! place.

use bytes::Bytes;
use rand::RngCore;
use serde_json::Value;
use std::fmt;

use crate::canonical;
use crate::error::CoreError;

/// An immutable, cheaply cloneable byte sequence.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteBuf(Bytes);

impl ByteBuf {
    /// The empty buffer.
    pub fn new() -> Self {
        Self(Bytes::new())
    }

    /// Copy raw bytes into a new buffer.
    pub fn from_slice(data: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(data))
    }

    /// UTF-8 bytes of a text string.
    pub fn from_text(text: &str) -> Self {
        Self(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Decode a hex string (an optional `0x` prefix is accepted).
    pub fn from_hex(input: &str) -> Result<Self, CoreError> {
        let raw = input.strip_prefix("0x").unwrap_or(input);
        Ok(Self(Bytes::from(hex::decode(raw)?)))
    }

    /// Canonical JSON bytes of a structured value.
    ///
    /// The same logical value always produces the same buffer; see
    /// [`canonical`] for the key-ordering contract.
    pub fn from_value(value: &Value) -> Self {
        Self(Bytes::from(canonical::to_bytes(value)))
    }

    /// Draw `size` cryptographically random bytes.
    pub fn random(size: usize) -> Self {
        let mut data = vec![0u8; size];
        rand::rngs::OsRng.fill_bytes(&mut data);
        Self(Bytes::from(data))
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A new buffer over `[start, end)` of this one.
    ///
    /// Bounds are clamped to the buffer; an inverted range yields the
    /// empty buffer.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.0.len());
        let start = start.min(end);
        Self(self.0.slice(start..end))
    }

    /// A new buffer over `[start, len)` of this one, clamped like
    /// [`slice`](Self::slice).
    pub fn slice_from(&self, start: usize) -> Self {
        let start = start.min(self.0.len());
        Self(self.0.slice(start..))
    }

    /// Concatenate buffers into a new one.
    pub fn concat(items: &[ByteBuf]) -> Self {
        let total: usize = items.iter().map(|b| b.len()).sum();
        let mut out = Vec::with_capacity(total);
        for item in items {
            out.extend_from_slice(item.as_slice());
        }
        Self(Bytes::from(out))
    }

    /// Lowercase hex rendering, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// View the underlying bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Interpret the bytes as UTF-8 text.
    pub fn to_utf8(&self) -> Result<String, CoreError> {
        String::from_utf8(self.0.to_vec()).map_err(|_| CoreError::InvalidUtf8)
    }
}

impl fmt::Debug for ByteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = if self.len() > 8 {
            format!("{}..", hex::encode(&self.0[..8]))
        } else {
            self.to_hex()
        };
        write!(f, "ByteBuf({} bytes, {})", self.len(), preview)
    }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(data: &[u8]) -> Self {
        Self::from_slice(data)
    }
}

impl From<&str> for ByteBuf {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<&Value> for ByteBuf {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}
