use std::fmt;

use bytes::Bytes;

/// Reserved byte value separating drawings inside the log blob.
pub const DELIMITER: u8 = 0xFF;

/// A single drawing as submitted by a client.
///
/// The payload is produced by the browser's canvas encoder and is opaque to
/// the store. Boundaries inside the log are delimiter-defined, so a drawing
/// that contains [`DELIMITER`] cannot be read back intact.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Drawing(Bytes);

impl Drawing {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self(data.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Drawing({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for Drawing {
    fn from(data: Vec<u8>) -> Self {
        Self(Bytes::from(data))
    }
}

impl From<&[u8]> for Drawing {
    fn from(data: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(data))
    }
}

impl From<Bytes> for Drawing {
    fn from(data: Bytes) -> Self {
        Self(data)
    }
}

impl AsRef<[u8]> for Drawing {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
