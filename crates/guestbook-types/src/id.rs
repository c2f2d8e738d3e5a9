use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to a drawing when it is submitted.
///
/// New identifiers are UUID v7: a millisecond timestamp prefix followed by
/// random bits, so they sort by submission time. Identifiers read back from
/// storage are kept verbatim, whatever shape older writers gave them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingId(String);

impl DrawingId {
    /// Generate a fresh time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DrawingId({})", self.0)
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DrawingId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DrawingId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
