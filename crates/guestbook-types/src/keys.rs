use std::fmt;

/// The fixed objects the guestbook persists in its blob backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKey {
    /// Delimiter-separated concatenation of every drawing.
    Drawings,
    /// JSON array of [`crate::DrawingMetadata`], aligned with the drawings.
    Metadata,
    /// JSON array of blocked submitter IPs.
    BlockedIps,
}

impl ObjectKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drawings => "drawings.bin",
            Self::Metadata => "drawing-metadata.json",
            Self::BlockedIps => "blocked-ips.json",
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
