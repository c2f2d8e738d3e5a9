use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::id::DrawingId;

/// Moderation record stored for one drawing, at the same ordinal position.
///
/// Drawings submitted before metadata tracking existed get a blank entry
/// with every field absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingMetadata {
    #[serde(default)]
    pub id: Option<DrawingId>,
    /// Submitter IP as resolved at the edge.
    #[serde(default)]
    pub ip: Option<String>,
    /// Milliseconds since the UNIX epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl DrawingMetadata {
    /// A placeholder for a drawing with no known provenance.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Fresh metadata for a drawing submitted now.
    pub fn record(submitter: &Submitter) -> Self {
        Self::record_at(submitter, Utc::now())
    }

    pub fn record_at(submitter: &Submitter, at: DateTime<Utc>) -> Self {
        Self {
            id: Some(DrawingId::generate()),
            ip: submitter.ip.clone(),
            timestamp: Some(at.timestamp_millis()),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.id.is_none() && self.ip.is_none() && self.timestamp.is_none()
    }

    /// Submission time, if recorded and representable.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

/// The party behind a request, as far as the edge could resolve it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submitter {
    pub ip: Option<String>,
}

impl Submitter {
    pub fn from_ip(ip: impl Into<String>) -> Self {
        Self { ip: Some(ip.into()) }
    }

    pub fn unknown() -> Self {
        Self { ip: None }
    }
}
