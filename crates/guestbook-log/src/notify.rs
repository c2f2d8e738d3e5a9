use async_trait::async_trait;
use guestbook_types::DrawingMetadata;

use crate::error::NotifyError;

/// What happened to the submitter's IP when a deletion asked for a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockOutcome {
    NotRequested,
    Blocked { ip: String },
    /// The slot had no recorded IP (a legacy drawing).
    NoKnownIp,
    /// The block list could not be written. The deletion still stands.
    Failed { ip: String },
}

impl BlockOutcome {
    pub fn blocked_ip(&self) -> Option<&str> {
        match self {
            Self::Blocked { ip } => Some(ip),
            _ => None,
        }
    }
}

/// Something a moderator may want to hear about.
#[derive(Clone, Debug)]
pub enum GuestbookEvent {
    DrawingSubmitted {
        index: usize,
        size: usize,
        metadata: DrawingMetadata,
    },
    DrawingDeleted {
        index: usize,
        metadata: DrawingMetadata,
        block: BlockOutcome,
    },
}

impl GuestbookEvent {
    /// One-line human readable description.
    pub fn summary(&self) -> String {
        match self {
            Self::DrawingSubmitted {
                index,
                size,
                metadata,
            } => format!(
                "New guestbook drawing #{index} ({size} bytes) from {}",
                metadata.ip.as_deref().unwrap_or("unknown IP")
            ),
            Self::DrawingDeleted { index, block, .. } => match block {
                BlockOutcome::NotRequested => format!("Guestbook drawing #{index} deleted"),
                BlockOutcome::Blocked { ip } => {
                    format!("Guestbook drawing #{index} deleted and {ip} blocked")
                }
                BlockOutcome::NoKnownIp => format!(
                    "Guestbook drawing #{index} deleted; no IP on record, nothing blocked"
                ),
                BlockOutcome::Failed { ip } => {
                    format!("Guestbook drawing #{index} deleted; blocking {ip} failed")
                }
            },
        }
    }
}

/// Outbound moderation notifications.
///
/// Delivery is best effort. The log calls `notify` after its writes have
/// landed and only logs a returned error.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: &GuestbookEvent) -> Result<(), NotifyError>;
}

pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, _event: &GuestbookEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}
