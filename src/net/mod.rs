//! The logical peer protocol.
//!
//! Only message shapes and queue plumbing live here; byte-level framing is
//! the transport's problem. A background reader task pulls messages off
//! the peer connection and fans them into three queues (incoming actions,
//! timer syncs, everything else) that the control loop drains
//! non-blockingly each tick. Network failures halt the match: they are
//! surfaced once through the misc queue and the reader stops. There is no
//! retry or reconnection.

pub mod link;
pub mod messages;

pub use link::{MessageReceiver, MessageSender, PeerEvent, PeerLink};
pub use messages::{GameOverReason, TimerDirective, TimerUpdate, WireMessage};

use std::error::Error;
use std::fmt;

/// A network failure: the underlying cause plus a human-readable reason.
#[derive(Debug)]
pub struct NetError {
    pub reason: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl NetError {
    pub fn new(reason: impl Into<String>) -> Self {
        NetError {
            reason: reason.into(),
            source: None,
        }
    }

    pub fn with_source(
        reason: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        NetError {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network failure: {}", self.reason)
    }
}

impl Error for NetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}
