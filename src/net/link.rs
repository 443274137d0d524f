use std::future::Future;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::net::messages::{TimerUpdate, WireMessage};
use crate::net::NetError;
use crate::side::Action;

/// The receiving half of a peer connection. `Ok(None)` means the peer
/// closed the connection cleanly.
pub trait MessageReceiver: Send + 'static {
    fn recv(&mut self)
        -> impl Future<Output = Result<Option<WireMessage>, NetError>> + Send;
}

/// The sending half of a peer connection.
pub trait MessageSender: Send + 'static {
    fn send(
        &mut self,
        message: WireMessage,
    ) -> impl Future<Output = Result<(), NetError>> + Send;
}

/// What the misc queue yields: a message the reader could not classify
/// further, or the single fault that ended the connection.
#[derive(Debug)]
pub enum PeerEvent {
    Message(WireMessage),
    Fault(NetError),
}

/// Fan-out of the peer connection. A background task reads continuously
/// and routes into three queues; the control loop polls them between UI
/// ticks, and the host parks on `next_action` while waiting for the peer's
/// submission.
pub struct PeerLink {
    actions: mpsc::UnboundedReceiver<Action>,
    timer_updates: mpsc::UnboundedReceiver<TimerUpdate>,
    misc: mpsc::UnboundedReceiver<PeerEvent>,
    reader: JoinHandle<()>,
}

impl PeerLink {
    pub fn spawn<R: MessageReceiver>(mut receiver: R) -> Self {
        let (actions_tx, actions) = mpsc::unbounded_channel();
        let (timer_tx, timer_updates) = mpsc::unbounded_channel();
        let (misc_tx, misc) = mpsc::unbounded_channel();

        let reader = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(Some(message)) => {
                        let routed = match message {
                            WireMessage::SendAction { action } => {
                                actions_tx.send(action).is_ok()
                            }
                            WireMessage::UpdateTimer(update) => timer_tx.send(update).is_ok(),
                            other => misc_tx.send(PeerEvent::Message(other)).is_ok(),
                        };
                        if !routed {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("peer closed the connection");
                        break;
                    }
                    Err(err) => {
                        // Halt-and-display policy: surface the fault once,
                        // then stop reading.
                        let _ = misc_tx.send(PeerEvent::Fault(err));
                        break;
                    }
                }
            }
        });

        PeerLink {
            actions,
            timer_updates,
            misc,
            reader,
        }
    }

    /// Non-blocking poll of the incoming-action queue.
    pub fn try_recv_action(&mut self) -> Option<Action> {
        self.actions.try_recv().ok()
    }

    /// Block until the peer's action arrives. Returns `None` when the
    /// connection is gone.
    pub async fn next_action(&mut self) -> Option<Action> {
        self.actions.recv().await
    }

    pub fn try_recv_timer_update(&mut self) -> Option<TimerUpdate> {
        self.timer_updates.try_recv().ok()
    }

    pub fn try_recv_misc(&mut self) -> Option<PeerEvent> {
        self.misc.try_recv().ok()
    }

    pub fn shutdown(&self) {
        self.reader.abort();
    }
}

impl Drop for PeerLink {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
