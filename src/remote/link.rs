//! In-process transport boundary to the engine connection.
//!
//! The UI side holds an [`EngineLink`]; whatever bridges the actual
//! connection (the HTTP bridge thread, or a test) holds the matching
//! [`EngineRemote`]. Sends are fire-and-forget - no acknowledgement
//! tracking, and a closed far side is logged once per send, never fatal.
//! Inbound messages are drained in arrival order on the UI thread.

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, trace};

use crate::remote::msg::{InboundMsg, OutboundMsg};

/// UI-side endpoint.
#[derive(Clone)]
pub struct EngineLink {
    out_tx: Sender<OutboundMsg>,
    in_rx: Receiver<InboundMsg>,
}

/// Transport-side endpoint.
#[derive(Clone)]
pub struct EngineRemote {
    pub in_tx: Sender<InboundMsg>,
    pub out_rx: Receiver<OutboundMsg>,
}

impl EngineLink {
    /// Create a connected link/remote pair.
    pub fn pair() -> (EngineLink, EngineRemote) {
        let (out_tx, out_rx) = unbounded();
        let (in_tx, in_rx) = unbounded();
        (EngineLink { out_tx, in_rx }, EngineRemote { in_tx, out_rx })
    }

    /// Fire-and-forget send towards the engine.
    pub fn send(&self, msg: OutboundMsg) {
        trace!("-> engine: {msg:?}");
        if self.out_tx.send(msg).is_err() {
            debug!("engine link closed, dropping outbound message");
        }
    }

    /// Drain everything the engine pushed since the last tick, in arrival
    /// order.
    pub fn drain(&self) -> Vec<InboundMsg> {
        self.in_rx.try_iter().collect()
    }
}
