//! Engine connection: wire messages, the in-process channel boundary and
//! the HTTP bridge.

pub mod link;
pub mod msg;
pub mod server;

pub use link::{EngineLink, EngineRemote};
pub use msg::{InboundMsg, MsgBody, OutboundMsg, TimeData};
pub use server::EngineBridge;
