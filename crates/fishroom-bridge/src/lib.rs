//! fishroom bridge library entry.
//!
//! This crate wires the config layer, the in-process message bus, the
//! routing loop, and the channel-adapter seam into a relay stack. It is
//! intended to be consumed by the binary (`main.rs`), by integration
//! tests, and by embedders that bring their own adapters.

pub mod adapters;
pub mod bus;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod router;

pub use error::{BridgeError, Result};
