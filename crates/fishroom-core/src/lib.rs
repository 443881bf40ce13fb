//! fishroom core: the interchange format spoken between channel adapters.
//!
//! This crate defines the message envelope, its styled-text payload, and
//! the JSON codecs that move both across channel boundaries. It carries no
//! transport or runtime dependencies so adapters, bridge workers, and CLI
//! tooling can all share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `FishroomError`/`Result`, and the lossy
//! decode entry points trade even that for a fixed sentinel message, so a
//! relay process never crashes on hostile wire input.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ErrorKind, FishroomError, Result};
pub use protocol::color::{Color, ColorCodec};
pub use protocol::message::{ChannelType, Message, MessageCodec, MessageType};
pub use protocol::rich_text::{RichText, RichTextCodec};
pub use protocol::style::{TextStyle, TextStyleBuilder, TextStyleCodec};
