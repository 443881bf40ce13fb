//! Built-in channel adapters.
//!
//! Real endpoints (IRC, XMPP, Telegram clients) live outside this crate;
//! what ships here are the in-process stand-ins used by local runs.

pub mod echo;

pub use echo::EchoAdapter;
