//! Top-level facade crate for fishroom.
//!
//! Re-exports the interchange core and the bridge library so embedders can
//! depend on a single crate.

pub mod core {
    pub use fishroom_core::*;
}

pub mod bridge {
    pub use fishroom_bridge::*;
}
