//! Command/response codec for IPMI and DCMI management controllers.
//!
//! Each command is a request type implementing [commands::Command] and a
//! response type implementing [commands::Response]. A [client::Client] glues
//! them to any [transport::Transport].

pub mod client;
pub mod commands;
pub mod errors;
pub mod packing;
pub mod params;
pub mod protocol;
pub mod transport;

pub use client::Client;
pub use errors::{DecodeError, ExchangeError, TransportError};
pub use protocol::{IpmiCommand, GROUP_EXTENSION_DCMI};
pub use transport::{RawResponse, Transport};
