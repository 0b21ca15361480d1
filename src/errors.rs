use std::borrow::Cow;

use thiserror::Error;

use crate::protocol::IpmiCommand;

/// Errors raised while unpacking a response payload.
///
/// Every variant carries enough context to diagnose a bad exchange without
/// re-running it.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload is shorter than the fixed fields being decoded.
    #[error("unpacked data too short: got {actual} bytes, need at least {required}")]
    TooShort { actual: usize, required: usize },

    /// A group extension command answered with a different group tag.
    #[error("group extension mismatch: expected {expected:#04x}, got {actual:#04x}")]
    GroupExtensionMismatch { expected: u8, actual: u8 },

    /// The controller echoed a selector number outside the known enumeration.
    #[error("unknown {kind} selector {value}")]
    UnknownSelector { kind: &'static str, value: u8 },

    /// The controller echoed a different selector than the one requested.
    #[error("response carries parameter selector {actual}, requested {expected}")]
    SelectorMismatch { expected: u8, actual: u8 },

    /// A parameter arm failed to unpack.
    #[error("unpack param ({name}[{selector}]) failed")]
    Parameter {
        name: &'static str,
        selector: u8,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Shorthand for [DecodeError::TooShort]
    pub fn too_short(actual: usize, required: usize) -> Self {
        DecodeError::TooShort { actual, required }
    }
}

/// Errors reported by a [crate::transport::Transport]. The codec never looks inside these.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("exchange cancelled")]
    Cancelled,
    #[error("exchange timed out")]
    TimedOut,
    #[error("transport I/O failed")]
    Io(#[from] std::io::Error),
    #[error("transport failure: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors returned by [crate::client::Client] operations.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Passed through from the transport unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The controller answered with a non-zero completion code.
    #[error("{command} failed with completion code {code:#04x}: {description}")]
    CompletionCode {
        command: IpmiCommand,
        code: u8,
        description: Cow<'static, str>,
    },

    /// The response bytes could not be decoded.
    #[error("decode {command} response failed")]
    Decode {
        command: IpmiCommand,
        #[source]
        source: DecodeError,
    },

    /// One step of a multi-parameter fetch failed.
    #[error("fetch parameter {name} failed")]
    Parameter {
        name: &'static str,
        #[source]
        source: Box<ExchangeError>,
    },
}

impl ExchangeError {
    /// The completion code, if this error came from a non-zero one.
    pub fn completion_code(&self) -> Option<u8> {
        match self {
            ExchangeError::CompletionCode { code, .. } => Some(*code),
            ExchangeError::Parameter { source, .. } => source.completion_code(),
            _ => None,
        }
    }
}
