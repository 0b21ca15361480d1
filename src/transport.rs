//! The boundary to whatever actually moves bytes to the controller.
//!
//! Sessions, authentication, retries and framing all live behind this trait.
//! The codec only hands over an encoded request and gets back the completion
//! code plus the response data.

use crate::errors::TransportError;
use crate::protocol::IpmiCommand;

/// The completion code and data bytes of one response
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub completion_code: u8,
    pub data: Vec<u8>,
}

impl RawResponse {
    pub fn new(completion_code: u8, data: impl Into<Vec<u8>>) -> Self {
        RawResponse {
            completion_code,
            data: data.into(),
        }
    }
}

/// Performs one request/response round trip
pub trait Transport {
    /// Cancellation and deadline state, passed through untouched.
    type Context: ?Sized;

    /// Sends `request` for `command` and returns the controller's answer.
    ///
    /// May block. Cancellation and timeouts are reported as
    /// [TransportError::Cancelled] and [TransportError::TimedOut].
    fn exchange(
        &mut self,
        ctx: &Self::Context,
        command: IpmiCommand,
        request: &[u8],
    ) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Context = T::Context;

    fn exchange(
        &mut self,
        ctx: &Self::Context,
        command: IpmiCommand,
        request: &[u8],
    ) -> Result<RawResponse, TransportError> {
        (**self).exchange(ctx, command, request)
    }
}
