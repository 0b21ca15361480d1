// Module that contains all commands that can be sent to the controller

use std::borrow::Cow;

use crate::errors::DecodeError;
use crate::protocol::{IpmiCommand, GENERIC_COMPLETION_CODES};

mod boot;
pub use boot::{
    GetSystemBootOptions, GetSystemBootOptionsResponse, SetSystemBootOptions,
    SetSystemBootOptionsResponse,
};

mod payload;
pub use payload::{
    ActivatedInstances, GetPayloadActivationStatus, GetPayloadActivationStatusResponse,
};

mod dcmi;
pub use dcmi::{
    GetDcmiConfigParams, GetDcmiConfigParamsResponse, SetDcmiConfigParams,
    SetDcmiConfigParamsResponse,
};

/// A command trait that every request implements
///
/// Encoding is total. Anything that could make a request malformed is
/// rejected when the request is built, never here.
pub trait Command {
    type Response: Response;

    /// Routes the exchange. Constant per request type.
    const COMMAND: IpmiCommand;

    /// Encodes the library->controller request
    fn encode_request(&self) -> Vec<u8>;

    /// The command identifier of this request
    fn command(&self) -> IpmiCommand {
        Self::COMMAND
    }
}

/// A response trait that every decoded response implements
pub trait Response: Sized {
    /// Command specific completion codes, consulted only for diagnostics.
    fn completion_codes() -> &'static [(u8, &'static str)] {
        &[]
    }

    /// Decodes the payload of a controller->library response.
    ///
    /// Implementations check the minimum length first, then any group
    /// extension tag, then unpack fields in wire order. A response is only
    /// ever returned fully populated.
    fn decode_response_payload(payload: &[u8]) -> Result<Self, DecodeError>;
}

/// Looks up `code` in the response's own table, then in the generic table.
///
/// Absence is not an error: this lookup never decides whether a code failed.
pub fn lookup_completion_code<R: Response>(code: u8) -> Option<&'static str> {
    R::completion_codes()
        .iter()
        .chain(GENERIC_COMPLETION_CODES)
        .find(|(c, _)| *c == code)
        .map(|(_, description)| *description)
}

/// Human readable cause of a completion code
pub fn describe_completion_code<R: Response>(code: u8) -> Cow<'static, str> {
    match code {
        0x00 => Cow::Borrowed("command completed normally"),
        _ => match lookup_completion_code::<R>(code) {
            Some(description) => Cow::Borrowed(description),
            None => Cow::Owned(format!("unknown completion code {code:#04x}")),
        },
    }
}

/// Fails with [DecodeError::GroupExtensionMismatch] unless `tag` is `expected`.
pub(crate) fn check_group_extension(expected: u8, tag: u8) -> Result<(), DecodeError> {
    if tag != expected {
        return Err(DecodeError::GroupExtensionMismatch {
            expected,
            actual: tag,
        });
    }
    Ok(())
}
