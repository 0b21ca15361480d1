//! Implements the chassis commands that read and write boot options

use super::{Command, Response};
use crate::errors::DecodeError;
use crate::packing::{check_len, is_bit_set, pack_bytes, pack_u8, unpack_u8, with_bit};
use crate::params::boot::{BiosBootType, BootDeviceSelector, BootFlags};
use crate::params::{BootOptionParameter, BootOptionParameterSelector, Parameter, Selector};
use crate::protocol::IpmiCommand;

/// Sets one boot option parameter
///
/// The selector is taken from the active arm of `parameter`, so the two can
/// never disagree on the wire.
///
/// # Members
///
/// * `mark_parameter_invalid` - Bit 7 of the first byte. Marks the parameter invalid / locked
/// * `parameter` - The parameter to write
///
/// # Examples
///
/// ```rust
/// use ipmi_codec::commands::{Command, SetSystemBootOptions};
/// use ipmi_codec::params::boot::{BiosBootType, BootDeviceSelector};
///
/// // Boot from PXE over EFI on the next boot only
/// let request = SetSystemBootOptions::boot_device(BootDeviceSelector::ForcePxe, BiosBootType::Efi, false);
/// assert_eq!(request.encode_request(), vec![0x05, 0xA0, 0x04, 0x00, 0x00, 0x00]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetSystemBootOptions {
    pub mark_parameter_invalid: bool,
    pub parameter: BootOptionParameter,
}

impl SetSystemBootOptions {
    pub fn new(parameter: impl Into<BootOptionParameter>) -> Self {
        SetSystemBootOptions {
            mark_parameter_invalid: false,
            parameter: parameter.into(),
        }
    }

    /// Forces the boot device for the next boot, or for every boot when
    /// `persist` is set.
    ///
    /// The boot flags valid bit is always set and the parameter is left
    /// unlocked. The controller clears the valid bit by itself about 60
    /// seconds later, or on any reset it did not command.
    pub fn boot_device(device: BootDeviceSelector, boot_type: BiosBootType, persist: bool) -> Self {
        Self::new(BootFlags::boot_device(device, boot_type, persist))
    }

    pub fn selector(&self) -> BootOptionParameterSelector {
        self.parameter.selector()
    }
}

impl Command for SetSystemBootOptions {
    type Response = SetSystemBootOptionsResponse;
    const COMMAND: IpmiCommand = IpmiCommand::SetSystemBootOptions;

    fn encode_request(&self) -> Vec<u8> {
        let parameter_data = self.parameter.pack();

        let mut out = vec![0u8; 1 + parameter_data.len()];

        // Bit 7 is the invalid / locked flag, bits 6:0 the selector
        let b = with_bit(self.selector().value(), 7, self.mark_parameter_invalid);
        pack_u8(b, &mut out, 0);

        // The parameter data follows the fixed byte
        pack_bytes(&parameter_data, &mut out, 1);

        out
    }
}

/// Set System Boot Options carries no response data
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SetSystemBootOptionsResponse;

impl Response for SetSystemBootOptionsResponse {
    fn completion_codes() -> &'static [(u8, &'static str)] {
        &[
            (0x80, "parameter not supported"),
            (0x81, "attempt to set the 'set in progress' value (in parameter #0) when not in the 'set complete' state. (This completion code provides a way to recognize that another party has already 'claimed' the parameters)"),
            (0x82, "attempt to write read-only parameter"),
        ]
    }

    fn decode_response_payload(_payload: &[u8]) -> Result<Self, DecodeError> {
        Ok(SetSystemBootOptionsResponse)
    }
}

/// Reads one boot option parameter
///
/// # Members
///
/// * `selector` - The parameter to read
/// * `set_selector` - Set within the parameter, 0 when it only has one
/// * `block_selector` - Block within the set, 0 when it only has one
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GetSystemBootOptions {
    pub selector: BootOptionParameterSelector,
    pub set_selector: u8,
    pub block_selector: u8,
}

impl GetSystemBootOptions {
    pub fn new(selector: BootOptionParameterSelector) -> Self {
        GetSystemBootOptions {
            selector,
            set_selector: 0,
            block_selector: 0,
        }
    }
}

impl Command for GetSystemBootOptions {
    type Response = GetSystemBootOptionsResponse;
    const COMMAND: IpmiCommand = IpmiCommand::GetSystemBootOptions;

    fn encode_request(&self) -> Vec<u8> {
        let mut out = vec![0u8; 3];
        pack_u8(self.selector.value() & 0x7F, &mut out, 0);
        pack_u8(self.set_selector, &mut out, 1);
        pack_u8(self.block_selector, &mut out, 2);
        out
    }
}

/// The raw answer to [GetSystemBootOptions]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetSystemBootOptionsResponse {
    /// Bits 3:0 of byte 0, 1 for this version of the protocol
    pub parameter_version: u8,
    /// The parameter is marked invalid / locked
    pub parameter_invalid: bool,
    /// The selector the controller echoed back
    pub selector: u8,
    pub parameter_data: Vec<u8>,
}

impl GetSystemBootOptionsResponse {
    /// Decodes the parameter data as arm `P`.
    ///
    /// Fails if the controller echoed a different selector than `P`'s.
    pub fn parameter<P>(&self) -> Result<P, DecodeError>
    where
        P: Parameter<Selector = BootOptionParameterSelector>,
    {
        self.check_selector(P::SELECTOR)?;
        P::decode_for_selector(&self.parameter_data)
    }

    /// Decodes the parameter data as the union arm named by `selector`.
    pub fn decode_parameter(
        &self,
        selector: BootOptionParameterSelector,
    ) -> Result<BootOptionParameter, DecodeError> {
        self.check_selector(selector)?;
        BootOptionParameter::decode(selector, &self.parameter_data)
    }

    fn check_selector(&self, expected: BootOptionParameterSelector) -> Result<(), DecodeError> {
        if self.selector != expected.value() {
            return Err(DecodeError::SelectorMismatch {
                expected: expected.value(),
                actual: self.selector,
            });
        }
        Ok(())
    }
}

impl Response for GetSystemBootOptionsResponse {
    fn completion_codes() -> &'static [(u8, &'static str)] {
        &[(0x80, "parameter not supported")]
    }

    fn decode_response_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        check_len(payload, 2)?;

        let version = unpack_u8(payload, 0)?;
        let b = unpack_u8(payload, 1)?;

        Ok(GetSystemBootOptionsResponse {
            parameter_version: version & 0x0F,
            parameter_invalid: is_bit_set(b, 7),
            selector: b & 0x7F,
            parameter_data: payload[2..].to_vec(),
        })
    }
}
