//! Implements the DCMI configuration parameter commands

use super::{check_group_extension, Command, Response};
use crate::errors::DecodeError;
use crate::packing::{check_len, pack_bytes, pack_u8, unpack_bytes, unpack_u8};
use crate::params::{DcmiConfigParamSelector, DcmiConfigParameter, Selector};
use crate::protocol::{IpmiCommand, GROUP_EXTENSION_DCMI};

/// Reads one DCMI configuration parameter
///
/// # Members
///
/// * `selector` - The parameter to read
/// * `set_selector` - 0 for parameters that only have one set
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GetDcmiConfigParams {
    pub selector: DcmiConfigParamSelector,
    pub set_selector: u8,
}

impl GetDcmiConfigParams {
    pub fn new(selector: DcmiConfigParamSelector) -> Self {
        GetDcmiConfigParams {
            selector,
            set_selector: 0,
        }
    }
}

impl Command for GetDcmiConfigParams {
    type Response = GetDcmiConfigParamsResponse;
    const COMMAND: IpmiCommand = IpmiCommand::GetDcmiConfigParams;

    fn encode_request(&self) -> Vec<u8> {
        let mut out = vec![0u8; 3];
        pack_u8(GROUP_EXTENSION_DCMI, &mut out, 0);
        pack_u8(self.selector.value(), &mut out, 1);
        pack_u8(self.set_selector, &mut out, 2);
        out
    }
}

/// The raw answer to [GetDcmiConfigParams]
///
/// `param_data` is left undecoded; see
/// [crate::client::Client::get_dcmi_config_param_for] for the typed form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetDcmiConfigParamsResponse {
    pub major_version: u8,
    pub minor_version: u8,
    pub param_revision: u8,
    pub param_data: Vec<u8>,
}

impl GetDcmiConfigParamsResponse {
    /// Decodes `param_data` as the union arm named by `selector`
    pub fn decode_parameter(
        &self,
        selector: DcmiConfigParamSelector,
    ) -> Result<DcmiConfigParameter, DecodeError> {
        DcmiConfigParameter::decode(selector, &self.param_data)
    }
}

impl Response for GetDcmiConfigParamsResponse {
    fn decode_response_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        check_len(payload, 5)?;
        check_group_extension(GROUP_EXTENSION_DCMI, unpack_u8(payload, 0)?)?;

        Ok(GetDcmiConfigParamsResponse {
            major_version: unpack_u8(payload, 1)?,
            minor_version: unpack_u8(payload, 2)?,
            param_revision: unpack_u8(payload, 3)?,
            param_data: unpack_bytes(payload, 4, payload.len() - 4)?.to_vec(),
        })
    }
}

/// Writes one DCMI configuration parameter
///
/// The selector comes from the active arm of `parameter`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDcmiConfigParams {
    pub parameter: DcmiConfigParameter,
    pub set_selector: u8,
}

impl SetDcmiConfigParams {
    pub fn new(parameter: impl Into<DcmiConfigParameter>) -> Self {
        SetDcmiConfigParams {
            parameter: parameter.into(),
            set_selector: 0,
        }
    }
}

impl Command for SetDcmiConfigParams {
    type Response = SetDcmiConfigParamsResponse;
    const COMMAND: IpmiCommand = IpmiCommand::SetDcmiConfigParams;

    fn encode_request(&self) -> Vec<u8> {
        let parameter_data = self.parameter.pack();

        let mut out = vec![0u8; 3 + parameter_data.len()];
        pack_u8(GROUP_EXTENSION_DCMI, &mut out, 0);
        pack_u8(self.parameter.selector().value(), &mut out, 1);
        pack_u8(self.set_selector, &mut out, 2);
        pack_bytes(&parameter_data, &mut out, 3);
        out
    }
}

/// Set DCMI Configuration Parameters only echoes the group tag
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SetDcmiConfigParamsResponse;

impl Response for SetDcmiConfigParamsResponse {
    fn decode_response_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        check_len(payload, 1)?;
        check_group_extension(GROUP_EXTENSION_DCMI, unpack_u8(payload, 0)?)?;
        Ok(SetDcmiConfigParamsResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::dcmi::{ActivateDhcp, DhcpTiming3};

    #[test]
    fn get_request_layout() {
        let request = GetDcmiConfigParams::new(DcmiConfigParamSelector::DiscoveryConfiguration);
        assert_eq!(request.encode_request(), vec![0xDC, 0x02, 0x00]);
    }

    #[test]
    fn get_response_fields() {
        let response = GetDcmiConfigParamsResponse::decode_response_payload(&[
            0xDC, 0x01, 0x05, 0x02, 0x40, 0x00,
        ])
        .unwrap();
        assert_eq!(response.major_version, 1);
        assert_eq!(response.minor_version, 5);
        assert_eq!(response.param_revision, 2);
        assert_eq!(response.param_data, vec![0x40, 0x00]);
        assert_eq!(
            response
                .decode_parameter(DcmiConfigParamSelector::DhcpTiming3)
                .unwrap(),
            DcmiConfigParameter::DhcpTiming3(DhcpTiming3 {
                server_contact_retry_interval: 64
            })
        );
    }

    #[test]
    fn get_response_wrong_group_tag() {
        let err = GetDcmiConfigParamsResponse::decode_response_payload(&[0xDD, 1, 5, 2, 0x04])
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::GroupExtensionMismatch {
                expected: 0xDC,
                actual: 0xDD
            }
        ));
    }

    #[test]
    fn get_response_too_short_before_tag_check() {
        // Wrong tag and too short: length is reported first.
        let err = GetDcmiConfigParamsResponse::decode_response_payload(&[0x00, 1, 5, 2])
            .unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TooShort {
                actual: 4,
                required: 5
            }
        ));
    }

    #[test]
    fn set_request_layout() {
        let request = SetDcmiConfigParams::new(ActivateDhcp { activate: true });
        assert_eq!(request.encode_request(), vec![0xDC, 0x01, 0x00, 0x01]);
        assert!(SetDcmiConfigParamsResponse::decode_response_payload(&[0xDC]).is_ok());
        assert!(SetDcmiConfigParamsResponse::decode_response_payload(&[0x00]).is_err());
    }

    #[test]
    fn set_response_needs_group_tag() {
        assert!(matches!(
            SetDcmiConfigParamsResponse::decode_response_payload(&[]),
            Err(DecodeError::TooShort {
                actual: 0,
                required: 1
            })
        ));
    }
}
