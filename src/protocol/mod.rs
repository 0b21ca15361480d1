//! Protocol level constants: network functions, command identifiers,
//! payload types and the completion codes shared by every command.

use std::fmt;

/// DCMI commands live in the group extension network function and carry this
/// tag as their first request and response byte.
pub const GROUP_EXTENSION_DCMI: u8 = 0xDC;

/// The controller clears the boot flags valid bit if no chassis control
/// command arrives within this many seconds (+/- 10%) of the bit being set.
/// It is also cleared on any reset or power cycle the controller did not
/// command itself.
pub const BOOT_FLAGS_VALID_TIMEOUT_SECS: u64 = 60;

/// Network function of a request.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetFn {
    Chassis = 0x00,
    App = 0x06,
    GroupExtension = 0x2C,
}

/// The commands this crate knows how to encode and decode.
///
/// The transport uses [IpmiCommand::net_fn] and [IpmiCommand::code] to route
/// the exchange. The display form is the command's name as written in the
/// IPMI and DCMI specifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpmiCommand {
    SetSystemBootOptions,
    GetSystemBootOptions,
    GetPayloadActivationStatus,
    SetDcmiConfigParams,
    GetDcmiConfigParams,
}

impl IpmiCommand {
    pub const fn net_fn(self) -> NetFn {
        match self {
            IpmiCommand::SetSystemBootOptions | IpmiCommand::GetSystemBootOptions => NetFn::Chassis,
            IpmiCommand::GetPayloadActivationStatus => NetFn::App,
            IpmiCommand::SetDcmiConfigParams | IpmiCommand::GetDcmiConfigParams => {
                NetFn::GroupExtension
            }
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            IpmiCommand::SetSystemBootOptions => 0x08,
            IpmiCommand::GetSystemBootOptions => 0x09,
            IpmiCommand::GetPayloadActivationStatus => 0x4A,
            IpmiCommand::SetDcmiConfigParams => 0x12,
            IpmiCommand::GetDcmiConfigParams => 0x13,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            IpmiCommand::SetSystemBootOptions => "Set System Boot Options",
            IpmiCommand::GetSystemBootOptions => "Get System Boot Options",
            IpmiCommand::GetPayloadActivationStatus => "Get Payload Activation Status",
            IpmiCommand::SetDcmiConfigParams => "Set DCMI Configuration Parameters",
            IpmiCommand::GetDcmiConfigParams => "Get DCMI Configuration Parameters",
        }
    }
}

impl fmt::Display for IpmiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The payload type of an RMCP+ payload
///
/// # Variants
/// * [PayloadType::Ipmi] - Standard IPMI messages
/// * [PayloadType::Sol] - Serial over LAN
/// * [PayloadType::OemExplicit] - OEM payload identified by IANA and payload id
/// * [PayloadType::Other] - Any other payload type number, including OEM 20h-27h
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PayloadType {
    Ipmi,
    Sol,
    OemExplicit,
    Other(u8),
}

impl PayloadType {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x00 => Self::Ipmi,
            0x01 => Self::Sol,
            0x02 => Self::OemExplicit,
            a => Self::Other(a),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            PayloadType::Ipmi => 0x00,
            PayloadType::Sol => 0x01,
            PayloadType::OemExplicit => 0x02,
            PayloadType::Other(a) => a,
        }
    }
}

/// Completion codes any command may return (IPMI v2.0 table 5-2).
pub const GENERIC_COMPLETION_CODES: &[(u8, &str)] = &[
    (0xC0, "node busy"),
    (0xC1, "invalid command"),
    (0xC2, "command invalid for given LUN"),
    (0xC3, "timeout while processing command"),
    (0xC4, "out of space"),
    (0xC5, "reservation canceled or invalid reservation ID"),
    (0xC6, "request data truncated"),
    (0xC7, "request data length invalid"),
    (0xC8, "request data field length limit exceeded"),
    (0xC9, "parameter out of range"),
    (0xCA, "cannot return number of requested data bytes"),
    (0xCB, "requested sensor, data, or record not present"),
    (0xCC, "invalid data field in request"),
    (0xCD, "command illegal for specified sensor or record type"),
    (0xCE, "command response could not be provided"),
    (0xCF, "cannot execute duplicated request"),
    (0xD0, "SDR repository in update mode"),
    (0xD1, "device in firmware update mode"),
    (0xD2, "BMC initialization or initialization agent in progress"),
    (0xD3, "destination unavailable"),
    (0xD4, "insufficient privilege level"),
    (0xD5, "command not supported in present state"),
    (0xD6, "parameter is illegal because command sub-function has been disabled or is unavailable"),
    (0xFF, "unspecified error"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_routing() {
        assert_eq!(IpmiCommand::SetSystemBootOptions.net_fn() as u8, 0x00);
        assert_eq!(IpmiCommand::SetSystemBootOptions.code(), 0x08);
        assert_eq!(IpmiCommand::GetPayloadActivationStatus.net_fn() as u8, 0x06);
        assert_eq!(IpmiCommand::GetDcmiConfigParams.net_fn() as u8, 0x2C);
        assert_eq!(IpmiCommand::GetDcmiConfigParams.code(), 0x13);
    }

    #[test]
    fn payload_type_keeps_unknown_numbers() {
        assert_eq!(PayloadType::from_u8(0x01), PayloadType::Sol);
        assert_eq!(PayloadType::from_u8(0x21), PayloadType::Other(0x21));
        assert_eq!(PayloadType::Other(0x21).to_u8(), 0x21);
    }
}
