//! Offline encode/decode tool. Nothing here talks to a controller.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use tracing::debug;

use ipmi_codec::commands::{
    describe_completion_code, Command as IpmiRequest, GetDcmiConfigParams,
    GetDcmiConfigParamsResponse, GetPayloadActivationStatusResponse,
    GetSystemBootOptionsResponse, Response, SetDcmiConfigParamsResponse, SetSystemBootOptions,
    SetSystemBootOptionsResponse,
};
use ipmi_codec::params::boot::{BiosBootType, BootDeviceSelector};
use ipmi_codec::params::{BootOptionParameterSelector, DcmiConfigParamSelector};

pub mod logging;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the Set System Boot Options request that forces a boot device.
    BootDevice(BootDeviceArgs),
    /// Print a Get DCMI Configuration Parameters request.
    DcmiGet(DcmiGetArgs),
    /// Decode a response payload given as hex (completion code stripped).
    Decode(DecodeArgs),
    /// Describe a completion code for a command.
    CompletionCode(CompletionCodeArgs),
}

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::BootDevice(args) => boot_device(args),
        Command::DcmiGet(args) => dcmi_get(args),
        Command::Decode(args) => decode(args),
        Command::CompletionCode(args) => completion_code(args),
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum BootDevice {
    None,
    Pxe,
    Disk,
    Safe,
    Diag,
    Cdrom,
    Bios,
    Floppy,
}

impl From<BootDevice> for BootDeviceSelector {
    fn from(device: BootDevice) -> Self {
        match device {
            BootDevice::None => BootDeviceSelector::NoOverride,
            BootDevice::Pxe => BootDeviceSelector::ForcePxe,
            BootDevice::Disk => BootDeviceSelector::ForceHardDrive,
            BootDevice::Safe => BootDeviceSelector::ForceHardDriveSafeMode,
            BootDevice::Diag => BootDeviceSelector::ForceDiagnosticPartition,
            BootDevice::Cdrom => BootDeviceSelector::ForceCdrom,
            BootDevice::Bios => BootDeviceSelector::ForceBiosSetup,
            BootDevice::Floppy => BootDeviceSelector::ForceFloppy,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum BootType {
    Legacy,
    Efi,
}

#[derive(Args, Debug)]
pub struct BootDeviceArgs {
    /// Device to boot from.
    #[arg(long, value_enum)]
    pub device: BootDevice,
    /// Firmware boot type.
    #[arg(long, value_enum, default_value = "legacy")]
    pub boot_type: BootType,
    /// Apply to every future boot instead of the next one only.
    #[arg(long)]
    pub persist: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum DcmiParam {
    ActivateDhcp,
    Discovery,
    DhcpTiming1,
    DhcpTiming2,
    DhcpTiming3,
}

impl From<DcmiParam> for DcmiConfigParamSelector {
    fn from(param: DcmiParam) -> Self {
        match param {
            DcmiParam::ActivateDhcp => DcmiConfigParamSelector::ActivateDhcp,
            DcmiParam::Discovery => DcmiConfigParamSelector::DiscoveryConfiguration,
            DcmiParam::DhcpTiming1 => DcmiConfigParamSelector::DhcpTiming1,
            DcmiParam::DhcpTiming2 => DcmiConfigParamSelector::DhcpTiming2,
            DcmiParam::DhcpTiming3 => DcmiConfigParamSelector::DhcpTiming3,
        }
    }
}

#[derive(Args, Debug)]
pub struct DcmiGetArgs {
    /// Parameter to read.
    #[arg(value_enum)]
    pub param: DcmiParam,
    /// Set selector, 0 for single-set parameters.
    #[arg(long, default_value_t = 0)]
    pub set_selector: u8,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ResponseKind {
    PayloadActivationStatus,
    BootOptions,
    DcmiConfig,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Which response the bytes belong to.
    #[arg(value_enum)]
    pub kind: ResponseKind,
    /// Response data as hex, e.g. "dc 01 05 02 01".
    pub hex: String,
    /// DCMI parameter the bytes carry (dcmi-config only).
    #[arg(long, value_enum)]
    pub param: Option<DcmiParam>,
    /// Raw DCMI parameter selector number, instead of --param.
    #[arg(long, value_parser = parse_u8, conflicts_with = "param")]
    pub selector: Option<u8>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CommandKind {
    SetBootOptions,
    GetBootOptions,
    PayloadActivationStatus,
    GetDcmiConfig,
    SetDcmiConfig,
}

#[derive(Args, Debug)]
pub struct CompletionCodeArgs {
    #[arg(value_enum)]
    pub command: CommandKind,
    /// Completion code, decimal or 0x-prefixed hex.
    #[arg(value_parser = parse_u8)]
    pub code: u8,
}

fn boot_device(args: BootDeviceArgs) -> Result<()> {
    let boot_type = match args.boot_type {
        BootType::Legacy => BiosBootType::Legacy,
        BootType::Efi => BiosBootType::Efi,
    };
    let request = SetSystemBootOptions::boot_device(args.device.into(), boot_type, args.persist);
    print_request(&request);
    Ok(())
}

fn dcmi_get(args: DcmiGetArgs) -> Result<()> {
    let request = GetDcmiConfigParams {
        selector: args.param.into(),
        set_selector: args.set_selector,
    };
    print_request(&request);
    Ok(())
}

fn decode(args: DecodeArgs) -> Result<()> {
    let data = parse_hex(&args.hex)?;
    debug!(kind = ?args.kind, len = data.len(), "decoding response");

    match args.kind {
        ResponseKind::PayloadActivationStatus => {
            let response = GetPayloadActivationStatusResponse::decode_response_payload(&data)?;
            println!("instance capacity: {}", response.instance_capacity);
            for instance in 1..=16 {
                let state = if response.activated.is_activated(instance) {
                    "activated"
                } else {
                    "deactivated"
                };
                println!("instance {instance:02}: {state}");
            }
        }
        ResponseKind::BootOptions => {
            let response = GetSystemBootOptionsResponse::decode_response_payload(&data)?;
            let selector = BootOptionParameterSelector::from_u8(response.selector)?;
            let parameter = response.decode_parameter(selector)?;
            println!("parameter valid: {}", !response.parameter_invalid);
            println!("{parameter:#?}");
        }
        ResponseKind::DcmiConfig => {
            let selector = dcmi_selector(args.param, args.selector)?;
            let response = GetDcmiConfigParamsResponse::decode_response_payload(&data)?;
            let parameter = response.decode_parameter(selector)?;
            println!(
                "DCMI {}.{} revision {}",
                response.major_version, response.minor_version, response.param_revision
            );
            println!("{parameter:#?}");
        }
    }
    Ok(())
}

fn dcmi_selector(
    param: Option<DcmiParam>,
    selector: Option<u8>,
) -> Result<DcmiConfigParamSelector> {
    match (param, selector) {
        (Some(param), _) => Ok(param.into()),
        (None, Some(value)) => Ok(DcmiConfigParamSelector::from_u8(value)?),
        (None, None) => Err(anyhow!("dcmi-config needs --param or --selector")),
    }
}

fn completion_code(args: CompletionCodeArgs) -> Result<()> {
    let description = match args.command {
        CommandKind::SetBootOptions => describe::<SetSystemBootOptionsResponse>(args.code),
        CommandKind::GetBootOptions => describe::<GetSystemBootOptionsResponse>(args.code),
        CommandKind::PayloadActivationStatus => {
            describe::<GetPayloadActivationStatusResponse>(args.code)
        }
        CommandKind::GetDcmiConfig => describe::<GetDcmiConfigParamsResponse>(args.code),
        CommandKind::SetDcmiConfig => describe::<SetDcmiConfigParamsResponse>(args.code),
    };
    println!("{:#04x}: {description}", args.code);
    Ok(())
}

fn describe<R: Response>(code: u8) -> String {
    describe_completion_code::<R>(code).into_owned()
}

fn print_request<C: IpmiRequest>(request: &C) {
    let command = request.command();
    println!(
        "netfn={:#04x} cmd={:#04x} data={}",
        command.net_fn() as u8,
        command.code(),
        format_hex(&request.encode_request())
    );
}

fn format_hex(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepts "05e004", "05 e0 04" and "0x05 0xe0 0x04"
fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let digits: String = input
        .split_whitespace()
        .map(|word| word.trim_start_matches("0x"))
        .collect();

    if !digits.is_ascii() {
        bail!("non-hex characters in {input:?}");
    }
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits in {input:?}");
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte {:?}", &digits[i..i + 2]))
        })
        .collect()
}

fn parse_u8(input: &str) -> Result<u8, String> {
    let parsed = match input.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid byte value {input:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spaced_and_packed_hex() {
        assert_eq!(parse_hex("dc 01 05").unwrap(), vec![0xdc, 0x01, 0x05]);
        assert_eq!(parse_hex("dc0105").unwrap(), vec![0xdc, 0x01, 0x05]);
        assert_eq!(parse_hex("0xdc 0x01").unwrap(), vec![0xdc, 0x01]);
        assert!(parse_hex("dc0").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn parses_completion_codes() {
        assert_eq!(parse_u8("0x81").unwrap(), 0x81);
        assert_eq!(parse_u8("129").unwrap(), 0x81);
        assert!(parse_u8("0x100").is_err());
    }

    #[test]
    fn dcmi_selector_from_name_or_number() {
        assert_eq!(
            dcmi_selector(Some(DcmiParam::DhcpTiming2), None).unwrap(),
            DcmiConfigParamSelector::DhcpTiming2
        );
        assert_eq!(
            dcmi_selector(None, Some(5)).unwrap(),
            DcmiConfigParamSelector::DhcpTiming3
        );
        let err = dcmi_selector(None, Some(9)).unwrap_err();
        assert_eq!(err.to_string(), "unknown DCMI configuration parameter selector 9");
        assert!(dcmi_selector(None, None).is_err());
    }

    #[test]
    fn formats_hex() {
        assert_eq!(format_hex(&[0x05, 0xe0, 0x04]), "05 e0 04");
    }
}
