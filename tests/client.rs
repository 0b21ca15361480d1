use std::collections::VecDeque;

use ipmi_codec::commands::ActivatedInstances;
use ipmi_codec::params::boot::{BiosBootType, BootDeviceSelector, BootFlags};
use ipmi_codec::params::dcmi::{ActivateDhcp, DhcpTiming3};
use ipmi_codec::params::DcmiConfigParamSelector;
use ipmi_codec::protocol::PayloadType;
use ipmi_codec::{
    Client, DecodeError, ExchangeError, IpmiCommand, RawResponse, Transport, TransportError,
};

/// Answers exchanges from a script and records every request
#[derive(Default)]
struct ScriptedTransport {
    script: VecDeque<Result<RawResponse, TransportError>>,
    sent: Vec<(IpmiCommand, Vec<u8>)>,
}

impl ScriptedTransport {
    fn reply(mut self, completion_code: u8, data: &[u8]) -> Self {
        self.script
            .push_back(Ok(RawResponse::new(completion_code, data.to_vec())));
        self
    }

    fn fail(mut self, err: TransportError) -> Self {
        self.script.push_back(Err(err));
        self
    }
}

impl Transport for ScriptedTransport {
    type Context = ();

    fn exchange(
        &mut self,
        _ctx: &(),
        command: IpmiCommand,
        request: &[u8],
    ) -> Result<RawResponse, TransportError> {
        self.sent.push((command, request.to_vec()));
        self.script
            .pop_front()
            .unwrap_or(Err(TransportError::Cancelled))
    }
}

fn dcmi_reply(param: &[u8]) -> Vec<u8> {
    let mut data = vec![0xDC, 0x01, 0x05, 0x02];
    data.extend_from_slice(param);
    data
}

#[test]
fn set_boot_device_sends_boot_flags() {
    let transport = ScriptedTransport::default().reply(0x00, &[]);
    let mut client = Client::new(transport);

    client
        .set_boot_device(&(), BootDeviceSelector::ForcePxe, BiosBootType::Efi, true)
        .unwrap();

    let sent = &client.transport().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, IpmiCommand::SetSystemBootOptions);
    assert_eq!(sent[0].1, vec![0x05, 0xE0, 0x04, 0x00, 0x00, 0x00]);
}

#[test]
fn completion_code_is_described_from_command_table() {
    let transport = ScriptedTransport::default().reply(0x81, &[]);
    let mut client = Client::new(transport);

    let err = client
        .set_boot_device(&(), BootDeviceSelector::ForceCdrom, BiosBootType::Legacy, false)
        .unwrap_err();

    match &err {
        ExchangeError::CompletionCode {
            command,
            code,
            description,
        } => {
            assert_eq!(*command, IpmiCommand::SetSystemBootOptions);
            assert_eq!(*code, 0x81);
            assert!(description.contains("set in progress"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.completion_code(), Some(0x81));
}

#[test]
fn unknown_completion_code_still_fails() {
    let transport = ScriptedTransport::default().reply(0x01, &[0x00, 0x00, 0x00]);
    let mut client = Client::new(transport);

    let err = client
        .get_payload_activation_status(&(), PayloadType::Sol)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Get Payload Activation Status failed with completion code 0x01: unknown completion code 0x01"
    );
}

#[test]
fn transport_errors_pass_through() {
    let transport = ScriptedTransport::default().fail(TransportError::TimedOut);
    let mut client = Client::new(transport);

    let err = client
        .get_payload_activation_status(&(), PayloadType::Ipmi)
        .unwrap_err();
    assert!(matches!(
        err,
        ExchangeError::Transport(TransportError::TimedOut)
    ));
}

#[test]
fn transport_io_errors_pass_through() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "link down");
    let transport = ScriptedTransport::default().fail(TransportError::from(io));
    let mut client = Client::new(transport);

    let err = client
        .get_dcmi_config_params(&(), DcmiConfigParamSelector::ActivateDhcp, 0)
        .unwrap_err();
    match err {
        ExchangeError::Transport(TransportError::Io(io)) => {
            assert_eq!(io.kind(), std::io::ErrorKind::BrokenPipe);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn payload_activation_status() {
    let transport = ScriptedTransport::default().reply(0x00, &[0x01, 0x03, 0x80]);
    let mut client = Client::new(transport);

    let response = client
        .get_payload_activation_status(&(), PayloadType::Sol)
        .unwrap();
    assert_eq!(response.payload_type, Some(PayloadType::Sol));
    assert_eq!(response.instance_capacity, 2);
    assert_eq!(
        response.activated,
        ActivatedInstances::INSTANCE_1 | ActivatedInstances::INSTANCE_2 | ActivatedInstances::INSTANCE_16
    );
    assert_eq!(client.transport().sent[0].1, vec![0x01]);
}

#[test]
fn get_boot_option_round_trip() {
    let flags = BootFlags::boot_device(BootDeviceSelector::ForceBiosSetup, BiosBootType::Efi, false);
    let mut reply = vec![0x01, 0x05];
    reply.extend(ipmi_codec::params::Parameter::pack(&flags));

    let transport = ScriptedTransport::default().reply(0x00, &reply);
    let mut client = Client::new(transport);

    let decoded: BootFlags = client.get_boot_option_for(&()).unwrap();
    assert_eq!(decoded, flags);
    assert_eq!(client.transport().sent[0].1, vec![0x05, 0x00, 0x00]);
}

#[test]
fn dcmi_parameter_decode_failure_names_selector() {
    // DHCP Timing 3 needs two bytes, the controller sent one.
    let transport = ScriptedTransport::default().reply(0x00, &dcmi_reply(&[0x40]));
    let mut client = Client::new(transport);

    let err = client
        .get_dcmi_config_param_for::<DhcpTiming3>(&())
        .unwrap_err();
    match err {
        ExchangeError::Decode {
            command,
            source:
                DecodeError::Parameter {
                    name, selector, ..
                },
        } => {
            assert_eq!(command, IpmiCommand::GetDcmiConfigParams);
            assert_eq!(name, "DHCP Timing 3");
            assert_eq!(selector, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn dcmi_wrong_group_tag_is_an_error() {
    let transport = ScriptedTransport::default().reply(0x00, &[0x00, 0x01, 0x05, 0x02, 0x01]);
    let mut client = Client::new(transport);

    let err = client
        .get_dcmi_config_params(&(), DcmiConfigParamSelector::ActivateDhcp, 0)
        .unwrap_err();
    assert!(matches!(
        err,
        ExchangeError::Decode {
            source: DecodeError::GroupExtensionMismatch {
                expected: 0xDC,
                actual: 0x00
            },
            ..
        }
    ));
}

#[test]
fn dcmi_configurations_in_order() {
    let transport = ScriptedTransport::default()
        .reply(0x00, &dcmi_reply(&[0x00]))
        .reply(0x00, &dcmi_reply(&[0x81]))
        .reply(0x00, &dcmi_reply(&[4]))
        .reply(0x00, &dcmi_reply(&[120]))
        .reply(0x00, &dcmi_reply(&[64, 0]));
    let mut client = Client::new(transport);

    let config = client.get_dcmi_configurations(&()).unwrap();
    assert!(!config.activate_dhcp.activate);
    assert!(config.discovery_configuration.random_backoff_enabled);
    assert!(config.discovery_configuration.include_dhcp_option_12);
    assert!(!config.discovery_configuration.include_dhcp_option_60_and_43);
    assert_eq!(config.dhcp_timing_1.initial_timeout_interval, 4);
    assert_eq!(config.dhcp_timing_2.server_contact_timeout_interval, 120);
    assert_eq!(config.dhcp_timing_3.server_contact_retry_interval, 64);

    let selectors: Vec<u8> = client.transport().sent.iter().map(|(_, r)| r[1]).collect();
    assert_eq!(selectors, vec![1, 2, 3, 4, 5]);
}

#[test]
fn dcmi_configurations_stop_at_first_failure() {
    let transport = ScriptedTransport::default()
        .reply(0x00, &dcmi_reply(&[0x00]))
        .reply(0x00, &dcmi_reply(&[0x80]))
        .reply(0xC1, &[])
        .reply(0x00, &dcmi_reply(&[120]))
        .reply(0x00, &dcmi_reply(&[64, 0]));
    let mut client = Client::new(transport);

    let err = client.get_dcmi_configurations(&()).unwrap_err();
    match &err {
        ExchangeError::Parameter { name, source } => {
            assert_eq!(*name, "DHCP Timing 1");
            assert!(matches!(
                **source,
                ExchangeError::CompletionCode { code: 0xC1, .. }
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.completion_code(), Some(0xC1));

    // Parameters 4 and 5 were never requested.
    assert_eq!(client.transport().sent.len(), 3);
}

#[test]
fn set_dcmi_config_param() {
    let transport = ScriptedTransport::default().reply(0x00, &[0xDC]);
    let mut client = Client::new(transport);

    client
        .set_dcmi_config_param(&(), ActivateDhcp { activate: true })
        .unwrap();
    assert_eq!(
        client.transport().sent[0],
        (IpmiCommand::SetDcmiConfigParams, vec![0xDC, 0x01, 0x00, 0x01])
    );
}
