//! DCMI configuration parameters (DCMI v1.5, Get/Set DCMI Configuration Parameters).
use super::{wrap_parameter_error, Parameter, Selector};
use crate::errors::DecodeError;
use crate::packing::{is_bit_set, pack_u16_le, unpack_u16_le, unpack_u8, with_bit};

/// Selects which DCMI configuration parameter a request carries
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcmiConfigParamSelector {
    ActivateDhcp = 0x01,
    DiscoveryConfiguration = 0x02,
    DhcpTiming1 = 0x03,
    DhcpTiming2 = 0x04,
    DhcpTiming3 = 0x05,
}

impl DcmiConfigParamSelector {
    pub fn from_u8(v: u8) -> Result<Self, DecodeError> {
        Ok(match v {
            0x01 => Self::ActivateDhcp,
            0x02 => Self::DiscoveryConfiguration,
            0x03 => Self::DhcpTiming1,
            0x04 => Self::DhcpTiming2,
            0x05 => Self::DhcpTiming3,
            value => {
                return Err(DecodeError::UnknownSelector {
                    kind: "DCMI configuration parameter",
                    value,
                })
            }
        })
    }
}

impl Selector for DcmiConfigParamSelector {
    fn value(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::ActivateDhcp => "Activate DHCP",
            Self::DiscoveryConfiguration => "Discovery Configuration",
            Self::DhcpTiming1 => "DHCP Timing 1",
            Self::DhcpTiming2 => "DHCP Timing 2",
            Self::DhcpTiming3 => "DHCP Timing 3",
        }
    }
}

/// Writing `activate = true` makes the controller (re)start DHCP.
/// Reads always return false.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivateDhcp {
    pub activate: bool,
}

impl Parameter for ActivateDhcp {
    type Selector = DcmiConfigParamSelector;
    const SELECTOR: Self::Selector = DcmiConfigParamSelector::ActivateDhcp;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        vec![with_bit(0, 0, self.activate)]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(ActivateDhcp {
            activate: is_bit_set(unpack_u8(data, 0)?, 0),
        })
    }
}

/// DHCP options the controller uses for discovery
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiscoveryConfiguration {
    /// Bit 7
    pub random_backoff_enabled: bool,
    /// Bit 1 - vendor class identifier and vendor specific information
    pub include_dhcp_option_60_and_43: bool,
    /// Bit 0 - host name
    pub include_dhcp_option_12: bool,
}

impl Parameter for DiscoveryConfiguration {
    type Selector = DcmiConfigParamSelector;
    const SELECTOR: Self::Selector = DcmiConfigParamSelector::DiscoveryConfiguration;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        let mut b = with_bit(0, 7, self.random_backoff_enabled);
        b = with_bit(b, 1, self.include_dhcp_option_60_and_43);
        b = with_bit(b, 0, self.include_dhcp_option_12);
        vec![b]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        let b = unpack_u8(data, 0)?;
        Ok(DiscoveryConfiguration {
            random_backoff_enabled: is_bit_set(b, 7),
            include_dhcp_option_60_and_43: is_bit_set(b, 1),
            include_dhcp_option_12: is_bit_set(b, 0),
        })
    }
}

/// Initial timeout interval, in seconds
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DhcpTiming1 {
    pub initial_timeout_interval: u8,
}

impl Parameter for DhcpTiming1 {
    type Selector = DcmiConfigParamSelector;
    const SELECTOR: Self::Selector = DcmiConfigParamSelector::DhcpTiming1;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        vec![self.initial_timeout_interval]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(DhcpTiming1 {
            initial_timeout_interval: unpack_u8(data, 0)?,
        })
    }
}

/// Server contact timeout interval, in seconds
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DhcpTiming2 {
    pub server_contact_timeout_interval: u8,
}

impl Parameter for DhcpTiming2 {
    type Selector = DcmiConfigParamSelector;
    const SELECTOR: Self::Selector = DcmiConfigParamSelector::DhcpTiming2;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        vec![self.server_contact_timeout_interval]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(DhcpTiming2 {
            server_contact_timeout_interval: unpack_u8(data, 0)?,
        })
    }
}

/// Server contact retry interval, in seconds
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DhcpTiming3 {
    pub server_contact_retry_interval: u16,
}

impl Parameter for DhcpTiming3 {
    type Selector = DcmiConfigParamSelector;
    const SELECTOR: Self::Selector = DcmiConfigParamSelector::DhcpTiming3;
    const MIN_LEN: usize = 2;

    fn pack(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::MIN_LEN];
        pack_u16_le(self.server_contact_retry_interval, &mut out, 0);
        out
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(DhcpTiming3 {
            server_contact_retry_interval: unpack_u16_le(data, 0)?,
        })
    }
}

/// Every DCMI configuration parameter layout, tagged by its selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DcmiConfigParameter {
    ActivateDhcp(ActivateDhcp),
    DiscoveryConfiguration(DiscoveryConfiguration),
    DhcpTiming1(DhcpTiming1),
    DhcpTiming2(DhcpTiming2),
    DhcpTiming3(DhcpTiming3),
}

impl DcmiConfigParameter {
    /// The selector of the active arm
    pub fn selector(&self) -> DcmiConfigParamSelector {
        match self {
            Self::ActivateDhcp(_) => ActivateDhcp::SELECTOR,
            Self::DiscoveryConfiguration(_) => DiscoveryConfiguration::SELECTOR,
            Self::DhcpTiming1(_) => DhcpTiming1::SELECTOR,
            Self::DhcpTiming2(_) => DhcpTiming2::SELECTOR,
            Self::DhcpTiming3(_) => DhcpTiming3::SELECTOR,
        }
    }

    /// Packs the active arm's parameter data
    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::ActivateDhcp(p) => p.pack(),
            Self::DiscoveryConfiguration(p) => p.pack(),
            Self::DhcpTiming1(p) => p.pack(),
            Self::DhcpTiming2(p) => p.pack(),
            Self::DhcpTiming3(p) => p.pack(),
        }
    }

    /// Decodes `data` as the arm named by `selector`
    pub fn decode(selector: DcmiConfigParamSelector, data: &[u8]) -> Result<Self, DecodeError> {
        use DcmiConfigParamSelector as S;

        let param = match selector {
            S::ActivateDhcp => ActivateDhcp::decode(data).map(Self::ActivateDhcp),
            S::DiscoveryConfiguration => {
                DiscoveryConfiguration::decode(data).map(Self::DiscoveryConfiguration)
            }
            S::DhcpTiming1 => DhcpTiming1::decode(data).map(Self::DhcpTiming1),
            S::DhcpTiming2 => DhcpTiming2::decode(data).map(Self::DhcpTiming2),
            S::DhcpTiming3 => DhcpTiming3::decode(data).map(Self::DhcpTiming3),
        };

        param.map_err(|e| wrap_parameter_error(selector, e))
    }
}

impl From<ActivateDhcp> for DcmiConfigParameter {
    fn from(p: ActivateDhcp) -> Self {
        Self::ActivateDhcp(p)
    }
}

impl From<DiscoveryConfiguration> for DcmiConfigParameter {
    fn from(p: DiscoveryConfiguration) -> Self {
        Self::DiscoveryConfiguration(p)
    }
}

impl From<DhcpTiming1> for DcmiConfigParameter {
    fn from(p: DhcpTiming1) -> Self {
        Self::DhcpTiming1(p)
    }
}

impl From<DhcpTiming2> for DcmiConfigParameter {
    fn from(p: DhcpTiming2) -> Self {
        Self::DhcpTiming2(p)
    }
}

impl From<DhcpTiming3> for DcmiConfigParameter {
    fn from(p: DhcpTiming3) -> Self {
        Self::DhcpTiming3(p)
    }
}

/// The DHCP related DCMI configuration, fetched as a whole by
/// [crate::client::Client::get_dcmi_configurations]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DcmiConfig {
    pub activate_dhcp: ActivateDhcp,
    pub discovery_configuration: DiscoveryConfiguration,
    pub dhcp_timing_1: DhcpTiming1,
    pub dhcp_timing_2: DhcpTiming2,
    pub dhcp_timing_3: DhcpTiming3,
}
