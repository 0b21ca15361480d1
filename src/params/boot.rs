//! Boot option parameters (IPMI v2.0 table 28-14).
use bitflags::bitflags;

use super::{wrap_parameter_error, Parameter, Selector};
use crate::errors::DecodeError;
use crate::packing::{
    is_bit_set, pack_bytes, pack_u32_le, pack_u8, unpack_bytes, unpack_u32_le, unpack_u8,
    with_bit,
};

/// Selects which boot option parameter a request or response carries.
///
/// Occupies bits 6:0 of the first request byte, so every value is below 0x80.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootOptionParameterSelector {
    SetInProgress = 0,
    ServicePartitionSelector = 1,
    ServicePartitionScan = 2,
    BmcBootFlagValidBitClearing = 3,
    BootInfoAcknowledge = 4,
    BootFlags = 5,
    BootInitiatorInfo = 6,
    BootInitiatorMailbox = 7,
}

impl BootOptionParameterSelector {
    pub fn from_u8(v: u8) -> Result<Self, DecodeError> {
        Ok(match v {
            0 => Self::SetInProgress,
            1 => Self::ServicePartitionSelector,
            2 => Self::ServicePartitionScan,
            3 => Self::BmcBootFlagValidBitClearing,
            4 => Self::BootInfoAcknowledge,
            5 => Self::BootFlags,
            6 => Self::BootInitiatorInfo,
            7 => Self::BootInitiatorMailbox,
            value => {
                return Err(DecodeError::UnknownSelector {
                    kind: "boot option parameter",
                    value,
                })
            }
        })
    }
}

impl Selector for BootOptionParameterSelector {
    fn value(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Self::SetInProgress => "Set In Progress",
            Self::ServicePartitionSelector => "Service Partition Selector",
            Self::ServicePartitionScan => "Service Partition Scan",
            Self::BmcBootFlagValidBitClearing => "BMC Boot Flag Valid Bit Clearing",
            Self::BootInfoAcknowledge => "Boot Info Acknowledge",
            Self::BootFlags => "Boot Flags",
            Self::BootInitiatorInfo => "Boot Initiator Info",
            Self::BootInitiatorMailbox => "Boot Initiator Mailbox",
        }
    }
}

/// State of the set-in-progress handshake (parameter 0, bits 1:0)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SetInProgressState {
    #[default]
    SetComplete,
    SetInProgress,
    CommitWrite,
    Reserved,
}

/// Parameter 0: claims the boot option parameters while a set is underway
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SetInProgress {
    pub state: SetInProgressState,
}

impl Parameter for SetInProgress {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::SetInProgress;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        let b = match self.state {
            SetInProgressState::SetComplete => 0,
            SetInProgressState::SetInProgress => 1,
            SetInProgressState::CommitWrite => 2,
            SetInProgressState::Reserved => 3,
        };
        vec![b]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        let state = match unpack_u8(data, 0)? & 0x03 {
            0 => SetInProgressState::SetComplete,
            1 => SetInProgressState::SetInProgress,
            2 => SetInProgressState::CommitWrite,
            _ => SetInProgressState::Reserved,
        };
        Ok(SetInProgress { state })
    }
}

/// Parameter 1: which service partition the BIOS should boot
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ServicePartitionSelector {
    /// 0 means unspecified
    pub selector: u8,
}

impl Parameter for ServicePartitionSelector {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::ServicePartitionSelector;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        vec![self.selector]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(ServicePartitionSelector {
            selector: unpack_u8(data, 0)?,
        })
    }
}

/// Parameter 2
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ServicePartitionScan {
    /// Bit 1 - ask the BIOS to scan for the service partition
    pub request_bios_scan: bool,
    /// Bit 0 - the BIOS found a service partition
    pub service_partition_discovered: bool,
}

impl Parameter for ServicePartitionScan {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::ServicePartitionScan;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        let mut b = with_bit(0, 1, self.request_bios_scan);
        b = with_bit(b, 0, self.service_partition_discovered);
        vec![b]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        let b = unpack_u8(data, 0)?;
        Ok(ServicePartitionScan {
            request_bios_scan: is_bit_set(b, 1),
            service_partition_discovered: is_bit_set(b, 0),
        })
    }
}

bitflags! {
    /// Parameter 3: events on which the controller keeps the boot flags valid bit
    pub struct BootFlagValidBitClearing: u8 {
        /// Bit 4 - reset or power cycle caused by PEF
        const DONT_CLEAR_ON_PEF = 1 << 4;
        /// Bit 3 - no chassis control command within the 60 second window
        const DONT_CLEAR_ON_COMMAND_TIMEOUT = 1 << 3;
        /// Bit 2 - reset or power cycle caused by watchdog timeout
        const DONT_CLEAR_ON_WATCHDOG = 1 << 2;
        /// Bit 1 - pushbutton reset or soft reset
        const DONT_CLEAR_ON_RESET_BUTTON = 1 << 1;
        /// Bit 0 - power up via power pushbutton or wake event
        const DONT_CLEAR_ON_POWER_BUTTON = 1 << 0;
    }

    /// The parties of the boot info acknowledge parameter
    pub struct BootInfoParties: u8 {
        const OEM = 1 << 4;
        const SMS = 1 << 3;
        const OS_SERVICE_PARTITION = 1 << 2;
        const OS_LOADER = 1 << 1;
        const BIOS_POST = 1 << 0;
    }
}

impl Parameter for BootFlagValidBitClearing {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::BmcBootFlagValidBitClearing;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        vec![self.bits()]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self::from_bits_truncate(unpack_u8(data, 0)?))
    }
}

/// Parameter 4: which parties have handled the boot info
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BootInfoAcknowledge {
    /// Only the parties set here are written
    pub write_mask: BootInfoParties,
    /// A set bit means the party has handled the boot info
    pub handled: BootInfoParties,
}

impl Parameter for BootInfoAcknowledge {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::BootInfoAcknowledge;
    const MIN_LEN: usize = 2;

    fn pack(&self) -> Vec<u8> {
        vec![self.write_mask.bits(), self.handled.bits()]
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(BootInfoAcknowledge {
            write_mask: BootInfoParties::from_bits_truncate(unpack_u8(data, 0)?),
            handled: BootInfoParties::from_bits_truncate(unpack_u8(data, 1)?),
        })
    }
}

/// Which firmware interface the BIOS should boot through
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BiosBootType {
    /// PC compatible (legacy) boot
    #[default]
    Legacy,
    /// Extensible Firmware Interface boot
    Efi,
}

/// The device the BIOS is forced to boot from (boot flags data 2, bits 5:2)
///
/// # Variants
/// * [BootDeviceSelector::Other] - Any reserved selector. Only its low four bits go on the wire.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BootDeviceSelector {
    #[default]
    NoOverride,
    ForcePxe,
    ForceHardDrive,
    ForceHardDriveSafeMode,
    ForceDiagnosticPartition,
    ForceCdrom,
    ForceBiosSetup,
    ForceRemoteFloppy,
    ForceRemoteCdrom,
    ForceRemoteMedia,
    ForceRemoteHardDrive,
    ForceFloppy,
    Other(u8),
}

impl BootDeviceSelector {
    /// Converts the four bit field value to a [BootDeviceSelector]
    pub fn from_u8(v: u8) -> Self {
        match v {
            0x0 => Self::NoOverride,
            0x1 => Self::ForcePxe,
            0x2 => Self::ForceHardDrive,
            0x3 => Self::ForceHardDriveSafeMode,
            0x4 => Self::ForceDiagnosticPartition,
            0x5 => Self::ForceCdrom,
            0x6 => Self::ForceBiosSetup,
            0x7 => Self::ForceRemoteFloppy,
            0x8 => Self::ForceRemoteCdrom,
            0x9 => Self::ForceRemoteMedia,
            0xB => Self::ForceRemoteHardDrive,
            0xF => Self::ForceFloppy,
            a => Self::Other(a),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::NoOverride => 0x0,
            Self::ForcePxe => 0x1,
            Self::ForceHardDrive => 0x2,
            Self::ForceHardDriveSafeMode => 0x3,
            Self::ForceDiagnosticPartition => 0x4,
            Self::ForceCdrom => 0x5,
            Self::ForceBiosSetup => 0x6,
            Self::ForceRemoteFloppy => 0x7,
            Self::ForceRemoteCdrom => 0x8,
            Self::ForceRemoteMedia => 0x9,
            Self::ForceRemoteHardDrive => 0xB,
            Self::ForceFloppy => 0xF,
            Self::Other(a) => a & 0x0F,
        }
    }
}

/// BIOS verbosity (boot flags data 3, bits 6:5)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FirmwareVerbosity {
    #[default]
    Default,
    Quiet,
    Verbose,
    Reserved,
}

/// Console redirection control (boot flags data 3, bits 1:0)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ConsoleRedirection {
    /// Use the BIOS setting
    #[default]
    Default,
    Suppress,
    Enable,
    Reserved,
}

fn two_bits(v: u8) -> u8 {
    v & 0x03
}

impl FirmwareVerbosity {
    fn from_bits(v: u8) -> Self {
        match two_bits(v) {
            0 => Self::Default,
            1 => Self::Quiet,
            2 => Self::Verbose,
            _ => Self::Reserved,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Quiet => 1,
            Self::Verbose => 2,
            Self::Reserved => 3,
        }
    }
}

impl ConsoleRedirection {
    fn from_bits(v: u8) -> Self {
        match two_bits(v) {
            0 => Self::Default,
            1 => Self::Suppress,
            2 => Self::Enable,
            _ => Self::Reserved,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Self::Default => 0,
            Self::Suppress => 1,
            Self::Enable => 2,
            Self::Reserved => 3,
        }
    }
}

/// Parameter 5: the flags the BIOS reads on its next boot.
///
/// The controller clears `boot_flags_valid` on its own if no chassis control
/// command follows within
/// [crate::protocol::BOOT_FLAGS_VALID_TIMEOUT_SECS] seconds, or on any reset
/// it did not command. [BootFlags::boot_device] builds the common case.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BootFlags {
    pub boot_flags_valid: bool,
    /// false applies to the next boot only, true to all future boots
    pub persist: bool,
    pub bios_boot_type: BiosBootType,

    pub cmos_clear: bool,
    pub lock_keyboard: bool,
    pub boot_device_selector: BootDeviceSelector,
    pub screen_blank: bool,
    pub lock_out_reset_button: bool,

    pub lock_out_power_button: bool,
    pub firmware_verbosity: FirmwareVerbosity,
    pub force_progress_event_traps: bool,
    pub user_password_bypass: bool,
    pub lock_out_sleep_button: bool,
    pub console_redirection: ConsoleRedirection,

    pub bios_shared_mode_override: bool,
    /// 3 bits
    pub bios_mux_control_override: u8,

    /// 5 bits
    pub device_instance_selector: u8,
}

impl BootFlags {
    /// Boot flags that force `device` for the next boot (or every boot, with
    /// `persist`). The valid bit is always set.
    pub fn boot_device(device: BootDeviceSelector, boot_type: BiosBootType, persist: bool) -> Self {
        BootFlags {
            boot_flags_valid: true,
            persist,
            bios_boot_type: boot_type,
            boot_device_selector: device,
            ..Default::default()
        }
    }
}

impl Parameter for BootFlags {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::BootFlags;
    const MIN_LEN: usize = 5;

    fn pack(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::MIN_LEN];

        let mut b1 = with_bit(0, 7, self.boot_flags_valid);
        b1 = with_bit(b1, 6, self.persist);
        b1 = with_bit(b1, 5, self.bios_boot_type == BiosBootType::Efi);
        pack_u8(b1, &mut out, 0);

        let mut b2 = with_bit(0, 7, self.cmos_clear);
        b2 = with_bit(b2, 6, self.lock_keyboard);
        b2 |= self.boot_device_selector.to_u8() << 2;
        b2 = with_bit(b2, 1, self.screen_blank);
        b2 = with_bit(b2, 0, self.lock_out_reset_button);
        pack_u8(b2, &mut out, 1);

        let mut b3 = with_bit(0, 7, self.lock_out_power_button);
        b3 |= self.firmware_verbosity.bits() << 5;
        b3 = with_bit(b3, 4, self.force_progress_event_traps);
        b3 = with_bit(b3, 3, self.user_password_bypass);
        b3 = with_bit(b3, 2, self.lock_out_sleep_button);
        b3 |= self.console_redirection.bits();
        pack_u8(b3, &mut out, 2);

        let b4 = with_bit(self.bios_mux_control_override & 0x07, 3, self.bios_shared_mode_override);
        pack_u8(b4, &mut out, 3);

        pack_u8(self.device_instance_selector & 0x1F, &mut out, 4);

        out
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        let b1 = unpack_u8(data, 0)?;
        let b2 = unpack_u8(data, 1)?;
        let b3 = unpack_u8(data, 2)?;
        let b4 = unpack_u8(data, 3)?;
        let b5 = unpack_u8(data, 4)?;

        Ok(BootFlags {
            boot_flags_valid: is_bit_set(b1, 7),
            persist: is_bit_set(b1, 6),
            bios_boot_type: if is_bit_set(b1, 5) {
                BiosBootType::Efi
            } else {
                BiosBootType::Legacy
            },

            cmos_clear: is_bit_set(b2, 7),
            lock_keyboard: is_bit_set(b2, 6),
            boot_device_selector: BootDeviceSelector::from_u8((b2 >> 2) & 0x0F),
            screen_blank: is_bit_set(b2, 1),
            lock_out_reset_button: is_bit_set(b2, 0),

            lock_out_power_button: is_bit_set(b3, 7),
            firmware_verbosity: FirmwareVerbosity::from_bits(b3 >> 5),
            force_progress_event_traps: is_bit_set(b3, 4),
            user_password_bypass: is_bit_set(b3, 3),
            lock_out_sleep_button: is_bit_set(b3, 2),
            console_redirection: ConsoleRedirection::from_bits(b3),

            bios_shared_mode_override: is_bit_set(b4, 3),
            bios_mux_control_override: b4 & 0x07,

            device_instance_selector: b5 & 0x1F,
        })
    }
}

/// Parameter 6: who last asked for the boot
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BootInitiatorInfo {
    /// 4 bits
    pub channel_number: u8,
    pub session_id: u32,
    /// Seconds since 1970-01-01 as kept by the controller
    pub timestamp: u32,
}

impl Parameter for BootInitiatorInfo {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::BootInitiatorInfo;
    const MIN_LEN: usize = 9;

    fn pack(&self) -> Vec<u8> {
        let mut out = vec![0u8; Self::MIN_LEN];
        pack_u8(self.channel_number & 0x0F, &mut out, 0);
        pack_u32_le(self.session_id, &mut out, 1);
        pack_u32_le(self.timestamp, &mut out, 5);
        out
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        Ok(BootInitiatorInfo {
            channel_number: unpack_u8(data, 0)? & 0x0F,
            session_id: unpack_u32_le(data, 1)?,
            timestamp: unpack_u32_le(data, 5)?,
        })
    }
}

/// Parameter 7: one block of the boot initiator mailbox
///
/// Blocks hold at most [BootInitiatorMailbox::BLOCK_SIZE] bytes. Longer data
/// is cut to that size on both pack and unpack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BootInitiatorMailbox {
    pub set_selector: u8,
    pub block_data: Vec<u8>,
}

impl BootInitiatorMailbox {
    pub const BLOCK_SIZE: usize = 16;

    fn block(data: &[u8]) -> &[u8] {
        &data[..data.len().min(Self::BLOCK_SIZE)]
    }
}

impl Parameter for BootInitiatorMailbox {
    type Selector = BootOptionParameterSelector;
    const SELECTOR: Self::Selector = BootOptionParameterSelector::BootInitiatorMailbox;
    const MIN_LEN: usize = 1;

    fn pack(&self) -> Vec<u8> {
        let block = Self::block(&self.block_data);
        let mut out = vec![0u8; 1 + block.len()];
        pack_u8(self.set_selector, &mut out, 0);
        pack_bytes(block, &mut out, 1);
        out
    }

    fn unpack(data: &[u8]) -> Result<Self, DecodeError> {
        let set_selector = unpack_u8(data, 0)?;
        let rest = unpack_bytes(data, 1, data.len().saturating_sub(1))?;
        Ok(BootInitiatorMailbox {
            set_selector,
            block_data: Self::block(rest).to_vec(),
        })
    }
}

/// Every boot option parameter layout, tagged by its selector
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BootOptionParameter {
    SetInProgress(SetInProgress),
    ServicePartitionSelector(ServicePartitionSelector),
    ServicePartitionScan(ServicePartitionScan),
    BmcBootFlagValidBitClearing(BootFlagValidBitClearing),
    BootInfoAcknowledge(BootInfoAcknowledge),
    BootFlags(BootFlags),
    BootInitiatorInfo(BootInitiatorInfo),
    BootInitiatorMailbox(BootInitiatorMailbox),
}

impl BootOptionParameter {
    /// The selector of the active arm
    pub fn selector(&self) -> BootOptionParameterSelector {
        match self {
            Self::SetInProgress(_) => SetInProgress::SELECTOR,
            Self::ServicePartitionSelector(_) => ServicePartitionSelector::SELECTOR,
            Self::ServicePartitionScan(_) => ServicePartitionScan::SELECTOR,
            Self::BmcBootFlagValidBitClearing(_) => BootFlagValidBitClearing::SELECTOR,
            Self::BootInfoAcknowledge(_) => BootInfoAcknowledge::SELECTOR,
            Self::BootFlags(_) => BootFlags::SELECTOR,
            Self::BootInitiatorInfo(_) => BootInitiatorInfo::SELECTOR,
            Self::BootInitiatorMailbox(_) => BootInitiatorMailbox::SELECTOR,
        }
    }

    /// Packs the active arm's parameter data
    pub fn pack(&self) -> Vec<u8> {
        match self {
            Self::SetInProgress(p) => p.pack(),
            Self::ServicePartitionSelector(p) => p.pack(),
            Self::ServicePartitionScan(p) => p.pack(),
            Self::BmcBootFlagValidBitClearing(p) => p.pack(),
            Self::BootInfoAcknowledge(p) => p.pack(),
            Self::BootFlags(p) => p.pack(),
            Self::BootInitiatorInfo(p) => p.pack(),
            Self::BootInitiatorMailbox(p) => p.pack(),
        }
    }

    /// Decodes `data` as the arm named by `selector`
    pub fn decode(selector: BootOptionParameterSelector, data: &[u8]) -> Result<Self, DecodeError> {
        use BootOptionParameterSelector as S;

        let param = match selector {
            S::SetInProgress => SetInProgress::decode(data).map(Self::SetInProgress),
            S::ServicePartitionSelector => {
                ServicePartitionSelector::decode(data).map(Self::ServicePartitionSelector)
            }
            S::ServicePartitionScan => {
                ServicePartitionScan::decode(data).map(Self::ServicePartitionScan)
            }
            S::BmcBootFlagValidBitClearing => {
                BootFlagValidBitClearing::decode(data).map(Self::BmcBootFlagValidBitClearing)
            }
            S::BootInfoAcknowledge => {
                BootInfoAcknowledge::decode(data).map(Self::BootInfoAcknowledge)
            }
            S::BootFlags => BootFlags::decode(data).map(Self::BootFlags),
            S::BootInitiatorInfo => BootInitiatorInfo::decode(data).map(Self::BootInitiatorInfo),
            S::BootInitiatorMailbox => {
                BootInitiatorMailbox::decode(data).map(Self::BootInitiatorMailbox)
            }
        };

        param.map_err(|e| wrap_parameter_error(selector, e))
    }
}

impl From<SetInProgress> for BootOptionParameter {
    fn from(p: SetInProgress) -> Self {
        Self::SetInProgress(p)
    }
}

impl From<ServicePartitionSelector> for BootOptionParameter {
    fn from(p: ServicePartitionSelector) -> Self {
        Self::ServicePartitionSelector(p)
    }
}

impl From<ServicePartitionScan> for BootOptionParameter {
    fn from(p: ServicePartitionScan) -> Self {
        Self::ServicePartitionScan(p)
    }
}

impl From<BootFlagValidBitClearing> for BootOptionParameter {
    fn from(p: BootFlagValidBitClearing) -> Self {
        Self::BmcBootFlagValidBitClearing(p)
    }
}

impl From<BootInfoAcknowledge> for BootOptionParameter {
    fn from(p: BootInfoAcknowledge) -> Self {
        Self::BootInfoAcknowledge(p)
    }
}

impl From<BootFlags> for BootOptionParameter {
    fn from(p: BootFlags) -> Self {
        Self::BootFlags(p)
    }
}

impl From<BootInitiatorInfo> for BootOptionParameter {
    fn from(p: BootInitiatorInfo) -> Self {
        Self::BootInitiatorInfo(p)
    }
}

impl From<BootInitiatorMailbox> for BootOptionParameter {
    fn from(p: BootInitiatorMailbox) -> Self {
        Self::BootInitiatorMailbox(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_device_flags_layout() {
        let flags = BootFlags::boot_device(BootDeviceSelector::ForcePxe, BiosBootType::Efi, true);
        // valid | persist | efi, then PXE (0001b) in bits 5:2
        assert_eq!(flags.pack(), vec![0xE0, 0x04, 0x00, 0x00, 0x00]);

        let flags =
            BootFlags::boot_device(BootDeviceSelector::ForceBiosSetup, BiosBootType::Legacy, false);
        assert_eq!(flags.pack(), vec![0x80, 0x18, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn service_partition_selector_ignores_trailing_bytes() {
        let param = BootOptionParameter::decode(
            BootOptionParameterSelector::ServicePartitionSelector,
            &[0x03, 0xAA, 0xBB],
        )
        .unwrap();
        assert_eq!(
            param,
            BootOptionParameter::ServicePartitionSelector(ServicePartitionSelector { selector: 3 })
        );
        assert_eq!(param.selector().value(), 1);
        assert_eq!(param.pack(), vec![0x03]);
    }

    #[test]
    fn service_partition_scan_bits() {
        let scan = ServicePartitionScan {
            request_bios_scan: true,
            service_partition_discovered: false,
        };
        assert_eq!(scan.pack(), vec![0x02]);
        assert_eq!(ServicePartitionScan::decode(&scan.pack()).unwrap(), scan);

        let scan = ServicePartitionScan::decode(&[0x01]).unwrap();
        assert!(!scan.request_bios_scan);
        assert!(scan.service_partition_discovered);

        // Reserved bits 7:2 are dropped
        let scan = ServicePartitionScan::decode(&[0xFF]).unwrap();
        assert_eq!(scan.pack(), vec![0x03]);
    }

    #[test]
    fn boot_info_acknowledge_mask_then_handled() {
        let ack = BootInfoAcknowledge {
            write_mask: BootInfoParties::all(),
            handled: BootInfoParties::OEM,
        };
        assert_eq!(ack.pack(), vec![0x1F, 0x10]);
        assert_eq!(BootInfoAcknowledge::decode(&ack.pack()).unwrap(), ack);

        let ack = BootInfoAcknowledge::decode(&[0x01, 0xFF]).unwrap();
        assert_eq!(ack.write_mask, BootInfoParties::BIOS_POST);
        assert_eq!(ack.handled, BootInfoParties::all());

        assert!(matches!(
            BootInfoAcknowledge::decode_for_selector(&[0x01]),
            Err(DecodeError::Parameter { selector: 4, .. })
        ));
    }

    #[test]
    fn boot_flags_unpack_every_field() {
        let data = [0b1110_0000, 0b1111_1111, 0b1111_1111, 0b0000_1111, 0b1111_1111];
        let flags = BootFlags::decode(&data).unwrap();

        assert!(flags.boot_flags_valid);
        assert!(flags.persist);
        assert_eq!(flags.bios_boot_type, BiosBootType::Efi);
        assert!(flags.cmos_clear);
        assert!(flags.lock_keyboard);
        assert_eq!(flags.boot_device_selector, BootDeviceSelector::ForceFloppy);
        assert!(flags.screen_blank);
        assert!(flags.lock_out_reset_button);
        assert!(flags.lock_out_power_button);
        assert_eq!(flags.firmware_verbosity, FirmwareVerbosity::Reserved);
        assert!(flags.force_progress_event_traps);
        assert!(flags.user_password_bypass);
        assert!(flags.lock_out_sleep_button);
        assert_eq!(flags.console_redirection, ConsoleRedirection::Reserved);
        assert!(flags.bios_shared_mode_override);
        assert_eq!(flags.bios_mux_control_override, 0x07);
        assert_eq!(flags.device_instance_selector, 0x1F);

        assert_eq!(flags.pack(), vec![0xE0, 0xFF, 0xFF, 0x0F, 0x1F]);
    }

    #[test]
    fn reserved_device_selector_is_kept() {
        let data = [0x80, 0x0A << 2, 0, 0, 0];
        let flags = BootFlags::decode(&data).unwrap();
        assert_eq!(flags.boot_device_selector, BootDeviceSelector::Other(0x0A));
    }

    #[test]
    fn initiator_info_is_little_endian() {
        let info = BootInitiatorInfo {
            channel_number: 0x1,
            session_id: 0x04030201,
            timestamp: 0x0d0c0b0a,
        };
        assert_eq!(info.pack(), vec![0x01, 1, 2, 3, 4, 0x0a, 0x0b, 0x0c, 0x0d]);
        assert_eq!(BootInitiatorInfo::decode(&info.pack()).unwrap(), info);
    }

    #[test]
    fn union_decodes_only_the_named_arm() {
        // Trailing vendor bytes past the arm's width are ignored.
        let param =
            BootOptionParameter::decode(BootOptionParameterSelector::SetInProgress, &[0x01, 0xAA, 0xBB])
                .unwrap();
        assert_eq!(
            param,
            BootOptionParameter::SetInProgress(SetInProgress {
                state: SetInProgressState::SetInProgress
            })
        );
        assert_eq!(param.selector(), BootOptionParameterSelector::SetInProgress);

        let param = BootOptionParameter::decode(
            BootOptionParameterSelector::BmcBootFlagValidBitClearing,
            &[0x0C],
        )
        .unwrap();
        assert_eq!(
            param,
            BootOptionParameter::BmcBootFlagValidBitClearing(
                BootFlagValidBitClearing::DONT_CLEAR_ON_COMMAND_TIMEOUT
                    | BootFlagValidBitClearing::DONT_CLEAR_ON_WATCHDOG
            )
        );
    }

    #[test]
    fn short_arm_names_the_selector() {
        let err = BootOptionParameter::decode(BootOptionParameterSelector::BootFlags, &[0x80, 0x04])
            .unwrap_err();
        match err {
            DecodeError::Parameter {
                name,
                selector,
                source,
            } => {
                assert_eq!(name, "Boot Flags");
                assert_eq!(selector, 5);
                assert!(matches!(
                    *source,
                    DecodeError::TooShort {
                        actual: 2,
                        required: 5
                    }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn mailbox_takes_the_remaining_bytes() {
        let mailbox = BootInitiatorMailbox::decode(&[0x02, 0xde, 0xad]).unwrap();
        assert_eq!(mailbox.set_selector, 0x02);
        assert_eq!(mailbox.block_data, vec![0xde, 0xad]);
        assert_eq!(mailbox.pack(), vec![0x02, 0xde, 0xad]);
    }

    #[test]
    fn mailbox_block_is_capped() {
        let mailbox = BootInitiatorMailbox {
            set_selector: 1,
            block_data: (0..20).collect(),
        };
        let packed = mailbox.pack();
        assert_eq!(packed.len(), 1 + BootInitiatorMailbox::BLOCK_SIZE);
        assert_eq!(packed[16], 15);

        let mut wire = vec![0x01];
        wire.extend(0..20u8);
        let decoded = BootInitiatorMailbox::decode(&wire).unwrap();
        assert_eq!(decoded.block_data, (0..16).collect::<Vec<u8>>());
        assert_eq!(BootInitiatorMailbox::decode(&decoded.pack()).unwrap(), decoded);
    }

    #[test]
    fn unknown_selector_number() {
        assert!(matches!(
            BootOptionParameterSelector::from_u8(0x60),
            Err(DecodeError::UnknownSelector { value: 0x60, .. })
        ));
        assert_eq!(
            BootOptionParameterSelector::from_u8(5).unwrap(),
            BootOptionParameterSelector::BootFlags
        );
    }
}
