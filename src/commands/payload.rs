//! Implements the Get Payload Activation Status command
use bitflags::bitflags;

use super::{Command, Response};
use crate::errors::DecodeError;
use crate::packing::{check_len, is_bit_set, unpack_u8};
use crate::protocol::{IpmiCommand, PayloadType};

/// Asks which instances of a payload type are active
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GetPayloadActivationStatus(pub PayloadType);

impl Command for GetPayloadActivationStatus {
    type Response = GetPayloadActivationStatusResponse;
    const COMMAND: IpmiCommand = IpmiCommand::GetPayloadActivationStatus;

    fn encode_request(&self) -> Vec<u8> {
        vec![self.0.to_u8()]
    }
}

bitflags! {
    /// Activated payload instances
    ///
    /// Instance 1 is bit 0 of the first status byte and instance 16 bit 7 of
    /// the second, so the two bytes read as one little endian u16.
    pub struct ActivatedInstances: u16 {
        const INSTANCE_1 = 1 << 0;
        const INSTANCE_2 = 1 << 1;
        const INSTANCE_3 = 1 << 2;
        const INSTANCE_4 = 1 << 3;
        const INSTANCE_5 = 1 << 4;
        const INSTANCE_6 = 1 << 5;
        const INSTANCE_7 = 1 << 6;
        const INSTANCE_8 = 1 << 7;
        const INSTANCE_9 = 1 << 8;
        const INSTANCE_10 = 1 << 9;
        const INSTANCE_11 = 1 << 10;
        const INSTANCE_12 = 1 << 11;
        const INSTANCE_13 = 1 << 12;
        const INSTANCE_14 = 1 << 13;
        const INSTANCE_15 = 1 << 14;
        const INSTANCE_16 = 1 << 15;
    }
}

impl ActivatedInstances {
    /// Builds the set from the two status bytes, bit by bit in ascending instance order
    pub fn from_status_bytes(low: u8, high: u8) -> Self {
        let mut instances = ActivatedInstances::empty();
        for (i, byte) in [low, high].into_iter().enumerate() {
            for bit in 0..8u8 {
                if is_bit_set(byte, bit) {
                    instances |= ActivatedInstances::from_bits_truncate(1 << (i * 8 + bit as usize));
                }
            }
        }
        instances
    }

    /// Whether 1-based `instance` is activated. Out of range instances are not.
    pub fn is_activated(&self, instance: u8) -> bool {
        match instance {
            1..=16 => self.bits() & (1 << (instance - 1)) != 0,
            _ => false,
        }
    }
}

/// Activation status of one payload type
///
/// # Members
///
/// * `payload_type` - The payload type that was asked about. The response bytes
///   don't carry it, so it is `None` until [crate::client::Client] fills it in.
/// * `instance_capacity` - How many instances can be active at once, 1-based
/// * `activated` - Which instances are active right now
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GetPayloadActivationStatusResponse {
    pub payload_type: Option<PayloadType>,
    pub instance_capacity: u8,
    pub activated: ActivatedInstances,
}

impl Response for GetPayloadActivationStatusResponse {
    fn decode_response_payload(payload: &[u8]) -> Result<Self, DecodeError> {
        check_len(payload, 3)?;

        // The controller reports capacity 0-based
        let instance_capacity = (unpack_u8(payload, 0)? & 0x0F) + 1;
        let activated =
            ActivatedInstances::from_status_bytes(unpack_u8(payload, 1)?, unpack_u8(payload, 2)?);

        Ok(GetPayloadActivationStatusResponse {
            payload_type: None,
            instance_capacity,
            activated,
        })
    }
}
