//! Selector-tagged parameters.
//!
//! Boot option parameters and DCMI configuration parameters share one wire
//! slot whose layout depends on a selector carried next to it in the
//! surrounding request. Each layout is its own type implementing
//! [Parameter], and the closed set of layouts for a selector family is a
//! union enum ([BootOptionParameter], [DcmiConfigParameter]) whose selector
//! is derived from the active arm. A request therefore cannot carry a
//! selector that disagrees with its payload.
//!
//! Decoding runs the other way: the caller names the arm (by type, or by
//! selector for the union) and only that arm's bytes are read. Bytes past the
//! arm's width are vendor data and are ignored.

use std::fmt;

use crate::errors::DecodeError;
use crate::packing::check_len;

pub mod boot;
pub use boot::{BootOptionParameter, BootOptionParameterSelector};

pub mod dcmi;
pub use dcmi::{DcmiConfig, DcmiConfigParamSelector, DcmiConfigParameter};

/// A discriminant that picks one parameter layout
pub trait Selector: Copy + Eq + fmt::Debug {
    /// The selector's number on the wire
    fn value(self) -> u8;

    /// The parameter's name, for diagnostics
    fn name(self) -> &'static str;
}

/// One arm of a selector-tagged parameter union
pub trait Parameter: Sized {
    type Selector: Selector;

    /// The selector this layout belongs to
    const SELECTOR: Self::Selector;

    /// Width of the fixed part of the layout
    const MIN_LEN: usize;

    /// Packs the parameter data, without the selector
    fn pack(&self) -> Vec<u8>;

    /// Unpacks the parameter data. `data` is at least [Parameter::MIN_LEN] bytes.
    fn unpack(data: &[u8]) -> Result<Self, DecodeError>;

    /// Checks the length, then unpacks.
    fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        check_len(data, Self::MIN_LEN)?;
        Self::unpack(data)
    }

    /// Like [Parameter::decode], but a failure names the selector.
    fn decode_for_selector(data: &[u8]) -> Result<Self, DecodeError> {
        Self::decode(data).map_err(|e| wrap_parameter_error(Self::SELECTOR, e))
    }
}

/// Wraps `source` with the name and number of `selector`
pub fn wrap_parameter_error<S: Selector>(selector: S, source: DecodeError) -> DecodeError {
    DecodeError::Parameter {
        name: selector.name(),
        selector: selector.value(),
        source: Box::new(source),
    }
}
