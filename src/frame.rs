// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! NEC frame integrity check.
//!
//! A raw capture is a 32-bit word whose four bytes, least significant first,
//! carry the address, the inverted address, the data and the inverted data:
//!
//! ```text
//!  31      24 23      16 15       8 7        0
//! [ ~data   ][  data   ][ ~address][ address ]
//! ```
//!
//! The complement check catches most transmission corruption. It is not a
//! cryptographic check: a corruption that keeps both halves complementary
//! still passes.

use crate::error::{Error, Result};

/// Raw 32-bit word assembled by the capture hardware for one transmission.
pub type RawFrame = u32;

/// Address and data bytes of a frame that passed [`validate`].
///
/// Only [`validate`] can build this type, so holding one means the
/// complement check has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecodedCommand {
    address: u8,
    data: u8,
}

impl DecodedCommand {
    /// Address byte (byte 0 of the frame).
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Data byte (byte 2 of the frame).
    pub fn data(&self) -> u8 {
        self.data
    }
}

/// Extracts byte `index` (0 = least significant) from a frame.
#[inline]
fn byte(frame: RawFrame, index: u32) -> u8 {
    ((frame >> (index * 8)) & 0xFF) as u8
}

/// Validates a raw frame and extracts its address and data.
///
/// # Arguments
///
/// * `frame` - Raw 32-bit capture
///
/// # Returns
///
/// * `Ok(DecodedCommand)` - Both bytes matched their inverted copies
/// * `Err(Error::InvalidFrame)` - Either complement check failed
///
/// # Examples
///
/// ```
/// use ir_light::frame::validate;
///
/// let decoded = validate(0xfb04_fb04).unwrap();
/// assert_eq!(decoded.address(), 0x04);
/// assert_eq!(decoded.data(), 0x04);
///
/// assert!(validate(0xfb04_ef00).is_err());
/// ```
pub fn validate(frame: RawFrame) -> Result<DecodedCommand> {
    let address = byte(frame, 0);
    let inverted_address = byte(frame, 1);
    let data = byte(frame, 2);
    let inverted_data = byte(frame, 3);

    if inverted_address != address ^ 0xFF || inverted_data != data ^ 0xFF {
        return Err(Error::InvalidFrame(frame));
    }

    Ok(DecodedCommand { address, data })
}
