// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Error types for frame handling.
//!
//! The taxonomy is intentionally narrow. Neither frame error is fatal: the
//! dispatcher logs it and moves on to the next frame.

use core::fmt;

/// Errors produced while turning a raw IR capture into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The address or data byte did not match its inverted copy.
    InvalidFrame(u32),
    /// The frame passed the integrity gate but no button maps to it.
    UnknownCommand(u32),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Returns the raw frame that caused the error.
    pub fn frame(&self) -> u32 {
        match *self {
            Error::InvalidFrame(frame) | Error::UnknownCommand(frame) => frame,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidFrame(frame) => write!(f, "invalid frame {frame:08x}"),
            Error::UnknownCommand(frame) => write!(f, "unknown command {frame:08x}"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessor() {
        assert_eq!(Error::InvalidFrame(0x1234).frame(), 0x1234);
        assert_eq!(Error::UnknownCommand(0xdeadbeef).frame(), 0xdeadbeef);
    }

    #[test]
    fn test_display_pads_to_eight_digits() {
        assert_eq!(
            Error::UnknownCommand(0xbeef).to_string(),
            "unknown command 0000beef"
        );
    }
}
