// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Light command definitions and IR remote frame mappings.
//!
//! This module defines the command set for the light and maps each button of
//! the dimmer remote to one of them.
//!
//! # IR Remote Button Layout
//!
//! ```text
//!   [ ON ]  0xFC03EF00     [ OFF ]  0xFD02EF00
//!   [ +  ]  0xFF00EF00     [  -  ]  0xFE01EF00
//!
//!   Presets:
//!   [100%] 0xFB04EF00   [ 50%] 0xFA05EF00
//!   [ 90%] 0xF708EF00   [ 40%] 0xF609EF00
//!   [ 80%] 0xF30CEF00   [ 30%] 0xF20DEF00
//!   [ 70%] 0xEF10EF00   [ 20%] 0xEE11EF00
//!   [ 60%] 0xEB14EF00   [ 10%] 0xEA15EF00
//! ```
//!
//! # Matching
//!
//! Buttons are matched on the full 32-bit frame. The remote reuses its
//! address bytes across buttons, so the address is not a usable opcode and
//! the table cannot be derived from the decoded `(address, data)` pair.

use crate::frame::RawFrame;

/// Brightness preset carried by a [`Command::SetPercent`].
///
/// Only the multiples of ten from 10 to 100 are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Percent(u8);

impl Percent {
    /// Every preset on the remote, lowest first.
    pub const ALL: [Percent; 10] = [
        Percent(10),
        Percent(20),
        Percent(30),
        Percent(40),
        Percent(50),
        Percent(60),
        Percent(70),
        Percent(80),
        Percent(90),
        Percent(100),
    ];

    /// Creates a preset from a percentage.
    ///
    /// # Returns
    ///
    /// * `Some(percent)` - For 10, 20, ... 100
    /// * `None` - For any other value
    ///
    /// # Examples
    ///
    /// ```
    /// use ir_light::command::Percent;
    ///
    /// assert_eq!(Percent::new(30).map(|p| p.get()), Some(30));
    /// assert_eq!(Percent::new(35), None);
    /// assert_eq!(Percent::new(0), None);
    /// ```
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 10 && value <= 100 && value % 10 == 0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the percentage value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Light control commands.
///
/// Produced by [`Command::from_frame`]; every raw frame maps to exactly one
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Enable the output at the current brightness
    TurnOn,
    /// Disable the output, keeping the brightness
    TurnOff,
    /// Raise brightness by one percent
    BrightnessUp,
    /// Lower brightness by one percent
    BrightnessDown,
    /// Jump to a brightness preset
    SetPercent(Percent),
    /// Frame with no button assigned
    Unknown(RawFrame),
}

const TURN_ON_FRAME: RawFrame = 0xfc03_ef00;
const TURN_OFF_FRAME: RawFrame = 0xfd02_ef00;
const BRIGHTNESS_UP_FRAME: RawFrame = 0xff00_ef00;
const BRIGHTNESS_DOWN_FRAME: RawFrame = 0xfe01_ef00;

/// Preset frames paired with their percentage, highest first.
const PRESET_FRAMES: [(RawFrame, u8); 10] = [
    (0xfb04_ef00, 100),
    (0xf708_ef00, 90),
    (0xf30c_ef00, 80),
    (0xef10_ef00, 70),
    (0xeb14_ef00, 60),
    (0xfa05_ef00, 50),
    (0xf609_ef00, 40),
    (0xf20d_ef00, 30),
    (0xee11_ef00, 20),
    (0xea15_ef00, 10),
];

impl Command {
    /// Converts a raw IR frame to a light command.
    ///
    /// Frames that belong to no button map to `Command::Unknown` carrying
    /// the frame, so the caller can report it.
    ///
    /// # Arguments
    ///
    /// * `frame` - Literal 32-bit frame from the capture hardware
    ///
    /// # Examples
    ///
    /// ```
    /// use ir_light::command::{Command, Percent};
    ///
    /// assert_eq!(Command::from_frame(0xfc03ef00), Command::TurnOn);
    /// assert_eq!(
    ///     Command::from_frame(0xfa05ef00),
    ///     Command::SetPercent(Percent::new(50).unwrap())
    /// );
    /// assert_eq!(Command::from_frame(0xdeadbeef), Command::Unknown(0xdeadbeef));
    /// ```
    pub fn from_frame(frame: RawFrame) -> Self {
        match frame {
            TURN_ON_FRAME => Command::TurnOn,
            TURN_OFF_FRAME => Command::TurnOff,
            BRIGHTNESS_UP_FRAME => Command::BrightnessUp,
            BRIGHTNESS_DOWN_FRAME => Command::BrightnessDown,
            _ => PRESET_FRAMES
                .iter()
                .find(|(preset, _)| *preset == frame)
                .map(|&(_, percent)| Command::SetPercent(Percent(percent)))
                .unwrap_or(Command::Unknown(frame)),
        }
    }

    /// Returns the IR frame for this command.
    ///
    /// `Command::Unknown` gives back the frame it was created from.
    ///
    /// # Examples
    ///
    /// ```
    /// use ir_light::command::Command;
    ///
    /// assert_eq!(Command::TurnOff.to_frame(), 0xfd02ef00);
    /// ```
    pub fn to_frame(&self) -> RawFrame {
        match *self {
            Command::TurnOn => TURN_ON_FRAME,
            Command::TurnOff => TURN_OFF_FRAME,
            Command::BrightnessUp => BRIGHTNESS_UP_FRAME,
            Command::BrightnessDown => BRIGHTNESS_DOWN_FRAME,
            Command::SetPercent(percent) => PRESET_FRAMES
                .iter()
                .find(|(_, value)| *value == percent.get())
                .map(|&(frame, _)| frame)
                .unwrap_or(0),
            Command::Unknown(frame) => frame,
        }
    }

    /// Returns `true` if a button on the remote produces this command.
    pub fn is_known(&self) -> bool {
        !matches!(self, Command::Unknown(_))
    }
}
