// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! IR remote light dimmer core.
//!
//! Turns NEC infrared frames from a dimmer remote into on/off and brightness
//! changes of a PWM-driven light.
//!
//! # Data Flow
//!
//! ```text
//! IR edges -> PulseDecoder -> FrameQueue -> Dispatcher
//!                                             |- frame::validate
//!                                             |- Command::from_frame
//!                                             '- LightController -> LightOutput
//! ```
//!
//! The crate is `no_std` and hardware-free; the RP2350 firmware in
//! `src/main.rs` supplies the capture task and the PWM output. Enable the
//! `defmt` feature for logging.

#![cfg_attr(not(test), no_std)]

pub mod capture;
pub mod command;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod frame;
pub mod output;

pub use error::{Error, Result};
