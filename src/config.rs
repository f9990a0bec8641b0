// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Hardware configuration and tuning constants for the RP2350 dimmer.
//!
//! This module defines:
//! - GPIO pin assignments
//! - PWM configuration parameters
//! - Brightness model limits
//! - Frame queue and polling cadence
//! - NEC pulse timing windows
//!
//! # Pin Mapping Summary
//!
//! - **Light PWM**: GPIO 0 (PWM_SLICE0 Channel A)
//! - **IR Receiver**: GPIO 1 (no pull, the receiver module drives the line)
//! - **Status LED**: GPIO 25 (onboard LED)
//!
//! # PWM Configuration
//!
//! - **Resolution**: 16-bit (0-65535)
//! - **Clock divider**: 4 (counter runs at sysclk / 4)
//! - **Initial state**: disabled, so the light stays dark after boot

/// GPIO pin number for the light PWM output
pub const LIGHT_PWM_PIN: u8 = 0;

/// GPIO pin number for the IR receiver data output
pub const IR_RECEIVER_PIN: u8 = 1;

/// GPIO pin number for the status LED (onboard LED on RP2350)
pub const STATUS_LED_PIN: u8 = 25;

/// PWM top value for 16-bit resolution (maximum duty cycle)
pub const PWM_TOP: u16 = 65535;

/// PWM counter clock divider
pub const PWM_CLOCK_DIVIDER: u8 = 4;

/// Full-scale multiplier used to turn a percentage into a duty cycle
pub const LEVEL_MULTIPLIER: u32 = 65536;

/// Lowest brightness step; the light is dim but never off
pub const MIN_STEP: u8 = 1;

/// Highest brightness step
pub const MAX_STEP: u8 = 100;

/// Brightness applied at boot so the first "on" press lights up
pub const DEFAULT_STEP: u8 = 10;

/// Frames buffered between the capture task and the dispatcher
pub const FRAME_QUEUE_DEPTH: usize = 8;

/// Dispatcher sleep between queue drains
pub const POLL_INTERVAL_MS: u64 = 500;

/// Edges closer together than this are treated as noise (µs)
pub const GLITCH_US: u32 = 120;

/// Accepted leader mark width, nominally 9 ms (µs)
pub const LEADER_MARK_US: (u32, u32) = (8_000, 10_000);

/// Accepted leader space width, nominally 4.5 ms (µs)
pub const LEADER_SPACE_US: (u32, u32) = (3_500, 5_000);

/// Accepted bit mark width, nominally 560 µs (µs)
pub const BIT_MARK_US: (u32, u32) = (360, 760);

/// Accepted space for a logical '0', nominally 560 µs (µs)
pub const ZERO_SPACE_US: (u32, u32) = (200, 1_200);

/// Accepted space for a logical '1', nominally 1.69 ms (µs)
pub const ONE_SPACE_US: (u32, u32) = (1_201, 2_500);
