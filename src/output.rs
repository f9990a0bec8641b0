// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Output capability driven by the light controller.
//!
//! The controller never touches registers itself. The firmware implements
//! [`LightOutput`] on a PWM slice; tests use a recording double.

/// Dimmer hardware seen by the controller.
///
/// Both calls are synchronous and assumed infallible. A missing or broken
/// peripheral is the implementor's concern.
pub trait LightOutput {
    /// Writes the PWM compare value (0 = dark, 65535 = full).
    fn set_duty_cycle(&mut self, level: u16);

    /// Enables or disables the output stage.
    fn set_output_enabled(&mut self, enabled: bool);
}
