// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! PWM light output for the RP2350.
//!
//! Implements [`LightOutput`] on one PWM slice:
//! - duty cycle goes to channel A's compare register
//! - enable/disable starts and stops the slice counter
//!
//! # Hardware Interface
//!
//! - PWM: PWM_SLICE0 channel A (GPIO 0), driving the dimmer stage
//!
//! # Examples
//!
//! ```ignore
//! let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, pwm_output::pwm_config());
//! let mut output = PwmLightOutput::new(pwm);
//! output.set_duty_cycle(32768);
//! output.set_output_enabled(true);
//! ```

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use ir_light::config::{PWM_CLOCK_DIVIDER, PWM_TOP};
use ir_light::output::LightOutput;

/// Builds the slice configuration used at boot.
///
/// 16-bit resolution, clock divided by 4, compare at 0 and the slice
/// disabled so the light stays dark until the first "on" command.
pub fn pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = PWM_TOP;
    config.compare_a = 0;
    config.divider = PWM_CLOCK_DIVIDER.into();
    config.enable = false;
    config
}

/// Dimmer output on a single PWM slice.
///
/// Keeps a copy of the slice configuration so that duty and enable can be
/// changed independently.
pub struct PwmLightOutput {
    /// PWM slice driving the light
    pwm: Pwm<'static>,
    /// Configuration last written to the slice
    config: PwmConfig,
}

impl PwmLightOutput {
    /// Creates a new light output.
    ///
    /// # Arguments
    ///
    /// * `pwm` - Slice created with [`pwm_config`]
    pub fn new(pwm: Pwm<'static>) -> Self {
        Self {
            pwm,
            config: pwm_config(),
        }
    }
}

impl LightOutput for PwmLightOutput {
    fn set_duty_cycle(&mut self, level: u16) {
        self.config.compare_a = level;
        self.pwm.set_config(&self.config);
    }

    fn set_output_enabled(&mut self, enabled: bool) {
        self.config.enable = enabled;
        self.pwm.set_config(&self.config);
    }
}
