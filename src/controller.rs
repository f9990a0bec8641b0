// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Light controller state machine and command execution.
//!
//! This module owns the only long-lived mutable state in the firmware:
//! - On/off state of the output stage
//! - Brightness step (1-100 %)
//! - PWM level derived from the step
//!
//! # Brightness Model
//!
//! The step is the anchor for relative adjustments. Switching the light off
//! only disables the output stage, so switching it back on resumes at the
//! last brightness. The step never drops below 1: the up/down buttons can
//! make the light very dim but cannot turn it off.
//!
//! # Level Rounding
//!
//! `level = round(step * 65536 / 100)` with ties away from zero, saturated at
//! 65535 so that 100 % fits the 16-bit compare register.

use crate::command::{Command, Percent};
use crate::config::{DEFAULT_STEP, LEVEL_MULTIPLIER, MAX_STEP, MIN_STEP, PWM_TOP};
use crate::error::{Error, Result};
use crate::output::LightOutput;

/// Direction of a one-percent brightness adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// One percent brighter
    Up,
    /// One percent dimmer
    Down,
}

/// Converts a brightness step to a PWM compare value.
///
/// # Arguments
///
/// * `step` - Brightness in percent, 1-100
///
/// # Returns
///
/// Duty cycle in 0-65535
///
/// # Examples
///
/// ```
/// use ir_light::controller::level_for_step;
///
/// assert_eq!(level_for_step(50), 32768);
/// assert_eq!(level_for_step(1), 655);
/// assert_eq!(level_for_step(100), 65535);
/// ```
pub fn level_for_step(step: u8) -> u16 {
    let scaled = (u32::from(step) * LEVEL_MULTIPLIER + 50) / 100;
    scaled.min(u32::from(PWM_TOP)) as u16
}

/// Current light state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightState {
    /// Whether the output stage is enabled
    is_on: bool,
    /// Brightness anchor in percent (1-100)
    step: u8,
    /// PWM compare value derived from `step`
    level: u16,
}

impl LightState {
    /// Creates the boot state: off, at the default brightness.
    pub fn new() -> Self {
        Self::with_step(DEFAULT_STEP)
    }

    fn with_step(step: u8) -> Self {
        let step = step.clamp(MIN_STEP, MAX_STEP);
        Self {
            is_on: false,
            step,
            level: level_for_step(step),
        }
    }

    /// Returns `true` if the output stage is enabled.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// Returns the brightness step in percent.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Returns the PWM compare value currently written to the output.
    pub fn level(&self) -> u16 {
        self.level
    }

    /// Moves to `step` (clamped) and recomputes the level.
    fn set_step(&mut self, step: u8) {
        self.step = step.clamp(MIN_STEP, MAX_STEP);
        self.level = level_for_step(self.step);
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Light controller state machine.
///
/// Owns the [`LightState`] and applies commands to it, mirroring every change
/// on the output passed in by the caller.
pub struct LightController {
    state: LightState,
}

impl LightController {
    /// Creates a controller in the boot state (off, 10 %).
    ///
    /// Nothing is written to the output until the first operation; the
    /// firmware applies the boot preset explicitly.
    ///
    /// # Examples
    ///
    /// ```
    /// use ir_light::controller::LightController;
    ///
    /// let controller = LightController::new();
    /// assert!(!controller.state().is_on());
    /// assert_eq!(controller.state().step(), 10);
    /// ```
    pub fn new() -> Self {
        Self {
            state: LightState::new(),
        }
    }

    /// Returns the current light state.
    pub fn state(&self) -> &LightState {
        &self.state
    }

    /// Writes the whole state to the output.
    ///
    /// Used once at boot so the hardware matches the controller before the
    /// first command arrives.
    pub fn sync<O: LightOutput>(&mut self, output: &mut O) {
        output.set_output_enabled(self.state.is_on);
        self.write_level(output);
    }

    /// Enables the output at the current level.
    ///
    /// Idempotent: calling it while already on rewrites the same level.
    pub fn turn_on<O: LightOutput>(&mut self, output: &mut O) {
        self.state.is_on = true;
        output.set_duty_cycle(self.state.level);
        output.set_output_enabled(true);
        #[cfg(feature = "defmt")]
        defmt::info!("Lights on!");
    }

    /// Disables the output stage. Step and level are kept.
    pub fn turn_off<O: LightOutput>(&mut self, output: &mut O) {
        self.state.is_on = false;
        output.set_output_enabled(false);
        #[cfg(feature = "defmt")]
        defmt::info!("Lights off!");
    }

    /// Jumps to a brightness preset.
    ///
    /// The level is written even while the light is off so the next
    /// [`turn_on`](Self::turn_on) shows it immediately. The on/off state is
    /// left as is.
    ///
    /// # Arguments
    ///
    /// * `percent` - Preset from the remote (10-100 in steps of 10)
    /// * `output` - Dimmer hardware
    pub fn set_percent<O: LightOutput>(&mut self, percent: Percent, output: &mut O) {
        self.state.set_step(percent.get());
        self.write_level(output);
    }

    /// Moves the brightness one percent up or down.
    ///
    /// Clamped to 1-100; there is no wraparound at either end.
    ///
    /// # Arguments
    ///
    /// * `direction` - Whether to brighten or dim
    /// * `output` - Dimmer hardware
    pub fn adjust_step<O: LightOutput>(&mut self, direction: StepDirection, output: &mut O) {
        let step = match direction {
            StepDirection::Up => self.state.step.saturating_add(1),
            StepDirection::Down => self.state.step.saturating_sub(1),
        };
        self.state.set_step(step);
        self.write_level(output);
    }

    /// Executes a light command.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The command was applied
    /// * `Err(Error::UnknownCommand)` - For `Command::Unknown`; the state is
    ///   left untouched
    ///
    /// # Examples
    ///
    /// ```ignore
    /// controller.execute(Command::TurnOn, &mut output)?;
    /// ```
    pub fn execute<O: LightOutput>(&mut self, command: Command, output: &mut O) -> Result<()> {
        match command {
            Command::TurnOn => self.turn_on(output),
            Command::TurnOff => self.turn_off(output),
            Command::BrightnessUp => self.adjust_step(StepDirection::Up, output),
            Command::BrightnessDown => self.adjust_step(StepDirection::Down, output),
            Command::SetPercent(percent) => self.set_percent(percent, output),
            Command::Unknown(frame) => return Err(Error::UnknownCommand(frame)),
        }
        Ok(())
    }

    fn write_level<O: LightOutput>(&self, output: &mut O) {
        output.set_duty_cycle(self.state.level);
        #[cfg(feature = "defmt")]
        defmt::info!(
            "New light level={}%({})",
            self.state.step,
            self.state.level
        );
    }
}

impl Default for LightController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::mock::{OutputCall, RecordingOutput};

    fn percent(value: u8) -> Percent {
        Percent::new(value).unwrap()
    }

    fn assert_consistent(state: &LightState) {
        assert!((MIN_STEP..=MAX_STEP).contains(&state.step()));
        assert_eq!(state.level(), level_for_step(state.step()));
    }

    #[test]
    fn test_boot_state() {
        let controller = LightController::new();
        assert!(!controller.state().is_on());
        assert_eq!(controller.state().step(), DEFAULT_STEP);
        assert_eq!(controller.state().level(), 6554);
    }

    #[test]
    fn test_level_rounding() {
        assert_eq!(level_for_step(1), 655);
        assert_eq!(level_for_step(3), 1966);
        assert_eq!(level_for_step(7), 4588);
        assert_eq!(level_for_step(50), 32768);
        assert_eq!(level_for_step(99), 64881);
        assert_eq!(level_for_step(100), PWM_TOP);
    }

    #[test]
    fn test_level_is_monotonic() {
        for step in MIN_STEP..MAX_STEP {
            assert!(level_for_step(step) < level_for_step(step + 1));
        }
    }

    #[test]
    fn test_sync_writes_boot_state() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        controller.sync(&mut output);
        assert_eq!(
            output.calls,
            [OutputCall::Enabled(false), OutputCall::Duty(6554)]
        );
        assert_eq!(*controller.state(), LightState::new());
    }

    #[test]
    fn test_turn_on_writes_level_then_enables() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        controller.turn_on(&mut output);
        assert!(controller.state().is_on());
        assert_eq!(
            output.calls,
            [OutputCall::Duty(6554), OutputCall::Enabled(true)]
        );
    }

    #[test]
    fn test_turn_on_and_off_are_idempotent() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        controller.turn_on(&mut output);
        let on = *controller.state();
        controller.turn_on(&mut output);
        assert_eq!(*controller.state(), on);

        controller.turn_off(&mut output);
        let off = *controller.state();
        controller.turn_off(&mut output);
        assert_eq!(*controller.state(), off);
        assert!(!output.enabled);
    }

    #[test]
    fn test_off_keeps_brightness() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        controller.set_percent(percent(50), &mut output);
        controller.turn_off(&mut output);
        controller.turn_on(&mut output);

        let state = controller.state();
        assert!(state.is_on());
        assert_eq!(state.step(), 50);
        assert_eq!(state.level(), 32768);
        assert_eq!(output.duty, Some(32768));
        assert!(output.enabled);
    }

    #[test]
    fn test_set_percent_while_off_writes_level_but_stays_off() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        controller.set_percent(percent(80), &mut output);
        assert!(!controller.state().is_on());
        assert_eq!(output.calls, [OutputCall::Duty(level_for_step(80))]);
    }

    #[test]
    fn test_adjust_up_clamps_at_100() {
        for start in [1u8, 42, 99, 100] {
            let mut controller = LightController::new();
            let mut output = RecordingOutput::new();
            controller.state.set_step(start);
            for _ in 0..(usize::from(MAX_STEP - start) + 5) {
                controller.adjust_step(StepDirection::Up, &mut output);
                assert_consistent(controller.state());
            }
            assert_eq!(controller.state().step(), MAX_STEP);
            assert_eq!(output.duty, Some(PWM_TOP));
        }
    }

    #[test]
    fn test_adjust_down_never_reaches_zero() {
        for start in [1u8, 2, 57, 100] {
            let mut controller = LightController::new();
            let mut output = RecordingOutput::new();
            controller.state.set_step(start);
            for _ in 0..(usize::from(start) + 5) {
                controller.adjust_step(StepDirection::Down, &mut output);
                assert_consistent(controller.state());
            }
            assert_eq!(controller.state().step(), MIN_STEP);
            assert_eq!(output.duty, Some(655));
        }
    }

    #[test]
    fn test_adjust_step_does_not_touch_on_off() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        controller.adjust_step(StepDirection::Up, &mut output);
        assert!(!controller.state().is_on());
        assert_eq!(controller.state().step(), DEFAULT_STEP + 1);
        assert!(!output.calls.contains(&OutputCall::Enabled(true)));
    }

    #[test]
    fn test_execute_maps_commands() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();

        controller.execute(Command::SetPercent(percent(30)), &mut output).unwrap();
        assert_eq!(controller.state().step(), 30);
        controller.execute(Command::BrightnessDown, &mut output).unwrap();
        assert_eq!(controller.state().step(), 29);
        controller.execute(Command::BrightnessUp, &mut output).unwrap();
        controller.execute(Command::BrightnessUp, &mut output).unwrap();
        assert_eq!(controller.state().step(), 31);
        controller.execute(Command::TurnOn, &mut output).unwrap();
        assert!(controller.state().is_on());
        controller.execute(Command::TurnOff, &mut output).unwrap();
        assert!(!controller.state().is_on());
        assert_consistent(controller.state());
    }

    #[test]
    fn test_execute_unknown_leaves_state_alone() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        let before = *controller.state();
        assert_eq!(
            controller.execute(Command::Unknown(0xdeadbeef), &mut output),
            Err(Error::UnknownCommand(0xdeadbeef))
        );
        assert_eq!(*controller.state(), before);
        assert!(output.calls.is_empty());
    }

    #[test]
    fn test_every_preset_is_consistent() {
        let mut controller = LightController::new();
        let mut output = RecordingOutput::new();
        for preset in Percent::ALL {
            controller.set_percent(preset, &mut output);
            assert_eq!(controller.state().step(), preset.get());
            assert_consistent(controller.state());
        }
    }
}
