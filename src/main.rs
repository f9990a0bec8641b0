// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350 IR Remote Light Dimmer
//!
//! This firmware dims a PWM-driven light from an NEC infrared remote using
//! the Embassy async runtime.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Light**: PWM on GPIO 0 (PWM_SLICE0 channel A)
//! - **IR Receiver**: NEC protocol receiver on GPIO 1
//! - **Status LED**: GPIO 25
//!
//! # Features
//! - On/off without losing the brightness setting
//! - 1% brightness steps with the +/- buttons, never dimming to off
//! - Ten brightness presets (10% to 100%)
//! - Frames queued by a capture task and drained every 500ms
//! - Real-time defmt logging for debugging
//!
//! # IR Remote Commands
//! - `0xFC03EF00`: On
//! - `0xFD02EF00`: Off
//! - `0xFF00EF00` / `0xFE01EF00`: Brightness up / down
//! - `0xFB04EF00` ... `0xEA15EF00`: 100% ... 10%
//!
//! # Build
//! ```bash
//! cargo build --release --features rp2350 --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

mod ir_receiver;
mod pwm_output;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_time::Duration;
use ir_light::config::{IR_RECEIVER_PIN, LIGHT_PWM_PIN, POLL_INTERVAL_MS, STATUS_LED_PIN};
use ir_light::controller::LightController;
use ir_light::dispatcher::Dispatcher;
use ir_receiver::{CaptureQueue, IrReceiver, ir_capture_task};
use pwm_output::PwmLightOutput;
use {defmt_rtt as _, panic_probe as _};

/// Program metadata for picotool info command
///
/// This information is embedded in the binary and can be read by picotool
/// to display program information when querying the firmware.
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"IR Light"),
    embassy_rp::binary_info::rp_program_description!(c"RP2350A Light Dimmer with IR Remote"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Frames waiting between the capture task and the dispatcher
static FRAME_QUEUE: CaptureQueue = CaptureQueue::new();

/// Main light controller task
///
/// Initializes the peripherals, spawns the IR capture task and runs the
/// dispatcher loop.
///
/// # Initialization Sequence
/// 1. Configure the PWM slice (disabled) and status LED
/// 2. Write the boot state: off, 10% brightness
/// 3. Spawn the IR capture task on GPIO 1
/// 4. Enter the dispatch loop
///
/// # Safety
/// Never returns. Runs indefinitely until power loss or reset.
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("RP2350A IR Light Starting!");
    let p = embassy_rp::init(Default::default());

    let mut led = Output::new(p.PIN_25, Level::Low);

    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, pwm_output::pwm_config());
    let mut output = PwmLightOutput::new(pwm);

    let mut dispatcher = Dispatcher::new(LightController::new());
    dispatcher.controller_mut().sync(&mut output);

    // The receiver module drives the line, no pull needed
    let ir_pin = Input::new(p.PIN_1, Pull::None);
    unwrap!(spawner.spawn(ir_capture_task(IrReceiver::new(ir_pin), &FRAME_QUEUE)));

    info!(
        "Light on GPIO {}, IR on GPIO {}, status LED on GPIO {}",
        LIGHT_PWM_PIN, IR_RECEIVER_PIN, STATUS_LED_PIN
    );
    info!("Light ready! Waiting for IR commands...");
    led.set_high();

    let mut source = &FRAME_QUEUE;
    dispatcher
        .run(
            &mut source,
            &mut output,
            Duration::from_millis(POLL_INTERVAL_MS),
        )
        .await
}
