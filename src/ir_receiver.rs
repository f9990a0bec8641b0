// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! NEC IR capture task for the RP2350.
//!
//! Watches the IR receiver pin, times every edge and feeds the
//! [`PulseDecoder`]. Completed 32-bit frames go into the shared frame queue
//! for the dispatcher; nothing here validates or interprets them.
//!
//! # Hardware Requirements
//!
//! - IR receiver module (38kHz carrier frequency)
//! - Output connected to GPIO 1, active LOW (pulls LOW when IR detected)

use defmt::{info, warn};
use embassy_rp::gpio::Input;
use embassy_time::Instant;
use ir_light::capture::{FrameQueue, PulseDecoder};
use ir_light::config::FRAME_QUEUE_DEPTH;
use ir_light::frame::RawFrame;

/// Queue shared between the capture task and the dispatcher.
pub type CaptureQueue = FrameQueue<FRAME_QUEUE_DEPTH>;

/// NEC IR receiver.
///
/// Wraps the receiver pin and the decoder state.
pub struct IrReceiver<'a> {
    /// GPIO input connected to the IR receiver module
    pin: Input<'a>,
    /// Edge-timing state machine
    decoder: PulseDecoder,
    /// Time of the previous edge
    last_edge: Instant,
}

impl<'a> IrReceiver<'a> {
    /// Creates a new IR receiver instance.
    ///
    /// # Arguments
    ///
    /// * `pin` - GPIO input connected to the receiver output
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let ir_pin = Input::new(p.PIN_1, Pull::None);
    /// let ir = IrReceiver::new(ir_pin);
    /// ```
    pub fn new(pin: Input<'a>) -> Self {
        Self {
            pin,
            decoder: PulseDecoder::new(),
            last_edge: Instant::now(),
        }
    }

    /// Waits for the next complete frame.
    ///
    /// A frame takes about 67.5ms on the air. Edges that do not fit the NEC
    /// timing reset the decoder and waiting continues.
    pub async fn next_frame(&mut self) -> RawFrame {
        loop {
            self.pin.wait_for_any_edge().await;

            let now = Instant::now();
            let dt_us = now.duration_since(self.last_edge).as_micros();
            self.last_edge = now;

            let dt_us = u32::try_from(dt_us).unwrap_or(u32::MAX);
            if let Some(frame) = self.decoder.feed(self.pin.is_low(), dt_us) {
                return frame;
            }
        }
    }
}

/// Capture task: the only producer of the frame queue.
///
/// Never blocks on a full queue; the frame is dropped and counted instead.
#[embassy_executor::task]
pub async fn ir_capture_task(
    mut receiver: IrReceiver<'static>,
    queue: &'static CaptureQueue,
) -> ! {
    info!("IR capture task started");
    loop {
        let frame = receiver.next_frame().await;
        if !queue.enqueue(frame) {
            warn!("Frame queue full, dropping {=u32:08x}", frame);
        }
    }
}
