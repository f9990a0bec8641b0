// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Frame dispatch loop.
//!
//! The dispatcher is the single consumer of the frame queue and the only
//! writer to the light output. Each pending frame goes through:
//!
//! 1. The integrity gate ([`validate`])
//! 2. The literal button table ([`Command::from_frame`])
//! 3. The light controller
//!
//! Invalid and unknown frames are logged and dropped; the loop never stops
//! on either.
//!
//! # Integrity Gate
//!
//! The dimmer remote transmits a 16-bit extended address (`0xEF00`), whose
//! high byte is not the complement of the low one, so its frames fail the
//! plain complement check even though their data half is intact. A frame is
//! therefore accepted when it passes [`validate`] or when it is one of the
//! remote's exact literals.

use embassy_time::{Duration, Timer};

use crate::capture::FrameSource;
use crate::command::Command;
use crate::controller::{LightController, LightState};
use crate::error::{Error, Result};
use crate::frame::{RawFrame, validate};
use crate::output::LightOutput;

/// Counters of what the dispatcher has seen since boot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DispatchStats {
    /// Frames that changed (or re-applied) the light state
    pub accepted: u32,
    /// Frames rejected by the integrity gate
    pub invalid: u32,
    /// Frames with no button assigned
    pub unknown: u32,
    /// Frames lost to queue overflow before reaching the dispatcher
    pub dropped: u32,
}

/// Turns raw frames into light controller operations.
pub struct Dispatcher {
    controller: LightController,
    stats: DispatchStats,
}

impl Dispatcher {
    /// Creates a dispatcher around a controller.
    pub fn new(controller: LightController) -> Self {
        Self {
            controller,
            stats: DispatchStats::default(),
        }
    }

    /// Returns the current light state.
    pub fn state(&self) -> &LightState {
        self.controller.state()
    }

    /// Returns the dispatch counters.
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Gives access to the controller, e.g. to apply the boot preset.
    pub fn controller_mut(&mut self) -> &mut LightController {
        &mut self.controller
    }

    /// Processes one raw frame.
    ///
    /// # Returns
    ///
    /// * `Ok(command)` - The command that was applied
    /// * `Err(Error::InvalidFrame)` - Integrity gate rejected the frame
    /// * `Err(Error::UnknownCommand)` - No button maps to the frame
    ///
    /// In both error cases the light state is untouched.
    pub fn dispatch<O: LightOutput>(
        &mut self,
        frame: RawFrame,
        output: &mut O,
    ) -> Result<Command> {
        let result = Self::check_integrity(frame).and_then(|()| {
            let command = Command::from_frame(frame);
            self.controller.execute(command, output).map(|()| command)
        });

        match result {
            Ok(_) => self.stats.accepted += 1,
            Err(Error::InvalidFrame(_)) => self.stats.invalid += 1,
            Err(Error::UnknownCommand(_)) => self.stats.unknown += 1,
        }
        result
    }

    /// Dispatches every pending frame, oldest first.
    ///
    /// # Returns
    ///
    /// Number of frames that were applied.
    pub fn drain<S: FrameSource, O: LightOutput>(
        &mut self,
        source: &mut S,
        output: &mut O,
    ) -> usize {
        let dropped = source.take_dropped();
        if dropped > 0 {
            self.stats.dropped += dropped;
            #[cfg(feature = "defmt")]
            defmt::warn!("Frame queue overflow, {} frames dropped", dropped);
        }

        let mut accepted = 0;
        while let Some(frame) = source.try_dequeue_frame() {
            match self.dispatch(frame, output) {
                Ok(_) => accepted += 1,
                Err(_error) => {
                    #[cfg(feature = "defmt")]
                    match _error {
                        Error::InvalidFrame(frame) => {
                            defmt::debug!("Invalid frame {=u32:08x}", frame)
                        }
                        Error::UnknownCommand(frame) => defmt::warn!("{=u32:08x}", frame),
                    };
                }
            }
        }
        accepted
    }

    /// Runs the dispatch loop forever.
    ///
    /// Drains the source, then sleeps for `poll_interval`. Frames arriving
    /// during the sleep wait in the queue; latency is bounded by the interval.
    pub async fn run<S: FrameSource, O: LightOutput>(
        &mut self,
        source: &mut S,
        output: &mut O,
        poll_interval: Duration,
    ) -> ! {
        loop {
            self.drain(source, output);
            Timer::after(poll_interval).await;
        }
    }

    fn check_integrity(frame: RawFrame) -> Result<()> {
        match validate(frame) {
            Ok(_) => Ok(()),
            Err(_) if Command::from_frame(frame).is_known() => Ok(()),
            Err(error) => Err(error),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(LightController::new())
    }
}
