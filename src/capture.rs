// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Frame capture: NEC pulse decoding and the frame queue.
//!
//! The capture path is the only producer in the system. It turns receiver
//! edges into raw 32-bit frames with [`PulseDecoder`] and hands them to the
//! dispatcher through a bounded [`FrameQueue`].
//!
//! # NEC Timing
//!
//! ```text
//! [Leader mark][Leader space][32 x (bit mark + bit space)][Stop mark]
//!     9ms          4.5ms        560µs + 560µs ('0')
//!                               560µs + 1.69ms ('1')
//! ```
//!
//! Bits arrive least significant first. The decoder does not check the
//! address/data complements; that is [`crate::frame::validate`]'s job.
//! Repeat codes (leader followed by a 2.25 ms space) are not decoded.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::config::{
    BIT_MARK_US, GLITCH_US, LEADER_MARK_US, LEADER_SPACE_US, ONE_SPACE_US, ZERO_SPACE_US,
};
use crate::frame::RawFrame;

/// Non-blocking source of raw frames consumed by the dispatcher.
pub trait FrameSource {
    /// Takes the oldest pending frame, if any.
    fn try_dequeue_frame(&mut self) -> Option<RawFrame>;

    /// Returns and clears the number of frames lost to overflow.
    fn take_dropped(&mut self) -> u32 {
        0
    }
}

/// Bounded single-producer/single-consumer frame queue.
///
/// When the queue is full, new frames are dropped and counted instead of
/// blocking the capture path.
pub struct FrameQueue<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, RawFrame, N>,
    dropped: AtomicU32,
}

impl<const N: usize> FrameQueue<N> {
    /// Creates an empty queue. Usable in a `static`.
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueues a frame without blocking.
    ///
    /// # Returns
    ///
    /// `true` if the frame was stored; `false` if the queue was full and the
    /// frame was dropped.
    pub fn enqueue(&self, frame: RawFrame) -> bool {
        match self.channel.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Dequeues the oldest frame, if any.
    pub fn try_dequeue(&self) -> Option<RawFrame> {
        self.channel.try_receive().ok()
    }

    /// Returns and clears the overflow counter.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }

    /// Number of frames waiting.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// Returns `true` when no frame is waiting.
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl<const N: usize> Default for FrameQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameSource for &FrameQueue<N> {
    fn try_dequeue_frame(&mut self) -> Option<RawFrame> {
        self.try_dequeue()
    }

    fn take_dropped(&mut self) -> u32 {
        FrameQueue::take_dropped(*self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Idle,
    LeaderMark,
    LeaderSpace,
    BitMark { n: u8, value: u32 },
    BitSpace { n: u8, value: u32 },
}

#[inline]
fn within(dt: u32, (min, max): (u32, u32)) -> bool {
    dt >= min && dt <= max
}

/// Edge-timing NEC decoder for an active-low IR receiver.
///
/// Feed it every edge with the line level after the edge and the time since
/// the previous edge. It yields the raw frame when the 32nd bit completes.
///
/// # Examples
///
/// ```ignore
/// let mut decoder = PulseDecoder::new();
/// loop {
///     pin.wait_for_any_edge().await;
///     let now = Instant::now();
///     let dt = (now - last_edge).as_micros() as u32;
///     last_edge = now;
///     if let Some(frame) = decoder.feed(pin.is_low(), dt) {
///         queue.enqueue(frame);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PulseDecoder {
    state: DecoderState,
}

impl PulseDecoder {
    /// Creates a decoder waiting for a leader mark.
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
        }
    }

    /// Returns `true` while no frame is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == DecoderState::Idle
    }

    /// Processes one edge.
    ///
    /// # Arguments
    ///
    /// * `level_low` - Line level after the edge (`true` = IR carrier present)
    /// * `dt_us` - Microseconds since the previous edge
    ///
    /// # Returns
    ///
    /// * `Some(frame)` - A complete 32-bit frame, LSB first
    /// * `None` - Frame still in progress, or timing rejected
    pub fn feed(&mut self, level_low: bool, dt_us: u32) -> Option<RawFrame> {
        if dt_us < GLITCH_US {
            return None;
        }

        let (next, frame) = match self.state {
            DecoderState::Idle => (Self::restart(level_low), None),
            DecoderState::LeaderMark if !level_low && within(dt_us, LEADER_MARK_US) => {
                (DecoderState::LeaderSpace, None)
            }
            DecoderState::LeaderSpace if level_low && within(dt_us, LEADER_SPACE_US) => {
                (DecoderState::BitMark { n: 0, value: 0 }, None)
            }
            DecoderState::BitMark { n, value } if !level_low && within(dt_us, BIT_MARK_US) => {
                (DecoderState::BitSpace { n, value }, None)
            }
            DecoderState::BitSpace { n, value } if level_low => {
                let value = if within(dt_us, ONE_SPACE_US) {
                    Some(value | 1 << n)
                } else if within(dt_us, ZERO_SPACE_US) {
                    Some(value)
                } else {
                    None
                };
                match value {
                    Some(value) if n == 31 => (DecoderState::Idle, Some(value)),
                    Some(value) => (DecoderState::BitMark { n: n + 1, value }, None),
                    None => (Self::restart(level_low), None),
                }
            }
            _ => (Self::restart(level_low), None),
        };

        self.state = next;
        frame
    }

    /// A falling edge may open a new leader; anything else waits in idle.
    fn restart(level_low: bool) -> DecoderState {
        if level_low {
            DecoderState::LeaderMark
        } else {
            DecoderState::Idle
        }
    }
}

impl Default for PulseDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Edge sequence an active-low receiver produces for `frame`.
    fn edges(frame: u32) -> Vec<(bool, u32)> {
        let mut edges = Vec::new();
        edges.push((true, 50_000));
        edges.push((false, 9_000));
        edges.push((true, 4_500));
        for bit in 0..32 {
            edges.push((false, 560));
            let space = if frame & (1 << bit) != 0 { 1_690 } else { 560 };
            edges.push((true, space));
        }
        // end of stop mark
        edges.push((false, 560));
        edges
    }

    fn decode_all(decoder: &mut PulseDecoder, edges: &[(bool, u32)]) -> Vec<u32> {
        edges
            .iter()
            .filter_map(|&(low, dt)| decoder.feed(low, dt))
            .collect()
    }

    #[test]
    fn test_decodes_remote_frames() {
        for frame in [0xfc03_ef00u32, 0xea15_ef00, 0, u32::MAX] {
            let mut decoder = PulseDecoder::new();
            assert_eq!(decode_all(&mut decoder, &edges(frame)), [frame]);
            assert!(decoder.is_idle());
        }
    }

    #[test]
    fn test_back_to_back_frames() {
        let mut decoder = PulseDecoder::new();
        let mut stream = edges(0xfd02_ef00);
        stream.extend(edges(0xff00_ef00));
        assert_eq!(decode_all(&mut decoder, &stream), [0xfd02_ef00, 0xff00_ef00]);
    }

    #[test]
    fn test_repeat_code_is_ignored() {
        let mut decoder = PulseDecoder::new();
        let repeat = [(true, 40_000), (false, 9_000), (true, 2_250), (false, 560)];
        assert!(decode_all(&mut decoder, &repeat).is_empty());
        assert!(decoder.is_idle());
    }

    #[test]
    fn test_bad_bit_timing_aborts_frame() {
        let mut decoder = PulseDecoder::new();
        let mut stream = edges(0xfc03_ef00);
        // stretch the space of bit 5 past the '1' window
        stream[3 + 5 * 2 + 1].1 = 3_000;
        assert!(decode_all(&mut decoder, &stream).is_empty());
    }

    #[test]
    fn test_recovers_after_truncated_frame() {
        let mut decoder = PulseDecoder::new();
        let mut stream: Vec<_> = edges(0x1234_5678).into_iter().take(20).collect();
        stream.extend(edges(0xfb04_ef00));
        assert_eq!(decode_all(&mut decoder, &stream), [0xfb04_ef00]);
    }

    #[test]
    fn test_glitches_are_ignored() {
        let mut decoder = PulseDecoder::new();
        decoder.feed(true, 50_000);
        assert_eq!(decoder.feed(false, 30), None);
        assert_eq!(decoder.state, DecoderState::LeaderMark);
    }

    #[test]
    fn test_queue_is_fifo() {
        let queue: FrameQueue<4> = FrameQueue::new();
        assert!(queue.is_empty());
        assert!(queue.enqueue(1));
        assert!(queue.enqueue(2));
        assert!(queue.enqueue(3));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_dequeue(), Some(1));
        assert_eq!(queue.try_dequeue(), Some(2));
        assert_eq!(queue.try_dequeue(), Some(3));
        assert_eq!(queue.try_dequeue(), None);
    }

    #[test]
    fn test_queue_drops_newest_on_overflow() {
        let queue: FrameQueue<2> = FrameQueue::new();
        assert!(queue.enqueue(0xa));
        assert!(queue.enqueue(0xb));
        assert!(!queue.enqueue(0xc));
        assert!(!queue.enqueue(0xd));
        assert_eq!(queue.take_dropped(), 2);
        assert_eq!(queue.take_dropped(), 0);

        let mut source = &queue;
        assert_eq!(source.try_dequeue_frame(), Some(0xa));
        assert_eq!(source.try_dequeue_frame(), Some(0xb));
        assert_eq!(source.try_dequeue_frame(), None);
    }
}
