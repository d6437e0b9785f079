use std::time::{Duration, Instant};

/// Fixed-rate frame pacing for the event loop.
///
/// `poll` is called whenever the loop goes idle and schedules a frame once the
/// deadline has passed; `take_frame` consumes it on the next redraw. Redraws
/// requested by the OS (resize, expose) find no pending frame and must not
/// advance the animation.
#[derive(Debug)]
pub struct FrameClock {
    frame_time: Duration,
    next_frame: Instant,
    last_frame: Instant,
    pending: bool,
}

impl FrameClock {
    pub fn new(frame_time: Duration, now: Instant) -> Self {
        Self {
            frame_time,
            next_frame: now,
            last_frame: now,
            pending: false,
        }
    }

    /// Returns true when a new frame became due and a redraw should be requested.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_frame {
            return false;
        }
        self.pending = true;
        self.next_frame = now + self.frame_time;
        true
    }

    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    /// Time since the previous scheduled frame, or `None` if no frame is due.
    pub fn take_frame(&mut self, now: Instant) -> Option<Duration> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        Some(dt)
    }
}
