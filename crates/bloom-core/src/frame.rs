use crate::constants::MAX_FRAME_DT_SECS;
use instant::Instant;
use std::time::Duration;

/// Wall-clock frame timer for the loop that drives the modulators.
///
/// Each `tick` returns the seconds since the previous tick, capped at
/// [`MAX_FRAME_DT_SECS`] so a stalled frame (debugger, hidden tab) cannot
/// fast-forward every tween at once.
#[derive(Clone, Debug)]
pub struct FrameClock {
    last_instant: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
            frames: 0,
        }
    }

    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        self.frames += 1;
        clamp_frame_dt(dt)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clamp_frame_dt(dt: Duration) -> f32 {
    dt.as_secs_f32().min(MAX_FRAME_DT_SECS)
}

/// Fixed step for offline rendering at `fps`; non-positive rates fall back
/// to 60.
pub fn fixed_step(fps: f32) -> f32 {
    if fps.is_finite() && fps > 0.0 {
        1.0 / fps
    } else {
        1.0 / 60.0
    }
}
