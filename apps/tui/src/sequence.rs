//! Timer-driven reveal sequences.
//!
//! Widgets never keep timers of their own. Each one is handed the time since
//! its data arrived and asks these players what should be visible.

use std::time::Duration;

/// Items revealed one after another at a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    pub first: Duration,
    pub every: Duration,
}

impl Cadence {
    /// Camera `i` activates at `i × 400 ms`; the first is live immediately.
    pub const CAMERAS: Self = Self {
        first: Duration::ZERO,
        every: Duration::from_millis(400),
    };

    /// One timeline event more every 800 ms.
    pub const TIMELINE: Self = Self {
        first: Duration::from_millis(800),
        every: Duration::from_millis(800),
    };

    /// How many of `total` items are visible after `elapsed`.
    pub fn visible(self, total: usize, elapsed: Duration) -> usize {
        if elapsed < self.first {
            return 0;
        }
        let every = self.every.as_millis().max(1);
        let ticks = (elapsed - self.first).as_millis() / every + 1;
        usize::try_from(ticks).unwrap_or(usize::MAX).min(total)
    }
}

const SCAN_TICK: Duration = Duration::from_millis(30);
const SCAN_STEP: u32 = 2;
const DETAILS_DELAY: Duration = Duration::from_millis(300);

/// Face scan progress in percent: +2 every 30 ms, capped at 100.
pub fn scan_progress(elapsed: Duration) -> u32 {
    let ticks = elapsed.as_millis() / SCAN_TICK.as_millis();
    u32::try_from(ticks)
        .unwrap_or(u32::MAX)
        .saturating_mul(SCAN_STEP)
        .min(100)
}

/// Time at which the scan first reports 100 %.
pub fn scan_complete_at() -> Duration {
    SCAN_TICK * (100 / SCAN_STEP)
}

/// Suspect details show 300 ms after the scan completes.
pub fn details_visible(elapsed: Duration) -> bool {
    elapsed >= scan_complete_at() + DETAILS_DELAY
}

/// Character-by-character reveal of report text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typewriter {
    pub delay: Duration,
    pub per_char: Duration,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(200),
            per_char: Duration::from_millis(30),
        }
    }
}

impl Typewriter {
    pub fn chars_visible(self, elapsed: Duration) -> usize {
        let Some(typing) = elapsed.checked_sub(self.delay) else {
            return 0;
        };
        let per_char = self.per_char.as_millis().max(1);
        usize::try_from(typing.as_millis() / per_char).unwrap_or(usize::MAX)
    }

    /// The visible prefix of `text`, always cut on a char boundary.
    pub fn reveal(self, text: &str, elapsed: Duration) -> &str {
        let count = self.chars_visible(elapsed);
        text.char_indices()
            .nth(count)
            .map_or(text, |(byte, _)| &text[..byte])
    }

    pub fn is_done(self, text: &str, elapsed: Duration) -> bool {
        self.chars_visible(elapsed) >= text.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationMode {
    Running,
    Paused,
}

const SWEEP_SPEED: f64 = 1.4;
const MAX_FRAME_DELTA: f64 = 0.25;
pub const FULL_ROTATION: f64 = 2.0 * std::f64::consts::PI;

/// Advances the radar sweep angle (radians) by wall time. Long pauses between
/// frames are clamped so the sweep never jumps.
pub fn advance_sweep(
    angle: f64,
    last_tick: Option<f64>,
    now_seconds: f64,
    mode: AnimationMode,
) -> (f64, Option<f64>) {
    let delta = last_tick.map_or(0.0, |last| (now_seconds - last).clamp(0.0, MAX_FRAME_DELTA));

    let next = match mode {
        AnimationMode::Running => (angle + delta * SWEEP_SPEED).rem_euclid(FULL_ROTATION),
        AnimationMode::Paused => angle.rem_euclid(FULL_ROTATION),
    };

    (next, Some(now_seconds))
}
