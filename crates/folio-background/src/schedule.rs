//! Frame pacing and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Frame pacer with a minimum spacing between drawn frames.
///
/// A tick is drawn only when at least one interval has passed since the
/// previous drawn frame; anything earlier is dropped. Drawn frames over any
/// window `W` never exceed `W / interval + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePacer {
    interval_ms: f64,
    next_due_ms: f64,
    last_drawn_ms: f64,
}

impl FramePacer {
    pub fn new(interval_ms: f64, now_ms: f64) -> Self {
        Self {
            interval_ms,
            next_due_ms: now_ms + interval_ms,
            last_drawn_ms: now_ms,
        }
    }

    /// Wall-clock time at which the next frame may be drawn.
    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    /// Draw at `now_ms` if a full interval has passed since the last frame.
    ///
    /// Returns the wall-clock milliseconds since the previous drawn frame, or
    /// `None` when this tick must be dropped.
    pub fn try_claim(&mut self, now_ms: f64) -> Option<f64> {
        if now_ms < self.next_due_ms {
            return None;
        }
        let elapsed = (now_ms - self.last_drawn_ms).max(0.0);
        self.last_drawn_ms = now_ms;
        self.next_due_ms = now_ms + self.interval_ms;
        Some(elapsed)
    }
}

/// Teardown signal shared by everything a mounted animation registers.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_until_due() {
        let mut p = FramePacer::new(20.0, 0.0);
        assert_eq!(p.try_claim(10.0), None);
        assert_eq!(p.try_claim(19.9), None);
        assert_eq!(p.try_claim(20.0), Some(20.0));
        assert_eq!(p.next_due_ms(), 40.0);
    }

    #[test]
    fn test_fast_ticks_draw_every_other_tick() {
        // 16 ms ticks against a 55 fps cap: each drawn frame needs two ticks.
        let interval = 1000.0 / 55.0;
        let mut p = FramePacer::new(interval, 0.0);
        let drawn: Vec<f64> = (1..=125)
            .map(|k| k as f64 * 16.0)
            .filter(|now| p.try_claim(*now).is_some())
            .collect();
        assert_eq!(drawn.len(), 62);
        assert_eq!(drawn.first(), Some(&32.0));
        assert_eq!(drawn.last(), Some(&1984.0));
    }

    #[test]
    fn test_drawn_frames_keep_min_spacing() {
        let interval = 1000.0 / 55.0;
        let mut p = FramePacer::new(interval, 0.0);
        let mut prev = 0.0;
        for k in 1..=500 {
            let now = k as f64 * 16.0;
            if let Some(elapsed) = p.try_claim(now) {
                assert!(now - prev >= interval, "{prev} -> {now}");
                assert_eq!(elapsed, now - prev);
                prev = now;
            }
        }
    }

    #[test]
    fn test_window_never_exceeds_cap() {
        let interval = 1000.0 / 60.0;
        let mut p = FramePacer::new(interval, 0.0);
        let drawn: Vec<f64> = (1..=2000)
            .map(|k| k as f64 * 3.0)
            .filter(|now| p.try_claim(*now).is_some())
            .collect();
        for window in [50.0, 100.0, 250.0, 1000.0] {
            for (i, start) in drawn.iter().enumerate() {
                let in_window = drawn[i..].iter().take_while(|t| **t < start + window).count();
                assert!(in_window as f64 <= window / interval + 1.0, "window {window}");
            }
        }
    }

    #[test]
    fn test_nth_frame_never_early() {
        let interval = 1000.0 / 60.0;
        let mut p = FramePacer::new(interval, 0.0);
        let mut n = 0u32;
        for k in 1..=600 {
            let now = k as f64 * 7.0;
            if p.try_claim(now).is_some() {
                n += 1;
                assert!(now + 1e-9 >= n as f64 * interval);
            }
        }
        assert!(n > 0);
    }

    #[test]
    fn test_long_pause_resyncs() {
        let mut p = FramePacer::new(20.0, 0.0);
        assert_eq!(p.try_claim(5000.0), Some(5000.0));
        assert_eq!(p.next_due_ms(), 5020.0);
        assert_eq!(p.try_claim(5010.0), None);
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
