//! L3 Molecular Layer: Wheel event accumulator
//!
//! Coalesces a burst of wheel events into a single flush. Wheel devices emit
//! many small events per physical gesture; applying the multiplier per event
//! would compound rounding and animating per event would stutter, so deltas
//! are scaled as they arrive, summed, and released only after a quiet window
//! with no further wheel input.
//!
//! Per page this is a three-state machine: idle (nothing pending), then
//! accumulating while each captured event rearms the deadline, then a flush
//! when the deadline passes, which resets to idle.

use std::time::{Duration, Instant};

use wheelwright_core::PageSettings;

/// Quiet window after the last wheel event before the accumulated distance
/// is flushed
pub const QUIET_WINDOW: Duration = Duration::from_millis(50);

/// Outcome of offering a wheel event to the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDecision {
    /// Keep native behavior; the caller scrolls immediately, unscaled
    PassThrough,
    /// The event was captured and its scaled delta accumulated
    Captured,
}

/// Debouncing accumulator for wheel deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct WheelAccumulator {
    accumulated: f64,
    deadline: Option<Instant>,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one wheel event.
    ///
    /// Events pass through untouched when the settings snapshot does not
    /// intercept (site disabled, or effective multiplier exactly 1.0 with
    /// animation off). Captured deltas are scaled by the effective
    /// multiplier at arrival time and the quiet-window deadline is rearmed.
    pub fn on_wheel(
        &mut self,
        delta: f64,
        settings: &PageSettings,
        now: Instant,
    ) -> WheelDecision {
        if !settings.intercepts() {
            return WheelDecision::PassThrough;
        }

        self.accumulated += delta * settings.effective_multiplier();
        self.deadline = Some(now + QUIET_WINDOW);
        WheelDecision::Captured
    }

    /// Release the accumulated distance once the quiet window has elapsed.
    ///
    /// Returns `None` while idle, while still inside the window, or when the
    /// deltas cancelled out exactly. The accumulator is reset either way
    /// once the deadline passes.
    pub fn poll(&mut self, now: Instant) -> Option<f64> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        self.deadline = None;
        let distance = std::mem::take(&mut self.accumulated);
        if distance != 0.0 {
            tracing::debug!("flushing accumulated scroll: {:.1} rows", distance);
            Some(distance)
        } else {
            None
        }
    }

    /// Whether a flush deadline is armed (drives the fast tick rate)
    #[inline]
    pub fn is_accumulating(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intercepting() -> PageSettings {
        PageSettings {
            enabled_on_site: true,
            scroll_speed: 2.0,
            ..PageSettings::default()
        }
    }

    #[test]
    fn test_disabled_site_passes_through() {
        let mut acc = WheelAccumulator::new();
        let settings = PageSettings {
            scroll_speed: 2.0,
            ..PageSettings::default()
        };
        let now = Instant::now();

        assert_eq!(acc.on_wheel(3.0, &settings, now), WheelDecision::PassThrough);
        assert!(!acc.is_accumulating());
        assert_eq!(acc.poll(now + QUIET_WINDOW), None);
    }

    #[test]
    fn test_unit_multiplier_without_animation_passes_through() {
        let mut acc = WheelAccumulator::new();
        let settings = PageSettings {
            enabled_on_site: true,
            ..PageSettings::default()
        };

        let decision = acc.on_wheel(3.0, &settings, Instant::now());
        assert_eq!(decision, WheelDecision::PassThrough);
    }

    #[test]
    fn test_animation_alone_captures() {
        let mut acc = WheelAccumulator::new();
        let settings = PageSettings {
            enabled_on_site: true,
            smooth_scrolling: true,
            ..PageSettings::default()
        };
        let now = Instant::now();

        assert_eq!(acc.on_wheel(3.0, &settings, now), WheelDecision::Captured);
        // Multiplier is 1.0, so distance is unscaled
        assert_eq!(acc.poll(now + QUIET_WINDOW), Some(3.0));
    }

    #[test]
    fn test_accumulation_is_additive_and_exact() {
        let mut acc = WheelAccumulator::new();
        let settings = intercepting();
        let now = Instant::now();

        acc.on_wheel(10.0, &settings, now);
        acc.on_wheel(20.0, &settings, now + Duration::from_millis(10));

        // Quiet window still open from the second event
        assert_eq!(acc.poll(now + Duration::from_millis(40)), None);

        // (10 + 20) * 2.0 delivered as a single flush
        let flushed = acc.poll(now + Duration::from_millis(10) + QUIET_WINDOW);
        assert_eq!(flushed, Some(60.0));
        assert!(!acc.is_accumulating());
    }

    #[test]
    fn test_each_event_rearms_the_deadline() {
        let mut acc = WheelAccumulator::new();
        let settings = intercepting();
        let now = Instant::now();

        acc.on_wheel(1.0, &settings, now);
        acc.on_wheel(1.0, &settings, now + Duration::from_millis(30));

        // 60ms after the first event but only 30ms after the second
        assert_eq!(acc.poll(now + Duration::from_millis(60)), None);
        assert!(acc.is_accumulating());

        let flushed = acc.poll(now + Duration::from_millis(30) + QUIET_WINDOW);
        assert_eq!(flushed, Some(4.0));
    }

    #[test]
    fn test_opposing_deltas_cancel_to_no_flush() {
        let mut acc = WheelAccumulator::new();
        let settings = intercepting();
        let now = Instant::now();

        acc.on_wheel(10.0, &settings, now);
        acc.on_wheel(-10.0, &settings, now);

        assert_eq!(acc.poll(now + QUIET_WINDOW), None);
        // Deadline cleared even though nothing was flushed
        assert!(!acc.is_accumulating());
    }

    #[test]
    fn test_fractional_multiplier_accumulates_exactly() {
        let mut acc = WheelAccumulator::new();
        let settings = PageSettings {
            enabled_on_site: true,
            scroll_speed: 0.5,
            ..PageSettings::default()
        };
        let now = Instant::now();

        acc.on_wheel(1.0, &settings, now);
        acc.on_wheel(1.0, &settings, now);
        acc.on_wheel(1.0, &settings, now);

        assert_eq!(acc.poll(now + QUIET_WINDOW), Some(1.5));
    }

    #[test]
    fn test_speed_disabled_neutralizes_multiplier() {
        let mut acc = WheelAccumulator::new();
        let settings = PageSettings {
            enabled_on_site: true,
            speed_enabled: false,
            scroll_speed: 4.0,
            smooth_scrolling: true,
            ..PageSettings::default()
        };
        let now = Instant::now();

        // Captured because animation is on, but scaled by 1.0
        assert_eq!(acc.on_wheel(5.0, &settings, now), WheelDecision::Captured);
        assert_eq!(acc.poll(now + QUIET_WINDOW), Some(5.0));
    }

    #[test]
    fn test_multiplier_sampled_at_event_time() {
        let mut acc = WheelAccumulator::new();
        let now = Instant::now();

        let fast = intercepting();
        acc.on_wheel(10.0, &fast, now);

        // A settings push lands mid-burst; later events use the new multiplier
        let slow = PageSettings {
            scroll_speed: 0.5,
            ..intercepting()
        };
        acc.on_wheel(10.0, &slow, now);

        assert_eq!(acc.poll(now + QUIET_WINDOW), Some(25.0));
    }

    #[test]
    fn test_flush_resets_for_next_burst() {
        let mut acc = WheelAccumulator::new();
        let settings = intercepting();
        let now = Instant::now();

        acc.on_wheel(5.0, &settings, now);
        assert_eq!(acc.poll(now + QUIET_WINDOW), Some(10.0));

        let later = now + Duration::from_secs(1);
        acc.on_wheel(-5.0, &settings, later);
        assert_eq!(acc.poll(later + QUIET_WINDOW), Some(-10.0));
    }
}
