//! L3 Molecular Layer: Scroll animation controller
//!
//! Owns the viewer's scroll position and advances it each frame. A flush
//! either jumps the position or runs an eased animation toward
//! start + distance. Overlapping flushes never race: a new flush cancels the
//! in-flight animation and carries its undelivered remainder into the new
//! one, so the total distance delivered always equals the total flushed.
//! Each started animation gets a fresh generation number; a surviving frame
//! of an older generation is a bug, not a rendering quirk.

use std::time::{Duration, Instant};

use super::easing::ease_in_out_cubic;
use super::timing::{is_complete, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Scroll position when the animation began
    from: f64,
    /// Total distance to deliver (signed)
    distance: f64,
    /// Animation duration
    duration: Duration,
    /// Generation this animation belongs to
    generation: u64,
}

/// Scroll position controller for one page view
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Current scroll position in fractional rows
    position: f64,
    /// Count of animations ever started; identifies the newest one
    generation: u64,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in fractional rows
    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current position as whole rows for rendering
    #[inline]
    pub fn offset_rows(&self) -> u16 {
        self.position.round().min(u16::MAX as f64) as u16
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Use this to determine if the frame rate needs to stay high
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some()
    }

    /// Generation of the most recently started animation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Distance of the in-flight animation not yet delivered
    fn remaining(&self) -> f64 {
        match &self.animation {
            Some(anim) => anim.from + anim.distance - self.position,
            None => 0.0,
        }
    }

    /// Flush with animation: ease over `duration` toward the accumulated
    /// distance, merging any in-flight remainder (cancel + merge).
    pub fn animate_by(
        &mut self,
        distance: f64,
        duration: Duration,
        now: Instant,
        max_scroll: f64,
    ) {
        let carried = self.remaining();
        if let Some(anim) = self.animation.take() {
            tracing::trace!(
                "cancelling animation {} with {:.1} rows undelivered",
                anim.generation,
                carried
            );
        }

        let total = carried + distance;
        if total == 0.0 {
            return;
        }
        if duration.is_zero() {
            self.position = (self.position + total).clamp(0.0, max_scroll);
            return;
        }

        self.generation += 1;
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.position,
            distance: total,
            duration,
            generation: self.generation,
        });
    }

    /// Flush without animation: jump by the accumulated distance, merging
    /// any in-flight remainder.
    pub fn apply_jump(&mut self, distance: f64, max_scroll: f64) {
        let total = self.remaining() + distance;
        self.animation = None;
        self.position = (self.position + total).clamp(0.0, max_scroll);
    }

    /// Native scroll (keys, pass-through wheel): cancel any animation at the
    /// current position and move relative to it. The remainder is dropped;
    /// the user took over.
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64) {
        self.animation = None;
        self.position = (self.position + delta).clamp(0.0, max_scroll);
    }

    /// Jump to an absolute position, cancelling any animation
    pub fn scroll_to(&mut self, position: f64, max_scroll: f64) {
        self.animation = None;
        self.position = position.clamp(0.0, max_scroll);
    }

    /// Advance the animation and return the row offset to render.
    ///
    /// Position is always computed absolutely (from + distance × eased
    /// fraction) so frame-rate jitter cannot accumulate drift. Called every
    /// frame; also clamps the position when the scrollable range shrinks.
    pub fn update(&mut self, now: Instant, max_scroll: f64) -> u16 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.position = (anim.from + anim.distance).clamp(0.0, max_scroll);
                tracing::trace!(
                    "animation {} complete at row {:.1}",
                    anim.generation,
                    self.position
                );
                self.animation = None;
            } else {
                let t = progress(anim.start, now, anim.duration);
                let eased = ease_in_out_cubic(t);
                self.position = (anim.from + anim.distance * eased).clamp(0.0, max_scroll);
            }
        } else {
            self.position = self.position.clamp(0.0, max_scroll);
        }

        self.offset_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: f64 = 1000.0;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_animated_flush_follows_eased_curve() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();

        animator.animate_by(100.0, ms(300), start, MAX);
        assert!(animator.is_animating());

        // Quarter time: eased fraction is 4 * 0.25^3 = 0.0625, well below linear
        animator.update(start + ms(75), MAX);
        assert!((animator.position() - 6.25).abs() < 0.001);

        // Half time is exactly half distance for a symmetric curve
        animator.update(start + ms(150), MAX);
        assert!((animator.position() - 50.0).abs() < 0.001);

        // Full duration lands exactly on the total distance
        animator.update(start + ms(300), MAX);
        assert_eq!(animator.position(), 100.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_instant_flush_jumps() {
        let mut animator = ScrollAnimator::new();
        animator.apply_jump(60.0, MAX);
        assert_eq!(animator.position(), 60.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_new_flush_cancels_and_merges() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();

        animator.animate_by(100.0, ms(300), start, MAX);
        let first_generation = animator.generation();
        animator.update(start + ms(150), MAX); // position 50, 50 undelivered

        animator.animate_by(40.0, ms(300), start + ms(150), MAX);
        assert_eq!(animator.generation(), first_generation + 1);

        // New animation runs from 50 and delivers 50 + 40
        animator.update(start + ms(450), MAX);
        assert_eq!(animator.position(), 140.0);
    }

    #[test]
    fn test_instant_flush_collects_remainder() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();

        animator.animate_by(100.0, ms(300), start, MAX);
        animator.update(start + ms(150), MAX); // position 50

        animator.apply_jump(25.0, MAX);
        // 50 delivered + 50 remainder + 25 new
        assert_eq!(animator.position(), 125.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_native_scroll_drops_remainder() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();

        animator.animate_by(100.0, ms(300), start, MAX);
        animator.update(start + ms(150), MAX); // position 50

        animator.scroll_by(10.0, MAX);
        assert_eq!(animator.position(), 60.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_merged_total_is_sum_of_flushes() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();

        animator.animate_by(30.0, ms(300), start, MAX);
        animator.update(start + ms(100), MAX);
        animator.animate_by(30.0, ms(300), start + ms(100), MAX);
        animator.update(start + ms(200), MAX);
        animator.animate_by(30.0, ms(300), start + ms(200), MAX);

        // Let the last animation run out
        animator.update(start + ms(600), MAX);
        assert!((animator.position() - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_position_clamps_to_range() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();

        animator.animate_by(100.0, ms(300), start, 30.0);
        animator.update(start + ms(300), 30.0);
        assert_eq!(animator.position(), 30.0);

        animator.apply_jump(-500.0, 30.0);
        assert_eq!(animator.position(), 0.0);
    }

    #[test]
    fn test_shrinking_range_pulls_position_back() {
        let mut animator = ScrollAnimator::new();
        animator.scroll_to(200.0, MAX);

        // Content reflowed shorter
        animator.update(Instant::now(), 80.0);
        assert_eq!(animator.position(), 80.0);
    }

    #[test]
    fn test_zero_total_does_not_animate() {
        let mut animator = ScrollAnimator::new();
        animator.animate_by(0.0, ms(300), Instant::now(), MAX);
        assert!(!animator.is_animating());
        assert_eq!(animator.generation(), 0);
    }

    #[test]
    fn test_zero_duration_degenerates_to_jump() {
        let mut animator = ScrollAnimator::new();
        animator.animate_by(40.0, Duration::ZERO, Instant::now(), MAX);
        assert_eq!(animator.position(), 40.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_offset_rows_rounds() {
        let mut animator = ScrollAnimator::new();
        animator.scroll_to(10.6, MAX);
        assert_eq!(animator.offset_rows(), 11);
        animator.scroll_to(10.4, MAX);
        assert_eq!(animator.offset_rows(), 10);
    }

    #[test]
    fn test_negative_animated_flush_scrolls_up() {
        let mut animator = ScrollAnimator::new();
        let start = Instant::now();
        animator.scroll_to(100.0, MAX);

        animator.animate_by(-60.0, ms(300), start, MAX);
        animator.update(start + ms(150), MAX);
        assert!((animator.position() - 70.0).abs() < 0.001);

        animator.update(start + ms(300), MAX);
        assert_eq!(animator.position(), 40.0);
    }
}
