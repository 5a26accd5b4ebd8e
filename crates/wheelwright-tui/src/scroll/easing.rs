//! L4 Atomic Layer: Pure easing function for smooth scrolling animations
//!
//! Maps a time fraction in [0, 1] to an eased fraction in [0, 1].

/// Symmetric cubic ease: cubic acceleration through the first half, mirrored
/// cubic deceleration through the second.
///
/// f(t) = t < 0.5 ? 4t³ : (t-1)(2t-2)(2t-2) + 1
#[inline]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        (t - 1.0) * (2.0 * t - 2.0) * (2.0 * t - 2.0) + 1.0
    }
}
