//! Wheel scroll pipeline for the wheelwright viewer
//!
//! Implements per-site wheel rescaling with optional eased animation: wheel
//! deltas are scaled and coalesced by the accumulator, then each flush either
//! jumps the scroll position or animates it with a symmetric cubic ease.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing function (symmetric cubic)
//! - `timing` - Time calculation utilities (progress, interpolation)
//!
//! ## L3 Molecular Layer
//! - `wheel` - Debouncing wheel-delta accumulator
//! - `animation` - Animation controller combining atoms
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Instant;
//! use wheelwright_tui::scroll::{ScrollAnimator, WheelAccumulator, WheelDecision};
//!
//! let mut wheel = WheelAccumulator::new();
//! let mut animator = ScrollAnimator::new();
//!
//! // On each wheel event
//! match wheel.on_wheel(delta, &settings, Instant::now()) {
//!     WheelDecision::PassThrough => animator.scroll_by(delta, max_scroll),
//!     WheelDecision::Captured => {}
//! }
//!
//! // In the main loop: flush after the quiet window, then advance each frame
//! if let Some(distance) = wheel.poll(Instant::now()) {
//!     animator.animate_by(distance, settings.animation_duration(), Instant::now(), max_scroll);
//! }
//! let offset = animator.update(Instant::now(), max_scroll);
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;
pub mod wheel;

// Re-exports for convenient access
pub use animation::ScrollAnimator;
pub use easing::ease_in_out_cubic;
pub use wheel::{WheelAccumulator, WheelDecision, QUIET_WINDOW};
