//! Shared interaction constants for consistent gesture handling.
//!
//! The velocity tiers and the keyboard hysteresis window are empirically
//! chosen values carried over from years of production tuning; they are not
//! derived from a model. Override points exist on [`DrawerConfig`] for the
//! ones embedders commonly need to change.
//!
//! All distances are in logical pixels, all velocities in logical pixels per
//! millisecond.
//!
//! [`DrawerConfig`]: crate::config::DrawerConfig

use static_assertions::const_assert;
use veldra_core::time::Millis;

/// Velocity above which a release jumps straight to an extreme snap point
/// (dismiss or fully open) instead of settling nearby.
pub const DISMISS_VELOCITY: f32 = 2.0;

/// Velocity above which a short drag is treated as a flick and advances
/// exactly one snap point in the drag direction.
pub const FLICK_VELOCITY: f32 = 0.4;

/// A flick only counts when total travel stayed under this fraction of the
/// container's relevant dimension; longer drags settle by position instead.
pub const FLICK_TRAVEL_FRACTION: f32 = 0.4;

/// Pointer travel before a press is considered a deliberate drag.
///
/// Large enough to ignore finger jitter on touch screens, small enough to
/// feel responsive. Matches common platform touch-slop conventions.
pub const DRAG_SLOP: f32 = 8.0;

/// Fraction of the visible panel extent a drag must cover to close a drawer
/// that has no snap points configured.
pub const CLOSE_THRESHOLD: f32 = 0.25;

/// Difference between two consecutive visual-viewport resize deltas that
/// flips the keyboard-open flag. Toolbar show/hide produces smaller jumps.
pub const KEYBOARD_HYSTERESIS: f32 = 60.0;

/// Window after opening during which move events are never promoted to a
/// drag, so the opening gesture cannot be reinterpreted as a close.
pub const JUST_OPENED_GUARD: Millis = 500.0;

/// Cooldown after a release during which new drags are rejected.
pub const JUST_RELEASED_COOLDOWN: Millis = 200.0;

/// Default cooldown after a rejected drag during which further attempts
/// with zero net displacement stay rejected. Overridable per drawer.
pub const SCROLL_LOCK_TIMEOUT: Millis = 100.0;

/// Duration of the settle/open/close transition.
pub const TRANSITION_DURATION: Millis = 500.0;

/// Horizontal inset of the scaled page content behind an open drawer.
pub const BACKGROUND_INSET: f32 = 26.0;

/// Corner radius applied to the scaled page content.
pub const BACKGROUND_RADIUS: f32 = 8.0;

/// Axis translate applied to the scaled page content.
pub const BACKGROUND_TRANSLATE: f32 = 14.0;

/// Displacement of a parent drawer when a nested drawer opens over it.
pub const NESTED_DISPLACEMENT: f32 = 16.0;

/// Allowance kept between the window top and a keyboard-shrunk panel.
pub const WINDOW_TOP_OFFSET: f32 = 26.0;

/// Share of the screen a panel must occupy for its own top position, rather
/// than [`WINDOW_TOP_OFFSET`], to be used as the keyboard offset.
pub const TALL_PANEL_FRACTION: f32 = 0.8;

/// Second press within this window counts as a handle double-press.
pub const HANDLE_DOUBLE_PRESS_WINDOW: Millis = 120.0;

/// Delay before a parent drawer's transform is reset after a nested drawer
/// fully closes.
pub const NESTED_RESET_DELAY: Millis = 500.0;

// A flick must be distinguishable from a dismiss-speed swipe.
const_assert!(FLICK_VELOCITY < DISMISS_VELOCITY);
const_assert!(FLICK_TRAVEL_FRACTION < 1.0);
