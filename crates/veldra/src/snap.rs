//! Snap-point resolution and release physics.
//!
//! A drawer configured with snap points rests at one of several discrete
//! offsets instead of being simply open or closed. This module resolves
//! the configured points into pixel offsets for the current container
//! size, clamps in-flight drags, and decides where a released drag should
//! settle from its distance and velocity.

use tracing::{debug, warn};
use veldra_core::geometry::Size;

use crate::config::Direction;
use crate::constants;
use crate::host::{HostSurface, Part, Transform, Transition};

/// One configured resting position.
///
/// A fraction is relative to the container's extent along the travel axis;
/// a pixel value is the absolute extent of panel left visible. Order
/// matters: index 0 is the most-closed resting point that still counts as
/// open, the last index is fully open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPoint {
    /// Fraction of the container extent in `[0, 1]`; `1.0` is fully open.
    Fraction(f32),
    /// Absolute visible extent in pixels.
    Pixels(f32),
}

impl SnapPoint {
    /// Resolve to a signed offset from the fully-open resting position.
    ///
    /// Larger snap points sit closer to fully open, so their offsets sit
    /// closer to zero; fraction 0 resolves to the full container extent,
    /// signed by direction.
    fn offset(self, extent: f32, direction: Direction) -> f32 {
        let hidden = match self {
            SnapPoint::Fraction(fraction) => extent * (1.0 - fraction.clamp(0.0, 1.0)),
            SnapPoint::Pixels(visible) => (extent - visible).max(0.0),
        };
        hidden * direction.offset_sign()
    }
}

/// Where a released drag should settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    /// Close the drawer entirely.
    Dismiss,
    /// Settle at the given snap-point index.
    SnapTo(usize),
}

/// Inputs to the release decision.
#[derive(Debug, Clone, Copy)]
pub struct SnapRelease {
    /// Total displacement, positive toward closed.
    pub dragged_distance: f32,
    /// Pixels per millisecond.
    pub velocity: f32,
    pub dismissible: bool,
}

/// Resolves snap points and owns the active index.
#[derive(Debug)]
pub struct SnapPointEngine {
    direction: Direction,
    points: Vec<SnapPoint>,
    offsets: Vec<f32>,
    active_index: usize,
    fade_from_index: usize,
    container_extent: f32,
}

impl SnapPointEngine {
    pub fn new(
        points: Vec<SnapPoint>,
        direction: Direction,
        fade_from_index: Option<usize>,
    ) -> Self {
        let fade_from_index = fade_from_index.unwrap_or(points.len().saturating_sub(1));
        Self {
            direction,
            points,
            offsets: Vec::new(),
            active_index: 0,
            fade_from_index,
            container_extent: 0.0,
        }
    }

    /// Whether snap behavior is configured at all. An empty list degrades
    /// the drawer to plain open/closed handling.
    pub fn has_points(&self) -> bool {
        !self.points.is_empty()
    }

    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Reset to the first (default) snap point without touching the host.
    pub fn reset_active_index(&mut self) {
        self.active_index = 0;
    }

    pub fn active_offset(&self) -> Option<f32> {
        self.offsets.get(self.active_index).copied()
    }

    pub fn last_index(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    pub fn container_extent(&self) -> f32 {
        self.container_extent
    }

    /// Recompute pixel offsets for a new container size.
    pub fn resolve(&mut self, container: Size<f32>) {
        self.container_extent = self.direction.extent(container);
        self.offsets = self
            .points
            .iter()
            .map(|point| point.offset(self.container_extent, self.direction))
            .collect();

        // Later points must sit closer to fully open; a violation means the
        // caller's list is out of order and settle decisions will be odd,
        // but the drawer still works.
        if self
            .offsets
            .windows(2)
            .any(|pair| pair[1].abs() > pair[0].abs())
        {
            warn!(offsets = ?self.offsets, "snap points are not ordered most-closed first");
        }
        debug!(extent = self.container_extent, offsets = ?self.offsets, "snap offsets resolved");
    }

    /// Move the panel to a snap point with the settle transition and fade
    /// the overlay per `fade_from_index`. Returns true when the active
    /// index changed.
    pub fn snap_to_index(&mut self, index: usize, host: &mut dyn HostSurface) -> bool {
        let Some(&offset) = self.offsets.get(index) else {
            return false;
        };

        let transition = Transition::settle(constants::TRANSITION_DURATION);
        host.set_transition(Part::Panel, Some(transition));
        host.set_transform(
            Part::Panel,
            Some(Transform::translation(self.direction.translation(offset))),
        );

        host.set_transition(Part::Overlay, Some(transition));
        let overlay_visible = index >= self.fade_from_index;
        host.set_opacity(Part::Overlay, if overlay_visible { 1.0 } else { 0.0 });

        let changed = index != self.active_index;
        self.active_index = index;
        changed
    }

    /// Prospective panel offset for an in-flight drag, clamped so the
    /// panel cannot travel past the last snap point toward open, nor
    /// (unless dismissible) past the first toward closed.
    pub fn drag_offset(&self, dragged_distance: f32, dismissible: bool) -> Option<f32> {
        let active = self.active_offset()?;
        let open_bound = *self.offsets.last()?;
        let closed_bound = if dismissible {
            self.container_extent * self.direction.offset_sign()
        } else {
            self.offsets[0]
        };

        let prospective = active + dragged_distance * self.direction.offset_sign();
        let (lo, hi) = if open_bound <= closed_bound {
            (open_bound, closed_bound)
        } else {
            (closed_bound, open_bound)
        };
        Some(prospective.clamp(lo, hi))
    }

    /// Decide where a released drag settles. First match wins:
    /// velocity jump to an extreme, one-step flick, nearest offset.
    pub fn release_decision(
        &self,
        input: SnapRelease,
        sequential_only: bool,
    ) -> Option<ReleaseDecision> {
        let active = self.active_offset()?;
        let toward_closed = input.dragged_distance > 0.0;

        if !sequential_only && input.velocity > constants::DISMISS_VELOCITY {
            if toward_closed {
                return Some(if input.dismissible {
                    ReleaseDecision::Dismiss
                } else {
                    ReleaseDecision::SnapTo(0)
                });
            }
            return Some(ReleaseDecision::SnapTo(self.last_index()));
        }

        if input.velocity > constants::FLICK_VELOCITY
            && input.dragged_distance.abs()
                < constants::FLICK_TRAVEL_FRACTION * self.container_extent
        {
            // A flick advances exactly one level rather than jumping
            // straight to an extreme.
            if toward_closed {
                if self.active_index == 0 {
                    return Some(if input.dismissible {
                        ReleaseDecision::Dismiss
                    } else {
                        ReleaseDecision::SnapTo(0)
                    });
                }
                return Some(ReleaseDecision::SnapTo(self.active_index - 1));
            }
            return Some(ReleaseDecision::SnapTo(
                (self.active_index + 1).min(self.last_index()),
            ));
        }

        let implied = active + input.dragged_distance * self.direction.offset_sign();
        let nearest = self
            .offsets
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (**a - implied)
                    .abs()
                    .partial_cmp(&(**b - implied).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(index, _)| index)?;
        Some(ReleaseDecision::SnapTo(nearest))
    }

    /// Overlay fade fraction for an in-flight drag; 1.0 means the scrim is
    /// fully visible. Edge cases collapse to 0 or 1, otherwise a linear
    /// interpolation across the gap bracketing `fade_from_index`.
    pub fn fade_fraction(&self, abs_dragged: f32, toward_closed: bool) -> Option<f32> {
        if self.offsets.is_empty() {
            return None;
        }
        let fade = self.fade_from_index.min(self.last_index());
        let boundary = fade.checked_sub(1);
        let at_boundary = boundary == Some(self.active_index);
        let at_or_above = self.active_index >= fade;

        if at_or_above && !toward_closed {
            return Some(1.0);
        }
        if at_boundary && toward_closed {
            return Some(0.0);
        }
        if !at_or_above && !at_boundary {
            return Some(0.0);
        }

        let upper = self.offsets.get(fade).copied()?;
        let lower = self.offsets.get(boundary?).copied()?;
        let gap = (lower - upper).abs();
        if gap <= f32::EPSILON {
            return Some(if at_or_above { 1.0 } else { 0.0 });
        }
        let t = (abs_dragged / gap).clamp(0.0, 1.0);
        Some(if at_or_above { 1.0 - t } else { t })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veldra_core::geometry::Size;

    fn engine(points: Vec<SnapPoint>, direction: Direction) -> SnapPointEngine {
        let mut engine = SnapPointEngine::new(points, direction, None);
        engine.resolve(Size::new(400.0, 800.0));
        engine
    }

    #[test]
    fn fraction_offsets_for_bottom_drawer() {
        let engine = engine(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );
        assert_eq!(engine.offsets(), &[560.0, 0.0]);
    }

    #[test]
    fn fraction_offsets_signed_for_top_drawer() {
        let engine = engine(
            vec![SnapPoint::Fraction(0.5), SnapPoint::Fraction(1.0)],
            Direction::Top,
        );
        assert_eq!(engine.offsets(), &[-400.0, 0.0]);
    }

    #[test]
    fn pixel_points_bypass_fraction_math() {
        let engine = engine(
            vec![SnapPoint::Pixels(200.0), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );
        assert_eq!(engine.offsets(), &[600.0, 0.0]);
    }

    #[test]
    fn horizontal_extent_uses_width() {
        let engine = engine(
            vec![SnapPoint::Fraction(0.5), SnapPoint::Fraction(1.0)],
            Direction::Right,
        );
        assert_eq!(engine.offsets(), &[200.0, 0.0]);
    }

    #[test]
    fn offsets_monotonic_toward_open() {
        let engine = engine(
            vec![
                SnapPoint::Fraction(0.2),
                SnapPoint::Fraction(0.5),
                SnapPoint::Fraction(0.9),
                SnapPoint::Fraction(1.0),
            ],
            Direction::Bottom,
        );
        for pair in engine.offsets().windows(2) {
            assert!(pair[1].abs() <= pair[0].abs());
        }
    }

    #[test]
    fn nearest_offset_settles_short_slow_drag() {
        let mut engine = engine(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );
        engine.active_index = 1;

        // 100px toward closed at 0.1 px/ms: closer to offset 0 than 560.
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: 100.0,
                    velocity: 0.1,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(1));

        // Past the midpoint the first point wins.
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: 300.0,
                    velocity: 0.1,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(0));
    }

    #[test]
    fn fast_closing_swipe_dismisses() {
        let mut engine = engine(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );
        engine.active_index = 1;

        let input = SnapRelease {
            dragged_distance: 50.0,
            velocity: 2.5,
            dismissible: true,
        };
        assert_eq!(
            engine.release_decision(input, false),
            Some(ReleaseDecision::Dismiss)
        );

        let input = SnapRelease {
            dismissible: false,
            ..input
        };
        assert_eq!(
            engine.release_decision(input, false),
            Some(ReleaseDecision::SnapTo(0))
        );
    }

    #[test]
    fn fast_opening_swipe_jumps_to_last() {
        let engine = engine(
            vec![
                SnapPoint::Fraction(0.3),
                SnapPoint::Fraction(0.6),
                SnapPoint::Fraction(1.0),
            ],
            Direction::Bottom,
        );
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: -50.0,
                    velocity: 2.5,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(2));
    }

    #[test]
    fn sequential_only_suppresses_velocity_jump() {
        let engine = engine(
            vec![
                SnapPoint::Fraction(0.3),
                SnapPoint::Fraction(0.6),
                SnapPoint::Fraction(1.0),
            ],
            Direction::Bottom,
        );
        // Fast opening swipe, short travel: steps one, not to the end.
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: -50.0,
                    velocity: 2.5,
                    dismissible: true,
                },
                true,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(1));
    }

    #[test]
    fn flick_advances_exactly_one_index() {
        let mut engine = engine(
            vec![
                SnapPoint::Fraction(0.3),
                SnapPoint::Fraction(0.6),
                SnapPoint::Fraction(1.0),
            ],
            Direction::Bottom,
        );
        engine.active_index = 1;

        // Short fast flick toward open.
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: -60.0,
                    velocity: 0.6,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(2));

        // Short fast flick toward closed.
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: 60.0,
                    velocity: 0.6,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(0));
    }

    #[test]
    fn flick_at_extremes_stays_or_dismisses() {
        let mut engine = engine(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );

        // Closing flick from the first snap point dismisses when allowed.
        let input = SnapRelease {
            dragged_distance: 60.0,
            velocity: 0.6,
            dismissible: true,
        };
        assert_eq!(
            engine.release_decision(input, false),
            Some(ReleaseDecision::Dismiss)
        );
        let input = SnapRelease {
            dismissible: false,
            ..input
        };
        assert_eq!(
            engine.release_decision(input, false),
            Some(ReleaseDecision::SnapTo(0))
        );

        // Opening flick from the last stays at the last.
        engine.active_index = 1;
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: -60.0,
                    velocity: 0.6,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(1));
    }

    #[test]
    fn long_fast_drag_settles_by_position() {
        let mut engine = engine(
            vec![
                SnapPoint::Fraction(0.3),
                SnapPoint::Fraction(0.6),
                SnapPoint::Fraction(1.0),
            ],
            Direction::Bottom,
        );
        engine.active_index = 2;

        // Velocity above the flick tier but travel past 40% of the
        // container: nearest-offset wins, which may skip levels.
        let decision = engine
            .release_decision(
                SnapRelease {
                    dragged_distance: 500.0,
                    velocity: 0.6,
                    dismissible: true,
                },
                false,
            )
            .unwrap();
        assert_eq!(decision, ReleaseDecision::SnapTo(0));
    }

    #[test]
    fn drag_offset_clamps_at_open_limit() {
        let mut engine = engine(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );
        engine.active_index = 1;

        // Toward open from fully open: pinned at the last offset.
        assert_eq!(engine.drag_offset(-120.0, true), Some(0.0));
    }

    #[test]
    fn drag_offset_clamps_closed_unless_dismissible() {
        let engine = engine(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
        );

        // From the first point toward closed: held unless dismissible.
        assert_eq!(engine.drag_offset(120.0, false), Some(560.0));
        assert_eq!(engine.drag_offset(120.0, true), Some(680.0));
    }

    #[test]
    fn fade_fraction_edges_and_interpolation() {
        let mut engine = SnapPointEngine::new(
            vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)],
            Direction::Bottom,
            Some(1),
        );
        engine.resolve(Size::new(400.0, 800.0));

        // At the fade index, opening further keeps the scrim at full.
        engine.active_index = 1;
        assert_eq!(engine.fade_fraction(100.0, false), Some(1.0));
        // Closing from the fade index fades linearly across the 560px gap.
        let fraction = engine.fade_fraction(140.0, true).unwrap();
        assert!((fraction - 0.75).abs() < 1e-6);

        // One below the fade index, closing hides the scrim outright,
        // opening fades it back in.
        engine.active_index = 0;
        assert_eq!(engine.fade_fraction(140.0, true), Some(0.0));
        let fraction = engine.fade_fraction(140.0, false).unwrap();
        assert!((fraction - 0.25).abs() < 1e-6);
    }
}
