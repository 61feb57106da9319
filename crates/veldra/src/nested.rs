//! Parent-side coordination when a drawer opens another drawer on top.
//!
//! The parent shrinks and shifts away while the child is open; dragging
//! the child reports fractional progress so the parent interpolates
//! continuously instead of snapping. After the child fully closes the
//! parent's transform is reset instantaneously, behind a short delay, to
//! avoid a visible jump.

use crate::config::Direction;
use crate::constants;
use crate::host::{HostSurface, Part, Transform, Transition};

/// Drives the parent drawer's own panel while a nested child is open.
#[derive(Debug)]
pub struct NestedDrawerCoordinator {
    direction: Direction,
    displaced: bool,
}

impl NestedDrawerCoordinator {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            displaced: false,
        }
    }

    pub fn is_displaced(&self) -> bool {
        self.displaced
    }

    fn displaced_scale(&self, host: &dyn HostSurface) -> Option<f32> {
        let width = host.window_size().width;
        if width <= 0.0 {
            return None;
        }
        Some((width - constants::NESTED_DISPLACEMENT) / width)
    }

    fn transform_at(&self, host: &dyn HostSurface, progress_closed: f32) -> Option<Transform> {
        let scale = self.displaced_scale(host)?;
        let t = progress_closed.clamp(0.0, 1.0);
        let shift = -constants::NESTED_DISPLACEMENT * self.direction.offset_sign() * (1.0 - t);
        Some(
            Transform::translation(self.direction.translation(shift))
                .with_scale(scale + (1.0 - scale) * t),
        )
    }

    /// A child opened over this drawer.
    pub fn on_child_open(&mut self, host: &mut dyn HostSurface) {
        let Some(transform) = self.transform_at(host, 0.0) else {
            return;
        };
        self.displaced = true;
        host.set_transition(
            Part::Panel,
            Some(Transition::settle(constants::TRANSITION_DURATION)),
        );
        host.set_transform(Part::Panel, Some(transform));
    }

    /// The child is being dragged; `fraction_closed` runs 0 (child fully
    /// open) to 1 (child about to close).
    pub fn on_child_drag(&mut self, host: &mut dyn HostSurface, fraction_closed: f32) {
        if !self.displaced {
            return;
        }
        let Some(transform) = self.transform_at(host, fraction_closed) else {
            return;
        };
        host.set_transition(Part::Panel, None);
        host.set_transform(Part::Panel, Some(transform));
    }

    /// The child's drag released; it either settled open again or began
    /// closing.
    pub fn on_child_release(&mut self, host: &mut dyn HostSurface, child_stayed_open: bool) {
        if !self.displaced {
            return;
        }
        let progress = if child_stayed_open { 0.0 } else { 1.0 };
        let Some(transform) = self.transform_at(host, progress) else {
            return;
        };
        host.set_transition(
            Part::Panel,
            Some(Transition::settle(constants::TRANSITION_DURATION)),
        );
        host.set_transform(Part::Panel, Some(transform));
        if !child_stayed_open {
            self.displaced = false;
        }
    }

    /// Deferred cleanup after the child finished closing: transition
    /// disabled so the reset is invisible.
    pub fn reset(&mut self, host: &mut dyn HostSurface) {
        self.displaced = false;
        host.set_transition(Part::Panel, None);
        host.set_transform(Part::Panel, Some(Transform::IDENTITY));
    }
}
