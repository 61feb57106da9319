//! Depth effect behind an open drawer.
//!
//! Shrinks and rounds the page-content wrapper while a drawer is open,
//! proportionally following drag progress, and reverses exactly on close.
//! The body background is restored only after the full transition
//! duration so the original color cannot flash through the still-animating
//! corners.

use crate::config::Direction;
use crate::constants;
use crate::host::{HostSurface, Part, Transform, Transition};

/// Controls the page-content wrapper scale/translate/radius.
#[derive(Debug)]
pub struct BackgroundScaleController {
    direction: Direction,
    enabled: bool,
    active: bool,
}

impl BackgroundScaleController {
    pub fn new(direction: Direction, enabled: bool) -> Self {
        Self {
            direction,
            enabled,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn open_scale(&self, host: &dyn HostSurface) -> Option<f32> {
        let width = host.window_size().width;
        if width <= 0.0 {
            return None;
        }
        Some((width - constants::BACKGROUND_INSET) / width)
    }

    fn open_transform(&self, scale: f32) -> Transform {
        let shift = constants::BACKGROUND_TRANSLATE * self.direction.offset_sign();
        Transform::translation(self.direction.translation(shift)).with_scale(scale)
    }

    /// Apply the depth effect when the drawer opens.
    pub fn on_open(&mut self, host: &mut dyn HostSurface) {
        if !self.enabled || self.active {
            return;
        }
        let Some(scale) = self.open_scale(host) else {
            return;
        };
        self.active = true;

        host.set_background(Part::Body, Some("black"));
        host.set_transition(
            Part::Wrapper,
            Some(Transition::settle(constants::TRANSITION_DURATION)),
        );
        host.set_border_radius(Part::Wrapper, Some(constants::BACKGROUND_RADIUS));
        host.set_transform(Part::Wrapper, Some(self.open_transform(scale)));
    }

    /// Follow drag progress: fraction 1 (about to close) returns the
    /// wrapper to identity, fraction 0 holds the full effect.
    pub fn on_drag_progress(&mut self, host: &mut dyn HostSurface, fraction_closed: f32) {
        if !self.active {
            return;
        }
        let Some(open_scale) = self.open_scale(host) else {
            return;
        };
        let t = fraction_closed.clamp(0.0, 1.0);
        let scale = open_scale + (1.0 - open_scale) * t;
        let shift = constants::BACKGROUND_TRANSLATE * self.direction.offset_sign() * (1.0 - t);

        host.set_transition(Part::Wrapper, None);
        host.set_transform(
            Part::Wrapper,
            Some(Transform::translation(self.direction.translation(shift)).with_scale(scale)),
        );
    }

    /// Re-settle the wrapper after a drag that left the drawer open.
    pub fn on_settle(&mut self, host: &mut dyn HostSurface) {
        if !self.active {
            return;
        }
        let Some(scale) = self.open_scale(host) else {
            return;
        };
        host.set_transition(
            Part::Wrapper,
            Some(Transition::settle(constants::TRANSITION_DURATION)),
        );
        host.set_transform(Part::Wrapper, Some(self.open_transform(scale)));
    }

    /// Reverse the effect on close. The body background stays overridden
    /// until [`BackgroundScaleController::restore_background`] runs after
    /// the transition.
    pub fn on_close(&mut self, host: &mut dyn HostSurface) {
        if !self.active {
            return;
        }
        self.active = false;

        host.set_transition(
            Part::Wrapper,
            Some(Transition::settle(constants::TRANSITION_DURATION)),
        );
        host.set_transform(Part::Wrapper, Some(Transform::IDENTITY));
        host.set_border_radius(Part::Wrapper, None);
    }

    /// Drop the body background override once the close transition ended.
    pub fn restore_background(&self, host: &mut dyn HostSurface) {
        if self.active {
            // Reopened before the deferred restore fired.
            return;
        }
        host.set_background(Part::Body, None);
    }
}
