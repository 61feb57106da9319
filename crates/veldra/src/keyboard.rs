//! On-screen-keyboard-aware panel repositioning.
//!
//! Watches visual-viewport resizes and resizes/repositions the open panel
//! so a focused input stays visible while the keyboard is up. Toolbar
//! show/hide produces small viewport deltas; only a jump larger than the
//! hysteresis window flips the keyboard flag.

use tracing::trace;

use crate::constants;
use crate::host::{HostSurface, Part};
use crate::platform::PlatformCaps;

/// Tracks keyboard state and drives panel height/offset while it is open.
#[derive(Debug)]
pub struct ViewportKeyboardAdapter {
    caps: PlatformCaps,
    keyboard_is_open: bool,
    previous_diff: f32,
    /// Panel height captured before any keyboard-driven shrinking.
    natural_height: Option<f32>,
}

impl ViewportKeyboardAdapter {
    pub fn new(caps: PlatformCaps) -> Self {
        Self {
            caps,
            keyboard_is_open: false,
            previous_diff: 0.0,
            natural_height: None,
        }
    }

    pub fn keyboard_is_open(&self) -> bool {
        self.keyboard_is_open
    }

    /// Forget the captured natural height (e.g. when the drawer closes).
    pub fn reset(&mut self) {
        self.keyboard_is_open = false;
        self.previous_diff = 0.0;
        self.natural_height = None;
    }

    /// Handle one visual-viewport resize.
    ///
    /// `active_snap_offset` is the resolved offset of the active snap
    /// point, when snap points are configured; it folds the panel's snapped
    /// displacement into the viewport delta and pins the panel to the
    /// viewport bottom while the keyboard is up.
    pub fn on_viewport_resize(
        &mut self,
        host: &mut dyn HostSurface,
        active_snap_offset: Option<f32>,
    ) {
        if !self.caps.contains(PlatformCaps::VISUAL_VIEWPORT) {
            return;
        }
        let Some(viewport) = host.visual_viewport_size() else {
            return;
        };
        if !(host.input_focused_in_panel() || self.keyboard_is_open) {
            return;
        }
        let Some(rect) = host.panel_rect() else {
            return;
        };

        let window_height = host.window_size().height;
        let mut diff = window_height - viewport.height;
        let panel_height = rect.height;
        let natural_height = *self.natural_height.get_or_insert(panel_height);

        if (self.previous_diff - diff).abs() > constants::KEYBOARD_HYSTERESIS {
            self.keyboard_is_open = !self.keyboard_is_open;
            trace!(open = self.keyboard_is_open, "keyboard flag toggled");
        }

        if let Some(offset) = active_snap_offset {
            diff += offset.abs();
        }
        self.previous_diff = diff;

        if panel_height > viewport.height || self.keyboard_is_open {
            if natural_height > viewport.height {
                // Shrink so the focused input stays visible; tall panels
                // keep their own top edge, short ones keep a fixed
                // allowance from the window top.
                let offset = if panel_height > constants::TALL_PANEL_FRACTION * window_height {
                    rect.y
                } else {
                    constants::WINDOW_TOP_OFFSET
                };
                host.set_height(Part::Panel, Some(viewport.height - offset));
            } else {
                host.set_height(Part::Panel, Some(natural_height));
            }
        } else {
            host.set_height(Part::Panel, Some(natural_height));
        }

        if active_snap_offset.is_some() && self.keyboard_is_open {
            // Snap-point math assumes no keyboard; pin to the literal
            // bottom while it is up.
            host.set_bottom(Part::Panel, Some(0.0));
        } else {
            host.set_bottom(Part::Panel, None);
        }
    }
}
