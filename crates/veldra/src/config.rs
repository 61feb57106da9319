//! Per-drawer configuration.

use std::rc::Rc;

use veldra_core::geometry::{Rect, Size};
use veldra_core::math::Vec2;
use veldra_core::time::Millis;

use crate::constants;
use crate::snap::SnapPoint;

/// Edge of the screen a drawer is anchored to.
///
/// The direction decides which axis drag distances and transforms are
/// computed on, and the sign convention for "open" displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Direction {
    /// Whether travel happens along the vertical axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Top | Direction::Bottom)
    }

    /// Pointer coordinate along the travel axis.
    pub fn axis_value(self, position: Vec2) -> f32 {
        if self.is_vertical() {
            position.y
        } else {
            position.x
        }
    }

    /// Container extent along the travel axis.
    pub fn extent(self, size: Size<f32>) -> f32 {
        if self.is_vertical() {
            size.height
        } else {
            size.width
        }
    }

    /// Sign of a closed-position offset relative to the fully-open resting
    /// position: positive for bottom/right drawers, negative for top/left.
    pub fn offset_sign(self) -> f32 {
        match self {
            Direction::Bottom | Direction::Right => 1.0,
            Direction::Top | Direction::Left => -1.0,
        }
    }

    /// Sign applied to raw axis displacement so that positive dragged
    /// distance always means "moving toward closed".
    pub fn drag_sign(self) -> f32 {
        -self.offset_sign()
    }

    /// Axis-aligned translation of `amount` along the travel axis.
    pub fn translation(self, amount: f32) -> Vec2 {
        if self.is_vertical() {
            Vec2::new(0.0, amount)
        } else {
            Vec2::new(amount, 0.0)
        }
    }
}

/// Callback invoked when the externally observable open state changes.
pub type OpenChangeCallback = Rc<dyn Fn(bool)>;
/// Callback invoked when the active snap point changes.
pub type SnapPointChangeCallback = Rc<dyn Fn(usize)>;

/// Configuration a drawer is mounted with. Immutable for the lifetime of
/// the mount.
#[derive(Clone)]
pub struct DrawerConfig {
    pub direction: Direction,
    pub snap_points: Vec<SnapPoint>,
    /// Snap points at or above this index keep the scrim visible; below it
    /// the scrim is hidden. Defaults to the last snap point.
    pub fade_from_index: Option<usize>,
    /// Whether a small-enough drag or flick may close the drawer rather
    /// than just settle.
    pub dismissible: bool,
    /// Whether the background is scroll-locked and inert while open.
    pub modal: bool,
    /// Restrict drag initiation to the dedicated handle element.
    pub handle_only: bool,
    pub should_scale_background: bool,
    /// Disable the high-velocity jump to the extremes; every release moves
    /// at most one snap point.
    pub snap_to_sequential_point: bool,
    /// Fraction of the visible panel extent a drag must cover to close a
    /// drawer without snap points.
    pub close_threshold: f32,
    /// Cooldown for repeated rejected drag attempts.
    pub scroll_lock_timeout: Millis,
    /// Alternate positioning root for non-fullscreen hosting.
    pub container: Option<Rect<f32>>,
    pub on_open_change: Option<OpenChangeCallback>,
    pub on_snap_point_change: Option<SnapPointChangeCallback>,
}

impl DrawerConfig {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            snap_points: Vec::new(),
            fade_from_index: None,
            dismissible: true,
            modal: true,
            handle_only: false,
            should_scale_background: false,
            snap_to_sequential_point: false,
            close_threshold: constants::CLOSE_THRESHOLD,
            scroll_lock_timeout: constants::SCROLL_LOCK_TIMEOUT,
            container: None,
            on_open_change: None,
            on_snap_point_change: None,
        }
    }

    pub fn snap_points(mut self, points: impl Into<Vec<SnapPoint>>) -> Self {
        self.snap_points = points.into();
        self
    }

    pub fn fade_from_index(mut self, index: usize) -> Self {
        self.fade_from_index = Some(index);
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn handle_only(mut self, handle_only: bool) -> Self {
        self.handle_only = handle_only;
        self
    }

    pub fn scale_background(mut self, scale: bool) -> Self {
        self.should_scale_background = scale;
        self
    }

    pub fn snap_to_sequential_point(mut self, sequential: bool) -> Self {
        self.snap_to_sequential_point = sequential;
        self
    }

    pub fn close_threshold(mut self, threshold: f32) -> Self {
        self.close_threshold = threshold;
        self
    }

    pub fn scroll_lock_timeout(mut self, timeout: Millis) -> Self {
        self.scroll_lock_timeout = timeout;
        self
    }

    pub fn container(mut self, container: Rect<f32>) -> Self {
        self.container = Some(container);
        self
    }

    pub fn on_open_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(bool) + 'static,
    {
        self.on_open_change = Some(Rc::new(callback));
        self
    }

    pub fn on_snap_point_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize) + 'static,
    {
        self.on_snap_point_change = Some(Rc::new(callback));
        self
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}

impl std::fmt::Debug for DrawerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawerConfig")
            .field("direction", &self.direction)
            .field("snap_points", &self.snap_points)
            .field("fade_from_index", &self.fade_from_index)
            .field("dismissible", &self.dismissible)
            .field("modal", &self.modal)
            .field("handle_only", &self.handle_only)
            .field("should_scale_background", &self.should_scale_background)
            .field("snap_to_sequential_point", &self.snap_to_sequential_point)
            .field("close_threshold", &self.close_threshold)
            .field("scroll_lock_timeout", &self.scroll_lock_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_sign_opposes_offset_sign() {
        for direction in [
            Direction::Top,
            Direction::Bottom,
            Direction::Left,
            Direction::Right,
        ] {
            assert_eq!(direction.drag_sign(), -direction.offset_sign());
        }
    }

    #[test]
    fn axis_value_follows_orientation() {
        let pos = Vec2::new(40.0, 300.0);
        assert_eq!(Direction::Bottom.axis_value(pos), 300.0);
        assert_eq!(Direction::Left.axis_value(pos), 40.0);
    }

    #[test]
    fn builder_chains() {
        let config = DrawerConfig::new(Direction::Bottom)
            .dismissible(false)
            .modal(false)
            .close_threshold(0.5);
        assert!(!config.dismissible);
        assert!(!config.modal);
        assert_eq!(config.close_threshold, 0.5);
    }
}
