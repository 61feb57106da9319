//! Fixed-position body trick for the platform that ignores scroll
//! prevention while a layer is open.
//!
//! While locked, the body is switched to fixed positioning anchored at the
//! negative current scroll offset, which freezes the page visually in
//! place. On release the original inline style values are written back
//! byte-for-byte and the window re-scrolled to the coordinate implied by
//! the fixed-position anchor. Only one snapshot exists per nesting of the
//! trick: a second capture while one is pending is a no-op.

use tracing::debug;
use veldra_core::math::Vec2;

use crate::host::{BodyStyle, HostSurface};
use crate::platform::PlatformCaps;

/// Owns the single pending body-position snapshot.
#[derive(Debug)]
pub struct PositionFixedManager {
    caps: PlatformCaps,
    previous: Option<BodyStyle>,
    anchored_scroll: Vec2,
}

impl PositionFixedManager {
    pub fn new(caps: PlatformCaps) -> Self {
        Self {
            caps,
            previous: None,
            anchored_scroll: Vec2::ZERO,
        }
    }

    fn enabled(&self) -> bool {
        self.caps.contains(PlatformCaps::FIXED_POSITION_TRICK)
    }

    /// Whether a snapshot is pending restore.
    pub fn is_captured(&self) -> bool {
        self.previous.is_some()
    }

    /// Snapshot the body's inline position styling and switch it to fixed
    /// positioning anchored at the negative current scroll offset.
    pub fn capture(&mut self, host: &mut dyn HostSurface) {
        if !self.enabled() || self.previous.is_some() {
            return;
        }

        let scroll = host.scroll_position();
        self.previous = Some(host.body_style());
        self.anchored_scroll = scroll;

        host.apply_body_style(&BodyStyle {
            position: "fixed".into(),
            top: px(-scroll.y),
            left: px(-scroll.x),
            height: "auto".into(),
        });
        debug!(x = scroll.x, y = scroll.y, "body position captured");
    }

    /// Restore the captured inline styles and re-scroll the window to the
    /// coordinate implied by the fixed-position anchor.
    pub fn restore(&mut self, host: &mut dyn HostSurface) {
        let Some(previous) = self.previous.take() else {
            return;
        };

        // The anchor coordinate lives in the body's current top/left; the
        // stored scroll position covers a host that already lost them.
        let current = host.body_style();
        let x = parse_px(&current.left).map_or(self.anchored_scroll.x, |v| -v);
        let y = parse_px(&current.top).map_or(self.anchored_scroll.y, |v| -v);

        host.apply_body_style(&previous);
        host.scroll_to(Vec2::new(x, y));
        debug!(x, y, "body position restored");
    }
}

fn parse_px(value: &str) -> Option<f32> {
    value.trim().strip_suffix("px")?.trim().parse().ok()
}

fn px(value: f32) -> String {
    // Normalize negative zero so a zero scroll writes "0px".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}
