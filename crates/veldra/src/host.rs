//! The seam between the engine and whatever actually renders the page.
//!
//! The engine computes offsets, transforms, and style mutations; a
//! [`HostSurface`] implementation applies them to the real presentation
//! layer. Every query returns `Option` (or a neutral default) where the
//! underlying node may not exist yet, and engine code guards accordingly —
//! the panel can be interrogated before mount or after teardown because of
//! scheduled cleanup.

use veldra_core::geometry::{Rect, Size};
use veldra_core::math::Vec2;
use veldra_core::time::Millis;

/// The structural slots an engine instance manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    /// The draggable panel surface itself.
    Panel,
    /// The scrim behind the panel.
    Overlay,
    /// The document body.
    Body,
    /// The page-content wrapper scaled for the depth effect.
    Wrapper,
}

/// Transition timing applied alongside a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Millis,
    pub easing: Easing,
}

impl Transition {
    /// The settle curve used for open, close, and snap movements.
    pub fn settle(duration: Millis) -> Self {
        Self {
            duration,
            easing: Easing::Settle,
        }
    }
}

/// Easing shapes the host maps onto its animation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOut,
    /// The drawer settle curve; an opaque presentation constant.
    Settle,
}

/// A 2D translate plus uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translate: Vec2,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    pub fn translation(translate: Vec2) -> Self {
        Self {
            translate,
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Snapshot of the body's inline position styling, restored byte-for-byte
/// when the fixed-position scroll trick is released.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BodyStyle {
    pub position: String,
    pub top: String,
    pub left: String,
    pub height: String,
}

/// Scroll state of one scrollable ancestor of a pointer target, measured
/// along the drawer's travel axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollableState {
    /// Current scroll offset from the origin.
    pub offset: f32,
    /// Maximum reachable offset.
    pub max_offset: f32,
}

impl ScrollableState {
    /// Whether the element sits at its scroll origin for travel toward the
    /// closed position (content scrolled all the way back).
    pub fn at_origin(&self) -> bool {
        self.offset <= 0.0
    }

    /// Whether the element is scrolled to its end bound.
    pub fn at_end(&self) -> bool {
        self.offset >= self.max_offset
    }
}

/// What the host knows about the element under a pointer event.
///
/// The host resolves this once per event so the engine stays free of any
/// document-tree walking.
#[derive(Debug, Clone, Default)]
pub struct TargetDescriptor {
    /// The element (or an ancestor) carries the explicit no-drag marker.
    pub opts_out_of_drag: bool,
    /// The event landed on the document root rather than panel content.
    pub is_document_root: bool,
    /// The target sits inside the drawer's dedicated drag handle.
    pub in_handle: bool,
    /// Scrollable ancestors between the target and the panel root,
    /// innermost first.
    pub scroll_ancestors: Vec<ScrollableState>,
}

/// Presentation surface the engine drives.
pub trait HostSurface {
    // -- Queries --

    /// Bounding rect of the panel, if mounted.
    fn panel_rect(&self) -> Option<Rect<f32>>;
    /// Logical window size.
    fn window_size(&self) -> Size<f32>;
    /// Visual viewport size, when the platform reports one.
    fn visual_viewport_size(&self) -> Option<Size<f32>>;
    /// Current window scroll position.
    fn scroll_position(&self) -> Vec2;
    /// Inline position styling of the body.
    fn body_style(&self) -> BodyStyle;
    /// Whether a text selection is currently active anywhere on the page.
    fn text_selection_active(&self) -> bool;
    /// Whether a text input inside the panel currently holds focus.
    fn input_focused_in_panel(&self) -> bool;

    // -- Effects --

    /// Set or clear a part's transform.
    fn set_transform(&mut self, part: Part, transform: Option<Transform>);
    /// Set or clear a part's transition; `None` makes changes instantaneous.
    fn set_transition(&mut self, part: Part, transition: Option<Transition>);
    /// Set a part's opacity.
    fn set_opacity(&mut self, part: Part, opacity: f32);
    /// Override or clear a part's height.
    fn set_height(&mut self, part: Part, height: Option<f32>);
    /// Override or clear a part's offset from the viewport bottom.
    fn set_bottom(&mut self, part: Part, bottom: Option<f32>);
    /// Set or clear a part's corner radius.
    fn set_border_radius(&mut self, part: Part, radius: Option<f32>);
    /// Set or clear a part's background color.
    fn set_background(&mut self, part: Part, color: Option<&str>);
    /// Write inline position styling back onto the body.
    fn apply_body_style(&mut self, style: &BodyStyle);
    /// Toggle pointer events on the body.
    fn set_body_pointer_events(&mut self, enabled: bool);
    /// Install or remove plain overflow-based scroll suppression.
    fn set_body_scroll_suppressed(&mut self, suppressed: bool);
    /// Scroll the window to an absolute position.
    fn scroll_to(&mut self, position: Vec2);
    /// Route subsequent pointer events for this pointer to the panel.
    fn capture_pointer(&mut self, pointer_id: u64);
    /// Release a previously captured pointer.
    fn release_pointer(&mut self, pointer_id: u64);
    /// Momentarily nudge the focused input off-screen and back so the
    /// platform's own scroll-into-view cannot fight the scroll lock.
    fn suppress_focus_scroll(&mut self);
    /// Manually bring the focused input into view.
    fn scroll_focused_into_view(&mut self);
}
