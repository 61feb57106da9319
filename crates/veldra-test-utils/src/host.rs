use ahash::HashMap;

use veldra::host::{BodyStyle, HostSurface, Part, Transform, Transition};
use veldra_core::geometry::{Rect, Size};
use veldra_core::math::Vec2;

/// Host surface that records every effect instead of performing it.
///
/// Queries return values the test configured via the `set_*` methods;
/// effects land in per-part maps and counters the test can assert on.
pub struct RecordingHost {
    window: Size<f32>,
    visual_viewport: Option<Size<f32>>,
    panel: Option<Rect<f32>>,
    scroll: Vec2,
    body: BodyStyle,
    selection_active: bool,
    input_focused: bool,

    transforms: HashMap<Part, Transform>,
    transitions: HashMap<Part, Transition>,
    opacities: HashMap<Part, f32>,
    heights: HashMap<Part, f32>,
    bottoms: HashMap<Part, f32>,
    radii: HashMap<Part, f32>,
    backgrounds: HashMap<Part, String>,

    body_pointer_events: bool,
    scroll_suppressed: bool,
    suppression_installs: u32,
    suppression_removals: u32,
    last_scroll_to: Option<Vec2>,
    captured_pointers: Vec<u64>,
    released_pointers: Vec<u64>,
    focus_scroll_suppressions: u32,
    scroll_into_view_count: u32,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            window: Size::new(1024.0, 768.0),
            visual_viewport: None,
            panel: None,
            scroll: Vec2::ZERO,
            body: BodyStyle::default(),
            selection_active: false,
            input_focused: false,
            transforms: HashMap::default(),
            transitions: HashMap::default(),
            opacities: HashMap::default(),
            heights: HashMap::default(),
            bottoms: HashMap::default(),
            radii: HashMap::default(),
            backgrounds: HashMap::default(),
            body_pointer_events: true,
            scroll_suppressed: false,
            suppression_installs: 0,
            suppression_removals: 0,
            last_scroll_to: None,
            captured_pointers: Vec::new(),
            released_pointers: Vec::new(),
            focus_scroll_suppressions: 0,
            scroll_into_view_count: 0,
        }
    }

    // -- Test configuration --

    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window = Size::new(width, height);
    }

    pub fn set_visual_viewport(&mut self, width: f32, height: f32) {
        self.visual_viewport = Some(Size::new(width, height));
    }

    pub fn clear_visual_viewport(&mut self) {
        self.visual_viewport = None;
    }

    pub fn set_panel_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.panel = Some(Rect {
            x,
            y,
            width,
            height,
        });
    }

    pub fn clear_panel_rect(&mut self) {
        self.panel = None;
    }

    pub fn set_scroll_position(&mut self, x: f32, y: f32) {
        self.scroll = Vec2::new(x, y);
    }

    pub fn set_body_style(&mut self, style: BodyStyle) {
        self.body = style;
    }

    pub fn set_text_selection(&mut self, active: bool) {
        self.selection_active = active;
    }

    pub fn set_input_focused(&mut self, focused: bool) {
        self.input_focused = focused;
    }

    // -- Recorded state --

    pub fn transform(&self, part: Part) -> Option<Transform> {
        self.transforms.get(&part).copied()
    }

    pub fn transition(&self, part: Part) -> Option<Transition> {
        self.transitions.get(&part).copied()
    }

    pub fn opacity(&self, part: Part) -> Option<f32> {
        self.opacities.get(&part).copied()
    }

    pub fn background(&self, part: Part) -> Option<String> {
        self.backgrounds.get(&part).cloned()
    }

    pub fn border_radius(&self, part: Part) -> Option<f32> {
        self.radii.get(&part).copied()
    }

    pub fn panel_height_override(&self) -> Option<f32> {
        self.heights.get(&Part::Panel).copied()
    }

    pub fn panel_bottom_override(&self) -> Option<f32> {
        self.bottoms.get(&Part::Panel).copied()
    }

    /// Panel translate along the vertical axis, when a transform is set.
    pub fn panel_translate_y(&self) -> Option<f32> {
        self.transform(Part::Panel).map(|t| t.translate.y)
    }

    pub fn body_style_snapshot(&self) -> BodyStyle {
        self.body.clone()
    }

    pub fn body_pointer_events_enabled(&self) -> bool {
        self.body_pointer_events
    }

    pub fn scroll_suppression_installs(&self) -> u32 {
        self.suppression_installs
    }

    pub fn scroll_suppression_removals(&self) -> u32 {
        self.suppression_removals
    }

    pub fn is_scroll_suppressed(&self) -> bool {
        self.scroll_suppressed
    }

    pub fn last_scroll_to(&self) -> Option<Vec2> {
        self.last_scroll_to
    }

    pub fn captured_pointers(&self) -> &[u64] {
        &self.captured_pointers
    }

    pub fn released_pointers(&self) -> &[u64] {
        &self.released_pointers
    }

    pub fn focus_scroll_suppressions(&self) -> u32 {
        self.focus_scroll_suppressions
    }

    pub fn scroll_into_view_count(&self) -> u32 {
        self.scroll_into_view_count
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSurface for RecordingHost {
    fn panel_rect(&self) -> Option<Rect<f32>> {
        self.panel
    }

    fn window_size(&self) -> Size<f32> {
        self.window
    }

    fn visual_viewport_size(&self) -> Option<Size<f32>> {
        self.visual_viewport
    }

    fn scroll_position(&self) -> Vec2 {
        self.scroll
    }

    fn body_style(&self) -> BodyStyle {
        self.body.clone()
    }

    fn text_selection_active(&self) -> bool {
        self.selection_active
    }

    fn input_focused_in_panel(&self) -> bool {
        self.input_focused
    }

    fn set_transform(&mut self, part: Part, transform: Option<Transform>) {
        match transform {
            Some(transform) => {
                self.transforms.insert(part, transform);
            }
            None => {
                self.transforms.remove(&part);
            }
        }
    }

    fn set_transition(&mut self, part: Part, transition: Option<Transition>) {
        match transition {
            Some(transition) => {
                self.transitions.insert(part, transition);
            }
            None => {
                self.transitions.remove(&part);
            }
        }
    }

    fn set_opacity(&mut self, part: Part, opacity: f32) {
        self.opacities.insert(part, opacity);
    }

    fn set_height(&mut self, part: Part, height: Option<f32>) {
        match height {
            Some(height) => {
                self.heights.insert(part, height);
            }
            None => {
                self.heights.remove(&part);
            }
        }
    }

    fn set_bottom(&mut self, part: Part, bottom: Option<f32>) {
        match bottom {
            Some(bottom) => {
                self.bottoms.insert(part, bottom);
            }
            None => {
                self.bottoms.remove(&part);
            }
        }
    }

    fn set_border_radius(&mut self, part: Part, radius: Option<f32>) {
        match radius {
            Some(radius) => {
                self.radii.insert(part, radius);
            }
            None => {
                self.radii.remove(&part);
            }
        }
    }

    fn set_background(&mut self, part: Part, color: Option<&str>) {
        match color {
            Some(color) => {
                self.backgrounds.insert(part, color.to_owned());
            }
            None => {
                self.backgrounds.remove(&part);
            }
        }
    }

    fn apply_body_style(&mut self, style: &BodyStyle) {
        self.body = style.clone();
    }

    fn set_body_pointer_events(&mut self, enabled: bool) {
        self.body_pointer_events = enabled;
    }

    fn set_body_scroll_suppressed(&mut self, suppressed: bool) {
        if suppressed && !self.scroll_suppressed {
            self.suppression_installs += 1;
        }
        if !suppressed && self.scroll_suppressed {
            self.suppression_removals += 1;
        }
        self.scroll_suppressed = suppressed;
    }

    fn scroll_to(&mut self, position: Vec2) {
        self.scroll = position;
        self.last_scroll_to = Some(position);
    }

    fn capture_pointer(&mut self, pointer_id: u64) {
        self.captured_pointers.push(pointer_id);
    }

    fn release_pointer(&mut self, pointer_id: u64) {
        self.released_pointers.push(pointer_id);
    }

    fn suppress_focus_scroll(&mut self) {
        self.focus_scroll_suppressions += 1;
    }

    fn scroll_focused_into_view(&mut self) {
        self.scroll_into_view_count += 1;
    }
}
