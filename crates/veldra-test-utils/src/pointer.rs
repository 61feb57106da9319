use veldra::gesture::PointerEvent;
use veldra::host::ScrollableState;
use veldra_core::math::Vec2;
use veldra_core::time::Millis;

/// Builder for pointer events in tests.
#[derive(Debug, Clone, Default)]
pub struct PointerEventBuilder {
    event: PointerEvent,
}

impl PointerEventBuilder {
    pub fn at(x: f32, y: f32) -> Self {
        let mut builder = Self::default();
        builder.event.position = Vec2::new(x, y);
        builder
    }

    pub fn pointer_id(mut self, id: u64) -> Self {
        self.event.pointer_id = id;
        self
    }

    pub fn timestamp(mut self, timestamp: Millis) -> Self {
        self.event.timestamp = timestamp;
        self
    }

    pub fn no_drag(mut self) -> Self {
        self.event.target.opts_out_of_drag = true;
        self
    }

    pub fn on_document_root(mut self) -> Self {
        self.event.target.is_document_root = true;
        self
    }

    pub fn in_handle(mut self) -> Self {
        self.event.target.in_handle = true;
        self
    }

    pub fn scroll_ancestor(mut self, offset: f32, max_offset: f32) -> Self {
        self.event.target.scroll_ancestors.push(ScrollableState {
            offset,
            max_offset,
        });
        self
    }

    pub fn build(self) -> PointerEvent {
        self.event
    }
}
