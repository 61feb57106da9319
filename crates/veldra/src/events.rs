//! Outbound event queue drained by the embedding shell.

use std::collections::VecDeque;

/// Observable happenings a drawer reports back to its embedder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerEvent {
    /// The externally observable open state flipped.
    OpenChanged(bool),
    /// The active snap point changed to the given index.
    SnapPointChanged(usize),
    /// Fractional progress toward closed while dragging, for scrim and
    /// nested-parent interpolation. Deduplicated; only the latest survives
    /// a drain.
    DragProgress(f32),
    /// A drag ended; `stayed_open` tells whether the drawer settled open.
    Released { stayed_open: bool },
}

/// Queue of pending events for one drawer.
pub struct EventQueue {
    pending: VecDeque<DrawerEvent>,
    /// Only the last drag-progress value per drain is worth delivering.
    latest_progress: Option<f32>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(8),
            latest_progress: None,
        }
    }

    pub fn push(&mut self, event: DrawerEvent) {
        match event {
            DrawerEvent::DragProgress(value) => {
                self.latest_progress = Some(value);
            }
            _ => self.pending.push_back(event),
        }
    }

    /// Drain all pending events, folding deduplicated ones back in.
    pub fn drain(&mut self) -> EventBatch {
        let mut events = Vec::with_capacity(self.pending.len() + 1);
        if let Some(progress) = self.latest_progress.take() {
            events.push(DrawerEvent::DragProgress(progress));
        }
        events.extend(self.pending.drain(..));
        EventBatch { events }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.latest_progress.is_none()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A drained batch of drawer events.
pub struct EventBatch {
    events: Vec<DrawerEvent>,
}

impl EventBatch {
    pub fn iter(&self) -> impl Iterator<Item = &DrawerEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_vec(self) -> Vec<DrawerEvent> {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_progress_deduplicates() {
        let mut queue = EventQueue::new();
        queue.push(DrawerEvent::DragProgress(0.1));
        queue.push(DrawerEvent::OpenChanged(true));
        queue.push(DrawerEvent::DragProgress(0.7));

        let batch = queue.drain();
        let events = batch.into_vec();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], DrawerEvent::DragProgress(0.7));
        assert_eq!(events[1], DrawerEvent::OpenChanged(true));
    }

    #[test]
    fn drain_empties_queue() {
        let mut queue = EventQueue::new();
        queue.push(DrawerEvent::Released { stayed_open: true });
        assert!(!queue.is_empty());
        let _ = queue.drain();
        assert!(queue.is_empty());
    }
}
