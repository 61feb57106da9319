//! The drawer state machine.
//!
//! Owns the open/closed/dragging state, wires pointer events into the
//! gesture tracker, delegates offset math to the snap engine, and drives
//! the scroll lock, background scale, keyboard, and nested-drawer
//! controllers. All externally visible state changes flow out through the
//! event queue and the configured callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use veldra_core::geometry::Size;
use veldra_core::time::{Clock, Millis};

use crate::background::BackgroundScaleController;
use crate::config::DrawerConfig;
use crate::constants;
use crate::events::{DrawerEvent, EventBatch, EventQueue};
use crate::gesture::{DragContext, DragRelease, GestureTracker, PointerEvent};
use crate::host::{HostSurface, Part, Transform, Transition};
use crate::keyboard::ViewportKeyboardAdapter;
use crate::nested::NestedDrawerCoordinator;
use crate::platform::PlatformCaps;
use crate::position_fixed::PositionFixedManager;
use crate::scheduler::{Generation, Scheduler, Task};
use crate::scroll_lock::{ScrollLockService, ScrollLockToken};
use crate::snap::{ReleaseDecision, SnapPointEngine, SnapRelease};

/// Explicit drawer state. A drag can only exist while the drawer is open,
/// and the active snap point only while snap points are configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Open {
        active_snap_point: Option<usize>,
    },
    /// A pointer session was accepted as a drag; `from_snap_point` is
    /// where the panel rested when it started.
    Dragging {
        from_snap_point: Option<usize>,
    },
}

/// Logarithmic resistance applied when dragging past the fully-open limit.
fn dampen(value: f32) -> f32 {
    (8.0 * ((value + 1.0).ln() - 2.0)).max(0.0)
}

/// One mounted drawer instance.
pub struct Drawer {
    config: DrawerConfig,
    state: DrawerState,
    generation: Generation,
    gesture: GestureTracker,
    snap: SnapPointEngine,
    scheduler: Scheduler,
    events: EventQueue,
    keyboard: ViewportKeyboardAdapter,
    background: BackgroundScaleController,
    position_fixed: PositionFixedManager,
    nested: NestedDrawerCoordinator,
    scroll_lock: Rc<RefCell<ScrollLockService>>,
    lock_token: Option<ScrollLockToken>,
    clock: Rc<dyn Clock>,
    opened_at: Option<Millis>,
    released_at: Option<Millis>,
    /// Last panel offset applied to the host, signed like a snap offset.
    current_offset: f32,
    handle_pressed_at: Option<Millis>,
}

impl Drawer {
    pub fn new(
        config: DrawerConfig,
        caps: PlatformCaps,
        scroll_lock: Rc<RefCell<ScrollLockService>>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let direction = config.direction;
        let gesture = GestureTracker::new(direction, config.scroll_lock_timeout);
        let snap = SnapPointEngine::new(
            config.snap_points.clone(),
            direction,
            config.fade_from_index,
        );
        let background = BackgroundScaleController::new(direction, config.should_scale_background);
        Self {
            config,
            state: DrawerState::Closed,
            generation: 0,
            gesture,
            snap,
            scheduler: Scheduler::new(),
            events: EventQueue::new(),
            keyboard: ViewportKeyboardAdapter::new(caps),
            background,
            position_fixed: PositionFixedManager::new(caps),
            nested: NestedDrawerCoordinator::new(direction),
            scroll_lock,
            lock_token: None,
            clock,
            opened_at: None,
            released_at: None,
            current_offset: 0.0,
            handle_pressed_at: None,
        }
    }

    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// The externally observable open state. Dragging counts as open.
    pub fn is_open(&self) -> bool {
        !matches!(self.state, DrawerState::Closed)
    }

    pub fn active_snap_point(&self) -> Option<usize> {
        match self.state {
            DrawerState::Open { active_snap_point } => active_snap_point,
            DrawerState::Dragging { from_snap_point } => from_snap_point,
            DrawerState::Closed => None,
        }
    }

    /// Drain pending observable events.
    pub fn drain_events(&mut self) -> EventBatch {
        self.events.drain()
    }

    // -- Open / close --

    /// Drive the controlled `open` value. A no-op when the state already
    /// matches; the change callbacks are not re-invoked for changes the
    /// caller itself initiated.
    pub fn set_open(&mut self, open: bool, host: &mut dyn HostSurface) {
        if open == self.is_open() {
            return;
        }
        if open {
            self.open_inner(host, true);
        } else {
            self.close_inner(host, true);
        }
    }

    /// Open in response to a user interaction (e.g. the trigger).
    pub fn open(&mut self, host: &mut dyn HostSurface) {
        if self.is_open() {
            return;
        }
        self.open_inner(host, false);
    }

    /// Close in response to a user interaction or gesture.
    pub fn close(&mut self, host: &mut dyn HostSurface) {
        if !self.is_open() {
            return;
        }
        self.close_inner(host, false);
    }

    fn open_inner(&mut self, host: &mut dyn HostSurface, from_within: bool) {
        let now = self.clock.now();
        self.generation += 1;
        self.opened_at = Some(now);
        debug!(generation = self.generation, "drawer opening");

        let container = self
            .config
            .container
            .map(|rect| rect.size())
            .unwrap_or_else(|| host.window_size());
        self.snap.resolve(container);

        if self.config.modal && self.lock_token.is_none() {
            let token = self.scroll_lock.borrow_mut().acquire(host);
            self.lock_token = Some(token);
        }
        // The fixed-position trick is a platform need, not a modality
        // choice; capture() no-ops where the platform is compliant.
        self.position_fixed.capture(host);
        host.set_body_pointer_events(!self.config.modal);

        self.background.on_open(host);

        if self.snap.has_points() {
            let index = self.snap.active_index();
            self.snap.snap_to_index(index, host);
            self.current_offset = self.snap.active_offset().unwrap_or(0.0);
            self.state = DrawerState::Open {
                active_snap_point: Some(index),
            };
        } else {
            let transition = Transition::settle(constants::TRANSITION_DURATION);
            host.set_transition(Part::Panel, Some(transition));
            host.set_transform(Part::Panel, Some(Transform::IDENTITY));
            host.set_transition(Part::Overlay, Some(transition));
            host.set_opacity(Part::Overlay, 1.0);
            self.current_offset = 0.0;
            self.state = DrawerState::Open {
                active_snap_point: None,
            };
        }

        self.events.push(DrawerEvent::OpenChanged(true));
        if !from_within
            && let Some(callback) = self.config.on_open_change.clone()
        {
            callback(true);
        }
    }

    fn close_inner(&mut self, host: &mut dyn HostSurface, from_within: bool) {
        if !self.is_open() {
            return;
        }
        let now = self.clock.now();
        self.generation += 1;
        debug!(generation = self.generation, "drawer closing");

        // A close mid-drag abandons the session without release logic.
        if let Some(session) = self.gesture.session() {
            host.release_pointer(session.pointer_id);
        }
        self.gesture.on_cancel();

        let closed_offset =
            self.snap.container_extent().max(self.panel_extent(host)) * sign(&self.config);
        let transition = Transition::settle(constants::TRANSITION_DURATION);
        host.set_transition(Part::Panel, Some(transition));
        host.set_transform(
            Part::Panel,
            Some(Transform::translation(
                self.config.direction.translation(closed_offset),
            )),
        );
        host.set_transition(Part::Overlay, Some(transition));
        host.set_opacity(Part::Overlay, 0.0);
        self.current_offset = closed_offset;

        self.background.on_close(host);
        self.scheduler.schedule(
            Task::RestoreBackgroundColor,
            constants::TRANSITION_DURATION,
            now,
            self.generation,
        );
        if self.snap.has_points() {
            // The panel reopens at its default size next time.
            self.scheduler.schedule(
                Task::ResetActiveSnapPoint,
                constants::TRANSITION_DURATION,
                now,
                self.generation,
            );
        }

        if let Some(token) = self.lock_token.take() {
            self.scroll_lock.borrow_mut().release(token, host);
        }
        if self.position_fixed.is_captured() {
            if self.config.modal {
                self.position_fixed.restore(host);
            } else {
                self.scheduler.schedule(
                    Task::RestorePositionSetting,
                    constants::TRANSITION_DURATION,
                    now,
                    self.generation,
                );
            }
        }

        // Background content becomes interactive again no matter the
        // modality.
        host.set_body_pointer_events(true);

        self.keyboard.reset();
        self.opened_at = None;
        self.state = DrawerState::Closed;

        self.events.push(DrawerEvent::OpenChanged(false));
        if !from_within
            && let Some(callback) = self.config.on_open_change.clone()
        {
            callback(false);
        }
    }

    /// Tear down a mounted drawer: abandons any drag and returns the
    /// scroll lock. Must be called exactly once per mount or the shared
    /// lock counter leaks.
    pub fn unmount(&mut self, host: &mut dyn HostSurface) {
        if self.is_open() {
            self.close_inner(host, true);
        }
        // Run deferred restores now; there is no later.
        self.position_fixed.restore(host);
        self.background.restore_background(host);
    }

    // -- Pointer wiring --

    pub fn on_pointer_down(&mut self, event: &PointerEvent, host: &mut dyn HostSurface) {
        if !self.is_open() {
            return;
        }

        if event.target.in_handle {
            let now = event.timestamp;
            let double = self
                .handle_pressed_at
                .is_some_and(|at| now - at < constants::HANDLE_DOUBLE_PRESS_WINDOW);
            self.handle_pressed_at = Some(now);
            if double {
                self.cycle_snap_point(host);
                return;
            }
        }

        host.capture_pointer(event.pointer_id);
        self.gesture.on_press(event, self.panel_extent(host));
        self.scroll_lock.borrow_mut().on_touch_start(event);
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent, host: &mut dyn HostSurface) {
        if !self.is_open() {
            return;
        }
        let ctx = DragContext {
            opened_at: self.opened_at,
            swipe_amount: host
                .panel_rect()
                .map(|_| self.current_offset - self.resting_offset()),
            text_selection_active: host.text_selection_active(),
            released_at: self.released_at,
            handle_only: self.config.handle_only,
        };
        let Some(distance) = self.gesture.on_drag(event, &ctx) else {
            return;
        };

        if !matches!(self.state, DrawerState::Dragging { .. }) {
            self.state = DrawerState::Dragging {
                from_snap_point: self.active_snap_point(),
            };
            // The panel follows the pointer directly while dragging.
            host.set_transition(Part::Panel, None);
            host.set_transition(Part::Overlay, None);
        }

        if self.snap.has_points() {
            let Some(offset) = self.snap.drag_offset(distance, self.config.dismissible) else {
                return;
            };
            self.apply_drag_offset(offset, host);
            if let Some(fraction) = self.snap.fade_fraction(distance.abs(), distance > 0.0) {
                host.set_opacity(Part::Overlay, fraction);
            }
        } else {
            if distance > 0.0 && !self.config.dismissible {
                return;
            }
            let offset = if distance >= 0.0 {
                distance * sign(&self.config)
            } else {
                // Over-drag past fully open meets logarithmic resistance.
                -dampen(-distance) * sign(&self.config)
            };
            self.apply_drag_offset(offset, host);
            let extent = self.panel_extent(host);
            if extent > 0.0 {
                host.set_opacity(Part::Overlay, 1.0 - (offset.abs() / extent).clamp(0.0, 1.0));
            }
        }
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent, host: &mut dyn HostSurface) {
        host.release_pointer(event.pointer_id);
        self.scroll_lock.borrow_mut().on_touch_end();

        let Some(release) = self.gesture.on_release(event) else {
            return;
        };
        if !matches!(self.state, DrawerState::Dragging { .. }) {
            return;
        }
        self.released_at = Some(event.timestamp);

        let stayed_open = if self.snap.has_points() {
            self.release_with_snap_points(&release, host)
        } else {
            self.release_plain(&release, host)
        };
        self.events.push(DrawerEvent::Released { stayed_open });
    }

    /// A cancelled drag resets to the last resting position; it never
    /// closes and never runs the velocity-based release logic.
    pub fn on_pointer_cancel(&mut self, host: &mut dyn HostSurface) {
        if let Some(session) = self.gesture.session() {
            host.release_pointer(session.pointer_id);
        }
        self.gesture.on_cancel();
        self.scroll_lock.borrow_mut().on_touch_end();

        if let DrawerState::Dragging { from_snap_point } = self.state {
            self.settle_open(from_snap_point, host);
        }
    }

    fn release_with_snap_points(
        &mut self,
        release: &DragRelease,
        host: &mut dyn HostSurface,
    ) -> bool {
        let input = SnapRelease {
            dragged_distance: release.dist_moved,
            velocity: release.velocity,
            dismissible: self.config.dismissible,
        };
        match self
            .snap
            .release_decision(input, self.config.snap_to_sequential_point)
        {
            Some(ReleaseDecision::Dismiss) => {
                self.close_inner(host, false);
                false
            }
            Some(ReleaseDecision::SnapTo(index)) => {
                self.settle_open(Some(index), host);
                true
            }
            None => {
                self.settle_open(self.active_snap_point(), host);
                true
            }
        }
    }

    /// Release decision when no snap points are configured.
    fn release_plain(&mut self, release: &DragRelease, host: &mut dyn HostSurface) -> bool {
        let toward_open = release.dist_moved < 0.0;
        if toward_open || !self.config.dismissible {
            self.settle_open(None, host);
            return true;
        }
        if release.velocity > constants::FLICK_VELOCITY {
            self.close_inner(host, false);
            return false;
        }
        let extent = release.panel_extent;
        if extent > 0.0 && release.dist_moved.abs() > self.config.close_threshold * extent {
            self.close_inner(host, false);
            return false;
        }
        self.settle_open(None, host);
        true
    }

    /// Settle back to an open resting position after a drag or cancel.
    fn settle_open(&mut self, snap_index: Option<usize>, host: &mut dyn HostSurface) {
        if let Some(index) = snap_index.filter(|_| self.snap.has_points()) {
            let changed = self.snap.snap_to_index(index, host);
            self.current_offset = self.snap.active_offset().unwrap_or(0.0);
            self.state = DrawerState::Open {
                active_snap_point: Some(index),
            };
            if changed {
                self.events.push(DrawerEvent::SnapPointChanged(index));
                if let Some(callback) = self.config.on_snap_point_change.clone() {
                    callback(index);
                }
            }
        } else {
            let transition = Transition::settle(constants::TRANSITION_DURATION);
            host.set_transition(Part::Panel, Some(transition));
            host.set_transform(Part::Panel, Some(Transform::IDENTITY));
            host.set_transition(Part::Overlay, Some(transition));
            host.set_opacity(Part::Overlay, 1.0);
            self.current_offset = 0.0;
            self.state = DrawerState::Open {
                active_snap_point: self.snap.has_points().then(|| self.snap.active_index()),
            };
        }
        self.background.on_settle(host);
    }

    fn apply_drag_offset(&mut self, offset: f32, host: &mut dyn HostSurface) {
        host.set_transform(
            Part::Panel,
            Some(Transform::translation(
                self.config.direction.translation(offset),
            )),
        );
        self.current_offset = offset;

        let travel = self.snap.container_extent().max(self.panel_extent(host));
        if travel > 0.0 {
            let fraction = (offset * sign(&self.config) / travel).clamp(0.0, 1.0);
            self.events.push(DrawerEvent::DragProgress(fraction));
            self.background.on_drag_progress(host, fraction);
        }
    }

    // -- Snap point control --

    /// Drive the controlled active snap point.
    pub fn set_active_snap_point(&mut self, index: usize, host: &mut dyn HostSurface) {
        if !self.is_open() || index >= self.snap.offsets().len() {
            return;
        }
        self.settle_open(Some(index), host);
    }

    /// Advance one snap point, wrapping back to the first past the end.
    /// Bound to the handle double-press.
    pub fn cycle_snap_point(&mut self, host: &mut dyn HostSurface) {
        if !self.is_open() || !self.snap.has_points() {
            return;
        }
        let next = if self.snap.active_index() >= self.snap.last_index() {
            0
        } else {
            self.snap.active_index() + 1
        };
        self.settle_open(Some(next), host);
    }

    // -- Environment --

    /// The positioning container resized; recompute snap offsets and
    /// re-settle an open panel.
    pub fn on_container_resize(&mut self, size: Size<f32>, host: &mut dyn HostSurface) {
        self.snap.resolve(size);
        if let DrawerState::Open {
            active_snap_point: Some(index),
        } = self.state
        {
            self.snap.snap_to_index(index, host);
            self.current_offset = self.snap.active_offset().unwrap_or(0.0);
        }
    }

    /// The visual viewport resized (keyboard show/hide, toolbar changes).
    pub fn on_viewport_resize(&mut self, host: &mut dyn HostSurface) {
        if !self.is_open() {
            return;
        }
        let active_offset = if self.snap.has_points() {
            self.snap.active_offset()
        } else {
            None
        };
        self.keyboard.on_viewport_resize(host, active_offset);
    }

    /// Focus landed on a text input inside the panel.
    pub fn on_input_focus(&mut self, host: &mut dyn HostSurface) {
        let needs_scroll = self.scroll_lock.borrow_mut().on_input_focus(host);
        if needs_scroll {
            self.scheduler.schedule(
                Task::ScrollFocusedIntoView,
                self.config.scroll_lock_timeout,
                self.clock.now(),
                self.generation,
            );
        }
    }

    // -- Nested drawers --

    /// A nested drawer opened over this one.
    pub fn child_opened(&mut self, host: &mut dyn HostSurface) {
        self.scheduler.cancel(Task::ResetParentTransform);
        self.nested.on_child_open(host);
    }

    /// The nested drawer reported drag progress (0 = fully open, 1 = about
    /// to close).
    pub fn child_drag_progress(&mut self, fraction_closed: f32, host: &mut dyn HostSurface) {
        self.nested.on_child_drag(host, fraction_closed);
    }

    /// The nested drawer's drag released.
    pub fn child_released(&mut self, stayed_open: bool, host: &mut dyn HostSurface) {
        self.nested.on_child_release(host, stayed_open);
    }

    /// The nested drawer finished closing; schedule the invisible
    /// transform reset.
    pub fn child_closed(&mut self) {
        self.scheduler.schedule(
            Task::ResetParentTransform,
            constants::NESTED_RESET_DELAY,
            self.clock.now(),
            self.generation,
        );
    }

    // -- Deferred work --

    /// Drain due scheduled tasks. Tasks from a previous open/close cycle
    /// observe a newer generation upstream and are dropped.
    pub fn tick(&mut self, host: &mut dyn HostSurface) {
        let now = self.clock.now();
        for task in self.scheduler.drain_due(now, self.generation) {
            match task {
                Task::ResetActiveSnapPoint => self.snap.reset_active_index(),
                Task::RestoreBackgroundColor => self.background.restore_background(host),
                Task::RestorePositionSetting => self.position_fixed.restore(host),
                Task::ResetParentTransform => self.nested.reset(host),
                Task::ScrollFocusedIntoView => host.scroll_focused_into_view(),
            }
        }
    }

    fn resting_offset(&self) -> f32 {
        if self.snap.has_points() {
            self.snap.active_offset().unwrap_or(0.0)
        } else {
            0.0
        }
    }

    fn panel_extent(&self, host: &dyn HostSurface) -> f32 {
        host.panel_rect()
            .map(|rect| self.config.direction.extent(rect.size()))
            .unwrap_or(0.0)
    }
}

fn sign(config: &DrawerConfig) -> f32 {
    config.direction.offset_sign()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dampen_resists_logarithmically() {
        // No give at all for tiny over-drags.
        assert_eq!(dampen(0.0), 0.0);
        assert_eq!(dampen(5.0), 0.0);
        // Past the knee the response grows slowly.
        let at_ten = dampen(10.0);
        let at_hundred = dampen(100.0);
        assert!(at_ten > 0.0);
        assert!(at_hundred > at_ten);
        assert!(at_hundred < 100.0);
    }
}
