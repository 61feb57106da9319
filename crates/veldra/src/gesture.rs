//! Pointer-to-drag-session conversion.
//!
//! A [`GestureTracker`] turns raw pointer press/move/release events into a
//! [`DragSession`]: where the drag started, how far it has travelled along
//! the drawer axis, and — at release — how fast. It also owns the gating
//! decision of whether a move is a deliberate drawer drag at all, or
//! something an inner scroller or text selection should consume instead.

use tracing::trace;
use veldra_core::math::Vec2;
use veldra_core::time::Millis;

use crate::config::Direction;
use crate::constants;
use crate::host::TargetDescriptor;

/// One raw pointer event, resolved by the host.
#[derive(Debug, Clone, Default)]
pub struct PointerEvent {
    pub pointer_id: u64,
    pub position: Vec2,
    pub timestamp: Millis,
    pub target: TargetDescriptor,
}

/// Ephemeral state of an in-flight pointer session.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub pointer_id: u64,
    /// Axis coordinate at press.
    pub pointer_start: f32,
    pub started_at: Millis,
    /// Panel extent along the travel axis, snapshotted at press.
    pub panel_extent: f32,
    /// Sticky acceptance: once a move passes gating, the rest of the
    /// session is a drag and gating is not re-evaluated.
    accepted: bool,
    /// Whether movement has exceeded the slop threshold.
    past_slop: bool,
}

/// Everything measured at release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    /// Total displacement, positive toward closed.
    pub dist_moved: f32,
    pub time_taken: Millis,
    /// Pixels per millisecond; zero for a zero-duration release.
    pub velocity: f32,
    /// Panel extent snapshotted at press.
    pub panel_extent: f32,
}

/// Context the drag-start gating needs beyond the event itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragContext {
    /// When the drawer finished opening, if it is open.
    pub opened_at: Option<Millis>,
    /// Current panel displacement from the resting position, signed like a
    /// snap offset. `None` when the panel is not mounted.
    pub swipe_amount: Option<f32>,
    pub text_selection_active: bool,
    /// When the last drag released, for the post-release cooldown.
    pub released_at: Option<Millis>,
    /// Drags may only start on the dedicated handle.
    pub handle_only: bool,
}

/// Converts pointer events into drag sessions for one drawer.
#[derive(Debug)]
pub struct GestureTracker {
    direction: Direction,
    /// Cooldown applied to repeated rejected attempts.
    reject_cooldown: Millis,
    session: Option<DragSession>,
    last_rejected_at: Option<Millis>,
}

impl GestureTracker {
    pub fn new(direction: Direction, reject_cooldown: Millis) -> Self {
        Self {
            direction,
            reject_cooldown,
            session: None,
            last_rejected_at: None,
        }
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether an accepted drag is in flight.
    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.accepted)
    }

    /// Begin a pointer session. The caller captures the pointer and
    /// supplies the panel's current extent along the travel axis.
    pub fn on_press(&mut self, event: &PointerEvent, panel_extent: f32) {
        self.session = Some(DragSession {
            pointer_id: event.pointer_id,
            pointer_start: self.direction.axis_value(event.position),
            started_at: event.timestamp,
            panel_extent,
            accepted: false,
            past_slop: false,
        });
    }

    /// Process a move event. Returns the dragged distance (positive toward
    /// closed) once the session is an accepted drag past the slop
    /// threshold, `None` otherwise.
    pub fn on_drag(&mut self, event: &PointerEvent, ctx: &DragContext) -> Option<f32> {
        let distance = self.distance_for(event)?;

        let session = self.session.as_ref()?;
        if !session.past_slop {
            if distance.abs() < constants::DRAG_SLOP {
                return None;
            }
            if let Some(session) = self.session.as_mut() {
                session.past_slop = true;
            }
        }

        let accepted = self.session.as_ref()?.accepted;
        if !accepted {
            if !self.should_drag(event, ctx, distance) {
                return None;
            }
            if let Some(session) = self.session.as_mut() {
                session.accepted = true;
            }
        }

        Some(distance)
    }

    /// Finish the session. Returns release measurements when an accepted
    /// drag was in flight; a press that never became a drag, or a release
    /// with no session at all, is a no-op.
    pub fn on_release(&mut self, event: &PointerEvent) -> Option<DragRelease> {
        let session = self.session.take()?;
        if !session.accepted {
            return None;
        }

        let axis = self.direction.axis_value(event.position);
        let dist_moved = (session.pointer_start - axis) * self.direction.drag_sign();
        let time_taken = event.timestamp - session.started_at;
        let velocity = if time_taken > 0.0 {
            dist_moved.abs() / time_taken as f32
        } else {
            0.0
        };

        trace!(dist_moved, time_taken, velocity, "drag released");
        Some(DragRelease {
            dist_moved,
            time_taken,
            velocity,
            panel_extent: session.panel_extent,
        })
    }

    /// Abort the session without release measurements. A cancelled drag
    /// always resets to the last resting position.
    pub fn on_cancel(&mut self) {
        self.session = None;
    }

    fn distance_for(&self, event: &PointerEvent) -> Option<f32> {
        let session = self.session.as_ref()?;
        let axis = self.direction.axis_value(event.position);
        Some((session.pointer_start - axis) * self.direction.drag_sign())
    }

    /// Drag-start gating. A move is promoted to a drag only when none of
    /// the rejection conditions hold; rejections feed the cooldown.
    fn should_drag(&mut self, event: &PointerEvent, ctx: &DragContext, distance: f32) -> bool {
        let now = event.timestamp;

        if event.target.opts_out_of_drag {
            return false;
        }
        if ctx.handle_only && !event.target.in_handle {
            return false;
        }

        // A panel already displaced toward closed keeps following the
        // pointer no matter what is under it.
        if let Some(amount) = ctx.swipe_amount
            && amount * self.direction.offset_sign() > 0.0
        {
            return true;
        }

        if let Some(opened_at) = ctx.opened_at
            && now - opened_at < constants::JUST_OPENED_GUARD
        {
            return false;
        }
        if ctx.text_selection_active {
            return false;
        }
        if let Some(released_at) = ctx.released_at
            && now - released_at < constants::JUST_RELEASED_COOLDOWN
        {
            return false;
        }
        if let Some(rejected_at) = self.last_rejected_at
            && now - rejected_at < self.reject_cooldown
            && ctx.swipe_amount.is_none_or(|a| a == 0.0)
        {
            self.last_rejected_at = Some(now);
            return false;
        }

        // Inner scrollers win while they still have room to move in the
        // direction of travel. Horizontal drawers never defer.
        if self.direction.is_vertical() {
            let toward_closed = distance > 0.0;
            for scrollable in &event.target.scroll_ancestors {
                let consumed = if toward_closed {
                    !scrollable.at_origin()
                } else {
                    !scrollable.at_end()
                };
                if consumed {
                    trace!("drag deferred to inner scroller");
                    self.last_rejected_at = Some(now);
                    return false;
                }
            }
        }

        true
    }
}
