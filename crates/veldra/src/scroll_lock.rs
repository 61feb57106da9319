//! Process-wide scroll locking.
//!
//! One [`ScrollLockService`] is owned by the application shell and shared
//! by every drawer. The lock is reference-counted: physical scroll
//! suppression is installed exactly once, on the 0→1 transition, and torn
//! down exactly once, on the 1→0 transition, no matter how many panels
//! hold it — nested panels would otherwise prematurely unlock the page
//! when the inner one closes.
//!
//! On the affected touch platform scroll prevention is ignored while a
//! layer is open, so suppression there means intercepting touch moves
//! manually and suppressing rubber-banding at scroller bounds.

use tracing::{debug, warn};

use crate::gesture::PointerEvent;
use crate::host::{HostSurface, ScrollableState};
use crate::platform::PlatformCaps;

/// Proof of one held scroll lock. Can only be minted by
/// [`ScrollLockService::acquire`] and is consumed by
/// [`ScrollLockService::release`], so a holder cannot release twice.
#[must_use = "dropping the token leaks the lock; pass it back to release()"]
#[derive(Debug)]
pub struct ScrollLockToken {
    _private: (),
}

/// Verdict for one intercepted touch move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchDecision {
    /// Suppress the platform's default handling.
    Prevent,
    /// Let the inner scroller consume the move.
    Allow,
}

#[derive(Debug, Clone, Copy)]
struct TouchSession {
    start_axis: f32,
    on_document_root: bool,
    scrollable: Option<ScrollableState>,
}

/// Reference-counted scroll lock shared by all drawers in the process.
#[derive(Debug)]
pub struct ScrollLockService {
    caps: PlatformCaps,
    count: u32,
    intercepting: bool,
    touch: Option<TouchSession>,
}

impl ScrollLockService {
    pub fn new(caps: PlatformCaps) -> Self {
        Self {
            caps,
            count: 0,
            intercepting: false,
            touch: None,
        }
    }

    pub fn holder_count(&self) -> u32 {
        self.count
    }

    pub fn is_locked(&self) -> bool {
        self.count > 0
    }

    /// Register one holder. Installs physical suppression on 0→1.
    pub fn acquire(&mut self, host: &mut dyn HostSurface) -> ScrollLockToken {
        self.count += 1;
        debug!(holders = self.count, "scroll lock acquired");
        if self.count == 1 {
            self.install(host);
        }
        ScrollLockToken { _private: () }
    }

    /// Return one holder's token. Tears suppression down on 1→0.
    pub fn release(&mut self, token: ScrollLockToken, host: &mut dyn HostSurface) {
        let _ = token;
        if self.count == 0 {
            // Unreachable through the token discipline; kept so a bug
            // cannot wedge the page unscrollable.
            warn!("scroll lock released with no holders");
            return;
        }
        self.count -= 1;
        debug!(holders = self.count, "scroll lock released");
        if self.count == 0 {
            self.uninstall(host);
        }
    }

    fn install(&mut self, host: &mut dyn HostSurface) {
        if self.caps.contains(PlatformCaps::FIXED_POSITION_TRICK) {
            self.intercepting = true;
        } else {
            host.set_body_scroll_suppressed(true);
        }
    }

    fn uninstall(&mut self, host: &mut dyn HostSurface) {
        if self.intercepting {
            self.intercepting = false;
            self.touch = None;
        } else {
            host.set_body_scroll_suppressed(false);
        }
    }

    /// Whether manual touch interception is currently engaged.
    pub fn intercepting(&self) -> bool {
        self.intercepting
    }

    /// Track the scrollable ancestor under an initial touch.
    pub fn on_touch_start(&mut self, event: &PointerEvent) {
        if !self.intercepting {
            return;
        }
        self.touch = Some(TouchSession {
            start_axis: event.position.y,
            on_document_root: event.target.is_document_root,
            scrollable: event.target.scroll_ancestors.first().copied(),
        });
    }

    /// Decide one touch move. Root touches are suppressed outright; moves
    /// inside a scroller are suppressed only when they would push it past
    /// its own start or end bound.
    pub fn on_touch_move(&mut self, event: &PointerEvent) -> TouchDecision {
        if !self.intercepting {
            return TouchDecision::Allow;
        }
        let Some(session) = self.touch else {
            return TouchDecision::Allow;
        };
        if session.on_document_root {
            return TouchDecision::Prevent;
        }
        let Some(scrollable) = session.scrollable else {
            return TouchDecision::Prevent;
        };

        // Finger moving down scrolls content back toward its origin.
        let toward_origin = event.position.y > session.start_axis;
        let rubber_bands = if toward_origin {
            scrollable.at_origin()
        } else {
            scrollable.at_end()
        };
        if rubber_bands {
            TouchDecision::Prevent
        } else {
            TouchDecision::Allow
        }
    }

    pub fn on_touch_end(&mut self) {
        self.touch = None;
    }

    /// Handle focus landing on a text input mid-gesture: nudge it
    /// off-screen and back so the platform's own scroll-into-view cannot
    /// fight the lock. Returns true when the keyboard shrank the viewport
    /// and a deferred manual scroll-into-view should be scheduled.
    pub fn on_input_focus(&mut self, host: &mut dyn HostSurface) -> bool {
        if !self.is_locked() || !self.intercepting {
            return false;
        }
        host.suppress_focus_scroll();
        host.visual_viewport_size()
            .is_some_and(|viewport| viewport.height < host.window_size().height)
    }
}
