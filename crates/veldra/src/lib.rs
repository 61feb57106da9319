//! Veldra - headless draggable panel engine
//!
//! This crate implements the interaction engine behind a draggable
//! drawer / bottom-sheet: a gesture recognizer, a multi-point snapping
//! physics model, reference-counted scroll locking, on-screen-keyboard
//! aware repositioning, and background depth effects. It renders nothing
//! itself; every effect goes through the [`HostSurface`] seam the
//! embedding shell implements.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use veldra::*;
//! use veldra_core::time::SystemClock;
//!
//! let caps = PlatformCaps::desktop();
//! let lock = Rc::new(RefCell::new(ScrollLockService::new(caps)));
//! let clock = Rc::new(SystemClock::new());
//!
//! let config = DrawerConfig::new(Direction::Bottom)
//!     .snap_points(vec![SnapPoint::Fraction(0.3), SnapPoint::Fraction(1.0)])
//!     .on_open_change(|open| println!("open: {open}"));
//! let mut drawer = Drawer::new(config, caps, lock, clock);
//!
//! // In the event loop:
//! // drawer.on_pointer_down(&event, &mut host);
//! // drawer.on_pointer_move(&event, &mut host);
//! // drawer.on_pointer_up(&event, &mut host);
//! // drawer.tick(&mut host);
//! ```

pub mod background;
pub mod config;
pub mod constants;
pub mod drawer;
pub mod events;
pub mod gesture;
pub mod host;
pub mod keyboard;
pub mod nested;
pub mod platform;
pub mod position_fixed;
pub mod scheduler;
pub mod scroll_lock;
pub mod snap;

pub use background::BackgroundScaleController;
pub use config::{Direction, DrawerConfig};
pub use drawer::{Drawer, DrawerState};
pub use events::{DrawerEvent, EventBatch, EventQueue};
pub use gesture::{DragContext, DragRelease, DragSession, GestureTracker, PointerEvent};
pub use host::{
    BodyStyle, Easing, HostSurface, Part, ScrollableState, TargetDescriptor, Transform, Transition,
};
pub use keyboard::ViewportKeyboardAdapter;
pub use nested::NestedDrawerCoordinator;
pub use platform::PlatformCaps;
pub use position_fixed::PositionFixedManager;
pub use scheduler::{Generation, Scheduler, Task};
pub use scroll_lock::{ScrollLockService, ScrollLockToken, TouchDecision};
pub use snap::{ReleaseDecision, SnapPoint, SnapPointEngine, SnapRelease};

// Re-export common types from dependencies
pub use veldra_core::geometry::{Rect, Size};
pub use veldra_core::math::Vec2;
pub use veldra_core::time::{Clock, Millis, SystemClock};
