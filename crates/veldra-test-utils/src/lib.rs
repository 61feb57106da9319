//! Test doubles for the Veldra engine.
//!
//! [`RecordingHost`] implements the host-surface seam by recording every
//! effect instead of performing it, with setters for the queries the
//! engine makes. [`ManualClock`] lets tests drive time by hand.

mod clock;
mod host;
mod pointer;

pub use clock::ManualClock;
pub use host::RecordingHost;
pub use pointer::PointerEventBuilder;
