//! Platform capability detection surface.
//!
//! The engine itself never sniffs the environment. The embedding shell
//! resolves a [`PlatformCaps`] set once at startup and every
//! platform-dependent controller degrades to a no-op when its capability
//! bit is absent.

use bitflags::bitflags;

bitflags! {
    /// Capabilities of the hosting platform, resolved once at startup.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlatformCaps: u32 {
        /// A visual-viewport API exists and reports keyboard-driven resizes.
        const VISUAL_VIEWPORT = 1 << 0;
        /// Scroll prevention is ignored while a layer is open, so the body
        /// must be fixed-positioned and touch events intercepted manually.
        const FIXED_POSITION_TRICK = 1 << 1;
        /// Primary input is touch.
        const TOUCH_INPUT = 1 << 2;
    }
}

impl PlatformCaps {
    /// A desktop-class environment: viewport API, compliant scroll locking.
    pub fn desktop() -> Self {
        PlatformCaps::VISUAL_VIEWPORT
    }

    /// The affected mobile environment: touch input, manual scroll
    /// interception, fixed-position body trick.
    pub fn quirky_touch() -> Self {
        PlatformCaps::VISUAL_VIEWPORT
            | PlatformCaps::FIXED_POSITION_TRICK
            | PlatformCaps::TOUCH_INPUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_cover_expected_bits() {
        assert!(!PlatformCaps::desktop().contains(PlatformCaps::FIXED_POSITION_TRICK));
        assert!(PlatformCaps::quirky_touch().contains(PlatformCaps::TOUCH_INPUT));
        assert!(PlatformCaps::quirky_touch().contains(PlatformCaps::VISUAL_VIEWPORT));
    }
}
