//! Vector math via the SIMD-accelerated `glam` types.
//!
//! This module re-exports the [`glam`] crate. The engine mostly works in
//! one dimension along a drawer's travel axis, but pointer positions,
//! scroll offsets, and translate transforms are all 2D.
//!
//! # Examples
//!
//! ```
//! use veldra_core::math::Vec2;
//!
//! let press = Vec2::new(180.0, 560.0);
//! let current = Vec2::new(180.0, 620.0);
//! let travelled = current - press;
//! assert_eq!(travelled.y, 60.0);
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::*;
