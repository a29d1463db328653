// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spotlight --heading-base-level=0

//! Understory Spotlight: headless focus-hole primitives for coach marks and showcases.
//!
//! A spotlight overlay dims a whole window and punches a transparent hole
//! around one element. This crate computes everything about that hole without
//! owning a window, a scene graph, or a renderer:
//!
//! - [`compute_focus`]: turn target bounds (or an explicit position) plus
//!   [`HostMetrics`] into a [`FocusLayout`] with a circular or rounded
//!   rectangular [`FocusGeometry`].
//! - [`FocusGeometry::contains`]: hit zones for deciding whether a touch lands
//!   on the focused element.
//! - [`FocusPulse`]: the "breathing" halo that grows and shrinks the hole
//!   every frame.
//! - [`FocusPainter`] and [`paint_focus`]: draw a frame (dim, erase, border)
//!   into any backend; [`RecordingPainter`] and [`AlphaMask`] are built in.
//!
//! Lifecycle, persistence, and sequencing of overlays live in a higher layer
//! (`overstory_showcase`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use peniko::Color;
//! use understory_spotlight::{
//!     compute_focus, paint_focus, FocusPulse, FocusRequest, HostMetrics, RecordingPainter,
//! };
//!
//! let metrics = HostMetrics::new(Size::new(400.0, 800.0));
//! let layout = compute_focus(&FocusRequest::target(Rect::new(20.0, 40.0, 60.0, 80.0)), &metrics);
//! assert!(layout.has_focus());
//!
//! let mut pulse = FocusPulse::default();
//! let mut painter = RecordingPainter::new();
//! for _ in 0..3 {
//!     let cutout = layout.cutout(pulse.amplitude());
//!     paint_focus(
//!         &mut painter,
//!         metrics.viewport.to_rect(),
//!         Color::from_rgba8(0, 0, 0, 0xbb),
//!         cutout.as_ref(),
//!         None,
//!     );
//!     pulse.advance();
//! }
//! assert_eq!(painter.ops().len(), 6);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod geometry;
mod mask;
mod paint;
mod pulse;
mod shape;

pub use geometry::{
    DEFAULT_CORNER_RADIUS, DEFAULT_RECT_PADDING, FocusGeometry, FocusLayout, FocusPosition,
    FocusRequest, HostMetrics, auto_text_region, compute_focus, needs_layout,
};
pub use mask::AlphaMask;
pub use paint::{FocusPainter, PaintOp, RecordingPainter, paint_focus};
pub use pulse::{
    DEFAULT_PULSE_MAX, DEFAULT_PULSE_SCALE, DEFAULT_PULSE_STEP, FocusPulse, PulseParams,
};
pub use shape::{Border, Cutout, Dash, FocusShape};
