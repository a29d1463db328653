// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overstory_showcase --heading-base-level=0

//! Overstory Showcase: spotlight overlays that walk users through a UI.
//!
//! A [`Showcase`] dims a host window, punches a hole around one element, shows
//! a title or custom content, and goes away on touch. This crate drives that
//! lifecycle without owning a window:
//!
//! - [`ShowcaseBuilder`] freezes a [`ShowcaseConfig`] into a [`Showcase`].
//! - [`Host`] is the toolkit side. It reports bounds and metrics, attaches
//!   and animates containers, and feeds back [`HostEvent`]s and frames.
//! - [`Stage`] keeps at most one active showcase per host window and owns the
//!   show-once [`OneShotRegistry`].
//! - [`ShowcaseQueue`] shows several showcases strictly one after another.
//!
//! Geometry, hit zones, the breathing halo, and painting come from
//! `understory_spotlight`; the types needed to use this crate are re-exported.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use kurbo::{Rect, Size};
//! use overstory_showcase::{
//!     ContainerSpec, Host, HostEvent, HostId, HostMetrics, Phase, RecordingPainter,
//!     ShowOutcome, ShowcaseBuilder, ShowcaseKey, Stage, TargetId, Transition,
//! };
//!
//! struct Window {
//!     attached: Vec<ShowcaseKey>,
//! }
//!
//! impl Host for Window {
//!     fn id(&self) -> HostId {
//!         HostId(1)
//!     }
//!     fn metrics(&self) -> HostMetrics {
//!         HostMetrics::new(Size::new(400.0, 800.0))
//!     }
//!     fn target_bounds(&self, _target: TargetId) -> Option<Rect> {
//!         Some(Rect::new(20.0, 40.0, 60.0, 80.0))
//!     }
//!     fn attach_container(&mut self, key: ShowcaseKey, _spec: &ContainerSpec) {
//!         self.attached.push(key);
//!     }
//!     fn detach_container(&mut self, key: ShowcaseKey) {
//!         self.attached.retain(|k| *k != key);
//!     }
//!     fn wait_for_layout(&mut self, _key: ShowcaseKey, _target: TargetId) {}
//!     fn schedule_delay(&mut self, _key: ShowcaseKey, _delay: Duration) {}
//!     fn start_animation(&mut self, _key: ShowcaseKey, _transition: &Transition) {}
//!     fn request_frame(&mut self, _key: ShowcaseKey) {}
//! }
//!
//! let mut stage: Stage = Stage::default();
//! let mut window = Window { attached: Vec::new() };
//! let mut showcase = ShowcaseBuilder::new()
//!     .focus_on(TargetId(7))
//!     .title("Your inbox lives here")
//!     .show_once("inbox")
//!     .build();
//!
//! assert_eq!(showcase.show(&mut stage, &mut window), ShowOutcome::Shown);
//! assert!(stage.is_visible(HostId(1)));
//!
//! let mut painter = RecordingPainter::new();
//! showcase.paint_frame(&mut painter, &mut stage, &mut window);
//! assert!(painter.last_cutout().is_some());
//!
//! assert!(showcase.hide(&mut window));
//! showcase.handle(HostEvent::ExitAnimationFinished, &mut stage, &mut window);
//! assert_eq!(showcase.phase(), Phase::Removed);
//! assert!(window.attached.is_empty());
//! assert!(stage.is_shown_before("inbox"));
//! ```

mod animation;
mod config;
mod host;
#[cfg(feature = "json_store")]
mod json_store;
mod listener;
mod queue;
mod showcase;
mod stage;
mod store;

pub use animation::{DEFAULT_ANIMATION_DURATION, Direction, Easing, Transition, TransitionKind};
pub use config::{
    Content, DEFAULT_BACKGROUND, Gravity, ShowcaseBuilder, ShowcaseConfig, TextSpan, Title,
    TitleText, TouchFlags,
};
pub use host::{
    AnimationId, ContainerSpec, ContentId, Host, HostEvent, HostId, ShowcaseKey, TargetId,
};
#[cfg(feature = "json_store")]
pub use json_store::{DEFAULT_STORE_FILE, JsonFileStore};
pub use listener::{AnimationListener, ContentListener, DismissListener, Dismissal};
pub use queue::ShowcaseQueue;
pub use showcase::{Phase, ShowOutcome, Showcase, TouchOutcome};
pub use stage::Stage;
pub use store::{MemoryStore, OneShotRegistry, ShownStore, StoreError};

pub use understory_spotlight::{
    AlphaMask, Border, Cutout, DEFAULT_CORNER_RADIUS, DEFAULT_PULSE_MAX, DEFAULT_PULSE_SCALE,
    DEFAULT_PULSE_STEP, DEFAULT_RECT_PADDING, FocusGeometry, FocusLayout, FocusPainter,
    FocusPosition, FocusPulse, FocusShape, HostMetrics, PaintOp, PulseParams, RecordingPainter,
};
