// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between showcases and the toolkit that displays them.
//!
//! A showcase never touches a window directly. It asks its [`Host`] for
//! metrics and target bounds, and tells the host what to attach, animate, and
//! schedule. Anything the host does asynchronously comes back as a
//! [`HostEvent`] (or, for frames, a call to `paint_frame`).

use core::time::Duration;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use understory_spotlight::HostMetrics;

use crate::animation::Transition;
use crate::config::Content;

/// Identifies a host window.
///
/// At most one showcase is visible per host window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub u64);

/// Identifies an element the host can report bounds for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

/// A host-defined custom content layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(pub u64);

/// A host-defined custom animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// Handle for one showcase on a [`Stage`](crate::Stage).
///
/// Keys are allocated by the stage the first time a showcase is shown and
/// are never reused by that stage. Hosts use them to route [`HostEvent`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShowcaseKey(pub(crate) u64);

impl ShowcaseKey {
    /// Raw key value, for host-side maps and logging.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// What the host should put on screen when a showcase attaches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerSpec {
    /// Size of the overlay surface.
    pub overlay: Size,
    /// Dim color drawn behind the hole.
    pub background: Color,
    /// Whether the container blocks every touch from reaching the window.
    ///
    /// When `false`, touches on the focused element may pass through: the
    /// host forwards pointer downs as [`HostEvent::PointerDown`] and delivers
    /// the touch underneath on [`TouchOutcome::PassThrough`](crate::TouchOutcome::PassThrough).
    pub consumes_touches: bool,
}

/// Something that happened on the host side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// A target the showcase waited for has been laid out.
    TargetLaidOut,
    /// A delay scheduled with [`Host::schedule_delay`] has elapsed.
    DelayElapsed,
    /// The enter transition finished.
    EnterAnimationFinished,
    /// The exit transition finished.
    ExitAnimationFinished,
    /// A pointer went down on the overlay, in overlay coordinates.
    PointerDown(Point),
}

/// Services a host window provides to showcases.
pub trait Host {
    /// The window this host represents.
    fn id(&self) -> HostId;

    /// Viewport size and system insets.
    fn metrics(&self) -> HostMetrics;

    /// Returns `true` if the window is closing; showcases do not attach then.
    fn is_finishing(&self) -> bool {
        false
    }

    /// Returns `true` if the host can run circular reveal transitions.
    fn supports_circular_reveal(&self) -> bool {
        false
    }

    /// Window-space bounds of `target`, or `None` if it is unknown.
    ///
    /// A zero-size rectangle means "not laid out yet".
    fn target_bounds(&self, target: TargetId) -> Option<Rect>;

    /// Adds the dimmed overlay container to the window.
    fn attach_container(&mut self, key: ShowcaseKey, spec: &ContainerSpec);

    /// Removes the overlay container from the window.
    fn detach_container(&mut self, key: ShowcaseKey);

    /// Places title or custom content over the container.
    ///
    /// `region` is the suggested placement when automatic text positioning is
    /// enabled.
    fn attach_content(&mut self, key: ShowcaseKey, content: &Content, region: Option<Rect>) {
        let _ = (key, content, region);
    }

    /// Registers a one-time notification for when `target` is laid out.
    ///
    /// The host answers with [`HostEvent::TargetLaidOut`].
    fn wait_for_layout(&mut self, key: ShowcaseKey, target: TargetId);

    /// Unregisters a notification set up by [`Host::wait_for_layout`].
    fn cancel_layout_wait(&mut self, key: ShowcaseKey, target: TargetId) {
        let _ = (key, target);
    }

    /// Schedules a [`HostEvent::DelayElapsed`] after `delay`.
    fn schedule_delay(&mut self, key: ShowcaseKey, delay: Duration);

    /// Runs `transition` on the container.
    ///
    /// The host answers with [`HostEvent::EnterAnimationFinished`] or
    /// [`HostEvent::ExitAnimationFinished`] according to
    /// [`Transition::direction`].
    fn start_animation(&mut self, key: ShowcaseKey, transition: &Transition);

    /// Asks for another frame; the host answers by calling `paint_frame`.
    fn request_frame(&mut self, key: ShowcaseKey);
}
