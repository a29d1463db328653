// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The showcase lifecycle.
//!
//! ```text
//!            show()                       target laid out
//! Created ───────────► AwaitingLayout ─────────────────┐
//!    │  ▲                                              ▼
//!    │  └──── host already busy ◄─── attach ◄── PendingAttach (delay)
//!    │                                 │
//!    │ shown before                    ▼
//!    └──────────► Skipped           Visible ── hide() ──► Dismissing
//!                                      │                      │ exit finished
//!                                      └── remove_view() ──► Removed
//! ```
//!
//! A showcase reacts to [`HostEvent`]s and frames. Events that arrive in a
//! phase where they mean nothing (a stale delay, a second exit notification)
//! are logged and dropped.

use core::fmt;
use core::time::Duration;

use kurbo::Point;
use tracing::{debug, warn};
use understory_spotlight::{
    FocusLayout, FocusPainter, FocusPulse, FocusRequest, auto_text_region, compute_focus,
    needs_layout, paint_focus,
};

use crate::animation::{
    Direction, Transition, TransitionRequest, enter_transition, exit_transition,
};
use crate::config::{ShowcaseBuilder, ShowcaseConfig, TouchFlags};
use crate::host::{AnimationId, ContainerSpec, Host, HostEvent, HostId, ShowcaseKey};
use crate::listener::{AnimationListener, ContentListener, DismissListener};
use crate::stage::Stage;
use crate::store::ShownStore;

/// Where a showcase is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Built, not shown yet (or blocked by another showcase and idle again).
    #[default]
    Created,
    /// Waiting for the target to get a size.
    AwaitingLayout,
    /// Geometry known; waiting out the configured delay.
    PendingAttach,
    /// Attached and painting.
    Visible,
    /// Running the exit transition.
    Dismissing,
    /// Gone for good.
    Removed,
    /// Never attached because it was already shown once.
    Skipped,
}

/// Result of [`Showcase::show`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShowOutcome {
    /// Attached and visible.
    Shown,
    /// Waiting for layout or for the configured delay.
    Deferred,
    /// Already shown once; the dismiss listener got `on_skipped`.
    Skipped,
    /// Another showcase is visible on the same host; nothing happened.
    Blocked,
    /// The showcase was not idle, or the host is finishing.
    Ignored,
}

/// What the host should do with a pointer down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TouchOutcome {
    /// Deliver the touch to the element underneath.
    PassThrough,
    /// Swallow the touch.
    Consumed,
    /// Swallow the touch; the showcase started hiding.
    Dismissed,
}

#[derive(Default)]
pub(crate) struct Listeners {
    pub(crate) dismiss: Option<Box<dyn DismissListener>>,
    pub(crate) animation: Option<Box<dyn AnimationListener>>,
    pub(crate) content: Option<Box<dyn ContentListener>>,
}

/// One spotlight overlay and its lifecycle.
pub struct Showcase {
    config: ShowcaseConfig,
    listeners: Listeners,
    phase: Phase,
    key: Option<ShowcaseKey>,
    host: Option<HostId>,
    layout: Option<FocusLayout>,
    clickable_zone: Option<FocusLayout>,
    pulse: FocusPulse,
    transition: Option<Transition>,
}

impl fmt::Debug for Showcase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Showcase")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("key", &self.key)
            .field("host", &self.host)
            .field("layout", &self.layout)
            .field("pulse", &self.pulse)
            .finish_non_exhaustive()
    }
}

impl Showcase {
    /// Starts a [`ShowcaseBuilder`].
    #[must_use]
    pub fn builder() -> ShowcaseBuilder {
        ShowcaseBuilder::new()
    }

    pub(crate) fn from_parts(config: ShowcaseConfig, listeners: Listeners) -> Self {
        let pulse = config
            .pulse
            .map_or_else(FocusPulse::disabled, FocusPulse::new);
        Self {
            config,
            listeners,
            phase: Phase::Created,
            key: None,
            host: None,
            layout: None,
            clickable_zone: None,
            pulse,
            transition: None,
        }
    }

    /// The frozen configuration.
    #[must_use]
    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Stage key, allocated on the first [`Showcase::show`].
    #[must_use]
    pub fn key(&self) -> Option<ShowcaseKey> {
        self.key
    }

    /// Geometry computed at attach time.
    #[must_use]
    pub fn layout(&self) -> Option<&FocusLayout> {
        self.layout.as_ref()
    }

    /// The breathing halo.
    #[must_use]
    pub fn pulse(&self) -> &FocusPulse {
        &self.pulse
    }

    /// The most recently started transition.
    #[must_use]
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Returns `true` while the container is attached.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, Phase::Visible | Phase::Dismissing)
    }

    /// Returns `true` if this showcase's one-shot id is already recorded.
    #[must_use]
    pub fn is_shown_before<S: ShownStore>(&self, stage: &Stage<S>) -> bool {
        stage
            .registry()
            .is_shown_before(self.config.show_once.as_deref())
    }

    /// Replaces the dismiss listener.
    pub fn set_dismiss_listener(&mut self, listener: Box<dyn DismissListener>) {
        self.listeners.dismiss = Some(listener);
    }

    /// Removes and returns the dismiss listener.
    pub fn take_dismiss_listener(&mut self) -> Option<Box<dyn DismissListener>> {
        self.listeners.dismiss.take()
    }

    /// Shows the showcase on `host`.
    ///
    /// Only a [`Phase::Created`] showcase can be shown.
    pub fn show<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> ShowOutcome {
        if self.phase != Phase::Created {
            warn!(phase = ?self.phase, "show ignored, showcase is not idle");
            return ShowOutcome::Ignored;
        }
        let key = *self.key.get_or_insert_with(|| stage.allocate_key());
        self.host = Some(host.id());

        let id = self.config.show_once.as_deref();
        if stage.registry().is_shown_before(id) {
            debug!(key = key.0, id, "already shown, skipping");
            self.phase = Phase::Skipped;
            if let Some(listener) = self.listeners.dismiss.as_mut() {
                listener.on_skipped(id);
            }
            return ShowOutcome::Skipped;
        }

        if self.config.depends_on_layout() {
            if let Some(target) = self.config.target {
                if host.target_bounds(target).is_some_and(needs_layout) {
                    debug!(key = key.0, target = target.0, "waiting for target layout");
                    self.phase = Phase::AwaitingLayout;
                    host.wait_for_layout(key, target);
                    return ShowOutcome::Deferred;
                }
            }
        }
        self.proceed(stage, host, key)
    }

    /// Reacts to a host event.
    ///
    /// Returns the touch decision for [`HostEvent::PointerDown`] and `None`
    /// for everything else.
    pub fn handle<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        event: HostEvent,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> Option<TouchOutcome> {
        self.service_hide_request(stage, host);
        match event {
            HostEvent::TargetLaidOut => self.on_target_laid_out(stage, host),
            HostEvent::DelayElapsed => {
                match (self.phase, self.key) {
                    (Phase::PendingAttach, Some(key)) => {
                        self.attach(stage, host, key);
                    }
                    _ => debug!(phase = ?self.phase, "stale delay ignored"),
                }
            }
            HostEvent::EnterAnimationFinished => {
                if self.phase == Phase::Visible && self.builtin(Direction::Enter) {
                    if let Some(listener) = self.listeners.animation.as_mut() {
                        listener.on_enter_animation_end();
                    }
                }
            }
            HostEvent::ExitAnimationFinished => {
                if self.phase == Phase::Dismissing {
                    let notify = self.builtin(Direction::Exit);
                    self.finish(stage, host, notify);
                } else {
                    debug!(phase = ?self.phase, "stale exit notification ignored");
                }
            }
            HostEvent::PointerDown(pt) => return Some(self.pointer_down(pt, host)),
        }
        None
    }

    /// Decides what a pointer down at `pt` does.
    pub fn pointer_down<H: Host + ?Sized>(&mut self, pt: Point, host: &mut H) -> TouchOutcome {
        match self.phase {
            Phase::Visible => {}
            Phase::Dismissing => return TouchOutcome::Consumed,
            _ => return TouchOutcome::PassThrough,
        }
        let touch = self.config.touch;
        let in_focus = self.layout.is_some_and(|l| l.contains(pt));
        if touch.contains(TouchFlags::PASS_THROUGH_FOCUS) && in_focus {
            return match &self.clickable_zone {
                Some(zone) if !zone.contains(pt) => TouchOutcome::Consumed,
                _ => TouchOutcome::PassThrough,
            };
        }
        if touch.contains(TouchFlags::CLOSE_ON_TOUCH) && self.hide(host) {
            return TouchOutcome::Dismissed;
        }
        TouchOutcome::Consumed
    }

    /// Paints one frame and advances the halo.
    ///
    /// Returns `true` if another frame was requested.
    pub fn paint_frame<P: FocusPainter + ?Sized, S: ShownStore, H: Host + ?Sized>(
        &mut self,
        painter: &mut P,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> bool {
        self.service_hide_request(stage, host);
        if !self.is_visible() {
            return false;
        }
        let (Some(key), Some(layout)) = (self.key, self.layout) else {
            return false;
        };
        let cutout = layout.cutout(self.pulse.amplitude());
        paint_focus(
            painter,
            layout.overlay.to_rect(),
            self.config.background,
            cutout.as_ref(),
            self.config.border.as_ref(),
        );
        if layout.has_focus() && self.pulse.advance() {
            host.request_frame(key);
            return true;
        }
        false
    }

    /// Starts the exit transition.
    ///
    /// Only a [`Phase::Visible`] showcase can hide; anything else is logged
    /// and ignored. Returns `true` if the transition started.
    pub fn hide<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.phase != Phase::Visible {
            warn!(phase = ?self.phase, "hide ignored, showcase is not visible");
            return false;
        }
        let (Some(key), Some(layout)) = (self.key, self.layout) else {
            return false;
        };
        let transition = exit_transition(&self.transition_request(
            &*host,
            &layout,
            self.config.exit_animation,
        ));
        host.start_animation(key, &transition);
        self.transition = Some(transition);
        self.phase = Phase::Dismissing;
        debug!(key = key.0, "exit transition started");
        true
    }

    /// Detaches immediately, without an exit transition.
    ///
    /// Returns `false` if the showcase was not attached.
    pub fn remove_view<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
    ) -> bool {
        if !self.is_visible() {
            warn!(phase = ?self.phase, "remove ignored, showcase is not attached");
            return false;
        }
        self.finish(stage, host, false);
        true
    }

    /// Abandons a show that has not attached yet.
    ///
    /// Unregisters a pending layout wait. A delay already scheduled is left to
    /// fire and be ignored. No listener is called. Returns `false` unless the
    /// showcase was waiting for layout or for its delay.
    pub fn cancel<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        match self.phase {
            Phase::AwaitingLayout => {
                if let (Some(key), Some(target)) = (self.key, self.config.target) {
                    host.cancel_layout_wait(key, target);
                }
            }
            Phase::PendingAttach => {}
            _ => return false,
        }
        debug!(phase = ?self.phase, "pending show cancelled");
        self.phase = Phase::Removed;
        true
    }

    fn proceed<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
        key: ShowcaseKey,
    ) -> ShowOutcome {
        let delay = self.config.delay;
        if delay > Duration::ZERO {
            debug!(key = key.0, ?delay, "attach delayed");
            self.phase = Phase::PendingAttach;
            host.schedule_delay(key, delay);
            return ShowOutcome::Deferred;
        }
        self.attach(stage, host, key)
    }

    fn on_target_laid_out<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
    ) {
        if self.phase != Phase::AwaitingLayout {
            debug!(phase = ?self.phase, "stale layout notification ignored");
            return;
        }
        let (Some(key), Some(target)) = (self.key, self.config.target) else {
            return;
        };
        if host.target_bounds(target).is_some_and(needs_layout) {
            debug!(key = key.0, "target still has no size, waiting");
            return;
        }
        host.cancel_layout_wait(key, target);
        self.proceed(stage, host, key);
    }

    fn compute_layout<H: Host + ?Sized>(&mut self, host: &H) -> FocusLayout {
        let metrics = host.metrics();
        let bounds = self.config.target.and_then(|t| host.target_bounds(t));
        let request = self.config.focus_request(bounds);
        let layout = compute_focus(&request, &metrics);
        self.clickable_zone = self
            .config
            .clickable
            .and_then(|t| host.target_bounds(t))
            .map(|b| {
                let zone = FocusRequest {
                    target: Some(b),
                    position: None,
                    ..request
                };
                compute_focus(&zone, &metrics)
            });
        self.layout = Some(layout);
        layout
    }

    fn attach<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
        key: ShowcaseKey,
    ) -> ShowOutcome {
        let host_id = host.id();
        if host.is_finishing() {
            warn!(key = key.0, host = host_id.0, "host is finishing, not attaching");
            self.phase = Phase::Removed;
            return ShowOutcome::Ignored;
        }
        if !stage.activate(host_id, key) {
            debug!(key = key.0, host = host_id.0, "another showcase is visible");
            self.phase = Phase::Created;
            return ShowOutcome::Blocked;
        }

        let layout = self.compute_layout(&*host);
        host.attach_container(
            key,
            &ContainerSpec {
                overlay: layout.overlay,
                background: self.config.background,
                consumes_touches: !self.config.touch.contains(TouchFlags::PASS_THROUGH_FOCUS),
            },
        );
        if !self.config.content.is_none() {
            let region = if self.config.auto_text_position {
                auto_text_region(&layout)
            } else {
                None
            };
            host.attach_content(key, &self.config.content, region);
            if let Some(listener) = self.listeners.content.as_mut() {
                listener.on_content_attached(key, &self.config.content);
            }
        }

        self.pulse = self
            .config
            .pulse
            .map_or_else(FocusPulse::disabled, FocusPulse::new);
        let transition = enter_transition(&self.transition_request(
            &*host,
            &layout,
            self.config.enter_animation,
        ));
        host.start_animation(key, &transition);
        self.transition = Some(transition);
        self.phase = Phase::Visible;

        if let Some(id) = self.config.show_once.as_deref() {
            stage.registry_mut().mark_shown(id);
        }
        debug!(key = key.0, host = host_id.0, focused = layout.has_focus(), "showcase attached");
        host.request_frame(key);
        ShowOutcome::Shown
    }

    fn finish<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
        notify_exit: bool,
    ) {
        let (Some(key), Some(host_id)) = (self.key, self.host) else {
            return;
        };
        host.detach_container(key);
        stage.deactivate(host_id, key);
        self.phase = Phase::Removed;
        debug!(key = key.0, host = host_id.0, "showcase removed");

        if let Some(listener) = self.listeners.dismiss.as_mut() {
            listener.on_dismiss(self.config.show_once.as_deref());
        }
        if notify_exit {
            if let Some(listener) = self.listeners.animation.as_mut() {
                listener.on_exit_animation_end();
            }
        }
    }

    fn service_hide_request<S: ShownStore, H: Host + ?Sized>(
        &mut self,
        stage: &mut Stage<S>,
        host: &mut H,
    ) {
        if let (Some(key), Some(host_id)) = (self.key, self.host) {
            if stage.take_hide_request(host_id, key) {
                self.hide(host);
            }
        }
    }

    fn builtin(&self, direction: Direction) -> bool {
        self.transition
            .is_some_and(|t| t.direction == direction && t.is_builtin())
    }

    fn transition_request<'a, H: Host + ?Sized>(
        &self,
        host: &H,
        layout: &'a FocusLayout,
        custom: Option<AnimationId>,
    ) -> TransitionRequest<'a> {
        let target_width = self
            .config
            .target
            .and_then(|t| host.target_bounds(t))
            .map(|b| b.width());
        TransitionRequest {
            custom,
            reveal_supported: host.supports_circular_reveal(),
            layout,
            target_width,
            window: host.metrics().viewport,
            duration: self.config.animation_duration,
        }
    }
}
