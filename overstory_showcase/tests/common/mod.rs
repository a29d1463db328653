// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the `overstory_showcase` integration tests.

#![allow(dead_code, reason = "not every test file uses every fixture")]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Rect, Size};
use overstory_showcase::{
    AnimationListener, ContainerSpec, Content, Dismissal, Host, HostId, HostMetrics, ShowcaseKey,
    TargetId, Transition,
};

/// One call the showcase made on the host.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Attach(ShowcaseKey, ContainerSpec),
    Detach(ShowcaseKey),
    Content(ShowcaseKey, Option<Rect>),
    WaitLayout(ShowcaseKey, TargetId),
    CancelLayout(ShowcaseKey, TargetId),
    Delay(ShowcaseKey, Duration),
    Animate(ShowcaseKey, Transition),
    Frame(ShowcaseKey),
}

/// A host window that records every request.
#[derive(Debug)]
pub(crate) struct FakeHost {
    pub(crate) id: HostId,
    pub(crate) metrics: HostMetrics,
    pub(crate) targets: HashMap<TargetId, Rect>,
    pub(crate) finishing: bool,
    pub(crate) reveal: bool,
    pub(crate) calls: Vec<Call>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self {
            id: HostId(1),
            metrics: HostMetrics::new(Size::new(1080.0, 1920.0)),
            targets: HashMap::new(),
            finishing: false,
            reveal: false,
            calls: Vec::new(),
        }
    }

    pub(crate) fn with_target(mut self, target: TargetId, bounds: Rect) -> Self {
        self.targets.insert(target, bounds);
        self
    }

    /// Keys of containers attached so far, in order.
    pub(crate) fn attached(&self) -> Vec<ShowcaseKey> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Attach(key, _) => Some(*key),
                _ => None,
            })
            .collect()
    }

    /// Keys of containers detached so far, in order.
    pub(crate) fn detached(&self) -> Vec<ShowcaseKey> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Detach(key) => Some(*key),
                _ => None,
            })
            .collect()
    }

    /// Transitions started so far, in order.
    pub(crate) fn transitions(&self) -> Vec<Transition> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Animate(_, t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl Host for FakeHost {
    fn id(&self) -> HostId {
        self.id
    }

    fn metrics(&self) -> HostMetrics {
        self.metrics
    }

    fn is_finishing(&self) -> bool {
        self.finishing
    }

    fn supports_circular_reveal(&self) -> bool {
        self.reveal
    }

    fn target_bounds(&self, target: TargetId) -> Option<Rect> {
        self.targets.get(&target).copied()
    }

    fn attach_container(&mut self, key: ShowcaseKey, spec: &ContainerSpec) {
        self.calls.push(Call::Attach(key, *spec));
    }

    fn detach_container(&mut self, key: ShowcaseKey) {
        self.calls.push(Call::Detach(key));
    }

    fn attach_content(&mut self, key: ShowcaseKey, _content: &Content, region: Option<Rect>) {
        self.calls.push(Call::Content(key, region));
    }

    fn wait_for_layout(&mut self, key: ShowcaseKey, target: TargetId) {
        self.calls.push(Call::WaitLayout(key, target));
    }

    fn cancel_layout_wait(&mut self, key: ShowcaseKey, target: TargetId) {
        self.calls.push(Call::CancelLayout(key, target));
    }

    fn schedule_delay(&mut self, key: ShowcaseKey, delay: Duration) {
        self.calls.push(Call::Delay(key, delay));
    }

    fn start_animation(&mut self, key: ShowcaseKey, transition: &Transition) {
        self.calls.push(Call::Animate(key, *transition));
    }

    fn request_frame(&mut self, key: ShowcaseKey) {
        self.calls.push(Call::Frame(key));
    }
}

/// Shared list of listener notifications.
#[derive(Clone, Debug, Default)]
pub(crate) struct Log(Rc<RefCell<Vec<String>>>);

impl Log {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// A dismiss listener that logs `dismiss:<id>` and `skipped:<id>`.
    pub(crate) fn dismiss_listener(&self) -> impl FnMut(Dismissal<'_>) + 'static {
        let log = self.clone();
        move |d: Dismissal<'_>| {
            let id = d.id().unwrap_or("-");
            match d {
                Dismissal::Dismissed(_) => log.push(format!("dismiss:{id}")),
                Dismissal::Skipped(_) => log.push(format!("skipped:{id}")),
            }
        }
    }

    /// An animation listener that logs `enter_end` and `exit_end`.
    pub(crate) fn animation_listener(&self) -> LoggingAnimations {
        LoggingAnimations(self.clone())
    }
}

#[derive(Debug)]
pub(crate) struct LoggingAnimations(Log);

impl AnimationListener for LoggingAnimations {
    fn on_enter_animation_end(&mut self) {
        self.0.push("enter_end");
    }

    fn on_exit_animation_end(&mut self) {
        self.0.push("exit_end");
    }
}
