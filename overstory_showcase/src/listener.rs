// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callbacks a showcase reports to.
//!
//! Each listener is a trait so it can be a struct with state, and each trait
//! is also implemented for matching closures.

use crate::config::Content;
use crate::host::ShowcaseKey;

/// How a showcase ended, as seen by a [`DismissListener`] closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dismissal<'a> {
    /// The showcase was shown and then removed.
    Dismissed(Option<&'a str>),
    /// The showcase was never attached because its one-shot id was already
    /// shown.
    Skipped(Option<&'a str>),
}

impl<'a> Dismissal<'a> {
    /// The one-shot id of the showcase, if it had one.
    #[must_use]
    pub fn id(self) -> Option<&'a str> {
        match self {
            Self::Dismissed(id) | Self::Skipped(id) => id,
        }
    }
}

/// Told when a showcase goes away.
///
/// Exactly one of the two methods is called per shown showcase.
pub trait DismissListener {
    /// The showcase was removed after being visible.
    fn on_dismiss(&mut self, id: Option<&str>);

    /// The showcase was skipped without attaching.
    fn on_skipped(&mut self, id: Option<&str>);
}

impl<F> DismissListener for F
where
    F: FnMut(Dismissal<'_>),
{
    fn on_dismiss(&mut self, id: Option<&str>) {
        self(Dismissal::Dismissed(id));
    }

    fn on_skipped(&mut self, id: Option<&str>) {
        self(Dismissal::Skipped(id));
    }
}

/// Told when built-in enter and exit transitions finish.
pub trait AnimationListener {
    /// The enter transition finished.
    fn on_enter_animation_end(&mut self) {}

    /// The exit transition finished and the container is gone.
    fn on_exit_animation_end(&mut self) {}
}

/// Told after the host has placed a showcase's content.
///
/// This is where a custom content layout gets wired up (buttons that call
/// [`Stage::hide_current`](crate::Stage::hide_current), and so on).
pub trait ContentListener {
    /// Content for `key` is on screen.
    fn on_content_attached(&mut self, key: ShowcaseKey, content: &Content);
}

impl<F> ContentListener for F
where
    F: FnMut(ShowcaseKey, &Content),
{
    fn on_content_attached(&mut self, key: ShowcaseKey, content: &Content) {
        self(key, content);
    }
}
