// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter and exit transitions.
//!
//! The showcase picks a transition and hands it to the host, which runs it
//! and reports back when it finishes. The choice, for both directions:
//!
//! 1. a custom animation, if one was configured;
//! 2. a circular reveal, if the host supports it and something is focused;
//! 3. otherwise a fade.

use core::time::Duration;

use kurbo::{Point, Size, Vec2};
use understory_spotlight::FocusLayout;

use crate::host::AnimationId;

/// Default duration of the built-in transitions.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(400);

/// Whether a transition brings the overlay in or takes it out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The overlay is appearing.
    Enter,
    /// The overlay is going away.
    Exit,
}

/// Timing curve of a built-in transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts slow, ends fast (`t³`).
    AccelerateCubic,
    /// Starts fast, ends slow (`1 - (1 - t)³`).
    DecelerateCubic,
}

impl Easing {
    /// Maps linear progress in `0..=1` to eased progress.
    ///
    /// Input outside that range is clamped.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateCubic => t * t * t,
            Self::DecelerateCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
        }
    }
}

/// What to animate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionKind {
    /// A host-defined animation.
    Custom(AnimationId),
    /// A circular clip growing or shrinking around `center`.
    CircularReveal {
        /// Reveal origin in overlay coordinates.
        center: Point,
        /// Clip radius at the start.
        from_radius: f64,
        /// Clip radius at the end.
        to_radius: f64,
        /// Length of the transition.
        duration: Duration,
        /// Timing curve.
        easing: Easing,
    },
    /// An opacity change over the whole container.
    Fade {
        /// Opacity at the start.
        from: f32,
        /// Opacity at the end.
        to: f32,
        /// Length of the transition.
        duration: Duration,
    },
}

/// A transition the host should run on a showcase container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Enter or exit.
    pub direction: Direction,
    /// What to animate.
    pub kind: TransitionKind,
}

impl Transition {
    /// Returns `true` for the transitions this crate defines.
    ///
    /// Animation listeners are only told about built-in transitions; custom
    /// ones are observed by whoever supplied them.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        !matches!(self.kind, TransitionKind::Custom(_))
    }

    /// Duration of a built-in transition, `None` for custom ones.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self.kind {
            TransitionKind::Custom(_) => None,
            TransitionKind::CircularReveal { duration, .. }
            | TransitionKind::Fade { duration, .. } => Some(duration),
        }
    }

    /// Clip radius of a circular reveal at linear `progress` in `0..=1`.
    ///
    /// Returns `None` for other kinds.
    #[must_use]
    pub fn reveal_radius(&self, progress: f64) -> Option<f64> {
        match self.kind {
            TransitionKind::CircularReveal {
                from_radius,
                to_radius,
                easing,
                ..
            } => Some(from_radius + (to_radius - from_radius) * easing.apply(progress)),
            _ => None,
        }
    }

    /// Opacity of a fade at linear `progress` in `0..=1`.
    ///
    /// Returns `None` for other kinds.
    #[must_use]
    pub fn opacity(&self, progress: f64) -> Option<f32> {
        match self.kind {
            TransitionKind::Fade { from, to, .. } => {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "opacity is consumed as f32"
                )]
                let t = progress.clamp(0.0, 1.0) as f32;
                Some(from + (to - from) * t)
            }
            _ => None,
        }
    }
}

/// Inputs for picking a transition.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TransitionRequest<'a> {
    pub(crate) custom: Option<AnimationId>,
    pub(crate) reveal_supported: bool,
    pub(crate) layout: &'a FocusLayout,
    /// Unscaled width of the focused target, if there is one.
    pub(crate) target_width: Option<f64>,
    /// Full window size; the reveal ends at its diagonal.
    pub(crate) window: Size,
    pub(crate) duration: Duration,
}

impl TransitionRequest<'_> {
    fn reveal_allowed(&self) -> bool {
        self.reveal_supported && self.layout.has_focus()
    }

    fn window_diagonal(&self) -> f64 {
        Vec2::new(self.window.width, self.window.height).hypot()
    }
}

pub(crate) fn enter_transition(request: &TransitionRequest<'_>) -> Transition {
    let kind = if let Some(id) = request.custom {
        TransitionKind::Custom(id)
    } else if request.reveal_allowed() {
        TransitionKind::CircularReveal {
            center: request.layout.center,
            from_radius: request.target_width.map_or(0.0, |w| w / 2.0),
            to_radius: request.window_diagonal(),
            duration: request.duration,
            easing: Easing::AccelerateCubic,
        }
    } else {
        TransitionKind::Fade {
            from: 0.0,
            to: 1.0,
            duration: request.duration,
        }
    };
    Transition {
        direction: Direction::Enter,
        kind,
    }
}

pub(crate) fn exit_transition(request: &TransitionRequest<'_>) -> Transition {
    let kind = if let Some(id) = request.custom {
        TransitionKind::Custom(id)
    } else if request.reveal_allowed() {
        TransitionKind::CircularReveal {
            center: request.layout.center,
            from_radius: request.window_diagonal(),
            to_radius: 0.0,
            duration: request.duration,
            easing: Easing::DecelerateCubic,
        }
    } else {
        TransitionKind::Fade {
            from: 1.0,
            to: 0.0,
            duration: request.duration,
        }
    };
    Transition {
        direction: Direction::Exit,
        kind,
    }
}
