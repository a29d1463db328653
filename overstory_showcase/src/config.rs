// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Showcase configuration and its builder.
//!
//! A [`ShowcaseConfig`] is fixed once [`ShowcaseBuilder::build`] returns; the
//! resulting [`Showcase`] only hands out shared references to it.

use core::ops::Range;
use core::time::Duration;

use bitflags::bitflags;
use kurbo::{Point, Rect, Size};
use peniko::Color;
use understory_spotlight::{
    Border, DEFAULT_CORNER_RADIUS, DEFAULT_RECT_PADDING, FocusPosition, FocusRequest, FocusShape,
    PulseParams,
};

use crate::animation::DEFAULT_ANIMATION_DURATION;
use crate::host::{AnimationId, ContentId, TargetId};
use crate::listener::{AnimationListener, ContentListener, DismissListener};
use crate::showcase::{Listeners, Showcase};

/// Dim color used when no background is configured.
pub const DEFAULT_BACKGROUND: Color = Color::from_rgba8(0, 0, 0, 0xbb);

bitflags! {
    /// How touches on a visible showcase are handled.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TouchFlags: u8 {
        /// A touch outside the pass-through zone dismisses the showcase.
        const CLOSE_ON_TOUCH = 0b01;
        /// Touches inside the focus hole reach the element underneath.
        const PASS_THROUGH_FOCUS = 0b10;
    }
}

impl Default for TouchFlags {
    fn default() -> Self {
        Self::CLOSE_ON_TOUCH
    }
}

/// Placement of title text inside its region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Gravity {
    /// Centered both ways.
    #[default]
    Center,
    /// Top edge, horizontally centered.
    Top,
    /// Bottom edge, horizontally centered.
    Bottom,
    /// Leading edge, vertically centered.
    Start,
    /// Trailing edge, vertically centered.
    End,
}

/// Styling applied to a byte range of a styled title.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    /// Byte range into the title text.
    pub range: Range<usize>,
    /// Foreground color override.
    pub color: Option<Color>,
    /// Font weight override (CSS scale, 100–900).
    pub weight: Option<u16>,
    /// Relative size multiplier.
    pub scale: Option<f32>,
}

/// Title text, plain or with spans.
#[derive(Clone, Debug, PartialEq)]
pub enum TitleText {
    /// Unstyled text.
    Plain(String),
    /// Text with styled spans.
    Styled {
        /// The full text.
        text: String,
        /// Styled ranges, in any order.
        spans: Vec<TextSpan>,
    },
}

impl TitleText {
    /// The text without styling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Styled { text, .. } => text,
        }
    }
}

/// A title the host renders over the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Title {
    /// What to show.
    pub text: TitleText,
    /// Placement inside the title region.
    pub gravity: Gravity,
    /// Text size override in host units.
    pub size: Option<f64>,
}

/// What a showcase shows besides the hole.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Content {
    /// Only the dimmed overlay.
    #[default]
    None,
    /// A title.
    Title(Title),
    /// A host-defined layout.
    Custom(ContentId),
}

impl Content {
    /// Returns `true` if there is nothing to attach.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Everything that describes one showcase.
#[derive(Clone, Debug, PartialEq)]
pub struct ShowcaseConfig {
    /// Element to focus on.
    pub target: Option<TargetId>,
    /// Sub-element that alone receives pass-through touches.
    pub clickable: Option<TargetId>,
    /// Explicit focus position; overrides `target` for geometry.
    pub position: Option<FocusPosition>,
    /// Shape of the hole.
    pub shape: FocusShape,
    /// Circle radius multiplier.
    pub radius_factor: f64,
    /// Rectangle size multiplier.
    pub rect_size_factor: f64,
    /// Extra space around a rectangle, per side.
    pub rect_padding: f64,
    /// Corner radius of a rectangle.
    pub corner_radius: f64,
    /// Ignore the status bar inset.
    pub fit_system_windows: bool,
    /// Dim color.
    pub background: Color,
    /// Stroke around the hole.
    pub border: Option<Border>,
    /// Title or custom content.
    pub content: Content,
    /// Suggest a title region above or below the hole.
    pub auto_text_position: bool,
    /// Custom enter animation.
    pub enter_animation: Option<AnimationId>,
    /// Custom exit animation.
    pub exit_animation: Option<AnimationId>,
    /// Duration of the built-in transitions.
    pub animation_duration: Duration,
    /// Touch policy.
    pub touch: TouchFlags,
    /// Identifier for show-once persistence.
    pub show_once: Option<String>,
    /// Breathing halo, `None` when disabled.
    pub pulse: Option<PulseParams>,
    /// Wait this long after geometry is known before attaching.
    pub delay: Duration,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            target: None,
            clickable: None,
            position: None,
            shape: FocusShape::Circle,
            radius_factor: 1.0,
            rect_size_factor: 1.0,
            rect_padding: DEFAULT_RECT_PADDING,
            corner_radius: DEFAULT_CORNER_RADIUS,
            fit_system_windows: false,
            background: DEFAULT_BACKGROUND,
            border: None,
            content: Content::None,
            auto_text_position: false,
            enter_animation: None,
            exit_animation: None,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            touch: TouchFlags::default(),
            show_once: None,
            pulse: Some(PulseParams::default()),
            delay: Duration::ZERO,
        }
    }
}

impl ShowcaseConfig {
    /// Geometry request for the given target bounds.
    #[must_use]
    pub fn focus_request(&self, target: Option<Rect>) -> FocusRequest {
        FocusRequest {
            target,
            position: self.position,
            shape: self.shape,
            radius_factor: self.radius_factor,
            rect_size_factor: self.rect_size_factor,
            rect_padding: self.rect_padding,
            corner_radius: self.corner_radius,
            fit_system_windows: self.fit_system_windows,
        }
    }

    /// Returns `true` if the showcase must wait for its target to be laid
    /// out before it can compute geometry.
    #[must_use]
    pub fn depends_on_layout(&self) -> bool {
        self.target.is_some() && self.position.is_none()
    }
}

/// Fluent builder for a [`Showcase`].
///
/// ```
/// use overstory_showcase::{FocusShape, ShowcaseBuilder, TargetId};
///
/// let showcase = ShowcaseBuilder::new()
///     .focus_on(TargetId(3))
///     .title("Tap here to start")
///     .focus_shape(FocusShape::RoundedRectangle)
///     .round_rect_radius(12.0)
///     .show_once("intro")
///     .build();
/// assert_eq!(showcase.config().show_once.as_deref(), Some("intro"));
/// ```
pub struct ShowcaseBuilder {
    config: ShowcaseConfig,
    circle_at: Option<(Point, f64)>,
    rect_at: Option<(Point, Size)>,
    border_color: Option<Color>,
    border_width: f64,
    border_dash: Option<(f64, f64)>,
    pulse_enabled: bool,
    pulse: PulseParams,
    listeners: Listeners,
}

impl core::fmt::Debug for ShowcaseBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShowcaseBuilder")
            .field("config", &self.config)
            .field("circle_at", &self.circle_at)
            .field("rect_at", &self.rect_at)
            .finish_non_exhaustive()
    }
}

impl Default for ShowcaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShowcaseBuilder {
    /// Starts from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ShowcaseConfig::default(),
            circle_at: None,
            rect_at: None,
            border_color: None,
            border_width: 0.0,
            border_dash: None,
            pulse_enabled: true,
            pulse: PulseParams::default(),
            listeners: Listeners::default(),
        }
    }

    /// Focuses on a host element.
    #[must_use]
    pub fn focus_on(mut self, target: TargetId) -> Self {
        self.config.target = Some(target);
        self
    }

    /// Restricts pass-through touches to a sub-element of the focus.
    #[must_use]
    pub fn clickable_on(mut self, target: TargetId) -> Self {
        self.config.clickable = Some(target);
        self
    }

    /// Focuses on a circle at an explicit position.
    ///
    /// Ignored at build time unless `radius` is positive.
    #[must_use]
    pub fn focus_circle_at_position(mut self, x: f64, y: f64, radius: f64) -> Self {
        self.circle_at = Some((Point::new(x, y), radius));
        self
    }

    /// Focuses on a rectangle centered at an explicit position.
    ///
    /// Ignored at build time unless both sides are positive.
    #[must_use]
    pub fn focus_rect_at_position(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect_at = Some((Point::new(x, y), Size::new(width, height)));
        self
    }

    /// Sets the shape of the hole.
    #[must_use]
    pub fn focus_shape(mut self, shape: FocusShape) -> Self {
        self.config.shape = shape;
        self
    }

    /// Multiplies the circle radius.
    #[must_use]
    pub fn focus_circle_radius_factor(mut self, factor: f64) -> Self {
        self.config.radius_factor = factor;
        self
    }

    /// Multiplies the rectangle size.
    #[must_use]
    pub fn focus_rect_size_factor(mut self, factor: f64) -> Self {
        self.config.rect_size_factor = factor;
        self
    }

    /// Adds space around a rectangular hole.
    #[must_use]
    pub fn rect_padding(mut self, padding: f64) -> Self {
        self.config.rect_padding = padding;
        self
    }

    /// Sets the corner radius of a rectangular hole.
    #[must_use]
    pub fn round_rect_radius(mut self, radius: f64) -> Self {
        self.config.corner_radius = radius;
        self
    }

    /// Lays the overlay out under the status bar instead of below it.
    #[must_use]
    pub fn fit_system_windows(mut self, fit: bool) -> Self {
        self.config.fit_system_windows = fit;
        self
    }

    /// Sets the dim color.
    #[must_use]
    pub fn background_color(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    /// Sets the border color.
    #[must_use]
    pub fn focus_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Sets the border width.
    #[must_use]
    pub fn focus_border_size(mut self, width: f64) -> Self {
        self.border_width = width;
        self
    }

    /// Dashes the border.
    #[must_use]
    pub fn dashed_border(mut self, on: f64, off: f64) -> Self {
        self.border_dash = Some((on, off));
        self
    }

    /// Shows a plain title.
    #[must_use]
    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.set_title_text(TitleText::Plain(text.into()));
        self
    }

    /// Shows a title with styled spans.
    #[must_use]
    pub fn styled_title(mut self, text: impl Into<String>, spans: Vec<TextSpan>) -> Self {
        self.set_title_text(TitleText::Styled {
            text: text.into(),
            spans,
        });
        self
    }

    /// Places the title inside its region.
    ///
    /// Has no effect without a title.
    #[must_use]
    pub fn title_gravity(mut self, gravity: Gravity) -> Self {
        if let Content::Title(title) = &mut self.config.content {
            title.gravity = gravity;
        }
        self
    }

    /// Overrides the title text size.
    ///
    /// Has no effect without a title.
    #[must_use]
    pub fn title_size(mut self, size: f64) -> Self {
        if let Content::Title(title) = &mut self.config.content {
            title.size = Some(size);
        }
        self
    }

    /// Suggests a title region above or below the hole, whichever is larger.
    #[must_use]
    pub fn enable_auto_text_position(mut self) -> Self {
        self.config.auto_text_position = true;
        self
    }

    /// Shows a host-defined layout instead of a title.
    #[must_use]
    pub fn custom_view(mut self, content: ContentId) -> Self {
        self.config.content = Content::Custom(content);
        self
    }

    /// Shows a host-defined layout and reports when it is attached.
    #[must_use]
    pub fn custom_view_with_listener(
        mut self,
        content: ContentId,
        listener: impl ContentListener + 'static,
    ) -> Self {
        self.config.content = Content::Custom(content);
        self.listeners.content = Some(Box::new(listener));
        self
    }

    /// Uses a host-defined enter animation.
    #[must_use]
    pub fn enter_animation(mut self, animation: AnimationId) -> Self {
        self.config.enter_animation = Some(animation);
        self
    }

    /// Uses a host-defined exit animation.
    #[must_use]
    pub fn exit_animation(mut self, animation: AnimationId) -> Self {
        self.config.exit_animation = Some(animation);
        self
    }

    /// Sets the duration of the built-in transitions.
    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.config.animation_duration = duration;
        self
    }

    /// Reports when built-in transitions finish.
    #[must_use]
    pub fn animation_listener(mut self, listener: impl AnimationListener + 'static) -> Self {
        self.listeners.animation = Some(Box::new(listener));
        self
    }

    /// Dismisses the showcase on touches outside the pass-through zone.
    #[must_use]
    pub fn close_on_touch(mut self, close: bool) -> Self {
        self.config.touch.set(TouchFlags::CLOSE_ON_TOUCH, close);
        self
    }

    /// Lets touches inside the hole reach the focused element.
    #[must_use]
    pub fn enable_touch_on_focused_view(mut self, enable: bool) -> Self {
        self.config.touch.set(TouchFlags::PASS_THROUGH_FOCUS, enable);
        self
    }

    /// Shows this showcase at most once per identifier.
    #[must_use]
    pub fn show_once(mut self, id: impl Into<String>) -> Self {
        self.config.show_once = Some(id.into());
        self
    }

    /// Reports dismissal or skip.
    #[must_use]
    pub fn dismiss_listener(mut self, listener: impl DismissListener + 'static) -> Self {
        self.listeners.dismiss = Some(Box::new(listener));
        self
    }

    /// Turns the breathing halo off.
    #[must_use]
    pub fn disable_focus_animation(mut self) -> Self {
        self.pulse_enabled = false;
        self
    }

    /// Sets the counter value at which the halo starts shrinking.
    #[must_use]
    pub fn focus_animation_max_value(mut self, max: f64) -> Self {
        self.pulse.max = max;
        self
    }

    /// Sets the counter change per frame.
    #[must_use]
    pub fn focus_animation_step(mut self, step: f64) -> Self {
        self.pulse.step = step;
        self
    }

    /// Sets the pixel growth per counter unit.
    #[must_use]
    pub fn focus_animation_scale(mut self, scale: f64) -> Self {
        self.pulse.scale = scale;
        self
    }

    /// Waits this long after geometry is known before attaching.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    /// Freezes the configuration.
    #[must_use]
    pub fn build(self) -> Showcase {
        let Self {
            mut config,
            circle_at,
            rect_at,
            border_color,
            border_width,
            border_dash,
            pulse_enabled,
            pulse,
            listeners,
        } = self;

        config.position = FocusPosition::resolve(circle_at, rect_at);
        match config.position {
            Some(FocusPosition::Circle { .. }) => config.shape = FocusShape::Circle,
            Some(FocusPosition::Rect { .. }) => config.shape = FocusShape::RoundedRectangle,
            None => {}
        }
        config.border = border_color
            .filter(|_| border_width > 0.0)
            .map(|color| {
                let border = Border::new(color, border_width);
                match border_dash {
                    Some((on, off)) => border.with_dash(on, off),
                    None => border,
                }
            });
        config.pulse = pulse_enabled.then_some(pulse);

        Showcase::from_parts(config, listeners)
    }

    fn set_title_text(&mut self, text: TitleText) {
        match &mut self.config.content {
            Content::Title(title) => title.text = text,
            content => {
                *content = Content::Title(Title {
                    text,
                    gravity: Gravity::default(),
                    size: None,
                });
            }
        }
    }
}
