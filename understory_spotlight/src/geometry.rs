// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus geometry: where the hole goes and how big it is.
//!
//! [`compute_focus`] turns a [`FocusRequest`] (target bounds or an explicit
//! position, plus shape and scale factors) and the host's [`HostMetrics`] into
//! a [`FocusLayout`]. The layout is a pure value; recomputing it with the same
//! inputs always yields the same result.

use kurbo::{Circle, Point, Rect, RoundedRect, Size, Vec2};

use crate::shape::{Cutout, FocusShape};

/// Default corner radius for rounded-rectangle focus holes.
pub const DEFAULT_CORNER_RADIUS: f64 = 20.0;

/// Default padding added around rounded-rectangle focus holes.
pub const DEFAULT_RECT_PADDING: f64 = 0.0;

/// Window metrics that influence where a focus hole ends up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostMetrics {
    /// Size of the host window's display area.
    pub viewport: Size,
    /// Height of the system status bar drawn over the window.
    pub status_bar_height: f64,
    /// Whether the host window hides system bars.
    pub fullscreen: bool,
}

impl HostMetrics {
    /// Creates metrics for a viewport with no status bar.
    #[must_use]
    pub const fn new(viewport: Size) -> Self {
        Self {
            viewport,
            status_bar_height: 0.0,
            fullscreen: false,
        }
    }

    /// Returns these metrics with the given status bar height.
    #[must_use]
    pub const fn with_status_bar(mut self, height: f64) -> Self {
        self.status_bar_height = height;
        self
    }

    /// Returns these metrics with the fullscreen flag set.
    #[must_use]
    pub const fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Amount subtracted from target y coordinates.
    ///
    /// Window coordinates include the status bar unless the overlay itself is
    /// laid out under it (`fit_system_windows`) or the window is fullscreen.
    #[must_use]
    pub fn vertical_inset(&self, fit_system_windows: bool) -> f64 {
        if fit_system_windows || self.fullscreen {
            0.0
        } else {
            self.status_bar_height
        }
    }

    /// Size of the dimmed overlay surface.
    #[must_use]
    pub fn overlay_size(&self, fit_system_windows: bool) -> Size {
        let inset = if fit_system_windows {
            0.0
        } else {
            self.status_bar_height
        };
        Size::new(self.viewport.width, (self.viewport.height - inset).max(0.0))
    }
}

/// A caller-supplied focus position that bypasses target bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusPosition {
    /// A circle at `center` with a fixed `radius`.
    Circle {
        /// Center in overlay coordinates.
        center: Point,
        /// Radius in pixels.
        radius: f64,
    },
    /// A rounded rectangle centered at `center`.
    Rect {
        /// Center in overlay coordinates.
        center: Point,
        /// Width and height in pixels.
        size: Size,
    },
}

impl FocusPosition {
    /// Picks the effective position out of the two explicit position inputs.
    ///
    /// A circle with a positive radius wins over a rectangle; a rectangle is
    /// only used when both its width and height are positive.
    #[must_use]
    pub fn resolve(circle: Option<(Point, f64)>, rect: Option<(Point, Size)>) -> Option<Self> {
        if let Some((center, radius)) = circle {
            if radius > 0.0 {
                return Some(Self::Circle { center, radius });
            }
        }
        match rect {
            Some((center, size)) if size.width > 0.0 && size.height > 0.0 => {
                Some(Self::Rect { center, size })
            }
            _ => None,
        }
    }
}

/// Inputs for [`compute_focus`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusRequest {
    /// Bounds of the focused element in window coordinates, if any.
    pub target: Option<Rect>,
    /// Explicit position; takes precedence over `target`.
    pub position: Option<FocusPosition>,
    /// Shape used with `target`. Explicit positions carry their own shape.
    pub shape: FocusShape,
    /// Multiplier applied to the base circle radius.
    pub radius_factor: f64,
    /// Multiplier applied to the target size for rounded rectangles.
    pub rect_size_factor: f64,
    /// Extra space added on every side of rounded rectangles.
    pub rect_padding: f64,
    /// Corner radius of rounded rectangles.
    pub corner_radius: f64,
    /// Whether the overlay is laid out under the system bars.
    pub fit_system_windows: bool,
}

impl Default for FocusRequest {
    fn default() -> Self {
        Self {
            target: None,
            position: None,
            shape: FocusShape::Circle,
            radius_factor: 1.0,
            rect_size_factor: 1.0,
            rect_padding: DEFAULT_RECT_PADDING,
            corner_radius: DEFAULT_CORNER_RADIUS,
            fit_system_windows: false,
        }
    }
}

impl FocusRequest {
    /// Creates a request focusing the element with the given window bounds.
    #[must_use]
    pub fn target(bounds: Rect) -> Self {
        Self {
            target: Some(bounds),
            ..Self::default()
        }
    }
}

/// Returns `true` if `bounds` has not been measured yet.
///
/// Elements report an empty size until their first layout pass; computing a
/// hole for them would produce a degenerate zero-size focus.
#[must_use]
pub fn needs_layout(bounds: Rect) -> bool {
    bounds.width() == 0.0 && bounds.height() == 0.0
}

/// Static geometry of a focus hole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FocusGeometry {
    /// Circular hole.
    Circle {
        /// Center in overlay coordinates.
        center: Point,
        /// Base radius before any halo growth.
        radius: f64,
    },
    /// Rounded rectangular hole.
    RoundedRect {
        /// Bounds in overlay coordinates.
        rect: Rect,
        /// Corner radius.
        corner_radius: f64,
    },
}

impl FocusGeometry {
    /// Shape of this geometry.
    #[must_use]
    pub fn shape(&self) -> FocusShape {
        match self {
            Self::Circle { .. } => FocusShape::Circle,
            Self::RoundedRect { .. } => FocusShape::RoundedRectangle,
        }
    }

    /// Center of the hole.
    #[must_use]
    pub fn center(&self) -> Point {
        match self {
            Self::Circle { center, .. } => *center,
            Self::RoundedRect { rect, .. } => rect.center(),
        }
    }

    /// Circle radius, or `None` for rounded rectangles.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match self {
            Self::Circle { radius, .. } => Some(*radius),
            Self::RoundedRect { .. } => None,
        }
    }

    /// Rectangle bounds, or `None` for circles.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Circle { .. } => None,
            Self::RoundedRect { rect, .. } => Some(*rect),
        }
    }

    /// Half of the vertical extent of the hole.
    #[must_use]
    pub fn half_height(&self) -> f64 {
        match self {
            Self::Circle { radius, .. } => *radius,
            Self::RoundedRect { rect, .. } => rect.height() / 2.0,
        }
    }

    /// The cut-out grown by `amplitude` pixels on every side.
    ///
    /// Corner radii are not scaled with the amplitude.
    #[must_use]
    pub fn with_amplitude(&self, amplitude: f64) -> Cutout {
        match *self {
            Self::Circle { center, radius } => {
                Cutout::Circle(Circle::new(center, (radius + amplitude).max(0.0)))
            }
            Self::RoundedRect {
                rect,
                corner_radius,
            } => Cutout::RoundedRect(RoundedRect::from_rect(
                rect.inflate(amplitude, amplitude),
                corner_radius,
            )),
        }
    }

    /// The cut-out at rest.
    #[must_use]
    pub fn cutout(&self) -> Cutout {
        self.with_amplitude(0.0)
    }

    /// Returns `true` if `pt` falls inside the focus zone.
    ///
    /// Circles use a strict distance test. Rectangles use a half-open
    /// point-in-rect test and ignore the rounded corners, so touches near a
    /// corner still count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle { center, radius } => center.distance(pt) < *radius,
            Self::RoundedRect { rect, .. } => rect.contains(pt),
        }
    }
}

/// Result of [`compute_focus`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusLayout {
    /// Size of the dimmed overlay surface.
    pub overlay: Size,
    /// Center used for reveal animations: the focus center, or the viewport
    /// center when there is no focus.
    pub center: Point,
    /// Size of the focused element after the rect-size factor was applied.
    pub focus_size: Size,
    /// The hole, if anything is focused.
    pub focus: Option<FocusGeometry>,
}

impl FocusLayout {
    /// Returns `true` if the overlay punches a hole.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.focus.is_some()
    }

    /// The cut-out for a frame with the given halo amplitude.
    #[must_use]
    pub fn cutout(&self, amplitude: f64) -> Option<Cutout> {
        self.focus.map(|f| f.with_amplitude(amplitude))
    }

    /// Returns `true` if `pt` falls inside the focus zone.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.focus.is_some_and(|f| f.contains(pt))
    }
}

/// Computes the focus layout for `request` on a host with `metrics`.
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_spotlight::{FocusRequest, HostMetrics, compute_focus};
///
/// let metrics = HostMetrics::new((1080.0, 1920.0).into());
/// let request = FocusRequest {
///     radius_factor: 1.2,
///     ..FocusRequest::target(Rect::new(120.0, 120.0, 240.0, 200.0))
/// };
/// let layout = compute_focus(&request, &metrics);
///
/// let focus = layout.focus.unwrap();
/// assert_eq!(focus.center(), Point::new(180.0, 160.0));
/// let expected = 120.0_f64.hypot(80.0) / 2.0 * 1.2;
/// assert!((focus.radius().unwrap() - expected).abs() < 1e-9);
/// ```
#[must_use]
pub fn compute_focus(request: &FocusRequest, metrics: &HostMetrics) -> FocusLayout {
    let overlay = metrics.overlay_size(request.fit_system_windows);
    let viewport_center = Point::new(metrics.viewport.width / 2.0, metrics.viewport.height / 2.0);

    if let Some(position) = request.position {
        let (focus, focus_size) = match position {
            FocusPosition::Circle { center, radius } => (
                FocusGeometry::Circle { center, radius },
                Size::new(radius * 2.0, radius * 2.0),
            ),
            FocusPosition::Rect { center, size } => (
                FocusGeometry::RoundedRect {
                    rect: Rect::from_center_size(center, size),
                    corner_radius: request.corner_radius,
                },
                size,
            ),
        };
        return FocusLayout {
            overlay,
            center: focus.center(),
            focus_size,
            focus: Some(focus),
        };
    }

    let Some(target) = request.target else {
        return FocusLayout {
            overlay,
            center: viewport_center,
            focus_size: Size::ZERO,
            focus: None,
        };
    };

    let inset = metrics.vertical_inset(request.fit_system_windows);
    let center = target.center() - Vec2::new(0.0, inset);
    let focus_size = Size::new(
        target.width() * request.rect_size_factor,
        target.height() * request.rect_size_factor,
    );
    let focus = match request.shape {
        FocusShape::Circle => {
            let base = Vec2::new(target.width(), target.height()).hypot() / 2.0;
            FocusGeometry::Circle {
                center,
                radius: base * request.radius_factor,
            }
        }
        FocusShape::RoundedRectangle => FocusGeometry::RoundedRect {
            rect: Rect::from_center_size(center, focus_size)
                .inflate(request.rect_padding, request.rect_padding),
            corner_radius: request.corner_radius,
        },
    };
    FocusLayout {
        overlay,
        center,
        focus_size,
        focus: Some(focus),
    }
}

/// Picks the region for title content: the larger of the bands above or
/// below the focus hole, spanning the overlay width.
///
/// Returns `None` when nothing is focused.
#[must_use]
pub fn auto_text_region(layout: &FocusLayout) -> Option<Rect> {
    let focus = layout.focus?;
    let center = focus.center();
    let half = focus.half_height();
    let top = (center.y - half).max(0.0);
    let bottom = (center.y + half).min(layout.overlay.height);
    let space_above = top;
    let space_below = layout.overlay.height - bottom;
    if space_above > space_below {
        Some(Rect::new(0.0, 0.0, layout.overlay.width, top))
    } else {
        Some(Rect::new(
            0.0,
            bottom,
            layout.overlay.width,
            layout.overlay.height,
        ))
    }
}
