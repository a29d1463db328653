// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus shapes, cut-outs, and border styling.

use kurbo::{Circle, Point, Rect, RoundedRect, Shape};
use peniko::Color;

/// Shape of the focus hole punched through the dim layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusShape {
    /// A circle around the center of the focused element.
    #[default]
    Circle,
    /// A rounded rectangle hugging the focused element.
    RoundedRectangle,
}

/// A concrete cut-out for one frame.
///
/// This is what a painter erases from the dim layer. It is derived from a
/// [`FocusGeometry`](crate::FocusGeometry) plus the current halo amplitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cutout {
    /// Circular hole.
    Circle(Circle),
    /// Rounded rectangular hole.
    RoundedRect(RoundedRect),
}

impl Cutout {
    /// Returns the axis-aligned bounds of the hole.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Circle(c) => c.bounding_box(),
            Self::RoundedRect(r) => r.bounding_box(),
        }
    }

    /// Returns `true` if `pt` lies inside the hole, honoring rounded corners.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Circle(c) => c.contains(pt),
            Self::RoundedRect(r) => r.contains(pt),
        }
    }

    /// Returns `true` if `pt` lies within `half_width` of the hole boundary.
    ///
    /// Used for stroking borders. Rounded rectangles are approximated by the
    /// region between an outset and an inset copy of the shape.
    #[must_use]
    pub fn on_boundary(&self, pt: Point, half_width: f64) -> bool {
        if half_width <= 0.0 {
            return false;
        }
        match self {
            Self::Circle(c) => (c.center.distance(pt) - c.radius).abs() <= half_width,
            Self::RoundedRect(r) => {
                let rect = r.rect();
                let radius = r.radii().top_left;
                let outer = RoundedRect::from_rect(
                    rect.inflate(half_width, half_width),
                    radius + half_width,
                );
                let inner = RoundedRect::from_rect(
                    rect.inflate(-half_width, -half_width),
                    (radius - half_width).max(0.0),
                );
                outer.contains(pt) && !inner.contains(pt)
            }
        }
    }
}

/// Dash pattern for a focus border.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dash {
    /// Length of each drawn segment.
    pub on: f64,
    /// Length of each gap.
    pub off: f64,
}

/// Stroke drawn along the hole boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels. Borders with a non-positive width are not drawn.
    pub width: f64,
    /// Optional dash pattern; solid when `None`.
    pub dash: Option<Dash>,
}

impl Border {
    /// Creates a solid border.
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Returns this border with a dash pattern.
    #[must_use]
    pub const fn with_dash(mut self, on: f64, off: f64) -> Self {
        self.dash = Some(Dash { on, off });
        self
    }

    /// Returns `true` if the border should be drawn at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }
}
