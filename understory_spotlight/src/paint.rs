// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting a dimmed surface with a focus hole.
//!
//! Backends implement [`FocusPainter`]; [`paint_focus`] issues the calls for
//! one frame in a fixed order: opaque background, then the erased hole, then
//! the optional border. [`RecordingPainter`] records those calls for tests and
//! debugging, and [`AlphaMask`](crate::AlphaMask) rasterizes them.

use alloc::vec::Vec;

use kurbo::Rect;
use peniko::Color;

use crate::shape::{Border, Cutout};

/// A backend that can draw a focus frame.
pub trait FocusPainter {
    /// Fills `bounds` with the dim color.
    fn fill_background(&mut self, bounds: Rect, color: Color);

    /// Erases the hole to full transparency.
    fn clear_cutout(&mut self, cutout: &Cutout);

    /// Strokes the hole boundary.
    fn stroke_cutout(&mut self, cutout: &Cutout, border: &Border);
}

/// Paints one frame of a spotlight overlay.
///
/// With no `cutout` the whole surface is dimmed and nothing is erased.
/// Borders that are not [visible](Border::is_visible) are skipped.
pub fn paint_focus<P: FocusPainter + ?Sized>(
    painter: &mut P,
    bounds: Rect,
    background: Color,
    cutout: Option<&Cutout>,
    border: Option<&Border>,
) {
    painter.fill_background(bounds, background);
    let Some(cutout) = cutout else {
        return;
    };
    painter.clear_cutout(cutout);
    if let Some(border) = border.filter(|b| b.is_visible()) {
        painter.stroke_cutout(cutout, border);
    }
}

/// A single painter call captured by [`RecordingPainter`].
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// [`FocusPainter::fill_background`].
    Background {
        /// Filled bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// [`FocusPainter::clear_cutout`].
    Clear(Cutout),
    /// [`FocusPainter::stroke_cutout`].
    Stroke {
        /// Stroked hole.
        cutout: Cutout,
        /// Border style.
        border: Border,
    },
}

/// Painter that records every call instead of drawing.
#[derive(Clone, Debug, Default)]
pub struct RecordingPainter {
    ops: Vec<PaintOp>,
}

impl RecordingPainter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded ops in call order.
    #[must_use]
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Takes the recorded ops, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<PaintOp> {
        core::mem::take(&mut self.ops)
    }

    /// The most recently cleared cut-out, if any.
    #[must_use]
    pub fn last_cutout(&self) -> Option<Cutout> {
        self.ops.iter().rev().find_map(|op| match op {
            PaintOp::Clear(c) => Some(*c),
            _ => None,
        })
    }
}

impl FocusPainter for RecordingPainter {
    fn fill_background(&mut self, bounds: Rect, color: Color) {
        self.ops.push(PaintOp::Background { bounds, color });
    }

    fn clear_cutout(&mut self, cutout: &Cutout) {
        self.ops.push(PaintOp::Clear(*cutout));
    }

    fn stroke_cutout(&mut self, cutout: &Cutout, border: &Border) {
        self.ops.push(PaintOp::Stroke {
            cutout: *cutout,
            border: *border,
        });
    }
}
