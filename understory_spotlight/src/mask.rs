// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny coverage-only rasterizer for focus frames.
//!
//! [`AlphaMask`] samples each pixel at its center and stores a single alpha
//! byte. It has no anti-aliasing and ignores dash patterns; it exists so hosts
//! without a vector backend (and tests) can still see what a frame erases.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::paint::FocusPainter;
use crate::shape::{Border, Cutout};

/// Row-major alpha coverage buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Creates a fully transparent mask.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw alpha values, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Alpha at pixel `(x, y)`, or `None` outside the mask.
    #[must_use]
    pub fn alpha(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Number of fully transparent pixels.
    #[must_use]
    pub fn transparent_count(&self) -> usize {
        self.data.iter().filter(|a| **a == 0).count()
    }

    fn fill_where(&mut self, alpha: u8, mut inside: impl FnMut(Point) -> bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                if inside(center) {
                    self.data[y * self.width + x] = alpha;
                }
            }
        }
    }
}

fn alpha_of(color: Color) -> u8 {
    color.to_rgba8().a
}

impl FocusPainter for AlphaMask {
    fn fill_background(&mut self, bounds: Rect, color: Color) {
        self.fill_where(alpha_of(color), |pt| bounds.contains(pt));
    }

    fn clear_cutout(&mut self, cutout: &Cutout) {
        self.fill_where(0, |pt| cutout.contains(pt));
    }

    fn stroke_cutout(&mut self, cutout: &Cutout, border: &Border) {
        let half = border.width / 2.0;
        self.fill_where(alpha_of(border.color), |pt| cutout.on_boundary(pt, half));
    }
}
