// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The "breathing" halo around a focus hole.
//!
//! A [`FocusPulse`] is a counter that climbs from `0` to a maximum by a fixed
//! step each frame, then falls back to `0`, forever. The counter times a
//! per-unit pixel scale is the halo amplitude added to the hole for that frame.
//!
//! ```
//! use understory_spotlight::{FocusPulse, PulseParams};
//!
//! let mut pulse = FocusPulse::new(PulseParams { max: 2.0, step: 1.0, scale: 3.0 });
//! let mut amplitudes = Vec::new();
//! for _ in 0..6 {
//!     amplitudes.push(pulse.amplitude());
//!     pulse.advance();
//! }
//! assert_eq!(amplitudes, [0.0, 3.0, 6.0, 3.0, 0.0, 3.0]);
//! ```

/// Default maximum of the pulse counter.
pub const DEFAULT_PULSE_MAX: f64 = 20.0;

/// Default counter change per frame.
pub const DEFAULT_PULSE_STEP: f64 = 1.0;

/// Default pixel growth per counter unit.
pub const DEFAULT_PULSE_SCALE: f64 = 1.0;

/// Tuning values for a [`FocusPulse`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseParams {
    /// Counter value at which the halo starts shrinking.
    pub max: f64,
    /// Counter change per frame.
    pub step: f64,
    /// Pixels of growth per counter unit.
    pub scale: f64,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            max: DEFAULT_PULSE_MAX,
            step: DEFAULT_PULSE_STEP,
            scale: DEFAULT_PULSE_SCALE,
        }
    }
}

/// Oscillating halo counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusPulse {
    params: PulseParams,
    counter: f64,
    delta: f64,
    enabled: bool,
}

impl Default for FocusPulse {
    fn default() -> Self {
        Self::new(PulseParams::default())
    }
}

impl FocusPulse {
    /// Creates an enabled pulse at rest.
    ///
    /// A pulse with a non-positive `max` or `step` cannot oscillate and is
    /// created disabled.
    #[must_use]
    pub fn new(params: PulseParams) -> Self {
        Self {
            params,
            counter: 0.0,
            delta: params.step,
            enabled: params.max > 0.0 && params.step > 0.0,
        }
    }

    /// Creates a pulse that never grows the hole.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Returns `true` if the pulse animates.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Tuning values of this pulse.
    #[must_use]
    pub fn params(&self) -> PulseParams {
        self.params
    }

    /// Current counter value.
    #[must_use]
    pub fn counter(&self) -> f64 {
        self.counter
    }

    /// Pixel growth for the current frame.
    #[must_use]
    pub fn amplitude(&self) -> f64 {
        if self.enabled {
            self.counter * self.params.scale
        } else {
            0.0
        }
    }

    /// Moves the counter one step, reversing direction at either bound.
    ///
    /// Returns `true` if another frame should be scheduled.
    pub fn advance(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        if self.counter >= self.params.max {
            self.delta = -self.params.step;
        } else if self.counter <= 0.0 {
            self.delta = self.params.step;
        }
        self.counter = (self.counter + self.delta).clamp(0.0, self.params.max);
        true
    }

    /// Returns the counter to rest.
    pub fn reset(&mut self) {
        self.counter = 0.0;
        self.delta = self.params.step;
    }
}
