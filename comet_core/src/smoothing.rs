// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer exponential smoothing.
//!
//! Each of the three overlay layers chases the latest pointer sample with a
//! first-order low-pass filter, advanced once per frame:
//!
//! ```text
//! current = current + (target - current) * factor
//! ```
//!
//! With `factor` in `(0, 1]` the distance to a held target shrinks by
//! `1 - factor` every tick, so convergence is monotonic and never
//! overshoots. The lead layer uses the largest factor and the trail the
//! smallest; their positions diverging while the pointer moves is the
//! trailing effect.

use core::fmt;

use kurbo::Point;

/// A smoothing constant in `(0, 1]`.
///
/// `1.0` snaps to the target on the first tick; values near zero lag far
/// behind.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct SmoothingFactor(f64);

impl SmoothingFactor {
    /// Stock factor for the lead layer.
    pub const LEAD: Self = Self(0.15);
    /// Stock factor for the ring layer.
    pub const RING: Self = Self(0.12);
    /// Stock factor for the trail layer.
    pub const TRAIL: Self = Self(0.08);
    /// Snap straight to the target.
    pub const INSTANT: Self = Self(1.0);

    /// Creates a factor, or returns `None` if `value` is not in `(0, 1]`.
    ///
    /// NaN is rejected.
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        (value > 0.0 && value <= 1.0).then_some(Self(value))
    }

    /// Returns the raw factor.
    #[inline]
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Debug for SmoothingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SmoothingFactor({})", self.0)
    }
}

/// The three overlay layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// The variant-styled dot closest to the pointer.
    Lead,
    /// The outlined ring around it.
    Ring,
    /// The small dot that lags furthest behind.
    Trail,
}

impl LayerKind {
    /// All layers, in index order.
    pub const ALL: [Self; 3] = [Self::Lead, Self::Ring, Self::Trail];

    /// Stable array index for this layer.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Lead => 0,
            Self::Ring => 1,
            Self::Trail => 2,
        }
    }
}

/// One smoothed position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerState {
    position: Point,
    factor: SmoothingFactor,
}

impl LayerState {
    /// Creates a layer at `position` with a fixed factor.
    #[inline]
    #[must_use]
    pub const fn new(position: Point, factor: SmoothingFactor) -> Self {
        Self { position, factor }
    }

    /// Current filtered position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// This layer's factor.
    #[inline]
    #[must_use]
    pub const fn factor(&self) -> SmoothingFactor {
        self.factor
    }

    /// Advances one tick toward `target`.
    #[inline]
    pub fn advance(&mut self, target: Point) {
        self.position += (target - self.position) * self.factor.get();
    }
}

/// The three layer filters, advanced together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoother {
    layers: [LayerState; 3],
}

impl Smoother {
    /// Creates all three layers at `origin`.
    #[must_use]
    pub const fn new(
        origin: Point,
        lead: SmoothingFactor,
        ring: SmoothingFactor,
        trail: SmoothingFactor,
    ) -> Self {
        Self {
            layers: [
                LayerState::new(origin, lead),
                LayerState::new(origin, ring),
                LayerState::new(origin, trail),
            ],
        }
    }

    /// Advances every layer one tick toward `target`.
    pub fn advance(&mut self, target: Point) {
        for layer in &mut self.layers {
            layer.advance(target);
        }
    }

    /// State of one layer.
    #[inline]
    #[must_use]
    pub const fn layer(&self, kind: LayerKind) -> &LayerState {
        &self.layers[kind.index()]
    }

    /// Current positions in [`LayerKind::index`] order.
    #[must_use]
    pub fn positions(&self) -> [Point; 3] {
        self.layers.map(|l| l.position)
    }
}
