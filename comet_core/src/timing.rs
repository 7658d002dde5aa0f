// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display-synchronized frame ticks.
//!
//! Backends deliver one [`FrameTick`] per display refresh (e.g. from a
//! `requestAnimationFrame` callback). The overlay advances its smoothing
//! filters exactly once per tick; the tick's time is used only for
//! diagnostics, since smoothing is defined per frame rather than per second.

use crate::time::HostTime;

/// A frame opportunity delivered by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter, reset when a loop starts.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick for the given time and frame index.
    #[inline]
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}
