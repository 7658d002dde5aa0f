// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover capability gate.
//!
//! The overlay replaces a hover-capable pointer. On hosts whose primary
//! input cannot hover (touch screens, styluses without hover), the overlay
//! stays inert: nothing is subscribed, nothing is drawn. The backend
//! evaluates the capability once at mount time (on the web, the
//! `(hover: hover)` media query) and hands the result to
//! [`Overlay::mount`](crate::overlay::Overlay::mount).

/// Whether the host's primary pointer can hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerCapability {
    /// The pointer can hover over content without pressing.
    Hover,
    /// The pointer cannot hover (touch-first, or the query failed).
    NoHover,
}

impl PointerCapability {
    /// Converts a raw media-query result into a capability.
    #[inline]
    #[must_use]
    pub const fn from_hover_query(matches: bool) -> Self {
        if matches { Self::Hover } else { Self::NoHover }
    }

    /// Returns `true` if the overlay may activate on this host.
    #[inline]
    #[must_use]
    pub const fn supports_overlay(self) -> bool {
        matches!(self, Self::Hover)
    }
}
