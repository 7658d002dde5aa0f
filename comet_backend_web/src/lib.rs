// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for comet.
//!
//! This crate mounts a [`comet_core::overlay::Overlay`] on a browser page:
//!
//! - [`CursorOverlay`]: the mounted handle; dropping it unmounts
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`DomPresenter`]: the three fixed-position layer elements
//! - [`ConsoleSink`]: trace sink logging to the browser console

#![no_std]

extern crate alloc;

mod console;
mod dom;
mod listeners;
mod mount;
mod presenter;
mod raf;

pub use comet_core::backend::Presenter;
pub use console::ConsoleSink;
pub use dom::{MarkerClasses, element_info, hover_path};
pub use listeners::Listeners;
pub use mount::{CursorOverlay, WebConfig};
pub use presenter::DomPresenter;
pub use raf::RafLoop;

use comet_core::capability::PointerCapability;
use comet_core::time::{HostTime, Timebase};

/// Media query matching a primary pointer that can hover.
pub const HOVER_QUERY: &str = "(hover: hover)";

/// Converts a `DOMHighResTimeStamp` in milliseconds to microsecond ticks.
pub(crate) fn host_time_from_millis(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "timestamps are small positive f64; µs fits in u64, negatives saturate to 0"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

/// Probes whether the primary pointer can hover.
///
/// A failing or unsupported `matchMedia` reads as [`PointerCapability::NoHover`].
#[must_use]
pub fn supports_hover(window: &web_sys::Window) -> PointerCapability {
    let matches = window
        .match_media(HOVER_QUERY)
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    PointerCapability::from_hover_query(matches)
}
