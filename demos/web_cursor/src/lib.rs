// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: a smoothed cursor overlay driven by `comet_backend_web`.
//!
//! Exposes [`mount`] to JavaScript. The returned [`CursorHandle`] keeps the
//! overlay alive until [`CursorHandle::unmount`] is called or the handle is
//! freed. `index.html` mounts on load and wires a toggle button.
//!
//! Build with: `wasm-pack build --target web demos/web_cursor`
//!
//! Then serve `demos/web_cursor/` and open `index.html` in a browser.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use wasm_bindgen::prelude::*;

use comet_backend_web::{ConsoleSink, CursorOverlay, WebConfig};
use comet_core::config::{LayerFactors, OverlayConfig};

/// A mounted overlay, owned by JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct CursorHandle {
    overlay: Option<CursorOverlay>,
}

#[wasm_bindgen]
impl CursorHandle {
    /// Removes the overlay and restores the native pointer.
    pub fn unmount(&mut self) {
        self.overlay = None;
    }

    /// Whether the handle still owns a mounted overlay.
    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.overlay.is_some()
    }

    /// Whether the layers are currently drawn.
    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.overlay.as_ref().is_some_and(CursorOverlay::is_visible)
    }

    /// Name of the active hover variant.
    #[wasm_bindgen(getter)]
    pub fn variant(&self) -> Option<String> {
        self.overlay
            .as_ref()
            .map(|overlay| String::from(overlay.variant().as_str()))
    }
}

/// Mounts the overlay on the current page.
///
/// `lead`, `ring` and `trail` override the smoothing factors when all three
/// are given and valid; otherwise the standard factors are used. With
/// `trace`, transitions (and, with `trace_frames`, every frame) are logged
/// to the console.
///
/// Returns `undefined` on touch-only devices.
#[wasm_bindgen]
pub fn mount(
    trace: bool,
    trace_frames: bool,
    lead: Option<f64>,
    ring: Option<f64>,
    trail: Option<f64>,
) -> Option<CursorHandle> {
    let factors = match (lead, ring, trail) {
        (Some(lead), Some(ring), Some(trail)) => match LayerFactors::new(lead, ring, trail) {
            Ok(factors) => factors,
            Err(err) => {
                console_warn(&alloc::format!("[web_cursor] {err}; using defaults"));
                LayerFactors::STANDARD
            }
        },
        _ => LayerFactors::STANDARD,
    };
    let config = WebConfig {
        overlay: OverlayConfig::STANDARD.with_factors(factors),
        ..WebConfig::default()
    };

    let overlay = if trace {
        let sink = ConsoleSink::new().with_frames(trace_frames);
        CursorOverlay::mount_traced(config, Box::new(sink))
    } else {
        CursorOverlay::mount(config)
    }?;
    Some(CursorHandle {
        overlay: Some(overlay),
    })
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = "warn")]
    fn console_warn(message: &str);
}
