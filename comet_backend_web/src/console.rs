// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser-console trace output.

use alloc::format;
use alloc::string::String;

use comet_core::trace::{
    FrameEvent, MountEvent, TraceSink, UnmountEvent, VariantEvent, VisibilityEvent,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`TraceSink`] that writes one line per event to the browser console.
///
/// Frame events are high-volume and go to `console.debug`, only when
/// enabled with [`with_frames`](Self::with_frames).
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink {
    frames: bool,
}

impl ConsoleSink {
    /// Creates a sink that logs state transitions only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy that also logs every frame.
    #[must_use]
    pub fn with_frames(mut self, frames: bool) -> Self {
        self.frames = frames;
        self
    }
}

impl TraceSink for ConsoleSink {
    fn on_mount(&mut self, e: &MountEvent) {
        log(&format!(
            "[comet] mount capability={:?} active={}",
            e.capability, e.activated
        ));
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        log(&format!("[comet] unmount after {} frames", e.frames));
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        log(&format!(
            "[comet] visible={} cause={:?}",
            e.visible, e.cause
        ));
    }

    fn on_variant(&mut self, e: &VariantEvent) {
        log(&format!(
            "[comet] variant {} -> {}",
            e.previous.as_str(),
            e.current.as_str()
        ));
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if self.frames {
            console::debug_1(&JsValue::from_str(&frame_line(e)));
        }
    }
}

fn log(line: &str) {
    console::log_1(&JsValue::from_str(line));
}

fn frame_line(e: &FrameEvent) -> String {
    let [lead, ring, trail] = e.positions;
    format!(
        "[comet] frame={} dt={:.1}µs target=({:.1}, {:.1}) lead=({:.1}, {:.1}) ring=({:.1}, {:.1}) trail=({:.1}, {:.1})",
        e.frame_index,
        crate::timebase().ticks_to_micros(e.since_last.ticks()),
        e.target.x,
        e.target.y,
        lead.x,
        lead.y,
        ring.x,
        ring.y,
        trail.x,
        trail.y,
    )
}
