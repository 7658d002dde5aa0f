// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use comet_core::time::{HostTime, Timebase};
use comet_core::trace::{
    FrameEvent, MountEvent, TraceSink, UnmountEvent, VariantEvent, VisibilityCause,
    VisibilityEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            frames: true,
        }
    }

    /// Enables or disables per-frame lines.
    #[must_use]
    pub fn with_frames(mut self, frames: bool) -> Self {
        self.frames = frames;
        self
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_micros(t.ticks())
    }
}

fn cause_name(cause: VisibilityCause) -> &'static str {
    match cause {
        VisibilityCause::PointerMove => "move",
        VisibilityCause::DocumentLeave => "leave",
        VisibilityCause::DocumentEnter => "enter",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_mount(&mut self, e: &MountEvent) {
        let outcome = if e.activated { "active" } else { "refused" };
        let _ = writeln!(
            self.writer,
            "[mount] capability={:?} {outcome}",
            e.capability,
        );
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        let _ = writeln!(self.writer, "[unmount] frames={}", e.frames);
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        let state = if e.visible { "shown" } else { "hidden" };
        let _ = writeln!(
            self.writer,
            "[visibility] {state} cause={}",
            cause_name(e.cause),
        );
    }

    fn on_variant(&mut self, e: &VariantEvent) {
        let _ = writeln!(
            self.writer,
            "[variant] {} -> {}",
            e.previous.as_str(),
            e.current.as_str(),
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let [lead, ring, trail] = e.positions;
        let _ = writeln!(
            self.writer,
            "[frame] frame={} now={:.1}µs dt={:.1}µs target=({:.1}, {:.1}) \
             lag lead={:.2} ring={:.2} trail={:.2}{}",
            e.frame_index,
            self.host_us(e.now),
            self.timebase.ticks_to_micros(e.since_last.ticks()),
            e.target.x,
            e.target.y,
            lead.distance(e.target),
            ring.distance(e.target),
            trail.distance(e.target),
            if e.visible { "" } else { " hidden" },
        );
    }
}
