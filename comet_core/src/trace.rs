// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the overlay.
//!
//! The [`Overlay`](crate::overlay::Overlay) reports every lifecycle
//! transition, visibility flip, variant change and frame through a
//! [`Tracer`]. Sinks implement [`TraceSink`]; all of its methods default to
//! no-ops, so a sink only overrides the events it cares about.
//!
//! When the `trace` feature is **off**, every `Tracer` method compiles to
//! nothing. When **on**, each method performs a single `Option` branch
//! before dispatching.

use kurbo::Point;

use crate::capability::PointerCapability;
use crate::time::{Duration, HostTime};
use crate::variant::Variant;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a mount is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MountEvent {
    /// The capability the gate was evaluated with.
    pub capability: PointerCapability,
    /// Whether the overlay became active.
    pub activated: bool,
}

/// Emitted when an active overlay is torn down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmountEvent {
    /// Frames rendered during the mount.
    pub frames: u64,
}

/// What caused a visibility flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisibilityCause {
    /// A pointer move while hidden.
    PointerMove,
    /// The pointer left the document.
    DocumentLeave,
    /// The pointer re-entered the document.
    DocumentEnter,
}

/// Emitted when overlay visibility changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    /// The new visibility.
    pub visible: bool,
    /// What triggered it.
    pub cause: VisibilityCause,
}

/// Emitted when hover classification changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantEvent {
    /// Variant before the change.
    pub previous: Variant,
    /// Variant after the change.
    pub current: Variant,
}

/// Emitted once per tick after smoothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Frame counter.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
    /// Time since the previous tick of this mount (zero for the first).
    pub since_last: Duration,
    /// The pointer sample the layers chased.
    pub target: Point,
    /// Layer centers in [`LayerKind::index`](crate::smoothing::LayerKind::index) order.
    pub positions: [Point; 3],
    /// Whether the layers were drawn.
    pub visible: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the overlay.
pub trait TraceSink {
    /// Called when a mount is attempted.
    fn on_mount(&mut self, e: &MountEvent) {
        _ = e;
    }

    /// Called when an active overlay unmounts.
    fn on_unmount(&mut self, e: &UnmountEvent) {
        _ = e;
    }

    /// Called when visibility flips.
    fn on_visibility(&mut self, e: &VisibilityEvent) {
        _ = e;
    }

    /// Called when the hover variant changes.
    fn on_variant(&mut self, e: &VariantEvent) {
        _ = e;
    }

    /// Called after each tick.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer from an optional sink.
    #[inline]
    #[must_use]
    pub fn maybe(sink: Option<&'a mut dyn TraceSink>) -> Self {
        match sink {
            Some(sink) => Self::new(sink),
            None => Self::none(),
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`MountEvent`].
    #[inline]
    pub fn mount(&mut self, e: &MountEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_mount(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UnmountEvent`].
    #[inline]
    pub fn unmount(&mut self, e: &UnmountEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_unmount(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VisibilityEvent`].
    #[inline]
    pub fn visibility(&mut self, e: &VisibilityEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_visibility(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`VariantEvent`].
    #[inline]
    pub fn variant(&mut self, e: &VariantEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_variant(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_accepts_everything() {
        let mut sink = NoopSink;
        sink.on_mount(&MountEvent {
            capability: PointerCapability::Hover,
            activated: true,
        });
        sink.on_variant(&VariantEvent {
            previous: Variant::Default,
            current: Variant::Link,
        });
        sink.on_unmount(&UnmountEvent { frames: 3 });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.visibility(&VisibilityEvent {
            visible: true,
            cause: VisibilityCause::PointerMove,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct VariantLog(Vec<Variant>);
        impl TraceSink for VariantLog {
            fn on_variant(&mut self, e: &VariantEvent) {
                self.0.push(e.current);
            }
        }

        let mut sink = VariantLog(Vec::new());
        let mut tracer = Tracer::maybe(Some(&mut sink));
        tracer.variant(&VariantEvent {
            previous: Variant::Default,
            current: Variant::Card,
        });
        drop(tracer);
        assert_eq!(sink.0, &[Variant::Card]);
    }
}
