// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use std::iter::FusedIterator;

use comet_core::capability::PointerCapability;
use comet_core::time::{Duration, HostTime};
use comet_core::trace::{
    FrameEvent, MountEvent, TraceSink, UnmountEvent, VariantEvent, VisibilityCause,
    VisibilityEvent,
};
use comet_core::variant::Variant;
use kurbo::Point;

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_MOUNT: u8 = 1;
const TAG_UNMOUNT: u8 = 2;
const TAG_VISIBILITY: u8 = 3;
const TAG_VARIANT: u8 = 4;
const TAG_FRAME: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_point(&mut self, p: Point) {
        self.buf.extend_from_slice(&p.x.to_le_bytes());
        self.buf.extend_from_slice(&p.y.to_le_bytes());
    }

    fn write_variant(&mut self, v: Variant) {
        self.write_u8(match v {
            Variant::Default => 0,
            Variant::Control => 1,
            Variant::Link => 2,
            Variant::Card => 3,
            Variant::Input => 4,
            Variant::Social => 5,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_mount(&mut self, e: &MountEvent) {
        self.write_u8(TAG_MOUNT);
        self.write_bool(e.capability.supports_overlay());
        self.write_bool(e.activated);
    }

    fn on_unmount(&mut self, e: &UnmountEvent) {
        self.write_u8(TAG_UNMOUNT);
        self.write_u64(e.frames);
    }

    fn on_visibility(&mut self, e: &VisibilityEvent) {
        self.write_u8(TAG_VISIBILITY);
        self.write_bool(e.visible);
        self.write_u8(match e.cause {
            VisibilityCause::PointerMove => 0,
            VisibilityCause::DocumentLeave => 1,
            VisibilityCause::DocumentEnter => 2,
        });
    }

    fn on_variant(&mut self, e: &VariantEvent) {
        self.write_u8(TAG_VARIANT);
        self.write_variant(e.previous);
        self.write_variant(e.current);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
        self.write_u64(e.since_last.ticks());
        self.write_point(e.target);
        for p in e.positions {
            self.write_point(p);
        }
        self.write_bool(e.visible);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`MountEvent`].
    Mount(MountEvent),
    /// An [`UnmountEvent`].
    Unmount(UnmountEvent),
    /// A [`VisibilityEvent`].
    Visibility(VisibilityEvent),
    /// A [`VariantEvent`].
    Variant(VariantEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first truncated record or unknown tag.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        let [v] = self.take::<1>()?;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_u64(&mut self) -> Option<u64> {
        Some(u64::from_le_bytes(self.take()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        Some(f64::from_le_bytes(self.take()?))
    }

    fn read_point(&mut self) -> Option<Point> {
        Some(Point::new(self.read_f64()?, self.read_f64()?))
    }

    fn read_variant(&mut self) -> Option<Variant> {
        Variant::ALL.get(usize::from(self.read_u8()?)).copied()
    }

    fn decode_mount(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Mount(MountEvent {
            capability: PointerCapability::from_hover_query(self.read_bool()?),
            activated: self.read_bool()?,
        }))
    }

    fn decode_unmount(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Unmount(UnmountEvent {
            frames: self.read_u64()?,
        }))
    }

    fn decode_visibility(&mut self) -> Option<RecordedEvent> {
        let visible = self.read_bool()?;
        let cause = match self.read_u8()? {
            0 => VisibilityCause::PointerMove,
            1 => VisibilityCause::DocumentLeave,
            2 => VisibilityCause::DocumentEnter,
            _ => return None,
        };
        let event = VisibilityEvent { visible, cause };
        Some(RecordedEvent::Visibility(event))
    }

    fn decode_variant(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Variant(VariantEvent {
            previous: self.read_variant()?,
            current: self.read_variant()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            since_last: Duration(self.read_u64()?),
            target: self.read_point()?,
            positions: [self.read_point()?, self.read_point()?, self.read_point()?],
            visible: self.read_bool()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        let event = match tag {
            TAG_MOUNT => self.decode_mount(),
            TAG_UNMOUNT => self.decode_unmount(),
            TAG_VISIBILITY => self.decode_visibility(),
            TAG_VARIANT => self.decode_variant(),
            TAG_FRAME => self.decode_frame(),
            _ => None, // unknown tag → stop iteration
        };
        if event.is_none() {
            // Never resume from the middle of a bad record.
            self.pos = self.data.len();
        }
        event
    }
}

impl FusedIterator for DecodeIter<'_> {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            frame_index: 7,
            now: HostTime(1_000_000),
            since_last: Duration(16_667),
            target: Point::new(120.0, 80.5),
            positions: [
                Point::new(100.0, 70.0),
                Point::new(90.0, 60.0),
                Point::new(80.0, 50.0),
            ],
            visible: true,
        }
    }

    #[test]
    fn frame_survives_recording() {
        let mut rec = RecorderSink::new();
        let orig = sample_frame();
        rec.on_frame(&orig);

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events, vec![RecordedEvent::Frame(orig)]);
    }

    #[test]
    fn session_decodes_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_mount(&MountEvent {
            capability: PointerCapability::Hover,
            activated: true,
        });
        rec.on_visibility(&VisibilityEvent {
            visible: true,
            cause: VisibilityCause::PointerMove,
        });
        rec.on_variant(&VariantEvent {
            previous: Variant::Default,
            current: Variant::Social,
        });
        rec.on_frame(&sample_frame());
        rec.on_unmount(&UnmountEvent { frames: 1 });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            events[0],
            RecordedEvent::Mount(MountEvent {
                capability: PointerCapability::Hover,
                activated: true,
            })
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::Visibility(VisibilityEvent {
                visible: true,
                cause: VisibilityCause::PointerMove,
            })
        ));
        assert!(matches!(
            events[2],
            RecordedEvent::Variant(VariantEvent {
                previous: Variant::Default,
                current: Variant::Social,
            })
        ));
        assert!(matches!(events[3], RecordedEvent::Frame(_)));
        assert!(matches!(
            events[4],
            RecordedEvent::Unmount(UnmountEvent { frames: 1 })
        ));
    }

    #[test]
    fn refused_mount_records_no_hover() {
        let mut rec = RecorderSink::new();
        rec.on_mount(&MountEvent {
            capability: PointerCapability::NoHover,
            activated: false,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        match &events[0] {
            RecordedEvent::Mount(e) => {
                assert_eq!(e.capability, PointerCapability::NoHover);
                assert!(!e.activated);
            }
            other => panic!("expected Mount, got {other:?}"),
        }
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_unmount(&UnmountEvent { frames: 3 });
        rec.on_frame(&sample_frame());
        let bytes = rec.into_bytes();

        let events: Vec<_> = decode(&bytes[..bytes.len() - 1]).collect();
        assert_eq!(
            events,
            vec![RecordedEvent::Unmount(UnmountEvent { frames: 3 })]
        );
    }

    #[test]
    fn iteration_stays_stopped_after_a_bad_record() {
        // A visibility record with an invalid cause, followed by a valid
        // unmount record.
        let mut tail = RecorderSink::new();
        tail.on_unmount(&UnmountEvent { frames: 1 });
        let mut bytes = vec![TAG_VISIBILITY, 1, 9];
        bytes.extend_from_slice(tail.as_bytes());

        let mut iter = decode(&bytes);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let events: Vec<_> = decode(&[0xFF, TAG_UNMOUNT, 0, 0, 0, 0, 0, 0, 0, 0]).collect();
        assert!(events.is_empty());
    }
}
