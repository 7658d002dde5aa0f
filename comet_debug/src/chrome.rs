// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Only frame events carry a timestamp. Lifecycle, visibility and variant
//! events are placed at the most recent frame's time (zero before the
//! first frame).
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use comet_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Each frame becomes a counter event plotting how far each layer trails
/// the pointer.
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut ts = 0.0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::Mount(e) => {
                events.push(instant(
                    "Mount",
                    "Lifecycle",
                    ts,
                    &json!({
                        "capability": format!("{:?}", e.capability),
                        "activated": e.activated,
                    }),
                ));
            }
            RecordedEvent::Unmount(e) => {
                events.push(instant(
                    "Unmount",
                    "Lifecycle",
                    ts,
                    &json!({ "frames": e.frames }),
                ));
            }
            RecordedEvent::Visibility(e) => {
                events.push(instant(
                    if e.visible { "Show" } else { "Hide" },
                    "Visibility",
                    ts,
                    &json!({ "cause": format!("{:?}", e.cause) }),
                ));
            }
            RecordedEvent::Variant(e) => {
                events.push(instant(
                    "Variant",
                    "Hover",
                    ts,
                    &json!({
                        "previous": e.previous.as_str(),
                        "current": e.current.as_str(),
                    }),
                ));
            }
            RecordedEvent::Frame(e) => {
                ts = timebase.ticks_to_micros(e.now.ticks());
                let [lead, ring, trail] = e.positions;
                events.push(json!({
                    "ph": "C",
                    "name": "Lag",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "lead": lead.distance(e.target),
                        "ring": ring.distance(e.target),
                        "trail": trail.distance(e.target),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, cat: &str, ts: f64, args: &Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "g",
        "args": args,
    })
}
