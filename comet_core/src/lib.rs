// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer sampling, hover classification and layer smoothing for a
//! trailing cursor overlay.
//!
//! `comet_core` implements the platform-independent half of a custom
//! pointer: three visual layers (lead, ring, trail) that chase the raw
//! pointer at different speeds and restyle themselves according to what is
//! under the pointer. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   pointer events ──► Overlay::on_pointer_* ──► sample, variant, visibility
//!                                                      │
//!   FrameTick ──► Overlay::render() ──► Smoother::advance(sample)
//!                                            │
//!                                            ▼
//!                          FrameChanges ──► Presenter::apply()
//! ```
//!
//! **[`overlay`]**: The [`Overlay`](overlay::Overlay) state machine. It owns
//! all mutable state and computes per-frame changes.
//!
//! **[`classify`]**: Priority-ordered mapping from a hovered
//! [`element`] path to a [`variant::Variant`].
//!
//! **[`smoothing`]**: Per-layer exponential smoothing.
//!
//! **[`variant`]**: Variants and their visual parameters.
//!
//! **[`config`]**: Validated smoothing factors and style tables.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait platform
//! backends implement, and the teardown contract they follow.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod capability;
pub mod classify;
pub mod config;
pub mod element;
pub mod overlay;
pub mod smoothing;
pub mod time;
pub mod timing;
pub mod trace;
pub mod variant;
