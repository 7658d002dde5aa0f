// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! A backend provides:
//!
//! - **Capability query**: answers whether the primary pointer can hover,
//!   once, at mount time.
//! - **Event plumbing**: forwards pointer-move, pointer-over and document
//!   enter/leave events to the [`Overlay`](crate::overlay::Overlay), with
//!   hovered elements translated to
//!   [`ElementInfo`](crate::element::ElementInfo) paths.
//! - **Tick source**: calls [`Overlay::render`] once per display refresh.
//! - **Presenter**: implements [`Presenter`] to draw the three layers.
//!
//! Teardown order matters: the backend must detach its event subscriptions
//! and stop its tick source before it unmounts the overlay and releases the
//! presenter, so no callback can reach a destroyed layer.
//!
//! [`Overlay::render`]: crate::overlay::Overlay::render

use kurbo::Point;

use crate::smoothing::LayerKind;
use crate::variant::VariantStyle;

/// What a presenter must write for one frame.
///
/// Fields are `None` when nothing changed, so presenters only touch the
/// properties that need it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameChanges {
    /// Frame counter, carried from the originating tick.
    pub frame_index: u64,
    /// New visibility, if it flipped since the previous frame.
    pub shown: Option<bool>,
    /// Lead/ring style, if the variant changed since it was last presented.
    pub style: Option<VariantStyle>,
    /// Top-left corner of each layer in [`LayerKind::index`] order, or
    /// `None` while hidden.
    pub origins: Option<[Point; 3]>,
}

impl FrameChanges {
    /// Top-left corner of one layer, if the layers are drawn this frame.
    #[inline]
    #[must_use]
    pub fn origin(&self, layer: LayerKind) -> Option<Point> {
        self.origins.map(|o| o[layer.index()])
    }

    /// Returns `true` if the frame requires no writes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shown.is_none() && self.style.is_none() && self.origins.is_none()
    }
}

/// Applies frame changes to a platform-native presentation surface.
///
/// The DOM presenter implements this, as do the recording doubles used in
/// tests.
pub trait Presenter {
    /// Applies the given [`FrameChanges`].
    fn apply(&mut self, changes: &FrameChanges);
}
