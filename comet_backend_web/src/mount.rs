// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mounted overlay handle.
//!
//! [`CursorOverlay::mount`] wires an [`Overlay`] to the page: capability
//! query, layer elements, document listeners, and the frame loop. The
//! returned handle *is* the mount; dropping it unmounts.
//!
//! Teardown runs in a fixed order: listeners are detached, then the frame
//! loop is cancelled, then the overlay is unmounted and its elements
//! removed. Once the first two steps are done no callback can reach the
//! overlay again, so nothing needs to check for a missing layer per frame.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use comet_core::config::OverlayConfig;
use comet_core::element::ElementInfo;
use comet_core::overlay::Overlay;
use comet_core::trace::{TraceSink, Tracer};
use comet_core::variant::Variant;
use kurbo::Point;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Element, Event, MouseEvent};

use crate::dom::{MarkerClasses, hover_path};
use crate::listeners::Listeners;
use crate::presenter::DomPresenter;
use crate::raf::RafLoop;

/// Configuration for [`CursorOverlay`].
#[derive(Clone, Debug, PartialEq)]
pub struct WebConfig {
    /// Smoothing factors and styles.
    pub overlay: OverlayConfig,
    /// Class names recognized as structural markers.
    pub markers: MarkerClasses,
    /// Inject a stylesheet hiding the native pointer while mounted.
    pub hide_native_cursor: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            overlay: OverlayConfig::STANDARD,
            markers: MarkerClasses::default(),
            hide_native_cursor: true,
        }
    }
}

/// State shared between the handle, the listeners and the frame loop.
struct Shared {
    overlay: Overlay,
    presenter: DomPresenter,
    sink: Option<Box<dyn TraceSink>>,
    markers: MarkerClasses,
    /// Reused hovered-path buffer.
    path: Vec<ElementInfo>,
}

fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink {
        Some(sink) => Tracer::new(sink.as_mut()),
        None => Tracer::none(),
    }
}

/// A cursor overlay mounted on the current page.
pub struct CursorOverlay {
    shared: Rc<RefCell<Shared>>,
    listeners: Listeners,
    raf: RafLoop,
}

impl core::fmt::Debug for CursorOverlay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorOverlay")
            .field("listeners", &self.listeners)
            .field("raf", &self.raf)
            .finish_non_exhaustive()
    }
}

impl CursorOverlay {
    /// Mounts the overlay on the current page.
    ///
    /// Returns `None` if the primary pointer cannot hover, or if any part
    /// of the setup fails; in both cases nothing is left attached and the
    /// page keeps its native pointer.
    #[must_use]
    pub fn mount(config: WebConfig) -> Option<Self> {
        Self::try_mount(config, None).ok().flatten()
    }

    /// Like [`mount`](Self::mount), reporting to `sink`.
    #[must_use]
    pub fn mount_traced(config: WebConfig, sink: Box<dyn TraceSink>) -> Option<Self> {
        Self::try_mount(config, Some(sink)).ok().flatten()
    }

    fn try_mount(
        config: WebConfig,
        mut sink: Option<Box<dyn TraceSink>>,
    ) -> Result<Option<Self>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let capability = crate::supports_hover(&window);

        let mut overlay = Overlay::new(config.overlay);
        if !capability.supports_overlay() {
            // Traces the refusal.
            overlay.mount(capability, &mut tracer(&mut sink));
            return Ok(None);
        }

        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?;
        let presenter =
            DomPresenter::new(&document, &config.overlay, config.hide_native_cursor)?;

        let shared = Rc::new(RefCell::new(Shared {
            overlay,
            presenter,
            sink,
            markers: config.markers,
            path: Vec::new(),
        }));

        // The overlay stays inactive, and untraced, until every fallible step
        // has succeeded. Partially registered listeners detach on drop, and
        // events reaching the inactive overlay in between are ignored.
        let mut listeners = Listeners::new();

        let s = Rc::clone(&shared);
        listeners.listen(&document, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let position = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            let s = &mut *s.borrow_mut();
            s.overlay.on_pointer_move(position, &mut tracer(&mut s.sink));
        })?;

        let s = Rc::clone(&shared);
        listeners.listen(&document, "mouseover", move |event: Event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let s = &mut *s.borrow_mut();
            hover_path(&target, &s.markers, &mut s.path);
            s.overlay.on_pointer_over(&s.path, &mut tracer(&mut s.sink));
        })?;

        // `mouseleave`/`mouseenter` do not bubble; they fire on the root
        // element when the pointer crosses the viewport edge.
        let s = Rc::clone(&shared);
        listeners.listen(&root, "mouseleave", move |_: Event| {
            let s = &mut *s.borrow_mut();
            s.overlay.on_pointer_leave_document(&mut tracer(&mut s.sink));
        })?;

        let s = Rc::clone(&shared);
        listeners.listen(&root, "mouseenter", move |_: Event| {
            let s = &mut *s.borrow_mut();
            s.overlay.on_pointer_enter_document(&mut tracer(&mut s.sink));
        })?;

        let s = Rc::clone(&shared);
        let raf = RafLoop::new(move |tick| {
            let s = &mut *s.borrow_mut();
            s.overlay.render(&tick, &mut s.presenter, &mut tracer(&mut s.sink));
        });

        {
            let s = &mut *shared.borrow_mut();
            s.overlay.mount(capability, &mut tracer(&mut s.sink));
        }
        raf.start();

        Ok(Some(Self {
            shared,
            listeners,
            raf,
        }))
    }

    /// Returns `true` while the layers are drawn.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shared.borrow().overlay.is_visible()
    }

    /// The variant currently applied to the layers.
    #[must_use]
    pub fn variant(&self) -> Variant {
        self.shared.borrow().overlay.variant()
    }

    /// Explicitly unmounts. Equivalent to dropping the handle.
    pub fn unmount(self) {}
}

impl Drop for CursorOverlay {
    fn drop(&mut self) {
        self.listeners.detach();
        self.raf.stop();
        let s = &mut *self.shared.borrow_mut();
        s.overlay.unmount(&mut tracer(&mut s.sink));
        s.presenter.remove();
    }
}
