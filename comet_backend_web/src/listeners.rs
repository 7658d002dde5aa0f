// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document event subscriptions.
//!
//! [`Listeners`] owns every JS closure it registers, so detaching is one
//! call that removes them all. All handlers are registered as passive;
//! the overlay never cancels pointer events.

use alloc::boxed::Box;
use alloc::vec::Vec;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{AddEventListenerOptions, Event, EventTarget};

type EventClosure = Closure<dyn FnMut(Event)>;

struct Registration {
    target: EventTarget,
    kind: &'static str,
    closure: EventClosure,
}

/// A set of event listeners that are removed together.
#[derive(Default)]
pub struct Listeners {
    registered: Vec<Registration>,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let kinds: Vec<_> = self.registered.iter().map(|r| r.kind).collect();
        f.debug_struct("Listeners").field("kinds", &kinds).finish()
    }
}

impl Listeners {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a passive `kind` listener on `target`.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure: EventClosure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        self.registered.push(Registration {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    /// Number of live registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registered.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Removes every registration and drops its closure.
    pub fn detach(&mut self) {
        for reg in self.registered.drain(..) {
            let _ = reg.target.remove_event_listener_with_callback(
                reg.kind,
                reg.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach();
    }
}
