// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover classification.
//!
//! [`classify`] maps a hovered path to a [`Variant`] with a fixed priority,
//! first match wins:
//!
//! 1. a button control anywhere on the path → [`Variant::Control`]
//! 2. a hyperlink anywhere on the path → [`Variant::Link`]
//! 3. a content card anywhere on the path → [`Variant::Card`]
//! 4. a text-entry field anywhere on the path → [`Variant::Input`]
//! 5. a social icon anywhere on the path → [`Variant::Social`]
//! 6. any element on the path hints clickability → [`Variant::Control`]
//! 7. otherwise → [`Variant::Default`]
//!
//! Role checks outrank generic clickability, so a link inside a card is a
//! link and a card that is itself a link is also a link.
//!
//! The clickability hint is inherited: a pointer cursor or click handler on
//! an ancestor applies to everything inside it.

use crate::element::ElementInfo;
use crate::variant::Variant;

/// Classifies a hovered path, ordered target-first then ancestors.
///
/// An empty path classifies as [`Variant::Default`].
#[must_use]
pub fn classify(path: &[ElementInfo]) -> Variant {
    let mut control = false;
    let mut link = false;
    let mut card = false;
    let mut input = false;
    let mut social = false;
    let mut hint = false;
    for el in path {
        control |= el.is_button_control();
        link |= el.is_hyperlink();
        card |= el.is_card();
        input |= el.is_text_entry();
        social |= el.is_social();
        hint |= el.pointer_hint;
    }

    if control {
        Variant::Control
    } else if link {
        Variant::Link
    } else if card {
        Variant::Card
    } else if input {
        Variant::Input
    } else if social {
        Variant::Social
    } else if hint {
        Variant::Control
    } else {
        Variant::Default
    }
}
