// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Translation of DOM elements into classifier input.
//!
//! Live style computation is not usable for clickability: while the overlay
//! is mounted the injected stylesheet forces `cursor: none` on everything.
//! The pointer hint is therefore structural. An element hints clickability
//! if it carries the configured pointer utility class, an inline
//! `cursor: pointer`, or an `onclick` attribute.

use alloc::string::String;
use alloc::vec::Vec;

use comet_core::element::{ElementInfo, InputKind, Markers, Role, Tag};
use wasm_bindgen::JsCast as _;
use web_sys::{Element, HtmlElement};

/// Class names that page components use as structural markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerClasses {
    /// Marks a content card.
    pub card: String,
    /// Marks a social icon.
    pub social: String,
    /// Utility class declaring a clickable element.
    pub pointer: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            card: "project-card".into(),
            social: "social-icon".into(),
            pointer: "cursor-pointer".into(),
        }
    }
}

/// Maps a tag name (and, for inputs, the `type` attribute) to a [`Tag`].
///
/// Case-insensitive: HTML documents report upper-case tag names, XHTML and
/// SVG lower-case.
#[must_use]
pub(crate) fn tag_from_name(name: &str, input_type: Option<&str>) -> Tag {
    if name.eq_ignore_ascii_case("button") {
        Tag::Button
    } else if name.eq_ignore_ascii_case("a") {
        Tag::Anchor
    } else if name.eq_ignore_ascii_case("textarea") {
        Tag::TextArea
    } else if name.eq_ignore_ascii_case("input") {
        Tag::Input(input_kind(input_type))
    } else {
        Tag::Other
    }
}

/// Classifies an `<input>` by its `type` attribute.
///
/// A missing or unknown type falls back to `text`, as browsers do.
#[must_use]
pub(crate) fn input_kind(input_type: Option<&str>) -> InputKind {
    const NON_TEXT: [&str; 15] = [
        "button",
        "checkbox",
        "color",
        "date",
        "datetime-local",
        "file",
        "hidden",
        "image",
        "month",
        "radio",
        "range",
        "reset",
        "submit",
        "time",
        "week",
    ];
    match input_type.map(str::trim) {
        Some(ty) if NON_TEXT.iter().any(|t| ty.eq_ignore_ascii_case(t)) => InputKind::Other,
        _ => InputKind::Text,
    }
}

/// Maps a `role` attribute to a [`Role`].
#[must_use]
pub(crate) fn role_from_attr(role: Option<&str>) -> Role {
    match role.map(str::trim) {
        Some(r) if r.eq_ignore_ascii_case("button") => Role::Button,
        Some(r) if r.eq_ignore_ascii_case("link") => Role::Link,
        _ => Role::None,
    }
}

/// Extracts the classification facts for one element.
#[must_use]
pub fn element_info(el: &Element, markers: &MarkerClasses) -> ElementInfo {
    let input_type = el.get_attribute("type");
    let tag = tag_from_name(&el.tag_name(), input_type.as_deref());
    let role = role_from_attr(el.get_attribute("role").as_deref());

    let classes = el.class_list();
    let mut found = Markers::NONE;
    if classes.contains(&markers.card) {
        found = found.union(Markers::CARD);
    }
    if classes.contains(&markers.social) {
        found = found.union(Markers::SOCIAL);
    }

    let inline_pointer = el
        .dyn_ref::<HtmlElement>()
        .and_then(|h| h.style().get_property_value("cursor").ok())
        .is_some_and(|c| c.trim() == "pointer");
    let hint = classes.contains(&markers.pointer) || inline_pointer || el.has_attribute("onclick");

    ElementInfo::new(tag)
        .with_role(role)
        .with_markers(found)
        .with_pointer_hint(hint)
}

/// Fills `out` with the hovered path: `target` first, then each ancestor
/// element up to the document root.
pub fn hover_path(target: &Element, markers: &MarkerClasses, out: &mut Vec<ElementInfo>) {
    out.clear();
    let mut current = Some(target.clone());
    while let Some(el) = current {
        out.push(element_info(&el, markers));
        current = el.parent_element();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(tag_from_name("BUTTON", None), Tag::Button);
        assert_eq!(tag_from_name("a", None), Tag::Anchor);
        assert_eq!(tag_from_name("TEXTAREA", None), Tag::TextArea);
        assert_eq!(tag_from_name("DIV", None), Tag::Other);
        assert_eq!(tag_from_name("svg", None), Tag::Other);
    }

    #[test]
    fn input_types() {
        assert_eq!(input_kind(None), InputKind::Text);
        assert_eq!(input_kind(Some("email")), InputKind::Text);
        assert_eq!(input_kind(Some("PASSWORD")), InputKind::Text);
        assert_eq!(input_kind(Some("made-up")), InputKind::Text);
        assert_eq!(input_kind(Some("checkbox")), InputKind::Other);
        assert_eq!(input_kind(Some(" submit ")), InputKind::Other);
        assert_eq!(input_kind(Some("time")), InputKind::Other);
        assert_eq!(
            tag_from_name("INPUT", Some("range")),
            Tag::Input(InputKind::Other)
        );
    }

    #[test]
    fn roles() {
        assert_eq!(role_from_attr(Some("button")), Role::Button);
        assert_eq!(role_from_attr(Some("Link")), Role::Link);
        assert_eq!(role_from_attr(Some("tab")), Role::None);
        assert_eq!(role_from_attr(None), Role::None);
    }
}
