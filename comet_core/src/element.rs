// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed description of hovered elements.
//!
//! The classifier never inspects live host objects. Backends translate each
//! element on the hovered path into an [`ElementInfo`] carrying only the
//! facts classification depends on: the element's tag, its semantic role,
//! the structural [`Markers`] exposed by page components, and whether the
//! host hints that the element is clickable.
//!
//! A hovered path is a slice ordered target-first, then each ancestor up to
//! the document root.

use core::fmt;

/// The element kinds the classifier distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    /// A `<button>` element.
    Button,
    /// A hyperlink (`<a>`).
    Anchor,
    /// An `<input>` element.
    Input(InputKind),
    /// A multi-line text field (`<textarea>`).
    TextArea,
    /// Anything else.
    #[default]
    Other,
}

/// Sub-kind of an `<input>` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Single-line text entry (`text`, `email`, `password`, `search`, ...).
    Text,
    /// Non-text inputs (`checkbox`, `range`, `submit`, ...).
    Other,
}

/// Explicit semantic role, independent of the tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// No role, or one the classifier does not care about.
    #[default]
    None,
    /// `role="button"`.
    Button,
    /// `role="link"`.
    Link,
}

/// Structural markers exposed by page components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Markers(u8);

impl Markers {
    /// No markers.
    pub const NONE: Self = Self(0);
    /// The element is a content card.
    pub const CARD: Self = Self(1 << 0);
    /// The element is a social icon.
    pub const SOCIAL: Self = Self(1 << 1);

    /// Returns `true` if every marker in `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of both marker sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns `true` if no marker is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for Markers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        if self.contains(Self::CARD) {
            set.entry(&"CARD");
        }
        if self.contains(Self::SOCIAL) {
            set.entry(&"SOCIAL");
        }
        set.finish()
    }
}

/// Classification-relevant facts about one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ElementInfo {
    /// The element kind.
    pub tag: Tag,
    /// Its explicit role, if any.
    pub role: Role,
    /// Structural markers it carries.
    pub markers: Markers,
    /// The host indicates the element is clickable (e.g. a pointer-style
    /// utility class or a click handler attribute).
    pub pointer_hint: bool,
}

impl ElementInfo {
    /// A plain element with no role, markers or hint.
    pub const PLAIN: Self = Self::new(Tag::Other);

    /// Creates an element of the given kind with nothing else set.
    #[inline]
    #[must_use]
    pub const fn new(tag: Tag) -> Self {
        Self {
            tag,
            role: Role::None,
            markers: Markers::NONE,
            pointer_hint: false,
        }
    }

    /// Returns a copy with the given role.
    #[inline]
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Returns a copy with `markers` added.
    #[inline]
    #[must_use]
    pub const fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = self.markers.union(markers);
        self
    }

    /// Returns a copy with the clickability hint set.
    #[inline]
    #[must_use]
    pub const fn with_pointer_hint(mut self, hint: bool) -> Self {
        self.pointer_hint = hint;
        self
    }

    /// A `<button>` or an element with `role="button"`.
    #[inline]
    #[must_use]
    pub const fn is_button_control(&self) -> bool {
        matches!(self.tag, Tag::Button) || matches!(self.role, Role::Button)
    }

    /// An `<a>` or an element with `role="link"`.
    #[inline]
    #[must_use]
    pub const fn is_hyperlink(&self) -> bool {
        matches!(self.tag, Tag::Anchor) || matches!(self.role, Role::Link)
    }

    /// Carries the content-card marker.
    #[inline]
    #[must_use]
    pub const fn is_card(&self) -> bool {
        self.markers.contains(Markers::CARD)
    }

    /// A single-line or multi-line text field.
    #[inline]
    #[must_use]
    pub const fn is_text_entry(&self) -> bool {
        matches!(self.tag, Tag::Input(InputKind::Text) | Tag::TextArea)
    }

    /// Carries the social-icon marker.
    #[inline]
    #[must_use]
    pub const fn is_social(&self) -> bool {
        self.markers.contains(Markers::SOCIAL)
    }
}
