// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover variants and their visual parameters.
//!
//! [`Variant`] is the closed set of looks the lead and ring layers can take.
//! Each variant maps to one [`VariantStyle`] through a [`StyleTable`], which
//! is fixed for the lifetime of an overlay.

use kurbo::Size;

/// The named visual style applied to the lead and ring layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Nothing interesting under the pointer.
    #[default]
    Default,
    /// A button or other clickable control.
    Control,
    /// A hyperlink.
    Link,
    /// A content card.
    Card,
    /// A text-entry field.
    Input,
    /// A social icon.
    Social,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::Control,
        Self::Link,
        Self::Card,
        Self::Input,
        Self::Social,
    ];

    /// Short lowercase name, for diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Control => "control",
            Self::Link => "link",
            Self::Card => "card",
            Self::Input => "input",
            Self::Social => "social",
        }
    }
}

/// An sRGB color with 8-bit channels and a float alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    /// Creates a color from channels and alpha.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// How a layer composites with the content beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Plain source-over.
    Normal,
    /// Per-channel absolute difference; keeps the layer legible on both
    /// light and dark content.
    #[default]
    Difference,
}

impl BlendMode {
    /// The CSS `mix-blend-mode` keyword.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Difference => "difference",
        }
    }
}

/// Outline of the lead layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// A circle (or ellipse, for non-square sizes).
    Circle,
    /// A rectangle with the given corner radius in pixels.
    Rounded(f64),
}

/// Visual parameters for one variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariantStyle {
    /// Lead layer size. Usually square; the input caret is a tall bar.
    pub lead_size: Size,
    /// Lead layer outline.
    pub lead_shape: Shape,
    /// Ring layer diameter.
    pub ring_diameter: f64,
    /// Lead layer fill.
    pub fill: Rgba,
    /// Lead layer blend mode.
    pub blend: BlendMode,
}

impl VariantStyle {
    const fn disc(diameter: f64, ring_diameter: f64, fill: Rgba) -> Self {
        Self {
            lead_size: Size::new(diameter, diameter),
            lead_shape: Shape::Circle,
            ring_diameter,
            fill,
            blend: BlendMode::Difference,
        }
    }

    /// Ring layer size (always square).
    #[inline]
    #[must_use]
    pub const fn ring_size(&self) -> Size {
        Size::new(self.ring_diameter, self.ring_diameter)
    }
}

/// Immutable variant → style lookup table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleTable {
    /// Style for [`Variant::Default`].
    pub default: VariantStyle,
    /// Style for [`Variant::Control`].
    pub control: VariantStyle,
    /// Style for [`Variant::Link`].
    pub link: VariantStyle,
    /// Style for [`Variant::Card`].
    pub card: VariantStyle,
    /// Style for [`Variant::Input`].
    pub input: VariantStyle,
    /// Style for [`Variant::Social`].
    pub social: VariantStyle,
}

impl StyleTable {
    /// The stock palette.
    pub const STANDARD: Self = Self {
        default: VariantStyle::disc(32.0, 48.0, Rgba::new(139, 92, 246, 0.8)),
        control: VariantStyle::disc(48.0, 72.0, Rgba::new(59, 130, 246, 0.8)),
        link: VariantStyle::disc(40.0, 48.0, Rgba::new(16, 185, 129, 0.8)),
        card: VariantStyle::disc(64.0, 96.0, Rgba::new(245, 158, 11, 0.6)),
        input: VariantStyle {
            lead_size: Size::new(4.0, 24.0),
            lead_shape: Shape::Rounded(2.0),
            ring_diameter: 48.0,
            fill: Rgba::new(139, 92, 246, 1.0),
            blend: BlendMode::Normal,
        },
        social: VariantStyle::disc(56.0, 48.0, Rgba::new(236, 72, 153, 0.8)),
    };

    /// Returns the style for `variant`.
    #[must_use]
    pub const fn get(&self, variant: Variant) -> &VariantStyle {
        match variant {
            Variant::Default => &self.default,
            Variant::Control => &self.control,
            Variant::Link => &self.link,
            Variant::Card => &self.card,
            Variant::Input => &self.input,
            Variant::Social => &self.social,
        }
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Fixed look of the trail layer, which ignores the variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailStyle {
    /// Trail dot diameter.
    pub diameter: f64,
    /// Trail dot fill.
    pub fill: Rgba,
}

impl TrailStyle {
    /// The stock trail dot.
    pub const STANDARD: Self = Self {
        diameter: 8.0,
        fill: Rgba::new(255, 255, 255, 0.4),
    };

    /// Trail layer size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.diameter, self.diameter)
    }
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self::STANDARD
    }
}
