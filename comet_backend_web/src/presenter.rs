// Copyright 2026 the Comet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM layer management.
//!
//! [`DomPresenter`] owns the three fixed-position `<div>` layers and,
//! optionally, the stylesheet that hides the native pointer. It applies
//! [`FrameChanges`] by writing only the properties that changed: a
//! `translate3d()` transform per layer every visible frame, and the
//! variant-dependent size, fill, blend mode and corner radius only when the
//! variant changes.

use alloc::format;
use alloc::string::String;

use comet_core::backend::{FrameChanges, Presenter};
use comet_core::config::OverlayConfig;
use comet_core::smoothing::LayerKind;
use comet_core::variant::{Rgba, Shape, Variant, VariantStyle};
use kurbo::{Point, Size};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement};

/// Hides the host pointer while the overlay is mounted, keeping the text
/// caret over text fields.
const NATIVE_CURSOR_CSS: &str = "\
* { cursor: none !important; }
input[type=\"text\"], input[type=\"email\"], input[type=\"password\"], input[type=\"search\"], textarea { cursor: text !important; }
";

/// Ring stroke, independent of the variant.
const RING_BORDER: &str = "1px solid rgba(255, 255, 255, 0.2)";

// Sizes are never transitioned: the transform offset is computed from the
// new size, so an animated width would render off-center until it settles.
const TRANSITION_LEAD: &str = "background-color 0.2s ease, opacity 0.2s ease";
const TRANSITION_FADE: &str = "opacity 0.2s ease";

/// Stacking order: lead above trail above ring.
const Z_INDEX: [&str; 3] = ["9999", "9997", "9998"];

/// Draws the overlay layers as DOM elements.
pub struct DomPresenter {
    layers: [HtmlElement; 3],
    stylesheet: Option<HtmlElement>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("layers", &"[HtmlElement; 3]")
            .field("hides_native_cursor", &self.stylesheet.is_some())
            .finish()
    }
}

impl DomPresenter {
    /// Creates the layer elements (hidden) under `document.body`, and
    /// injects the native-pointer stylesheet if requested.
    pub fn new(
        document: &Document,
        config: &OverlayConfig,
        hide_native_cursor: bool,
    ) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let lead = create_layer(document, LayerKind::Lead)?;
        let ring = create_layer(document, LayerKind::Ring)?;
        let trail = create_layer(document, LayerKind::Trail)?;

        let s = ring.style();
        let _ = s.set_property("border", RING_BORDER);
        let _ = s.set_property("border-radius", "50%");

        let s = trail.style();
        let trail_style = &config.trail;
        set_size(&trail, trail_style.size());
        let _ = s.set_property("background-color", &rgba_css(trail_style.fill));
        let _ = s.set_property("border-radius", "50%");

        let mut presenter = Self {
            layers: [lead, ring, trail],
            stylesheet: None,
        };
        // Until the first visible frame, size the layers for the default
        // variant so they are never zero-sized.
        presenter.apply_style(config.styles.get(Variant::Default));

        for layer in &presenter.layers {
            body.append_child(layer)?;
        }

        if hide_native_cursor {
            presenter.stylesheet = Some(install_stylesheet(document)?);
        }
        Ok(presenter)
    }

    /// The element drawing one layer.
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> &HtmlElement {
        &self.layers[kind.index()]
    }

    /// Removes every element this presenter created. Idempotent.
    pub fn remove(&mut self) {
        for layer in &self.layers {
            layer.remove();
        }
        if let Some(sheet) = self.stylesheet.take() {
            sheet.remove();
        }
    }

    fn apply_style(&self, style: &VariantStyle) {
        let lead = self.layer(LayerKind::Lead);
        set_size(lead, style.lead_size);
        let s = lead.style();
        let _ = s.set_property("background-color", &rgba_css(style.fill));
        let _ = s.set_property("mix-blend-mode", style.blend.as_css());
        let _ = s.set_property("border-radius", &radius_css(style.lead_shape));

        set_size(self.layer(LayerKind::Ring), style.ring_size());
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, changes: &FrameChanges) {
        if let Some(shown) = changes.shown {
            for layer in &self.layers {
                let s = layer.style();
                if shown {
                    let _ = s.remove_property("display");
                } else {
                    let _ = s.set_property("display", "none");
                }
            }
        }

        if let Some(style) = &changes.style {
            self.apply_style(style);
        }

        if let Some(origins) = changes.origins {
            for (layer, origin) in self.layers.iter().zip(origins) {
                let _ = layer
                    .style()
                    .set_property("transform", &translate3d_css(origin));
            }
        }
    }
}

impl Drop for DomPresenter {
    fn drop(&mut self) {
        self.remove();
    }
}

fn create_layer(document: &Document, kind: LayerKind) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = document.create_element("div")?.unchecked_into();
    el.set_attribute("aria-hidden", "true")?;
    el.set_attribute("data-comet-layer", layer_name(kind))?;
    let s = el.style();
    let _ = s.set_property("position", "fixed");
    let _ = s.set_property("top", "0");
    let _ = s.set_property("left", "0");
    let _ = s.set_property("pointer-events", "none");
    let _ = s.set_property("will-change", "transform");
    let _ = s.set_property("display", "none");
    let _ = s.set_property("z-index", Z_INDEX[kind.index()]);
    let _ = s.set_property("transition", transition(kind));
    Ok(el)
}

const fn transition(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Lead => TRANSITION_LEAD,
        LayerKind::Ring | LayerKind::Trail => TRANSITION_FADE,
    }
}

fn install_stylesheet(document: &Document) -> Result<HtmlElement, JsValue> {
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?;
    let sheet: HtmlElement = document.create_element("style")?.unchecked_into();
    sheet.set_attribute("data-comet", "native-cursor")?;
    sheet.set_text_content(Some(NATIVE_CURSOR_CSS));
    head.append_child(&sheet)?;
    Ok(sheet)
}

fn set_size(el: &HtmlElement, size: Size) {
    let s = el.style();
    let _ = s.set_property("width", &px(size.width));
    let _ = s.set_property("height", &px(size.height));
}

const fn layer_name(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Lead => "lead",
        LayerKind::Ring => "ring",
        LayerKind::Trail => "trail",
    }
}

fn px(v: f64) -> String {
    format!("{v}px")
}

/// CSS transform placing a layer's top-left corner at `origin`.
pub(crate) fn translate3d_css(origin: Point) -> String {
    format!("translate3d({}px, {}px, 0)", origin.x, origin.y)
}

/// CSS `rgba()` color.
pub(crate) fn rgba_css(c: Rgba) -> String {
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, c.a)
}

/// CSS `border-radius` for a lead shape.
pub(crate) fn radius_css(shape: Shape) -> String {
    match shape {
        Shape::Circle => String::from("50%"),
        Shape::Rounded(r) => px(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_css() {
        assert_eq!(
            translate3d_css(Point::new(284.0, 184.5)),
            "translate3d(284px, 184.5px, 0)"
        );
        assert_eq!(
            translate3d_css(Point::new(-4.0, 0.0)),
            "translate3d(-4px, 0px, 0)"
        );
    }

    #[test]
    fn color_css() {
        assert_eq!(
            rgba_css(Rgba::new(139, 92, 246, 0.8)),
            "rgba(139, 92, 246, 0.8)"
        );
        assert_eq!(
            rgba_css(Rgba::new(255, 255, 255, 1.0)),
            "rgba(255, 255, 255, 1)"
        );
    }

    #[test]
    fn shape_css() {
        assert_eq!(radius_css(Shape::Circle), "50%");
        assert_eq!(radius_css(Shape::Rounded(2.0)), "2px");
    }

    #[test]
    fn layer_sizes_change_instantly() {
        for kind in LayerKind::ALL {
            let t = transition(kind);
            assert!(!t.contains("width"), "{kind:?}: {t}");
            assert!(!t.contains("height"), "{kind:?}: {t}");
            assert!(!t.contains("transform"), "{kind:?}: {t}");
        }
    }

    #[test]
    fn stylesheet_restores_text_caret() {
        assert!(NATIVE_CURSOR_CSS.contains("cursor: none !important"));
        assert!(NATIVE_CURSOR_CSS.contains("textarea { cursor: text !important; }"));
    }
}
