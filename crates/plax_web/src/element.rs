//! Element views over real DOM nodes

use plax_core::{Bounds, ElementView, Size, TransformStyle};
use web_sys::HtmlElement;

/// View over an outer/inner pair of DOM nodes.
///
/// The outer node is measured; its bounding rect and layout size are not
/// affected by the animated transform. The inner node receives the inline
/// style writes. Passing the same node for both feeds the transform back
/// into the measurements, so keep the pair distinct.
pub struct DomElementView {
    outer: HtmlElement,
    inner: HtmlElement,
}

impl DomElementView {
    pub fn new(outer: HtmlElement, inner: HtmlElement) -> Self {
        Self { outer, inner }
    }

    /// The measured node
    pub fn outer(&self) -> &HtmlElement {
        &self.outer
    }

    /// The transformed node
    pub fn inner(&self) -> &HtmlElement {
        &self.inner
    }
}

impl ElementView for DomElementView {
    fn outer_bounds(&self) -> Bounds {
        let rect = self.outer.get_bounding_client_rect();
        Bounds {
            top: rect.top(),
            bottom: rect.bottom(),
        }
    }

    fn outer_size(&self) -> Size {
        Size {
            width: self.outer.offset_width() as f64,
            height: self.outer.offset_height() as f64,
        }
    }

    fn apply_style(&self, style: &TransformStyle) {
        self.inner.style().set_css_text(&style.css_text());
    }
}
