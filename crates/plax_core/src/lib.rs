//! Headless parallax scroll engine
//!
//! `plax_core` turns a scroll position into CSS `translate3d(..)` transforms
//! for a registry of elements, each configured with min/max offsets per
//! axis. Elements move faster than the scroll rate, or slower with
//! `slower_scroll_rate`, with per-frame updates debounced through a
//! two-state flag.
//!
//! The crate is host-agnostic. It never touches a DOM or a render loop;
//! instead the host provides:
//! - an [`ElementView`] per element - measurement of the outer node and
//!   style writes to the inner node
//! - a [`FrameScheduler`] - animation-frame callbacks
//! - scroll/resize events, fed to [`ParallaxController::handle_scroll`] and
//!   [`ParallaxController::handle_resize`]
//!
//! Browser bindings over real DOM nodes live in the `plax_web` crate.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use plax_core::{
//!     Bounds, ElementConfig, ElementView, FrameScheduler, Offset,
//!     ParallaxController, Size, TransformStyle,
//! };
//!
//! struct NoopScheduler;
//!
//! impl FrameScheduler for NoopScheduler {
//!     fn request_frame(&self) {}
//! }
//!
//! struct FixedView {
//!     styles: Rc<RefCell<Vec<String>>>,
//! }
//!
//! impl ElementView for FixedView {
//!     fn outer_bounds(&self) -> Bounds {
//!         Bounds { top: 120.0, bottom: 320.0 }
//!     }
//!
//!     fn outer_size(&self) -> Size {
//!         Size { width: 400.0, height: 200.0 }
//!     }
//!
//!     fn apply_style(&self, style: &TransformStyle) {
//!         self.styles.borrow_mut().push(style.css_text());
//!     }
//! }
//!
//! let styles = Rc::new(RefCell::new(Vec::new()));
//! let mut controller = ParallaxController::new(Box::new(NoopScheduler), 600.0);
//!
//! let config = ElementConfig::new()
//!     .offset_y(Offset::percent(-20.0), Offset::percent(20.0));
//! let id = controller
//!     .create_element(config, Box::new(FixedView { styles: Rc::clone(&styles) }))
//!     .unwrap();
//!
//! controller.handle_scroll(40.0);
//! controller.run_frame();
//!
//! assert!(styles.borrow().last().unwrap().starts_with("will-change:transform"));
//! assert!(controller.element(id).is_some());
//! ```

pub mod controller;
pub mod element;
pub mod error;
pub mod offset;
pub mod view;

pub use controller::{FrameState, ParallaxController, ScrollDirection};
pub use element::{
    ElementAttributes, ElementConfig, ElementConfigUpdate, ElementId, ParallaxElement,
    ResolvedOffsets,
};
pub use error::{ParallaxError, Result};
pub use offset::{Axis, Offset, OffsetUnit};
pub use view::{Bounds, ElementView, FrameScheduler, Size, TransformStyle};
