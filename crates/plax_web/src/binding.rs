//! Window binding: listeners, frame delivery, and the public surface over
//! an owned controller

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, HtmlElement, Window};

use plax_core::{
    ElementConfig, ElementConfigUpdate, ElementId, ParallaxController, ParallaxElement,
};

use crate::element::DomElementView;
use crate::error::{DomError, Result};
use crate::scheduler::RafScheduler;

/// A parallax controller attached to the browser window.
///
/// Owns the scroll/resize listeners and the frame callback. Dropping the
/// binding detaches the listeners and cancels any pending frame;
/// [`destroy`](DomParallax::destroy) also clears every element's inline
/// transform first.
pub struct DomParallax {
    window: Window,
    controller: Rc<RefCell<ParallaxController>>,
    scheduler: RafScheduler,
    on_scroll: Closure<dyn FnMut()>,
    on_resize: Closure<dyn FnMut()>,
}

impl DomParallax {
    /// Attach to the current window.
    ///
    /// Reads the viewport height and scroll position, installs the frame
    /// callback, and registers a passive scroll listener plus a resize
    /// listener.
    pub fn attach() -> Result<Self> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;

        let viewport_height = window
            .inner_height()
            .map_err(DomError::from_js)?
            .as_f64()
            .unwrap_or(0.0);

        let scheduler = RafScheduler::new(window.clone());
        let controller = Rc::new(RefCell::new(ParallaxController::new(
            Box::new(scheduler.clone()),
            viewport_height,
        )));

        // The frame callback and the listeners hold weak handles; once the
        // binding is gone they fall through to no-ops.
        let frame_target = Rc::downgrade(&controller);
        scheduler.install(Closure::wrap(Box::new(move || {
            if let Some(controller) = frame_target.upgrade() {
                controller.borrow_mut().run_frame();
            }
        }) as Box<dyn FnMut()>));

        let scroll_target = Rc::downgrade(&controller);
        let scroll_window = window.clone();
        let on_scroll = Closure::wrap(Box::new(move || {
            if let Some(controller) = scroll_target.upgrade() {
                let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
                controller.borrow_mut().handle_scroll(scroll_y);
            }
        }) as Box<dyn FnMut()>);

        let resize_target = Rc::downgrade(&controller);
        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some(controller) = resize_target.upgrade() {
                let height = resize_window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .unwrap_or(0.0);
                controller.borrow_mut().handle_resize(height);
            }
        }) as Box<dyn FnMut()>);

        let scroll_options = AddEventListenerOptions::new();
        scroll_options.set_passive(true);
        window
            .add_event_listener_with_callback_and_add_event_listener_options(
                "scroll",
                on_scroll.as_ref().unchecked_ref(),
                &scroll_options,
            )
            .map_err(DomError::from_js)?;
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(DomError::from_js)?;

        // Pages restored mid-scroll paint correctly from the first frame.
        let initial_scroll = window.scroll_y().unwrap_or(0.0);
        controller.borrow_mut().handle_scroll(initial_scroll);
        debug!("parallax attached at scroll {initial_scroll}");

        Ok(Self {
            window,
            controller,
            scheduler,
            on_scroll,
            on_resize,
        })
    }

    /// Register an element. `outer` is measured; `inner` receives the
    /// transform.
    pub fn create_element(
        &self,
        config: ElementConfig,
        outer: HtmlElement,
        inner: HtmlElement,
    ) -> plax_core::Result<ElementId> {
        self.controller
            .borrow_mut()
            .create_element(config, Box::new(DomElementView::new(outer, inner)))
    }

    /// Remove an element, returning it. The inline transform is left in
    /// place.
    pub fn remove_element(&self, id: ElementId) -> Option<ParallaxElement> {
        self.controller.borrow_mut().remove_element(id)
    }

    /// Merge a partial config update into an element and repaint
    pub fn update_element(
        &self,
        id: ElementId,
        update: &ElementConfigUpdate,
    ) -> plax_core::Result<()> {
        self.controller.borrow_mut().update_element(id, update)
    }

    /// Forced full pass, for DOM mutations the listeners cannot see
    pub fn update(&self) {
        self.controller.borrow_mut().update();
    }

    /// Clear every element's inline transform
    pub fn reset(&self) {
        self.controller.borrow().reset();
    }

    /// Shared handle to the underlying controller
    pub fn controller(&self) -> Rc<RefCell<ParallaxController>> {
        Rc::clone(&self.controller)
    }

    /// Detach from the window and clear every element's inline transform
    pub fn destroy(self) {
        self.controller.borrow().reset();
        debug!("parallax destroyed");
    }

    fn detach(&self) {
        self.scheduler.cancel_pending();
        let _ = self.window.remove_event_listener_with_callback(
            "scroll",
            self.on_scroll.as_ref().unchecked_ref(),
        );
        let _ = self.window.remove_event_listener_with_callback(
            "resize",
            self.on_resize.as_ref().unchecked_ref(),
        );
    }
}

impl Drop for DomParallax {
    fn drop(&mut self) {
        self.detach();
        debug!("parallax listeners detached");
    }
}
