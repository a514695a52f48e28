//! requestAnimationFrame scheduling

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use plax_core::FrameScheduler;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// One-shot `requestAnimationFrame` port.
///
/// The frame closure is installed by the window binding after the
/// controller exists, since the closure needs a handle back to it. Requests
/// arriving before that are dropped with a warning.
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
    frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            frame: Rc::new(RefCell::new(None)),
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Install the closure run on each granted frame
    pub(crate) fn install(&self, closure: Closure<dyn FnMut()>) {
        *self.frame.borrow_mut() = Some(closure);
    }

    /// Cancel whatever frame is still pending. Stale handles are fine;
    /// cancelling an already-fired frame does nothing.
    pub(crate) fn cancel_pending(&self) {
        if let Some(handle) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self) {
        let frame = self.frame.borrow();
        let Some(closure) = frame.as_ref() else {
            warn!("frame requested before the frame closure was installed");
            return;
        };
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => self.pending.set(Some(handle)),
            Err(err) => warn!("requestAnimationFrame failed: {err:?}"),
        }
    }
}
