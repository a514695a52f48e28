//! The parallax controller
//!
//! Owns the ordered element registry and turns host scroll/resize events
//! into transform writes. Position passes run on animation frames: scroll
//! input schedules at most one frame through the injected
//! [`FrameScheduler`], and the host calls [`ParallaxController::run_frame`]
//! when that frame fires. Structural changes and resizes repaint
//! immediately instead of waiting for a frame.

use tracing::{debug, trace};

use crate::element::{ElementConfig, ElementConfigUpdate, ElementId, ParallaxElement};
use crate::error::{ParallaxError, Result};
use crate::view::{ElementView, FrameScheduler, TransformStyle};

// ============================================================================
// Scheduling state
// ============================================================================

/// Frame-debounce state. At most one frame request is outstanding at a
/// time; scroll events arriving while `Scheduled` only update tracked
/// state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameState {
    #[default]
    Idle,
    Scheduled,
}

/// Direction of the most recent scroll delta
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

// ============================================================================
// ParallaxController
// ============================================================================

/// Registry of parallax elements plus the scroll state driving them.
///
/// Hosts feed events in through [`handle_scroll`](Self::handle_scroll) and
/// [`handle_resize`](Self::handle_resize) and deliver granted frames to
/// [`run_frame`](Self::run_frame). Everything else is registry maintenance.
pub struct ParallaxController {
    elements: Vec<ParallaxElement>,
    scheduler: Box<dyn FrameScheduler>,
    scroll_y: f64,
    scroll_direction: Option<ScrollDirection>,
    viewport_height: f64,
    frame_state: FrameState,
    next_id: u64,
}

impl ParallaxController {
    /// Controller with no elements, scrolled to the top
    pub fn new(scheduler: Box<dyn FrameScheduler>, viewport_height: f64) -> Self {
        Self {
            elements: Vec::new(),
            scheduler,
            scroll_y: 0.0,
            scroll_direction: None,
            viewport_height,
            frame_state: FrameState::Idle,
            next_id: 0,
        }
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    /// Register an element and paint it if visible.
    ///
    /// Fails when the config mixes units on one axis; nothing is registered
    /// in that case. Ids are assigned monotonically and never reused.
    pub fn create_element(
        &mut self,
        config: ElementConfig,
        view: Box<dyn ElementView>,
    ) -> Result<ElementId> {
        let id = ElementId(self.next_id + 1);
        let element =
            ParallaxElement::new(id, config, view, self.scroll_y, self.viewport_height)?;
        self.next_id += 1;
        self.elements.push(element);
        debug!(
            "parallax element {} created ({} registered)",
            id,
            self.elements.len()
        );
        self.update();
        Ok(id)
    }

    /// Remove an element, returning it. `None` when the id is not
    /// registered. The element's current transform is left in place.
    pub fn remove_element(&mut self, id: ElementId) -> Option<ParallaxElement> {
        let index = self.elements.iter().position(|element| element.id() == id)?;
        let element = self.elements.remove(index);
        debug!(
            "parallax element {} removed ({} registered)",
            id,
            self.elements.len()
        );
        Some(element)
    }

    /// Merge a partial config update into an element and repaint.
    ///
    /// Unknown ids and unit mismatches are errors; on error the registry is
    /// left untouched.
    pub fn update_element(&mut self, id: ElementId, update: &ElementConfigUpdate) -> Result<()> {
        let element = self
            .elements
            .iter_mut()
            .find(|element| element.id() == id)
            .ok_or(ParallaxError::UnknownElement(id))?;
        let merged = element.config().merged(update);
        element.reconfigure(merged)?;
        debug!("parallax element {} reconfigured", id);
        self.update();
        Ok(())
    }

    /// Element by id
    pub fn element(&self, id: ElementId) -> Option<&ParallaxElement> {
        self.elements.iter().find(|element| element.id() == id)
    }

    /// Registered elements in insertion order
    pub fn elements(&self) -> &[ParallaxElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // ------------------------------------------------------------------
    // Host events
    // ------------------------------------------------------------------

    /// Scroll input. Always updates the tracked position and direction;
    /// schedules a position pass only when elements are registered and none
    /// is already pending.
    pub fn handle_scroll(&mut self, scroll_y: f64) {
        if scroll_y > self.scroll_y {
            self.scroll_direction = Some(ScrollDirection::Down);
        } else if scroll_y < self.scroll_y {
            self.scroll_direction = Some(ScrollDirection::Up);
        }
        self.scroll_y = scroll_y;

        if self.elements.is_empty() {
            return;
        }
        match self.frame_state {
            FrameState::Idle => {
                self.frame_state = FrameState::Scheduled;
                self.scheduler.request_frame();
            }
            FrameState::Scheduled => {
                trace!("scroll to {} coalesced into pending frame", scroll_y);
            }
        }
    }

    /// Resize input. Stores the new viewport height and refreshes
    /// everything immediately, bypassing the frame debounce.
    pub fn handle_resize(&mut self, viewport_height: f64) {
        debug!("viewport resized to {}", viewport_height);
        self.viewport_height = viewport_height;
        self.update();
    }

    /// Frame callback. Hosts invoke this once per
    /// [`FrameScheduler::request_frame`].
    ///
    /// The pending flag is cleared before iteration, so scroll input
    /// arriving mid-pass schedules a fresh frame.
    pub fn run_frame(&mut self) {
        self.frame_state = FrameState::Idle;
        trace!("position pass at scroll {}", self.scroll_y);
        self.update_positions();
    }

    // ------------------------------------------------------------------
    // Passes
    // ------------------------------------------------------------------

    /// Forced full pass: re-measure every element, then repaint the visible
    /// enabled ones. Used after structural changes and on resize; does not
    /// touch the frame debounce.
    pub fn update(&mut self) {
        let scroll_y = self.scroll_y;
        let viewport_height = self.viewport_height;
        for element in &mut self.elements {
            element.refresh(scroll_y, viewport_height);
        }
        self.update_positions();
    }

    /// Write the cleared style through every element's view, disabled ones
    /// included. Registry and scheduling state stay as they are.
    pub fn reset(&self) {
        debug!("resetting {} parallax element styles", self.elements.len());
        for element in &self.elements {
            element.apply_style(&TransformStyle::Reset);
        }
    }

    fn update_positions(&self) {
        for element in &self.elements {
            if element.config().disabled || !element.is_in_view(self.scroll_y) {
                continue;
            }
            let style = element.compute_style(self.scroll_y);
            element.apply_style(&style);
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn frame_state(&self) -> FrameState {
        self.frame_state
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}
