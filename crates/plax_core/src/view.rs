//! Ports through which the controller touches its host environment
//!
//! The controller never reads the DOM or schedules frames itself. Hosts
//! supply an [`ElementView`] per registered element (measurement and style
//! writes) and one [`FrameScheduler`] (frame callbacks). Browser
//! implementations live in the `plax_web` crate; tests drive the controller
//! with recording stubs.

use std::fmt;

use crate::offset::Offset;

// ============================================================================
// Geometry
// ============================================================================

/// Viewport-relative edges of an element's outer node, as a bounding-rect
/// read reports them
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub bottom: f64,
}

/// Layout size of an element's outer node, unaffected by transforms
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

// ============================================================================
// Inline styles
// ============================================================================

/// Inline style payload written to an element's inner node
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformStyle {
    /// Animated parallax transform with a `will-change` hint
    Translate { x: Offset, y: Offset },
    /// Cleared state written by reset
    Reset,
}

impl TransformStyle {
    /// The exact inline CSS text for this style.
    ///
    /// Every host writes this string verbatim, so painted output is
    /// identical across adapters.
    pub fn css_text(&self) -> String {
        match self {
            TransformStyle::Translate { x, y } => {
                format!("will-change:transform;transform:translate3d({x}, {y}, 0)")
            }
            TransformStyle::Reset => {
                "will-change:none;transform:translate3d(0, 0, 0)".to_string()
            }
        }
    }
}

impl fmt::Display for TransformStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}

// ============================================================================
// Ports
// ============================================================================

/// Handle pair for one parallax element.
///
/// Measurement goes through the outer node, whose box no transform touches;
/// style writes go to the inner node. Implementations are single-threaded
/// by design, since DOM handles are not `Send`.
pub trait ElementView {
    /// Viewport-relative bounding box of the outer node
    fn outer_bounds(&self) -> Bounds;

    /// Layout size of the outer node
    fn outer_size(&self) -> Size;

    /// Write the inline style to the inner node
    fn apply_style(&self, style: &TransformStyle);
}

/// Frame-callback port.
///
/// `request_frame` asks the host to invoke
/// [`ParallaxController::run_frame`](crate::ParallaxController::run_frame)
/// once, on its next rendering frame. The controller coalesces scroll
/// events itself and never issues overlapping requests.
pub trait FrameScheduler {
    fn request_frame(&self);
}
