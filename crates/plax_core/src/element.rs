//! Per-element configuration, derived offsets, and cached geometry
//!
//! A registered element carries three layers of state:
//! - `ElementConfig` - what the caller asked for (offsets, flags)
//! - `ResolvedOffsets` - offsets validated per axis at create/update time
//! - `ElementAttributes` - measured geometry, refreshed on create, update,
//!   and resize, and deliberately stale in between
//!
//! The position math lives here too: visibility against the viewport and
//! the scroll-position-to-transform mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ParallaxError, Result};
use crate::offset::{Axis, Offset, OffsetUnit};
use crate::view::{ElementView, TransformStyle};

// ============================================================================
// Identity
// ============================================================================

/// Identifier of a registered element, unique and monotonically assigned
/// for the lifetime of its controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub(crate) u64);

impl ElementId {
    /// Raw numeric id
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Per-element parallax configuration.
///
/// Offsets default to `0%`. Min and max on one axis must share a unit,
/// which is validated when the element is created or updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementConfig {
    /// Skip this element in position passes
    pub disabled: bool,
    /// Move slower than the scroll rate instead of faster
    pub slower_scroll_rate: bool,
    pub offset_x_min: Offset,
    pub offset_x_max: Offset,
    pub offset_y_min: Offset,
    pub offset_y_max: Offset,
}

impl ElementConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn slower_scroll_rate(mut self, slower: bool) -> Self {
        self.slower_scroll_rate = slower;
        self
    }

    /// Min/max offsets for the x axis
    pub fn offset_x(mut self, min: Offset, max: Offset) -> Self {
        self.offset_x_min = min;
        self.offset_x_max = max;
        self
    }

    /// Min/max offsets for the y axis
    pub fn offset_y(mut self, min: Offset, max: Offset) -> Self {
        self.offset_y_min = min;
        self.offset_y_max = max;
        self
    }

    /// This config with a partial update applied, set fields winning
    pub fn merged(&self, update: &ElementConfigUpdate) -> Self {
        Self {
            disabled: update.disabled.unwrap_or(self.disabled),
            slower_scroll_rate: update.slower_scroll_rate.unwrap_or(self.slower_scroll_rate),
            offset_x_min: update.offset_x_min.unwrap_or(self.offset_x_min),
            offset_x_max: update.offset_x_max.unwrap_or(self.offset_x_max),
            offset_y_min: update.offset_y_min.unwrap_or(self.offset_y_min),
            offset_y_max: update.offset_y_max.unwrap_or(self.offset_y_max),
        }
    }
}

/// Partial configuration update; unset fields keep their current values
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementConfigUpdate {
    pub disabled: Option<bool>,
    pub slower_scroll_rate: Option<bool>,
    pub offset_x_min: Option<Offset>,
    pub offset_x_max: Option<Offset>,
    pub offset_y_min: Option<Offset>,
    pub offset_y_max: Option<Offset>,
}

impl ElementConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    pub fn slower_scroll_rate(mut self, slower: bool) -> Self {
        self.slower_scroll_rate = Some(slower);
        self
    }

    pub fn offset_x(mut self, min: Offset, max: Offset) -> Self {
        self.offset_x_min = Some(min);
        self.offset_x_max = Some(max);
        self
    }

    pub fn offset_y(mut self, min: Offset, max: Offset) -> Self {
        self.offset_y_min = Some(min);
        self.offset_y_max = Some(max);
        self
    }
}

// ============================================================================
// Derived offsets
// ============================================================================

/// Offsets validated per axis, with the unit each axis resolved to
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedOffsets {
    pub x_min: Offset,
    pub x_max: Offset,
    pub y_min: Offset,
    pub y_max: Offset,
    pub x_unit: OffsetUnit,
    pub y_unit: OffsetUnit,
}

impl ResolvedOffsets {
    /// Validate a config's offsets. Min and max must share a unit per axis;
    /// a mismatch is the one fatal setup error.
    pub fn resolve(config: &ElementConfig) -> Result<Self> {
        let x_unit = axis_unit(Axis::X, config.offset_x_min, config.offset_x_max)?;
        let y_unit = axis_unit(Axis::Y, config.offset_y_min, config.offset_y_max)?;
        Ok(Self {
            x_min: config.offset_x_min,
            x_max: config.offset_x_max,
            y_min: config.offset_y_min,
            y_max: config.offset_y_max,
            x_unit,
            y_unit,
        })
    }
}

fn axis_unit(axis: Axis, min: Offset, max: Offset) -> Result<OffsetUnit> {
    if min.unit == max.unit {
        Ok(min.unit)
    } else {
        Err(ParallaxError::UnitMismatch {
            axis,
            min: min.unit,
            max: max.unit,
        })
    }
}

// ============================================================================
// Cached geometry
// ============================================================================

/// Geometry cached by the measurement pass.
///
/// `top` and `bottom` are document-relative and already widened by the
/// pixel extremes of the transform, so visibility checks keep the element
/// in the update set wherever it can be painted.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementAttributes {
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
    pub width: f64,
    pub x_min_px: f64,
    pub x_max_px: f64,
    pub y_min_px: f64,
    pub y_max_px: f64,
    pub total_dist: f64,
    pub window_height: f64,
}

// ============================================================================
// ParallaxElement
// ============================================================================

/// One registered element: configuration, derived offsets, cached geometry,
/// and the view handle styles are written through
pub struct ParallaxElement {
    id: ElementId,
    config: ElementConfig,
    offsets: ResolvedOffsets,
    attributes: ElementAttributes,
    view: Box<dyn ElementView>,
}

impl ParallaxElement {
    pub(crate) fn new(
        id: ElementId,
        config: ElementConfig,
        view: Box<dyn ElementView>,
        scroll_y: f64,
        viewport_height: f64,
    ) -> Result<Self> {
        let offsets = ResolvedOffsets::resolve(&config)?;
        let mut element = Self {
            id,
            config,
            offsets,
            attributes: ElementAttributes::default(),
            view,
        };
        element.refresh(scroll_y, viewport_height);
        Ok(element)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn config(&self) -> &ElementConfig {
        &self.config
    }

    pub fn offsets(&self) -> &ResolvedOffsets {
        &self.offsets
    }

    pub fn attributes(&self) -> &ElementAttributes {
        &self.attributes
    }

    /// Swap in a new config, re-deriving offsets. Leaves the element
    /// untouched when validation fails.
    pub(crate) fn reconfigure(&mut self, config: ElementConfig) -> Result<()> {
        let offsets = ResolvedOffsets::resolve(&config)?;
        self.config = config;
        self.offsets = offsets;
        Ok(())
    }

    /// Measure the outer node and rebuild the cached geometry.
    ///
    /// One bounding-rect read and one size read per call. Percent offsets
    /// resolve against the element's own size on their axis. The cached
    /// document-relative edges are shifted by the pixel extremes; which
    /// extreme lands on which edge follows the scroll-rate mode.
    pub(crate) fn refresh(&mut self, scroll_y: f64, viewport_height: f64) {
        let bounds = self.view.outer_bounds();
        let size = self.view.outer_size();

        let x_min_px = self.offsets.x_min.resolve(size.width);
        let x_max_px = self.offsets.x_max.resolve(size.width);
        let y_min_px = self.offsets.y_min.resolve(size.height);
        let y_max_px = self.offsets.y_max.resolve(size.height);

        let mut top = bounds.top + scroll_y;
        let mut bottom = bounds.bottom + scroll_y;
        if self.config.slower_scroll_rate {
            top += y_min_px;
            bottom += y_max_px;
        } else {
            top -= y_max_px;
            bottom -= y_min_px;
        }

        self.attributes = ElementAttributes {
            top,
            bottom,
            height: size.height,
            width: size.width,
            x_min_px,
            x_max_px,
            y_min_px,
            y_max_px,
            total_dist: viewport_height + size.height + y_min_px.abs() + y_max_px,
            window_height: viewport_height,
        };
    }

    /// Whether any part of the element can be inside the viewport at the
    /// given scroll position
    pub fn is_in_view(&self, scroll_y: f64) -> bool {
        let window_height = self.attributes.window_height;
        let top = self.attributes.top - scroll_y;
        let bottom = self.attributes.bottom - scroll_y;

        let top_visible = top >= 0.0 && top <= window_height;
        let bottom_visible = bottom >= 0.0 && bottom <= window_height;
        let spanning = top <= 0.0 && bottom >= window_height;
        top_visible || bottom_visible || spanning
    }

    /// How far the element has travelled through its scroll window, as a
    /// percentage. 0 when the cached top edge meets the viewport bottom,
    /// 100 after `total_dist` of travel. Linear in the scroll position and
    /// not clamped.
    pub fn percent_moved(&self, scroll_y: f64) -> f64 {
        let attrs = &self.attributes;
        if attrs.total_dist <= 0.0 {
            return 0.0;
        }
        let top = attrs.top - scroll_y;
        (-top + attrs.window_height) / attrs.total_dist * 100.0
    }

    /// Transform for the given scroll position.
    ///
    /// The travel percentage is rescaled per axis into the configured
    /// offset range, in that axis's own unit space. The scale runs max to
    /// min at the normal rate and min to max when the element scrolls
    /// slower.
    pub fn compute_style(&self, scroll_y: f64) -> TransformStyle {
        let percent = self.percent_moved(scroll_y);
        let offsets = &self.offsets;

        let (x, y) = if self.config.slower_scroll_rate {
            (
                scale_between(percent, offsets.x_min.value, offsets.x_max.value),
                scale_between(percent, offsets.y_min.value, offsets.y_max.value),
            )
        } else {
            (
                scale_between(percent, offsets.x_max.value, offsets.x_min.value),
                scale_between(percent, offsets.y_max.value, offsets.y_min.value),
            )
        };

        TransformStyle::Translate {
            x: Offset {
                value: x,
                unit: offsets.x_unit,
            },
            y: Offset {
                value: y,
                unit: offsets.y_unit,
            },
        }
    }

    pub(crate) fn apply_style(&self, style: &TransformStyle) {
        self.view.apply_style(style);
    }
}

impl fmt::Debug for ParallaxElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallaxElement")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("offsets", &self.offsets)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

/// Linear rescale of a 0..100 travel percentage into `new_min..new_max`
fn scale_between(percent: f64, new_min: f64, new_max: f64) -> f64 {
    (new_max - new_min) * percent / 100.0 + new_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{Bounds, Size};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct StubState {
        bounds: Cell<Bounds>,
        size: Cell<Size>,
        styles: RefCell<Vec<String>>,
    }

    struct StubView(Rc<StubState>);

    impl ElementView for StubView {
        fn outer_bounds(&self) -> Bounds {
            self.0.bounds.get()
        }

        fn outer_size(&self) -> Size {
            self.0.size.get()
        }

        fn apply_style(&self, style: &TransformStyle) {
            self.0.styles.borrow_mut().push(style.css_text());
        }
    }

    fn element(
        config: ElementConfig,
        bounds: Bounds,
        size: Size,
        scroll_y: f64,
        viewport_height: f64,
    ) -> (ParallaxElement, Rc<StubState>) {
        let state = Rc::new(StubState::default());
        state.bounds.set(bounds);
        state.size.set(size);
        let view = StubView(Rc::clone(&state));
        let element = ParallaxElement::new(
            ElementId(1),
            config,
            Box::new(view),
            scroll_y,
            viewport_height,
        )
        .unwrap();
        (element, state)
    }

    fn banner_config() -> ElementConfig {
        ElementConfig::new().offset_y(Offset::percent(-20.0), Offset::percent(20.0))
    }

    #[test]
    fn test_unit_mismatch_is_fatal() {
        let config =
            ElementConfig::new().offset_y(Offset::percent(-20.0), Offset::pixels(20.0));
        let err = ResolvedOffsets::resolve(&config).unwrap_err();
        assert_eq!(
            err,
            ParallaxError::UnitMismatch {
                axis: Axis::Y,
                min: OffsetUnit::Percent,
                max: OffsetUnit::Pixels,
            }
        );

        let config =
            ElementConfig::new().offset_x(Offset::pixels(-5.0), Offset::percent(5.0));
        let err = ResolvedOffsets::resolve(&config).unwrap_err();
        assert!(matches!(err, ParallaxError::UnitMismatch { axis: Axis::X, .. }));
    }

    #[test]
    fn test_percent_offsets_resolve_against_own_size() {
        let config = ElementConfig::new()
            .offset_x(Offset::percent(-25.0), Offset::percent(25.0))
            .offset_y(Offset::percent(-10.0), Offset::percent(10.0));
        let (element, _) = element(
            config,
            Bounds {
                top: 100.0,
                bottom: 300.0,
            },
            Size {
                width: 400.0,
                height: 200.0,
            },
            0.0,
            600.0,
        );

        let attrs = element.attributes();
        assert_eq!(attrs.x_min_px, -100.0);
        assert_eq!(attrs.x_max_px, 100.0);
        assert_eq!(attrs.y_min_px, -20.0);
        assert_eq!(attrs.y_max_px, 20.0);
    }

    #[test]
    fn test_document_edges_normal_rate() {
        let config = ElementConfig::new().offset_y(Offset::pixels(-10.0), Offset::pixels(50.0));
        let (element, _) = element(
            config,
            Bounds {
                top: 100.0,
                bottom: 300.0,
            },
            Size {
                width: 400.0,
                height: 200.0,
            },
            50.0,
            600.0,
        );

        let attrs = element.attributes();
        assert_eq!(attrs.top, 100.0);
        assert_eq!(attrs.bottom, 360.0);
        assert_eq!(attrs.total_dist, 600.0 + 200.0 + 10.0 + 50.0);
        assert_eq!(attrs.window_height, 600.0);
    }

    #[test]
    fn test_document_edges_slower_rate() {
        let config = ElementConfig::new()
            .slower_scroll_rate(true)
            .offset_y(Offset::pixels(-10.0), Offset::pixels(50.0));
        let (element, _) = element(
            config,
            Bounds {
                top: 100.0,
                bottom: 300.0,
            },
            Size {
                width: 400.0,
                height: 200.0,
            },
            50.0,
            600.0,
        );

        let attrs = element.attributes();
        assert_eq!(attrs.top, 140.0);
        assert_eq!(attrs.bottom, 400.0);
        assert_eq!(attrs.total_dist, 600.0 + 200.0 + 10.0 + 50.0);
    }

    #[test]
    fn test_in_view_top_edge_at_zero() {
        let (element, _) = element(
            ElementConfig::new(),
            Bounds {
                top: 0.0,
                bottom: 100.0,
            },
            Size {
                width: 100.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );
        assert!(element.is_in_view(0.0));
    }

    #[test]
    fn test_in_view_bottom_edge_at_window_height() {
        let (element, _) = element(
            ElementConfig::new(),
            Bounds {
                top: -50.0,
                bottom: 600.0,
            },
            Size {
                width: 100.0,
                height: 650.0,
            },
            0.0,
            600.0,
        );
        assert!(element.is_in_view(0.0));
    }

    #[test]
    fn test_in_view_spanning_viewport() {
        let (element, _) = element(
            ElementConfig::new(),
            Bounds {
                top: -50.0,
                bottom: 700.0,
            },
            Size {
                width: 100.0,
                height: 750.0,
            },
            0.0,
            600.0,
        );
        assert!(element.is_in_view(0.0));
    }

    #[test]
    fn test_out_of_view_above_and_below() {
        let (above, _) = element(
            ElementConfig::new(),
            Bounds {
                top: -300.0,
                bottom: -10.0,
            },
            Size {
                width: 100.0,
                height: 290.0,
            },
            0.0,
            600.0,
        );
        assert!(!above.is_in_view(0.0));

        let (below, _) = element(
            ElementConfig::new(),
            Bounds {
                top: 650.0,
                bottom: 900.0,
            },
            Size {
                width: 100.0,
                height: 250.0,
            },
            0.0,
            600.0,
        );
        assert!(!below.is_in_view(0.0));
        assert!(below.is_in_view(500.0));
    }

    #[test]
    fn test_percent_moved_is_monotonic() {
        let (element, _) = element(
            banner_config(),
            Bounds {
                top: 1000.0,
                bottom: 1100.0,
            },
            Size {
                width: 300.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );

        let mut last = f64::NEG_INFINITY;
        for step in 0..=20 {
            let percent = element.percent_moved(step as f64 * 100.0);
            assert!(percent > last);
            last = percent;
        }
    }

    #[test]
    fn test_percent_moved_zero_at_entry() {
        let (element, _) = element(
            banner_config(),
            Bounds {
                top: 1000.0,
                bottom: 1100.0,
            },
            Size {
                width: 300.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );

        // Cached top is 980 at the normal rate; entry is top - window_height.
        let entry = element.attributes().top - 600.0;
        assert!(element.percent_moved(entry).abs() < 1e-9);
    }

    #[test]
    fn test_centered_offsets_cancel_at_half_travel() {
        let (element, _) = element(
            banner_config(),
            Bounds {
                top: 1000.0,
                bottom: 1100.0,
            },
            Size {
                width: 300.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );

        // total_dist = 600 + 100 + 20 + 20 = 740; halfway lands at scroll 750.
        assert_eq!(element.percent_moved(750.0), 50.0);
        let style = element.compute_style(750.0);
        match style {
            TransformStyle::Translate { x, y } => {
                assert_eq!(x.value, 0.0);
                assert_eq!(y.value, 0.0);
                assert_eq!(y.unit, OffsetUnit::Percent);
            }
            TransformStyle::Reset => panic!("expected a translate style"),
        }
    }

    #[test]
    fn test_slower_rate_flips_scale_direction() {
        let bounds = Bounds {
            top: 1000.0,
            bottom: 1100.0,
        };
        let size = Size {
            width: 300.0,
            height: 100.0,
        };

        let (normal, _) = element(banner_config(), bounds, size, 0.0, 600.0);
        let (slower, _) = element(
            banner_config().slower_scroll_rate(true),
            bounds,
            size,
            0.0,
            600.0,
        );

        // percent_moved is 0 at scroll 380 for both (symmetric offsets).
        match normal.compute_style(380.0) {
            TransformStyle::Translate { y, .. } => assert_eq!(y.value, 20.0),
            TransformStyle::Reset => panic!("expected a translate style"),
        }
        match slower.compute_style(380.0) {
            TransformStyle::Translate { y, .. } => assert_eq!(y.value, -20.0),
            TransformStyle::Reset => panic!("expected a translate style"),
        }
    }

    #[test]
    fn test_pixel_offsets_render_px_units() {
        let config = ElementConfig::new().offset_y(Offset::pixels(-30.0), Offset::pixels(30.0));
        let (element, _) = element(
            config,
            Bounds {
                top: 1000.0,
                bottom: 1100.0,
            },
            Size {
                width: 300.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );

        let style = element.compute_style(370.0);
        assert_eq!(
            style.css_text(),
            "will-change:transform;transform:translate3d(0%, 30px, 0)"
        );
    }

    #[test]
    fn test_zero_total_dist_yields_zero_percent() {
        let (element, _) = element(
            ElementConfig::new(),
            Bounds {
                top: 0.0,
                bottom: 0.0,
            },
            Size {
                width: 0.0,
                height: 0.0,
            },
            0.0,
            0.0,
        );
        assert_eq!(element.percent_moved(123.0), 0.0);
    }

    #[test]
    fn test_refresh_re_resolves_percent_offsets() {
        let (mut element, state) = element(
            banner_config(),
            Bounds {
                top: 1000.0,
                bottom: 1100.0,
            },
            Size {
                width: 300.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );
        assert_eq!(element.attributes().y_max_px, 20.0);

        state.size.set(Size {
            width: 300.0,
            height: 200.0,
        });
        element.refresh(0.0, 600.0);
        assert_eq!(element.attributes().y_max_px, 40.0);
    }

    #[test]
    fn test_reconfigure_failure_keeps_element() {
        let (mut element, _) = element(
            banner_config(),
            Bounds {
                top: 1000.0,
                bottom: 1100.0,
            },
            Size {
                width: 300.0,
                height: 100.0,
            },
            0.0,
            600.0,
        );

        let bad = ElementConfig::new().offset_y(Offset::percent(-20.0), Offset::pixels(20.0));
        assert!(element.reconfigure(bad).is_err());
        assert_eq!(element.config(), &banner_config());
        assert_eq!(element.offsets().y_max, Offset::percent(20.0));
    }

    #[test]
    fn test_merged_applies_set_fields_only() {
        let base = banner_config();
        let update = ElementConfigUpdate::new()
            .disabled(true)
            .offset_y(Offset::pixels(-5.0), Offset::pixels(5.0));
        let merged = base.merged(&update);

        assert!(merged.disabled);
        assert!(!merged.slower_scroll_rate);
        assert_eq!(merged.offset_y_min, Offset::pixels(-5.0));
        assert_eq!(merged.offset_y_max, Offset::pixels(5.0));
        assert_eq!(merged.offset_x_min, Offset::zero());
    }

    #[test]
    fn test_config_serde_round_trips_camel_case() {
        let config: ElementConfig =
            serde_json::from_str(r#"{"slowerScrollRate":true,"offsetYMin":"-20%"}"#).unwrap();
        assert!(config.slower_scroll_rate);
        assert!(!config.disabled);
        assert_eq!(config.offset_y_min, Offset::percent(-20.0));
        assert_eq!(config.offset_y_max, Offset::zero());

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"slowerScrollRate\":true"));
        assert!(json.contains("\"offsetYMin\":\"-20%\""));
    }

    #[test]
    fn test_update_serde_leaves_missing_fields_unset() {
        let update: ElementConfigUpdate = serde_json::from_str(r#"{"disabled":true}"#).unwrap();
        assert_eq!(update.disabled, Some(true));
        assert_eq!(update.offset_y_min, None);
        assert_eq!(update.slower_scroll_rate, None);
    }
}
