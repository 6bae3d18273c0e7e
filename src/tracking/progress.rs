use crate::foundation::math::clamp_unit;

/// `(progress, in_view)` pair handed to every scroll-driven component.
///
/// The default (`progress = 0`, `in_view = false`) is what components see before the first
/// measurement lands.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Fraction of the region's journey through the viewport, in `[0, 1]`.
    pub progress: f64,
    /// Whether any part of the region intersects the viewport.
    pub in_view: bool,
}

impl ScrollState {
    /// Build a state, clamping `progress`.
    pub fn new(progress: f64, in_view: bool) -> Self {
        Self {
            progress: clamp_unit(progress),
            in_view,
        }
    }
}

/// One geometry reading of a tracked element, in viewport-relative px.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Measurement {
    /// Current viewport height.
    pub viewport_height: f64,
    /// Distance from the viewport top to the element's top edge (negative once scrolled past).
    pub element_top: f64,
    /// Rendered element height.
    pub element_height: f64,
}

impl Measurement {
    /// Journey progress, or `None` when the geometry is not usable yet
    /// (non-finite values or an empty viewport).
    ///
    /// `progress = clamp((vh - top) / (vh + height), 0, 1)`: `0` when the element's top edge sits on
    /// the viewport's bottom edge, `1` when its bottom edge reaches the viewport's top edge.
    pub fn progress(&self) -> Option<f64> {
        let vh = self.viewport_height;
        let top = self.element_top;
        if !vh.is_finite() || vh <= 0.0 || !top.is_finite() || !self.element_height.is_finite() {
            return None;
        }
        let height = self.element_height.max(0.0);
        let total_travel = vh + height;
        let traveled = vh - top;
        Some(clamp_unit(traveled / total_travel))
    }

    /// Threshold-0 intersection test: touching the viewport edge counts as intersecting.
    pub fn intersects(&self) -> bool {
        let vh = self.viewport_height;
        let top = self.element_top;
        if !vh.is_finite() || vh <= 0.0 || !top.is_finite() || !self.element_height.is_finite() {
            return false;
        }
        let bottom = top + self.element_height.max(0.0);
        top <= vh && bottom >= 0.0
    }
}

/// Journey progress for a raw geometry; `0` when the geometry is not ready.
pub fn compute_progress(viewport_height: f64, element_top: f64, element_height: f64) -> f64 {
    Measurement {
        viewport_height,
        element_top,
        element_height,
    }
    .progress()
    .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/progress.rs"]
mod tests;
