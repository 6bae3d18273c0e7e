//! Pure progress → style mappings shared by every scroll-driven component.
//!
//! Every function here is a pure function of its arguments: scrolling backward re-evaluates the same
//! formula with a smaller progress and lands on exactly the state a direct scroll would produce.

use crate::animation::ease::Ease;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{clamp_unit, finite_or};

/// Tunable reveal constants.
///
/// The defaults are visual-taste values; none of the mapping guarantees depend on them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Progress at which the first staggered item starts to reveal.
    pub window_start: f64,
    /// Progress by which the staggered cascade window ends.
    pub window_end: f64,
    /// Slide distance for staggered items, in px.
    pub stagger_offset_px: f64,
    /// Slide distance for single-element fades, in px.
    pub fade_offset_px: f64,
    /// Infographic over-reveal factor (`> 1` reveals the last records before progress hits 1).
    pub reveal_factor: f64,
    /// Curve applied to local progress.
    pub ease: Ease,
}

impl RevealConfig {
    /// Default constants.
    pub const DEFAULT: Self = Self {
        window_start: 0.10,
        window_end: 0.48,
        stagger_offset_px: 20.0,
        fade_offset_px: 12.0,
        reveal_factor: 1.5,
        ease: Ease::OutCubic,
    };

    /// Reject configurations that cannot produce a sensible reveal.
    pub fn validate(&self) -> ReelResult<()> {
        let in_unit = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(self.window_start) || !in_unit(self.window_end) {
            return Err(ReelError::validation(
                "reveal window bounds must lie within [0, 1]",
            ));
        }
        if self.window_start >= self.window_end {
            return Err(ReelError::validation(
                "reveal window_start must be < window_end",
            ));
        }
        for (name, v) in [
            ("stagger_offset_px", self.stagger_offset_px),
            ("fade_offset_px", self.fade_offset_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ReelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.reveal_factor.is_finite() || self.reveal_factor < 1.0 {
            return Err(ReelError::validation("reveal_factor must be finite and >= 1"));
        }
        Ok(())
    }

    /// Staggered fade/slide for item `index` of `total` siblings.
    ///
    /// The cascade window is split into `total + 1` steps; item `i` starts at step `i` and lasts two
    /// steps, so neighbours overlap by half. Earlier items are never less revealed than later ones.
    pub fn staggered_fade_in(&self, progress: f64, index: usize, total: usize) -> RevealStyle {
        let start = finite_or(self.window_start, Self::DEFAULT.window_start);
        let end = finite_or(self.window_end, Self::DEFAULT.window_end);
        let step = (end - start).max(0.0) / (total as f64 + 1.0);
        let item_start = start + (index as f64) * step;
        let t = local_t(clamp_unit(progress), item_start, 2.0 * step);
        RevealStyle::eased(self.ease.apply(t), self.stagger_offset_px)
    }

    /// Fade/slide of a single element over `[fade_start, fade_end]`.
    pub fn fade_in(&self, progress: f64, fade_start: f64, fade_end: f64) -> RevealStyle {
        let t = window_progress(progress, fade_start, fade_end);
        RevealStyle::eased(self.ease.apply(t), self.fade_offset_px)
    }

    /// Stroke/width reveal percentage over `[draw_start, draw_end]`, in `[0, 100]`.
    pub fn line_draw(&self, progress: f64, draw_start: f64, draw_end: f64) -> f64 {
        let t = window_progress(progress, draw_start, draw_end);
        (self.ease.apply(t) * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Opacity plus vertical slide offset for one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Downward offset in px; `0` once fully revealed.
    pub translate_y: f64,
}

impl RevealStyle {
    /// Fully revealed, in place.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        translate_y: 0.0,
    };

    /// Fully hidden, displaced by `offset_px`.
    pub fn hidden(offset_px: f64) -> Self {
        Self::eased(0.0, offset_px)
    }

    fn eased(eased: f64, offset_px: f64) -> Self {
        let eased = clamp_unit(eased);
        let offset = finite_or(offset_px, 0.0).max(0.0);
        Self {
            opacity: eased,
            translate_y: (1.0 - eased) * offset,
        }
    }

    /// CSS `transform` value for this style.
    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }
}

/// Local progress of `progress` inside `[start, end]`, clamped to `[0, 1]`.
///
/// A degenerate window (`end <= start`) acts as a step at `end`.
pub fn window_progress(progress: f64, start: f64, end: f64) -> f64 {
    let p = clamp_unit(progress);
    let start = finite_or(start, 0.0);
    let end = finite_or(end, 1.0);
    if end <= start {
        return if p >= end { 1.0 } else { 0.0 };
    }
    local_t(p, start, end - start)
}

fn local_t(p: f64, start: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if p >= start { 1.0 } else { 0.0 };
    }
    clamp_unit((p - start) / duration)
}

/// [`RevealConfig::staggered_fade_in`] with default constants.
pub fn staggered_fade_in(progress: f64, index: usize, total: usize) -> RevealStyle {
    RevealConfig::DEFAULT.staggered_fade_in(progress, index, total)
}

/// [`RevealConfig::fade_in`] with default constants.
pub fn fade_in(progress: f64, fade_start: f64, fade_end: f64) -> RevealStyle {
    RevealConfig::DEFAULT.fade_in(progress, fade_start, fade_end)
}

/// [`RevealConfig::line_draw`] with default constants.
pub fn line_draw(progress: f64, draw_start: f64, draw_end: f64) -> f64 {
    RevealConfig::DEFAULT.line_draw(progress, draw_start, draw_end)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/reveal.rs"]
mod tests;
