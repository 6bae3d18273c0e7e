use crate::tracking::frame::{CoalesceStats, FrameCoalescer, FrameToken};
use crate::tracking::progress::{Measurement, ScrollState};

/// Host-side access to a tracked element's geometry.
///
/// `None` means the element is not attached yet (or has no layout); the tracker treats that as
/// "not ready" rather than an error.
pub trait ElementProbe {
    /// Read the element's current viewport-relative geometry.
    fn measure(&self) -> Option<Measurement>;
}

impl<F> ElementProbe for F
where
    F: Fn() -> Option<Measurement>,
{
    fn measure(&self) -> Option<Measurement> {
        self()
    }
}

impl ElementProbe for Measurement {
    fn measure(&self) -> Option<Measurement> {
        Some(*self)
    }
}

/// Live `(progress, in_view)` for one tracked region.
///
/// Progress is recomputed from the current geometry on mount and on each coalesced scroll frame;
/// `in_view` is only changed by intersection callbacks. When the region leaves the viewport its
/// progress keeps the last computed value.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    state: ScrollState,
    mounted: bool,
    frames: FrameCoalescer,
    recomputations: u64,
}

impl ProgressTracker {
    /// Unmounted tracker in the default `(0, false)` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing and compute progress once immediately.
    pub fn mount(&mut self, probe: &dyn ElementProbe) -> ScrollState {
        self.mounted = true;
        self.recompute(probe);
        self.state
    }

    /// Stop observing. Cancels the pending frame, if any, and returns its token so the host can
    /// cancel the matching platform callback. Later callbacks become no-ops.
    pub fn unmount(&mut self) -> Option<FrameToken> {
        self.mounted = false;
        self.frames.cancel()
    }

    /// Whether the tracker is between `mount` and `unmount`.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Last published state.
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Scroll or resize happened: request a frame. Returns a token only when a new frame had to be
    /// scheduled; bursts merge into the pending one.
    pub fn on_scroll(&mut self) -> Option<FrameToken> {
        if !self.mounted {
            return None;
        }
        self.frames.request()
    }

    /// Run a scheduled frame. Returns the new state, or `None` when the token is stale or the
    /// tracker has been unmounted.
    pub fn run_frame(&mut self, token: FrameToken, probe: &dyn ElementProbe) -> Option<ScrollState> {
        if !self.mounted {
            tracing::debug!(?token, "frame fired after unmount; ignoring");
            return None;
        }
        if !self.frames.fire(token) {
            tracing::debug!(?token, "stale frame token; ignoring");
            return None;
        }
        self.recompute(probe);
        Some(self.state)
    }

    /// Intersection boundary crossed. Returns the new state when `in_view` changed.
    ///
    /// Progress is left untouched: the next scroll frame recomputes it.
    pub fn on_intersection(&mut self, intersecting: bool) -> Option<ScrollState> {
        if !self.mounted || self.state.in_view == intersecting {
            return None;
        }
        self.state.in_view = intersecting;
        Some(self.state)
    }

    /// Pending frame token, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.frames.pending()
    }

    /// Number of progress recomputations performed so far.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Scroll coalescing counters.
    pub fn frame_stats(&self) -> CoalesceStats {
        self.frames.stats()
    }

    fn recompute(&mut self, probe: &dyn ElementProbe) {
        self.recomputations = self.recomputations.saturating_add(1);
        match probe.measure().and_then(|m| m.progress()) {
            Some(p) => self.state.progress = p,
            None => {
                self.state = ScrollState::default();
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/tracker.rs"]
mod tests;
