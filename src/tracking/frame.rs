/// Handle for one scheduled animation-frame callback.
///
/// Tokens are never reused, so a callback that fires after its request was cancelled (or already
/// served) is recognised as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FrameToken(u64);

/// Counters describing how scroll bursts were coalesced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CoalesceStats {
    /// Total `request` calls.
    pub requested: u64,
    /// Requests merged into an already-pending frame.
    pub merged: u64,
    /// Frames that ran.
    pub fired: u64,
    /// Callbacks rejected as stale or cancelled.
    pub dropped: u64,
}

/// At-most-one-pending scheduler for per-frame recomputation.
///
/// `request` schedules a frame unless one is already pending, in which case the request is merged
/// into it. The host runs the frame by presenting the token back to `fire`.
#[derive(Debug, Default)]
pub struct FrameCoalescer {
    next_token: u64,
    pending: Option<FrameToken>,
    stats: CoalesceStats,
}

impl FrameCoalescer {
    /// Empty scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a frame. Returns the new token, or `None` if the request merged into a pending one.
    pub fn request(&mut self) -> Option<FrameToken> {
        self.stats.requested = self.stats.requested.saturating_add(1);
        if self.pending.is_some() {
            self.stats.merged = self.stats.merged.saturating_add(1);
            return None;
        }
        let token = FrameToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.pending = Some(token);
        Some(token)
    }

    /// Currently pending token, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Consume the pending frame if `token` matches it. Stale tokens return `false`.
    pub fn fire(&mut self, token: FrameToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            self.stats.fired = self.stats.fired.saturating_add(1);
            true
        } else {
            self.stats.dropped = self.stats.dropped.saturating_add(1);
            false
        }
    }

    /// Cancel the pending frame, returning its token so the host can cancel its own callback too.
    pub fn cancel(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    /// Coalescing counters.
    pub fn stats(&self) -> CoalesceStats {
        self.stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tracking/frame.rs"]
mod tests;
