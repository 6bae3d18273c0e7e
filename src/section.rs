use crate::infographic::renderer::InfographicView;
use crate::infographic::selection::Interaction;
use crate::narrative::NarrativeView;
use crate::scene::renderer::SceneView;
use crate::tracking::frame::FrameToken;
use crate::tracking::progress::ScrollState;
use crate::tracking::tracker::{ElementProbe, ProgressTracker};

/// Presentation logic driven by a [`Section`].
///
/// `update` is called with the section's `(progress, in_view)` every time either changes; the
/// remaining hooks have no-op defaults.
pub trait SectionContent {
    /// New scroll state for this section.
    fn update(&mut self, state: ScrollState);

    /// Serializable view of the current render state.
    fn view(&self) -> BlockView;

    /// Ambient clock tick (`dt` seconds), independent of scroll.
    fn tick(&mut self, _dt: f64) {}

    /// User interaction targeted at this section. Returns `true` if anything changed.
    fn interact(&mut self, _event: &Interaction) -> bool {
        false
    }

    /// Release any resources held by the content.
    fn teardown(&mut self) {}
}

impl<C: SectionContent + ?Sized> SectionContent for Box<C> {
    fn update(&mut self, state: ScrollState) {
        (**self).update(state);
    }

    fn view(&self) -> BlockView {
        (**self).view()
    }

    fn tick(&mut self, dt: f64) {
        (**self).tick(dt);
    }

    fn interact(&mut self, event: &Interaction) -> bool {
        (**self).interact(event)
    }

    fn teardown(&mut self) {
        (**self).teardown();
    }
}

/// Render state of one block, as reported in page snapshots.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockView {
    /// Narrative text block.
    Narrative(NarrativeView),
    /// Animated scene.
    Scene(SceneView),
    /// Data-driven infographic.
    Infographic(InfographicView),
}

/// One tracked region: a [`ProgressTracker`] feeding a piece of [`SectionContent`].
///
/// The content is rendered with the default `(0, false)` state as soon as the section exists, so it
/// never waits on (or sees garbage from) the first measurement.
pub struct Section<C> {
    id: String,
    tracker: ProgressTracker,
    content: C,
}

impl<C: SectionContent> Section<C> {
    /// Wrap `content` and render it once with the default state.
    pub fn new(id: impl Into<String>, mut content: C) -> Self {
        content.update(ScrollState::default());
        Self {
            id: id.into(),
            tracker: ProgressTracker::new(),
            content,
        }
    }

    /// Section id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start tracking and push the first measured state to the content.
    pub fn mount(&mut self, probe: &dyn ElementProbe) {
        let state = self.tracker.mount(probe);
        self.content.update(state);
    }

    /// Forward a scroll/resize event; see [`ProgressTracker::on_scroll`].
    pub fn on_scroll(&mut self) -> Option<FrameToken> {
        self.tracker.on_scroll()
    }

    /// Run a scheduled frame. Returns `true` when the content was updated.
    pub fn run_frame(&mut self, token: FrameToken, probe: &dyn ElementProbe) -> bool {
        match self.tracker.run_frame(token, probe) {
            Some(state) => {
                self.content.update(state);
                true
            }
            None => false,
        }
    }

    /// Forward an intersection change. Returns `true` when the content was updated.
    pub fn on_intersection(&mut self, intersecting: bool) -> bool {
        match self.tracker.on_intersection(intersecting) {
            Some(state) => {
                self.content.update(state);
                true
            }
            None => false,
        }
    }

    /// Forward an ambient tick while mounted.
    pub fn tick(&mut self, dt: f64) {
        if self.tracker.is_mounted() {
            self.content.tick(dt);
        }
    }

    /// Forward a user interaction while mounted.
    pub fn interact(&mut self, event: &Interaction) -> bool {
        self.tracker.is_mounted() && self.content.interact(event)
    }

    /// Stop tracking and tear the content down. Returns the cancelled frame token, if any.
    pub fn unmount(&mut self) -> Option<FrameToken> {
        let cancelled = self.tracker.unmount();
        self.content.teardown();
        cancelled
    }

    /// Current scroll state.
    pub fn state(&self) -> ScrollState {
        self.tracker.state()
    }

    /// The tracker driving this section.
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// The wrapped content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Current view of the content.
    pub fn view(&self) -> BlockView {
        self.content.view()
    }
}

#[cfg(test)]
#[path = "../tests/unit/section.rs"]
mod tests;
