use std::rc::Rc;

use crate::foundation::core::FrameRGBA;
use crate::scene::graph::{AmbientClock, AmbientLayer, SceneGraph};
use crate::scene::surface::{DrawingSurface, SurfaceFactory};
use crate::section::{BlockView, SectionContent};
use crate::tracking::progress::ScrollState;

/// Logical resolution scenes are authored at unless they say otherwise.
pub const DEFAULT_RESOLUTION: (u16, u16) = (160, 90);

/// A bespoke animated illustration.
///
/// `apply_progress` must be a pure function of `progress` over the entities created in `build`:
/// the same progress always yields the same positions, colors and alphas, whatever happened before.
/// Idle motion goes through `apply_ambient`, which can only write the ambient channel.
pub trait Scene {
    /// Short machine name, used in logs.
    fn name(&self) -> &str;

    /// Static natural-language description: the reduced-motion fallback and the accessibility label.
    fn description(&self) -> &str;

    /// Surface size in logical px.
    fn resolution(&self) -> (u16, u16) {
        DEFAULT_RESOLUTION
    }

    /// Create the scene's entities in a fresh graph.
    fn build(&mut self, graph: &mut SceneGraph);

    /// Set every progress-driven property from `progress`.
    fn apply_progress(&self, graph: &mut SceneGraph, progress: f64);

    /// Idle motion for the current clock.
    fn apply_ambient(&self, _layer: &mut AmbientLayer<'_>, _clock: &AmbientClock) {}
}

/// Scene renderer options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneOpts {
    /// Skip surface allocation entirely and show the static description.
    pub reduced_motion: bool,
}

/// Why a scene shows its static description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The visitor prefers reduced motion.
    ReducedMotion,
    /// The drawing surface could not be created or drawn into.
    SurfaceUnavailable,
}

/// Render state of a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SceneView {
    /// Off-screen; nothing allocated.
    Dormant {
        /// Accessibility label.
        label: String,
    },
    /// Drawing surface live and up to date.
    Live {
        /// Accessibility label.
        label: String,
        /// Progress the graph was last computed for.
        progress: f64,
        /// Entities in the graph.
        entities: usize,
        /// Ambient ticks since the scene went live.
        ambient_ticks: u64,
    },
    /// Static description shown in place of the animation.
    Fallback {
        /// Accessibility label.
        label: String,
        /// Why the fallback is shown.
        reason: FallbackReason,
    },
}

/// Lifecycle counters for one scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SceneStats {
    /// Surfaces acquired.
    pub acquired: u64,
    /// Surfaces released.
    pub released: u64,
    /// Surface creation or draw failures.
    pub failures: u64,
}

struct LiveScene {
    surface: Box<dyn DrawingSurface>,
    graph: SceneGraph,
    clock: AmbientClock,
}

/// Drives one [`Scene`] from `(progress, in_view)` updates.
///
/// The surface and graph exist only while the scene is in view: they are created on the
/// out-of-view → in-view edge and dropped on the reverse edge.
pub struct SceneRenderer {
    scene: Box<dyn Scene>,
    factory: Rc<dyn SurfaceFactory>,
    opts: SceneOpts,
    state: ScrollState,
    live: Option<LiveScene>,
    degraded: bool,
    torn_down: bool,
    stats: SceneStats,
}

impl SceneRenderer {
    /// Wrap `scene`. Nothing is allocated until the scene enters the viewport.
    pub fn new(scene: Box<dyn Scene>, factory: Rc<dyn SurfaceFactory>, opts: SceneOpts) -> Self {
        Self {
            scene,
            factory,
            opts,
            state: ScrollState::default(),
            live: None,
            degraded: false,
            torn_down: false,
            stats: SceneStats::default(),
        }
    }

    /// Accessibility label (the scene description).
    pub fn label(&self) -> &str {
        self.scene.description()
    }

    /// Apply a new scroll state.
    pub fn update(&mut self, state: ScrollState) {
        if self.torn_down {
            return;
        }
        let was_in_view = self.state.in_view;
        self.state = state;
        if self.opts.reduced_motion {
            return;
        }

        match (was_in_view, state.in_view) {
            (false, true) => self.acquire(),
            (true, false) => self.release(),
            _ => {}
        }

        if let Some(live) = self.live.as_mut() {
            self.scene.apply_progress(&mut live.graph, state.progress);
        }
        self.redraw();
    }

    /// Advance the ambient clock by `dt` seconds and redraw. No-op unless live.
    pub fn tick(&mut self, dt: f64) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        live.clock.advance(dt);
        let mut layer = AmbientLayer::new(&mut live.graph);
        self.scene.apply_ambient(&mut layer, &live.clock);
        self.redraw();
    }

    /// Release the surface for good; later updates and ticks are ignored.
    pub fn teardown(&mut self) {
        self.release();
        self.torn_down = true;
    }

    /// Whether a drawing surface is currently held.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Lifecycle counters.
    pub fn stats(&self) -> SceneStats {
        self.stats
    }

    /// Live scene graph, if any.
    pub fn graph(&self) -> Option<&SceneGraph> {
        self.live.as_ref().map(|l| &l.graph)
    }

    /// Last drawn frame, if live.
    pub fn frame(&self) -> Option<FrameRGBA> {
        self.live.as_ref().map(|l| l.surface.read_frame())
    }

    /// Current render state.
    pub fn scene_view(&self) -> SceneView {
        let label = self.label().to_string();
        if self.opts.reduced_motion {
            return SceneView::Fallback {
                label,
                reason: FallbackReason::ReducedMotion,
            };
        }
        if self.degraded {
            return SceneView::Fallback {
                label,
                reason: FallbackReason::SurfaceUnavailable,
            };
        }
        match &self.live {
            Some(live) => SceneView::Live {
                label,
                progress: self.state.progress,
                entities: live.graph.len(),
                ambient_ticks: live.clock.ticks,
            },
            None => SceneView::Dormant { label },
        }
    }

    fn acquire(&mut self) {
        let (w, h) = self.scene.resolution();
        match self.factory.create(w, h) {
            Ok(surface) => {
                let mut graph = SceneGraph::new();
                self.scene.build(&mut graph);
                tracing::debug!(
                    scene = self.scene.name(),
                    entities = graph.len(),
                    "scene entered view; surface acquired"
                );
                self.live = Some(LiveScene {
                    surface,
                    graph,
                    clock: AmbientClock::default(),
                });
                self.degraded = false;
                self.stats.acquired = self.stats.acquired.saturating_add(1);
            }
            Err(err) => {
                tracing::warn!(
                    scene = self.scene.name(),
                    error = %err,
                    "drawing surface unavailable; showing static description"
                );
                self.degraded = true;
                self.stats.failures = self.stats.failures.saturating_add(1);
            }
        }
    }

    fn release(&mut self) {
        if self.live.take().is_some() {
            tracing::debug!(scene = self.scene.name(), "scene left view; surface released");
            self.stats.released = self.stats.released.saturating_add(1);
        }
    }

    fn redraw(&mut self) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        if let Err(err) = live.surface.draw(&live.graph) {
            tracing::warn!(
                scene = self.scene.name(),
                error = %err,
                "scene draw failed; showing static description"
            );
            self.live = None;
            self.degraded = true;
            self.stats.failures = self.stats.failures.saturating_add(1);
        }
    }
}

impl SectionContent for SceneRenderer {
    fn update(&mut self, state: ScrollState) {
        SceneRenderer::update(self, state);
    }

    fn view(&self) -> BlockView {
        BlockView::Scene(self.scene_view())
    }

    fn tick(&mut self, dt: f64) {
        SceneRenderer::tick(self, dt);
    }

    fn teardown(&mut self) {
        SceneRenderer::teardown(self);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/renderer.rs"]
mod tests;
