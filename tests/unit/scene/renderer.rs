use std::cell::Cell;

use super::*;
use crate::foundation::core::{Point, Rgba8, Vec2};
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::graph::{EntityId, Shape, VisualEntity};
use crate::scene::surface::CpuSurfaceFactory;

struct Dot {
    id: Option<EntityId>,
}

impl Scene for Dot {
    fn name(&self) -> &str {
        "dot"
    }

    fn description(&self) -> &str {
        "A dot slides across an empty street."
    }

    fn resolution(&self) -> (u16, u16) {
        (16, 9)
    }

    fn build(&mut self, graph: &mut SceneGraph) {
        self.id = Some(graph.spawn(VisualEntity::new(
            Shape::Circle { radius: 2.0 },
            Point::ZERO,
            Rgba8::opaque(255, 255, 255),
        )));
    }

    fn apply_progress(&self, graph: &mut SceneGraph, progress: f64) {
        if let Some(e) = self.id.and_then(|id| graph.get_mut(id)) {
            e.position = Point::new(progress * 16.0, 4.0);
            e.alpha = progress;
        }
    }

    fn apply_ambient(&self, layer: &mut AmbientLayer<'_>, clock: &AmbientClock) {
        if let Some(id) = self.id {
            layer.set_offset(id, Vec2::new(0.0, clock.wave(1.0, 0.0)));
        }
    }
}

fn dot() -> Box<dyn Scene> {
    Box::new(Dot { id: None })
}

struct Failing {
    calls: Cell<u32>,
}

impl SurfaceFactory for Failing {
    fn create(&self, _w: u16, _h: u16) -> ReelResult<Box<dyn DrawingSurface>> {
        self.calls.set(self.calls.get() + 1);
        Err(ReelError::surface("no context"))
    }
}

fn cpu() -> Rc<dyn SurfaceFactory> {
    Rc::new(CpuSurfaceFactory::default())
}

#[test]
fn dormant_until_in_view() {
    let mut r = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    r.update(ScrollState::new(0.3, false));
    assert!(!r.is_live());
    assert!(matches!(r.scene_view(), SceneView::Dormant { .. }));
    assert!(r.frame().is_none());
}

#[test]
fn surface_follows_viewport_edges() {
    let mut r = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    r.update(ScrollState::new(0.1, true));
    assert!(r.is_live());
    r.update(ScrollState::new(0.2, true));
    assert_eq!(r.stats().acquired, 1);

    r.update(ScrollState::new(0.2, false));
    assert!(!r.is_live());
    assert_eq!(r.stats().released, 1);

    r.update(ScrollState::new(0.4, true));
    assert_eq!(r.stats().acquired, 2);
}

#[test]
fn progress_state_is_path_independent() {
    let mut a = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    a.update(ScrollState::new(0.0, true));
    a.update(ScrollState::new(0.7, true));
    a.update(ScrollState::new(0.3, true));

    let mut b = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    b.update(ScrollState::new(0.3, true));

    let ea: Vec<_> = a.graph().unwrap().draw_order().into_iter().cloned().collect();
    let eb: Vec<_> = b.graph().unwrap().draw_order().into_iter().cloned().collect();
    assert_eq!(ea, eb);
}

#[test]
fn ambient_tick_leaves_alpha_alone() {
    let mut r = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    r.update(ScrollState::new(0.5, true));
    for _ in 0..10 {
        r.tick(0.05);
    }
    let e = r.graph().unwrap().draw_order()[0].clone();
    assert_eq!(e.alpha, 0.5);
    assert_eq!(e.position, Point::new(8.0, 4.0));
    match r.scene_view() {
        SceneView::Live { ambient_ticks, .. } => assert_eq!(ambient_ticks, 10),
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn tick_is_noop_while_dormant() {
    let mut r = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    r.tick(1.0);
    assert!(r.graph().is_none());
}

#[test]
fn reduced_motion_never_allocates() {
    let failing = Rc::new(Failing {
        calls: Cell::new(0),
    });
    let mut r = SceneRenderer::new(
        dot(),
        failing.clone(),
        SceneOpts {
            reduced_motion: true,
        },
    );
    r.update(ScrollState::new(0.5, true));
    r.tick(0.1);
    assert_eq!(failing.calls.get(), 0);
    assert_eq!(
        r.scene_view(),
        SceneView::Fallback {
            label: "A dot slides across an empty street.".to_string(),
            reason: FallbackReason::ReducedMotion,
        }
    );
}

#[test]
fn surface_failure_degrades_and_retries_on_next_entry() {
    let failing = Rc::new(Failing {
        calls: Cell::new(0),
    });
    let mut r = SceneRenderer::new(dot(), failing.clone(), SceneOpts::default());
    r.update(ScrollState::new(0.5, true));
    assert!(matches!(
        r.scene_view(),
        SceneView::Fallback {
            reason: FallbackReason::SurfaceUnavailable,
            ..
        }
    ));
    r.update(ScrollState::new(0.6, true));
    assert_eq!(failing.calls.get(), 1);

    r.update(ScrollState::new(0.6, false));
    r.update(ScrollState::new(0.6, true));
    assert_eq!(failing.calls.get(), 2);
    assert_eq!(r.stats().failures, 2);
}

#[test]
fn teardown_releases_and_ignores_later_updates() {
    let mut r = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    r.update(ScrollState::new(0.5, true));
    r.teardown();
    assert!(!r.is_live());
    r.update(ScrollState::new(0.5, false));
    r.update(ScrollState::new(0.5, true));
    assert!(!r.is_live());
    assert_eq!(r.stats().acquired, 1);
}

#[test]
fn live_frame_has_scene_resolution() {
    let mut r = SceneRenderer::new(dot(), cpu(), SceneOpts::default());
    r.update(ScrollState::new(1.0, true));
    let f = r.frame().unwrap();
    assert_eq!((f.width, f.height), (16, 9));
}
