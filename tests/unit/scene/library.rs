use super::*;
use crate::scene::renderer::DEFAULT_RESOLUTION;

fn built(kind: SceneKind) -> (Box<dyn Scene>, SceneGraph) {
    built_with(kind, RevealConfig::DEFAULT)
}

fn built_with(kind: SceneKind, reveal: RevealConfig) -> (Box<dyn Scene>, SceneGraph) {
    let mut scene = kind.instantiate(reveal);
    let mut graph = SceneGraph::new();
    scene.build(&mut graph);
    (scene, graph)
}

fn snapshot(graph: &SceneGraph) -> Vec<VisualEntity> {
    graph.draw_order().into_iter().cloned().collect()
}

#[test]
fn kinds_parse_from_snake_case() {
    let k: SceneKind = serde_json::from_str("\"telegraph_line\"").unwrap();
    assert_eq!(k, SceneKind::TelegraphLine);
    assert!(serde_json::from_str::<SceneKind>("\"harbor\"").is_err());
}

#[test]
fn every_scene_has_a_description_and_entities() {
    for kind in SceneKind::ALL {
        let (scene, graph) = built(kind);
        assert!(!scene.description().is_empty(), "{kind:?}");
        assert!(!graph.is_empty(), "{kind:?}");
        assert_eq!(scene.resolution(), DEFAULT_RESOLUTION);
    }
}

#[test]
fn progress_mapping_is_path_independent() {
    for kind in SceneKind::ALL {
        let (scene, mut a) = built(kind);
        for p in [0.0, 0.2, 0.9, 0.7, 0.1, 0.45] {
            scene.apply_progress(&mut a, p);
        }
        let (scene_b, mut b) = built(kind);
        scene_b.apply_progress(&mut b, 0.45);
        assert_eq!(snapshot(&a), snapshot(&b), "{kind:?}");
    }
}

#[test]
fn lanterns_are_dark_at_start_and_lit_at_end() {
    let (scene, mut g) = built(SceneKind::LanternAlley);
    scene.apply_progress(&mut g, 0.0);
    let dark = snapshot(&g).iter().filter(|e| e.color == LAMP && e.alpha > 0.0).count();
    assert_eq!(dark, 0);
    scene.apply_progress(&mut g, 1.0);
    let lit = snapshot(&g).iter().filter(|e| e.color == LAMP && e.alpha == 1.0).count();
    assert_eq!(lit, LANTERNS);
}

#[test]
fn ambient_does_not_touch_progress_state() {
    for kind in SceneKind::ALL {
        let (scene, mut g) = built(kind);
        scene.apply_progress(&mut g, 0.6);
        let before = snapshot(&g);
        let mut clock = AmbientClock::default();
        for _ in 0..7 {
            clock.advance(0.1);
            let mut layer = AmbientLayer::new(&mut g);
            scene.apply_ambient(&mut layer, &clock);
        }
        for (b, a) in before.iter().zip(snapshot(&g)) {
            assert_eq!(b.alpha, a.alpha, "{kind:?}");
            assert_eq!(b.position, a.position, "{kind:?}");
            assert_eq!(b.color, a.color, "{kind:?}");
        }
    }
}

#[test]
fn underline_grows_with_progress() {
    let (scene, mut g) = built(SceneKind::ArchiveDesk);
    let width = |g: &SceneGraph| match snapshot(g).last().map(|e| e.shape.clone()) {
        Some(Shape::Rect { width, .. }) => width,
        other => panic!("unexpected shape {other:?}"),
    };
    scene.apply_progress(&mut g, 0.5);
    assert_eq!(width(&g), 0.0);
    scene.apply_progress(&mut g, 1.0);
    assert_eq!(width(&g), 26.0);
}

#[test]
fn scenes_follow_the_configured_reveal_window() {
    let lit = |g: &SceneGraph| {
        snapshot(g)
            .iter()
            .filter(|e| e.color == LAMP && e.alpha == 1.0)
            .count()
    };

    let (scene, mut g) = built(SceneKind::LanternAlley);
    scene.apply_progress(&mut g, 0.3);
    assert!(lit(&g) < LANTERNS);

    let early = RevealConfig {
        window_start: 0.0,
        window_end: 0.2,
        ..RevealConfig::DEFAULT
    };
    let (scene, mut g) = built_with(SceneKind::LanternAlley, early);
    scene.apply_progress(&mut g, 0.3);
    assert_eq!(lit(&g), LANTERNS);
}
