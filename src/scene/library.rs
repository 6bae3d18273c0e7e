use crate::animation::ease::Ease;
use crate::animation::lerp::blend;
use crate::animation::reveal::{RevealConfig, window_progress};
use crate::foundation::core::{BezPath, Point, Rgba8, Vec2};
use crate::scene::graph::{AmbientClock, AmbientLayer, EntityId, SceneGraph, Shape, VisualEntity};
use crate::scene::renderer::Scene;

const NIGHT: Rgba8 = Rgba8::opaque(18, 20, 34);
const DUSK: Rgba8 = Rgba8::opaque(64, 44, 70);
const LAMP: Rgba8 = Rgba8::opaque(255, 196, 92);
const PAPER: Rgba8 = Rgba8::opaque(232, 222, 196);
const INK: Rgba8 = Rgba8::opaque(40, 36, 32);
const WOOD: Rgba8 = Rgba8::opaque(96, 62, 38);
const WIRE: Rgba8 = Rgba8::opaque(150, 150, 160);
const SIGNAL: Rgba8 = Rgba8::opaque(240, 80, 60);

/// Built-in scenes, addressable from page JSON.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Lanterns light up along an alley while a figure walks through it.
    LanternAlley,
    /// Files slide onto a desk and a key line gets underlined.
    ArchiveDesk,
    /// A wire is strung between poles and a signal runs along it.
    TelegraphLine,
}

impl SceneKind {
    /// All kinds, in declaration order.
    pub const ALL: [SceneKind; 3] = [Self::LanternAlley, Self::ArchiveDesk, Self::TelegraphLine];

    /// Fresh scene instance revealing its elements with `reveal`.
    pub fn instantiate(self, reveal: RevealConfig) -> Box<dyn Scene> {
        match self {
            Self::LanternAlley => Box::new(LanternAlley {
                reveal,
                ..LanternAlley::default()
            }),
            Self::ArchiveDesk => Box::new(ArchiveDesk {
                reveal,
                ..ArchiveDesk::default()
            }),
            Self::TelegraphLine => Box::new(TelegraphLine {
                reveal,
                ..TelegraphLine::default()
            }),
        }
    }
}

fn rect(w: f64, h: f64) -> Shape {
    Shape::Rect {
        width: w,
        height: h,
    }
}

fn set(graph: &mut SceneGraph, id: Option<EntityId>, f: impl FnOnce(&mut VisualEntity)) {
    if let Some(e) = id.and_then(|id| graph.get_mut(id)) {
        f(e);
    }
}

const LANTERNS: usize = 5;

#[derive(Default)]
struct LanternAlley {
    reveal: RevealConfig,
    sky: Option<EntityId>,
    lanterns: Vec<EntityId>,
    walker: Option<EntityId>,
}

impl Scene for LanternAlley {
    fn name(&self) -> &str {
        "lantern_alley"
    }

    fn description(&self) -> &str {
        "Night falls over a narrow alley. One by one five lanterns are lit, and a lone figure \
         walks from the left edge to a doorway on the right."
    }

    fn build(&mut self, graph: &mut SceneGraph) {
        self.sky = Some(graph.spawn(VisualEntity::new(rect(160.0, 90.0), Point::ZERO, DUSK)));
        graph.spawn(VisualEntity::new(rect(160.0, 14.0), Point::new(0.0, 76.0), INK).with_z(1));
        self.lanterns = (0..LANTERNS)
            .map(|i| {
                let x = 16.0 + i as f64 * 32.0;
                graph.spawn(
                    VisualEntity::new(Shape::Circle { radius: 4.0 }, Point::new(x, 30.0), LAMP)
                        .with_z(2)
                        .with_alpha(0.0),
                )
            })
            .collect();
        self.walker = Some(graph.spawn(
            VisualEntity::new(rect(6.0, 16.0), Point::new(-6.0, 60.0), PAPER).with_z(3),
        ));
    }

    fn apply_progress(&self, graph: &mut SceneGraph, progress: f64) {
        let dusk = window_progress(progress, 0.0, 0.5);
        set(graph, self.sky, |e| e.color = blend(&DUSK, &NIGHT, dusk));

        for (i, id) in self.lanterns.iter().enumerate() {
            let style = self.reveal.staggered_fade_in(progress, i, LANTERNS);
            set(graph, Some(*id), |e| {
                e.alpha = style.opacity;
                e.position = Point::new(16.0 + i as f64 * 32.0, 30.0 - style.translate_y * 0.25);
            });
        }

        let walk = Ease::InOutQuad.apply(window_progress(progress, 0.3, 0.9));
        set(graph, self.walker, |e| {
            e.position = blend(&Point::new(-6.0, 60.0), &Point::new(140.0, 60.0), walk);
        });
    }

    fn apply_ambient(&self, layer: &mut AmbientLayer<'_>, clock: &AmbientClock) {
        for (i, id) in self.lanterns.iter().enumerate() {
            let flicker = 1.0 + 0.12 * clock.wave(2.5, i as f64 * 1.3);
            layer.set_brightness(*id, flicker);
            layer.set_offset(*id, Vec2::new(0.0, 0.8 * clock.wave(0.4, i as f64)));
        }
    }
}

const FILES: usize = 4;

#[derive(Default)]
struct ArchiveDesk {
    reveal: RevealConfig,
    files: Vec<EntityId>,
    underline: Option<EntityId>,
    lamp: Option<EntityId>,
}

impl Scene for ArchiveDesk {
    fn name(&self) -> &str {
        "archive_desk"
    }

    fn description(&self) -> &str {
        "Four case files are laid out on an archive desk under a reading lamp. A single line in \
         the last file is underlined in red."
    }

    fn build(&mut self, graph: &mut SceneGraph) {
        graph.spawn(VisualEntity::new(rect(160.0, 90.0), Point::ZERO, WOOD));
        self.lamp = Some(graph.spawn(
            VisualEntity::new(Shape::Circle { radius: 30.0 }, Point::new(80.0, 40.0), LAMP)
                .with_z(1)
                .with_alpha(0.0),
        ));
        self.files = (0..FILES)
            .map(|i| {
                graph.spawn(
                    VisualEntity::new(rect(30.0, 40.0), Point::new(12.0 + i as f64 * 36.0, 24.0), PAPER)
                        .with_z(2)
                        .with_alpha(0.0),
                )
            })
            .collect();
        self.underline = Some(graph.spawn(
            VisualEntity::new(rect(0.0, 2.0), Point::new(122.0, 50.0), SIGNAL).with_z(3),
        ));
    }

    fn apply_progress(&self, graph: &mut SceneGraph, progress: f64) {
        let lamp = self.reveal.fade_in(progress, 0.0, 0.2);
        set(graph, self.lamp, |e| e.alpha = lamp.opacity * 0.35);

        for (i, id) in self.files.iter().enumerate() {
            let style = self.reveal.staggered_fade_in(progress, i, FILES);
            set(graph, Some(*id), |e| {
                e.alpha = style.opacity;
                e.position = Point::new(12.0 + i as f64 * 36.0, 24.0 + style.translate_y);
            });
        }

        let percent = self.reveal.line_draw(progress, 0.55, 0.85);
        set(graph, self.underline, |e| e.shape = rect(26.0 * percent / 100.0, 2.0));
    }

    fn apply_ambient(&self, layer: &mut AmbientLayer<'_>, clock: &AmbientClock) {
        if let Some(id) = self.lamp {
            layer.set_brightness(id, 1.0 + 0.05 * clock.wave(0.3, 0.0));
        }
    }
}

const POLES: usize = 3;
const PULSES: usize = 3;

#[derive(Default)]
struct TelegraphLine {
    reveal: RevealConfig,
    poles: Vec<EntityId>,
    wire: Option<EntityId>,
    pulses: Vec<EntityId>,
}

fn pole_x(i: usize) -> f64 {
    20.0 + i as f64 * 60.0
}

fn wire_path(percent: f64) -> BezPath {
    let start = Point::new(pole_x(0), 20.0);
    let end = Point::new(pole_x(POLES - 1), 20.0);
    let tip = blend(&start, &end, percent / 100.0);
    let mut path = BezPath::new();
    path.move_to(start);
    path.line_to(tip);
    path.line_to(tip + Vec2::new(0.0, 1.5));
    path.line_to(start + Vec2::new(0.0, 1.5));
    path.close_path();
    path
}

impl Scene for TelegraphLine {
    fn name(&self) -> &str {
        "telegraph_line"
    }

    fn description(&self) -> &str {
        "Three telegraph poles stand in an open field. A wire is strung between them and three \
         red signals race along it toward the far pole."
    }

    fn build(&mut self, graph: &mut SceneGraph) {
        graph.spawn(VisualEntity::new(rect(160.0, 90.0), Point::ZERO, NIGHT));
        self.poles = (0..POLES)
            .map(|i| {
                graph.spawn(
                    VisualEntity::new(rect(3.0, 60.0), Point::new(pole_x(i) - 1.5, 18.0), WOOD)
                        .with_z(1)
                        .with_alpha(0.0),
                )
            })
            .collect();
        self.wire = Some(graph.spawn(
            VisualEntity::new(Shape::Path(wire_path(0.0)), Point::ZERO, WIRE).with_z(2),
        ));
        self.pulses = (0..PULSES)
            .map(|_| {
                graph.spawn(
                    VisualEntity::new(Shape::Circle { radius: 2.0 }, Point::new(pole_x(0), 21.0), SIGNAL)
                        .with_z(3)
                        .with_alpha(0.0),
                )
            })
            .collect();
    }

    fn apply_progress(&self, graph: &mut SceneGraph, progress: f64) {
        for (i, id) in self.poles.iter().enumerate() {
            let style = self.reveal.staggered_fade_in(progress, i, POLES);
            set(graph, Some(*id), |e| e.alpha = style.opacity);
        }

        let percent = self.reveal.line_draw(progress, 0.35, 0.6);
        set(graph, self.wire, |e| e.shape = Shape::Path(wire_path(percent)));

        let start = Point::new(pole_x(0), 21.0);
        let end = Point::new(pole_x(POLES - 1), 21.0);
        for (i, id) in self.pulses.iter().enumerate() {
            let lead = i as f64 * 0.06;
            let t = window_progress(progress, 0.6 + lead, 0.88 + lead);
            set(graph, Some(*id), |e| {
                e.position = blend(&start, &end, t);
                e.alpha = if t > 0.0 && t < 1.0 { 1.0 } else { 0.0 };
            });
        }
    }

    fn apply_ambient(&self, layer: &mut AmbientLayer<'_>, clock: &AmbientClock) {
        if let Some(id) = self.wire {
            layer.set_offset(id, Vec2::new(0.0, 0.6 * clock.wave(0.5, 0.0)));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/library.rs"]
mod tests;
