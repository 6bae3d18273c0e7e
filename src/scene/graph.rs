//! Per-scene retained shape graph.
//!
//! Each live scene owns exactly one [`SceneGraph`]; it is built when the scene enters the viewport
//! and dropped, with all its entities, when the scene leaves. Entities are addressed by
//! [`EntityId`]s handed out at build time.

use crate::foundation::core::{BezPath, Point, Rgba8, Vec2};

/// Index of an entity inside its scene graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct EntityId(u32);

/// Geometry of an entity, in scene-local px with the origin at the entity position.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle anchored at its top-left corner.
    Rect {
        /// Width in px.
        width: f64,
        /// Height in px.
        height: f64,
    },
    /// Circle centered on the entity position.
    Circle {
        /// Radius in px.
        radius: f64,
    },
    /// Arbitrary filled path.
    Path(BezPath),
}

/// Ambient-only channel: written by the idle clock, never by progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientState {
    /// Extra displacement added at draw time.
    pub offset: Vec2,
    /// Color multiplier applied at draw time.
    pub brightness: f64,
}

impl Default for AmbientState {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            brightness: 1.0,
        }
    }
}

/// A shape with position, color and alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualEntity {
    /// Geometry.
    pub shape: Shape,
    /// Scene-local position.
    pub position: Point,
    /// Fill color.
    pub color: Rgba8,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Draw order; higher draws later.
    pub z: i32,
    ambient: AmbientState,
}

impl VisualEntity {
    /// Entity at `position` with full alpha and `z = 0`.
    pub fn new(shape: Shape, position: Point, color: Rgba8) -> Self {
        Self {
            shape,
            position,
            color,
            alpha: 1.0,
            z: 0,
            ambient: AmbientState::default(),
        }
    }

    /// Builder-style draw order.
    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    /// Builder-style alpha.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Ambient channel state.
    pub fn ambient(&self) -> AmbientState {
        self.ambient
    }

    /// Position including the ambient offset, snapped to whole pixels.
    pub fn draw_position(&self) -> Point {
        let p = self.position + self.ambient.offset;
        Point::new(p.x.round(), p.y.round())
    }

    /// Color including ambient brightness.
    pub fn draw_color(&self) -> Rgba8 {
        self.color.brightened(self.ambient.brightness)
    }
}

/// Arena of visual entities owned by one scene.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    entities: Vec<VisualEntity>,
}

impl SceneGraph {
    /// Empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its id.
    pub fn spawn(&mut self, entity: VisualEntity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(entity);
        id
    }

    /// Entity by id.
    pub fn get(&self, id: EntityId) -> Option<&VisualEntity> {
        self.entities.get(id.0 as usize)
    }

    /// Mutable entity by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut VisualEntity> {
        self.entities.get_mut(id.0 as usize)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// `true` when no entity was spawned.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities in draw order (by `z`, then spawn order).
    pub fn draw_order(&self) -> Vec<&VisualEntity> {
        let mut out: Vec<&VisualEntity> = self.entities.iter().collect();
        out.sort_by_key(|e| e.z);
        out
    }

    fn ambient_mut(&mut self, id: EntityId) -> Option<&mut AmbientState> {
        self.entities.get_mut(id.0 as usize).map(|e| &mut e.ambient)
    }
}

/// Write access to the ambient channel only.
///
/// Handed to idle animation so it can sway and flicker entities without touching anything the
/// progress mapping owns (position, color, alpha).
pub struct AmbientLayer<'a> {
    graph: &'a mut SceneGraph,
}

impl<'a> AmbientLayer<'a> {
    pub(crate) fn new(graph: &'a mut SceneGraph) -> Self {
        Self { graph }
    }

    /// Set the ambient displacement of `id`.
    pub fn set_offset(&mut self, id: EntityId, offset: Vec2) {
        if let Some(a) = self.graph.ambient_mut(id) {
            a.offset = if offset.x.is_finite() && offset.y.is_finite() {
                offset
            } else {
                Vec2::ZERO
            };
        }
    }

    /// Set the ambient brightness multiplier of `id`.
    pub fn set_brightness(&mut self, id: EntityId, brightness: f64) {
        if let Some(a) = self.graph.ambient_mut(id) {
            a.brightness = if brightness.is_finite() {
                brightness.max(0.0)
            } else {
                1.0
            };
        }
    }
}

/// Idle animation clock, advanced by the ticker and independent of scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AmbientClock {
    /// Seconds accumulated since the scene went live.
    pub elapsed: f64,
    /// Ticks since the scene went live.
    pub ticks: u64,
}

impl AmbientClock {
    /// Advance by `dt` seconds; non-finite or negative steps only count as a tick.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.ticks = self.ticks.saturating_add(1);
    }

    /// `sin(2π · hz · elapsed + phase)`.
    pub fn wave(&self, hz: f64, phase: f64) -> f64 {
        (std::f64::consts::TAU * hz * self.elapsed + phase).sin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
