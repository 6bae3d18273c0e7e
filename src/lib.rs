//! scrollreel is a headless engine for scroll-driven documentary pages.
//!
//! It turns raw scroll geometry into a bounded progress value per tracked region, and maps that
//! progress into render state through pure functions. Reversing the scroll always lands on the
//! same state a direct scroll would produce.
//!
//! - Describe a page as [`PageSpec`] (chapters of narrative, scene and infographic blocks)
//! - Pass the content warning with a [`ContentGate`] to obtain a [`GateToken`]
//! - Mount a [`Page`], drive it with `scroll_to` / `frame` / `advance`, read [`PageSnapshot`]s
//!
//! The browser is reached only through small traits ([`ElementProbe`], [`SurfaceFactory`],
//! [`SessionStore`]); [`Page`] is a headless host implementing the browser's side.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod config;
mod content;
mod foundation;
mod infographic;
mod narrative;
mod page;
mod scene;
mod section;
mod tracking;

/// End-to-end walkthrough of the engine.
pub mod guide;

pub use crate::foundation::core::{Affine, BezPath, FrameRGBA, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::lerp::{Lerp, blend};
pub use crate::animation::reveal::{
    RevealConfig, RevealStyle, fade_in, line_draw, staggered_fade_in, window_progress,
};
pub use crate::config::{ENV_REDUCED_MOTION, ENV_TICK_HZ, PageOpts};
pub use crate::content::chapter::{BlockBody, BlockSpec, Chapter};
pub use crate::content::dataset::{Dataset, InquiryStatus, Record, RecordMeta, Significance, Source};
pub use crate::content::gate::{
    CONTENT_WARNING_KEY, ContentGate, GateToken, MemorySessionStore, SessionStore,
};
pub use crate::infographic::renderer::{Infographic, InfographicView, ItemView, visible_count};
pub use crate::infographic::selection::{Interaction, Selection};
pub use crate::narrative::{NarrativeBlock, NarrativeView, TextView};
pub use crate::page::{BlockContent, BlockSnapshot, Page, PageSnapshot, PageSpec};
pub use crate::scene::graph::{
    AmbientClock, AmbientLayer, AmbientState, EntityId, SceneGraph, Shape, VisualEntity,
};
pub use crate::scene::library::SceneKind;
pub use crate::scene::renderer::{
    DEFAULT_RESOLUTION, FallbackReason, Scene, SceneOpts, SceneRenderer, SceneStats, SceneView,
};
pub use crate::scene::surface::{CpuSurfaceFactory, DrawingSurface, SurfaceFactory};
pub use crate::section::{BlockView, Section, SectionContent};
pub use crate::tracking::frame::{CoalesceStats, FrameCoalescer, FrameToken};
pub use crate::tracking::progress::{Measurement, ScrollState, compute_progress};
pub use crate::tracking::tracker::{ElementProbe, ProgressTracker};
