//! # scrollreel guide
//!
//! A walkthrough of how a scroll position becomes pixels and styles.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`PageSpec`](crate::PageSpec): chapters of blocks, each with a laid-out height
//! - [`ProgressTracker`](crate::ProgressTracker): `(progress, in_view)` for one block
//! - [`Section`](crate::Section): one tracker feeding one piece of [`SectionContent`](crate::SectionContent)
//! - [`RevealConfig`](crate::RevealConfig): the pure `progress → style` mappings
//! - [`SceneRenderer`](crate::SceneRenderer): lazily allocated drawing surface for one [`Scene`](crate::Scene)
//! - [`Infographic`](crate::Infographic): prefix reveal of a [`Dataset`](crate::Dataset) plus local selection
//! - [`Page`](crate::Page): headless host standing in for the browser
//!
//! ---
//!
//! ## Progress
//!
//! For a block whose top edge sits `top` px below the viewport's top edge:
//!
//! ```text
//! total_travel = viewport_height + element_height
//! traveled     = viewport_height - top
//! progress     = clamp(traveled / total_travel, 0, 1)
//! ```
//!
//! Progress is `0` when the block's top touches the viewport bottom and `1` when its bottom leaves
//! the viewport top. It is recomputed from geometry every time, never accumulated, so the value at a
//! scroll offset does not depend on how the reader got there.
//!
//! `in_view` is a separate signal delivered by intersection changes. When a block leaves the
//! viewport its progress keeps the last computed value.
//!
//! ```
//! use scrollreel::compute_progress;
//!
//! // 400px block whose top is at the viewport bottom of an 800px viewport.
//! assert_eq!(compute_progress(800.0, 800.0, 400.0), 0.0);
//! // Halfway through its travel.
//! assert_eq!(compute_progress(800.0, 200.0, 400.0), 0.5);
//! ```
//!
//! ---
//!
//! ## Frames
//!
//! Scroll and resize events only *request* a recomputation. At most one request per section is
//! pending; later requests merge into it. The host runs the pending request on its next animation
//! frame with [`Page::frame`](crate::Page::frame). Every request carries a
//! [`FrameToken`](crate::FrameToken); a token that is stale, or that fires after unmount, is a no-op.
//!
//! ---
//!
//! ## Mapping library
//!
//! ```
//! use scrollreel::{fade_in, line_draw, staggered_fade_in};
//!
//! let first = staggered_fade_in(0.3, 0, 3);
//! let last = staggered_fade_in(0.3, 2, 3);
//! assert!(first.opacity >= last.opacity);
//!
//! assert_eq!(fade_in(1.0, 0.0, 0.15).opacity, 1.0);
//! assert_eq!(line_draw(0.0, 0.05, 0.35), 0.0);
//! ```
//!
//! All mappings clamp their inputs (NaN and infinities included) and outputs, and use an ease curve
//! with `ease(0) = 0`, `ease(1) = 1` that never decreases.
//!
//! ---
//!
//! ## Scenes
//!
//! A [`Scene`](crate::Scene) builds its [`SceneGraph`](crate::SceneGraph) once and then writes
//! every progress-driven property in `apply_progress`, from `progress` alone. Idle motion goes
//! through `apply_ambient`, which only gets an [`AmbientLayer`](crate::AmbientLayer): it can sway
//! and flicker entities but cannot touch their position, color or alpha.
//!
//! The renderer allocates the surface when the scene enters the viewport and drops it when it
//! leaves. With reduced motion, or when the surface cannot be created, the scene reports a
//! [`SceneView::Fallback`](crate::SceneView::Fallback) with its static description instead.
//!
//! ---
//!
//! ## Putting it together
//!
//! ```
//! use std::rc::Rc;
//! use scrollreel::{
//!     ContentGate, CpuSurfaceFactory, MemorySessionStore, Page, PageOpts, PageSpec,
//! };
//!
//! let spec = PageSpec::from_json_str(r#"{
//!   "title": "Demo",
//!   "viewport_height": 800,
//!   "chapters": [ { "id": "c", "number": 1, "title": "One", "blocks": [
//!     { "id": "s", "type": "scene", "height": 800, "scene": "archive_desk" } ] } ]
//! }"#)?;
//!
//! let store = MemorySessionStore::new();
//! let mut gate = ContentGate::open(&store);
//! gate.dismiss(&store);
//! let token = gate.pass().expect("dismissed");
//!
//! let mut page = Page::mount(&spec, PageOpts::default(), token, Rc::new(CpuSurfaceFactory::default()))?;
//! assert_eq!(page.live_surfaces(), 1);
//! page.advance(0.5);
//! let snapshot = page.snapshot();
//! assert_eq!(snapshot.blocks.len(), 1);
//! # Ok::<(), scrollreel::ReelError>(())
//! ```
