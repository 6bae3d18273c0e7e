//! Chapter composition and the headless page host.
//!
//! [`Page`] plays the browser's part: it lays blocks out top to bottom, owns the scroll offset and
//! viewport, turns scroll/resize into coalesced frame requests, delivers intersection changes and
//! drives the ambient ticker.

use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;

use crate::config::PageOpts;
use crate::content::chapter::{BlockBody, Chapter};
use crate::content::gate::GateToken;
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{ReelError, ReelResult};
use crate::infographic::renderer::Infographic;
use crate::infographic::selection::Interaction;
use crate::narrative::NarrativeBlock;
use crate::scene::renderer::{SceneOpts, SceneRenderer};
use crate::scene::surface::SurfaceFactory;
use crate::section::{BlockView, Section, SectionContent};
use crate::tracking::progress::{Measurement, ScrollState};

/// A whole documentary page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageSpec {
    /// Page title.
    pub title: String,
    /// Initial viewport height in px.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f64,
    /// Chapters in document order.
    pub chapters: Vec<Chapter>,
}

fn default_viewport_height() -> f64 {
    800.0
}

impl PageSpec {
    /// Check the page, every chapter, and every embedded dataset.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.viewport_height.is_finite() || self.viewport_height <= 0.0 {
            return Err(ReelError::validation("viewport_height must be finite and > 0"));
        }
        let mut chapters = HashSet::new();
        let mut blocks = HashSet::new();
        for c in &self.chapters {
            c.validate()?;
            if !chapters.insert(c.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate chapter id '{}'",
                    c.id
                )));
            }
            for b in &c.blocks {
                if !blocks.insert(b.id.as_str()) {
                    return Err(ReelError::validation(format!(
                        "block id '{}' is used by more than one chapter",
                        b.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a page from JSON.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let spec: Self = serde_json::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Read, parse and validate a page file.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read page '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> usize {
        self.chapters.iter().map(|c| c.blocks.len()).sum()
    }
}

/// Section content of one laid-out block.
pub enum BlockContent {
    /// Narrative text.
    Narrative(NarrativeBlock),
    /// Animated scene.
    Scene(SceneRenderer),
    /// Dataset reveal.
    Infographic(Infographic),
}

impl BlockContent {
    fn build(body: &BlockBody, opts: &PageOpts, factory: &Rc<dyn SurfaceFactory>) -> Self {
        match body {
            BlockBody::Narrative {
                headline,
                paragraphs,
                divider,
            } => Self::Narrative(NarrativeBlock::new(
                headline.clone(),
                paragraphs.clone(),
                *divider,
                opts.reveal,
            )),
            BlockBody::Scene { scene } => Self::Scene(SceneRenderer::new(
                scene.instantiate(opts.reveal),
                Rc::clone(factory),
                SceneOpts {
                    reduced_motion: opts.reduced_motion,
                },
            )),
            BlockBody::Infographic { dataset } => {
                Self::Infographic(Infographic::new(dataset.clone(), opts.reveal))
            }
        }
    }

    fn inner(&self) -> &dyn SectionContent {
        match self {
            Self::Narrative(c) => c as &dyn SectionContent,
            Self::Scene(c) => c,
            Self::Infographic(c) => c,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SectionContent {
        match self {
            Self::Narrative(c) => c as &mut dyn SectionContent,
            Self::Scene(c) => c,
            Self::Infographic(c) => c,
        }
    }
}

impl SectionContent for BlockContent {
    fn update(&mut self, state: ScrollState) {
        self.inner_mut().update(state);
    }

    fn view(&self) -> BlockView {
        self.inner().view()
    }

    fn tick(&mut self, dt: f64) {
        self.inner_mut().tick(dt);
    }

    fn interact(&mut self, event: &Interaction) -> bool {
        self.inner_mut().interact(event)
    }

    fn teardown(&mut self) {
        self.inner_mut().teardown();
    }
}

struct LaidOutBlock {
    chapter: String,
    top: f64,
    height: f64,
    section: Section<BlockContent>,
}

/// Serializable state of one block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BlockSnapshot {
    /// Block id.
    pub id: String,
    /// Owning chapter id.
    pub chapter: String,
    /// Document offset of the block's top edge.
    pub top: f64,
    /// Block height.
    pub height: f64,
    /// Tracked progress.
    pub progress: f64,
    /// Tracked visibility.
    pub in_view: bool,
    /// Content render state.
    pub view: BlockView,
}

/// Serializable state of the whole page.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageSnapshot {
    /// Page title.
    pub title: String,
    /// Scroll offset.
    pub scroll_y: f64,
    /// Viewport height.
    pub viewport_height: f64,
    /// Document height.
    pub document_height: f64,
    /// Scenes currently holding a drawing surface.
    pub live_surfaces: usize,
    /// Blocks in document order.
    pub blocks: Vec<BlockSnapshot>,
}

/// Headless host for a mounted page.
pub struct Page {
    title: String,
    opts: PageOpts,
    viewport_height: f64,
    scroll_y: f64,
    document_height: f64,
    blocks: Vec<LaidOutBlock>,
    tick_debt: f64,
    mounted: bool,
}

impl Page {
    /// Lay out and mount every block. Needs a [`GateToken`]: nothing mounts before the content
    /// warning has been dismissed.
    #[tracing::instrument(skip_all, fields(title = %spec.title, blocks = spec.block_count()))]
    pub fn mount(
        spec: &PageSpec,
        opts: PageOpts,
        _gate: GateToken,
        factory: Rc<dyn SurfaceFactory>,
    ) -> ReelResult<Self> {
        spec.validate()?;
        opts.validate()?;

        let mut blocks = Vec::with_capacity(spec.block_count());
        let mut top = 0.0;
        for chapter in &spec.chapters {
            for b in &chapter.blocks {
                let content = BlockContent::build(&b.body, &opts, &factory);
                blocks.push(LaidOutBlock {
                    chapter: chapter.id.clone(),
                    top,
                    height: b.height,
                    section: Section::new(b.id.clone(), content),
                });
                top += b.height;
            }
        }

        let mut page = Self {
            title: spec.title.clone(),
            opts,
            viewport_height: spec.viewport_height,
            scroll_y: 0.0,
            document_height: top,
            blocks,
            tick_debt: 0.0,
            mounted: true,
        };
        for i in 0..page.blocks.len() {
            let m = page.measure(i);
            let block = &mut page.blocks[i];
            block.section.mount(&m);
            block.section.on_intersection(m.intersects());
        }
        tracing::debug!(
            document_height = page.document_height,
            live_surfaces = page.live_surfaces(),
            "page mounted"
        );
        Ok(page)
    }

    /// Page title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Options the page was mounted with.
    pub fn opts(&self) -> &PageOpts {
        &self.opts
    }

    /// Sum of block heights.
    pub fn document_height(&self) -> f64 {
        self.document_height
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Current scroll offset.
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Current viewport height.
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Whether the page is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Scroll to `y` (clamped to the document) and request a frame for every section. Returns the
    /// number of newly scheduled frames; requests merge into already-pending ones.
    pub fn scroll_to(&mut self, y: f64) -> usize {
        if !self.mounted {
            return 0;
        }
        self.scroll_y = if y.is_finite() {
            y.clamp(0.0, self.max_scroll())
        } else {
            0.0
        };
        self.request_frames()
    }

    /// Change the viewport height. Non-positive or non-finite heights are rejected.
    pub fn resize(&mut self, viewport_height: f64) -> ReelResult<usize> {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return Err(ReelError::validation("viewport height must be finite and > 0"));
        }
        if !self.mounted {
            return Ok(0);
        }
        self.viewport_height = viewport_height;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
        Ok(self.request_frames())
    }

    /// Run one animation frame: deliver intersection changes, then every pending recomputation.
    /// Returns the number of sections whose content was updated.
    #[tracing::instrument(skip(self), fields(scroll_y = self.scroll_y))]
    pub fn frame(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let mut updated = 0;
        for i in 0..self.blocks.len() {
            let m = self.measure(i);
            let section = &mut self.blocks[i].section;
            let mut changed = section.on_intersection(m.intersects());
            if let Some(token) = section.tracker().pending_frame() {
                changed |= section.run_frame(token, &m);
            }
            if changed {
                updated += 1;
            }
        }
        updated
    }

    /// Advance the ambient ticker by `elapsed` seconds, firing one tick per `1 / tick_hz` elapsed.
    /// Returns the number of ticks fired.
    ///
    /// At most one second of ticks (`tick_hz`) is caught up per call; any older backlog, such as the
    /// gap after a backgrounded tab resumes, is dropped.
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        if !self.mounted || !elapsed.is_finite() || elapsed <= 0.0 {
            return 0;
        }
        let dt = self.opts.tick_dt();
        let max_ticks = self.opts.tick_hz.max(1);
        self.tick_debt += elapsed;
        let mut fired = 0;
        while fired < max_ticks && self.tick_debt + 1e-9 >= dt {
            self.tick_debt -= dt;
            self.tick(dt);
            fired += 1;
        }
        if self.tick_debt + 1e-9 >= dt {
            tracing::debug!(
                backlog_s = self.tick_debt,
                fired,
                "ambient ticker fell behind; dropping backlog"
            );
            self.tick_debt %= dt;
        }
        self.tick_debt = self.tick_debt.max(0.0);
        fired
    }

    /// Deliver one ambient tick of `dt` seconds to every section.
    pub fn tick(&mut self, dt: f64) {
        if !self.mounted {
            return;
        }
        for b in &mut self.blocks {
            b.section.tick(dt);
        }
    }

    /// Route an interaction to block `block_id`. Unknown block ids are an error; interactions the
    /// block ignores return `false`.
    pub fn interact(&mut self, block_id: &str, event: &Interaction) -> ReelResult<bool> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.section.id() == block_id)
            .ok_or_else(|| ReelError::validation(format!("unknown block id '{block_id}'")))?;
        Ok(block.section.interact(event))
    }

    /// Tracked state of block `block_id`.
    pub fn section_state(&self, block_id: &str) -> Option<ScrollState> {
        self.block(block_id).map(|b| b.section.state())
    }

    /// Current view of block `block_id`.
    pub fn block_view(&self, block_id: &str) -> Option<BlockView> {
        self.block(block_id).map(|b| b.section.view())
    }

    /// Last frame drawn by scene block `block_id`, if it is live.
    pub fn scene_frame(&self, block_id: &str) -> Option<FrameRGBA> {
        match self.block(block_id)?.section.content() {
            BlockContent::Scene(r) => r.frame(),
            _ => None,
        }
    }

    /// Number of scenes currently holding a drawing surface.
    pub fn live_surfaces(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b.section.content(), BlockContent::Scene(r) if r.is_live()))
            .count()
    }

    /// Serializable state of the whole page.
    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            title: self.title.clone(),
            scroll_y: self.scroll_y,
            viewport_height: self.viewport_height,
            document_height: self.document_height,
            live_surfaces: self.live_surfaces(),
            blocks: self
                .blocks
                .iter()
                .map(|b| {
                    let state = b.section.state();
                    BlockSnapshot {
                        id: b.section.id().to_string(),
                        chapter: b.chapter.clone(),
                        top: b.top,
                        height: b.height,
                        progress: state.progress,
                        in_view: state.in_view,
                        view: b.section.view(),
                    }
                })
                .collect(),
        }
    }

    /// Tear every section down: pending frames are cancelled, surfaces released and the ticker
    /// stopped. Returns the number of cancelled frames. Later calls are no-ops.
    pub fn unmount(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        self.mounted = false;
        let cancelled = self
            .blocks
            .iter_mut()
            .filter_map(|b| b.section.unmount())
            .count();
        tracing::debug!(cancelled, "page unmounted");
        cancelled
    }

    fn block(&self, block_id: &str) -> Option<&LaidOutBlock> {
        self.blocks.iter().find(|b| b.section.id() == block_id)
    }

    fn measure(&self, i: usize) -> Measurement {
        let b = &self.blocks[i];
        Measurement {
            viewport_height: self.viewport_height,
            element_top: b.top - self.scroll_y,
            element_height: b.height,
        }
    }

    fn request_frames(&mut self) -> usize {
        self.blocks
            .iter_mut()
            .filter_map(|b| b.section.on_scroll())
            .count()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
