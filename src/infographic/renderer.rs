use crate::animation::reveal::{RevealConfig, RevealStyle};
use crate::content::dataset::{Dataset, Significance};
use crate::foundation::math::clamp_unit;
use crate::infographic::selection::{Interaction, Selection};
use crate::section::{BlockView, SectionContent};
use crate::tracking::progress::ScrollState;

/// Number of revealed items: `ceil(progress * total * reveal_factor)` clamped to `total`, or `0`
/// while out of view.
///
/// The reveal factor makes the whole set visible before the block has scrolled all the way
/// through. Non-finite or sub-1 factors are treated as `1`.
pub fn visible_count(progress: f64, total: usize, reveal_factor: f64, in_view: bool) -> usize {
    if !in_view || total == 0 {
        return 0;
    }
    let factor = if reveal_factor.is_finite() {
        reveal_factor.max(1.0)
    } else {
        1.0
    };
    let raw = (clamp_unit(progress) * total as f64 * factor).ceil();
    (raw as usize).min(total)
}

/// Render state of one infographic item.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ItemView {
    /// Record id.
    pub id: String,
    /// Record kind tag.
    pub kind: &'static str,
    /// Record title.
    pub title: String,
    /// Record significance.
    pub significance: Significance,
    /// Whether the item has been revealed.
    pub revealed: bool,
    /// Reveal style.
    pub style: RevealStyle,
    /// Whether the item is expanded.
    pub expanded: bool,
    /// Whether the item was clicked last.
    pub active: bool,
    /// Whether the pointer is over the item.
    pub hovered: bool,
    /// Description, present only while expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Render state of an infographic block.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct InfographicView {
    /// Dataset id.
    pub dataset_id: String,
    /// Dataset title.
    pub title: String,
    /// Revealed item count.
    pub visible_count: usize,
    /// Total item count.
    pub total: usize,
    /// Items in reveal order.
    pub items: Vec<ItemView>,
}

/// Dataset revealed item by item as its block scrolls past, with click/hover selection on top.
#[derive(Clone, Debug)]
pub struct Infographic {
    dataset: Dataset,
    reveal: RevealConfig,
    state: ScrollState,
    selection: Selection,
}

impl Infographic {
    /// Wrap a validated dataset.
    pub fn new(dataset: Dataset, reveal: RevealConfig) -> Self {
        Self {
            dataset,
            reveal,
            state: ScrollState::default(),
            selection: Selection::default(),
        }
    }

    /// Current reveal count.
    pub fn visible_count(&self) -> usize {
        visible_count(
            self.state.progress,
            self.dataset.len(),
            self.reveal.reveal_factor,
            self.state.in_view,
        )
    }

    /// Local selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Apply a user interaction. Unknown ids are ignored.
    pub fn interact(&mut self, event: &Interaction) -> bool {
        let dataset = &self.dataset;
        self.selection
            .apply(event, |id| dataset.get(id).is_some())
    }

    /// Current render state.
    pub fn infographic_view(&self) -> InfographicView {
        let visible = self.visible_count();
        let hidden = RevealStyle::hidden(self.reveal.stagger_offset_px);
        let items = self
            .dataset
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let meta = r.meta();
                let revealed = i < visible;
                let expanded = self.selection.is_expanded(&meta.id);
                ItemView {
                    id: meta.id.clone(),
                    kind: r.kind(),
                    title: meta.title.clone(),
                    significance: meta.significance,
                    revealed,
                    style: if revealed { RevealStyle::SHOWN } else { hidden },
                    expanded,
                    active: self.selection.is_active(&meta.id),
                    hovered: self.selection.is_hovered(&meta.id),
                    detail: expanded.then(|| meta.description.clone()),
                }
            })
            .collect();
        InfographicView {
            dataset_id: self.dataset.id.clone(),
            title: self.dataset.title.clone(),
            visible_count: visible,
            total: self.dataset.len(),
            items,
        }
    }
}

impl SectionContent for Infographic {
    fn update(&mut self, state: ScrollState) {
        self.state = state;
    }

    fn view(&self) -> BlockView {
        BlockView::Infographic(self.infographic_view())
    }

    fn interact(&mut self, event: &Interaction) -> bool {
        Infographic::interact(self, event)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/infographic/renderer.rs"]
mod tests;
