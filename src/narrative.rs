use crate::animation::reveal::{RevealConfig, RevealStyle};
use crate::section::{BlockView, SectionContent};
use crate::tracking::progress::ScrollState;

const HEADLINE_WINDOW: (f64, f64) = (0.0, 0.15);
const DIVIDER_WINDOW: (f64, f64) = (0.05, 0.35);

/// A line of narrative text with its reveal style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextView {
    /// The text.
    pub text: String,
    /// Current reveal style.
    pub style: RevealStyle,
}

/// Render state of a narrative block.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct NarrativeView {
    /// Headline, fading in over the start of the journey.
    pub headline: Option<TextView>,
    /// Paragraphs, cascading in one after another.
    pub paragraphs: Vec<TextView>,
    /// Divider stroke reveal, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider_percent: Option<f64>,
}

/// Headline + paragraphs + optional divider, revealed by scroll progress.
#[derive(Clone, Debug)]
pub struct NarrativeBlock {
    headline: Option<String>,
    paragraphs: Vec<String>,
    divider: bool,
    reveal: RevealConfig,
    state: ScrollState,
}

impl NarrativeBlock {
    /// Build a narrative block.
    pub fn new(
        headline: Option<String>,
        paragraphs: Vec<String>,
        divider: bool,
        reveal: RevealConfig,
    ) -> Self {
        Self {
            headline,
            paragraphs,
            divider,
            reveal,
            state: ScrollState::default(),
        }
    }

    /// View at an explicit progress, independent of the last update.
    pub fn view_at(&self, progress: f64) -> NarrativeView {
        let total = self.paragraphs.len();
        NarrativeView {
            headline: self.headline.as_ref().map(|text| TextView {
                text: text.clone(),
                style: self
                    .reveal
                    .fade_in(progress, HEADLINE_WINDOW.0, HEADLINE_WINDOW.1),
            }),
            paragraphs: self
                .paragraphs
                .iter()
                .enumerate()
                .map(|(i, text)| TextView {
                    text: text.clone(),
                    style: self.reveal.staggered_fade_in(progress, i, total),
                })
                .collect(),
            divider_percent: self
                .divider
                .then(|| self.reveal.line_draw(progress, DIVIDER_WINDOW.0, DIVIDER_WINDOW.1)),
        }
    }
}

impl SectionContent for NarrativeBlock {
    fn update(&mut self, state: ScrollState) {
        self.state = state;
    }

    fn view(&self) -> BlockView {
        BlockView::Narrative(self.view_at(self.state.progress))
    }
}

#[cfg(test)]
#[path = "../tests/unit/narrative.rs"]
mod tests;
