use std::collections::HashSet;

use crate::content::dataset::Dataset;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::library::SceneKind;

/// One chapter of the documentary: a heading plus an ordered run of blocks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Chapter {
    /// Anchor id.
    pub id: String,
    /// Display number ("Chapter 3").
    pub number: u32,
    /// Chapter title.
    pub title: String,
    /// Optional subtitle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Blocks in document order.
    pub blocks: Vec<BlockSpec>,
}

/// One scroll-tracked block.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlockSpec {
    /// Id, unique across the page.
    pub id: String,
    /// Laid-out height in px.
    pub height: f64,
    /// What the block shows.
    #[serde(flatten)]
    pub body: BlockBody,
}

/// Block payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockBody {
    /// Prose with a headline, staggered paragraphs and an optional divider rule.
    Narrative {
        /// Headline, if any.
        #[serde(default)]
        headline: Option<String>,
        /// Paragraphs in reading order.
        #[serde(default)]
        paragraphs: Vec<String>,
        /// Draw a divider rule under the text.
        #[serde(default)]
        divider: bool,
    },
    /// Animated scene from the built-in library.
    Scene {
        /// Which scene.
        scene: SceneKind,
    },
    /// Progressive reveal of a dataset.
    Infographic {
        /// Records to reveal.
        dataset: Dataset,
    },
}

impl BlockBody {
    /// Serialized type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Narrative { .. } => "narrative",
            Self::Scene { .. } => "scene",
            Self::Infographic { .. } => "infographic",
        }
    }
}

impl BlockSpec {
    /// Check the block and any embedded dataset.
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("block id must be non-empty"));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(ReelError::validation(format!(
                "block '{}' height must be finite and >= 0",
                self.id
            )));
        }
        if let BlockBody::Infographic { dataset } = &self.body {
            dataset.validate()?;
        }
        Ok(())
    }
}

impl Chapter {
    /// Check the chapter and all of its blocks.
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("chapter id must be non-empty"));
        }
        let mut seen = HashSet::new();
        for b in &self.blocks {
            b.validate()?;
            if !seen.insert(b.id.as_str()) {
                return Err(ReelError::validation(format!(
                    "chapter '{}' has duplicate block id '{}'",
                    self.id, b.id
                )));
            }
        }
        Ok(())
    }

    /// Sum of block heights.
    pub fn height(&self) -> f64 {
        self.blocks.iter().map(|b| b.height).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/chapter.rs"]
mod tests;
