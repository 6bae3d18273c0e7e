use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};

/// Source citation attached to a record.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Source {
    /// Human-readable citation.
    pub label: String,
    /// Optional link to the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// How much a record matters to the story.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    /// Background detail.
    Low,
    /// Default weight.
    #[default]
    Medium,
    /// Key fact.
    High,
    /// Turning point.
    Critical,
}

/// State of an open line of inquiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    /// Still being pursued.
    Open,
    /// Conflicting accounts.
    Disputed,
    /// Settled.
    Resolved,
}

/// Fields shared by every record type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecordMeta {
    /// Stable identifier, unique within its dataset.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Body text shown when the item is expanded.
    #[serde(default)]
    pub description: String,
    /// Citation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Weight of the record.
    #[serde(default)]
    pub significance: Significance,
    /// Ids of related records in the same dataset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

/// One static dataset record.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    /// Dated entry on a timeline.
    TimelineEvent {
        /// Common fields.
        #[serde(flatten)]
        meta: RecordMeta,
        /// Free-form date label ("1911-03-04", "spring 1911").
        date: String,
    },
    /// Witness statement.
    Testimony {
        /// Common fields.
        #[serde(flatten)]
        meta: RecordMeta,
        /// Who gave the statement.
        witness: String,
        /// The witness' role in events.
        #[serde(default)]
        role: String,
    },
    /// Open question and where it stands.
    Investigation {
        /// Common fields.
        #[serde(flatten)]
        meta: RecordMeta,
        /// Current status.
        status: InquiryStatus,
    },
    /// Link between two other records.
    Relationship {
        /// Common fields.
        #[serde(flatten)]
        meta: RecordMeta,
        /// Source record id.
        from: String,
        /// Target record id.
        to: String,
        /// Nature of the link.
        label: String,
    },
}

impl Record {
    /// Shared fields.
    pub fn meta(&self) -> &RecordMeta {
        match self {
            Self::TimelineEvent { meta, .. }
            | Self::Testimony { meta, .. }
            | Self::Investigation { meta, .. }
            | Self::Relationship { meta, .. } => meta,
        }
    }

    /// Record id.
    pub fn id(&self) -> &str {
        &self.meta().id
    }

    /// Serialized kind tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TimelineEvent { .. } => "timeline_event",
            Self::Testimony { .. } => "testimony",
            Self::Investigation { .. } => "investigation",
            Self::Relationship { .. } => "relationship",
        }
    }

    /// Every record id this record points at.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        let endpoints = match self {
            Self::Relationship { from, to, .. } => [Some(from.as_str()), Some(to.as_str())],
            _ => [None, None],
        };
        self.meta()
            .references
            .iter()
            .map(String::as_str)
            .chain(endpoints.into_iter().flatten())
    }
}

/// Ordered, immutable collection of records backing one infographic.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    /// Dataset id.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Records in reveal order.
    pub records: Vec<Record>,
}

impl Dataset {
    /// Check ids and cross-references.
    #[tracing::instrument(skip(self), fields(dataset = %self.id, records = self.records.len()))]
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::content("dataset id must be non-empty"));
        }

        let mut seen = HashSet::with_capacity(self.records.len());
        for r in &self.records {
            if r.id().trim().is_empty() {
                return Err(ReelError::content(format!(
                    "dataset '{}' has a {} record with an empty id",
                    self.id,
                    r.kind()
                )));
            }
            if !seen.insert(r.id()) {
                return Err(ReelError::content(format!(
                    "dataset '{}' has duplicate record id '{}'",
                    self.id,
                    r.id()
                )));
            }
        }

        for r in &self.records {
            for target in r.links() {
                if !seen.contains(target) {
                    return Err(ReelError::content(format!(
                        "record '{}' in dataset '{}' references unknown id '{}'",
                        r.id(),
                        self.id,
                        target
                    )));
                }
                if target == r.id() {
                    return Err(ReelError::content(format!(
                        "record '{}' references itself",
                        r.id()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Parse and validate a dataset from JSON.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let ds: Self = serde_json::from_str(s)?;
        ds.validate()?;
        Ok(ds)
    }

    /// Read, parse and validate a dataset file.
    pub fn load(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Record by id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Position of record `id` in reveal order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/dataset.rs"]
mod tests;
