/// User interaction with an infographic item.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// Click on an item: toggles its expansion and makes it active.
    Click {
        /// Record id.
        id: String,
    },
    /// Pointer moved onto an item (`Some`) or off all items (`None`).
    Hover {
        /// Record id under the pointer.
        #[serde(default)]
        id: Option<String>,
    },
    /// Close the expanded item and clear the active one.
    Dismiss,
}

/// Local selection state of one infographic.
///
/// Not derived from scroll progress: it survives every progress update and is only changed by
/// [`Interaction`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Selection {
    /// Expanded item.
    pub expanded: Option<String>,
    /// Last clicked item.
    pub active: Option<String>,
    /// Item under the pointer.
    pub hovered: Option<String>,
}

impl Selection {
    /// Apply `event`; ids for which `known` is false are ignored. Returns `true` on change.
    pub fn apply(&mut self, event: &Interaction, known: impl Fn(&str) -> bool) -> bool {
        let before = self.clone();
        match event {
            Interaction::Click { id } => {
                if !known(id) {
                    return false;
                }
                if self.expanded.as_deref() == Some(id.as_str()) {
                    self.expanded = None;
                } else {
                    self.expanded = Some(id.clone());
                }
                self.active = Some(id.clone());
            }
            Interaction::Hover { id: Some(id) } => {
                if !known(id) {
                    return false;
                }
                self.hovered = Some(id.clone());
            }
            Interaction::Hover { id: None } => self.hovered = None,
            Interaction::Dismiss => {
                self.expanded = None;
                self.active = None;
            }
        }
        *self != before
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.as_deref() == Some(id)
    }

    /// Whether `id` is active.
    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Whether `id` is hovered.
    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.as_deref() == Some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/infographic/selection.rs"]
mod tests;
