//! Option selection state and its validation

use serde::{Deserialize, Serialize};

use super::types::ValidationError;

/// A selectable option, identified by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl SelectorOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            image: None,
        }
    }
}

/// What a toggle did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
}

/// The options currently picked by the user.
///
/// In single-select mode at most one option is held; toggling the held option
/// again clears it. In multi-select mode toggling flips membership, and the
/// selection may temporarily exceed `max_selection`: [`Selection::validate`]
/// reports that instead of refusing the toggle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    pub multi_select: bool,
    pub max_selection: Option<usize>,
    selected: Vec<SelectorOption>,
}

impl Selection {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn multiple(max_selection: Option<usize>) -> Self {
        Self {
            multi_select: true,
            max_selection,
            selected: Vec::new(),
        }
    }

    pub fn selected(&self) -> &[SelectorOption] {
        &self.selected
    }

    pub fn is_selected(&self, option: &SelectorOption) -> bool {
        self.selected.iter().any(|s| s.id == option.id)
    }

    /// Toggles `option` and reports the change
    pub fn toggle(&mut self, option: &SelectorOption) -> SelectionChange {
        let was_selected = self.is_selected(option);

        if self.multi_select {
            if was_selected {
                self.selected.retain(|s| s.id != option.id);
                return SelectionChange::Deselected;
            }
            self.selected.push(option.clone());
            return SelectionChange::Selected;
        }

        if was_selected {
            self.selected.clear();
            SelectionChange::Deselected
        } else {
            self.selected = vec![option.clone()];
            SelectionChange::Selected
        }
    }

    /// Selects every offered option (only the first one in single-select mode)
    pub fn select_all(&mut self, options: &[SelectorOption]) {
        self.selected = if self.multi_select {
            options.to_vec()
        } else {
            options.iter().take(1).cloned().collect()
        };
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn are_all_selected(&self, options: &[SelectorOption]) -> bool {
        options.iter().all(|option| self.is_selected(option))
    }

    /// Drops selected options that are no longer offered
    pub fn retain_available(&mut self, options: &[SelectorOption]) {
        self.selected
            .retain(|s| options.iter().any(|option| option.id == s.id));
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.max_selection {
            Some(max_allowed) if self.multi_select && self.selected.len() > max_allowed => {
                Err(ValidationError::MaxSelection {
                    actual: self.selected.len(),
                    max_allowed,
                })
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SelectorOption> {
        vec![
            SelectorOption::new("red", "Red"),
            SelectorOption::new("green", "Green"),
            SelectorOption::new("blue", "Blue"),
        ]
    }

    #[test]
    fn test_single_select_replaces() {
        let opts = options();
        let mut selection = Selection::single();

        assert_eq!(selection.toggle(&opts[0]), SelectionChange::Selected);
        assert_eq!(selection.toggle(&opts[1]), SelectionChange::Selected);
        assert_eq!(selection.selected(), &opts[1..2]);

        assert_eq!(selection.toggle(&opts[1]), SelectionChange::Deselected);
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_multi_select_toggles_membership() {
        let opts = options();
        let mut selection = Selection::multiple(None);

        selection.toggle(&opts[0]);
        selection.toggle(&opts[2]);
        assert_eq!(selection.selected().len(), 2);

        assert_eq!(selection.toggle(&opts[0]), SelectionChange::Deselected);
        assert_eq!(selection.selected(), &opts[2..3]);
    }

    #[test]
    fn test_max_selection() {
        let opts = options();
        let mut selection = Selection::multiple(Some(2));

        selection.select_all(&opts);
        assert!(selection.are_all_selected(&opts));
        assert_eq!(
            selection.validate(),
            Err(ValidationError::MaxSelection {
                actual: 3,
                max_allowed: 2
            })
        );

        selection.toggle(&opts[0]);
        assert!(selection.validate().is_ok());

        selection.deselect_all();
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_single_select_all_takes_first() {
        let opts = options();
        let mut selection = Selection::single();
        selection.select_all(&opts);
        assert_eq!(selection.selected(), &opts[..1]);
        assert!(selection.validate().is_ok());
    }

    #[test]
    fn test_retain_available() {
        let opts = options();
        let mut selection = Selection::multiple(None);
        selection.select_all(&opts);

        selection.retain_available(&opts[1..]);
        let ids: Vec<_> = selection.selected().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["green", "blue"]);
    }
}
