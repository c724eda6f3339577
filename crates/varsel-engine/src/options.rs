//! Option groups, per-value UI state, and the selection derived from it.
//!
//! The selection is never stored on its own: the active value of a group is
//! read off the `hovered`/`selected` flags every time it is needed.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::EngineError;
use crate::normalize::join_key;

/// UI state of one option value. Plain data; the view renders it however it
/// likes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionValueState {
    /// First raw spelling seen for this value.
    pub label: String,
    pub selected: bool,
    pub hovered: bool,
    pub unavailable: bool,
    pub sold_out: bool,
}

impl OptionValueState {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            selected: false,
            hovered: false,
            unavailable: false,
            sold_out: false,
        }
    }

    /// Whether the view should leave this value's control enabled.
    #[must_use]
    pub fn is_selectable(&self, select_sold_out: bool) -> bool {
        !self.unavailable && (select_sold_out || !self.sold_out)
    }
}

/// One option axis, e.g. "Color". Values keep their first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct OptionGroup {
    name: String,
    values: IndexMap<String, OptionValueState>,
}

impl OptionGroup {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized values with their state, in first-seen order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &OptionValueState)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn value(&self, normalized: &str) -> Option<&OptionValueState> {
        self.values.get(normalized)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, state)| state.selected)
            .map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, state)| state.hovered)
            .map(|(k, _)| k.as_str())
    }

    /// The hovered value if any, else the selected one.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.hovered().or_else(|| self.selected())
    }

    /// First value, in insertion order, not flagged unavailable.
    #[must_use]
    pub fn first_available(&self) -> Option<&str> {
        self.values
            .iter()
            .find(|(_, state)| !state.unavailable)
            .map(|(k, _)| k.as_str())
    }

    pub(crate) fn register(&mut self, normalized: String, label: &str) {
        self.values
            .entry(normalized)
            .or_insert_with(|| OptionValueState::new(label));
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut OptionValueState> {
        self.values.values_mut()
    }

    pub(crate) fn value_mut(&mut self, normalized: &str) -> Option<&mut OptionValueState> {
        self.values.get_mut(normalized)
    }

    fn set_selected(&mut self, normalized: &str) {
        for (key, state) in &mut self.values {
            state.selected = key == normalized;
        }
    }

    fn set_hovered(&mut self, normalized: Option<&str>) {
        for (key, state) in &mut self.values {
            state.hovered = normalized == Some(key.as_str());
        }
    }
}

/// The ordered option groups of one product.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OptionModel {
    groups: Vec<OptionGroup>,
}

impl OptionModel {
    #[must_use]
    pub fn new<S: AsRef<str>>(group_names: &[S]) -> Self {
        Self {
            groups: group_names
                .iter()
                .map(|name| OptionGroup::new(name.as_ref()))
                .collect(),
        }
    }

    #[must_use]
    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, index: usize) -> Option<&OptionGroup> {
        self.groups.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn groups_mut(&mut self) -> &mut [OptionGroup] {
        &mut self.groups
    }

    /// Registers a value under `group`, starting out optimistically available.
    /// Values already present keep their state and label.
    pub(crate) fn register(&mut self, group: usize, normalized: String, label: &str) {
        if let Some(g) = self.groups.get_mut(group) {
            g.register(normalized, label);
        }
    }

    /// Marks `normalized` as the only selected value in `group`.
    ///
    /// # Errors
    ///
    /// Returns an error if the group or value does not exist; the model is
    /// left unchanged.
    pub fn select(&mut self, group: usize, normalized: &str) -> Result<(), EngineError> {
        self.group_with_value(group, normalized)?.set_selected(normalized);
        Ok(())
    }

    /// Marks `normalized` as the only hovered value in `group`. Selection is
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the group or value does not exist; the model is
    /// left unchanged.
    pub fn hover(&mut self, group: usize, normalized: &str) -> Result<(), EngineError> {
        self.group_with_value(group, normalized)?
            .set_hovered(Some(normalized));
        Ok(())
    }

    /// Clears the hover in `group`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownOptionGroup`] for an out-of-range index.
    pub fn unhover(&mut self, group: usize) -> Result<(), EngineError> {
        self.group_mut(group)?.set_hovered(None);
        Ok(())
    }

    /// Active value of every group, in group order.
    pub fn active_values(&self) -> impl Iterator<Item = Option<&str>> {
        self.groups.iter().map(OptionGroup::active)
    }

    /// Key of the active combination, or `None` while any group has no active
    /// value.
    #[must_use]
    pub fn current_key(&self) -> Option<String> {
        let active: Option<Vec<&str>> = self.active_values().collect();
        active.map(join_key)
    }

    /// Whether the view should hide `group` under a
    /// `hide_single_options_from_level` setting: the group is at or past the
    /// level and it and every later group offer a single value.
    #[must_use]
    pub fn is_group_hidden(&self, group: usize, hide_from_level: Option<usize>) -> bool {
        match hide_from_level {
            Some(level) if group >= level && group < self.groups.len() => {
                self.groups[group..].iter().all(|g| g.len() == 1)
            }
            _ => false,
        }
    }

    fn group_mut(&mut self, group: usize) -> Result<&mut OptionGroup, EngineError> {
        let count = self.groups.len();
        self.groups
            .get_mut(group)
            .ok_or(EngineError::UnknownOptionGroup {
                index: group,
                count,
            })
    }

    fn group_with_value(
        &mut self,
        group: usize,
        normalized: &str,
    ) -> Result<&mut OptionGroup, EngineError> {
        let g = self.group_mut(group)?;
        if g.values.contains_key(normalized) {
            Ok(g)
        } else {
            Err(EngineError::UnknownOptionValue {
                group,
                value: normalized.to_string(),
            })
        }
    }
}
