//! One variant picker widget: its catalog, its option model, and the
//! observers that render it.

use varsel_core::{SelectorConfig, Variant, VariantInput, MAX_OPTION_GROUPS};

use crate::catalog::{InsertOutcome, VariantCatalog, VariantMatch};
use crate::error::EngineError;
use crate::event::{ChangeTrigger, VariantChange, VariantObserver};
use crate::lookup;
use crate::normalize::normalize;
use crate::options::{OptionModel, OptionValueState};
use crate::resolver::resolve_availability;

/// Counts from a [`VariantSelector::load`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

/// Owns everything one widget instance needs. Nothing here is shared between
/// instances.
pub struct VariantSelector {
    config: SelectorConfig,
    catalog: VariantCatalog,
    options: OptionModel,
    cart_variant_id: Option<String>,
    observers: Vec<Box<dyn VariantObserver>>,
}

impl std::fmt::Debug for VariantSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantSelector")
            .field("config", &self.config)
            .field("catalog", &self.catalog)
            .field("options", &self.options)
            .field("cart_variant_id", &self.cart_variant_id)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl VariantSelector {
    /// Creates an empty selector for the given option group names.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidGroupCount`] unless there are one to three
    /// groups.
    pub fn new<S: AsRef<str>>(
        group_names: &[S],
        config: SelectorConfig,
    ) -> Result<Self, EngineError> {
        if group_names.is_empty() || group_names.len() > MAX_OPTION_GROUPS {
            return Err(EngineError::InvalidGroupCount {
                count: group_names.len(),
                max: MAX_OPTION_GROUPS,
            });
        }

        Ok(Self {
            config,
            catalog: VariantCatalog::new(group_names.len()),
            options: OptionModel::new(group_names),
            cart_variant_id: None,
            observers: Vec::new(),
        })
    }

    /// Creates a selector and loads `variants` into it. See [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid group count, or for a malformed variant
    /// when `reject_malformed_variants` is set.
    pub fn from_variants<S, I>(
        group_names: &[S],
        variants: I,
        config: SelectorConfig,
    ) -> Result<Self, EngineError>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = VariantInput>,
    {
        let mut selector = Self::new(group_names, config)?;
        selector.load(variants)?;
        Ok(selector)
    }

    /// Adds a single variant to the catalog and registers its option values.
    ///
    /// Returns `Ok(None)` when a malformed variant was skipped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ArityMismatch`] for a malformed variant when
    /// `reject_malformed_variants` is set.
    pub fn add_variant(
        &mut self,
        input: VariantInput,
    ) -> Result<Option<InsertOutcome>, EngineError> {
        let raw_values = input.option_values.clone();

        let outcome = match self.catalog.insert(input) {
            Ok(outcome) => outcome,
            Err(err @ EngineError::ArityMismatch { .. })
                if !self.config.reject_malformed_variants =>
            {
                tracing::warn!(error = %err, "skipping malformed variant");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        match &outcome {
            InsertOutcome::Inserted { .. } => {
                for (group, raw) in raw_values.iter().enumerate() {
                    self.options.register(group, normalize(raw), raw);
                }
            }
            InsertOutcome::Duplicate { key, existing_id } => {
                tracing::debug!(
                    key = %key,
                    existing_id = %existing_id,
                    "ignoring variant with duplicate key"
                );
            }
        }

        Ok(Some(outcome))
    }

    /// Loads a batch of variants, then commits the default variant's values
    /// and resolves availability. No observer is notified.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ArityMismatch`] for a malformed variant when
    /// `reject_malformed_variants` is set.
    pub fn load<I>(&mut self, variants: I) -> Result<LoadSummary, EngineError>
    where
        I: IntoIterator<Item = VariantInput>,
    {
        let mut summary = LoadSummary::default();
        for input in variants {
            match self.add_variant(input)? {
                Some(InsertOutcome::Inserted { .. }) => summary.inserted += 1,
                Some(InsertOutcome::Duplicate { .. }) => summary.duplicates += 1,
                None => summary.skipped += 1,
            }
        }

        if let Some(entry) = self.catalog.default_entry() {
            commit(&mut self.options, entry.normalized_values())?;
        }
        let report = resolve_availability(
            &self.catalog,
            &mut self.options,
            self.config.resolve_availability_conflict,
        );
        if let Some(id) = lookup::resolve(&self.catalog, &self.options)
            .variant()
            .map(Variant::id)
        {
            self.cart_variant_id = Some(id.to_string());
        }

        tracing::debug!(
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            skipped = summary.skipped,
            forced = report.forced.len(),
            default = self.cart_variant_id.as_deref().unwrap_or(""),
            "variant feed loaded"
        );

        Ok(summary)
    }

    /// Registers an observer notified after every resolved interaction.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: VariantObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Commits `value` in `group`. Accepts raw or normalized spelling.
    ///
    /// # Errors
    ///
    /// Returns an error if the group or value does not exist; nothing changes
    /// and no observer is notified.
    pub fn select(&mut self, group: usize, value: &str) -> Result<VariantChange, EngineError> {
        let normalized = normalize(value);
        self.options.select(group, &normalized)?;
        tracing::debug!(group, value = %normalized, "option selected");
        let resolve_conflicts = self.config.resolve_availability_conflict;
        Ok(self.refresh(
            ChangeTrigger::Select {
                group,
                value: normalized,
            },
            resolve_conflicts,
        ))
    }

    /// Previews `value` in `group` without committing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the group or value does not exist.
    pub fn hover(&mut self, group: usize, value: &str) -> Result<VariantChange, EngineError> {
        let normalized = normalize(value);
        self.options.hover(group, &normalized)?;
        tracing::debug!(group, value = %normalized, "option hovered");
        Ok(self.refresh(
            ChangeTrigger::Hover {
                group,
                value: normalized,
            },
            false,
        ))
    }

    /// Ends the preview in `group`, falling back to its committed value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownOptionGroup`] for an out-of-range index.
    pub fn unhover(&mut self, group: usize) -> Result<VariantChange, EngineError> {
        self.options.unhover(group)?;
        tracing::debug!(group, "option unhovered");
        Ok(self.refresh(ChangeTrigger::Unhover { group }, false))
    }

    /// Commits every group to the option values of the variant with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownVariant`] if no such variant is cataloged.
    pub fn select_variant(&mut self, id: &str) -> Result<VariantChange, EngineError> {
        let entry = self
            .catalog
            .entry_by_id(id)
            .ok_or_else(|| EngineError::UnknownVariant(id.to_string()))?;
        commit(&mut self.options, entry.normalized_values())?;
        let resolve_conflicts = self.config.resolve_availability_conflict;
        Ok(self.refresh(
            ChangeTrigger::SelectVariant {
                variant_id: id.to_string(),
            },
            resolve_conflicts,
        ))
    }

    /// Commits the default variant again. Returns `None` for an empty catalog.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::select_variant`].
    pub fn reset_to_default(&mut self) -> Result<Option<VariantChange>, EngineError> {
        let Some(id) = self.catalog.default_variant().map(|v| v.id().to_string()) else {
            return Ok(None);
        };
        self.select_variant(&id).map(Some)
    }

    /// Variant for the active combination, or the sentinel.
    #[must_use]
    pub fn current_variant(&self) -> VariantMatch<'_> {
        lookup::resolve(&self.catalog, &self.options)
    }

    /// ID of the last variant an interaction resolved to. A later miss does
    /// not clear it.
    #[must_use]
    pub fn cart_variant_id(&self) -> Option<&str> {
        self.cart_variant_id.as_deref()
    }

    #[must_use]
    pub fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn options(&self) -> &OptionModel {
        &self.options
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// State of a single option value; accepts raw or normalized spelling.
    #[must_use]
    pub fn value_state(&self, group: usize, value: &str) -> Option<&OptionValueState> {
        self.options.group(group)?.value(&normalize(value))
    }

    /// Whether the view should keep the control for this value enabled.
    #[must_use]
    pub fn is_selectable(&self, group: usize, value: &str) -> bool {
        self.value_state(group, value)
            .is_some_and(|state| state.is_selectable(self.config.select_sold_out))
    }

    /// Whether the view should hide `group` entirely.
    #[must_use]
    pub fn is_group_hidden(&self, group: usize) -> bool {
        self.options
            .is_group_hidden(group, self.config.hide_single_options_from_level)
    }

    /// Distinct image references in catalog order, for preloading.
    #[must_use]
    pub fn image_refs(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        for image in self.catalog.all().filter_map(Variant::image) {
            if !refs.contains(&image) {
                refs.push(image);
            }
        }
        refs
    }

    fn refresh(&mut self, trigger: ChangeTrigger, resolve_conflicts: bool) -> VariantChange {
        let report = resolve_availability(&self.catalog, &mut self.options, resolve_conflicts);
        let key = self.options.current_key();
        let matched = lookup::resolve(&self.catalog, &self.options);

        if let VariantMatch::Found(variant) = matched {
            self.cart_variant_id = Some(variant.id().to_string());
        }

        let change = VariantChange::new(trigger, key, matched, report.forced);
        tracing::debug!(
            variant_id = change.variant_id(),
            key = change.key.as_deref().unwrap_or(""),
            forced = change.forced.len(),
            "variant resolved"
        );

        for observer in &mut self.observers {
            observer.variant_changed(&change);
        }

        change
    }
}

/// Selects each of `values` in its group.
fn commit(options: &mut OptionModel, values: &[String]) -> Result<(), EngineError> {
    for (group, value) in values.iter().enumerate() {
        options.select(group, value)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
