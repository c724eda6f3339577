//! Keyed store of a product's variants.

use std::collections::HashMap;

use varsel_core::{Variant, VariantInput};

use crate::error::EngineError;
use crate::normalize::{join_key, normalize};

/// ID reported by [`VariantMatch::Undefined`].
pub const UNDEFINED_VARIANT_ID: &str = "undefined";

/// Result of a catalog lookup. `Undefined` means no variant exists for the
/// requested combination; it is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantMatch<'a> {
    Found(&'a Variant),
    Undefined,
}

impl<'a> VariantMatch<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        match self {
            VariantMatch::Found(variant) => variant.id(),
            VariantMatch::Undefined => UNDEFINED_VARIANT_ID,
        }
    }

    #[must_use]
    pub fn variant(self) -> Option<&'a Variant> {
        match self {
            VariantMatch::Found(variant) => Some(variant),
            VariantMatch::Undefined => None,
        }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, VariantMatch::Undefined)
    }
}

/// What [`VariantCatalog::insert`] did with a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { position: usize },
    /// Another variant already owns the key; the new one was dropped.
    Duplicate { key: String, existing_id: String },
}

/// A stored variant together with its normalized option values.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    key: String,
    normalized: Vec<String>,
    variant: Variant,
}

impl CatalogEntry {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Normalized option value for `group`.
    #[must_use]
    pub fn value(&self, group: usize) -> &str {
        &self.normalized[group]
    }

    #[must_use]
    pub fn normalized_values(&self) -> &[String] {
        &self.normalized
    }

    #[must_use]
    pub fn variant(&self) -> &Variant {
        &self.variant
    }
}

/// Variants keyed by their normalized option tuple, kept in insertion order.
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    group_count: usize,
    entries: Vec<CatalogEntry>,
    by_key: HashMap<String, usize>,
    default: Option<usize>,
}

impl VariantCatalog {
    #[must_use]
    pub fn new(group_count: usize) -> Self {
        Self {
            group_count,
            entries: Vec::new(),
            by_key: HashMap::new(),
            default: None,
        }
    }

    /// Inserts a variant unless its key is already taken.
    ///
    /// The default variant follows the first insertion and keeps moving to
    /// each new variant until one that is available arrives.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ArityMismatch`] if the variant's option count
    /// differs from the catalog's group count.
    pub fn insert(&mut self, input: VariantInput) -> Result<InsertOutcome, EngineError> {
        if input.option_values.len() != self.group_count {
            return Err(EngineError::ArityMismatch {
                variant_id: input.id,
                expected: self.group_count,
                found: input.option_values.len(),
            });
        }

        let normalized: Vec<String> = input.option_values.iter().map(|v| normalize(v)).collect();
        let key = join_key(&normalized);

        if let Some(&existing) = self.by_key.get(&key) {
            return Ok(InsertOutcome::Duplicate {
                key,
                existing_id: self.entries[existing].variant.id().to_string(),
            });
        }

        let position = self.entries.len();
        self.by_key.insert(key.clone(), position);
        self.entries.push(CatalogEntry {
            key,
            normalized,
            variant: Variant::new(input),
        });

        let replace_default = self
            .default
            .is_none_or(|idx| !self.entries[idx].variant.is_available());
        if replace_default {
            self.default = Some(position);
        }

        Ok(InsertOutcome::Inserted { position })
    }

    /// Looks up a variant by its normalized key.
    #[must_use]
    pub fn lookup(&self, key: &str) -> VariantMatch<'_> {
        self.by_key
            .get(key)
            .map_or(VariantMatch::Undefined, |&idx| {
                VariantMatch::Found(&self.entries[idx].variant)
            })
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Variant> {
        self.entries
            .iter()
            .map(|entry| &entry.variant)
            .find(|variant| variant.id() == id)
    }

    pub(crate) fn entry_by_id(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.variant.id() == id)
    }

    /// All variants in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Variant> {
        self.entries.iter().map(|entry| &entry.variant)
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn default_variant(&self) -> Option<&Variant> {
        self.default.map(|idx| &self.entries[idx].variant)
    }

    pub(crate) fn default_entry(&self) -> Option<&CatalogEntry> {
        self.default.map(|idx| &self.entries[idx])
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
