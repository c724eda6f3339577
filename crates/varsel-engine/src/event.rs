//! Notifications sent to the view layer after each interaction.

use serde::Serialize;
use varsel_core::Variant;

use crate::catalog::{VariantMatch, UNDEFINED_VARIANT_ID};
use crate::resolver::ForcedSelection;

/// The interaction that produced a [`VariantChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeTrigger {
    Select { group: usize, value: String },
    Hover { group: usize, value: String },
    Unhover { group: usize },
    SelectVariant { variant_id: String },
}

/// Resolved state after an interaction. `variant` is `None` when the active
/// combination matches no variant ("product unavailable").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantChange {
    pub trigger: ChangeTrigger,
    /// Active key, absent while some group has no active value.
    pub key: Option<String>,
    pub variant: Option<Variant>,
    pub on_sale: bool,
    pub sold_out: bool,
    pub unavailable: bool,
    /// Selections moved by conflict resolution during this interaction.
    pub forced: Vec<ForcedSelection>,
}

impl VariantChange {
    pub(crate) fn new(
        trigger: ChangeTrigger,
        key: Option<String>,
        matched: VariantMatch<'_>,
        forced: Vec<ForcedSelection>,
    ) -> Self {
        let variant = matched.variant();
        Self {
            trigger,
            key,
            on_sale: variant.is_some_and(Variant::is_on_sale),
            sold_out: variant.is_some_and(Variant::is_sold_out),
            unavailable: variant.is_some_and(Variant::is_unavailable),
            variant: variant.cloned(),
            forced,
        }
    }

    /// Variant ID, or `"undefined"` when nothing matched.
    #[must_use]
    pub fn variant_id(&self) -> &str {
        self.variant
            .as_ref()
            .map_or(UNDEFINED_VARIANT_ID, Variant::id)
    }

    /// `true` when the active combination has no catalog entry.
    #[must_use]
    pub fn is_product_unavailable(&self) -> bool {
        self.variant.is_none()
    }
}

/// Receives a [`VariantChange`] after every resolved interaction.
pub trait VariantObserver {
    fn variant_changed(&mut self, change: &VariantChange);
}

impl<F> VariantObserver for F
where
    F: FnMut(&VariantChange),
{
    fn variant_changed(&mut self, change: &VariantChange) {
        self(change);
    }
}
