//! Active variant derived from the current selection.

use crate::catalog::{VariantCatalog, VariantMatch};
use crate::options::OptionModel;

/// Resolves the active combination against the catalog.
///
/// Returns [`VariantMatch::Undefined`] while any group lacks an active value
/// or when no variant carries the active key.
#[must_use]
pub fn resolve<'a>(catalog: &'a VariantCatalog, options: &OptionModel) -> VariantMatch<'a> {
    match options.current_key() {
        Some(key) => catalog.lookup(&key),
        None => VariantMatch::Undefined,
    }
}
