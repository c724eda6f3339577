//! Conversion from storefront product JSON to selector input.
//!
//! Only structural mapping happens here; every decision about option values
//! (normalization, dedup, arity) is left to the selector.

use std::str::FromStr;

use rust_decimal::Decimal;
use varsel_core::{SelectorConfig, VariantInput};

use crate::error::FeedError;
use crate::selector::VariantSelector;
use crate::types::{RawPrice, ShopifyProduct, ShopifyVariant};

/// Everything a [`VariantSelector`] needs from one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFeed {
    pub product_id: String,
    pub title: String,
    pub option_names: Vec<String>,
    pub variants: Vec<VariantInput>,
}

impl ProductFeed {
    /// Builds a selector from this feed.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Engine`] if the selector rejects the group count or,
    /// in strict mode, a malformed variant.
    pub fn into_selector(self, config: SelectorConfig) -> Result<VariantSelector, FeedError> {
        Ok(VariantSelector::from_variants(
            &self.option_names,
            self.variants,
            config,
        )?)
    }
}

/// Parses product JSON, bare or wrapped in `{"product": ...}`, into a feed.
///
/// # Errors
///
/// Returns [`FeedError::Deserialize`] for malformed JSON or a product that
/// does not match the storefront shape, and the errors of
/// [`normalize_product`] otherwise.
pub fn parse_product_json(json: &str) -> Result<ProductFeed, FeedError> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).map_err(|source| FeedError::Deserialize {
            context: "product JSON".to_string(),
            source,
        })?;

    // Unwrap the envelope first so field errors point at the product itself.
    let product_value = if value.get("product").is_some_and(serde_json::Value::is_object) {
        value["product"].take()
    } else {
        value
    };

    let product: ShopifyProduct =
        serde_json::from_value(product_value).map_err(|source| FeedError::Deserialize {
            context: "product".to_string(),
            source,
        })?;
    normalize_product(product)
}

/// Converts a [`ShopifyProduct`] into a [`ProductFeed`].
///
/// # Errors
///
/// Returns [`FeedError::NoVariants`] for a product without variants and
/// [`FeedError::InvalidPrice`] for an unparseable price.
pub fn normalize_product(product: ShopifyProduct) -> Result<ProductFeed, FeedError> {
    let product_id = product.id.to_string();
    if product.variants.is_empty() {
        return Err(FeedError::NoVariants { product_id });
    }

    let option_names = product
        .options
        .iter()
        .map(|option| option.name().to_string())
        .collect();

    let variants = product
        .variants
        .into_iter()
        .map(normalize_variant)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProductFeed {
        product_id,
        title: product.title,
        option_names,
        variants,
    })
}

fn normalize_variant(variant: ShopifyVariant) -> Result<VariantInput, FeedError> {
    let id = variant.id.to_string();
    let price = parse_price(&id, &variant.price)?;

    // Empty compare-at strings mean "not on sale", same as null.
    let compare_at_price = match &variant.compare_at_price {
        None => None,
        Some(RawPrice::Text(text)) if text.trim().is_empty() => None,
        Some(raw) => Some(parse_price(&id, raw)?),
    };

    let inventory_quantity = variant
        .inventory_quantity
        .unwrap_or_else(|| i64::from(variant.available));

    Ok(VariantInput {
        option_values: variant.option_values(),
        image: variant.featured_image.map(|image| image.src),
        id,
        price,
        compare_at_price,
        inventory_quantity,
        available: variant.available,
    })
}

fn parse_price(variant_id: &str, raw: &RawPrice) -> Result<Decimal, FeedError> {
    match raw {
        RawPrice::Cents(cents) => Ok(Decimal::new(*cents, 2)),
        RawPrice::Text(text) => {
            Decimal::from_str(text.trim()).map_err(|source| FeedError::InvalidPrice {
                variant_id: variant_id.to_string(),
                value: text.clone(),
                source,
            })
        }
    }
}

#[cfg(test)]
#[path = "feed_test.rs"]
mod tests;
