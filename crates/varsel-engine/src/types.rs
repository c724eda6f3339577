//! Storefront product JSON as served by `/products/<handle>.json` and
//! `/products/<handle>.js`, bare or wrapped in `{"product": {...}}`.
//!
//! ## Observed shape
//!
//! ### Options
//! The `.json` endpoint returns `options` as objects
//! (`{"name": "Color", "position": 1, "values": [...]}`), while the `.js`
//! endpoint returns bare names (`["Color", "Size"]`). Both are accepted.
//!
//! ### Option values on variants
//! Carried as `option1`..`option3`; unused slots are `null`.
//!
//! ### `price` / `compare_at_price`
//! The `.json` endpoint sends decimal strings (`"19.99"`); the `.js` endpoint
//! sends integer cents (`1999`). `compare_at_price` is `null` when the variant
//! is not on sale; some stores send `""` instead, which is treated the same.
//!
//! ### `inventory_quantity`
//! Only present when the store exposes inventory. When it is missing, stock is
//! assumed to follow `available` (one unit when available, none otherwise).
//!
//! ### `featured_image`
//! `null` unless the variant has its own image.

use serde::Deserialize;

/// A single storefront product.
#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    /// Numeric product ID (e.g., `6789012345678`).
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub handle: Option<String>,

    /// Option axes in display order.
    #[serde(default)]
    pub options: Vec<ShopifyOption>,

    pub variants: Vec<ShopifyVariant>,
}

/// An option axis, in either of the two shapes the storefront uses.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ShopifyOption {
    Named {
        name: String,
        #[serde(default)]
        position: Option<i32>,
    },
    Plain(String),
}

impl ShopifyOption {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ShopifyOption::Named { name, .. } | ShopifyOption::Plain(name) => name,
        }
    }
}

/// A single purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    pub id: i64,

    /// Display title, e.g. `"Red / S"`.
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,

    pub price: RawPrice,

    #[serde(default)]
    pub compare_at_price: Option<RawPrice>,

    /// Defaults to `true` when absent (optimistic assumption).
    #[serde(default = "default_available")]
    pub available: bool,

    #[serde(default)]
    pub inventory_quantity: Option<i64>,

    #[serde(default)]
    pub featured_image: Option<ShopifyImage>,
}

impl ShopifyVariant {
    /// Non-null option values in slot order.
    #[must_use]
    pub fn option_values(&self) -> Vec<String> {
        [&self.option1, &self.option2, &self.option3]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

/// A price in either endpoint's encoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// Integer minor units (`2999` for 29.99).
    Cents(i64),
    /// Decimal string (`"29.99"`).
    Text(String),
}

#[derive(Debug, Deserialize)]
pub struct ShopifyImage {
    pub src: String,
}

fn default_available() -> bool {
    true
}
