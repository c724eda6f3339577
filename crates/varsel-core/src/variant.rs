use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw variant record as supplied by the product feed, before any derived
/// commerce flags are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantInput {
    /// Storefront variant ID, kept as a string to avoid precision loss.
    pub id: String,
    /// Raw option values in option-group order, e.g. `["Red", "S"]`.
    pub option_values: Vec<String>,
    pub price: Decimal,
    /// Pre-sale comparison price, if set.
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub inventory_quantity: i64,
    pub available: bool,
    /// Opaque image reference (usually a CDN URL); never rewritten here.
    #[serde(default)]
    pub image: Option<String>,
}

/// A catalog variant with its commerce flags derived once at construction.
///
/// Variants are immutable: the fields are private and only exposed through
/// accessors, so the derived flags can never drift from the inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    id: String,
    option_values: Vec<String>,
    price: Decimal,
    compare_at_price: Option<Decimal>,
    inventory_quantity: i64,
    available: bool,
    image: Option<String>,
    on_sale: bool,
    sold_out: bool,
    unavailable: bool,
}

impl Variant {
    #[must_use]
    pub fn new(input: VariantInput) -> Self {
        let on_sale = input
            .compare_at_price
            .is_some_and(|compare_at| input.price < compare_at);
        let out_of_stock = input.inventory_quantity < 1;

        Self {
            sold_out: out_of_stock && input.available,
            unavailable: out_of_stock && !input.available,
            on_sale,
            id: input.id,
            option_values: input.option_values,
            price: input.price,
            compare_at_price: input.compare_at_price,
            inventory_quantity: input.inventory_quantity,
            available: input.available,
            image: input.image,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn option_values(&self) -> &[String] {
        &self.option_values
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn compare_at_price(&self) -> Option<Decimal> {
        self.compare_at_price
    }

    #[must_use]
    pub fn inventory_quantity(&self) -> i64 {
        self.inventory_quantity
    }

    /// Whether the storefront accepts orders for this variant at all.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.available
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// `true` when a compare-at price exists and is above the current price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.on_sale
    }

    /// Out of stock but still orderable (e.g. backorders allowed).
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.sold_out
    }

    /// Out of stock and not orderable.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.unavailable
    }
}

impl From<VariantInput> for Variant {
    fn from(input: VariantInput) -> Self {
        Self::new(input)
    }
}
