use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a product needs between 1 and {max} option groups, got {count}")]
    InvalidGroupCount { count: usize, max: usize },

    #[error("variant {variant_id} has {found} option values but the product declares {expected} groups")]
    ArityMismatch {
        variant_id: String,
        expected: usize,
        found: usize,
    },

    #[error("option group {index} does not exist (product has {count} groups)")]
    UnknownOptionGroup { index: usize, count: usize },

    #[error("option group {group} has no value \"{value}\"")]
    UnknownOptionValue { group: usize, value: String },

    #[error("variant {0} is not in the catalog")]
    UnknownVariant(String),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid price \"{value}\" on variant {variant_id}: {source}")]
    InvalidPrice {
        variant_id: String,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("product {product_id} has no variants")]
    NoVariants { product_id: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
