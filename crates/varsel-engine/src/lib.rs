pub mod catalog;
pub mod error;
pub mod event;
pub mod feed;
pub mod lookup;
pub mod normalize;
pub mod options;
pub mod resolver;
pub mod selector;
pub mod types;

pub use catalog::{InsertOutcome, VariantCatalog, VariantMatch, UNDEFINED_VARIANT_ID};
pub use error::{EngineError, FeedError};
pub use event::{ChangeTrigger, VariantChange, VariantObserver};
pub use feed::{normalize_product, parse_product_json, ProductFeed};
pub use normalize::{normalize, variant_key};
pub use options::{OptionGroup, OptionModel, OptionValueState};
pub use resolver::{resolve_availability, ForcedSelection, ResolutionReport};
pub use selector::{LoadSummary, VariantSelector};
pub use types::{RawPrice, ShopifyImage, ShopifyOption, ShopifyProduct, ShopifyVariant};
