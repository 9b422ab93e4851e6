//! Query Module
//!
//! Listing pipeline pieces that run before the store is touched: filter
//! normalization, cache key derivation and query construction.

mod builder;
mod filter;
mod key;


pub use builder::{listing_query, recent_query, TieBreak, DISTANCIA, FECHA};
pub use filter::{
    normalize, normalize_limit, FilterDescriptor, ALL_DISTANCES, DEFAULT_LIMIT, MAX_LIMIT,
    MINIMAL_DEFAULT_LIMIT,
};
pub use key::{estado_key, listing_key, valor_key, NO_DISTANCE, NO_SINCE};
