//! Cache key derivation.
//!
//! Listing keys have four `_`-separated segments:
//! `ver_<distance>_<since>_<limit>`. Distance values are escaped so they can
//! never contain the separator, and present values carry a `name=` prefix so
//! they can never equal the `all`/`none` placeholders.

use chrono::SecondsFormat;

use super::FilterDescriptor;

/// Placeholder for "no distance filter".
pub const NO_DISTANCE: &str = "all";
/// Placeholder for "no lower time bound".
pub const NO_SINCE: &str = "none";

/// Key of a `GET /ver` result.
pub fn listing_key(filter: &FilterDescriptor) -> String {
    let distance = match &filter.distance_equals {
        Some(d) => format!("dist={}", escape(d)),
        None => NO_DISTANCE.to_string(),
    };
    let since = match &filter.since {
        Some(ts) => format!("since={}", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => NO_SINCE.to_string(),
    };

    format!("ver_{}_{}_{}", distance, since, filter.limit)
}

/// Key of a `GET /valor` result.
pub fn valor_key(limit: usize) -> String {
    format!("valor_{}", limit)
}

/// Key of a `GET /estado` result.
pub fn estado_key(limit: usize) -> String {
    format!("estado_{}", limit)
}

fn escape(value: &str) -> String {
    value.replace('%', "%25").replace('_', "%5F")
}
