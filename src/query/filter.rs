//! Filter normalization for the listing endpoints.
//!
//! Turns raw query-string parameters into a [`FilterDescriptor`]. Pure: no
//! I/O, no clock.

use std::num::IntErrorKind;

use chrono::{DateTime, Utc};

use crate::error::{ApiError, Result};
use crate::models::{parse_instant, ListingParams};

// == Limits ==
/// Row cap used when `limit` is absent or unusable
pub const DEFAULT_LIMIT: usize = 100;
/// Row cap used by `GET /valor/min` when `limit` is absent or unusable
pub const MINIMAL_DEFAULT_LIMIT: usize = 50;
/// Upper bound on any row cap
pub const MAX_LIMIT: usize = 1000;

/// `distancia` value meaning "every distance".
pub const ALL_DISTANCES: &str = "Todos";

// == Filter Descriptor ==
/// Normalized, validated listing request.
///
/// `limit` is always within `1..=MAX_LIMIT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDescriptor {
    /// Exact distance to match; `None` lists every distance
    pub distance_equals: Option<String>,
    /// Only readings at or after this instant
    pub since: Option<DateTime<Utc>>,
    /// Row cap
    pub limit: usize,
}

impl Default for FilterDescriptor {
    fn default() -> Self {
        Self {
            distance_equals: None,
            since: None,
            limit: DEFAULT_LIMIT,
        }
    }
}

// == Normalize ==
/// Normalizes the raw `GET /ver` parameters.
///
/// Fails only on a `desde` that is present but not an RFC 3339 instant.
pub fn normalize(params: &ListingParams) -> Result<FilterDescriptor> {
    let distance_equals = params
        .distancia
        .as_deref()
        .filter(|d| !d.is_empty() && *d != ALL_DISTANCES)
        .map(str::to_string);

    let since = match params.desde.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => Some(parse_instant(raw).ok_or_else(|| {
            ApiError::InvalidParameter(format!(
                "desde debe ser una fecha ISO-8601 válida, se recibió '{}'",
                raw
            ))
        })?),
        None => None,
    };

    Ok(FilterDescriptor {
        distance_equals,
        since,
        limit: normalize_limit(params.limit.as_deref(), DEFAULT_LIMIT),
    })
}

/// Resolves a raw `limit` to a row cap in `1..=MAX_LIMIT`.
///
/// Absent, empty, non-numeric and non-positive input yields `default`;
/// anything above the bound, overflow included, yields `MAX_LIMIT`.
pub fn normalize_limit(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return default;
    };

    match raw.parse::<i64>() {
        Ok(n) if n <= 0 => default,
        Ok(n) => usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => MAX_LIMIT,
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn params(distancia: Option<&str>, desde: Option<&str>, limit: Option<&str>) -> ListingParams {
        ListingParams {
            distancia: distancia.map(String::from),
            desde: desde.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_limit_examples() {
        assert_eq!(normalize_limit(None, DEFAULT_LIMIT), 100);
        assert_eq!(normalize_limit(Some(""), DEFAULT_LIMIT), 100);
        assert_eq!(normalize_limit(Some("5000"), DEFAULT_LIMIT), 1000);
        assert_eq!(normalize_limit(Some("-3"), DEFAULT_LIMIT), 100);
        assert_eq!(normalize_limit(Some("0"), DEFAULT_LIMIT), 100);
        assert_eq!(normalize_limit(Some("abc"), DEFAULT_LIMIT), 100);
        assert_eq!(normalize_limit(Some("12abc"), DEFAULT_LIMIT), 100);
        assert_eq!(normalize_limit(Some(" 25 "), DEFAULT_LIMIT), 25);
        assert_eq!(normalize_limit(Some("1000"), DEFAULT_LIMIT), 1000);
        assert_eq!(normalize_limit(Some("1"), DEFAULT_LIMIT), 1);
    }

    #[test]
    fn test_limit_overflow() {
        assert_eq!(
            normalize_limit(Some("99999999999999999999999"), DEFAULT_LIMIT),
            MAX_LIMIT
        );
        assert_eq!(
            normalize_limit(Some("-99999999999999999999999"), DEFAULT_LIMIT),
            DEFAULT_LIMIT
        );
    }

    #[test]
    fn test_minimal_default() {
        assert_eq!(normalize_limit(None, MINIMAL_DEFAULT_LIMIT), 50);
        assert_eq!(normalize_limit(Some("x"), MINIMAL_DEFAULT_LIMIT), 50);
    }

    #[test]
    fn test_todos_is_no_filter() {
        let todos = normalize(&params(Some("Todos"), None, None)).unwrap();
        let absent = normalize(&params(None, None, None)).unwrap();
        let empty = normalize(&params(Some(""), None, None)).unwrap();

        assert_eq!(todos, absent);
        assert_eq!(empty, absent);
        assert_eq!(absent, FilterDescriptor::default());
    }

    #[test]
    fn test_distance_passes_through() {
        let f = normalize(&params(Some("12"), None, None)).unwrap();
        assert_eq!(f.distance_equals.as_deref(), Some("12"));

        // Only the exact sentinel is special
        let f = normalize(&params(Some("todos"), None, None)).unwrap();
        assert_eq!(f.distance_equals.as_deref(), Some("todos"));
    }

    #[test]
    fn test_desde_parses_to_utc() {
        let f = normalize(&params(None, Some("2024-01-01T02:00:00+02:00"), None)).unwrap();
        assert_eq!(f.since, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_invalid_desde_is_invalid_parameter() {
        let err = normalize(&params(None, Some("not-a-date"), None)).unwrap_err();
        match err {
            ApiError::InvalidParameter(msg) => assert!(msg.contains("not-a-date")),
            other => panic!("unexpected error: {:?}", other),
        }

        // Date without time or offset is not an instant
        assert!(normalize(&params(None, Some("2024-01-01"), None)).is_err());
    }

    #[test]
    fn test_blank_desde_is_absent() {
        let f = normalize(&params(None, Some("  "), None)).unwrap();
        assert!(f.since.is_none());
    }
}
