//! Lossless filter-state ⇄ query-parameter serialization.
//!
//! The codec works on key/value pairs so it composes with whatever URL
//! runtime the caller owns. Parameter names are `category`, `type`,
//! `author`, `tags` (comma-joined), and `startDate`/`endDate` (ISO-8601).
//! Absent filter fields are omitted entirely, never encoded as empty
//! markers.
//!
//! Round-trip law: `decode(encode(f)) == f` for every representable filter.
//! At the pair level that is every filter; the query-string helpers
//! additionally require values free of `&` and `=` (and tags free of `,`),
//! since percent-encoding belongs to the URL runtime, not to this codec.
//!
//! Decoding is strict about values and lenient about keys: unknown
//! parameters are ignored (URLs carry unrelated state), while a malformed
//! date, unknown type, or inverted range is an explicit error.

use chrono::{DateTime, Utc};

use crate::error::SearchError;
use crate::types::{DateRange, FilterSet};

pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_TYPE: &str = "type";
pub const PARAM_AUTHOR: &str = "author";
pub const PARAM_TAGS: &str = "tags";
pub const PARAM_START_DATE: &str = "startDate";
pub const PARAM_END_DATE: &str = "endDate";

/// Encode a filter as ordered key/value pairs. Absent fields are omitted.
pub fn encode(filter: &FilterSet) -> Vec<(&'static str, String)> {
    let mut pairs: Vec<(&'static str, String)> = Vec::new();
    if let Some(category) = &filter.category {
        pairs.push((PARAM_CATEGORY, category.clone()));
    }
    if let Some(kind) = filter.kind {
        pairs.push((PARAM_TYPE, kind.as_str().to_string()));
    }
    if let Some(author) = &filter.author {
        pairs.push((PARAM_AUTHOR, author.clone()));
    }
    if let Some(tags) = &filter.tags {
        pairs.push((PARAM_TAGS, tags.join(",")));
    }
    if let Some(range) = &filter.date_range {
        pairs.push((PARAM_START_DATE, range.start.to_rfc3339()));
        pairs.push((PARAM_END_DATE, range.end.to_rfc3339()));
    }
    pairs
}

/// Decode key/value pairs back into a filter.
///
/// Unknown keys are ignored and empty values are treated as absent, since
/// URL toolchains routinely produce both. Later occurrences of a key win.
pub fn decode<'a, I>(pairs: I) -> Result<FilterSet, SearchError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut filter = FilterSet::default();
    let mut start: Option<DateTime<Utc>> = None;
    let mut end: Option<DateTime<Utc>> = None;

    for (key, value) in pairs {
        if value.is_empty() {
            continue;
        }
        match key {
            PARAM_CATEGORY => filter.category = Some(value.to_string()),
            PARAM_TYPE => filter.kind = Some(value.parse()?),
            PARAM_AUTHOR => filter.author = Some(value.to_string()),
            PARAM_TAGS => {
                let tags: Vec<String> = value
                    .split(',')
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect();
                filter.tags = if tags.is_empty() { None } else { Some(tags) };
            }
            PARAM_START_DATE => start = Some(parse_date(PARAM_START_DATE, value)?),
            PARAM_END_DATE => end = Some(parse_date(PARAM_END_DATE, value)?),
            _ => {}
        }
    }

    filter.date_range = match (start, end) {
        (Some(start), Some(end)) => {
            if start > end {
                return Err(SearchError::InvalidDateRange { start, end });
            }
            Some(DateRange { start, end })
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(SearchError::BadParameter {
                field: PARAM_END_DATE,
                value: "missing (startDate requires endDate)".to_string(),
            })
        }
        (None, Some(_)) => {
            return Err(SearchError::BadParameter {
                field: PARAM_START_DATE,
                value: "missing (endDate requires startDate)".to_string(),
            })
        }
    };

    Ok(filter)
}

/// Render a filter as a `&`-joined query string.
pub fn to_query_string(filter: &FilterSet) -> String {
    encode(filter)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse a `&`-joined query string. A segment without `=` is treated as a
/// key with an empty value, which decoding then ignores.
pub fn parse_query_string(query: &str) -> Result<FilterSet, SearchError> {
    let pairs: Vec<(&str, &str)> = query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.split_once('=').unwrap_or((segment, "")))
        .collect();
    decode(pairs)
}

fn parse_date(field: &'static str, value: &str) -> Result<DateTime<Utc>, SearchError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| SearchError::BadParameter {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::past;
    use crate::types::ItemType;

    fn round_trip(filter: &FilterSet) -> FilterSet {
        let pairs = encode(filter);
        decode(pairs.iter().map(|(k, v)| (*k, v.as_str()))).unwrap()
    }

    #[test]
    fn tags_and_category_round_trip() {
        let filter = FilterSet {
            category: Some("React".to_string()),
            tags: Some(vec!["x".to_string(), "y".to_string()]),
            ..FilterSet::default()
        };
        assert_eq!(round_trip(&filter), filter);
    }

    #[test]
    fn full_filter_round_trips() {
        let filter = FilterSet {
            category: Some("TypeScript".to_string()),
            kind: Some(ItemType::Newsletter),
            author: Some("Avery Quinn".to_string()),
            tags: Some(vec!["types".to_string(), "generics".to_string()]),
            date_range: Some(DateRange {
                start: past(30),
                end: past(0),
            }),
        };
        assert_eq!(round_trip(&filter), filter);
    }

    #[test]
    fn empty_filter_encodes_to_nothing() {
        assert!(encode(&FilterSet::default()).is_empty());
        assert_eq!(to_query_string(&FilterSet::default()), "");
        assert_eq!(parse_query_string("").unwrap(), FilterSet::default());
    }

    #[test]
    fn absent_fields_are_omitted() {
        let filter = FilterSet {
            author: Some("Sol".to_string()),
            ..FilterSet::default()
        };
        let pairs = encode(&filter);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], (PARAM_AUTHOR, "Sol".to_string()));
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let filter = decode([("utm_source", "mail"), ("category", "React")]).unwrap();
        assert_eq!(filter.category.as_deref(), Some("React"));
        assert!(filter.kind.is_none());
    }

    #[test]
    fn empty_values_are_absent() {
        let filter = decode([("category", ""), ("tags", ",,")]).unwrap();
        assert_eq!(filter, FilterSet::default());
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = decode([("startDate", "yesterday"), ("endDate", "2026-01-01T00:00:00Z")])
            .unwrap_err();
        assert_eq!(
            err,
            SearchError::BadParameter {
                field: PARAM_START_DATE,
                value: "yesterday".to_string(),
            }
        );
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = decode([("type", "podcast")]).unwrap_err();
        assert_eq!(err, SearchError::UnknownItemType("podcast".to_string()));
    }

    #[test]
    fn inverted_range_is_an_error() {
        let start = past(0);
        let end = past(10);
        let start_text = start.to_rfc3339();
        let end_text = end.to_rfc3339();
        let err = decode([
            ("startDate", start_text.as_str()),
            ("endDate", end_text.as_str()),
        ])
        .unwrap_err();
        assert_eq!(err, SearchError::InvalidDateRange { start, end });
    }

    #[test]
    fn lone_date_bound_is_an_error() {
        let start = past(5).to_rfc3339();
        let err = decode([("startDate", start.as_str())]).unwrap_err();
        assert!(matches!(
            err,
            SearchError::BadParameter {
                field: PARAM_END_DATE,
                ..
            }
        ));
    }

    #[test]
    fn query_string_round_trips() {
        let filter = FilterSet {
            category: Some("React".to_string()),
            tags: Some(vec!["hooks".to_string(), "state".to_string()]),
            ..FilterSet::default()
        };
        let qs = to_query_string(&filter);
        assert_eq!(qs, "category=React&tags=hooks,state");
        assert_eq!(parse_query_string(&qs).unwrap(), filter);
    }
}
