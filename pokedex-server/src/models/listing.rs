//! List query parameters for `GET /api/v1/pokemons`
//!
//! `after` and `count` are plain skip/limit values handed to the store.

use std::fmt;

use serde::Deserialize;

/// Default number of records returned when `count` is absent
pub const DEFAULT_COUNT: u64 = 10;

/// Raw query string values, parsed by [`ListParams::parse`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub count: Option<String>,
    pub after: Option<String>,
}

/// Parsed skip/limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Records to skip
    pub after: u64,
    /// Maximum records to return; `None` means no limit
    pub count: Option<u64>,
}

/// `count` or `after` was not a non-negative integer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidListQuery;

impl fmt::Display for InvalidListQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("After and count must be integers")
    }
}

impl std::error::Error for InvalidListQuery {}

impl ListParams {
    /// Parse query values.
    ///
    /// - missing or empty values take the defaults (`after=0`, `count=10`)
    /// - `count=0` is passed through as "no limit"
    pub fn parse(query: &ListQuery) -> Result<Self, InvalidListQuery> {
        let count = match parse_field(query.count.as_deref())? {
            None => Some(DEFAULT_COUNT),
            Some(0) => None,
            Some(n) => Some(n),
        };
        let after = parse_field(query.after.as_deref())?.unwrap_or(0);

        Ok(Self { after, count })
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            after: 0,
            count: Some(DEFAULT_COUNT),
        }
    }
}

fn parse_field(raw: Option<&str>) -> Result<Option<u64>, InvalidListQuery> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(|_| InvalidListQuery),
    }
}
