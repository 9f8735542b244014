//! Filtering and sorting inputs, interpreted per adapter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-domain free-text filters.
///
/// Each adapter reads only the field matching its own data and ignores the
/// rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
	pub news_keyword: Option<String>,
	pub sports_keyword: Option<String>,
}

/// Sorting criteria applied to each adapter's collection.
///
/// An adapter with no data matching `sort_by` leaves its collection in
/// upstream order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortingOptions {
	pub sort_by: SortBy,
	pub sort_order: SortOrder,
}

impl Default for SortingOptions {
	fn default() -> Self {
		Self {
			sort_by: SortBy::Date,
			sort_order: SortOrder::Asc,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
	Name,
	Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	Asc,
	Desc,
}

// Display impls feed deterministic cache keys.
impl fmt::Display for SortBy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SortBy::Name => f.write_str("name"),
			SortBy::Date => f.write_str("date"),
		}
	}
}

impl fmt::Display for SortOrder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SortOrder::Asc => f.write_str("asc"),
			SortOrder::Desc => f.write_str("desc"),
		}
	}
}
