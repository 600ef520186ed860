use crate::calendar::{CalendarResult, MonthKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Holiday names keyed by zero-padded ISO date (`YYYY-MM-DD`).
///
/// Lookups are exact string matches: a key in any other shape is kept but
/// can never match a date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayTable {
    entries: BTreeMap<String, String>,
}

impl HolidayTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_holiday(mut self, iso_date: impl Into<String>, name: impl Into<String>) -> Self {
        self.entries.insert(iso_date.into(), name.into());
        self
    }

    pub fn with_date(self, date: NaiveDate, name: impl Into<String>) -> Self {
        self.with_holiday(date.format("%Y-%m-%d").to_string(), name)
    }

    /// Entries of `other` override entries with the same key.
    pub fn merged(mut self, other: &HolidayTable) -> Self {
        self.entries
            .extend(other.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn get(&self, iso_date: &str) -> Option<&str> {
        self.entries.get(iso_date).map(String::as_str)
    }

    pub fn name_on(&self, date: NaiveDate) -> Option<&str> {
        self.get(&date.format("%Y-%m-%d").to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys that are not a well-formed, existing calendar date.
    pub fn unmatchable_keys(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|key| !is_canonical_iso_date(key))
            .map(String::as_str)
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HolidayTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Lookup key for a day of a zero-based month.
pub fn iso_key(year: i32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month + 1, day)
}

/// Name of the holiday on (year, month, day), if the table has one.
pub fn is_holiday(year: i32, month: u32, day: u32, table: &HolidayTable) -> CalendarResult<Option<&str>> {
    let key = MonthKey::new(year, month)?;
    Ok(table.get(&iso_key(key.year(), key.month(), day)))
}

fn is_canonical_iso_date(key: &str) -> bool {
    key.len() == 10
        && NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .map(|date| date.format("%Y-%m-%d").to_string() == key)
            .unwrap_or(false)
}
