//! Filter and sort over a batch of random user records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::Serialize;

use crate::models::UserRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Asc,
    Desc,
    Date,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortMode::Asc),
            "desc" => Ok(SortMode::Desc),
            "date" => Ok(SortMode::Date),
            other => Err(format!("unknown sort mode '{other}' (expected asc, desc or date)")),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::Asc => "asc",
            SortMode::Desc => "desc",
            SortMode::Date => "date",
        })
    }
}

/// Case-insensitive substring match against name, country or gender.
pub fn matches(record: &UserRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let name = record.full_name_key();
    [name.as_str(), record.location.country.as_str(), record.gender.as_str()]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

thread_local! {
    static NAME_COLLATOR: Option<CollatorBorrowed<'static>> =
        Collator::try_new(Default::default(), CollatorOptions::default()).ok();
}

/// Locale-aware name ordering (root collation), with the exact text as a
/// final tie break so the order is total.
pub fn collate(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        })
        .then_with(|| a.cmp(b))
}

/// Filtered and ordered view of `records`. The input is left untouched and the
/// returned references point at the original elements.
pub fn view<'a>(records: &'a [UserRecord], query: &str, sort: SortMode) -> Vec<&'a UserRecord> {
    let mut selected: Vec<&UserRecord> = records
        .iter()
        .filter(|record| matches(record, query))
        .collect();

    match sort {
        SortMode::Asc => selected.sort_by(|a, b| collate(&a.name.first, &b.name.first)),
        SortMode::Desc => selected.sort_by(|a, b| collate(&b.name.first, &a.name.first)),
        SortMode::Date => selected.sort_by_key(|record| record.registered.date),
    }

    selected
}
