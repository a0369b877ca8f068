//! Aggregate statistics over a developer's repositories.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Serialize, Serializer};

use crate::models::{GitHubRepo, GitHubUser};

/// How far back a repository update still counts as recent activity.
pub const RECENT_ACTIVITY_MONTHS: u32 = 6;

/// Most used language across a profile's repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLanguage {
    Language(String),
    NotApplicable,
}

impl fmt::Display for TopLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLanguage::Language(lang) => f.write_str(lang),
            TopLanguage::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for TopLanguage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    pub total_stars: u64,
    pub total_forks: u64,
    /// Repositories updated within the last six calendar months.
    pub recent_activity: u32,
    pub language_count: u32,
    pub top_language: TopLanguage,
    /// Rounded to one decimal.
    pub avg_stars_per_repo: f64,
    /// Rounded to two decimals, or the raw follower count when following nobody.
    pub follower_ratio: f64,
}

/// Language frequency table that remembers first-seen order for tie breaks.
#[derive(Default)]
struct LanguageTally<'a> {
    index: HashMap<&'a str, usize>,
    counts: Vec<(&'a str, u32)>,
}

impl<'a> LanguageTally<'a> {
    fn record(&mut self, lang: &'a str) {
        match self.index.get(lang) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(lang, self.counts.len());
                self.counts.push((lang, 1));
            }
        }
    }

    fn distinct(&self) -> u32 {
        self.counts.len() as u32
    }

    fn top(&self) -> TopLanguage {
        let mut best: Option<(&str, u32)> = None;
        for &(lang, count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((lang, count));
            }
        }
        best.map_or(TopLanguage::NotApplicable, |(lang, _)| {
            TopLanguage::Language(lang.to_string())
        })
    }
}

/// Start of the recent-activity window: `now` minus six calendar months.
///
/// A day that does not exist in the target month clamps to that month's last
/// day, so Aug 31 maps to Feb 28 (or 29).
pub fn recent_activity_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(RECENT_ACTIVITY_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn compute_stats(
    repos: &[GitHubRepo],
    profile: &GitHubUser,
    now: DateTime<Utc>,
) -> DerivedStats {
    let cutoff = recent_activity_cutoff(now);

    let mut total_stars = 0u64;
    let mut total_forks = 0u64;
    let mut recent_activity = 0u32;
    let mut languages = LanguageTally::default();

    for repo in repos {
        total_stars += repo.stargazers_count;
        total_forks += repo.forks_count;
        if let Some(lang) = repo.language_tag() {
            languages.record(lang);
        }
        if repo.updated_at > cutoff {
            recent_activity += 1;
        }
    }

    let avg_stars_per_repo = if repos.is_empty() {
        0.0
    } else {
        round_to(total_stars as f64 / repos.len() as f64, 1)
    };

    DerivedStats {
        total_stars,
        total_forks,
        recent_activity,
        language_count: languages.distinct(),
        top_language: languages.top(),
        avg_stars_per_repo,
        follower_ratio: follower_ratio(profile.followers, profile.following),
    }
}

pub fn follower_ratio(followers: u32, following: u32) -> f64 {
    if following == 0 {
        f64::from(followers)
    } else {
        round_to(f64::from(followers) / f64::from(following), 2)
    }
}

/// Calendar years between account creation and `now`.
pub fn years_on_platform(profile: &GitHubUser, now: DateTime<Utc>) -> i32 {
    now.year() - profile.created_at.year()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
