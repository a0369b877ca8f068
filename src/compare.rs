//! Winner determination and the side-by-side scorecard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{GitHubRepo, GitHubUser, ProfileBundle};
use crate::score::ScoreBreakdown;
use crate::stats::{compute_stats, years_on_platform, DerivedStats, TopLanguage};

/// Which side of a comparison comes out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    None,
    Left,
    Right,
}

/// A metric value as handed to the comparator. Anything that is not a number
/// compares as `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl MetricValue {
    pub fn as_number(&self) -> f64 {
        match self {
            MetricValue::Int(v) => *v as f64,
            MetricValue::Float(v) if v.is_finite() => *v,
            _ => 0.0,
        }
    }
}

impl From<u8> for MetricValue {
    fn from(v: u8) -> Self {
        MetricValue::Int(i64::from(v))
    }
}

impl From<u32> for MetricValue {
    fn from(v: u32) -> Self {
        MetricValue::Int(i64::from(v))
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        MetricValue::Int(i64::from(v))
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

pub fn compare_values(left: &MetricValue, right: &MetricValue, higher_is_better: bool) -> Winner {
    let (a, b) = (left.as_number(), right.as_number());
    if a == b {
        Winner::None
    } else if (a > b) == higher_is_better {
        Winner::Left
    } else {
        Winner::Right
    }
}

/// Strictly higher composite score wins; a tie has no winner.
pub fn overall_winner(left_score: u8, right_score: u8) -> Winner {
    compare_values(&left_score.into(), &right_score.into(), true)
}

/// Everything derived for one side of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub profile: GitHubUser,
    pub stats: DerivedStats,
    pub breakdown: ScoreBreakdown,
    pub score: u8,
    pub years_on_platform: i32,
}

impl ProfileReport {
    pub fn new(profile: GitHubUser, repos: &[GitHubRepo], now: DateTime<Utc>) -> Self {
        let stats = compute_stats(repos, &profile, now);
        let breakdown = ScoreBreakdown::new(&profile, &stats);
        let score = breakdown.total();
        let years_on_platform = years_on_platform(&profile, now);
        Self {
            profile,
            stats,
            breakdown,
            score,
            years_on_platform,
        }
    }

    pub fn from_bundle(bundle: ProfileBundle, now: DateTime<Utc>) -> Self {
        Self::new(bundle.user, &bundle.repos, now)
    }
}

/// How a metric is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Plain,
    OneDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub label: &'static str,
    pub left: MetricValue,
    pub right: MetricValue,
    pub format: ValueFormat,
    pub winner: Winner,
}

impl MetricRow {
    fn new(
        label: &'static str,
        left: impl Into<MetricValue>,
        right: impl Into<MetricValue>,
        format: ValueFormat,
    ) -> Self {
        let (left, right) = (left.into(), right.into());
        let winner = compare_values(&left, &right, true);
        Self {
            label,
            left,
            right,
            format,
            winner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub left: ProfileReport,
    pub right: ProfileReport,
    pub rows: Vec<MetricRow>,
    pub top_languages: (TopLanguage, TopLanguage),
    pub winner: Winner,
}

impl Scorecard {
    pub fn build(left: ProfileReport, right: ProfileReport) -> Self {
        use ValueFormat::{OneDecimal, Plain};

        let (l, r) = (&left, &right);
        let rows = vec![
            MetricRow::new("Followers", l.profile.followers, r.profile.followers, Plain),
            MetricRow::new("Total Stars", l.stats.total_stars, r.stats.total_stars, Plain),
            MetricRow::new("Total Forks", l.stats.total_forks, r.stats.total_forks, Plain),
            MetricRow::new(
                "Public Repositories",
                l.profile.public_repos,
                r.profile.public_repos,
                Plain,
            ),
            MetricRow::new(
                "Recent Activity (6 months)",
                l.stats.recent_activity,
                r.stats.recent_activity,
                Plain,
            ),
            MetricRow::new(
                "Avg Stars per Repo",
                l.stats.avg_stars_per_repo,
                r.stats.avg_stars_per_repo,
                OneDecimal,
            ),
            MetricRow::new(
                "Programming Languages",
                l.stats.language_count,
                r.stats.language_count,
                Plain,
            ),
            MetricRow::new(
                "Follower/Following Ratio",
                l.stats.follower_ratio,
                r.stats.follower_ratio,
                OneDecimal,
            ),
            MetricRow::new("Years on GitHub", l.years_on_platform, r.years_on_platform, Plain),
        ];
        let top_languages = (l.stats.top_language.clone(), r.stats.top_language.clone());
        let winner = overall_winner(l.score, r.score);

        Self {
            left,
            right,
            rows,
            top_languages,
            winner,
        }
    }

    /// The winning side's report, if there is one.
    pub fn winning_report(&self) -> Option<&ProfileReport> {
        match self.winner {
            Winner::Left => Some(&self.left),
            Winner::Right => Some(&self.right),
            Winner::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::compute_score;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn user(login: &str, followers: u32, public_repos: u32, created_year: i32) -> GitHubUser {
        GitHubUser {
            login: login.into(),
            name: None,
            bio: None,
            avatar_url: String::new(),
            html_url: format!("https://github.com/{login}"),
            public_repos,
            followers,
            following: 0,
            created_at: Utc.with_ymd_and_hms(created_year, 5, 5, 0, 0, 0).unwrap(),
        }
    }

    fn repo(stars: u64, lang: &str) -> GitHubRepo {
        GitHubRepo {
            name: "r".into(),
            stargazers_count: stars,
            forks_count: 1,
            language: Some(lang.into()),
            updated_at: now(),
        }
    }

    #[test]
    fn report_score_matches_its_breakdown() {
        let report = ProfileReport::new(
            user("carol", 420, 18, 2016),
            &[repo(30, "Rust"), repo(5, "Go"), repo(0, "Rust")],
            now(),
        );
        assert_eq!(report.score, report.breakdown.total());
        assert_eq!(report.score, compute_score(&report.profile, &report.stats));
        // followers 42, stars 7, repos 9, activity 15, diversity 20
        assert_eq!(report.score, 19);
    }

    #[test]
    fn equal_values_have_no_winner() {
        let v = MetricValue::Int(7);
        assert_eq!(compare_values(&v, &v, true), Winner::None);
        assert_eq!(compare_values(&v, &v, false), Winner::None);
    }

    #[test]
    fn direction_decides_winner() {
        let (a, b) = (MetricValue::Int(3), MetricValue::Float(2.5));
        assert_eq!(compare_values(&a, &b, true), Winner::Left);
        assert_eq!(compare_values(&a, &b, false), Winner::Right);
        assert_eq!(compare_values(&b, &a, true), Winner::Right);
    }

    #[test]
    fn non_numeric_values_coerce_to_zero() {
        let text = MetricValue::Text("many".into());
        assert_eq!(compare_values(&text, &MetricValue::Missing, true), Winner::None);
        assert_eq!(compare_values(&text, &MetricValue::Int(1), true), Winner::Right);
        let nan = MetricValue::Float(f64::NAN);
        assert_eq!(compare_values(&nan, &MetricValue::Int(0), true), Winner::None);
    }

    #[test]
    fn tied_scores_have_no_overall_winner() {
        assert_eq!(overall_winner(80, 80), Winner::None);
        assert_eq!(overall_winner(81, 80), Winner::Left);
        assert_eq!(overall_winner(10, 80), Winner::Right);
    }

    #[test]
    fn scorecard_rows_and_winner() {
        let left = ProfileReport::new(
            user("alice", 500, 40, 2012),
            &[repo(100, "Rust"), repo(50, "Go")],
            now(),
        );
        let right = ProfileReport::new(user("bob", 20, 3, 2020), &[repo(2, "Go")], now());
        let card = Scorecard::build(left, right);

        let labels: Vec<&str> = card.rows.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "Followers",
                "Total Stars",
                "Total Forks",
                "Public Repositories",
                "Recent Activity (6 months)",
                "Avg Stars per Repo",
                "Programming Languages",
                "Follower/Following Ratio",
                "Years on GitHub",
            ]
        );
        assert_eq!(card.rows[0].winner, Winner::Left);
        // both sides have recent activity on every repo, 2 vs 1
        assert_eq!(card.rows[4].left, MetricValue::Int(2));
        assert_eq!(card.rows[8].left, MetricValue::Int(12));
        assert_eq!(card.top_languages.1, TopLanguage::Language("Go".into()));
        assert_eq!(card.winner, Winner::Left);
        assert_eq!(card.winning_report().map(|r| r.profile.login.as_str()), Some("alice"));
    }

    #[test]
    fn identical_profiles_tie_everywhere() {
        let make = || ProfileReport::new(user("twin", 10, 2, 2019), &[repo(4, "C")], now());
        let card = Scorecard::build(make(), make());
        assert!(card.rows.iter().all(|row| row.winner == Winner::None));
        assert_eq!(card.winner, Winner::None);
        assert!(card.winning_report().is_none());
    }

    proptest! {
        #[test]
        fn swapping_sides_swaps_winner(
            a in -1_000i64..1_000,
            b in -1_000i64..1_000,
            higher in any::<bool>(),
        ) {
            let (va, vb) = (MetricValue::Int(a), MetricValue::Int(b));
            let forward = compare_values(&va, &vb, higher);
            let backward = compare_values(&vb, &va, higher);
            let expected = match forward {
                Winner::Left => Winner::Right,
                Winner::Right => Winner::Left,
                Winner::None => Winner::None,
            };
            prop_assert_eq!(backward, expected);
            if a != b && higher {
                prop_assert_eq!(forward, if a > b { Winner::Left } else { Winner::Right });
            }
        }
    }
}
