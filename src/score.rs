//! Composite 0-100 developer score.

use serde::Serialize;

use crate::models::GitHubUser;
use crate::stats::DerivedStats;

const MAX_COMPONENT: f64 = 100.0;

/// The five component scores, each clamped to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub followers: f64,
    pub stars: f64,
    pub repos: f64,
    pub activity: f64,
    pub diversity: f64,
}

impl ScoreBreakdown {
    pub fn new(profile: &GitHubUser, stats: &DerivedStats) -> Self {
        Self {
            followers: clamp(f64::from(profile.followers) / 10.0),
            stars: clamp(stats.total_stars as f64 / 5.0),
            repos: clamp(f64::from(profile.public_repos) / 2.0),
            activity: clamp(f64::from(stats.recent_activity) * 5.0),
            diversity: clamp(f64::from(stats.language_count) * 10.0),
        }
    }

    /// Rounded mean of the components.
    pub fn total(&self) -> u8 {
        let sum = self.followers + self.stars + self.repos + self.activity + self.diversity;
        (sum / 5.0).round().clamp(0.0, MAX_COMPONENT) as u8
    }
}

fn clamp(value: f64) -> f64 {
    value.clamp(0.0, MAX_COMPONENT)
}

pub fn compute_score(profile: &GitHubUser, stats: &DerivedStats) -> u8 {
    ScoreBreakdown::new(profile, stats).total()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::TopLanguage;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn profile(followers: u32, public_repos: u32) -> GitHubUser {
        GitHubUser {
            login: "dev".into(),
            name: None,
            bio: None,
            avatar_url: String::new(),
            html_url: String::new(),
            public_repos,
            followers,
            following: 0,
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn stats(total_stars: u64, recent_activity: u32, language_count: u32) -> DerivedStats {
        DerivedStats {
            total_stars,
            total_forks: 0,
            recent_activity,
            language_count,
            top_language: TopLanguage::NotApplicable,
            avg_stars_per_repo: 0.0,
            follower_ratio: 0.0,
        }
    }

    #[test]
    fn empty_profile_scores_zero() {
        assert_eq!(compute_score(&profile(0, 0), &stats(0, 0, 0)), 0);
    }

    #[test]
    fn saturated_profile_scores_hundred() {
        assert_eq!(
            compute_score(&profile(5_000, 1_000), &stats(100_000, 40, 25)),
            100
        );
    }

    #[test]
    fn components_follow_their_formulas() {
        let breakdown = ScoreBreakdown::new(&profile(250, 30), &stats(100, 4, 3));
        assert_eq!(breakdown.followers, 25.0);
        assert_eq!(breakdown.stars, 20.0);
        assert_eq!(breakdown.repos, 15.0);
        assert_eq!(breakdown.activity, 20.0);
        assert_eq!(breakdown.diversity, 30.0);
        assert_eq!(breakdown.total(), 22);
    }

    #[test]
    fn mean_rounds_half_up() {
        // (5 + 0 + 0.5 + 0 + 0) / 5 = 1.1 -> 1; (10 + 2.5) / 5 = 2.5 -> 3
        assert_eq!(compute_score(&profile(50, 1), &stats(0, 0, 0)), 1);
        assert_eq!(compute_score(&profile(100, 5), &stats(0, 0, 0)), 3);
    }

    proptest! {
        #[test]
        fn score_is_bounded(
            f in 0u32..100_000,
            r in 0u32..10_000,
            s in 0u64..1_000_000,
            a in 0u32..200,
            l in 0u32..50,
        ) {
            let score = compute_score(&profile(f, r), &stats(s, a, l));
            prop_assert!(score <= 100);
        }

        #[test]
        fn score_is_monotone_in_each_driver(
            f in 0u32..5_000, r in 0u32..500, s in 0u64..5_000, a in 0u32..40, l in 0u32..20,
            bump in 1u32..100,
        ) {
            let base = compute_score(&profile(f, r), &stats(s, a, l));
            prop_assert!(compute_score(&profile(f + bump, r), &stats(s, a, l)) >= base);
            prop_assert!(compute_score(&profile(f, r + bump), &stats(s, a, l)) >= base);
            prop_assert!(compute_score(&profile(f, r), &stats(s + u64::from(bump), a, l)) >= base);
            prop_assert!(compute_score(&profile(f, r), &stats(s, a + bump, l)) >= base);
            prop_assert!(compute_score(&profile(f, r), &stats(s, a, l + bump)) >= base);
        }
    }
}
