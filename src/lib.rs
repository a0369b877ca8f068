//! Compare two GitHub developers side by side, and browse a batch of
//! randomuser.me profiles with a filter and sort.
//!
//! The derivation modules (`stats`, `score`, `compare`, `finder`) are pure
//! and synchronous; `client` does the fetching and `render` the printing.

pub mod client;
pub mod compare;
pub mod config;
pub mod error;
pub mod finder;
pub mod models;
pub mod render;
pub mod score;
pub mod stats;

pub use compare::{compare_values, overall_winner, ProfileReport, Scorecard, Winner};
pub use finder::{view, SortMode};
pub use score::compute_score;
pub use stats::{compute_stats, DerivedStats};
