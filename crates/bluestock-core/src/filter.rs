//! Rating filter over analysis results

use crate::model::{AnalysisResult, HealthRating};
use std::fmt;
use std::str::FromStr;

/// Which results are visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Rating(HealthRating),
}

impl Filter {
    /// Filter bar order
    pub const CHOICES: [Filter; 4] = [
        Filter::All,
        Filter::Rating(HealthRating::Good),
        Filter::Rating(HealthRating::Neutral),
        Filter::Rating(HealthRating::Bad),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Rating(rating) => rating.as_str(),
        }
    }

    pub fn matches(self, result: &AnalysisResult) -> bool {
        match self {
            Self::All => true,
            Self::Rating(rating) => result.health_rating == Some(rating),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = crate::model::UnknownRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("ALL") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Rating)
        }
    }
}

/// Results visible under `filter`, in their original order.
pub fn visible(results: &[AnalysisResult], filter: Filter) -> Vec<&AnalysisResult> {
    results.iter().filter(|result| filter.matches(result)).collect()
}

/// Styling class derived from a rating; absent ratings style as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingStyle(HealthRating);

impl RatingStyle {
    pub fn of(rating: Option<HealthRating>) -> Self {
        Self(rating.unwrap_or(HealthRating::Neutral))
    }

    /// Lowercase class name (`good`, `neutral`, `bad`)
    pub fn class(self) -> &'static str {
        match self.0 {
            HealthRating::Good => "good",
            HealthRating::Neutral => "neutral",
            HealthRating::Bad => "bad",
        }
    }
}
