//! Wire types exchanged with the analysis backend

use crate::symbol::Symbol;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Coarse verdict the backend attaches to each company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HealthRating {
    Good,
    Neutral,
    Bad,
}

impl HealthRating {
    /// Canonical wire form (`GOOD`, `NEUTRAL`, `BAD`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Neutral => "NEUTRAL",
            Self::Bad => "BAD",
        }
    }
}

impl fmt::Display for HealthRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known ratings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRating(pub String);

impl fmt::Display for UnknownRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown health rating: {}", self.0)
    }
}

impl std::error::Error for UnknownRating {}

impl FromStr for HealthRating {
    type Err = UnknownRating;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GOOD" => Ok(Self::Good),
            "NEUTRAL" => Ok(Self::Neutral),
            "BAD" => Ok(Self::Bad),
            _ => Err(UnknownRating(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for HealthRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Ratings are case-insensitive on input; anything unrecognized is treated as absent.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<HealthRating>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(rating_or_absent))
}

fn rating_or_absent(raw: &str) -> Option<HealthRating> {
    match raw.parse() {
        Ok(rating) => Some(rating),
        Err(UnknownRating(value)) => {
            debug!(rating = %value, "unrecognized health rating, treating as absent");
            None
        },
    }
}

/// Metric values arrive as display strings, but plain numbers are accepted too.
fn display_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(text)) => Ok(Some(text)),
        Some(serde_json::Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a metric string, got {other}"
        ))),
    }
}

/// Headline growth and return metrics, already formatted for display by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetricsSummary {
    #[serde(default, deserialize_with = "display_value")]
    pub sales_growth_10y: Option<String>,
    #[serde(default, deserialize_with = "display_value")]
    pub roe_10y: Option<String>,
    #[serde(default, deserialize_with = "display_value")]
    pub profit_growth_10y: Option<String>,
    #[serde(default, deserialize_with = "display_value")]
    pub sales_growth_5y: Option<String>,
}

/// One analyzed company
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResult {
    pub company_id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub health_rating: Option<HealthRating>,
    #[serde(default)]
    pub metrics_summary: Option<MetricsSummary>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub details_url: Option<String>,
}

impl AnalysisResult {
    pub fn new(company_id: impl Into<String>, health_rating: Option<HealthRating>) -> Self {
        let company_id = company_id.into();
        Self {
            company_name: company_id.clone(),
            company_id,
            health_rating,
            metrics_summary: None,
            pros: Vec::new(),
            cons: Vec::new(),
            details_url: None,
        }
    }

    /// Name to show in a card header, falling back to the ticker
    pub fn display_name(&self) -> &str {
        if self.company_name.is_empty() {
            &self.company_id
        } else {
            &self.company_name
        }
    }
}

/// Body of `POST /api/analyze/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeRequest {
    pub company_ids: Vec<Symbol>,
}

impl AnalyzeRequest {
    pub fn new(company_ids: Vec<Symbol>) -> Self {
        Self { company_ids }
    }
}

/// Successful body of `POST /api/analyze/`, as assembled by the body decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub status: Option<String>,
    pub count: Option<usize>,
    pub results: Vec<AnalysisResult>,
}

/// An analysis the backend has persisted, as listed by `GET /api/results/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredAnalysis {
    pub company_id: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub health_rating: Option<HealthRating>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub analysis_date: Option<String>,
}

impl StoredAnalysis {
    /// Parse `analysis_date`, accepting RFC 3339 or a naive timestamp taken as UTC
    pub fn analyzed_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.analysis_date.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_rating_parse_case_insensitive() {
        assert_eq!("good".parse::<HealthRating>().unwrap(), HealthRating::Good);
        assert_eq!("Neutral".parse::<HealthRating>().unwrap(), HealthRating::Neutral);
        assert_eq!("BAD".parse::<HealthRating>().unwrap(), HealthRating::Bad);
        assert!("excellent".parse::<HealthRating>().is_err());
    }

    #[test]
    fn test_result_defaults_optional_fields() {
        let result: AnalysisResult =
            serde_json::from_value(json!({"company_id": "TCS", "health_rating": "good"}))
                .unwrap();
        assert_eq!(result.health_rating, Some(HealthRating::Good));
        assert!(result.pros.is_empty());
        assert!(result.cons.is_empty());
        assert!(result.metrics_summary.is_none());
        assert_eq!(result.display_name(), "TCS");
    }

    #[test]
    fn test_result_unknown_or_null_rating_is_absent() {
        let unknown: AnalysisResult =
            serde_json::from_value(json!({"company_id": "X", "health_rating": "STELLAR"}))
                .unwrap();
        assert_eq!(unknown.health_rating, None);

        let null: AnalysisResult =
            serde_json::from_value(json!({"company_id": "X", "health_rating": null})).unwrap();
        assert_eq!(null.health_rating, None);
    }

    #[test]
    fn test_unrecognized_rating_does_not_affect_known_ones() {
        assert_eq!(rating_or_absent("STELLAR"), None);
        assert_eq!(rating_or_absent(""), None);
        assert_eq!(rating_or_absent(" bad "), Some(HealthRating::Bad));

        let stored: StoredAnalysis =
            serde_json::from_value(json!({"company_id": "X", "health_rating": "A+"})).unwrap();
        assert_eq!(stored.health_rating, None);
        assert_eq!(stored.company_id, "X");
    }

    #[test]
    fn test_result_full_payload() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "company_id": "HDFCBANK",
            "company_name": "HDFC Bank Ltd",
            "health_rating": "NEUTRAL",
            "metrics_summary": {"sales_growth_10y": "18%", "roe_10y": 16.5, "sales_growth_5y": null},
            "pros": ["Strong deposit franchise"],
            "cons": ["Slowing loan growth"],
            "details_url": "https://bluemutualfund.in/server/api/company.php?id=HDFCBANK"
        }))
        .unwrap();

        let metrics = result.metrics_summary.as_ref().unwrap();
        assert_eq!(metrics.sales_growth_10y.as_deref(), Some("18%"));
        assert_eq!(metrics.roe_10y.as_deref(), Some("16.5"));
        assert_eq!(metrics.sales_growth_5y, None);
        assert_eq!(result.display_name(), "HDFC Bank Ltd");
        assert!(result.details_url.is_some());
    }

    #[test]
    fn test_result_rejects_non_string_pros() {
        let parsed = serde_json::from_value::<AnalysisResult>(
            json!({"company_id": "TCS", "pros": [1, 2]}),
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let request = AnalyzeRequest::new(vec![
            Symbol::parse("tcs").unwrap(),
            Symbol::parse("infy").unwrap(),
        ]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"company_ids": ["TCS", "INFY"]})
        );
    }

    #[test]
    fn test_stored_analysis_dates() {
        let mut stored = StoredAnalysis {
            company_id: "TCS".to_string(),
            company_name: "TCS".to_string(),
            health_rating: Some(HealthRating::Good),
            pros: vec![],
            cons: vec![],
            analysis_date: Some("2025-03-04T10:15:30.123456Z".to_string()),
        };
        let at = stored.analyzed_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2025, 3, 4));

        stored.analysis_date = Some("2025-03-04T10:15:30".to_string());
        assert_eq!(stored.analyzed_at().unwrap().hour(), 10);

        stored.analysis_date = Some("yesterday".to_string());
        assert!(stored.analyzed_at().is_none());
    }
}
