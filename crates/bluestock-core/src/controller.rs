//! Drives the view state against an analysis backend

use crate::backend::AnalysisBackend;
use crate::error::{ErrorKind, Result};
use crate::filter::Filter;
use crate::model::StoredAnalysis;
use crate::state::{Action, Effect, ViewState};
use crate::symbol::Symbol;
use tracing::{error, info, warn};

/// Owns the [`ViewState`] and performs the effects its reducer asks for.
///
/// Dropping the future returned by [`analyze`](Self::analyze) discards the
/// in-flight response; nothing else is cancelled.
pub struct AnalysisController<B> {
    backend: B,
    state: ViewState,
}

impl<B: AnalysisBackend> AnalysisController<B> {
    /// Controller starting from the default symbols
    pub fn new(backend: B) -> Self {
        Self::with_state(backend, ViewState::default())
    }

    pub fn with_state(backend: B, state: ViewState) -> Self {
        Self { backend, state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn edit_input(&mut self, text: impl Into<String>) {
        self.state.apply(Action::EditInput(text.into()));
    }

    pub fn add_symbol(&mut self, raw: &str) {
        self.state.apply(Action::AddSymbol(raw.to_string()));
    }

    pub fn remove_symbol(&mut self, symbol: Symbol) {
        self.state.apply(Action::RemoveSymbol(symbol));
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.state.apply(Action::SetFilter(filter));
    }

    /// Submit the registry for analysis and wait for the outcome.
    ///
    /// Returns the error kind the view now shows, if any. No request is sent
    /// when the registry is empty or another request is still in flight.
    pub async fn analyze(&mut self) -> Option<ErrorKind> {
        let Some(Effect::Analyze(request)) = self.state.apply(Action::Submit) else {
            return self.state.error();
        };

        let outcome = match self.backend.analyze(&request).await {
            Ok(response) => {
                info!(count = response.results.len(), "Analysis complete");
                Action::ReceiveSuccess(response.results)
            },
            Err(err) => {
                let kind = err.kind();
                match kind {
                    ErrorKind::Transport => error!(error = %err, "Could not reach analysis backend"),
                    _ => warn!(error = %err, "Unexpected analysis response"),
                }
                Action::ReceiveError(kind)
            },
        };

        self.state.apply(outcome);
        self.state.error()
    }

    /// Analyses stored by the backend; leaves the view state untouched
    pub async fn stored_analyses(&self) -> Result<Vec<StoredAnalysis>> {
        self.backend.stored_analyses().await.inspect_err(|err| {
            warn!(error = %err, "Could not load stored analyses");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockAnalysisBackend, decode_analyze_body};
    use crate::error::ClientError;
    use crate::model::{AnalysisResult, AnalyzeResponse, HealthRating};
    use crate::state::Phase;

    fn response(results: Vec<AnalysisResult>) -> AnalyzeResponse {
        AnalyzeResponse {
            status: Some("success".to_string()),
            count: Some(results.len()),
            results,
        }
    }

    #[tokio::test]
    async fn test_empty_registry_never_calls_backend() {
        let mut backend = MockAnalysisBackend::new();
        backend.expect_analyze().times(0);

        let state = ViewState::with_symbols(Vec::<&str>::new());
        let mut controller = AnalysisController::with_state(backend, state);

        assert_eq!(controller.analyze().await, Some(ErrorKind::Validation));
        assert_eq!(
            controller.state().error().map(ErrorKind::message),
            Some("Please add at least one company symbol.")
        );
        assert!(!controller.state().is_loading());
    }

    #[tokio::test]
    async fn test_success_populates_results_visible_by_rating() {
        let body = r#"{"results": [{"company_id": "TCS", "health_rating": "GOOD", "pros": ["p1"], "cons": ["c1"]}]}"#;
        let decoded = decode_analyze_body(body).unwrap();

        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_analyze()
            .withf(|request| {
                let ids: Vec<&str> = request.company_ids.iter().map(Symbol::as_str).collect();
                ids == ["TCS", "HDFCBANK"]
            })
            .times(1)
            .returning(move |_| Ok(decoded.clone()));

        let mut controller = AnalysisController::new(backend);
        assert_eq!(controller.analyze().await, None);

        let state = controller.state();
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert_eq!(state.results().len(), 1);

        for (filter, shown) in [
            (Filter::All, 1),
            (Filter::Rating(HealthRating::Good), 1),
            (Filter::Rating(HealthRating::Bad), 0),
            (Filter::Rating(HealthRating::Neutral), 0),
        ] {
            controller.set_filter(filter);
            assert_eq!(controller.state().visible().len(), shown, "filter {filter}");
        }
    }

    #[tokio::test]
    async fn test_missing_results_sets_protocol_error() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_analyze()
            .times(1)
            .returning(|_| decode_analyze_body("{}"));

        let mut controller = AnalysisController::new(backend);
        controller.analyze().await;

        let state = controller.state();
        assert_eq!(
            state.error().map(ErrorKind::message),
            Some("Unexpected response from server.")
        );
        assert!(state.results().is_empty());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_transport_failure_sets_backend_error() {
        let mut backend = MockAnalysisBackend::new();
        backend.expect_analyze().times(1).returning(|_| {
            Err(ClientError::Status {
                status: 502,
                body: "Bad Gateway".to_string(),
            })
        });

        let mut controller = AnalysisController::new(backend);
        assert_eq!(controller.analyze().await, Some(ErrorKind::Transport));

        let state = controller.state();
        assert_eq!(
            state.error().map(ErrorKind::message),
            Some("Could not contact backend. Is Django running on port 8000?")
        );
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_retry_after_failure_clears_error() {
        let mut backend = MockAnalysisBackend::new();
        let mut calls = 0;
        backend.expect_analyze().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(ClientError::MissingResults)
            } else {
                Ok(response(vec![AnalysisResult::new("TCS", Some(HealthRating::Bad))]))
            }
        });

        let mut controller = AnalysisController::new(backend);
        assert_eq!(controller.analyze().await, Some(ErrorKind::Protocol));
        assert_eq!(controller.analyze().await, None);
        assert!(controller.state().error().is_none());
        assert_eq!(controller.state().results().len(), 1);
    }

    #[tokio::test]
    async fn test_symbol_edits_flow_into_request() {
        let mut backend = MockAnalysisBackend::new();
        backend
            .expect_analyze()
            .withf(|request| {
                let ids: Vec<&str> = request.company_ids.iter().map(Symbol::as_str).collect();
                ids == ["HDFCBANK", "INFY"]
            })
            .times(1)
            .returning(|_| Ok(response(Vec::new())));

        let mut controller = AnalysisController::new(backend);
        controller.edit_input("infy");
        controller.add_symbol("infy");
        controller.add_symbol("INFY");
        controller.remove_symbol(Symbol::parse("tcs").unwrap());
        assert_eq!(controller.state().input(), "");

        controller.analyze().await;
        assert!(controller.state().results().is_empty());
        assert!(controller.state().error().is_none());
    }

    #[tokio::test]
    async fn test_stored_analyses_do_not_touch_view() {
        let mut backend = MockAnalysisBackend::new();
        backend.expect_stored_analyses().times(1).returning(|| {
            Ok(vec![StoredAnalysis {
                company_id: "TCS".to_string(),
                company_name: "Tata Consultancy Services".to_string(),
                health_rating: Some(HealthRating::Good),
                pros: vec!["Debt free".to_string()],
                cons: Vec::new(),
                analysis_date: None,
            }])
        });

        let controller = AnalysisController::new(backend);
        let stored = controller.stored_analyses().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(controller.state().results().is_empty());
    }
}
