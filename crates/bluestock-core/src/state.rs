//! View state and the reducer that transitions it
//!
//! Every mutation of [`ViewState`] goes through [`ViewState::apply`]. The
//! reducer never performs I/O: submitting returns an [`Effect`] describing the
//! request to send, and the outcome is fed back as another [`Action`].
//!
//! ```text
//! Idle --Submit--> Requesting --ReceiveSuccess/ReceiveError--> Idle
//! ```

use crate::error::ErrorKind;
use crate::filter::{self, Filter};
use crate::model::{AnalysisResult, AnalyzeRequest};
use crate::registry::SymbolRegistry;
use crate::symbol::Symbol;
use tracing::debug;

/// Symbols a fresh session starts with
pub const DEFAULT_SYMBOLS: [&str; 2] = ["TCS", "HDFCBANK"];

/// Whether a request is in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
}

/// Discrete user or backend events
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the pending input text
    EditInput(String),
    /// Add a raw symbol; always clears the pending input
    AddSymbol(String),
    RemoveSymbol(Symbol),
    /// Ask for an analysis of the current registry
    Submit,
    ReceiveSuccess(Vec<AnalysisResult>),
    ReceiveError(ErrorKind),
    SetFilter(Filter),
}

/// Side effect the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Analyze(AnalyzeRequest),
}

/// Everything the view renders
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    input: String,
    companies: SymbolRegistry,
    results: Vec<AnalysisResult>,
    filter: Filter,
    phase: Phase,
    error: Option<ErrorKind>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_symbols(DEFAULT_SYMBOLS)
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with the given symbols instead of the defaults
    pub fn with_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            input: String::new(),
            companies: symbols.into_iter().collect(),
            results: Vec::new(),
            filter: Filter::All,
            phase: Phase::Idle,
            error: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn companies(&self) -> &SymbolRegistry {
        &self.companies
    }

    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Requesting
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    /// Results under the current filter
    pub fn visible(&self) -> Vec<&AnalysisResult> {
        filter::visible(&self.results, self.filter)
    }

    /// Apply `action` and return the effect the caller has to run, if any.
    pub fn apply(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::EditInput(text) => {
                self.input = text;
                None
            },
            Action::AddSymbol(raw) => {
                if let Some(symbol) = self.companies.add(&raw) {
                    debug!(%symbol, "added symbol");
                }
                self.input.clear();
                None
            },
            Action::RemoveSymbol(symbol) => {
                if self.companies.remove(&symbol) {
                    debug!(%symbol, "removed symbol");
                }
                None
            },
            Action::SetFilter(filter) => {
                self.filter = filter;
                None
            },
            Action::Submit => self.submit(),
            Action::ReceiveSuccess(results) => {
                if self.finish() {
                    self.results = results;
                }
                None
            },
            Action::ReceiveError(kind) => {
                if self.finish() {
                    self.error = Some(kind);
                }
                None
            },
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.is_loading() {
            debug!("analysis already in flight, ignoring submit");
            return None;
        }
        if self.companies.is_empty() {
            self.results.clear();
            self.error = Some(ErrorKind::Validation);
            return None;
        }

        self.phase = Phase::Requesting;
        self.error = None;
        self.results.clear();
        Some(Effect::Analyze(AnalyzeRequest::new(self.companies.to_vec())))
    }

    /// Leave `Requesting`. Returns false for an outcome with no request in flight.
    fn finish(&mut self) -> bool {
        if self.phase != Phase::Requesting {
            debug!("dropping analysis outcome with no request in flight");
            return false;
        }
        self.phase = Phase::Idle;
        true
    }
}
