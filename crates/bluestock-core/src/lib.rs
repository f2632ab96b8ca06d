//! Client for the Bluestock financial analysis service
//!
//! A session keeps a list of ticker symbols, sends them to the analysis
//! endpoint in one batch and shows the returned pros/cons and health rating
//! for each company, optionally filtered by rating.
//!
//! # Architecture
//!
//! - [`state::ViewState`] holds everything the view shows and is only changed
//!   through its reducer ([`state::Action`] in, optional [`state::Effect`] out)
//! - [`backend::AnalysisBackend`] is the seam to the remote service;
//!   [`backend::HttpBackend`] is the reqwest implementation
//! - [`controller::AnalysisController`] runs the effects against a backend and
//!   feeds the outcome back into the reducer
//! - [`filter`] and [`render`] derive what is visible from the state
//!
//! # Example
//!
//! ```rust,no_run
//! use bluestock_core::{AnalysisController, ClientConfig, HttpBackend, render};
//!
//! # async fn run() -> bluestock_core::Result<()> {
//! let config = ClientConfig::default().with_env();
//! let backend = HttpBackend::new(&config)?;
//! let mut controller = AnalysisController::new(backend);
//!
//! controller.add_symbol("infy");
//! controller.analyze().await;
//! println!("{}", render::view(controller.state()));
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod model;
pub mod registry;
pub mod render;
pub mod state;
pub mod symbol;

// Re-export main types for convenience
pub use backend::{AnalysisBackend, HttpBackend};
pub use config::ClientConfig;
pub use controller::AnalysisController;
pub use error::{ClientError, ErrorKind, Result};
pub use filter::{Filter, RatingStyle, visible};
pub use model::{AnalysisResult, AnalyzeRequest, HealthRating, MetricsSummary, StoredAnalysis};
pub use registry::SymbolRegistry;
pub use state::{Action, Effect, Phase, ViewState};
pub use symbol::Symbol;
