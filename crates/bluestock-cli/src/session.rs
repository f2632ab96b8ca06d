//! Interactive session: applies parsed commands to an analysis controller

use crate::commands::Command;
use bluestock_core::{AnalysisBackend, AnalysisController, Symbol, render};
use tracing::info;

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and keep reading
    Print(String),
    /// Stop the session
    Exit,
}

pub struct Session<B> {
    controller: AnalysisController<B>,
}

impl<B: AnalysisBackend> Session<B> {
    pub fn new(controller: AnalysisController<B>) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &AnalysisController<B> {
        &self.controller
    }

    /// Text shown before each input line
    pub fn prompt(&self) -> String {
        format!("bluestock [{}]> ", self.controller.state().companies().len())
    }

    pub async fn handle(&mut self, command: Command) -> Reply {
        let text = match command {
            Command::Input { text } => {
                self.controller.edit_input(text.clone());
                self.controller.add_symbol(&text);
                self.chips()
            },
            Command::Add { symbols } => {
                for raw in &symbols {
                    self.controller.add_symbol(raw);
                }
                self.chips()
            },
            Command::Remove { symbol } => {
                self.controller.remove_symbol(symbol);
                self.chips()
            },
            Command::List => self.chips(),
            Command::Analyze => {
                if self.controller.state().is_loading() {
                    return Reply::Print("Analysis already in progress.".to_string());
                }
                info!(
                    symbols = %self.symbol_list(),
                    "Analyzing"
                );
                self.controller.analyze().await;
                render::view(self.controller.state())
            },
            Command::Filter { filter } => {
                self.controller.set_filter(filter);
                render::view(self.controller.state())
            },
            Command::Show => render::view(self.controller.state()),
            Command::History => match self.controller.stored_analyses().await {
                Ok(analyses) => render::history(&analyses),
                Err(err) => format!("❌ {}", err.kind()),
            },
            Command::Help => Command::help().to_string(),
            Command::Exit => return Reply::Exit,
        };
        Reply::Print(text)
    }

    fn chips(&self) -> String {
        format!("Symbols: {}", render::chips(self.controller.state().companies()))
    }

    fn symbol_list(&self) -> String {
        self.controller
            .state()
            .companies()
            .iter()
            .map(Symbol::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
