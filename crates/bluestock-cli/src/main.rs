//! Bluestock analysis client
//!
//! An interactive command-line session for the Bluestock analysis backend.
//!
//! # Usage
//!
//! ```bash
//! # Point at the backend (defaults to http://localhost:8000)
//! export BLUESTOCK_API_BASE="http://localhost:8000"
//!
//! # Run the session
//! cargo run --bin bluestock -p bluestock-cli
//!
//! # Or analyze once and exit
//! cargo run --bin bluestock -p bluestock-cli -- --once -s infy -s tcs
//! ```

mod commands;
mod session;

use anyhow::Context;
use bluestock_core::{AnalysisController, ClientConfig, Filter, HttpBackend, ViewState, render};
use clap::Parser;
use commands::Command;
use session::{Reply, Session};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bluestock")]
#[command(about = "Interactive client for the Bluestock financial analysis service", long_about = None)]
struct Args {
    /// Backend base URL (overrides BLUESTOCK_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in seconds; requests run to completion when unset
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Starting symbol, repeatable; replaces TCS and HDFCBANK
    #[arg(short = 's', long = "symbol", value_name = "SYMBOL")]
    symbols: Vec<String>,

    /// Initial rating filter
    #[arg(short, long, default_value = "ALL")]
    filter: Filter,

    /// Analyze once, print the result and exit
    #[arg(long)]
    once: bool,
}

impl Args {
    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut builder = ClientConfig::builder();
        if let Some(base) = &self.api_base {
            builder = builder.api_base(base.clone());
        }
        if let Some(secs) = self.timeout {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if !self.symbols.is_empty() {
            builder = builder.default_symbols(self.symbols.iter().cloned());
        }
        builder.with_env().build().context("invalid client configuration")
    }
}

fn print_banner() {
    println!("{}", render::TITLE);
    println!("{}", render::SUBTITLE);
    println!();
    println!("{}", Command::help());
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    bluestock_utils::init_tracing();

    let args = Args::parse();
    let config = args.client_config()?;
    info!(api_base = %config.api_base, "Starting bluestock");

    let backend = HttpBackend::new(&config).context("failed to create HTTP client")?;
    let mut controller =
        AnalysisController::with_state(backend, ViewState::with_symbols(&config.default_symbols));
    controller.set_filter(args.filter);

    if args.once {
        let failed = controller.analyze().await;
        println!("{}", render::view(controller.state()));
        if let Some(kind) = failed {
            anyhow::bail!(kind.message());
        }
        return Ok(());
    }

    print_banner();
    let mut session = Session::new(controller);
    println!("{}\n", render::view(session.controller().state()));

    // Run REPL
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", session.prompt());
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!("\nGoodbye!");
                break;
            },
            Ok(_) => {},
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            },
        }

        let command = match Command::parse(&input) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}\n");
                continue;
            },
        };

        match session.handle(command).await {
            Reply::Print(text) => println!("{text}\n"),
            Reply::Exit => {
                println!("Goodbye!");
                break;
            },
        }
    }

    Ok(())
}
