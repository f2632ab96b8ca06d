//! Plain-text rendering of the view state

use crate::filter::{Filter, RatingStyle};
use crate::model::{AnalysisResult, StoredAnalysis};
use crate::registry::SymbolRegistry;
use crate::state::ViewState;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub const TITLE: &str = "Bluestock ML Financial Analysis";
pub const SUBTITLE: &str = "Enter stock symbols and generate ML-style pros and cons.";
pub const EMPTY_HINT: &str = "Run an analysis to see results.";
const DETAILS_LABEL: &str = "View full Bluestock analysis →";

/// Label of the analyze control
pub fn analyze_label(state: &ViewState) -> &'static str {
    if state.is_loading() {
        "Analyzing..."
    } else {
        "Analyze"
    }
}

/// One chip per registered symbol
pub fn chips(companies: &SymbolRegistry) -> String {
    if companies.is_empty() {
        return "(no symbols)".to_string();
    }
    companies
        .iter()
        .map(|symbol| format!("[{symbol} ×]"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Filter choices with the active one bracketed
pub fn filter_bar(active: Filter) -> String {
    Filter::CHOICES
        .iter()
        .map(|&choice| {
            if choice == active {
                format!("[{choice}]")
            } else {
                choice.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// A single result card
pub fn card(result: &AnalysisResult) -> String {
    let style = RatingStyle::of(result.health_rating);
    let badge = result
        .health_rating
        .map(|rating| rating.to_string())
        .unwrap_or_default();

    let mut out = format!("┌─ ({}) {}  {}\n", style.class(), result.display_name(), badge);

    if let Some(url) = &result.details_url {
        out.push_str(&format!("│ {DETAILS_LABEL} {url}\n"));
    }

    if let Some(metrics) = &result.metrics_summary {
        out.push_str(&format!(
            "│ 10Y Sales: {}\n",
            metrics.sales_growth_10y.as_deref().unwrap_or("")
        ));
        out.push_str(&format!(
            "│ 10Y ROE: {}\n",
            metrics.roe_10y.as_deref().unwrap_or("")
        ));
        if let Some(profit) = &metrics.profit_growth_10y {
            out.push_str(&format!("│ 10Y Profit: {profit}\n"));
        }
        if let Some(sales) = &metrics.sales_growth_5y {
            out.push_str(&format!("│ 5Y Sales: {sales}\n"));
        }
    }

    out.push_str("│ Pros\n");
    for pro in &result.pros {
        out.push_str(&format!("│   + {pro}\n"));
    }
    out.push_str("│ Cons\n");
    for con in &result.cons {
        out.push_str(&format!("│   - {con}\n"));
    }
    out.push_str("└─");
    out
}

/// The whole view: chips, error, filter bar, then visible cards or the hint
pub fn view(state: &ViewState) -> String {
    let mut sections = vec![
        format!("Symbols: {}", chips(state.companies())),
        format!("<{}>", analyze_label(state)),
    ];

    if let Some(error) = state.error() {
        sections.push(format!("❌ {error}"));
    }

    sections.push(format!("Filter: {}", filter_bar(state.filter())));

    for result in state.visible() {
        sections.push(card(result));
    }

    if !state.is_loading() && state.results().is_empty() {
        sections.push(EMPTY_HINT.to_string());
    }

    sections.join("\n\n")
}

/// Table of analyses stored by the backend
pub fn history(analyses: &[StoredAnalysis]) -> String {
    if analyses.is_empty() {
        return "No stored analyses.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Company", "Name", "Rating", "Pros", "Cons", "Analyzed"]);

    for analysis in analyses {
        table.add_row(vec![
            analysis.company_id.clone(),
            analysis.company_name.clone(),
            analysis
                .health_rating
                .map(|rating| rating.to_string())
                .unwrap_or_else(|| "-".to_string()),
            analysis.pros.len().to_string(),
            analysis.cons.len().to_string(),
            analysis
                .analyzed_at()
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table.to_string()
}
