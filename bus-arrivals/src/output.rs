//! Rendering of pipeline results.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::Serialize;

use crate::domain::{RankedArrival, RouteId};
use crate::pipeline::PipelineOutcome;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Text,
    /// Pretty-printed JSON document
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    attempts: usize,
    sampled_routes: &'a [RouteId],
    arrivals: Vec<ReportRow<'a>>,
}

#[derive(Serialize)]
struct ReportRow<'a> {
    #[serde(flatten)]
    arrival: &'a RankedArrival,
    expected_at: String,
}

/// Render an outcome in the requested format.
pub fn render(
    outcome: &PipelineOutcome,
    format: OutputFormat,
    now: DateTime<FixedOffset>,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome, now)),
        OutputFormat::Json => render_json(outcome, now),
    }
}

/// Render as a table, one arrival per line.
pub fn render_text(outcome: &PipelineOutcome, now: DateTime<FixedOffset>) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} arriving soon across {} route(s) (sample attempt {})",
        outcome.arrivals.len(),
        outcome.sampled_routes.len(),
        outcome.attempts
    );

    if outcome.arrivals.is_empty() {
        out.push_str("No buses arriving soon on the sampled routes.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>3}  {:<8} {:<14} {:>5}  {:<8}  {}",
        "#", "BUS", "PLATE", "ETA", "AT", "STATION"
    );
    for (i, arrival) in outcome.arrivals.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<8} {:<14} {:>5}  {:<8}  {}",
            i + 1,
            arrival.bus_number,
            arrival.plate_no,
            format_eta(arrival.eta_secs),
            expected_at(now, arrival.eta_secs).format("%H:%M:%S"),
            arrival.station_name
        );
    }

    out
}

/// Render as a JSON document.
pub fn render_json(
    outcome: &PipelineOutcome,
    now: DateTime<FixedOffset>,
) -> Result<String, serde_json::Error> {
    let report = Report {
        generated_at: now.to_rfc3339(),
        attempts: outcome.attempts,
        sampled_routes: &outcome.sampled_routes,
        arrivals: outcome
            .arrivals
            .iter()
            .map(|arrival| ReportRow {
                arrival,
                expected_at: expected_at(now, arrival.eta_secs).to_rfc3339(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

/// "m:ss" form of an ETA.
fn format_eta(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn expected_at(now: DateTime<FixedOffset>, eta_secs: u32) -> DateTime<FixedOffset> {
    now + TimeDelta::seconds(i64::from(eta_secs))
}
