//! `hse reports`: incident report register.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clap::Args;
use hse_core::HseError;
use hse_core::model::{Report, RiskLevel};
use hse_metrics::filter::{RecordFilter, ReportFilter, Search, Selection};
use hse_metrics::risk::risk_level;
use hse_metrics::stats::{ReportStats, report_stats};
use serde::Serialize;

use super::{Context, date_or_dash, or_dash};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode, truncate};

#[derive(Args, Debug)]
pub struct ReportsArgs {
    /// Only reports of this type (Incident, Near Miss, ...).
    #[arg(long = "type", default_value = "All")]
    pub kind: String,

    /// Only reports with this status (draft, submitted, under_review, active, closed).
    #[arg(long, default_value = "All")]
    pub status: String,

    /// Case-insensitive text matched against the description and id.
    #[arg(long, default_value = "")]
    pub search: String,
}

impl ReportsArgs {
    pub fn filter(&self) -> Result<ReportFilter, HseError> {
        Ok(ReportFilter {
            kind: Selection::parse_as(&self.kind, "report type")?,
            status: Selection::parse_as(&self.status, "report status")?,
            search: Search::new(&self.search),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub risk: RiskLevel,
    pub reporter: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ReportsReport {
    pub filter: ReportFilter,
    /// Counted over every report in the snapshot.
    pub stats: ReportStats,
    pub reports: Vec<ReportRow>,
}

pub fn build_report(args: &ReportsArgs, ctx: &Context) -> Result<ReportsReport, HseError> {
    let filter = args.filter()?;
    let directory = ctx.directory();
    let reports = filter
        .apply(&ctx.snapshot.reports)
        .into_iter()
        .map(|report: &Report| ReportRow {
            id: report.id.clone(),
            kind: report.kind.clone(),
            status: report.status.map(|s| s.to_string()),
            occurred_at: report.occurred_at,
            risk: risk_level(&report.risk_pre_control),
            reporter: directory.display_name(&report.reporter_id).to_string(),
            description: report.description.clone(),
        })
        .collect();

    Ok(ReportsReport {
        filter,
        stats: report_stats(&ctx.snapshot.reports),
        reports,
    })
}

/// Execute `hse reports`.
pub fn run_reports(args: &ReportsArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let report = build_report(args, ctx)?;
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &ReportsReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\ttype\tstatus\toccurred\trisk\treporter\tdescription")?;
    for row in &report.reports {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.kind,
            or_dash(row.status.as_deref()),
            date_or_dash(row.occurred_at),
            row.risk,
            row.reporter,
            row.description
        )?;
    }
    Ok(())
}

fn render_pretty(report: &ReportsReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Reports ({} of {})", report.reports.len(), report.stats.total),
    )?;
    for row in &report.reports {
        writeln!(
            w,
            "{:<10} {:<12} {:<12} {:<10} {:<8} {}",
            truncate(&row.id, 10),
            truncate(&row.kind, 12),
            or_dash(row.status.as_deref()),
            date_or_dash(row.occurred_at),
            row.risk.as_str(),
            truncate(&row.description, 30)
        )?;
    }
    pretty_rule(w)?;
    pretty_kv(w, "Open", report.stats.open.to_string())?;
    pretty_kv(w, "Critical", report.stats.critical.to_string())
}
