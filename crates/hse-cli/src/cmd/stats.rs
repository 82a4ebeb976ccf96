//! `hse stats`: the dashboard overview.

use std::io::{self, Write};

use clap::Args;
use hse_metrics::DashboardView;
use hse_metrics::filter::ActionFilter;
use hse_metrics::stats::{SafetyRates, WorkforceFigures, safety_rates};
use serde::Serialize;

use super::Context;
use crate::output::{OutputMode, pretty_kv, pretty_section, render};

#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Exposure hours for the period; enables safety rates.
    #[arg(long)]
    pub manhours: Option<f64>,

    /// Recordable incidents in the period.
    #[arg(long, default_value_t = 0.0)]
    pub recordables: f64,

    /// Lost-time injuries in the period.
    #[arg(long, default_value_t = 0.0)]
    pub lti: f64,

    /// Fatalities in the period.
    #[arg(long, default_value_t = 0.0)]
    pub fatalities: f64,
}

impl StatsArgs {
    fn figures(&self) -> Option<WorkforceFigures> {
        self.manhours.map(|manhours| WorkforceFigures {
            manhours,
            recordables: self.recordables,
            lost_time_injuries: self.lti,
            fatalities: self.fatalities,
        })
    }
}

/// Report payload for `hse stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    #[serde(flatten)]
    pub view: DashboardView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workforce: Option<WorkforceFigures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<SafetyRates>,
}

pub fn build_report(args: &StatsArgs, ctx: &Context) -> StatsReport {
    let view = DashboardView::compute(
        &ctx.snapshot,
        &ActionFilter::default(),
        ctx.now,
        &ctx.windows(),
    );
    let workforce = args.figures();

    StatsReport {
        view,
        rates: workforce.as_ref().map(safety_rates),
        workforce,
    }
}

/// Execute `hse stats`.
pub fn run_stats(args: &StatsArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let report = build_report(args, ctx);
    render(output, &report, render_stats_human)
}

fn render_stats_human(report: &StatsReport, w: &mut dyn Write) -> io::Result<()> {
    let view = &report.view;
    writeln!(w, "As of {}", view.computed_at.format("%Y-%m-%d %H:%M UTC"))?;
    writeln!(w)?;

    let actions = &view.action_stats;
    pretty_section(w, "Actions")?;
    pretty_kv(w, "Total", actions.total.to_string())?;
    pretty_kv(w, "Open", actions.open.to_string())?;
    pretty_kv(w, "In progress", actions.in_progress.to_string())?;
    pretty_kv(w, "Closed", actions.closed.to_string())?;
    pretty_kv(w, "Overdue", actions.overdue.to_string())?;
    pretty_kv(w, "Critical", actions.critical.to_string())?;
    writeln!(w)?;

    let projects = &view.project_stats;
    pretty_section(w, "Projects")?;
    pretty_kv(w, "Total", projects.total.to_string())?;
    pretty_kv(w, "Active", projects.active.to_string())?;
    pretty_kv(w, "Overdue", projects.overdue.to_string())?;
    pretty_kv(w, "Budget health", format!("{}%", projects.budget_health))?;
    pretty_kv(w, "Avg progress", format!("{}%", projects.avg_progress))?;
    writeln!(w)?;

    pretty_section(w, "Reports and inspections")?;
    pretty_kv(
        w,
        "Reports",
        format!(
            "{} ({} open, {} critical)",
            view.report_stats.total, view.report_stats.open, view.report_stats.critical
        ),
    )?;
    let inspections = &view.inspection_stats;
    pretty_kv(
        w,
        "Inspections",
        format!(
            "{} ({} completed, {} in progress)",
            inspections.total, inspections.completed, inspections.in_progress
        ),
    )?;
    pretty_kv(
        w,
        "Findings",
        format!(
            "{} open, {} critical",
            inspections.open_findings, inspections.critical_findings
        ),
    )?;
    pretty_kv(
        w,
        "Permits",
        format!(
            "{} ({} active, {} pending, {} high risk)",
            view.permit_stats.total,
            view.permit_stats.active,
            view.permit_stats.pending,
            view.permit_stats.high_risk
        ),
    )?;
    pretty_kv(w, "Activity", format!("{} recent", view.feed.len()))?;

    if let Some(rates) = &report.rates {
        writeln!(w)?;
        pretty_section(w, "Safety rates")?;
        pretty_kv(w, "TRIR", format!("{:.2}", rates.trir))?;
        pretty_kv(w, "LTIFR", format!("{:.2}", rates.ltifr))?;
        pretty_kv(w, "Fatality rate", format!("{:.2}", rates.fatality_rate))?;
    }
    Ok(())
}
