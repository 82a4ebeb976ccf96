//! `hse actions`: the action tracker.

use std::io::{self, Write};

use clap::Args;
use hse_core::HseError;
use hse_metrics::dashboard::ActionRow;
use hse_metrics::filter::{ActionFilter, RecordFilter, Search, Selection};
use hse_metrics::stats::{ActionStats, action_stats_with};
use serde::Serialize;

use super::{Context, date_or_dash, or_dash};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode, truncate};

#[derive(Args, Debug)]
pub struct ActionsArgs {
    /// Only actions of this project id.
    #[arg(long, default_value = "All")]
    pub project: String,

    /// Only actions with this stored status (Open, In Progress, Closed, ...).
    #[arg(long, default_value = "All")]
    pub status: String,

    /// Only actions owned by this user id.
    #[arg(long, default_value = "All")]
    pub owner: String,

    /// Case-insensitive text matched against the action and its source.
    #[arg(long, default_value = "")]
    pub search: String,
}

impl ActionsArgs {
    /// Parse the raw flag values into a filter.
    pub fn filter(&self) -> Result<ActionFilter, HseError> {
        Ok(ActionFilter {
            project: Selection::parse_as(&self.project, "project")?,
            status: Selection::parse_as(&self.status, "status")?,
            owner: Selection::parse_as(&self.owner, "owner")?,
            search: Search::new(&self.search),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ActionsReport {
    pub filter: ActionFilter,
    /// Actions in the snapshot before filtering.
    pub total: usize,
    /// Counted over the filtered actions.
    pub stats: ActionStats,
    pub shown: usize,
    pub actions: Vec<ActionRow>,
}

/// Build the report without rendering it.
pub fn build_report(args: &ActionsArgs, ctx: &Context) -> Result<ActionsReport, HseError> {
    let filter = args.filter()?;
    let windows = ctx.windows();
    let directory = ctx.directory();
    let kept = filter.apply(&ctx.snapshot.actions);
    let actions: Vec<ActionRow> = kept
        .iter()
        .map(|item| ActionRow::build(item, ctx.now, &windows, &directory))
        .collect();

    Ok(ActionsReport {
        total: ctx.snapshot.actions.len(),
        stats: action_stats_with(kept.iter().copied(), ctx.now, &windows),
        shown: actions.len(),
        filter,
        actions,
    })
}

/// Execute `hse actions`.
pub fn run_actions(args: &ActionsArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let report = build_report(args, ctx)?;
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &ActionsReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\tpriority\tstatus\tdue\towner\taction")?;
    for row in &report.actions {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.priority,
            row.status,
            date_or_dash(row.due_date),
            row.owner,
            row.action
        )?;
    }
    Ok(())
}

fn render_pretty(report: &ActionsReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Actions ({} of {})", report.shown, report.total),
    )?;
    if report.actions.is_empty() {
        writeln!(w, "No actions match.")?;
    }
    for row in &report.actions {
        writeln!(
            w,
            "{:<10} {:<8} {:<14} {:<17} {:<16} {}",
            truncate(&row.id, 10),
            row.priority.as_str(),
            row.status.as_str(),
            or_dash(row.due),
            truncate(&row.owner, 16),
            truncate(&row.action, 40)
        )?;
    }
    pretty_rule(w)?;
    let stats = &report.stats;
    pretty_kv(w, "Open", stats.open.to_string())?;
    pretty_kv(w, "In progress", stats.in_progress.to_string())?;
    pretty_kv(w, "Closed", stats.closed.to_string())?;
    pretty_kv(w, "Overdue", stats.overdue.to_string())?;
    pretty_kv(w, "Critical", stats.critical.to_string())
}
