//! `hse feed`: recent activity across reports, inspections and permits.

use std::borrow::Cow;
use std::io::{self, Write};

use clap::Args;
use hse_core::HseError;
use hse_metrics::feed::UnresolvedActor;
use hse_metrics::filter::{RecordFilter, Selection};
use hse_metrics::{Activity, ActivityKind, assemble_feed};
use serde::Serialize;

use super::{Context, or_dash};
use crate::output::{OutputMode, pretty_rule, pretty_section, render_mode, truncate};

#[derive(Args, Debug, Default)]
pub struct FeedArgs {
    /// Only activity on this project id.
    #[arg(long)]
    pub project: Option<String>,

    /// Only one kind of activity: all, report, inspection or ptw.
    #[arg(long = "type", default_value = "all")]
    pub kind: String,

    /// Maximum entries to show (default from `[feed] limit`).
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct FeedReport {
    #[serde(rename = "type")]
    pub kind: Selection<ActivityKind>,
    /// Matching entries before the limit was applied.
    pub total: usize,
    pub entries: Vec<Activity>,
    pub unresolved: Vec<UnresolvedActor>,
}

pub fn build_report(args: &FeedArgs, ctx: &Context) -> Result<FeedReport, HseError> {
    let kind: Selection<ActivityKind> = Selection::parse_as(&args.kind, "activity type")?;
    let snapshot = args.project.as_deref().map_or_else(
        || Cow::Borrowed(&ctx.snapshot),
        |project| Cow::Owned(ctx.snapshot.scoped_to_project(project)),
    );

    let feed = assemble_feed(
        &snapshot.reports,
        &snapshot.inspections,
        &snapshot.ptws,
        &snapshot.users,
    );
    let matching = kind.apply(&feed.entries);
    let limit = args.limit.unwrap_or(ctx.config.feed.limit);

    Ok(FeedReport {
        total: matching.len(),
        entries: matching.into_iter().take(limit).cloned().collect(),
        unresolved: feed.unresolved,
        kind,
    })
}

/// Execute `hse feed`.
pub fn run_feed(args: &FeedArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let report = build_report(args, ctx)?;
    render_mode(output, &report, render_text, render_pretty)
}

fn timestamp(activity: &Activity) -> String {
    activity.timestamp.map_or_else(
        || "-".to_string(),
        |at| at.format("%Y-%m-%d %H:%M").to_string(),
    )
}

fn render_text(report: &FeedReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "timestamp\ttype\tid\tstatus\tuser\ttitle")?;
    for entry in &report.entries {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            timestamp(entry),
            entry.kind,
            entry.id,
            or_dash(entry.status.as_deref()),
            entry.user,
            entry.title
        )?;
    }
    Ok(())
}

fn render_pretty(report: &FeedReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!("Activity ({} of {})", report.entries.len(), report.total),
    )?;
    if report.entries.is_empty() {
        writeln!(w, "No recent activity.")?;
    }
    for entry in &report.entries {
        writeln!(
            w,
            "{:<16} {:<10} {:<18} {}",
            timestamp(entry),
            entry.kind.as_str(),
            truncate(&entry.user, 18),
            truncate(&entry.title, 30)
        )?;
        if !entry.description.is_empty() {
            writeln!(w, "{:<16} {}", "", truncate(&entry.description, 54))?;
        }
    }
    if !report.unresolved.is_empty() {
        pretty_rule(w)?;
        writeln!(
            w,
            "{} record(s) left out: actor not found",
            report.unresolved.len()
        )?;
    }
    Ok(())
}
