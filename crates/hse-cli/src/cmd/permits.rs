//! `hse permits`: permit-to-work register.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clap::Args;
use hse_core::HseError;
use hse_metrics::filter::{PermitFilter, PermitGroup, RecordFilter, Search};
use hse_metrics::stats::{HIGH_RISK_PERMIT_TYPES, PermitStats, permit_stats};
use serde::Serialize;

use super::{Context, date_or_dash, or_dash};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode, truncate};

#[derive(Args, Debug)]
pub struct PermitsArgs {
    /// Register tab: all, active, draft or closed.
    #[arg(long, default_value = "all")]
    pub group: String,

    /// Case-insensitive text matched against the title and permit number.
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Debug, Serialize)]
pub struct PermitRow {
    pub id: String,
    pub permit_no: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Option<String>,
    pub title: String,
    pub creator: String,
    pub high_risk: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PermitsReport {
    pub filter: PermitFilter,
    /// Counted over every permit in the snapshot.
    pub stats: PermitStats,
    pub permits: Vec<PermitRow>,
}

pub fn build_report(args: &PermitsArgs, ctx: &Context) -> Result<PermitsReport, HseError> {
    let filter = PermitFilter {
        group: args.group.parse::<PermitGroup>()?,
        search: Search::new(&args.search),
    };
    let directory = ctx.directory();
    let permits = filter
        .apply(&ctx.snapshot.ptws)
        .into_iter()
        .map(|ptw| PermitRow {
            id: ptw.id.clone(),
            permit_no: ptw.payload.permit_no.clone(),
            kind: ptw.kind.clone(),
            status: ptw.status.map(|s| s.to_string()),
            title: ptw.title.clone(),
            creator: directory.display_name(&ptw.payload.creator_id).to_string(),
            high_risk: HIGH_RISK_PERMIT_TYPES.contains(&ptw.kind.as_str()),
            updated_at: ptw.updated_at,
        })
        .collect();

    Ok(PermitsReport {
        filter,
        stats: permit_stats(&ctx.snapshot.ptws),
        permits,
    })
}

/// Execute `hse permits`.
pub fn run_permits(args: &PermitsArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let report = build_report(args, ctx)?;
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &PermitsReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\tpermit_no\ttype\tstatus\tupdated\tcreator\ttitle")?;
    for row in &report.permits {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.permit_no,
            row.kind,
            or_dash(row.status.as_deref()),
            date_or_dash(row.updated_at),
            row.creator,
            row.title
        )?;
    }
    Ok(())
}

fn render_pretty(report: &PermitsReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Permits: {} ({} of {})",
            report.filter.group,
            report.permits.len(),
            report.stats.total
        ),
    )?;
    for row in &report.permits {
        let marker = if row.high_risk { "!" } else { " " };
        writeln!(
            w,
            "{marker} {:<12} {:<22} {:<16} {}",
            truncate(&row.permit_no, 12),
            truncate(&row.kind, 22),
            or_dash(row.status.as_deref()),
            truncate(&row.title, 30)
        )?;
    }
    pretty_rule(w)?;
    pretty_kv(w, "Active", report.stats.active.to_string())?;
    pretty_kv(w, "Pending", report.stats.pending.to_string())?;
    pretty_kv(w, "High risk", report.stats.high_risk.to_string())
}
