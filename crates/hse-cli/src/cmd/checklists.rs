//! `hse checklists`: checklist runs, scores and failed items.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use clap::Args;
use hse_core::HseError;
use hse_core::model::{ChecklistRun, RiskLevel};
use hse_metrics::checklist::{FailedItem, display_score, failed_items, template_title};
use hse_metrics::{ChecklistScore, score_results, verify_run_score};
use serde::Serialize;

use super::{Context, date_or_dash, or_dash};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode, truncate};

#[derive(Args, Debug, Default)]
pub struct ChecklistsArgs {
    /// Exit non-zero when a stored score disagrees with its results.
    #[arg(long)]
    pub verify: bool,

    /// Language for template text (default from `[checklist] language`).
    #[arg(long)]
    pub lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunRow {
    pub id: String,
    pub template: String,
    pub project_id: String,
    pub executed_by: String,
    pub executed_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    /// Stored score when present, else recomputed.
    pub score: f64,
    pub tally: ChecklistScore,
    pub consistent: bool,
    pub failed: Vec<FailedItem>,
}

#[derive(Debug, Serialize)]
pub struct ChecklistsReport {
    pub lang: String,
    pub runs: Vec<RunRow>,
    pub mismatched: usize,
}

pub fn build_report(args: &ChecklistsArgs, ctx: &Context) -> ChecklistsReport {
    let lang = args
        .lang
        .clone()
        .unwrap_or_else(|| ctx.config.checklist.language.clone());
    let directory = ctx.directory();

    let runs: Vec<RunRow> = ctx
        .snapshot
        .checklist_runs
        .iter()
        .map(|run: &ChecklistRun| {
            let template = ctx
                .snapshot
                .checklist_templates
                .iter()
                .find(|t| t.id == run.template_id);
            RunRow {
                id: run.id.clone(),
                template: template.map_or_else(
                    || run.template_id.clone(),
                    |t| template_title(t, &lang).to_string(),
                ),
                project_id: run.project_id.clone(),
                executed_by: directory.display_name(&run.executed_by_id).to_string(),
                executed_at: run.executed_at,
                status: run.status.map(|s| s.to_string()),
                score: display_score(run),
                tally: score_results(&run.results),
                consistent: verify_run_score(run).consistent,
                failed: failed_items(run, template, &lang),
            }
        })
        .collect();

    ChecklistsReport {
        mismatched: runs.iter().filter(|r| !r.consistent).count(),
        lang,
        runs,
    }
}

/// Execute `hse checklists`.
pub fn run_checklists(
    args: &ChecklistsArgs,
    ctx: &Context,
    output: OutputMode,
) -> anyhow::Result<()> {
    let report = build_report(args, ctx);
    render_mode(output, &report, render_text, render_pretty)?;

    if args.verify && report.mismatched > 0 {
        return Err(HseError::ScoreMismatch {
            runs: report.mismatched,
        }
        .into());
    }
    Ok(())
}

fn render_text(report: &ChecklistsReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\ttemplate\texecuted\tscore\tpassed\tfailed\tna\tconsistent")?;
    for row in &report.runs {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            row.template,
            date_or_dash(row.executed_at),
            row.score,
            row.tally.passed,
            row.tally.failed,
            row.tally.na,
            row.consistent
        )?;
    }
    Ok(())
}

fn render_pretty(report: &ChecklistsReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Checklist runs ({})", report.runs.len()))?;
    for row in &report.runs {
        let check = if row.consistent {
            String::new()
        } else {
            format!("  (results give {}%)", row.tally.score)
        };
        writeln!(
            w,
            "{:<10} {:<28} {:<10} {:>5}%{check}",
            truncate(&row.id, 10),
            truncate(&row.template, 28),
            date_or_dash(row.executed_at),
            row.score
        )?;
        writeln!(
            w,
            "{:<10} {} by {}, {} passed, {} failed, {} n/a",
            "",
            or_dash(row.status.as_deref()),
            row.executed_by,
            row.tally.passed,
            row.tally.failed,
            row.tally.na
        )?;
        for item in &row.failed {
            let level = item.risk_level.map_or("", RiskLevel::as_str);
            writeln!(w, "{:<10} x {} {level}", "", truncate(&item.text, 48))?;
        }
    }
    pretty_rule(w)?;
    pretty_kv(w, "Mismatched", report.mismatched.to_string())
}
