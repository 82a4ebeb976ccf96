//! `hse projects`: portfolio analytics.

use std::io::{self, Write};

use clap::Args;
use hse_core::model::Project;
use hse_metrics::{percent, round_half_up};
use hse_metrics::stats::{
    ProjectStats, StatusSlice, elapsed_percent, is_project_overdue, project_stats,
    status_distribution,
};
use serde::Serialize;

use super::{Context, date_or_dash, or_dash};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode, truncate};

#[derive(Args, Debug, Default)]
pub struct ProjectsArgs {
    /// Only projects of this organization id.
    #[arg(long)]
    pub org: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub label: String,
    pub status: Option<String>,
    pub progress: i64,
    /// Percent of this project's budget already spent.
    pub spent: i64,
    /// Percent of the planned schedule elapsed.
    pub elapsed: Option<i64>,
    pub overdue: bool,
    pub finish_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProjectRow {
    fn build(project: &Project, ctx: &Context) -> Self {
        Self {
            id: project.id.clone(),
            label: project.label().to_string(),
            status: project.status.map(|s| s.to_string()),
            progress: round_half_up(project.progress.unwrap_or(0.0)),
            spent: percent(
                project.budget_spent.unwrap_or(0.0),
                project.budget.unwrap_or(0.0),
            ),
            elapsed: elapsed_percent(project, ctx.now),
            overdue: is_project_overdue(project, ctx.now),
            finish_date: project.finish_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectsReport {
    pub stats: ProjectStats,
    pub distribution: Vec<StatusSlice>,
    pub projects: Vec<ProjectRow>,
}

pub fn build_report(args: &ProjectsArgs, ctx: &Context) -> ProjectsReport {
    let projects: Vec<Project> = ctx
        .snapshot
        .projects
        .iter()
        .filter(|p| args.org.as_deref().is_none_or(|org| p.org_id == org))
        .cloned()
        .collect();
    let stats = project_stats(&projects, ctx.now);

    ProjectsReport {
        distribution: status_distribution(&stats),
        stats,
        projects: projects.iter().map(|p| ProjectRow::build(p, ctx)).collect(),
    }
}

/// Execute `hse projects`.
pub fn run_projects(args: &ProjectsArgs, ctx: &Context, output: OutputMode) -> anyhow::Result<()> {
    let report = build_report(args, ctx);
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &ProjectsReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "id\tstatus\tprogress\tspent\tfinish\toverdue\tname")?;
    for row in &report.projects {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            row.id,
            or_dash(row.status.as_deref()),
            row.progress,
            row.spent,
            date_or_dash(row.finish_date),
            row.overdue,
            row.label
        )?;
    }
    Ok(())
}

fn render_pretty(report: &ProjectsReport, w: &mut dyn Write) -> io::Result<()> {
    let stats = &report.stats;
    pretty_section(w, &format!("Projects ({})", stats.total))?;
    for row in &report.projects {
        let flag = if row.overdue { "OVERDUE" } else { "" };
        writeln!(
            w,
            "{:<24} {:<10} {:>4}% done {:>4}% spent {:>9} {}",
            truncate(&row.label, 24),
            or_dash(row.status.as_deref()),
            row.progress,
            row.spent,
            row.elapsed.map_or_else(String::new, |e| format!("{e}% time")),
            flag
        )?;
    }
    pretty_rule(w)?;
    pretty_kv(w, "Active", stats.active.to_string())?;
    pretty_kv(w, "Completed", stats.completed.to_string())?;
    pretty_kv(w, "Overdue", stats.overdue.to_string())?;
    pretty_kv(
        w,
        "Budget",
        format!(
            "{:.0} of {:.0} spent ({}%)",
            stats.total_spent, stats.total_budget, stats.budget_health
        ),
    )?;
    pretty_kv(w, "Avg progress", format!("{}%", stats.avg_progress))?;
    let slices: Vec<String> = report
        .distribution
        .iter()
        .map(|slice| format!("{} {}", slice.label, slice.value))
        .collect();
    pretty_kv(w, "Status", slices.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{"projects": [
        {"id": "p-1", "org_id": "o-1", "name": "Harbor Tower", "code": "HT", "status": "active",
         "budget": 1000, "budget_spent": 500, "progress": 40,
         "start_date": "2024-06-01T12:00:00Z", "finish_date": "2024-06-05T12:00:00Z"},
        {"id": "p-2", "org_id": "o-1", "name": "Depot", "status": "completed",
         "budget": 0, "budget_spent": 0, "progress": 100},
        {"id": "p-3", "org_id": "o-2", "name": "Bridge", "status": "pending", "budget": "n/a"}
    ]}"#;

    #[test]
    fn report_covers_every_project() {
        let ctx = Context::fixture(SNAPSHOT);
        let report = build_report(&ProjectsArgs::default(), &ctx);
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.overdue, 1);
        assert_eq!(report.stats.budget_health, 50);
        assert_eq!(report.stats.avg_progress, 47);

        let first = &report.projects[0];
        assert_eq!(first.label, "HT");
        assert_eq!(first.spent, 50);
        assert_eq!(first.elapsed, Some(100));
        assert!(first.overdue);
        assert_eq!(report.projects[2].spent, 0);
    }

    #[test]
    fn org_filter_scopes_stats() {
        let ctx = Context::fixture(SNAPSHOT);
        let report = build_report(
            &ProjectsArgs {
                org: Some("o-2".to_string()),
            },
            &ctx,
        );
        assert_eq!(report.stats.total, 1);
        assert_eq!(report.projects[0].id, "p-3");
        assert_eq!(report.distribution.len(), 1);
        assert_eq!(report.distribution[0].label, "Pending");
    }
}
