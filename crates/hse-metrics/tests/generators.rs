#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use hse_core::model::{
    ActionItem, ActionSource, ActionStatus, CheckResult, Inspection, Priority, Project,
    ProjectStatus, Ptw, PtwPayload, Report, RiskMatrix, RunResult, User,
};
use proptest::prelude::*;
use proptest::sample::select;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn arb_instant() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    // ±60 days around `now`, at millisecond resolution.
    prop::option::of((-5_184_000_000_i64..5_184_000_000).prop_map(|ms| now() + Duration::milliseconds(ms)))
}

fn arb_id(prefix: &'static str) -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), (0u8..4).prop_map(move |n| format!("{prefix}-{n}"))]
}

pub fn arb_action() -> impl Strategy<Value = ActionItem> {
    (
        arb_id("a"),
        "[a-zA-Z ]{0,12}",
        arb_id("u"),
        arb_id("p"),
        arb_instant(),
        prop::option::of(select(ActionStatus::ALL)),
        prop::option::of(select(Priority::ALL)),
        "[a-zA-Z ]{0,12}",
    )
        .prop_map(|(id, action, owner_id, project_id, due_date, status, priority, source)| {
            ActionItem {
                id,
                action,
                owner_id,
                project_id,
                due_date,
                status,
                priority,
                source: ActionSource {
                    kind: None,
                    id: String::new(),
                    description: source,
                },
            }
        })
}

pub fn arb_project() -> impl Strategy<Value = Project> {
    (
        prop::option::of(select(ProjectStatus::ALL)),
        prop::option::of(0.0f64..1.0e7),
        prop::option::of(0.0f64..1.0e7),
        prop::option::of(0.0f64..100.0),
        arb_instant(),
        arb_instant(),
    )
        .prop_map(|(status, budget, budget_spent, progress, start_date, finish_date)| Project {
            status,
            budget,
            budget_spent,
            progress,
            start_date,
            finish_date,
            ..Project::default()
        })
}

pub fn arb_results() -> impl Strategy<Value = Vec<RunResult>> {
    prop::collection::vec(prop::option::of(select(CheckResult::ALL)), 0..24).prop_map(|outcomes| {
        outcomes
            .into_iter()
            .enumerate()
            .map(|(i, result)| RunResult {
                item_id: i.to_string(),
                result,
                ..RunResult::default()
            })
            .collect()
    })
}

pub fn arb_report() -> impl Strategy<Value = Report> {
    (arb_id("r"), arb_id("u"), arb_instant(), prop::option::of(1.0f64..5.0)).prop_map(
        |(id, reporter_id, occurred_at, severity)| Report {
            id,
            reporter_id,
            occurred_at,
            risk_pre_control: RiskMatrix {
                severity,
                likelihood: Some(3.0),
            },
            ..Report::default()
        },
    )
}

pub fn arb_inspection() -> impl Strategy<Value = Inspection> {
    (arb_id("i"), arb_id("u"), arb_instant()).prop_map(|(id, person_responsible_id, schedule_at)| {
        Inspection {
            id,
            person_responsible_id,
            schedule_at,
            ..Inspection::default()
        }
    })
}

pub fn arb_ptw() -> impl Strategy<Value = Ptw> {
    (arb_id("w"), arb_id("u"), arb_instant()).prop_map(|(id, creator_id, updated_at)| Ptw {
        id,
        updated_at,
        payload: PtwPayload {
            creator_id,
            permit_no: String::new(),
        },
        ..Ptw::default()
    })
}

pub fn arb_users() -> impl Strategy<Value = Vec<User>> {
    prop::collection::vec(
        (arb_id("u"), "[A-Z][a-z]{0,6}").prop_map(|(id, name)| User {
            id,
            name,
            ..User::default()
        }),
        0..4,
    )
}
