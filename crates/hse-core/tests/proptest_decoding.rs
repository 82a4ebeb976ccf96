use hse_core::Snapshot;
use hse_core::model::{ActionItem, ChecklistRun, Inspection, Project, Ptw, Report, User};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        (-1.0e12f64..1.0e12).prop_map(|n| json!(n)),
        "[ -~]{0,16}".prop_map(Value::String),
        Just(json!("2024-03-15")),
        Just(json!("Closed")),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn arb_record(fields: &'static [&'static str]) -> impl Strategy<Value = Value> {
    prop::collection::vec(arb_json(), fields.len()).prop_map(move |values| {
        Value::Object(
            fields
                .iter()
                .map(|f| (*f).to_string())
                .zip(values)
                .collect::<Map<_, _>>(),
        )
    })
}

const ACTION_FIELDS: &[&str] = &[
    "id", "action", "owner_id", "project_id", "due_date", "status", "priority", "source",
];
const PROJECT_FIELDS: &[&str] = &[
    "id", "name", "status", "budget", "budget_spent", "progress", "start_date", "finish_date",
];
const REPORT_FIELDS: &[&str] = &[
    "id", "reporter_id", "type", "status", "occurred_at", "description", "risk_pre_control",
];
const INSPECTION_FIELDS: &[&str] = &[
    "id", "title", "person_responsible_id", "status", "schedule_at", "findings",
];
const PTW_FIELDS: &[&str] = &["id", "type", "status", "title", "payload", "updated_at"];
const RUN_FIELDS: &[&str] = &["id", "template_id", "status", "score", "results", "executed_at"];
const USER_FIELDS: &[&str] = &["id", "name", "email", "role", "status"];

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn any_field_values_decode(
        action in arb_record(ACTION_FIELDS),
        project in arb_record(PROJECT_FIELDS),
        report in arb_record(REPORT_FIELDS),
        inspection in arb_record(INSPECTION_FIELDS),
        ptw in arb_record(PTW_FIELDS),
        run in arb_record(RUN_FIELDS),
        user in arb_record(USER_FIELDS),
    ) {
        prop_assert!(serde_json::from_value::<ActionItem>(action).is_ok());
        prop_assert!(serde_json::from_value::<Project>(project).is_ok());
        prop_assert!(serde_json::from_value::<Report>(report).is_ok());
        prop_assert!(serde_json::from_value::<Inspection>(inspection).is_ok());
        prop_assert!(serde_json::from_value::<Ptw>(ptw).is_ok());
        prop_assert!(serde_json::from_value::<ChecklistRun>(run).is_ok());
        prop_assert!(serde_json::from_value::<User>(user).is_ok());
    }

    #[test]
    fn any_collection_values_decode(collections in arb_record(&[
        "actions", "projects", "reports", "inspections", "ptws",
        "checklist_templates", "checklist_runs", "users",
    ])) {
        let raw = collections.to_string();
        prop_assert!(Snapshot::from_json_str(&raw).is_ok());
    }

    #[test]
    fn decoded_numbers_are_finite(budget in arb_json(), progress in arb_json()) {
        let project: Project = serde_json::from_value(json!({
            "budget": budget,
            "progress": progress,
        })).unwrap();
        prop_assert!(project.budget.is_none_or(f64::is_finite));
        prop_assert!(project.progress.is_none_or(f64::is_finite));
    }
}
