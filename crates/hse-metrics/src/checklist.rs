//! Checklist run scoring and integrity checks.
//!
//! A run's stored `score` is what the UI shows. [`score_results`] is the rule
//! that produced it at submission; [`verify_run_score`] re-applies the rule to
//! spot runs whose stored score no longer matches their results.

use hse_core::model::{CheckResult, ChecklistRun, ChecklistTemplate, RiskLevel, RunResult};
use serde::Serialize;
use tracing::warn;

use crate::round_half_up;

/// Pass/fail/na tallies and the derived percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChecklistScore {
    pub passed: usize,
    pub failed: usize,
    pub na: usize,
    /// `round(100 * passed / (passed + failed))`, 0 when nothing was applicable.
    pub score: i64,
}

impl ChecklistScore {
    /// Tally outcomes. `na` never affects the percentage.
    pub fn tally(outcomes: impl IntoIterator<Item = CheckResult>) -> Self {
        let mut tally = Self::default();
        for outcome in outcomes {
            match outcome {
                CheckResult::Pass => tally.passed += 1,
                CheckResult::Fail => tally.failed += 1,
                CheckResult::Na => tally.na += 1,
            }
        }

        let applicable = tally.passed + tally.failed;
        if applicable > 0 {
            #[allow(clippy::cast_precision_loss)]
            let ratio = tally.passed as f64 / applicable as f64;
            tally.score = round_half_up(100.0 * ratio);
        }
        tally
    }
}

/// Score a run's results. Results without a recognized value are not counted.
#[must_use]
pub fn score_results(results: &[RunResult]) -> ChecklistScore {
    ChecklistScore::tally(results.iter().filter_map(|r| r.result))
}

/// Stored vs recomputed score for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCheck {
    pub run_id: String,
    pub stored: Option<f64>,
    pub recomputed: i64,
    /// Runs without a stored score are consistent.
    pub consistent: bool,
}

#[must_use]
pub fn verify_run_score(run: &ChecklistRun) -> ScoreCheck {
    let recomputed = score_results(&run.results).score;
    #[allow(clippy::cast_precision_loss)]
    let consistent = run
        .score
        .is_none_or(|stored| (stored - recomputed as f64).abs() < f64::EPSILON);

    if !consistent {
        warn!(
            run_id = %run.id,
            stored = ?run.score,
            recomputed,
            "checklist score disagrees with results"
        );
    }

    ScoreCheck {
        run_id: run.id.clone(),
        stored: run.score,
        recomputed,
        consistent,
    }
}

/// The score to show: stored when present, else recomputed.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn display_score(run: &ChecklistRun) -> f64 {
    run.score
        .unwrap_or_else(|| score_results(&run.results).score as f64)
}

/// A failed item, resolved against its template for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedItem {
    pub item_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Failed results of `run`, in result order.
///
/// Item text comes from `template` in `lang` (falling back to English, then any
/// translation, then the item id).
#[must_use]
pub fn failed_items(
    run: &ChecklistRun,
    template: Option<&ChecklistTemplate>,
    lang: &str,
) -> Vec<FailedItem> {
    run.results
        .iter()
        .filter(|r| r.result == Some(CheckResult::Fail))
        .map(|r| {
            let item = template.and_then(|t| t.item(&r.item_id));
            FailedItem {
                item_id: r.item_id.clone(),
                text: item
                    .and_then(|i| i.text.resolve(lang))
                    .unwrap_or(&r.item_id)
                    .to_string(),
                risk_level: item.and_then(|i| i.risk_level),
                remarks: r.remarks.clone(),
            }
        })
        .collect()
}

/// Template title in `lang`, falling back to the template id.
#[must_use]
pub fn template_title<'a>(template: &'a ChecklistTemplate, lang: &str) -> &'a str {
    template.title.resolve(lang).unwrap_or(&template.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hse_core::model::{ChecklistItem, LocalizedText};
    use std::collections::BTreeMap;

    fn results(outcomes: &[Option<CheckResult>]) -> Vec<RunResult> {
        outcomes
            .iter()
            .enumerate()
            .map(|(i, outcome)| RunResult {
                item_id: (i + 1).to_string(),
                result: *outcome,
                ..RunResult::default()
            })
            .collect()
    }

    #[test]
    fn nothing_applicable_scores_zero() {
        let score = score_results(&results(&[Some(CheckResult::Na), Some(CheckResult::Na)]));
        assert_eq!(score, ChecklistScore { passed: 0, failed: 0, na: 2, score: 0 });
        assert_eq!(score_results(&[]).score, 0);
    }

    #[test]
    fn unrecognized_results_are_not_counted() {
        let score = score_results(&results(&[Some(CheckResult::Pass), None, Some(CheckResult::Fail)]));
        assert_eq!(score.passed + score.failed + score.na, 2);
        assert_eq!(score.score, 50);
    }

    #[test]
    fn integrity_check_compares_stored_score() {
        let mut run = ChecklistRun {
            id: "c-1".to_string(),
            results: results(&[
                Some(CheckResult::Pass),
                Some(CheckResult::Pass),
                Some(CheckResult::Fail),
            ]),
            score: Some(67.0),
            ..ChecklistRun::default()
        };
        assert!(verify_run_score(&run).consistent);

        run.score = Some(100.0);
        let check = verify_run_score(&run);
        assert!(!check.consistent);
        assert_eq!(check.recomputed, 67);
        assert!((display_score(&run) - 100.0).abs() < f64::EPSILON);

        run.score = None;
        assert!(verify_run_score(&run).consistent);
        assert!((display_score(&run) - 67.0).abs() < f64::EPSILON);
    }

    #[test]
    fn failed_items_resolve_template_text() {
        let mut translations = BTreeMap::new();
        translations.insert("en".to_string(), "Harness inspected".to_string());
        translations.insert("ar".to_string(), "تم فحص الحزام".to_string());
        let template = ChecklistTemplate {
            id: "t-1".to_string(),
            title: LocalizedText::from("Working at height"),
            items: vec![ChecklistItem {
                id: "1".to_string(),
                text: LocalizedText::Translations(translations),
                risk_level: Some(RiskLevel::High),
                ..ChecklistItem::default()
            }],
            ..ChecklistTemplate::default()
        };
        let mut run = ChecklistRun {
            results: results(&[Some(CheckResult::Fail), Some(CheckResult::Fail)]),
            ..ChecklistRun::default()
        };
        run.results[0].remarks = Some("frayed lanyard".to_string());

        let failed = failed_items(&run, Some(&template), "ar");
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].text, "تم فحص الحزام");
        assert_eq!(failed[0].risk_level, Some(RiskLevel::High));
        assert_eq!(failed[0].remarks.as_deref(), Some("frayed lanyard"));
        assert_eq!(failed[1].text, "2");

        assert_eq!(failed_items(&run, None, "en")[0].text, "1");
        assert_eq!(template_title(&template, "fr"), "Working at height");
    }
}
