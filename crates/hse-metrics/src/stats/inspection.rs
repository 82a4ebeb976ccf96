use hse_core::model::{FindingStatus, Inspection, InspectionStatus, RiskLevel};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InspectionStats {
    pub total: usize,
    /// Closed or approved.
    pub completed: usize,
    pub in_progress: usize,
    /// Findings across all inspections still marked open.
    pub open_findings: usize,
    /// Findings across all inspections rated High or Critical.
    pub critical_findings: usize,
}

#[must_use]
pub fn inspection_stats(inspections: &[Inspection]) -> InspectionStats {
    let mut stats = InspectionStats {
        total: inspections.len(),
        ..InspectionStats::default()
    };

    for inspection in inspections {
        match inspection.status {
            Some(InspectionStatus::Closed | InspectionStatus::Approved) => stats.completed += 1,
            Some(InspectionStatus::InProgress) => stats.in_progress += 1,
            _ => {}
        }
        for finding in &inspection.findings {
            if finding.status == Some(FindingStatus::Open) {
                stats.open_findings += 1;
            }
            if finding.risk_level.is_some_and(RiskLevel::is_severe) {
                stats.critical_findings += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use hse_core::model::Finding;

    fn finding(status: FindingStatus, risk: RiskLevel) -> Finding {
        Finding {
            status: Some(status),
            risk_level: Some(risk),
            ..Finding::default()
        }
    }

    #[test]
    fn counts_inspections_and_findings() {
        let inspections = vec![
            Inspection {
                status: Some(InspectionStatus::Approved),
                findings: vec![
                    finding(FindingStatus::Open, RiskLevel::Critical),
                    finding(FindingStatus::Closed, RiskLevel::High),
                ],
                ..Inspection::default()
            },
            Inspection {
                status: Some(InspectionStatus::InProgress),
                findings: vec![finding(FindingStatus::Open, RiskLevel::Low)],
                ..Inspection::default()
            },
            Inspection {
                status: Some(InspectionStatus::Closed),
                ..Inspection::default()
            },
            Inspection::default(),
        ];

        assert_eq!(
            inspection_stats(&inspections),
            InspectionStats {
                total: 4,
                completed: 2,
                in_progress: 1,
                open_findings: 2,
                critical_findings: 2,
            }
        );
    }
}
