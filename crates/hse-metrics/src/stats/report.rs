use hse_core::model::Report;
use serde::Serialize;

use crate::risk::is_critical;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub total: usize,
    /// Anything not closed, including reports without a status.
    pub open: usize,
    /// Pre-control risk score of 15 or more.
    pub critical: usize,
}

#[must_use]
pub fn report_stats(reports: &[Report]) -> ReportStats {
    ReportStats {
        total: reports.len(),
        open: reports.iter().filter(|r| !r.is_closed()).count(),
        critical: reports
            .iter()
            .filter(|r| is_critical(&r.risk_pre_control))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hse_core::model::{ReportStatus, RiskMatrix};

    #[test]
    fn open_and_critical_counts() {
        let reports = vec![
            Report {
                status: Some(ReportStatus::Closed),
                risk_pre_control: RiskMatrix::new(5.0, 3.0),
                ..Report::default()
            },
            Report {
                status: Some(ReportStatus::Submitted),
                risk_pre_control: RiskMatrix::new(3.0, 4.0),
                ..Report::default()
            },
            Report::default(),
        ];
        assert_eq!(
            report_stats(&reports),
            ReportStats {
                total: 3,
                open: 2,
                critical: 1,
            }
        );
        assert_eq!(report_stats(&[]), ReportStats::default());
    }
}
