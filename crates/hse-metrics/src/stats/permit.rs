use hse_core::model::{Ptw, PtwStatus};
use serde::Serialize;

/// Permit types treated as high risk on the permit register.
pub const HIGH_RISK_PERMIT_TYPES: &[&str] = &["Hot Work", "Confined Space Entry", "Lifting"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PermitStats {
    pub total: usize,
    pub active: usize,
    /// Submitted or awaiting approval.
    pub pending: usize,
    pub high_risk: usize,
}

#[must_use]
pub fn permit_stats(ptws: &[Ptw]) -> PermitStats {
    PermitStats {
        total: ptws.len(),
        active: ptws
            .iter()
            .filter(|p| p.status == Some(PtwStatus::Active))
            .count(),
        pending: ptws
            .iter()
            .filter(|p| matches!(p.status, Some(PtwStatus::Approval | PtwStatus::Submitted)))
            .count(),
        high_risk: ptws
            .iter()
            .filter(|p| HIGH_RISK_PERMIT_TYPES.contains(&p.kind.as_str()))
            .count(),
    }
}
