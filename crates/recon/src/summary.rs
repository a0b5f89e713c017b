use crate::classify::Role;
use crate::matcher::Resolution;
use crate::model::{ReconSummary, ResolvedEvent};

/// Compute summary statistics from augmented records.
pub fn compute_summary(records: &[ResolvedEvent]) -> ReconSummary {
    let mut summary = ReconSummary {
        total_events: records.len(),
        ..ReconSummary::default()
    };

    for r in records {
        match r.role {
            Some(Role::Leader) => summary.leaders += 1,
            Some(Role::Member) => summary.members += 1,
            None => {}
        }
        if r.group.is_some() {
            summary.with_group += 1;
        }
        match r.resolution {
            Resolution::Matched { .. } => summary.matched += 1,
            Resolution::BelowCutoff { .. } => summary.below_cutoff += 1,
            Resolution::NoCandidates => summary.no_candidates += 1,
            Resolution::NoQuery => {}
        }
        if r.is_exportable() {
            summary.exported += 1;
        }
    }
    summary.with_role = summary.leaders + summary.members;

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(role: Option<Role>, group: Option<&str>, resolution: Resolution) -> ResolvedEvent {
        ResolvedEvent {
            index: 0,
            values: vec![],
            role,
            role_code: None,
            group: group.map(String::from),
            resolution,
        }
    }

    fn matched() -> Resolution {
        Resolution::Matched {
            name: "North Side Coalition".into(),
            score: 1.0,
        }
    }

    #[test]
    fn summary_counts() {
        let records = vec![
            record(Some(Role::Leader), Some("north side coalition"), matched()),
            record(Some(Role::Member), Some("north side"), matched()),
            record(None, Some("north side"), matched()),
            record(
                Some(Role::Member),
                Some("xyz"),
                Resolution::BelowCutoff {
                    best: "North Side Coalition".into(),
                    score: 0.3,
                },
            ),
            record(None, None, Resolution::NoQuery),
        ];
        let summary = compute_summary(&records);
        assert_eq!(summary.total_events, 5);
        assert_eq!(summary.with_role, 3);
        assert_eq!(summary.leaders, 1);
        assert_eq!(summary.members, 2);
        assert_eq!(summary.with_group, 4);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.below_cutoff, 1);
        assert_eq!(summary.no_candidates, 0);
        assert_eq!(summary.exported, 2);
    }
}
