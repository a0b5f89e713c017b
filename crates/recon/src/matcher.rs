use serde::Serialize;

use crate::similarity::weighted_ratio;

/// Outcome of resolving one group name against the reference names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// No group name to resolve; no candidates were scanned.
    NoQuery,
    /// Every candidate was absent or empty.
    NoCandidates,
    /// Best candidate scored under the cutoff.
    BelowCutoff { best: String, score: f64 },
    Matched { name: String, score: f64 },
}

impl Resolution {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// Collapse to `(match, certainty)`. Both are present or both absent.
    pub fn into_parts(self) -> (Option<String>, Option<f64>) {
        match self {
            Self::Matched { name, score } => (Some(name), Some(score)),
            _ => (None, None),
        }
    }
}

/// Best-match search over a borrowed snapshot of reference names.
#[derive(Debug, Clone, Copy)]
pub struct EntityResolver<'a> {
    candidates: &'a [String],
    cutoff: f64,
}

impl<'a> EntityResolver<'a> {
    pub fn new(candidates: &'a [String], cutoff: f64) -> Self {
        Self { candidates, cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Scan every candidate and keep the first one reaching the top score.
    pub fn resolve(&self, query: Option<&str>) -> Resolution {
        let Some(query) = query else {
            return Resolution::NoQuery;
        };

        let mut best: Option<(&'a str, f64)> = None;
        for candidate in self.candidates {
            if candidate.trim().is_empty() {
                continue;
            }
            let score = weighted_ratio(query, candidate);
            // Strictly greater: earlier candidates keep ties.
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate.as_str(), score));
            }
        }

        match best {
            None => Resolution::NoCandidates,
            Some((name, score)) if score >= self.cutoff => Resolution::Matched {
                name: name.to_string(),
                score,
            },
            Some((name, score)) => Resolution::BelowCutoff {
                best: name.to_string(),
                score,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_match_after_case_folding() {
        let refs = names(&["North Side Coalition", "Southside Org"]);
        let r = EntityResolver::new(&refs, 0.9).resolve(Some("north side coalition"));
        let (m, c) = r.into_parts();
        assert_eq!(m.as_deref(), Some("North Side Coalition"));
        assert!(c.unwrap() >= 0.9);
    }

    #[test]
    fn below_cutoff_is_absent() {
        let refs = names(&["North Side Coalition"]);
        let r = EntityResolver::new(&refs, 0.9).resolve(Some("xyz unmatched group"));
        assert!(matches!(r, Resolution::BelowCutoff { .. }));
        assert_eq!(r.into_parts(), (None, None));
    }

    #[test]
    fn absent_query_skips_scan() {
        let refs = names(&["North Side Coalition"]);
        assert_eq!(EntityResolver::new(&refs, 0.0).resolve(None), Resolution::NoQuery);
    }

    #[test]
    fn empty_reference() {
        let refs: Vec<String> = Vec::new();
        let r = EntityResolver::new(&refs, 0.0).resolve(Some("anything"));
        assert_eq!(r, Resolution::NoCandidates);
        assert_eq!(r.into_parts(), (None, None));
    }

    #[test]
    fn blank_candidates_never_selected() {
        let refs = names(&["", "   ", "Eastside Org"]);
        let r = EntityResolver::new(&refs, 0.0).resolve(Some("zzz"));
        match r {
            Resolution::Matched { name, .. } => assert_eq!(name, "Eastside Org"),
            other => panic!("expected match, got {other:?}"),
        }
    }

    #[test]
    fn first_candidate_wins_tie() {
        let refs = names(&["Riverside Group", "riverside group", "RIVERSIDE GROUP"]);
        let r = EntityResolver::new(&refs, 0.5).resolve(Some("riverside group"));
        assert_eq!(
            r,
            Resolution::Matched {
                name: "Riverside Group".into(),
                score: 1.0
            }
        );
    }

    #[test]
    fn cutoff_is_inclusive() {
        let refs = names(&["coalition north side"]);
        let r = EntityResolver::new(&refs, 0.95).resolve(Some("north side coalition"));
        assert!(r.is_match(), "got {r:?}");
    }

    proptest! {
        #[test]
        fn match_is_maximal_and_meets_cutoff(
            query in "[a-d ]{1,12}",
            candidates in proptest::collection::vec("[a-d ]{0,12}", 0..6),
            cutoff in 0.0f64..=1.0,
        ) {
            let r = EntityResolver::new(&candidates, cutoff).resolve(Some(&query));
            if let Resolution::Matched { name, score } = r {
                prop_assert!(score >= cutoff);
                prop_assert_eq!(score, weighted_ratio(&query, &name));
                for c in candidates.iter().filter(|c| !c.trim().is_empty()) {
                    prop_assert!(weighted_ratio(&query, c) <= score);
                }
            }
        }
    }
}
