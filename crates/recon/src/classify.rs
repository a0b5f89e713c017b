use serde::{Deserialize, Serialize};

/// Canonical group role of a respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Leader,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Leader => write!(f, "leader"),
        }
    }
}

/// Classify a free-text role answer by keyword containment.
///
/// "leader" is checked before "member", so an answer mentioning both is a
/// leader. Lowercasing is only for the comparison.
pub fn classify(value: Option<&str>) -> Option<Role> {
    let lowered = value?.to_lowercase();
    if lowered.contains("leader") {
        Some(Role::Leader)
    } else if lowered.contains("member") {
        Some(Role::Member)
    } else {
        None
    }
}

/// External codes assigned to each role by the import target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCodes {
    pub leader: String,
    pub member: String,
}

impl RoleCodes {
    pub fn code_of(&self, role: Option<Role>) -> Option<&str> {
        match role? {
            Role::Leader => Some(&self.leader),
            Role::Member => Some(&self.member),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codes() -> RoleCodes {
        RoleCodes {
            leader: "AC-100".into(),
            member: "AC-200".into(),
        }
    }

    #[test]
    fn keywords() {
        assert_eq!(classify(Some("Group Leader")), Some(Role::Leader));
        assert_eq!(classify(Some("I'm a MEMBER")), Some(Role::Member));
        assert_eq!(classify(Some("Volunteer")), None);
        assert_eq!(classify(Some("")), None);
        assert_eq!(classify(None), None);
    }

    #[test]
    fn leader_wins_over_member() {
        assert_eq!(classify(Some("member and leader")), Some(Role::Leader));
        assert_eq!(classify(Some("Leader / Member")), Some(Role::Leader));
    }

    #[test]
    fn keyword_inside_word() {
        assert_eq!(classify(Some("teamleaders")), Some(Role::Leader));
        assert_eq!(classify(Some("nonmember")), Some(Role::Member));
    }

    #[test]
    fn codes_follow_role() {
        let c = codes();
        assert_eq!(c.code_of(Some(Role::Leader)), Some("AC-100"));
        assert_eq!(c.code_of(Some(Role::Member)), Some("AC-200"));
        assert_eq!(c.code_of(None), None);
    }

    proptest! {
        #[test]
        fn any_text_with_leader_is_leader(prefix in ".{0,20}", suffix in ".{0,20}", upper in any::<bool>()) {
            let keyword = if upper { "LEADER" } else { "leader" };
            let text = format!("{prefix}{keyword}{suffix}");
            prop_assert_eq!(classify(Some(&text)), Some(Role::Leader));
        }

        #[test]
        fn member_without_leader_is_member(prefix in "[a-km-z ]{0,20}", suffix in "[a-km-z ]{0,20}") {
            // Alphabet excludes 'l', so "leader" cannot appear.
            let text = format!("{prefix}Member{suffix}");
            prop_assert_eq!(classify(Some(&text)), Some(Role::Member));
        }
    }
}
