use rosterlink_recon::classify::{classify, Role};
use rosterlink_recon::engine::run;
use rosterlink_recon::matcher::{EntityResolver, Resolution};
use rosterlink_recon::model::{EventRow, EventTable, ReconInput};
use rosterlink_recon::{FieldExtractor, RunConfig};

const CONFIG: &str = r#"
name = "Daily group import"
cutoff = 0.9

[fields]
role = "R1"
group = "G1"

[codes]
leader = "AC-LEADER"
member = "AC-MEMBER"
"#;

fn entry_blob(entries: &[(&str, &str)]) -> Option<String> {
    let items: Vec<String> = entries
        .iter()
        .map(|(id, value)| format!(r#"{{"custom_field_id":"{id}","text_value":"{value}"}}"#))
        .collect();
    Some(format!("[{}]", items.join(",")))
}

fn input() -> ReconInput {
    let rows = vec![
        // 0: leader, exact group
        (
            "1001",
            entry_blob(&[("R1", "Group Leader"), ("G1", "North Side Coalition")]),
        ),
        // 1: member, reordered group words
        (
            "1002",
            entry_blob(&[("G1", "coalition north side"), ("R1", "Member")]),
        ),
        // 2: no blob at all
        ("1003", None),
        // 3: role answer without a keyword
        (
            "1004",
            entry_blob(&[("R1", "Just curious"), ("G1", "Southside Org")]),
        ),
        // 4: group nobody knows
        (
            "1005",
            entry_blob(&[("R1", "leader"), ("G1", "xyz unmatched group")]),
        ),
        // 5: truncated export, lenient scan still finds both fields
        (
            "1006",
            Some(
                r#"[{"custom_field_id":"R1","text_value":"member"},{"custom_field_id":"G1","text_value":"SOUTHSIDE ORG"},{"custom_"#
                    .to_string(),
            ),
        ),
        // 6: duplicate of row 0
        (
            "1007",
            entry_blob(&[("R1", "Group Leader"), ("G1", "North Side Coalition")]),
        ),
    ];

    ReconInput {
        events: EventTable {
            headers: vec!["vanid".into()],
            rows: rows
                .into_iter()
                .map(|(id, blob)| EventRow {
                    values: vec![id.into()],
                    custom_field_blob: blob,
                })
                .collect(),
        },
        reference: vec![
            "North Side Coalition".into(),
            "Southside Org".into(),
            "".into(),
        ],
    }
}

#[test]
fn end_to_end_filter_and_summary() {
    let config = RunConfig::from_toml(CONFIG).unwrap();
    let result = run(&config, &input()).unwrap();

    assert_eq!(result.records.len(), 7);
    assert_eq!(result.summary.total_events, 7);
    assert_eq!(result.summary.leaders, 3);
    assert_eq!(result.summary.members, 2);
    assert_eq!(result.summary.with_group, 6);
    assert_eq!(result.summary.matched, 5);
    assert_eq!(result.summary.below_cutoff, 1);

    let ids: Vec<&str> = result.output.iter().map(|r| r.values[0].as_str()).collect();
    assert_eq!(ids, vec!["1001", "1002", "1006", "1007"]);
    assert_eq!(result.summary.exported, 4);

    let reordered = &result.output[1];
    assert_eq!(reordered.role, Some(Role::Member));
    assert_eq!(reordered.role_code.as_deref(), Some("AC-MEMBER"));
    assert_eq!(reordered.match_name(), Some("North Side Coalition"));
    assert_eq!(reordered.certainty(), Some(0.95));

    let truncated = &result.output[2];
    assert_eq!(truncated.group.as_deref(), Some("southside org"));
    assert_eq!(truncated.match_name(), Some("Southside Org"));
}

#[test]
fn every_output_record_has_role_and_match() {
    let config = RunConfig::from_toml(CONFIG).unwrap();
    let result = run(&config, &input()).unwrap();
    for r in &result.output {
        assert!(r.role.is_some());
        assert!(r.role_code.is_some());
        assert!(r.match_name().is_some());
        assert!(r.certainty().unwrap() >= config.cutoff);
    }
    for r in &result.records {
        assert_eq!(r.match_name().is_some(), r.certainty().is_some());
        if let Some(group) = &r.group {
            assert_eq!(group, &group.to_lowercase());
        }
    }
}

#[test]
fn runs_are_idempotent() {
    let config = RunConfig::from_toml(CONFIG).unwrap();
    let data = input();
    let first = run(&config, &data).unwrap();
    let second = run(&config, &data).unwrap();
    assert_eq!(first.records, second.records);
    assert_eq!(first.output, second.output);
    assert_eq!(first.summary, second.summary);
}

#[test]
fn invalid_config_fails_before_processing() {
    let mut config = RunConfig::from_toml(CONFIG).unwrap();
    config.cutoff = 2.0;
    assert!(run(&config, &input()).is_err());
}

#[test]
fn scenario_role_from_loose_blob() {
    let blob = r#"'...custom_field_id":"R1"...text_value":"Group Leader"...'"#;
    let answer = FieldExtractor::new("R1").unwrap().extract(Some(blob));
    assert_eq!(classify(answer.as_deref()), Some(Role::Leader));
}

#[test]
fn scenario_resolution_cutoffs() {
    let refs: Vec<String> = vec!["North Side Coalition".into(), "Southside Org".into()];
    let (m, c) = EntityResolver::new(&refs, 0.9)
        .resolve(Some("north side coalition"))
        .into_parts();
    assert_eq!(m.as_deref(), Some("North Side Coalition"));
    assert!(c.unwrap() >= 0.9);

    let refs: Vec<String> = vec!["North Side Coalition".into()];
    let r = EntityResolver::new(&refs, 0.9).resolve(Some("xyz unmatched group"));
    assert!(matches!(r, Resolution::BelowCutoff { .. }));
    assert_eq!(r.into_parts(), (None, None));
}

#[test]
fn result_serializes_output_only() {
    let config = RunConfig::from_toml(CONFIG).unwrap();
    let result = run(&config, &input()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["meta"]["config_name"], "Daily group import");
    assert_eq!(json["meta"]["reference_size"], 3);
    assert!(json.get("records").is_none());
    assert_eq!(json["output"].as_array().unwrap().len(), 4);
    assert_eq!(json["output"][0]["resolution"]["outcome"], "matched");
    assert_eq!(json["output"][0]["role"], "leader");
}
