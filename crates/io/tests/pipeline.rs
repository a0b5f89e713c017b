use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use rosterlink_io::{CsvSource, LocalSink, RecordSource, ResultSink};
use rosterlink_recon::{run, RunConfig};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_config() -> RunConfig {
    let toml = std::fs::read_to_string(fixtures_dir().join("daily.recon.toml")).unwrap();
    RunConfig::from_toml(&toml).unwrap()
}

#[test]
fn csv_in_csv_and_zip_out() {
    let config = load_config();
    let input = CsvSource::from_config(&config.input, &fixtures_dir())
        .fetch()
        .unwrap();
    assert_eq!(input.events.rows.len(), 6);
    assert_eq!(input.reference.len(), 3);

    let result = run(&config, &input).unwrap();
    assert_eq!(result.summary.exported, 3);

    let out = tempfile::tempdir().unwrap();
    let sink = LocalSink::from_config(&config.output, out.path());
    let report = sink.persist(&result).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.csv_path, out.path().join("out/bulk_import.csv"));

    let csv = std::fs::read_to_string(&report.csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "vanid,event_id,custom_field_responses,utc_created_date,role_code,group,match,certainty"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("1001,E1,"));
    assert!(lines[1].ends_with(",AC-LEADER,north side coalition,North Side Coalition,1.00"));
    assert!(lines[2].ends_with(",AC-MEMBER,coalition north side,North Side Coalition,0.95"));
    assert!(lines[3].ends_with(",AC-MEMBER,southside org,Southside Org,1.00"));

    let archive_path = report.archive_path.unwrap();
    let mut archive = zip::ZipArchive::new(File::open(archive_path).unwrap()).unwrap();
    let mut entry = archive.by_name("bulk_import.csv").unwrap();
    let mut zipped = String::new();
    entry.read_to_string(&mut zipped).unwrap();
    assert_eq!(zipped, csv);
}

#[test]
fn archive_can_be_disabled() {
    let mut config = load_config();
    config.output.archive = String::new();

    let input = CsvSource::from_config(&config.input, &fixtures_dir())
        .fetch()
        .unwrap();
    let result = run(&config, &input).unwrap();

    let out = tempfile::tempdir().unwrap();
    let report = LocalSink::from_config(&config.output, out.path())
        .persist(&result)
        .unwrap();
    assert!(report.archive_path.is_none());
    assert!(!out.path().join("out/bulk_import.zip").exists());
}
