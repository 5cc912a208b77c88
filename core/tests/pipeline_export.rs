use merit_core::export::{ExportConfig, MeritExporter};
use merit_core::run::MeritPipeline;
use merit_core::validator::MeritListValidator;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), body).unwrap();
}

fn seed_inputs(root: &Path) {
    let marks = root.join("marksheets");
    write(
        &marks,
        "asha.json",
        r#"{"status": "success", "file_name": "asha.png", "roll_number": "R1",
            "student_name": "Asha", "course": "B.Sc. Physics", "cgpa": 8.5, "points": 80}"#,
    );
    write(
        &marks,
        "ravi.json",
        r#"{"status": "success", "file_name": "ravi.png", "roll_number": "R2",
            "student_name": "Ravi", "course": "B.Sc. Chemistry", "cgpa": 9.1, "points": 85}"#,
    );
    write(
        &marks,
        "smudged.json",
        r#"{"status": "failure", "file_name": "smudged.png", "error": "no text"}"#,
    );

    let certs = root.join("certificates");
    write(
        &certs,
        "batch.json",
        r#"[
            {"status": "success", "file_name": "R1_sports.png", "points": 5},
            {"status": "success", "file_name": "R1_music.png", "points": 3},
            {"status": "failure", "file_name": "R2_blank.png"}
        ]"#,
    );
}

#[test]
fn pipeline_writes_all_three_documents() {
    let tmp = tempfile::tempdir().unwrap();
    seed_inputs(tmp.path());

    let out_dir = tmp.path().join("out");
    let pipeline = MeritPipeline::new(MeritExporter::new(ExportConfig::with_output_dir(&out_dir)));
    let outcome = pipeline
        .run(&tmp.path().join("marksheets"), &tmp.path().join("certificates"))
        .unwrap();

    let summary = &outcome.summary;
    assert_eq!(summary.marksheets.received, 3);
    assert_eq!(summary.marksheets.skipped_failures, 1);
    assert_eq!(summary.certificates.accepted, 2);
    assert_eq!(summary.certificates.skipped_failures, 1);
    assert_eq!(summary.student_count, 2);
    assert!(!summary.generated_at.is_empty());

    // R1: 80 + 5 + 3 = 88 beats R2: 85.
    assert_eq!(outcome.merit_list[0].identity, "R1");
    assert_eq!(outcome.merit_list[0].total_points, 88.0);
    assert_eq!(outcome.merit_list[1].identity, "R2");

    let dump: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&summary.outputs.store_json).unwrap()).unwrap();
    let ids: Vec<&String> = dump.as_object().unwrap().keys().collect();
    assert_eq!(ids, vec!["R1", "R2"]);
    assert_eq!(dump["R1"]["certificates"].as_array().unwrap().len(), 2);
    assert_eq!(dump["R1"]["marksheet"]["file_name"], "asha.png");
    assert!(dump["R2"].get("certificates").is_none());

    let csv = fs::read_to_string(&summary.outputs.merit_list_csv).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "R1,Asha,B.Sc. Physics,8.5,88,80,2,8,1");
    assert_eq!(lines[2], "R2,Ravi,B.Sc. Chemistry,9.1,85,85,0,0,2");

    let validation = MeritListValidator::new()
        .validate_file(&summary.outputs.merit_list_json)
        .unwrap();
    assert!(validation.passed());
    assert_eq!(validation.entry_count, 2);
}

#[test]
fn course_filter_limits_ranked_list_but_not_dump() {
    let tmp = tempfile::tempdir().unwrap();
    seed_inputs(tmp.path());

    let out_dir = tmp.path().join("out");
    let pipeline = MeritPipeline::new(MeritExporter::new(ExportConfig::with_output_dir(&out_dir)))
        .with_course_filter(Some("B.Sc. Chemistry".to_string()));
    let outcome = pipeline
        .run(&tmp.path().join("marksheets"), &tmp.path().join("certificates"))
        .unwrap();

    assert_eq!(outcome.summary.student_count, 2);
    assert_eq!(outcome.merit_list.len(), 1);
    assert_eq!(outcome.merit_list[0].identity, "R2");
    assert_eq!(outcome.merit_list[0].rank, 1);
}

#[test]
fn missing_batch_fails_before_writing() {
    let tmp = tempfile::tempdir().unwrap();
    seed_inputs(tmp.path());

    let out_dir = tmp.path().join("out");
    let pipeline = MeritPipeline::new(MeritExporter::new(ExportConfig::with_output_dir(&out_dir)));
    let result = pipeline.run(&tmp.path().join("marksheets"), &tmp.path().join("nope"));

    assert!(result.is_err());
    assert!(!out_dir.exists());
}

#[test]
fn single_file_batches_are_accepted() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        tmp.path(),
        "marksheets.json",
        r#"[{"status": "success", "roll_number": "R1", "student_name": "Asha", "points": 50}]"#,
    );
    write(tmp.path(), "certificates.json", "[]");

    let out_dir = tmp.path().join("out");
    let pipeline = MeritPipeline::new(MeritExporter::new(ExportConfig::with_output_dir(&out_dir)));
    let outcome = pipeline
        .run(&tmp.path().join("marksheets.json"), &tmp.path().join("certificates.json"))
        .unwrap();

    assert_eq!(outcome.merit_list.len(), 1);
    assert_eq!(outcome.merit_list[0].course, "Unknown");
    assert_eq!(outcome.merit_list[0].total_points, 50.0);
}

#[test]
fn store_dump_keeps_received_numbers_and_key_order() {
    let tmp = tempfile::tempdir().unwrap();
    write(
        &tmp.path().join("marksheets"),
        "asha.json",
        r#"{"roll_number": "R1", "status": "success", "points": 80, "cgpa": 9, "student_name": "Asha"}"#,
    );
    write(&tmp.path().join("certificates"), "none.json", "[]");

    let out_dir = tmp.path().join("out");
    let pipeline = MeritPipeline::new(MeritExporter::new(ExportConfig::with_output_dir(&out_dir)));
    let outcome = pipeline
        .run(&tmp.path().join("marksheets"), &tmp.path().join("certificates"))
        .unwrap();

    let dump: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outcome.summary.outputs.store_json).unwrap()).unwrap();
    let marksheet = dump["R1"]["marksheet"].as_object().unwrap();
    let keys: Vec<&String> = marksheet.keys().collect();
    assert_eq!(keys, vec!["roll_number", "status", "points", "cgpa", "student_name", "file_name"]);
    assert!(marksheet["points"].is_u64());
    assert!(marksheet["cgpa"].is_u64());
    assert_eq!(marksheet["file_name"], "asha");
}

#[test]
fn corrupt_single_file_batch_is_skipped_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    seed_inputs(tmp.path());
    write(tmp.path(), "certs.json", "{ not json");

    let out_dir = tmp.path().join("out");
    let pipeline = MeritPipeline::new(MeritExporter::new(ExportConfig::with_output_dir(&out_dir)));
    let outcome = pipeline
        .run(&tmp.path().join("marksheets"), &tmp.path().join("certs.json"))
        .unwrap();

    assert_eq!(outcome.summary.certificates.received, 1);
    assert_eq!(outcome.summary.certificates.skipped_failures, 1);
    assert_eq!(outcome.merit_list[0].identity, "R2");
}
