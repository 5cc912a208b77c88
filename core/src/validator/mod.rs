use crate::error::CoreResult;
use crate::export::parse_merit_list_json;
use crate::points::saturate_points;
use crate::ranking::MeritEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const CHECKLIST_VERSION: &str = "merit_list_checklist_v1";

pub const CHK_RANK_DENSE: &str = "CHK.RANK.DENSE";
pub const CHK_RANK_MONOTONIC: &str = "CHK.RANK.MONOTONIC";
pub const CHK_POINTS_CONSERVATION: &str = "CHK.POINTS.CONSERVATION";
pub const CHK_IDENTITY_UNIQUE: &str = "CHK.IDENTITY.UNIQUE";

// Exported totals are sums of decimal inputs; allow float noise only.
const POINTS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check_id: String,
    pub result: String, // PASS|FAIL
    pub message: String,
}

impl CheckResult {
    fn pass(check_id: &str) -> Self {
        Self {
            check_id: check_id.to_string(),
            result: "PASS".to_string(),
            message: "ok".to_string(),
        }
    }

    fn fail(check_id: &str, message: String) -> Self {
        Self {
            check_id: check_id.to_string(),
            result: "FAIL".to_string(),
            message,
        }
    }

    pub fn passed(&self) -> bool {
        self.result == "PASS"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub checklist_version: String,
    pub entry_count: usize,
    pub overall: String, // PASS|FAIL
    pub checks: Vec<CheckResult>,
}

impl ValidationSummary {
    pub fn result_for_check(&self, check_id: &str) -> (String, String) {
        for c in &self.checks {
            if c.check_id == check_id {
                return (c.result.clone(), c.message.clone());
            }
        }
        (
            "FAIL".to_string(),
            format!("missing check result for {}", check_id),
        )
    }

    pub fn passed(&self) -> bool {
        self.overall == "PASS"
    }
}

/// Re-checks a merit list against the ranking rules it was produced under.
#[derive(Debug, Default)]
pub struct MeritListValidator;

impl MeritListValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_file(&self, path: &Path) -> CoreResult<ValidationSummary> {
        let text = fs::read_to_string(path)?;
        let entries = parse_merit_list_json(&text)?;
        Ok(self.validate(&entries))
    }

    pub fn validate(&self, entries: &[MeritEntry]) -> ValidationSummary {
        let checks = vec![
            check_dense_ranks(entries),
            check_monotonic_totals(entries),
            check_points_conservation(entries),
            check_unique_identities(entries),
        ];

        let overall = if checks.iter().all(CheckResult::passed) {
            "PASS"
        } else {
            "FAIL"
        };

        ValidationSummary {
            checklist_version: CHECKLIST_VERSION.to_string(),
            entry_count: entries.len(),
            overall: overall.to_string(),
            checks,
        }
    }
}

fn check_dense_ranks(entries: &[MeritEntry]) -> CheckResult {
    for (idx, e) in entries.iter().enumerate() {
        if e.rank != idx + 1 {
            return CheckResult::fail(
                CHK_RANK_DENSE,
                format!(
                    "entry {} ({}) has rank {}, expected {}",
                    idx, e.identity, e.rank, idx + 1
                ),
            );
        }
    }
    CheckResult::pass(CHK_RANK_DENSE)
}

fn check_monotonic_totals(entries: &[MeritEntry]) -> CheckResult {
    for pair in entries.windows(2) {
        if pair[0].total_points < pair[1].total_points {
            return CheckResult::fail(
                CHK_RANK_MONOTONIC,
                format!(
                    "{} ({}) ranked above {} ({})",
                    pair[0].identity, pair[0].total_points, pair[1].identity, pair[1].total_points
                ),
            );
        }
    }
    CheckResult::pass(CHK_RANK_MONOTONIC)
}

fn check_points_conservation(entries: &[MeritEntry]) -> CheckResult {
    let bad: Vec<&str> = entries
        .iter()
        .filter(|e| {
            let expected = saturate_points(e.marksheet_points + e.certificates_points);
            e.total_points != expected && (e.total_points - expected).abs() > POINTS_EPSILON
        })
        .map(|e| e.identity.as_str())
        .collect();

    if bad.is_empty() {
        CheckResult::pass(CHK_POINTS_CONSERVATION)
    } else {
        CheckResult::fail(
            CHK_POINTS_CONSERVATION,
            format!("total_points != marksheet_points + certificates_points for: {}", bad.join(", ")),
        )
    }
}

fn check_unique_identities(entries: &[MeritEntry]) -> CheckResult {
    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for e in entries {
        if !seen.insert(e.identity.as_str()) {
            dupes.push(e.identity.as_str());
        }
    }

    if dupes.is_empty() {
        CheckResult::pass(CHK_IDENTITY_UNIQUE)
    } else {
        CheckResult::fail(
            CHK_IDENTITY_UNIQUE,
            format!("duplicate roll numbers: {}", dupes.join(", ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(identity: &str, total: f64, rank: usize) -> MeritEntry {
        MeritEntry {
            identity: identity.to_string(),
            student_name: "Unknown".to_string(),
            course: "Unknown".to_string(),
            cgpa: 0.0,
            total_points: total,
            marksheet_points: total,
            certificate_count: 0,
            certificates_points: 0.0,
            rank,
        }
    }

    #[test]
    fn well_formed_list_passes() {
        let summary = MeritListValidator::new().validate(&[entry("R2", 70.0, 1), entry("R1", 50.0, 2)]);
        assert!(summary.passed());
        assert_eq!(summary.entry_count, 2);
    }

    #[test]
    fn shared_rank_fails_dense_check() {
        let summary = MeritListValidator::new().validate(&[entry("R2", 70.0, 1), entry("R1", 70.0, 1)]);
        assert!(!summary.passed());
        assert_eq!(summary.result_for_check(CHK_RANK_DENSE).0, "FAIL");
        assert_eq!(summary.result_for_check(CHK_RANK_MONOTONIC).0, "PASS");
    }

    #[test]
    fn ascending_totals_fail_monotonic_check() {
        let summary = MeritListValidator::new().validate(&[entry("R1", 50.0, 1), entry("R2", 70.0, 2)]);
        assert_eq!(summary.result_for_check(CHK_RANK_MONOTONIC).0, "FAIL");
    }

    #[test]
    fn broken_total_fails_conservation_check() {
        let mut e = entry("R1", 50.0, 1);
        e.certificates_points = 5.0;
        let summary = MeritListValidator::new().validate(&[e]);
        let (result, message) = summary.result_for_check(CHK_POINTS_CONSERVATION);
        assert_eq!(result, "FAIL");
        assert!(message.contains("R1"));
    }

    #[test]
    fn duplicate_identity_fails_unique_check() {
        let summary = MeritListValidator::new().validate(&[entry("R1", 70.0, 1), entry("R1", 50.0, 2)]);
        assert_eq!(summary.result_for_check(CHK_IDENTITY_UNIQUE).0, "FAIL");
    }

    #[test]
    fn overflowing_totals_export_and_validate() {
        use crate::export::render_merit_list_json;
        use crate::extraction::ExtractionResult;
        use crate::ranking::Ranker;
        use crate::store::RecordStore;

        let mut store = RecordStore::new();
        store.set_marksheet("R1", ExtractionResult::marksheet("R1", "Asha", "B.Sc.", 8.0, 1e308));
        store.push_certificate("R1", ExtractionResult::certificate("R1_a.png", 1e308));
        store.push_certificate("R1", ExtractionResult::certificate("R1_b.png", 1e308));
        store.set_marksheet("R2", ExtractionResult::marksheet("R2", "Ravi", "B.Sc.", 7.0, 10.0));

        let json = render_merit_list_json(&Ranker::new(&store).generate_merit_list()).unwrap();
        assert!(!json.contains("null"));

        let parsed = parse_merit_list_json(&json).unwrap();
        assert_eq!(parsed[0].total_points, f64::MAX);
        assert!(MeritListValidator::new().validate(&parsed).passed());
    }

    #[test]
    fn empty_list_passes() {
        assert!(MeritListValidator::new().validate(&[]).passed());
    }
}
