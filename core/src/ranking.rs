use crate::points::PointsCalculator;
use crate::store::{RecordStore, StudentRecord};
use serde::{Deserialize, Serialize};

/// Stand-in for a name or course when the identity has no marksheet.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One row of the merit list. Field order is the exported column order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeritEntry {
    #[serde(rename = "roll_number")]
    pub identity: String,
    pub student_name: String,
    pub course: String,
    pub cgpa: f64,
    pub total_points: f64,
    pub marksheet_points: f64,
    pub certificate_count: usize,
    pub certificates_points: f64,
    pub rank: usize,
}

impl MeritEntry {
    /// Unranked entry (`rank == 0`) for one record.
    fn unranked(record: &StudentRecord, calculator: &PointsCalculator<'_>) -> Self {
        let points = calculator.breakdown(&record.identity);
        let marksheet = record.marksheet.as_ref();

        Self {
            identity: record.identity.clone(),
            student_name: marksheet
                .and_then(|m| m.student_name.clone())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            course: course_of(record).to_string(),
            cgpa: marksheet.and_then(|m| m.cgpa).unwrap_or(0.0),
            total_points: points.total_points,
            marksheet_points: points.marksheet_points,
            certificate_count: points.certificate_count,
            certificates_points: points.certificates_points,
            rank: 0,
        }
    }
}

fn course_of(record: &StudentRecord) -> &str {
    record
        .marksheet
        .as_ref()
        .and_then(|m| m.course.as_deref())
        .unwrap_or(UNKNOWN_LABEL)
}

/// Builds merit lists from a store snapshot without mutating it.
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    store: &'a RecordStore,
}

impl<'a> Ranker<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Every identity, highest total first.
    ///
    /// Equal totals keep the order identities were first encountered, and
    /// ranks are the 1-based positions in the sorted list, so no two entries
    /// share a rank.
    pub fn generate_merit_list(&self) -> Vec<MeritEntry> {
        self.rank_records(|_| true)
    }

    /// Same ordering rules restricted to identities whose course matches
    /// `course` exactly. Ranks run `1..=M` over the filtered entries.
    pub fn generate_merit_list_for_course(&self, course: &str) -> Vec<MeritEntry> {
        self.rank_records(|record| course_of(record) == course)
    }

    fn rank_records<F>(&self, keep: F) -> Vec<MeritEntry>
    where
        F: Fn(&StudentRecord) -> bool,
    {
        let calculator = PointsCalculator::new(self.store);
        let mut entries: Vec<MeritEntry> = self
            .store
            .records()
            .filter(|r| keep(r))
            .map(|r| MeritEntry::unranked(r, &calculator))
            .collect();

        // sort_by is stable: ties stay in store order.
        entries.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));

        for (idx, entry) in entries.iter_mut().enumerate() {
            entry.rank = idx + 1;
        }
        entries
    }
}
