use crate::aggregate::{Aggregator, IngestReport};
use crate::error::{CoreError, CoreResult};
use crate::export::{ExportPaths, MeritExporter};
use crate::extraction::loader::load_batch;
use crate::extraction::DocumentKind;
use crate::ranking::{MeritEntry, Ranker};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: String,
    pub course_filter: Option<String>,
    pub marksheets: IngestReport,
    pub certificates: IngestReport,
    pub student_count: usize,
    pub ranked_count: usize,
    pub outputs: ExportPaths,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub store: RecordStore,
    pub merit_list: Vec<MeritEntry>,
}

/// One aggregation run: marksheet batch, then certificate batch, then rank
/// and export. Each run starts from an empty store.
#[derive(Debug, Clone, Default)]
pub struct MeritPipeline {
    exporter: MeritExporter,
    course_filter: Option<String>,
}

impl MeritPipeline {
    pub fn new(exporter: MeritExporter) -> Self {
        Self {
            exporter,
            course_filter: None,
        }
    }

    /// Rank only students whose marksheet course equals `course`. The store
    /// dump still contains every student.
    pub fn with_course_filter(mut self, course: Option<String>) -> Self {
        self.course_filter = course;
        self
    }

    pub fn run(&self, marksheets: &Path, certificates: &Path) -> CoreResult<RunOutcome> {
        // Load both batches before touching the store so a bad path leaves
        // nothing half-ingested.
        let marksheet_batch = load_batch(marksheets)?;
        let certificate_batch = load_batch(certificates)?;

        let mut aggregator = Aggregator::new();
        info!(path = %marksheets.display(), "processing marksheets");
        let marksheet_report = aggregator.ingest(marksheet_batch, DocumentKind::Marksheet);
        info!(path = %certificates.display(), "processing certificates");
        let certificate_report = aggregator.ingest(certificate_batch, DocumentKind::Certificate);

        let store = aggregator.into_store();
        let ranker = Ranker::new(&store);
        let merit_list = match &self.course_filter {
            Some(course) => ranker.generate_merit_list_for_course(course),
            None => ranker.generate_merit_list(),
        };

        let outputs = self.exporter.write_all(&store, &merit_list)?;

        let summary = RunSummary {
            generated_at: now_rfc3339_utc()?,
            course_filter: self.course_filter.clone(),
            marksheets: marksheet_report,
            certificates: certificate_report,
            student_count: store.len(),
            ranked_count: merit_list.len(),
            outputs,
        };
        info!(
            students = summary.student_count,
            ranked = summary.ranked_count,
            "merit list generated"
        );

        Ok(RunOutcome {
            summary,
            store,
            merit_list,
        })
    }
}

fn now_rfc3339_utc() -> CoreResult<String> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| CoreError::InvalidInput(format!("timestamp formatting failed: {}", e)))
}
