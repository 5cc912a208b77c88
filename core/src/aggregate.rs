use crate::extraction::{DocumentKind, ExtractionResult};
use crate::identity::{resolve, IdentitySource};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A result whose identity came from a placeholder or a guessed file name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FallbackIdentity {
    pub origin_label: Option<String>,
    pub identity: String,
    pub source: IdentitySource,
}

/// What one `ingest` call did. The store is mutated the same way whether or
/// not anyone reads this.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestReport {
    pub document_kind: DocumentKind,
    pub received: usize,
    pub accepted: usize,
    pub skipped_failures: usize,
    pub fallback_identities: Vec<FallbackIdentity>,
}

impl IngestReport {
    fn new(document_kind: DocumentKind) -> Self {
        Self {
            document_kind,
            received: 0,
            accepted: 0,
            skipped_failures: 0,
            fallback_identities: Vec::new(),
        }
    }
}

/// Folds OCR batches into an owned [`RecordStore`].
///
/// Ingestion takes `&mut self`; producers extracting in parallel must hand
/// their finished batches to one owner (or share it behind a `Mutex`).
#[derive(Debug, Default)]
pub struct Aggregator {
    store: RecordStore,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn into_store(self) -> RecordStore {
        self.store
    }

    /// Merge one batch of results of the given kind.
    ///
    /// Failed results are skipped without touching the store. Marksheets
    /// replace the identity's previous marksheet; certificates are appended,
    /// so resubmitting a file counts it again.
    pub fn ingest<I>(&mut self, results: I, kind: DocumentKind) -> IngestReport
    where
        I: IntoIterator<Item = ExtractionResult>,
    {
        let mut report = IngestReport::new(kind);

        for result in results {
            report.received += 1;

            if !result.is_success() {
                report.skipped_failures += 1;
                debug!(
                    kind = %kind,
                    origin = result.origin_label.as_deref().unwrap_or(""),
                    "skipping failed extraction"
                );
                continue;
            }

            let resolved = resolve(&result, kind);
            if resolved.source.is_fallback() {
                warn!(
                    kind = %kind,
                    origin = result.origin_label.as_deref().unwrap_or(""),
                    identity = %resolved.key,
                    source = ?resolved.source,
                    "identity resolved from fallback"
                );
                report.fallback_identities.push(FallbackIdentity {
                    origin_label: result.origin_label.clone(),
                    identity: resolved.key.clone(),
                    source: resolved.source,
                });
            }

            match kind {
                DocumentKind::Marksheet => {
                    if self
                        .store
                        .get(&resolved.key)
                        .map_or(false, |r| r.marksheet.is_some())
                    {
                        debug!(identity = %resolved.key, "replacing earlier marksheet");
                    }
                    self.store.set_marksheet(&resolved.key, result);
                }
                DocumentKind::Certificate => self.store.push_certificate(&resolved.key, result),
            }
            report.accepted += 1;
        }

        info!(
            kind = %kind,
            received = report.received,
            accepted = report.accepted,
            skipped = report.skipped_failures,
            fallbacks = report.fallback_identities.len(),
            "ingested batch"
        );
        report
    }
}
