use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Outcome reported by the OCR collaborator for one input file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Success,
    /// Anything other than an explicit success, including a missing status.
    #[default]
    Failure,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Marksheet,
    Certificate,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Marksheet => "marksheet",
            DocumentKind::Certificate => "certificate",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "marksheet" => Some(DocumentKind::Marksheet),
            "certificate" => Some(DocumentKind::Certificate),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One OCR result for a single marksheet or certificate file.
///
/// Typed fields are the ones the merit list reads. Every other key the
/// collaborator emitted is kept in `extra` so the store dump re-emits the
/// record as it was received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractionResult {
    #[serde(default)]
    pub status: ExtractionStatus,
    #[serde(rename = "file_name", default, skip_serializing_if = "Option::is_none")]
    pub origin_label: Option<String>,
    #[serde(rename = "document_type", default, skip_serializing_if = "Option::is_none")]
    pub document_kind: Option<DocumentKind>,
    #[serde(rename = "roll_number", default, skip_serializing_if = "Option::is_none")]
    pub identity_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The object exactly as the collaborator emitted it, when it came
    /// through the parser. The store dump re-emits this verbatim.
    #[serde(skip)]
    pub(crate) received: Option<Map<String, Value>>,
}

impl ExtractionResult {
    /// Successful marksheet result carrying the fields the merit list reads.
    pub fn marksheet(
        roll_number: &str,
        student_name: &str,
        course: &str,
        cgpa: f64,
        points: f64,
    ) -> Self {
        Self {
            status: ExtractionStatus::Success,
            document_kind: Some(DocumentKind::Marksheet),
            identity_key: Some(roll_number.to_string()),
            student_name: Some(student_name.to_string()),
            course: Some(course.to_string()),
            cgpa: Some(cgpa),
            points: Some(points),
            ..Self::default()
        }
    }

    /// Successful certificate result; the identity comes from `file_name`.
    pub fn certificate(file_name: &str, points: f64) -> Self {
        Self {
            status: ExtractionStatus::Success,
            origin_label: Some(file_name.to_string()),
            document_kind: Some(DocumentKind::Certificate),
            points: Some(points),
            ..Self::default()
        }
    }

    /// Failure marker for a file the collaborator could not extract.
    pub fn failure(origin_label: Option<String>) -> Self {
        Self {
            status: ExtractionStatus::Failure,
            origin_label,
            ..Self::default()
        }
    }

    pub fn received(&self) -> Option<&Map<String, Value>> {
        self.received.as_ref()
    }

    /// Fill in a missing `file_name`, in both the typed field and the
    /// received object.
    pub(crate) fn stamp_origin_label(&mut self, label: String) {
        if let Some(raw) = self.received.as_mut() {
            raw.insert("file_name".to_string(), Value::String(label.clone()));
        }
        self.origin_label = Some(label);
    }

    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Success
    }

    /// `points`, or 0 when the collaborator did not report any.
    pub fn points_or_zero(&self) -> f64 {
        self.points.unwrap_or(0.0)
    }
}
