use crate::extraction::{DocumentKind, ExtractionResult};
use serde::{Deserialize, Serialize};

/// Identity given to a marksheet that carries no roll number.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Certificate file names follow `<identity>_<anything>`.
pub const IDENTITY_DELIMITER: char = '_';

/// Where a resolved identity came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentitySource {
    /// Marksheet `roll_number`, used verbatim.
    RollNumber,
    /// Marksheet without `roll_number`; resolved to [`UNKNOWN_IDENTITY`].
    MissingRollNumber,
    /// Certificate file name up to the first delimiter.
    FileNamePrefix,
    /// Certificate file name with no delimiter; the whole label is the key.
    WholeFileName,
    /// Certificate without a file name; resolved to the empty string.
    MissingFileName,
}

impl IdentitySource {
    /// True when the key is a placeholder or a guess that may misattribute
    /// the record.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, IdentitySource::RollNumber | IdentitySource::FileNamePrefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub key: String,
    pub source: IdentitySource,
}

/// Resolve the identity a result belongs to. Never fails.
pub fn resolve(result: &ExtractionResult, kind: DocumentKind) -> ResolvedIdentity {
    match kind {
        DocumentKind::Marksheet => match &result.identity_key {
            Some(key) => ResolvedIdentity {
                key: key.clone(),
                source: IdentitySource::RollNumber,
            },
            None => ResolvedIdentity {
                key: UNKNOWN_IDENTITY.to_string(),
                source: IdentitySource::MissingRollNumber,
            },
        },
        DocumentKind::Certificate => resolve_from_label(result.origin_label.as_deref()),
    }
}

/// Shorthand for [`resolve`] when only the key matters.
pub fn resolve_identity(result: &ExtractionResult, kind: DocumentKind) -> String {
    resolve(result, kind).key
}

fn resolve_from_label(label: Option<&str>) -> ResolvedIdentity {
    let label = match label {
        Some(l) if !l.is_empty() => l,
        _ => {
            return ResolvedIdentity {
                key: String::new(),
                source: IdentitySource::MissingFileName,
            }
        }
    };

    match label.split_once(IDENTITY_DELIMITER) {
        Some((head, _)) => ResolvedIdentity {
            key: head.to_string(),
            source: IdentitySource::FileNamePrefix,
        },
        None => ResolvedIdentity {
            key: label.to_string(),
            source: IdentitySource::WholeFileName,
        },
    }
}
