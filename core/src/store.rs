use crate::extraction::ExtractionResult;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// Everything collected for one student during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRecord {
    pub identity: String,
    /// Last marksheet seen for this identity.
    pub marksheet: Option<ExtractionResult>,
    /// Certificates in processing order, duplicates included.
    pub certificates: Vec<ExtractionResult>,
}

impl StudentRecord {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            marksheet: None,
            certificates: Vec::new(),
        }
    }
}

/// Identity-keyed records of one aggregation run, iterated in the order
/// identities were first encountered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    records: IndexMap<String, StudentRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.records.contains_key(identity)
    }

    pub fn get(&self, identity: &str) -> Option<&StudentRecord> {
        self.records.get(identity)
    }

    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.values()
    }

    /// Record for `identity`, created empty on first use. An existing
    /// identity keeps its original position.
    pub fn record_mut(&mut self, identity: &str) -> &mut StudentRecord {
        self.records
            .entry(identity.to_string())
            .or_insert_with(|| StudentRecord::new(identity))
    }

    /// Set the marksheet, replacing any earlier one (last write wins).
    pub fn set_marksheet(&mut self, identity: &str, result: ExtractionResult) {
        self.record_mut(identity).marksheet = Some(result);
    }

    pub fn push_certificate(&mut self, identity: &str, result: ExtractionResult) {
        self.record_mut(identity).certificates.push(result);
    }
}

// Dump shape: { "<identity>": { "marksheet": {...}, "certificates": [...] } }
// with absent parts omitted.
impl Serialize for RecordStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (identity, record) in &self.records {
            map.serialize_entry(identity, &DumpEntry(record))?;
        }
        map.end()
    }
}

struct DumpEntry<'a>(&'a StudentRecord);

impl Serialize for DumpEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let len = usize::from(record.marksheet.is_some()) + usize::from(!record.certificates.is_empty());
        let mut st = serializer.serialize_struct("StudentRecord", len)?;
        match &record.marksheet {
            Some(m) => st.serialize_field("marksheet", &AsReceived(m))?,
            None => st.skip_field("marksheet")?,
        }
        if record.certificates.is_empty() {
            st.skip_field("certificates")?;
        } else {
            let certificates: Vec<AsReceived<'_>> =
                record.certificates.iter().map(AsReceived).collect();
            st.serialize_field("certificates", &certificates)?;
        }
        st.end()
    }
}

/// A result as the collaborator emitted it; results built in code fall back
/// to their typed serialization.
struct AsReceived<'a>(&'a ExtractionResult);

impl Serialize for AsReceived<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.received() {
            Some(raw) => raw.serialize(serializer),
            None => self.0.serialize(serializer),
        }
    }
}
