use crate::error::SkyltError;
use crate::model::RawChemicalRecord;
use std::collections::BTreeMap;
use std::path::Path;

/// Trait for retrieval backends that supply raw per-chemical findings.
///
/// This is the seam towards the scraping/download side of the system: the
/// engine only sees a complete raw record or a failure per identifier, and
/// never performs any I/O of its own beyond this call.
pub trait RecordSource: Send + Sync {
    /// Retrieve the raw record for one identifier. Any failure (not found,
    /// timeout, malformed page) surfaces as an error; the caller routes the
    /// identifier to the bad-identifier list and moves on.
    fn fetch(&self, id: &str) -> Result<RawChemicalRecord, SkyltError>;

    /// Name of this retrieval backend (for diagnostics).
    fn source_name(&self) -> &str;
}

/// A `RecordSource` backed by a JSON file of pre-retrieved raw records,
/// keyed by their identifiers. Lets the pipeline run offline against the
/// output of a separate scraping step.
#[derive(Debug, Clone, Default)]
pub struct JsonRecordSource {
    records: BTreeMap<String, RawChemicalRecord>,
}

impl JsonRecordSource {
    /// Parse a JSON array of raw records.
    pub fn from_json(json: &str) -> Result<JsonRecordSource, SkyltError> {
        let list: Vec<RawChemicalRecord> = serde_json::from_str(json)?;
        let mut records = BTreeMap::new();
        for record in list {
            records.insert(record.id.trim().to_string(), record);
        }
        Ok(JsonRecordSource { records })
    }

    /// Read and parse a records file.
    pub fn from_path(path: &Path) -> Result<JsonRecordSource, SkyltError> {
        let content = std::fs::read_to_string(path).map_err(|e| SkyltError::RecordsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        JsonRecordSource::from_json(&content).map_err(|e| SkyltError::RecordsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSource for JsonRecordSource {
    fn fetch(&self, id: &str) -> Result<RawChemicalRecord, SkyltError> {
        self.records
            .get(id.trim())
            .cloned()
            .ok_or_else(|| SkyltError::RecordNotFound { id: id.to_string() })
    }

    fn source_name(&self) -> &str {
        "json"
    }
}
