use crate::code::{HazardCode, PrecautionCode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Per-chemical findings exactly as a retrieval source reported them:
/// unvalidated, possibly markup-laden, with every field optional except
/// the identifier. Ingestion turns this into a `ChemicalRecord`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawChemicalRecord {
    /// Chemical identifier, typically a CAS registry number.
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Hazard code → statement text, keyed by raw scraped code strings.
    #[serde(default)]
    pub hazards: BTreeMap<String, String>,
    /// Precaution code → statement text. The text is advisory only;
    /// ingestion recomputes it from the code tables.
    #[serde(default)]
    pub precautions: BTreeMap<String, String>,
    /// Non-standardized hazard notes outside the H-code system.
    #[serde(default)]
    pub supplemental: Vec<String>,
    /// Personal protective equipment recommendations.
    #[serde(default)]
    pub ppe: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub formula: Option<String>,
    #[serde(default)]
    pub product_number: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    /// Opaque reference to a retrieved safety data sheet (path or URL).
    #[serde(default)]
    pub document_ref: Option<String>,
}

/// A validated, normalized per-chemical record. Immutable once built;
/// the aggregator folds these into the statement-centric tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChemicalRecord {
    pub id: String,
    /// Resolved display name; empty if resolution failed.
    pub name: String,
    pub hazards: BTreeMap<HazardCode, String>,
    pub precautions: BTreeMap<PrecautionCode, String>,
    pub supplemental: BTreeSet<String>,
    pub ppe: Vec<String>,
    pub synonyms: Vec<String>,
    pub formula: Option<String>,
    pub product_number: Option<String>,
    pub brand: Option<String>,
    pub product_url: Option<String>,
    pub document_ref: Option<String>,
}
