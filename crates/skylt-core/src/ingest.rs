use crate::code::{HazardCode, PrecautionCode};
use crate::error::SkyltError;
use crate::model::{ChemicalRecord, RawChemicalRecord};
use crate::normalize::{capitalize_first, clean};
use crate::tables::CodeTables;
use std::collections::{BTreeMap, BTreeSet};

/// Validate and normalize a raw record into a `ChemicalRecord`.
///
/// - The identifier must be non-empty after trimming.
/// - Hazard/precaution keys that do not parse as codes are dropped, like
///   non-matching table lines.
/// - Precaution texts are recomputed from the code tables instead of
///   trusting the scraped text, so display output always agrees with the
///   loaded statement tables.
/// - Free text is cleaned for display; PPE items get their first letter
///   capitalized.
pub fn ingest(raw: RawChemicalRecord, tables: &CodeTables) -> Result<ChemicalRecord, SkyltError> {
    let id = raw.id.trim().to_string();
    if id.is_empty() {
        return Err(SkyltError::InvalidIdentifier { id: raw.id });
    }

    let mut hazards = BTreeMap::new();
    for (key, text) in raw.hazards {
        if let Ok(code) = HazardCode::parse(&key) {
            hazards.insert(code, clean(&text));
        }
    }

    let mut precautions = BTreeMap::new();
    for key in raw.precautions.keys() {
        if let Ok(code) = PrecautionCode::parse(key) {
            let text = tables.resolve_precaution(&code);
            precautions.insert(code, text);
        }
    }

    let supplemental: BTreeSet<String> = raw
        .supplemental
        .iter()
        .map(|s| clean(s))
        .filter(|s| !s.is_empty())
        .collect();

    let ppe: Vec<String> = raw
        .ppe
        .iter()
        .map(|s| capitalize_first(&clean(s)))
        .filter(|s| !s.is_empty())
        .collect();

    let synonyms: Vec<String> = raw
        .synonyms
        .iter()
        .map(|s| clean(s))
        .filter(|s| !s.is_empty())
        .collect();

    Ok(ChemicalRecord {
        id,
        name: clean(&raw.name.unwrap_or_default()),
        hazards,
        precautions,
        supplemental,
        ppe,
        synonyms,
        formula: raw.formula.map(|s| clean(&s)).filter(|s| !s.is_empty()),
        product_number: raw.product_number,
        brand: raw.brand,
        product_url: raw.product_url,
        document_ref: raw.document_ref,
    })
}
