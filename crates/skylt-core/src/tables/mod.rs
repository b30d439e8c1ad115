pub mod builtin;

use crate::code::{HazardCode, PrecautionClass, PrecautionCode};
use crate::error::SkyltError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

pub const H2P_FILE: &str = "h2p.txt";
pub const P_STATEMENTS_FILE: &str = "p-statements.txt";
pub const H_STATEMENTS_FILE: &str = "h-statements.txt";

/// Precautionary statement texts for one hazard code, partitioned into the
/// four regulatory categories.
///
/// Lists keep the iteration order of the underlying precaution-code set;
/// they are not sorted alphabetically.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifiedPrecautions {
    pub prevention: Vec<String>,
    pub response: Vec<String>,
    pub storage: Vec<String>,
    pub disposal: Vec<String>,
}

impl ClassifiedPrecautions {
    pub fn is_empty(&self) -> bool {
        self.prevention.is_empty()
            && self.response.is_empty()
            && self.storage.is_empty()
            && self.disposal.is_empty()
    }
}

/// A consistency problem between the loaded tables: a precaution code
/// listed against a hazard whose statement text is nowhere to be found.
/// Non-fatal, but the two input tables disagree.
#[derive(Debug, Clone, Serialize)]
pub struct TableWarning {
    pub hazard: HazardCode,
    pub precaution: PrecautionCode,
}

impl fmt::Display for TableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (listed for {}) has no statement text",
            self.precaution, self.hazard
        )
    }
}

/// The static GHS lookup tables: hazard statements, precautionary
/// statements, and the hazard-to-precaution association table. Built once
/// at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct CodeTables {
    h_statements: BTreeMap<HazardCode, String>,
    p_statements: BTreeMap<PrecautionCode, String>,
    h2p: BTreeMap<HazardCode, BTreeSet<PrecautionCode>>,
    classified: BTreeMap<HazardCode, ClassifiedPrecautions>,
    warnings: Vec<TableWarning>,
}

impl CodeTables {
    /// Build the tables from the raw text of the three sources.
    ///
    /// Parsing is line-oriented and tolerant: lines that do not start with
    /// a code token (headers, blanks, prose) are skipped. A " + " joiner is
    /// collapsed to "+" first so combined codes parse as single tokens.
    pub fn from_sources(h2p_text: &str, p_text: &str, h_text: &str) -> CodeTables {
        let h_statements = parse_h_statements(h_text);
        let p_statements = parse_p_statements(p_text);
        let h2p = parse_h2p(h2p_text);

        let mut classified = BTreeMap::new();
        let mut warnings = Vec::new();

        for (hcode, pcodes) in &h2p {
            let mut buckets = ClassifiedPrecautions::default();
            for pcode in pcodes {
                let Some(class) = pcode.class() else {
                    continue;
                };
                let Some(text) = p_statements.get(pcode) else {
                    warnings.push(TableWarning {
                        hazard: hcode.clone(),
                        precaution: pcode.clone(),
                    });
                    continue;
                };
                match class {
                    PrecautionClass::Prevention => buckets.prevention.push(text.clone()),
                    PrecautionClass::Response => buckets.response.push(text.clone()),
                    PrecautionClass::Storage => buckets.storage.push(text.clone()),
                    PrecautionClass::Disposal => buckets.disposal.push(text.clone()),
                }
            }
            classified.insert(hcode.clone(), buckets);
        }

        CodeTables {
            h_statements,
            p_statements,
            h2p,
            classified,
            warnings,
        }
    }

    /// Load the tables from a directory holding the three source files.
    /// An unreadable source is fatal: nothing can be categorized without
    /// the full set.
    pub fn from_dir(dir: &Path) -> Result<CodeTables, SkyltError> {
        let read = |name: &str| -> Result<String, SkyltError> {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|e| SkyltError::TableLoad {
                path,
                reason: e.to_string(),
            })
        };
        let h2p_text = read(H2P_FILE)?;
        let p_text = read(P_STATEMENTS_FILE)?;
        let h_text = read(H_STATEMENTS_FILE)?;
        Ok(CodeTables::from_sources(&h2p_text, &p_text, &h_text))
    }

    pub fn h_statements(&self) -> &BTreeMap<HazardCode, String> {
        &self.h_statements
    }

    pub fn p_statements(&self) -> &BTreeMap<PrecautionCode, String> {
        &self.p_statements
    }

    /// The hazard-to-precaution association table. Holds atomic precaution
    /// codes only; combined tokens in the source are split on load.
    pub fn h2p(&self) -> &BTreeMap<HazardCode, BTreeSet<PrecautionCode>> {
        &self.h2p
    }

    /// Consistency problems found while cross-linking the tables.
    pub fn warnings(&self) -> &[TableWarning] {
        &self.warnings
    }

    /// Statement text for a hazard code. Combined hazard codes are looked
    /// up as a whole; their constituents are never resolved separately.
    pub fn hazard_statement(&self, code: &HazardCode) -> Option<&str> {
        self.h_statements.get(code).map(String::as_str)
    }

    /// Render the display text for a precaution code. Combined codes
    /// resolve constituent by constituent, joined with single spaces in
    /// written order. An unresolvable constituent is omitted rather than
    /// failing the whole code.
    pub fn resolve_precaution(&self, code: &PrecautionCode) -> String {
        let texts: Vec<&str> = code
            .parts()
            .iter()
            .filter_map(|part| {
                self.p_statements
                    .get(&PrecautionCode::Atomic(part.clone()))
                    .map(String::as_str)
            })
            .collect();
        texts.join(" ")
    }

    /// Precaution codes associated with a hazard, via its bare H### base.
    pub fn associated_precautions(&self, code: &HazardCode) -> Option<&BTreeSet<PrecautionCode>> {
        self.h2p.get(&code.base())
    }

    /// Categorized precautionary texts for a hazard, via its bare H### base.
    pub fn classified_precautions(&self, code: &HazardCode) -> Option<&ClassifiedPrecautions> {
        self.classified.get(&code.base())
    }
}

fn normalize_line(line: &str) -> String {
    line.trim_end().replace(" + ", "+")
}

fn parse_h_statements(text: &str) -> BTreeMap<HazardCode, String> {
    let mut map = BTreeMap::new();
    for line in text.lines() {
        let line = normalize_line(line);
        if let Some((code, rest)) = HazardCode::match_prefix(&line) {
            map.insert(code, rest.trim().to_string());
        }
    }
    map
}

fn parse_p_statements(text: &str) -> BTreeMap<PrecautionCode, String> {
    let mut map = BTreeMap::new();
    for line in text.lines() {
        let line = normalize_line(line);
        if let Some((code, rest)) = PrecautionCode::match_prefix(&line) {
            map.insert(code, rest.trim().to_string());
        }
    }
    map
}

fn parse_h2p(text: &str) -> BTreeMap<HazardCode, BTreeSet<PrecautionCode>> {
    let mut map = BTreeMap::new();
    for line in text.lines() {
        let line = normalize_line(line);
        if let Some((code, rest)) = HazardCode::match_prefix(&line) {
            // The association table holds atomic codes: a combined token
            // like P301+P310 contributes each constituent separately.
            let pcodes: BTreeSet<PrecautionCode> = PrecautionCode::find_all(rest)
                .into_iter()
                .flat_map(|token| {
                    token
                        .parts()
                        .iter()
                        .map(|part| PrecautionCode::Atomic(part.clone()))
                        .collect::<Vec<_>>()
                })
                .collect();
            // Repeated hazard lines overwrite: last write wins.
            map.insert(code, pcodes);
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hcode(s: &str) -> HazardCode {
        HazardCode::parse(s).unwrap()
    }

    fn pcode(s: &str) -> PrecautionCode {
        PrecautionCode::parse(s).unwrap()
    }

    #[test]
    fn test_parse_h_statement_line() {
        let map = parse_h_statements("H315 Causes skin irritation\n");
        assert_eq!(map.get(&hcode("H315")).unwrap(), "Causes skin irritation");
    }

    #[test]
    fn test_headers_and_blanks_skipped() {
        let map = parse_h_statements("Hazard statements\n\nH315 Causes skin irritation\nCode Text\n");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_combined_joiner_collapsed() {
        let map = parse_h_statements("H302 + H312 Harmful if swallowed or in contact with skin\n");
        assert_eq!(
            map.get(&hcode("H302+H312")).unwrap(),
            "Harmful if swallowed or in contact with skin"
        );
    }

    #[test]
    fn test_parse_p_statement_line() {
        let map = parse_p_statements("P280 Wear protective gloves.\nP301 + P310 IF SWALLOWED: call a doctor.\n");
        assert_eq!(map.get(&pcode("P280")).unwrap(), "Wear protective gloves.");
        assert!(map.contains_key(&pcode("P301+P310")));
    }

    #[test]
    fn test_parse_h2p_line() {
        let map = parse_h2p("H315 P264, P280, P302+P352, P321\n");
        let set = map.get(&hcode("H315")).unwrap();
        assert!(set.contains(&pcode("P264")));
        assert!(set.contains(&pcode("P302")));
        assert!(set.contains(&pcode("P352")));
        assert!(!set.contains(&pcode("P302+P352")));
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_h2p_combined_tokens_split_to_atoms() {
        let map = parse_h2p("H315 P264, P280, P302 + P352, P321, P332 + P313, P362 + P364\n");
        let set = map.get(&hcode("H315")).unwrap();
        let codes: Vec<&str> = set.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            codes,
            ["P264", "P280", "P302", "P313", "P321", "P332", "P352", "P362", "P364"]
        );
    }

    #[test]
    fn test_h2p_last_write_wins() {
        let map = parse_h2p("H315 P264\nH315 P280\n");
        let set = map.get(&hcode("H315")).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&pcode("P280")));
    }

    fn sample_tables() -> CodeTables {
        CodeTables::from_sources(
            "H315 P264, P280, P332+P313, P405, P501\n",
            "P264 Wash hands thoroughly after handling.\n\
             P280 Wear protective gloves.\n\
             P332 If skin irritation occurs:\n\
             P313 Get medical attention.\n\
             P405 Store locked up.\n\
             P501 Dispose of contents to an approved facility.\n",
            "H315 Causes skin irritation\n",
        )
    }

    #[test]
    fn test_categorizer_buckets() {
        let tables = sample_tables();
        let classified = tables.classified_precautions(&hcode("H315")).unwrap();
        assert_eq!(
            classified.prevention,
            vec![
                "Wash hands thoroughly after handling.",
                "Wear protective gloves."
            ]
        );
        // Atomic codes, in code order: P313 sorts before P332.
        assert_eq!(
            classified.response,
            vec!["Get medical attention.", "If skin irritation occurs:"]
        );
        assert_eq!(classified.storage, vec!["Store locked up."]);
        assert_eq!(
            classified.disposal,
            vec!["Dispose of contents to an approved facility."]
        );
        assert!(tables.warnings().is_empty());
    }

    #[test]
    fn test_missing_statement_reported() {
        let tables = CodeTables::from_sources(
            "H315 P264, P280\n",
            "P264 Wash hands thoroughly after handling.\n",
            "H315 Causes skin irritation\n",
        );
        assert_eq!(tables.warnings().len(), 1);
        assert_eq!(tables.warnings()[0].precaution.as_str(), "P280");
        // The resolvable code still lands in its bucket.
        let classified = tables.classified_precautions(&hcode("H315")).unwrap();
        assert_eq!(classified.prevention.len(), 1);
    }

    #[test]
    fn test_resolve_combined_precaution() {
        let tables = sample_tables();
        assert_eq!(
            tables.resolve_precaution(&pcode("P332+P313")),
            "If skin irritation occurs: Get medical attention."
        );
        assert_eq!(tables.resolve_precaution(&pcode("P280")), "Wear protective gloves.");
    }

    #[test]
    fn test_resolve_partial_combined() {
        let tables = sample_tables();
        // P999 resolves to nothing; the rest of the combo survives.
        assert_eq!(
            tables.resolve_precaution(&pcode("P313+P999")),
            "Get medical attention."
        );
    }

    #[test]
    fn test_hazard_lookup_via_base() {
        let tables = sample_tables();
        let assoc = tables.associated_precautions(&hcode("H315fi"));
        assert!(assoc.is_some());
        assert!(tables.classified_precautions(&hcode("H315fi")).is_some());
        assert!(tables.associated_precautions(&hcode("H319")).is_none());
    }

    #[test]
    fn test_combined_hazard_single_key() {
        let tables = CodeTables::from_sources(
            "",
            "",
            "H302+H312 Harmful if swallowed or in contact with skin\nH302 Harmful if swallowed\n",
        );
        // The combined string is one key; it is not assembled from parts.
        assert_eq!(
            tables.hazard_statement(&hcode("H302+H312")).unwrap(),
            "Harmful if swallowed or in contact with skin"
        );
        assert_eq!(
            tables.hazard_statement(&hcode("H302")).unwrap(),
            "Harmful if swallowed"
        );
    }

    #[test]
    fn test_from_dir_missing_is_fatal() {
        let err = CodeTables::from_dir(Path::new("/nonexistent/tables")).unwrap_err();
        assert!(matches!(err, SkyltError::TableLoad { .. }));
    }
}
