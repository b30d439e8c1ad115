use crate::code::{HazardCode, PrecautionCode};
use crate::model::ChemicalRecord;
use crate::tables::CodeTables;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Running per-statement accumulator: how many distinct chemicals exhibit
/// the statement, and which ones.
#[derive(Debug, Clone, Default)]
struct Bucket {
    count: usize,
    /// First observed statement text; fallback when the code tables have
    /// no entry for the code.
    statement: String,
    ids: BTreeSet<String>,
    names: BTreeSet<String>,
}

impl Bucket {
    fn observe(&mut self, record: &ChemicalRecord, statement: &str) {
        if self.statement.is_empty() {
            self.statement = statement.to_string();
        }
        self.count += 1;
        self.ids.insert(record.id.clone());
        if !record.name.is_empty() {
            self.names.insert(record.name.clone());
        }
    }
}

/// One row of the hazard summary table, enriched with the categorized
/// precautionary texts and associated precaution codes for the hazard.
/// Supplemental hazards appear as rows with a synthetic `Supp. N` code and
/// empty category lists.
#[derive(Debug, Clone, Serialize)]
pub struct HazardEntry {
    pub code: String,
    pub count: usize,
    pub statement: String,
    pub associated_precautions: Vec<String>,
    pub associated_ids: Vec<String>,
    pub associated_names: Vec<String>,
    pub prevention: Vec<String>,
    pub response: Vec<String>,
    pub storage: Vec<String>,
    pub disposal: Vec<String>,
}

/// One row of the precaution or PPE summary table.
#[derive(Debug, Clone, Serialize)]
pub struct StatementEntry {
    pub code: String,
    pub count: usize,
    pub statement: String,
    pub associated_ids: Vec<String>,
    pub associated_names: Vec<String>,
}

/// The final statement-centric summary tables, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    /// GHS hazards and supplemental hazards, merged and sorted by code.
    pub hazards: Vec<HazardEntry>,
    pub precautions: Vec<StatementEntry>,
    pub ppe: Vec<StatementEntry>,
}

/// Folds chemical records into the four statement families. Records can
/// arrive in any order; the finished tables are identical for any
/// ingestion order of the same record set.
#[derive(Debug, Default)]
pub struct Aggregator {
    hazards: BTreeMap<HazardCode, Bucket>,
    precautions: BTreeMap<PrecautionCode, Bucket>,
    ppe: BTreeMap<String, Bucket>,
    /// Supplemental hazards in first-encounter order; the position drives
    /// the synthetic `Supp. N` display code.
    supplemental: Vec<(String, Bucket)>,
}

impl Aggregator {
    /// Fold one record into the running indices. Each family's entries are
    /// counted at most once per record: the hazard/precaution maps have
    /// unique keys, and the PPE list is deduplicated before counting.
    pub fn fold(&mut self, record: &ChemicalRecord) {
        for (code, text) in &record.hazards {
            self.hazards
                .entry(code.clone())
                .or_default()
                .observe(record, text);
        }

        for (code, text) in &record.precautions {
            self.precautions
                .entry(code.clone())
                .or_default()
                .observe(record, text);
        }

        let distinct_ppe: BTreeSet<&String> = record.ppe.iter().collect();
        for item in distinct_ppe {
            self.ppe
                .entry(item.clone())
                .or_default()
                .observe(record, item);
        }

        for text in &record.supplemental {
            let idx = match self.supplemental.iter().position(|(t, _)| t == text) {
                Some(idx) => idx,
                None => {
                    self.supplemental.push((text.clone(), Bucket::default()));
                    self.supplemental.len() - 1
                }
            };
            self.supplemental[idx].1.observe(record, text);
        }
    }

    /// Produce the final summary tables, resolving statement texts and the
    /// per-hazard category lists against the code tables.
    pub fn finish(&self, tables: &CodeTables) -> Inventory {
        let mut hazards: Vec<HazardEntry> = self
            .hazards
            .iter()
            .map(|(code, bucket)| {
                let statement = tables
                    .hazard_statement(code)
                    .map(str::to_string)
                    .unwrap_or_else(|| bucket.statement.clone());
                let associated_precautions = tables
                    .associated_precautions(code)
                    .map(|set| set.iter().map(|p| p.as_str().to_string()).collect())
                    .unwrap_or_default();
                let classified = tables.classified_precautions(code);
                HazardEntry {
                    code: code.as_str().to_string(),
                    count: bucket.count,
                    statement,
                    associated_precautions,
                    associated_ids: bucket.ids.iter().cloned().collect(),
                    associated_names: bucket.names.iter().cloned().collect(),
                    prevention: classified.map(|c| c.prevention.clone()).unwrap_or_default(),
                    response: classified.map(|c| c.response.clone()).unwrap_or_default(),
                    storage: classified.map(|c| c.storage.clone()).unwrap_or_default(),
                    disposal: classified.map(|c| c.disposal.clone()).unwrap_or_default(),
                }
            })
            .collect();

        // Supplemental hazards join the hazard table under synthetic codes,
        // numbered in first-encounter order.
        for (idx, (text, bucket)) in self.supplemental.iter().enumerate() {
            hazards.push(HazardEntry {
                code: format!("Supp. {}", idx + 1),
                count: bucket.count,
                statement: text.clone(),
                associated_precautions: Vec::new(),
                associated_ids: bucket.ids.iter().cloned().collect(),
                associated_names: bucket.names.iter().cloned().collect(),
                prevention: Vec::new(),
                response: Vec::new(),
                storage: Vec::new(),
                disposal: Vec::new(),
            });
        }
        hazards.sort_by(|a, b| a.code.cmp(&b.code));

        let precautions = self
            .precautions
            .iter()
            .map(|(code, bucket)| {
                let resolved = tables.resolve_precaution(code);
                StatementEntry {
                    code: code.as_str().to_string(),
                    count: bucket.count,
                    statement: if resolved.is_empty() {
                        bucket.statement.clone()
                    } else {
                        resolved
                    },
                    associated_ids: bucket.ids.iter().cloned().collect(),
                    associated_names: bucket.names.iter().cloned().collect(),
                }
            })
            .collect();

        let ppe = self
            .ppe
            .iter()
            .map(|(item, bucket)| StatementEntry {
                code: item.clone(),
                count: bucket.count,
                statement: item.clone(),
                associated_ids: bucket.ids.iter().cloned().collect(),
                associated_names: bucket.names.iter().cloned().collect(),
            })
            .collect();

        Inventory {
            hazards,
            precautions,
            ppe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use crate::model::RawChemicalRecord;

    fn tables() -> CodeTables {
        CodeTables::from_sources(
            "H315 P264, P280\nH319 P280, P305+P351+P338\n",
            "P264 Wash hands thoroughly after handling.\n\
             P280 Wear protective gloves.\n\
             P305 IF IN EYES:\n\
             P351 Rinse cautiously with water for several minutes.\n\
             P338 Remove contact lenses, if present and easy to do. Continue rinsing.\n",
            "H315 Causes skin irritation\nH319 Causes serious eye irritation\n",
        )
    }

    fn record(id: &str, name: &str, hazard_codes: &[&str]) -> ChemicalRecord {
        let mut raw = RawChemicalRecord {
            id: id.to_string(),
            name: Some(name.to_string()),
            ..Default::default()
        };
        for code in hazard_codes {
            raw.hazards.insert(code.to_string(), String::new());
        }
        ingest(raw, &tables()).unwrap()
    }

    #[test]
    fn test_two_chemicals_shared_hazard() {
        let tables = tables();
        let a = record("111-11-1", "A", &["H315"]);
        let b = record("222-22-2", "B", &["H315", "H319"]);

        let mut agg = Aggregator::default();
        agg.fold(&a);
        agg.fold(&b);
        let inventory = agg.finish(&tables);

        assert_eq!(inventory.hazards.len(), 2);
        let h315 = &inventory.hazards[0];
        assert_eq!(h315.code, "H315");
        assert_eq!(h315.count, 2);
        assert_eq!(h315.statement, "Causes skin irritation");
        assert_eq!(h315.associated_ids, vec!["111-11-1", "222-22-2"]);
        assert_eq!(h315.associated_names, vec!["A", "B"]);

        let h319 = &inventory.hazards[1];
        assert_eq!(h319.code, "H319");
        assert_eq!(h319.count, 1);
        assert_eq!(h319.associated_ids, vec!["222-22-2"]);
    }

    #[test]
    fn test_order_independence() {
        let tables = tables();
        let a = record("111-11-1", "A", &["H315"]);
        let b = record("222-22-2", "B", &["H315", "H319"]);

        let mut forward = Aggregator::default();
        forward.fold(&a);
        forward.fold(&b);
        let mut reverse = Aggregator::default();
        reverse.fold(&b);
        reverse.fold(&a);

        let fwd = forward.finish(&tables);
        let rev = reverse.finish(&tables);
        assert_eq!(
            serde_json::to_string(&fwd.hazards).unwrap(),
            serde_json::to_string(&rev.hazards).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&fwd.precautions).unwrap(),
            serde_json::to_string(&rev.precautions).unwrap()
        );
    }

    #[test]
    fn test_dedup_invariant() {
        let tables = tables();
        let mut agg = Aggregator::default();
        for id in ["333-33-3", "111-11-1", "222-22-2"] {
            agg.fold(&record(id, "X", &["H315"]));
        }
        let inventory = agg.finish(&tables);
        let h315 = &inventory.hazards[0];
        assert_eq!(h315.count, 3);
        assert_eq!(h315.associated_ids.len(), h315.count);
        // Sorted, not ingestion order.
        assert_eq!(
            h315.associated_ids,
            vec!["111-11-1", "222-22-2", "333-33-3"]
        );
    }

    #[test]
    fn test_record_without_hazards_contributes_nothing() {
        let tables = tables();
        let mut agg = Aggregator::default();
        agg.fold(&record("111-11-1", "A", &[]));
        let inventory = agg.finish(&tables);
        assert!(inventory.hazards.is_empty());
        assert!(inventory.precautions.is_empty());
        assert!(inventory.ppe.is_empty());
    }

    #[test]
    fn test_hazard_category_enrichment() {
        let tables = tables();
        let mut agg = Aggregator::default();
        agg.fold(&record("111-11-1", "A", &["H319"]));
        let inventory = agg.finish(&tables);
        let h319 = &inventory.hazards[0];
        assert_eq!(
            h319.associated_precautions,
            vec!["P280", "P305", "P338", "P351"]
        );
        assert_eq!(h319.prevention, vec!["Wear protective gloves."]);
        // One response entry per atomic code, in code order.
        assert_eq!(
            h319.response,
            vec![
                "IF IN EYES:",
                "Remove contact lenses, if present and easy to do. Continue rinsing.",
                "Rinse cautiously with water for several minutes."
            ]
        );
        assert!(h319.storage.is_empty());
        assert!(h319.disposal.is_empty());
    }

    #[test]
    fn test_enrichment_uses_base_code() {
        let tables = CodeTables::from_sources(
            "H360 P201, P308+P313\n",
            "P201 Obtain special instructions before use.\n\
             P308 IF exposed or concerned:\n\
             P313 Get medical advice or attention.\n",
            "H360FD May damage fertility. May damage the unborn child\n",
        );
        let mut raw = RawChemicalRecord {
            id: "555-55-5".into(),
            name: Some("C".into()),
            ..Default::default()
        };
        raw.hazards.insert("H360FD".into(), String::new());
        let record = ingest(raw, &tables).unwrap();

        let mut agg = Aggregator::default();
        agg.fold(&record);
        let inventory = agg.finish(&tables);
        let entry = &inventory.hazards[0];
        assert_eq!(entry.code, "H360FD");
        // H2P join happens on the bare H360 base.
        assert_eq!(entry.associated_precautions, vec!["P201", "P308", "P313"]);
        assert_eq!(
            entry.prevention,
            vec!["Obtain special instructions before use."]
        );
    }

    #[test]
    fn test_supplemental_synthetic_codes() {
        let tables = tables();
        let mut first = RawChemicalRecord {
            id: "111-11-1".into(),
            name: Some("A".into()),
            ..Default::default()
        };
        first.supplemental = vec!["Cutaneous route".into()];
        let mut second = RawChemicalRecord {
            id: "222-22-2".into(),
            name: Some("B".into()),
            ..Default::default()
        };
        second.supplemental = vec!["Cutaneous route".into(), "Reacts with water".into()];

        let mut agg = Aggregator::default();
        agg.fold(&ingest(first, &tables).unwrap());
        agg.fold(&ingest(second, &tables).unwrap());
        let inventory = agg.finish(&tables);

        assert_eq!(inventory.hazards.len(), 2);
        let supp1 = &inventory.hazards[0];
        assert_eq!(supp1.code, "Supp. 1");
        assert_eq!(supp1.statement, "Cutaneous route");
        assert_eq!(supp1.count, 2);
        let supp2 = &inventory.hazards[1];
        assert_eq!(supp2.code, "Supp. 2");
        assert_eq!(supp2.count, 1);
    }

    #[test]
    fn test_merged_table_sorted_by_code() {
        let tables = tables();
        let mut raw = RawChemicalRecord {
            id: "111-11-1".into(),
            name: Some("A".into()),
            ..Default::default()
        };
        raw.hazards.insert("H315".into(), String::new());
        raw.supplemental = vec!["Hygroscopic".into()];

        let mut agg = Aggregator::default();
        agg.fold(&ingest(raw, &tables).unwrap());
        let inventory = agg.finish(&tables);
        let codes: Vec<&str> = inventory.hazards.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, vec!["H315", "Supp. 1"]);
    }

    #[test]
    fn test_duplicate_ppe_counted_once() {
        let tables = tables();
        let mut raw = RawChemicalRecord {
            id: "111-11-1".into(),
            name: Some("A".into()),
            ..Default::default()
        };
        raw.ppe = vec!["gloves".into(), "gloves".into(), "eyeshields".into()];

        let mut agg = Aggregator::default();
        agg.fold(&ingest(raw, &tables).unwrap());
        let inventory = agg.finish(&tables);
        assert_eq!(inventory.ppe.len(), 2);
        for entry in &inventory.ppe {
            assert_eq!(entry.count, 1);
        }
    }
}
