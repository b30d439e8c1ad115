pub mod aggregate;
pub mod code;
pub mod error;
pub mod ingest;
pub mod model;
pub mod normalize;
pub mod source;
pub mod tables;

use aggregate::{Aggregator, Inventory};
use model::{ChemicalRecord, RawChemicalRecord};
use serde::Serialize;
use source::RecordSource;
use tables::CodeTables;

/// Outcome of compiling an inventory from a list of identifiers.
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
    /// Successfully ingested records, in processing order.
    pub chemicals: Vec<ChemicalRecord>,
    /// The statement-centric summary tables.
    pub inventory: Inventory,
    /// Identifiers for which no record could be ingested. Never silently
    /// dropped: a failed identifier always lands here.
    pub bad_ids: Vec<String>,
    /// Distinct identifiers requested.
    pub requested: usize,
    /// Identifiers that produced a record.
    pub processed: usize,
}

/// Main API entry point: compile the hazard inventory for a list of
/// chemical identifiers.
///
/// Identifiers are deduplicated defensively (first occurrence wins, blanks
/// dropped). Each one is fetched from the retrieval source, ingested and
/// folded into the aggregate tables; a per-identifier failure routes the
/// identifier to `bad_ids` and the run continues.
pub fn compile_inventory(
    ids: &[String],
    source: &dyn RecordSource,
    tables: &CodeTables,
) -> CompileResult {
    let mut seen = std::collections::BTreeSet::new();
    let mut distinct: Vec<&str> = Vec::new();
    for id in ids {
        let id = id.trim();
        if !id.is_empty() && seen.insert(id) {
            distinct.push(id);
        }
    }

    let mut chemicals = Vec::new();
    let mut bad_ids = Vec::new();
    let mut aggregator = Aggregator::default();

    for id in &distinct {
        let record = match source.fetch(id) {
            Ok(raw) => match ingest::ingest(raw, tables) {
                Ok(record) => record,
                Err(_) => {
                    bad_ids.push(id.to_string());
                    continue;
                }
            },
            Err(_) => {
                bad_ids.push(id.to_string());
                continue;
            }
        };
        aggregator.fold(&record);
        chemicals.push(record);
    }

    let inventory = aggregator.finish(tables);
    let processed = chemicals.len();

    CompileResult {
        chemicals,
        inventory,
        bad_ids,
        requested: distinct.len(),
        processed,
    }
}

/// Compile the inventory from already-retrieved raw records (e.g. the
/// saved output of a scraping run), skipping the per-identifier fetch.
pub fn compile_records(raw_records: Vec<RawChemicalRecord>, tables: &CodeTables) -> CompileResult {
    let mut chemicals = Vec::new();
    let mut bad_ids = Vec::new();
    let mut aggregator = Aggregator::default();
    let requested = raw_records.len();

    for raw in raw_records {
        let original_id = raw.id.clone();
        match ingest::ingest(raw, tables) {
            Ok(record) => {
                aggregator.fold(&record);
                chemicals.push(record);
            }
            Err(_) => bad_ids.push(original_id),
        }
    }

    let inventory = aggregator.finish(tables);
    let processed = chemicals.len();

    CompileResult {
        chemicals,
        inventory,
        bad_ids,
        requested,
        processed,
    }
}
