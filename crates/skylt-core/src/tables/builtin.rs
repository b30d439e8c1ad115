use super::CodeTables;
use std::sync::LazyLock;

const H2P_TXT: &str = include_str!("../../../../data/h2p.txt");
const P_STATEMENTS_TXT: &str = include_str!("../../../../data/p-statements.txt");
const H_STATEMENTS_TXT: &str = include_str!("../../../../data/h-statements.txt");

static TABLES: LazyLock<CodeTables> =
    LazyLock::new(|| CodeTables::from_sources(H2P_TXT, P_STATEMENTS_TXT, H_STATEMENTS_TXT));

/// The embedded GHS code tables (CLP Annex III/IV statement texts and the
/// hazard-to-precaution assignment table).
pub fn tables() -> &'static CodeTables {
    &TABLES
}
