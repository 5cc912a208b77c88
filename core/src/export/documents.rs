use crate::error::CoreResult;
use crate::ranking::MeritEntry;
use crate::store::RecordStore;

/// Full store dump: identity -> { marksheet?, certificates? }, identities in
/// first-encounter order, each result as received.
pub fn render_store_json(store: &RecordStore) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(store)?)
}

/// Ranked list as a JSON array, fields in merit list column order.
pub fn render_merit_list_json(merit_list: &[MeritEntry]) -> CoreResult<String> {
    Ok(serde_json::to_string_pretty(merit_list)?)
}

pub fn parse_merit_list_json(json_str: &str) -> CoreResult<Vec<MeritEntry>> {
    Ok(serde_json::from_str(json_str)?)
}
