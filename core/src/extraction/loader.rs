use super::model::ExtractionResult;
use super::parser::parse_result;
use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Load one batch of OCR results from `path`.
///
/// A directory is read one level deep in file-name order; every `*.json`
/// file holds either a single result object or an array of them. A plain
/// file is read the same way as one directory entry. Files the collaborator
/// left unreadable become failure markers rather than errors, so one broken
/// file never aborts the run; only a missing path is an error.
pub fn load_batch(path: &Path) -> CoreResult<Vec<ExtractionResult>> {
    if !path.exists() {
        return Err(CoreError::InvalidInput(format!(
            "batch path does not exist: {}",
            path.display()
        )));
    }

    if path.is_file() {
        return Ok(load_result_file(path));
    }

    let mut results = Vec::new();
    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let p = entry.path();
        if !entry.file_type().is_file() || !has_json_extension(p) {
            debug!(path = %p.display(), "skipping non-json entry");
            continue;
        }
        results.extend(load_result_file(p));
    }

    debug!(path = %path.display(), count = results.len(), "loaded batch");
    Ok(results)
}

fn load_result_file(path: &Path) -> Vec<ExtractionResult> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());

    let parsed = fs::read_to_string(path)
        .map_err(CoreError::from)
        .and_then(|text| serde_json::from_str::<Value>(&text).map_err(CoreError::from));

    match parsed {
        Ok(Value::Array(items)) => items.iter().map(parse_result).collect(),
        Ok(value @ Value::Object(_)) => {
            let mut result = parse_result(&value);
            if result.origin_label.is_none() {
                if let Some(label) = source_label(path) {
                    result.stamp_origin_label(label);
                }
            }
            vec![result]
        }
        Ok(_) => {
            warn!(path = %path.display(), "result file is not an object or array, recording failure");
            vec![ExtractionResult::failure(file_name)]
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable result file, recording failure");
            vec![ExtractionResult::failure(file_name)]
        }
    }
}

/// Name of the scanned document a result file describes: `R1_sports.png.json`
/// stands for `R1_sports.png`, and `R1_sports.json` for `R1_sports`.
fn source_label(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
