pub mod console;
pub mod documents;
pub mod merit_csv;

use crate::error::CoreResult;
use crate::ranking::MeritEntry;
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use console::render_top_table;
pub use documents::{parse_merit_list_json, render_merit_list_json, render_store_json};
pub use merit_csv::{render_merit_list_csv, MERIT_LIST_COLUMNS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub store_file: String,
    pub merit_list_json_file: String,
    pub merit_list_csv_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("extraction_results"),
            store_file: "extraction_results.json".to_string(),
            merit_list_json_file: "merit_list.json".to_string(),
            merit_list_csv_file: "merit_list.csv".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportPaths {
    pub store_json: PathBuf,
    pub merit_list_json: PathBuf,
    pub merit_list_csv: PathBuf,
}

/// Writes the three run documents. Pure format transform; no merge logic.
#[derive(Debug, Clone, Default)]
pub struct MeritExporter {
    config: ExportConfig,
}

impl MeritExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn write_all(
        &self,
        store: &RecordStore,
        merit_list: &[MeritEntry],
    ) -> CoreResult<ExportPaths> {
        fs::create_dir_all(&self.config.output_dir)?;

        let paths = ExportPaths {
            store_json: self.config.output_dir.join(&self.config.store_file),
            merit_list_json: self.config.output_dir.join(&self.config.merit_list_json_file),
            merit_list_csv: self.config.output_dir.join(&self.config.merit_list_csv_file),
        };

        write_document(&paths.store_json, &render_store_json(store)?)?;
        write_document(&paths.merit_list_json, &render_merit_list_json(merit_list)?)?;
        write_document(&paths.merit_list_csv, &render_merit_list_csv(merit_list)?)?;
        Ok(paths)
    }
}

fn write_document(path: &Path, contents: &str) -> CoreResult<()> {
    fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote export");
    Ok(())
}
