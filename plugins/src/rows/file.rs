use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use taskcast_core::api::RowSource;

/// Rows from a JSON object on disk.
///
/// Keys are either `"{sheet_id}/{range}"`, the range alone, or the sheet id
/// alone, looked up in that order. Values are arrays of rows; non-string cells
/// are rendered the way the Sheets API would render them as text.
///
/// ```json
/// { "dept-sheet/Hoja1!A2:N": [["RM revisar", "", "Ana", "1/1/2020", "no realizado"]] }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileRowSource {
    path: PathBuf,
}

impl JsonFileRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> anyhow::Result<HashMap<String, Vec<Vec<Value>>>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read rows file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse rows file {}", self.path.display()))
    }
}

fn cell_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RowSource for JsonFileRowSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_rows(&self, sheet_id: &str, range: &str) -> anyhow::Result<Vec<Vec<String>>> {
        let mut all = self.read_all().await?;
        let keys = [format!("{sheet_id}/{range}"), range.to_string(), sheet_id.to_string()];
        let rows = keys
            .iter()
            .find_map(|k| all.remove(k))
            .with_context(|| {
                format!(
                    "rows file {} has no entry for `{sheet_id}/{range}`",
                    self.path.display()
                )
            })?;
        tracing::debug!(
            target: "taskcast.rows",
            path = %self.path.display(),
            sheet_id = %sheet_id,
            range = %range,
            rows = rows.len(),
            "rows loaded from file"
        );
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}
