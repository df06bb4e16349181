use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::scores::ScoreRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid results file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("results file {} does not hold a JSON object", path.display())]
    NotAnObject { path: PathBuf },
    #[error("cannot serialize score record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Merges `record` into the JSON object stored at `results_path`.
///
/// Keys already in the file and absent from `record` are kept. A missing or
/// empty file starts from an empty object. Non-finite scores are written as
/// `null`.
pub fn update_json(results_path: &Path, record: &ScoreRecord) -> Result<(), ReportError> {
    let mut data = read_existing(results_path)?;
    if let Value::Object(fields) = serde_json::to_value(record)? {
        data.extend(fields);
    }
    let json = serde_json::to_string(&Value::Object(data))?;
    fs::write(results_path, json)?;
    Ok(())
}

fn read_existing(path: &Path) -> Result<Map<String, Value>, ReportError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(err) => return Err(err.into()),
    };
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ReportError::NotAnObject {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ReportError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
