use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::TrialBalanceDocument;

/// Reads a normalized trial balance document from a JSON file.
pub fn read_document(path: &Path) -> Result<TrialBalanceDocument> {
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

/// Writes a normalized trial balance document as pretty-printed JSON.
pub fn write_document(path: &Path, document: &TrialBalanceDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)?;
    Ok(())
}
