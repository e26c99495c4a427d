use anyhow::Result;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use crate::project::Project;

/// Columns a delimited source must carry. The JSON path is deliberately
/// lenient (absent fields default to empty); a delimited file missing a whole
/// column is a malformed source and is rejected up front.
const REQUIRED_COLUMNS: [&str; 4] = ["url", "img_src", "title", "description"];

pub fn load_json(filename: &str) -> Result<Vec<Project>> {
    let content = std::fs::read_to_string(filename)?;
    let projects: Vec<Project> = serde_json::from_str(&content)?;
    debug!("Loaded {} projects from {}", projects.len(), filename);
    Ok(projects)
}

pub fn load_csv(filename: &str) -> Result<Vec<Project>> {
    load_delimited(filename, b',')
}

pub fn load_tsv(filename: &str) -> Result<Vec<Project>> {
    load_delimited(filename, b'\t')
}

fn load_delimited(filename: &str, separator: u8) -> Result<Vec<Project>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(separator)
        .from_path(Path::new(filename))?;

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    verify_headers(&headers)?;

    let mut projects = Vec::new();
    for record in reader.deserialize() {
        projects.push(record?);
    }
    debug!("Loaded {} projects from {}", projects.len(), filename);
    Ok(projects)
}

pub fn verify_headers(headers: &[String]) -> Result<()> {
    for &col in &REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(anyhow::anyhow!("Missing required column: {}", col));
        }
    }
    Ok(())
}
