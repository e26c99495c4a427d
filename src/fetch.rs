use anyhow::Result;
use tracing::{debug, info};

use crate::project::Project;

/// Fetches the project document with a single unauthenticated GET. No
/// timeout, no retry: a network or parse failure surfaces as one error for
/// the caller's central handler.
pub async fn fetch_projects(url: &str) -> Result<Vec<Project>> {
    info!("Fetching projects from {}", url);
    let response = reqwest::get(url).await?.error_for_status()?;
    let projects: Vec<Project> = response.json().await?;
    debug!("Fetched {} projects", projects.len());
    Ok(projects)
}
