use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::channel;
use tracing::{debug, error, info, warn};

use anyhow::{anyhow, Result};

use crate::data_loader;
use crate::page::Page;
use crate::plan::{ExportProfileItem, Plan};
use crate::project::Project;
use crate::render::{self, CardTemplate};

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Loads one import source: http(s) URLs are fetched, local paths are
/// resolved relative to the plan file and dispatched on extension.
async fn load_source(source: &str, plan_file_path: &Path) -> Result<Vec<Project>> {
    if is_url(source) {
        return crate::fetch::fetch_projects(source).await;
    }

    let parent_dir = plan_file_path
        .parent()
        .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
    let path = parent_dir.join(source);
    let file_path = path
        .to_str()
        .ok_or_else(|| anyhow!("Source path contains invalid UTF-8: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("");

    match extension {
        "json" => data_loader::load_json(file_path),
        "csv" => data_loader::load_csv(file_path),
        "tsv" => data_loader::load_tsv(file_path),
        _ => {
            error!("Error: unsupported extension {}", extension);
            anyhow::bail!("Unsupported extension");
        }
    }
}

/// Collects records from every import profile, in profile order.
async fn load_projects(plan: &Plan, plan_file_path: &Path) -> Result<Vec<Project>> {
    let mut projects = Vec::new();
    for profile in &plan.import.profiles {
        info!("Importing projects from {}", profile.source);
        let batch = load_source(&profile.source, plan_file_path).await?;
        debug!("Loaded {} projects from {}", batch.len(), profile.source);
        projects.extend(batch);
    }
    Ok(projects)
}

/// Renders one export profile: host page in, finished page out.
fn export_page(
    projects: &[Project],
    profile: &ExportProfileItem,
    plan_file_path: &Path,
) -> Result<()> {
    info!("Rendering page {} into {}", profile.page, profile.filename);

    let parent_dir = plan_file_path
        .parent()
        .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
    let page = Page::load(&parent_dir.join(&profile.page))?;

    let output = match &profile.card_template {
        Some(template_file) => {
            let source = std::fs::read_to_string(parent_dir.join(template_file))?;
            let template = CardTemplate::new(source);
            let mut container = page.container()?;
            render::render_cards(projects, &template, &mut container)?;
            page.with_cards(&container)?
        }
        None => render::render_page(&page, projects)?,
    };

    let out_path = parent_dir.join(&profile.filename);
    let out_file = out_path
        .to_str()
        .ok_or_else(|| anyhow!("Output path contains invalid UTF-8: {}", out_path.display()))?;
    crate::common::write_string_to_file(out_file, &output)?;
    Ok(())
}

/// Executes a single plan run.
///
/// A failure to acquire the record document is handled centrally: it is
/// logged and the run ends without rendering anything. Per-page render
/// failures are logged and the remaining pages still render.
async fn run_plan(plan: &Plan, plan_file_path: &Path) -> Result<()> {
    let projects = match load_projects(plan, plan_file_path).await {
        Ok(projects) => projects,
        Err(e) => {
            error!("Failed to load project data: {}", e);
            warn!("Not rendering pages");
            return Ok(());
        }
    };

    info!("Loaded {} projects", projects.len());

    for profile in &plan.export.profiles {
        if let Err(e) = export_page(&projects, profile, plan_file_path) {
            error!("Failed to render page {}: {}", profile.page, e);
        }
    }

    Ok(())
}

/// Main function to execute a plan, with optional file watching
pub async fn execute_plan(plan: String, watch: bool) -> Result<()> {
    info!("Executing plan {}", plan);

    let plan_file_path = std::path::Path::new(&plan);
    let path_content = std::fs::read_to_string(plan_file_path)?;
    let plan: Plan = serde_yaml::from_str(&path_content)?;

    debug!("Executing plan: {:?}", plan);
    run_plan(&plan, plan_file_path).await?;

    if watch {
        watch_for_changes(plan, plan_file_path).await?;
    }

    Ok(())
}

/// Sets up file watching for local inputs to re-run the plan on changes.
/// Remote sources are not watched.
async fn watch_for_changes(plan: Plan, plan_file_path: &Path) -> Result<()> {
    info!("Watching for changes");
    let mut files: Vec<String> = plan
        .import
        .profiles
        .iter()
        .map(|profile| profile.source.clone())
        .filter(|source| !is_url(source))
        .collect();
    files.extend(plan.export.profiles.iter().map(|profile| profile.page.clone()));

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
    for file in &files {
        let parent_dir = plan_file_path
            .parent()
            .ok_or_else(|| anyhow!("Plan file has no parent directory"))?;
        let path = parent_dir.join(file);
        watcher.watch(&path, RecursiveMode::NonRecursive)?;
    }

    loop {
        match rx.recv() {
            Ok(event) => {
                if let Ok(event) = event {
                    if let EventKind::Modify(_) = event.kind {
                        debug!("File modified {:?}", event.paths);
                        info!("Change detected, re-executing plan");
                        run_plan(&plan, plan_file_path).await?;
                    }
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    }
}
