use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;
use tracing::{error, info};

static SAMPLE_DIR_PORTFOLIO: Dir = include_dir!("sample/portfolio");

pub fn generate_template(name: String) {
    match name.as_str() {
        "card" => {
            println!("{}", crate::render::default_card_template());
        }
        "page" => {
            println!("{}", crate::page::default_page());
        }
        _ => {
            error!("Unsupported template: {} - use card, page", name);
        }
    }
}

pub fn generate_sample(sample: String, dir: String) {
    info!("Generating sample project: {:?} in {:?}", sample, dir);
    let target_path = Path::new(&dir);
    if let Err(e) = fs::create_dir_all(target_path) {
        error!("Failed to create target directory: {:?}", e);
        return;
    }

    fn write_dir_contents(dir: &Dir, target_path: &Path) {
        for file in dir.files() {
            let target_file_path = target_path.join(file.path());

            if let Some(parent) = target_file_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    error!("Failed to create directory: {:?}", e);
                    return;
                }
            }

            if let Err(e) = fs::write(&target_file_path, file.contents()) {
                error!("Failed to write file: {:?}", e);
                return;
            }
        }

        for sub_dir in dir.dirs() {
            let sub_dir_path = target_path.join(sub_dir.path());
            if let Err(e) = fs::create_dir_all(&sub_dir_path) {
                error!("Failed to create subdirectory: {:?}", e);
                return;
            }
            write_dir_contents(sub_dir, &sub_dir_path);
        }
    }

    match sample.to_lowercase().as_str() {
        "portfolio" => write_dir_contents(&SAMPLE_DIR_PORTFOLIO, target_path),
        _ => {
            error!("Unsupported sample: {} - use portfolio", sample);
            return;
        }
    }

    info!("Sample project generated successfully at: {:?}", dir);
}
