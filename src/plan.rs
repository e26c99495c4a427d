use serde::{Deserialize, Serialize};

/// ## Structure
/// This module contains the data structures for the configuration file.
///
/// ```text
/// Plan
///   ├── meta: Option<Meta>
///   │   └── name: Option<String>
///   ├── import: ImportConfig
///   │   └── profiles: Vec<ImportProfile>
///   │       └── source: String (file path or http(s) URL)
///   └── export: ExportConfig
///       └── profiles: Vec<ExportProfileItem>
///           ├── page: String
///           ├── filename: String
///           └── card_template: Option<String>
/// ```
///

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Meta {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Plan {
    pub meta: Option<Meta>,
    pub import: ImportConfig,
    pub export: ExportConfig,
}

//
// Import configuration
//

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ImportConfig {
    pub profiles: Vec<ImportProfile>,
}

/// One source of project records. Local paths are resolved relative to the
/// plan file and dispatched on extension (json, csv, tsv); http(s) sources
/// are fetched as JSON.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImportProfile {
    pub source: String,
}

//
// Export configuration
//

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExportConfig {
    pub profiles: Vec<ExportProfileItem>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExportProfileItem {
    /// Host page carrying the card template and the container element.
    pub page: String,
    /// Where the finished page is written, relative to the plan file.
    pub filename: String,
    /// Optional card template file overriding the page's inline
    /// `<template>` element.
    pub card_template: Option<String>,
}
