//! Core evaluation API shared by the CLI and embedding applications.
//! No UI or storefront dependencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analyzer::attributes::{KeywordExtractor, PartsTableExtractor};
use crate::analyzer::rules::{BuildReport, CompatibilityEngine, CompatibilityVerdict};
use crate::analyzer::Candidate;
use crate::build::{Build, SlotId, StoreError};
use crate::catalog::{Catalog, Component};

#[derive(Debug, thiserror::Error)]
pub enum BuildGuardError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown slot id: {0}")]
    UnknownSlot(String),
    #[error("Unknown component id: {0}")]
    UnknownComponent(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Which attribute source the engine uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractorConfig {
    #[default]
    Keyword,
    PartsTable { path: PathBuf },
}

/// Engine settings, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub extractor: ExtractorConfig,
    /// Default for candidate listings: hide candidates the build rejects.
    pub only_compatible: bool,
}

impl EngineConfig {
    /// Load a config file. A relative parts-table path is taken relative to
    /// the config file's directory.
    pub fn load(path: &Path) -> Result<Self, BuildGuardError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: EngineConfig = serde_json::from_str(&content)?;
        if let ExtractorConfig::PartsTable { path: table } = &mut config.extractor {
            if table.is_relative() {
                if let Some(dir) = path.parent() {
                    *table = dir.join(&*table);
                }
            }
        }
        Ok(config)
    }

    pub fn build_engine(&self) -> Result<CompatibilityEngine, BuildGuardError> {
        let engine = match &self.extractor {
            ExtractorConfig::Keyword => CompatibilityEngine::with_extractor(Arc::new(KeywordExtractor)),
            ExtractorConfig::PartsTable { path } => {
                CompatibilityEngine::with_extractor(Arc::new(PartsTableExtractor::load(path)?))
            }
        };
        tracing::debug!("Using {} attribute extractor", engine.extractor().name());
        Ok(engine)
    }
}

/// One slot entry in a build file: either a catalog id or an inline record.
#[derive(Deserialize)]
#[serde(untagged)]
enum BuildEntry {
    Id(String),
    Component(Component),
}

/// Parse a build file (a JSON object keyed by slot id). Entries given as
/// plain strings are resolved against `catalog`.
pub fn parse_build(json: &str, catalog: &Catalog) -> Result<Build, BuildGuardError> {
    let raw: BTreeMap<String, BuildEntry> = serde_json::from_str(json)?;
    let mut ids = BTreeMap::new();
    let mut build = Build::new();
    for (key, entry) in raw {
        let slot: SlotId = key.parse()?;
        match entry {
            BuildEntry::Id(id) => {
                ids.insert(slot, id);
            }
            BuildEntry::Component(component) => {
                build.set(slot, component);
            }
        }
    }
    let resolved = Build::from_selection(&ids, catalog)?;
    for (slot, component) in resolved.iter() {
        build.set(slot, component.clone());
    }
    Ok(build)
}

pub fn load_build(path: &Path, catalog: &Catalog) -> Result<Build, BuildGuardError> {
    let content = std::fs::read_to_string(path)?;
    parse_build(&content, catalog)
}

/// File-level entry points used by the CLI.
pub struct BuildGuardCore;

impl BuildGuardCore {
    /// Evaluate the build in `build_path` against the catalog in `catalog_path`.
    pub fn check(
        catalog_path: &Path,
        build_path: &Path,
        config: &EngineConfig,
    ) -> Result<BuildReport, BuildGuardError> {
        let engine = config.build_engine()?;
        let catalog = Catalog::load(catalog_path)?;
        let build = load_build(build_path, &catalog)?;
        Ok(engine.report(&build))
    }

    /// List candidates for `slot`, optionally against a build file.
    pub fn candidates(
        catalog: &Catalog,
        slot: SlotId,
        build_path: Option<&Path>,
        only_compatible: bool,
        config: &EngineConfig,
    ) -> Result<Vec<(Component, CompatibilityVerdict)>, BuildGuardError> {
        let engine = config.build_engine()?;
        let build = match build_path {
            Some(path) => load_build(path, catalog)?,
            None => Build::new(),
        };
        let only_compatible = only_compatible || config.only_compatible;
        Ok(engine
            .annotated_candidates(catalog, slot, &build, only_compatible)
            .into_iter()
            .map(|Candidate { component, verdict }| (component.clone(), verdict))
            .collect())
    }
}
