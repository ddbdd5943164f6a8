//! Product catalog input
//!
//! The engine never fetches products itself. Callers hand it a flat list of
//! [`Component`] records; this module only gives that list a type and a JSON
//! loader so product feeds exported from the storefront can be evaluated
//! offline.
//!
//! Two JSON layouts are accepted:
//!
//! ```json
//! [ { "id": "cpu-1", "name": "AMD Ryzen 5 7600", "type": "Processor" } ]
//! ```
//!
//! or an object wrapping the same array under `"components"`. Records that do
//! not parse as a [`Component`] are skipped with a warning; the rest of the
//! feed still loads.

pub mod schema;

pub use schema::{Component, ComponentType};

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::core::BuildGuardError;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Value>),
    Wrapped { components: Vec<Value> },
}

/// An immutable snapshot of candidate components, in feed order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<Component>,
}

impl Catalog {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn from_json_str(json: &str) -> Result<Self, BuildGuardError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let records = match file {
            CatalogFile::List(records) => records,
            CatalogFile::Wrapped { components } => components,
        };

        let mut components = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or("<no id>")
                .to_string();
            match serde_json::from_value::<Component>(record) {
                Ok(component) => components.push(component),
                Err(e) => {
                    tracing::warn!("Skipping catalog record #{} ({}): {}", index, id, e);
                }
            }
        }
        Ok(Self::new(components))
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, BuildGuardError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded {} components from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn of_type(&self, component_type: ComponentType) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(move |c| c.component_type == component_type)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl From<Vec<Component>> for Catalog {
    fn from(components: Vec<Component>) -> Self {
        Self::new(components)
    }
}
