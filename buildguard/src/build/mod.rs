//! Build model
//!
//! A [`Build`] maps each [`SlotId`] to at most one selected [`Component`].
//! The caller owns it and fills it one slot at a time; the compatibility
//! engine only ever reads it.

pub mod slots;
pub mod store;

pub use slots::{Slot, SlotId, SLOTS};
pub use store::{BuildStore, JsonFileBuildStore, MemoryBuildStore, SavedBuild, StoreError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Catalog, Component};
use crate::core::BuildGuardError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Build {
    slots: BTreeMap<SlotId, Component>,
}

impl Build {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `component` into `slot`, returning whatever it replaced.
    pub fn set(&mut self, slot: SlotId, component: Component) -> Option<Component> {
        self.slots.insert(slot, component)
    }

    pub fn with(mut self, slot: SlotId, component: Component) -> Self {
        self.set(slot, component);
        self
    }

    pub fn remove(&mut self, slot: SlotId) -> Option<Component> {
        self.slots.remove(&slot)
    }

    pub fn get(&self, slot: SlotId) -> Option<&Component> {
        self.slots.get(&slot)
    }

    /// Selected slots in slot-table order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Component)> {
        self.slots.iter().map(|(slot, c)| (*slot, c))
    }

    pub fn selected_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a component with `id` sits in any slot other than `except`.
    pub fn contains_id_elsewhere(&self, id: &str, except: SlotId) -> bool {
        self.iter().any(|(slot, c)| slot != except && c.id == id)
    }

    /// Sum of the selected components' prices, recomputed on every call.
    pub fn total_price(&self) -> f64 {
        self.slots.values().map(|c| c.price).sum()
    }

    pub fn cpu(&self) -> Option<&Component> {
        self.get(SlotId::Cpu)
    }

    pub fn motherboard(&self) -> Option<&Component> {
        self.get(SlotId::Motherboard)
    }

    pub fn ram(&self) -> Option<&Component> {
        self.get(SlotId::Ram)
    }

    pub fn ssd_sata(&self) -> Option<&Component> {
        self.get(SlotId::SsdSata)
    }

    pub fn ssd_m2(&self) -> Option<&Component> {
        self.get(SlotId::SsdM2)
    }

    pub fn hdd(&self) -> Option<&Component> {
        self.get(SlotId::Hdd)
    }

    pub fn gpu(&self) -> Option<&Component> {
        self.get(SlotId::Gpu)
    }

    pub fn pccase(&self) -> Option<&Component> {
        self.get(SlotId::PcCase)
    }

    pub fn psu(&self) -> Option<&Component> {
        self.get(SlotId::Psu)
    }

    pub fn cooler(&self) -> Option<&Component> {
        self.get(SlotId::Cooler)
    }

    /// Resolve a slot → component id selection against a catalog.
    pub fn from_selection(
        selection: &BTreeMap<SlotId, String>,
        catalog: &Catalog,
    ) -> Result<Self, BuildGuardError> {
        let mut build = Build::new();
        for (slot, id) in selection {
            let component = catalog
                .get(id)
                .ok_or_else(|| BuildGuardError::UnknownComponent(id.clone()))?;
            build.set(*slot, component.clone());
        }
        Ok(build)
    }
}
