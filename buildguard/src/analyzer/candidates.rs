//! Candidate lists for a slot
//!
//! Narrows a catalog to what a slot can hold: matching product type, the
//! right storage interface for the SSD/HDD slots, and stock on hand. When
//! asked, candidates that the current build rejects are dropped as well.

use serde::Serialize;

use crate::analyzer::attributes::StorageInterface;
use crate::analyzer::rules::{CompatibilityEngine, CompatibilityVerdict};
use crate::build::{Build, SlotId};
use crate::catalog::{Catalog, Component, ComponentType};

/// A selectable component paired with its verdict against the current build.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate<'a> {
    pub component: &'a Component,
    pub verdict: CompatibilityVerdict,
}

impl CompatibilityEngine {
    /// Whether `component` belongs in `slot` at all, ignoring stock and the
    /// rest of the build.
    pub fn fits_slot(&self, component: &Component, slot: SlotId) -> bool {
        if component.component_type != slot.component_type() {
            return false;
        }
        let interface = self.extractor().storage_interface(component);
        match slot {
            SlotId::SsdSata | SlotId::SsdM2 => interface == slot.sub_type(),
            SlotId::Hdd => {
                component.component_type == ComponentType::Hdd
                    && interface == Some(StorageInterface::Sata)
            }
            _ => true,
        }
    }

    /// In-stock catalog entries for `slot`, in catalog order. With
    /// `only_compatible`, entries whose verdict against `build` is negative
    /// are left out.
    pub fn candidates_for_slot<'a>(
        &self,
        catalog: &'a Catalog,
        slot: SlotId,
        build: &Build,
        only_compatible: bool,
    ) -> Vec<&'a Component> {
        self.annotated_candidates(catalog, slot, build, only_compatible)
            .into_iter()
            .map(|c| c.component)
            .collect()
    }

    /// Like [`candidates_for_slot`](Self::candidates_for_slot), keeping each
    /// verdict for display.
    pub fn annotated_candidates<'a>(
        &self,
        catalog: &'a Catalog,
        slot: SlotId,
        build: &Build,
        only_compatible: bool,
    ) -> Vec<Candidate<'a>> {
        let candidates: Vec<Candidate<'a>> = catalog
            .of_type(slot.component_type())
            .filter(|c| self.fits_slot(c, slot))
            .filter(|c| c.in_stock())
            .map(|component| Candidate {
                component,
                verdict: self.evaluate_candidate(component, slot, build),
            })
            .filter(|c| !only_compatible || c.verdict.compatible)
            .collect();

        tracing::debug!(
            "{} candidate(s) for slot {} (only_compatible={})",
            candidates.len(),
            slot,
            only_compatible
        );
        candidates
    }
}
