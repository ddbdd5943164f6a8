use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analyzer::attributes::StorageInterface;
use crate::catalog::ComponentType;
use crate::core::BuildGuardError;

/// Stable key of a build position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotId {
    #[serde(rename = "cpu")]
    Cpu,
    #[serde(rename = "motherboard")]
    Motherboard,
    #[serde(rename = "ram")]
    Ram,
    #[serde(rename = "ssd_sata")]
    SsdSata,
    #[serde(rename = "ssd_m2")]
    SsdM2,
    #[serde(rename = "hdd")]
    Hdd,
    #[serde(rename = "gpu")]
    Gpu,
    #[serde(rename = "pccase")]
    PcCase,
    #[serde(rename = "psu")]
    Psu,
    #[serde(rename = "cooler")]
    Cooler,
}

/// A fixed position in a PC build.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<StorageInterface>,
}

pub const SLOTS: [Slot; 10] = [
    Slot {
        id: SlotId::Cpu,
        name: "Processor",
        component_type: ComponentType::Processor,
        sub_type: None,
    },
    Slot {
        id: SlotId::Motherboard,
        name: "Motherboard",
        component_type: ComponentType::Motherboard,
        sub_type: None,
    },
    Slot {
        id: SlotId::Ram,
        name: "Memory (RAM)",
        component_type: ComponentType::Memory,
        sub_type: None,
    },
    Slot {
        id: SlotId::SsdSata,
        name: "SATA SSD",
        component_type: ComponentType::Ssd,
        sub_type: Some(StorageInterface::Sata),
    },
    Slot {
        id: SlotId::SsdM2,
        name: "M.2 NVMe SSD",
        component_type: ComponentType::Ssd,
        sub_type: Some(StorageInterface::M2),
    },
    Slot {
        id: SlotId::Hdd,
        name: "Hard Drive (HDD)",
        component_type: ComponentType::Hdd,
        sub_type: None,
    },
    Slot {
        id: SlotId::Gpu,
        name: "Graphics Card",
        component_type: ComponentType::GraphicsCard,
        sub_type: None,
    },
    Slot {
        id: SlotId::PcCase,
        name: "PC Case",
        component_type: ComponentType::PcCase,
        sub_type: None,
    },
    Slot {
        id: SlotId::Psu,
        name: "Power Supply",
        component_type: ComponentType::PowerSupply,
        sub_type: None,
    },
    Slot {
        id: SlotId::Cooler,
        name: "CPU Cooler",
        component_type: ComponentType::CpuCooling,
        sub_type: None,
    },
];

impl SlotId {
    pub const ALL: [SlotId; 10] = [
        SlotId::Cpu,
        SlotId::Motherboard,
        SlotId::Ram,
        SlotId::SsdSata,
        SlotId::SsdM2,
        SlotId::Hdd,
        SlotId::Gpu,
        SlotId::PcCase,
        SlotId::Psu,
        SlotId::Cooler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotId::Cpu => "cpu",
            SlotId::Motherboard => "motherboard",
            SlotId::Ram => "ram",
            SlotId::SsdSata => "ssd_sata",
            SlotId::SsdM2 => "ssd_m2",
            SlotId::Hdd => "hdd",
            SlotId::Gpu => "gpu",
            SlotId::PcCase => "pccase",
            SlotId::Psu => "psu",
            SlotId::Cooler => "cooler",
        }
    }

    /// The static slot definition for this id.
    pub fn slot(&self) -> &'static Slot {
        // SLOTS is declared in SlotId::ALL order
        &SLOTS[*self as usize]
    }

    pub fn component_type(&self) -> ComponentType {
        self.slot().component_type
    }

    pub fn sub_type(&self) -> Option<StorageInterface> {
        self.slot().sub_type
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotId {
    type Err = BuildGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| BuildGuardError::UnknownSlot(s.to_string()))
    }
}
