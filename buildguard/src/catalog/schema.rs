use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category of a component. Serialized with the storefront's
/// display strings (e.g. `"Memory (RAM)"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComponentType {
    #[serde(rename = "Processor")]
    Processor,
    #[serde(rename = "Motherboard")]
    Motherboard,
    #[serde(rename = "Memory (RAM)")]
    Memory,
    #[serde(rename = "SSD")]
    Ssd,
    #[serde(rename = "HDD")]
    Hdd,
    #[serde(rename = "Graphics Card")]
    GraphicsCard,
    #[serde(rename = "PC Case")]
    PcCase,
    #[serde(rename = "Power Supply")]
    PowerSupply,
    #[serde(rename = "CPU Cooling")]
    CpuCooling,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Processor => "Processor",
            ComponentType::Motherboard => "Motherboard",
            ComponentType::Memory => "Memory (RAM)",
            ComponentType::Ssd => "SSD",
            ComponentType::Hdd => "HDD",
            ComponentType::GraphicsCard => "Graphics Card",
            ComponentType::PcCase => "PC Case",
            ComponentType::PowerSupply => "Power Supply",
            ComponentType::CpuCooling => "CPU Cooling",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product record as supplied by the storefront catalog.
///
/// Only `id`, `name` and `type` are required; the free-text and commercial
/// fields default so that partial records from a product feed still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Component {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
}

impl Component {
    pub fn new(id: &str, name: &str, component_type: ComponentType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            component_type,
            price: 0.0,
            stock: 1,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Lower-cased `name + " " + description`, the haystack for every
    /// keyword heuristic.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
