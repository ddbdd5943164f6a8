//! Component attribute extraction
//!
//! Product copy is unstructured, so sockets, memory generations, form
//! factors and storage interfaces are mined from the lower-cased
//! `name + " " + description` text with priority-ordered keyword lists. The
//! first keyword found wins; nothing found means "unknown", and unknown
//! attributes never produce a mismatch downstream.
//!
//! These are best-effort heuristics, not a hardware database. Their false
//! negatives (e.g. `LGA1700` without the space, `SO-DIMM` with a hyphen, an
//! `E-ATX` board resolving as `ATX`) are part of the contract and must be
//! kept as they are. Authoritative data can be layered in with
//! [`PartsTableExtractor`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::catalog::{Component, ComponentType};
use crate::core::BuildGuardError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Socket {
    #[serde(rename = "AM4")]
    Am4,
    #[serde(rename = "AM5")]
    Am5,
    #[serde(rename = "LGA 1700")]
    Lga1700,
}

impl Socket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Socket::Am4 => "AM4",
            Socket::Am5 => "AM5",
            Socket::Lga1700 => "LGA 1700",
        }
    }

    /// Whitespace-stripped, lower-cased form used when scanning cooler copy.
    pub fn compact(&self) -> String {
        self.as_str()
            .split_whitespace()
            .collect::<String>()
            .to_lowercase()
    }
}

impl fmt::Display for Socket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RamType {
    #[serde(rename = "DDR4")]
    Ddr4,
    #[serde(rename = "DDR5")]
    Ddr5,
}

impl fmt::Display for RamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RamType::Ddr4 => "DDR4",
            RamType::Ddr5 => "DDR5",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RamFormFactor {
    #[serde(rename = "DIMM")]
    Dimm,
    #[serde(rename = "SODIMM")]
    Sodimm,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormFactor {
    #[serde(rename = "Micro-ATX")]
    MicroAtx,
    #[serde(rename = "Mini-ITX")]
    MiniItx,
    #[serde(rename = "ATX")]
    Atx,
    #[serde(rename = "E-ATX")]
    EAtx,
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormFactor::MicroAtx => "Micro-ATX",
            FormFactor::MiniItx => "Mini-ITX",
            FormFactor::Atx => "ATX",
            FormFactor::EAtx => "E-ATX",
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StorageInterface {
    #[serde(rename = "SATA")]
    Sata,
    #[serde(rename = "M.2")]
    M2,
}

impl fmt::Display for StorageInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageInterface::Sata => "SATA",
            StorageInterface::M2 => "M.2",
        })
    }
}

const SOCKET_KEYWORDS: &[(&str, Socket)] = &[
    ("am4", Socket::Am4),
    ("am5", Socket::Am5),
    ("lga 1700", Socket::Lga1700),
];

const RAM_TYPE_KEYWORDS: &[(&str, RamType)] = &[("ddr4", RamType::Ddr4), ("ddr5", RamType::Ddr5)];

// "atx" precedes "e-atx", so E-ATX boards resolve as ATX.
const FORM_FACTOR_KEYWORDS: &[(&str, FormFactor)] = &[
    ("micro-atx", FormFactor::MicroAtx),
    ("micro atx", FormFactor::MicroAtx),
    ("mini-itx", FormFactor::MiniItx),
    ("atx", FormFactor::Atx),
    ("e-atx", FormFactor::EAtx),
];

static WATTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d{3,4})\s*w").unwrap());
/// A digit, any run of letters, then `f` ending the word (`12600kf`, `14400f`).
/// `f` in the middle of a token or after a space does not count.
static F_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[a-z]*f\b").unwrap());
/// Same shape with `g` (`5600g`, `8700g`); `5600gt` and `5600 g` do not match.
static G_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[a-z]*g\b").unwrap());

fn first_keyword<T: Copy>(text: &str, keywords: &[(&str, T)]) -> Option<T> {
    keywords
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, value)| *value)
}

pub fn cpu_socket(component: &Component) -> Option<Socket> {
    first_keyword(&component.search_text(), SOCKET_KEYWORDS)
}

pub fn ram_type(component: &Component) -> Option<RamType> {
    first_keyword(&component.search_text(), RAM_TYPE_KEYWORDS)
}

pub fn ram_form_factor(component: &Component) -> RamFormFactor {
    if component.search_text().contains("sodimm") {
        RamFormFactor::Sodimm
    } else {
        RamFormFactor::Dimm
    }
}

pub fn motherboard_form_factor(component: &Component) -> Option<FormFactor> {
    first_keyword(&component.search_text(), FORM_FACTOR_KEYWORDS)
}

pub fn storage_interface(component: &Component) -> Option<StorageInterface> {
    let text = component.search_text();
    if text.contains("m.2") || text.contains("nvme") {
        Some(StorageInterface::M2)
    } else if text.contains("sata") {
        Some(StorageInterface::Sata)
    } else {
        match component.component_type {
            ComponentType::Hdd | ComponentType::Ssd => Some(StorageInterface::Sata),
            _ => None,
        }
    }
}

/// Approximates whether a CPU ships with integrated graphics from its model
/// suffix: Intel "F" parts have none, Ryzen "G" parts have one, other Intel
/// desktop parts are assumed to, and other Ryzen parts only if the copy
/// advertises Radeon graphics.
pub fn has_integrated_graphics(cpu: &Component) -> bool {
    let text = cpu.search_text();
    let name = cpu.name.to_lowercase();
    let is_intel = text.contains("intel");
    let is_ryzen = text.contains("ryzen");

    if is_intel && F_SUFFIX_RE.is_match(&name) {
        return false;
    }
    if is_ryzen && G_SUFFIX_RE.is_match(&name) {
        return true;
    }
    if is_intel {
        return true;
    }
    is_ryzen && cpu.description.to_lowercase().contains("radeon graphics")
}

/// Advertised wattage parsed from a product name, e.g. `"Corsair 550W"` → 550.
pub fn wattage(name: &str) -> Option<u32> {
    WATTAGE_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Source of component attributes for the compatibility rules.
pub trait AttributeExtractor: Send + Sync {
    fn name(&self) -> &str;
    fn cpu_socket(&self, component: &Component) -> Option<Socket>;
    fn ram_type(&self, component: &Component) -> Option<RamType>;
    fn ram_form_factor(&self, component: &Component) -> RamFormFactor;
    fn motherboard_form_factor(&self, component: &Component) -> Option<FormFactor>;
    fn storage_interface(&self, component: &Component) -> Option<StorageInterface>;
    fn has_integrated_graphics(&self, cpu: &Component) -> bool;
    fn psu_wattage(&self, psu: &Component) -> Option<u32>;
}

/// The keyword heuristics above, as an extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordExtractor;

impl AttributeExtractor for KeywordExtractor {
    fn name(&self) -> &str {
        "keyword"
    }

    fn cpu_socket(&self, component: &Component) -> Option<Socket> {
        cpu_socket(component)
    }

    fn ram_type(&self, component: &Component) -> Option<RamType> {
        ram_type(component)
    }

    fn ram_form_factor(&self, component: &Component) -> RamFormFactor {
        ram_form_factor(component)
    }

    fn motherboard_form_factor(&self, component: &Component) -> Option<FormFactor> {
        motherboard_form_factor(component)
    }

    fn storage_interface(&self, component: &Component) -> Option<StorageInterface> {
        storage_interface(component)
    }

    fn has_integrated_graphics(&self, cpu: &Component) -> bool {
        has_integrated_graphics(cpu)
    }

    fn psu_wattage(&self, psu: &Component) -> Option<u32> {
        wattage(&psu.name)
    }
}

/// Authoritative attributes for one catalog entry. Every field is optional;
/// whatever is left out falls back to the keyword heuristics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PartAttributes {
    pub socket: Option<Socket>,
    pub ram_type: Option<RamType>,
    pub ram_form_factor: Option<RamFormFactor>,
    pub form_factor: Option<FormFactor>,
    pub storage_interface: Option<StorageInterface>,
    pub integrated_graphics: Option<bool>,
    pub wattage: Option<u32>,
}

/// Looks attributes up by component id in a parts table before falling back
/// to [`KeywordExtractor`].
#[derive(Debug, Clone, Default)]
pub struct PartsTableExtractor {
    parts: HashMap<String, PartAttributes>,
    fallback: KeywordExtractor,
}

impl PartsTableExtractor {
    pub fn new(parts: HashMap<String, PartAttributes>) -> Self {
        Self {
            parts,
            fallback: KeywordExtractor,
        }
    }

    /// Load a JSON object of component id → [`PartAttributes`].
    pub fn load(path: &Path) -> Result<Self, BuildGuardError> {
        let content = std::fs::read_to_string(path)?;
        let parts: HashMap<String, PartAttributes> = serde_json::from_str(&content)?;
        tracing::info!("Loaded parts table with {} entries from {}", parts.len(), path.display());
        Ok(Self::new(parts))
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn part(&self, component: &Component) -> Option<&PartAttributes> {
        self.parts.get(&component.id)
    }
}

impl AttributeExtractor for PartsTableExtractor {
    fn name(&self) -> &str {
        "parts_table"
    }

    fn cpu_socket(&self, component: &Component) -> Option<Socket> {
        self.part(component)
            .and_then(|p| p.socket)
            .or_else(|| self.fallback.cpu_socket(component))
    }

    fn ram_type(&self, component: &Component) -> Option<RamType> {
        self.part(component)
            .and_then(|p| p.ram_type)
            .or_else(|| self.fallback.ram_type(component))
    }

    fn ram_form_factor(&self, component: &Component) -> RamFormFactor {
        self.part(component)
            .and_then(|p| p.ram_form_factor)
            .unwrap_or_else(|| self.fallback.ram_form_factor(component))
    }

    fn motherboard_form_factor(&self, component: &Component) -> Option<FormFactor> {
        self.part(component)
            .and_then(|p| p.form_factor)
            .or_else(|| self.fallback.motherboard_form_factor(component))
    }

    fn storage_interface(&self, component: &Component) -> Option<StorageInterface> {
        self.part(component)
            .and_then(|p| p.storage_interface)
            .or_else(|| self.fallback.storage_interface(component))
    }

    fn has_integrated_graphics(&self, cpu: &Component) -> bool {
        self.part(cpu)
            .and_then(|p| p.integrated_graphics)
            .unwrap_or_else(|| self.fallback.has_integrated_graphics(cpu))
    }

    fn psu_wattage(&self, psu: &Component) -> Option<u32> {
        self.part(psu)
            .and_then(|p| p.wattage)
            .or_else(|| self.fallback.psu_wattage(psu))
    }
}
