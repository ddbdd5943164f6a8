use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::analyzer::attributes::{
    AttributeExtractor, FormFactor, KeywordExtractor, RamFormFactor, Socket, StorageInterface,
};
use crate::build::{Build, SlotId};
use crate::catalog::{Component, ComponentType};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The parts cannot work together.
    Error,
    /// Likely to cause trouble (weak cooler, undersized PSU).
    Warning,
    /// The build is incomplete.
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotId>,
}

impl Issue {
    fn new(rule_id: &str, severity: Severity, slot: Option<SlotId>, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.into(),
            slot,
        }
    }
}

/// Outcome of checking one candidate against the current build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompatibilityVerdict {
    pub compatible: bool,
    pub reasons: Vec<String>,
}

impl From<&[Issue]> for CompatibilityVerdict {
    fn from(issues: &[Issue]) -> Self {
        Self {
            compatible: issues.is_empty(),
            reasons: issues.iter().map(|i| i.message.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildState {
    Empty,
    Compatible,
    Issues,
}

pub const EMPTY_BUILD_MESSAGE: &str = "Start by adding components to your build.";
pub const ISSUES_MESSAGE: &str = "Potential Compatibility Issues Found or Incomplete Build";
pub const COMPATIBLE_MESSAGE: &str = "Your build looks good!";

/// Aggregate status of a whole build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildStatus {
    pub status: BuildState,
    pub message: String,
    pub issues: Vec<String>,
}

impl BuildStatus {
    fn from_issues(selected: usize, issues: &[Issue]) -> Self {
        if selected == 0 {
            return Self {
                status: BuildState::Empty,
                message: EMPTY_BUILD_MESSAGE.to_string(),
                issues: Vec::new(),
            };
        }
        let (status, message) = if issues.is_empty() {
            (BuildState::Compatible, COMPATIBLE_MESSAGE)
        } else {
            (BuildState::Issues, ISSUES_MESSAGE)
        };
        Self {
            status,
            message: message.to_string(),
            issues: issues.iter().map(|i| i.message.clone()).collect(),
        }
    }

    pub fn has_issues(&self) -> bool {
        self.status == BuildState::Issues
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueStats {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl IssueStats {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut stats = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => stats.errors += 1,
                Severity::Warning => stats.warnings += 1,
                Severity::Info => stats.info += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.info
    }
}

/// Whole-build evaluation with per-issue detail, as shown by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildReport {
    pub status: BuildStatus,
    pub details: Vec<Issue>,
    pub stats: IssueStats,
    pub total_price: f64,
}

// Placeholder draw figures; not derived from component specs.
const BASELINE_WATTS: u32 = 100;
const CPU_WATTS: u32 = 65;
const GPU_WATTS: u32 = 150;
/// Per-candidate sanity floor for power supplies.
const MIN_PSU_WATTS: u32 = 300;

const WEAK_COOLER_TERMS: [&str; 2] = ["wraith stealth", "stock cooler"];

/// Stateless rules evaluator. Every call re-reads the build it is handed.
#[derive(Clone)]
pub struct CompatibilityEngine {
    extractor: Arc<dyn AttributeExtractor>,
}

impl CompatibilityEngine {
    pub fn new() -> Self {
        Self::with_extractor(Arc::new(KeywordExtractor))
    }

    pub fn with_extractor(extractor: Arc<dyn AttributeExtractor>) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &dyn AttributeExtractor {
        self.extractor.as_ref()
    }

    /// Check `candidate` for placement in `slot` given the rest of `build`.
    pub fn evaluate_candidate(
        &self,
        candidate: &Component,
        slot: SlotId,
        build: &Build,
    ) -> CompatibilityVerdict {
        let issues = self.check_candidate(candidate, slot, build);
        tracing::debug!(
            "Candidate {} for slot {}: {} reason(s)",
            candidate.id,
            slot,
            issues.len()
        );
        CompatibilityVerdict::from(issues.as_slice())
    }

    /// Same checks as [`evaluate_candidate`](Self::evaluate_candidate), keeping
    /// rule ids and severities.
    pub fn check_candidate(&self, candidate: &Component, slot: SlotId, build: &Build) -> Vec<Issue> {
        let ex = self.extractor();
        let slot_type = slot.component_type();
        let mut issues = Vec::new();

        if slot != SlotId::Ram && build.contains_id_elsewhere(&candidate.id, slot) {
            issues.push(Issue::new(
                "duplicate_item",
                Severity::Error,
                Some(slot),
                "This item is already in your build.",
            ));
        }

        match slot_type {
            ComponentType::Motherboard => {
                if let Some(cpu) = build.cpu() {
                    if let Some((cpu_socket, _)) =
                        socket_mismatch(ex.cpu_socket(cpu), ex.cpu_socket(candidate))
                    {
                        issues.push(Issue::new(
                            "cpu_socket",
                            Severity::Error,
                            Some(slot),
                            format!("Socket Mismatch: Requires {}", cpu_socket),
                        ));
                    }
                }
            }
            ComponentType::Processor => {
                if let Some(board) = build.motherboard() {
                    if let Some((board_socket, _)) =
                        socket_mismatch(ex.cpu_socket(board), ex.cpu_socket(candidate))
                    {
                        issues.push(Issue::new(
                            "cpu_socket",
                            Severity::Error,
                            Some(slot),
                            format!("Socket Mismatch: Requires {}", board_socket),
                        ));
                    }
                }
            }
            ComponentType::Memory => {
                if let Some(board) = build.motherboard() {
                    if let (Some(board_ram), Some(ram)) = (ex.ram_type(board), ex.ram_type(candidate)) {
                        if board_ram != ram {
                            issues.push(Issue::new(
                                "ram_type",
                                Severity::Error,
                                Some(slot),
                                format!("RAM Type Mismatch: Motherboard requires {}", board_ram),
                            ));
                        }
                    }
                }
                if ex.ram_form_factor(candidate) == RamFormFactor::Sodimm {
                    issues.push(sodimm_issue(slot));
                }
            }
            ComponentType::PcCase => {
                if let Some(board) = build.motherboard() {
                    let form_factor = ex.motherboard_form_factor(board);
                    // Mini-ITX and E-ATX boards are accepted here without a check.
                    if let Some(ff @ (FormFactor::MicroAtx | FormFactor::Atx)) = form_factor {
                        if !case_fits(ff, &candidate.description) {
                            issues.push(Issue::new(
                                "case_form_factor",
                                Severity::Error,
                                Some(slot),
                                format!("Form Factor Mismatch: Case may not fit the {} motherboard", ff),
                            ));
                        }
                    }
                }
            }
            ComponentType::CpuCooling => {
                if let Some(cpu) = build.cpu() {
                    issues.extend(self.cooler_issues(cpu, candidate));
                }
            }
            ComponentType::Ssd => {
                if let Some(expected) = slot.sub_type() {
                    let actual = ex.storage_interface(candidate);
                    if actual != Some(expected) {
                        issues.push(Issue::new(
                            "storage_interface",
                            Severity::Error,
                            Some(slot),
                            format!(
                                "Storage Mismatch: {} slot requires {}, but this drive is {}",
                                slot.slot().name,
                                expected,
                                interface_label(actual)
                            ),
                        ));
                    }
                }
            }
            ComponentType::Hdd => {
                let is_hdd = candidate.component_type == ComponentType::Hdd;
                if !is_hdd || ex.storage_interface(candidate) != Some(StorageInterface::Sata) {
                    issues.push(Issue::new(
                        "storage_interface",
                        Severity::Error,
                        Some(slot),
                        "Storage Mismatch: Hard Drive slot requires a SATA HDD",
                    ));
                }
            }
            ComponentType::PowerSupply => {
                if let Some(watts) = ex.psu_wattage(candidate) {
                    if watts < MIN_PSU_WATTS {
                        issues.push(Issue::new(
                            "psu_wattage",
                            Severity::Warning,
                            Some(slot),
                            format!(
                                "Power Supply ({}W) may be undersized for a desktop build (minimum {}W)",
                                watts, MIN_PSU_WATTS
                            ),
                        ));
                    }
                }
            }
            ComponentType::GraphicsCard => {}
        }

        issues
    }

    /// Evaluate the whole build for consistency and completeness.
    pub fn evaluate_build(&self, build: &Build) -> BuildStatus {
        let issues = self.check_build(build);
        BuildStatus::from_issues(build.selected_count(), &issues)
    }

    pub fn report(&self, build: &Build) -> BuildReport {
        let details = if build.is_empty() {
            Vec::new()
        } else {
            self.check_build(build)
        };
        BuildReport {
            status: BuildStatus::from_issues(build.selected_count(), &details),
            stats: IssueStats::from_issues(&details),
            total_price: build.total_price(),
            details,
        }
    }

    /// All whole-build issues, in evaluation order.
    pub fn check_build(&self, build: &Build) -> Vec<Issue> {
        let ex = self.extractor();
        let mut issues = Vec::new();

        let cpu = build.cpu();
        let board = build.motherboard();
        let ram = build.ram();
        let case = build.pccase();
        let psu = build.psu();
        let cooler = build.cooler();
        let gpu = build.gpu();

        let missing = |slot: SlotId, message: &str| {
            Issue::new("missing_component", Severity::Info, Some(slot), message)
        };

        if board.is_some() && cpu.is_none() {
            issues.push(missing(SlotId::Cpu, "A Processor is needed for the Motherboard."));
        }
        if cpu.is_some() && board.is_none() {
            issues.push(missing(SlotId::Motherboard, "A Motherboard is needed for the Processor."));
        }
        if board.is_some() {
            if ram.is_none() {
                issues.push(missing(SlotId::Ram, "Memory (RAM) is needed for the Motherboard."));
            }
            if case.is_none() {
                issues.push(missing(SlotId::PcCase, "A PC Case is needed for the Motherboard."));
            }
            if psu.is_none() {
                issues.push(missing(SlotId::Psu, "A Power Supply is needed for the Motherboard."));
            }
        }

        if let (Some(cpu), Some(board)) = (cpu, board) {
            if let Some((cpu_socket, board_socket)) =
                socket_mismatch(ex.cpu_socket(cpu), ex.cpu_socket(board))
            {
                issues.push(Issue::new(
                    "cpu_socket",
                    Severity::Error,
                    Some(SlotId::Motherboard),
                    format!(
                        "Socket Mismatch: Processor is {} but Motherboard requires {}",
                        cpu_socket, board_socket
                    ),
                ));
            }
            if ex.ram_type(board).is_none() {
                issues.push(Issue::new(
                    "motherboard_ram_type",
                    Severity::Warning,
                    Some(SlotId::Motherboard),
                    "Motherboard RAM type could not be determined.",
                ));
            }
        }

        match (ram, board) {
            (Some(ram), Some(board)) => {
                if let (Some(board_ram), Some(ram_type)) = (ex.ram_type(board), ex.ram_type(ram)) {
                    if board_ram != ram_type {
                        issues.push(Issue::new(
                            "ram_type",
                            Severity::Error,
                            Some(SlotId::Ram),
                            format!(
                                "RAM Type Mismatch: Memory is {} but Motherboard requires {}",
                                ram_type, board_ram
                            ),
                        ));
                    }
                }
                if ex.ram_form_factor(ram) == RamFormFactor::Sodimm {
                    issues.push(sodimm_issue(SlotId::Ram));
                }
            }
            (Some(_), None) => issues.push(missing(
                SlotId::Motherboard,
                "Memory (RAM) needs a Motherboard to be compatible with.",
            )),
            _ => {}
        }

        match (case, board) {
            (Some(case), Some(board)) => {
                if let Some(ff) = ex.motherboard_form_factor(board) {
                    if !case_fits(ff, &case.description) {
                        issues.push(Issue::new(
                            "case_form_factor",
                            Severity::Error,
                            Some(SlotId::PcCase),
                            format!("Form Factor Mismatch: PC Case may not fit the {} Motherboard", ff),
                        ));
                    }
                }
            }
            (Some(_), None) => issues.push(missing(
                SlotId::Motherboard,
                "PC Case needs a Motherboard to check fit.",
            )),
            _ => {}
        }

        match (cooler, cpu) {
            (Some(cooler), Some(cpu)) => issues.extend(self.cooler_issues(cpu, cooler)),
            (Some(_), None) => issues.push(missing(
                SlotId::Cpu,
                "CPU Cooler needs a Processor to be compatible with.",
            )),
            _ => {}
        }

        let sata_ssd_ok = build
            .ssd_sata()
            .map(|c| ex.storage_interface(c) == Some(StorageInterface::Sata))
            .unwrap_or(false);
        let m2_ssd_ok = build
            .ssd_m2()
            .map(|c| ex.storage_interface(c) == Some(StorageInterface::M2))
            .unwrap_or(false);
        if cpu.is_some() && board.is_some() && !sata_ssd_ok && !m2_ssd_ok {
            issues.push(Issue::new(
                "bootable_storage",
                Severity::Info,
                None,
                "At least one bootable storage device (SATA SSD or M.2 SSD) is expected.",
            ));
        }

        for (slot, expected) in [
            (SlotId::SsdSata, StorageInterface::Sata),
            (SlotId::SsdM2, StorageInterface::M2),
            (SlotId::Hdd, StorageInterface::Sata),
        ] {
            if let Some(drive) = build.get(slot) {
                let actual = ex.storage_interface(drive);
                if actual != Some(expected) {
                    issues.push(Issue::new(
                        "storage_interface",
                        Severity::Error,
                        Some(slot),
                        format!(
                            "{} slot expects a {} drive, found {}",
                            slot.slot().name,
                            expected,
                            interface_label(actual)
                        ),
                    ));
                }
            }
        }
        if let Some(hdd) = build.hdd() {
            if hdd.component_type != ComponentType::Hdd {
                issues.push(Issue::new(
                    "storage_interface",
                    Severity::Error,
                    Some(SlotId::Hdd),
                    format!("Hard Drive (HDD) slot holds a {}, not an HDD", hdd.component_type),
                ));
            }
        }

        let cpu_igpu = cpu.map(|c| ex.has_integrated_graphics(c)).unwrap_or(false);
        if cpu.is_some() && gpu.is_none() && !cpu_igpu {
            issues.push(Issue::new(
                "display_output",
                Severity::Error,
                Some(SlotId::Gpu),
                "A Graphics Card is required for display output: this Processor has no integrated graphics.",
            ));
        }

        if let Some(psu) = psu {
            if cpu.is_some() && (gpu.is_some() || cpu_igpu) {
                let estimate = estimated_draw(cpu.is_some(), gpu.is_some());
                if let Some(watts) = ex.psu_wattage(psu) {
                    // watts < estimate * 1.2, widened so table wattages cannot overflow
                    if u64::from(watts) * 5 < u64::from(estimate) * 6 {
                        issues.push(Issue::new(
                            "psu_wattage",
                            Severity::Warning,
                            Some(SlotId::Psu),
                            format!(
                                "Power Supply ({}W) may be undersized. Estimated need: {}W.",
                                watts,
                                (estimate * 6).div_ceil(5)
                            ),
                        ));
                    }
                }
            }
        } else if cpu.is_some() || board.is_some() {
            issues.push(missing(SlotId::Psu, "A Power Supply is required."));
        }

        tracing::debug!(
            "Evaluated build with {} selected slot(s): {} issue(s)",
            build.selected_count(),
            issues.len()
        );
        issues
    }

    fn cooler_issues(&self, cpu: &Component, cooler: &Component) -> Vec<Issue> {
        let ex = self.extractor();
        let mut issues = Vec::new();
        let socket = ex.cpu_socket(cpu);
        let cooler_text = cooler.description.to_lowercase();
        let weak_cooler = WEAK_COOLER_TERMS.iter().any(|t| cooler_text.contains(t));

        if socket == Some(Socket::Am5) && weak_cooler {
            issues.push(Issue::new(
                "cpu_cooler",
                Severity::Warning,
                Some(SlotId::Cooler),
                "Cooler may be insufficient for an AM5 processor",
            ));
        }
        if socket == Some(Socket::Am4) && cpu.search_text().contains("ryzen 7") && weak_cooler {
            issues.push(Issue::new(
                "cpu_cooler",
                Severity::Warning,
                Some(SlotId::Cooler),
                "Cooler may be insufficient for a Ryzen 7 processor",
            ));
        }
        if let Some(socket) = socket {
            if !cooler_text.contains(&socket.compact())
                && !cooler_text.contains("lga")
                && !cooler_text.contains("amd")
            {
                issues.push(Issue::new(
                    "cpu_cooler",
                    Severity::Warning,
                    Some(SlotId::Cooler),
                    format!("Cooler may not support the {} socket", socket),
                ));
            }
        }
        issues
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CompatibilityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompatibilityEngine")
            .field("extractor", &self.extractor.name())
            .finish()
    }
}

/// Both sides must resolve for a mismatch; unknown never conflicts.
fn socket_mismatch(a: Option<Socket>, b: Option<Socket>) -> Option<(Socket, Socket)> {
    match (a, b) {
        (Some(a), Some(b)) if a != b => Some((a, b)),
        _ => None,
    }
}

fn sodimm_issue(slot: SlotId) -> Issue {
    Issue::new(
        "ram_form_factor",
        Severity::Error,
        Some(slot),
        "SODIMM RAM is for laptops, not desktops",
    )
}

fn case_fits(form_factor: FormFactor, case_description: &str) -> bool {
    let text = case_description.to_lowercase();
    match form_factor {
        FormFactor::MiniItx => text.contains("itx") || text.contains("atx"),
        FormFactor::MicroAtx => {
            text.contains("micro atx") || text.contains("m-atx") || text.contains("atx")
        }
        FormFactor::Atx => text.contains("atx"),
        FormFactor::EAtx => true,
    }
}

fn estimated_draw(has_cpu: bool, has_gpu: bool) -> u32 {
    let mut watts = BASELINE_WATTS;
    if has_cpu {
        watts += CPU_WATTS;
    }
    if has_gpu {
        watts += GPU_WATTS;
    }
    watts
}

fn interface_label(interface: Option<StorageInterface>) -> String {
    interface
        .map(|i| i.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
