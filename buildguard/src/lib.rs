//! BuildGuard - PC build compatibility engine
//!
//! This library checks a partially assembled PC build for cross-component
//! problems: CPU socket vs. motherboard, memory generation and form factor,
//! case fit, cooler adequacy, storage slot interfaces and power supply
//! headroom. It consumes plain product records and returns verdicts; it does
//! not fetch, store or render anything.
//!
//! # Quick Start
//!
//! ```
//! use buildguard::prelude::*;
//!
//! let cpu = Component::new("cpu-1", "AMD Ryzen 5 7600", ComponentType::Processor)
//!     .with_description("Socket AM5");
//! let board = Component::new("mb-1", "MSI B550 Tomahawk", ComponentType::Motherboard)
//!     .with_description("AM4, DDR4, ATX");
//!
//! let build = Build::new().with(SlotId::Cpu, cpu);
//! let engine = CompatibilityEngine::new();
//!
//! let verdict = engine.evaluate_candidate(&board, SlotId::Motherboard, &build);
//! assert!(!verdict.compatible);
//! assert_eq!(verdict.reasons, vec!["Socket Mismatch: Requires AM5"]);
//!
//! let status = engine.evaluate_build(&build);
//! assert_eq!(status.status, BuildState::Issues);
//! ```
//!
//! # Features
//!
//! - **Per-candidate checks**: annotate or filter a slot's selection list
//! - **Whole-build status**: empty / compatible / issues, with reasons
//! - **Pluggable attributes**: keyword heuristics or a parts table
//! - **Saved builds**: injectable store for the last saved build

pub mod analyzer;
pub mod build;
pub mod catalog;
pub mod core;

// Re-export main types
pub use crate::core::{
    load_build, parse_build, BuildGuardCore, BuildGuardError, EngineConfig, ExtractorConfig,
};
pub use analyzer::rules::{
    BuildReport, BuildState, BuildStatus, CompatibilityEngine, CompatibilityVerdict, Issue,
    IssueStats, Severity,
};
pub use build::{Build, BuildStore, Slot, SlotId, SLOTS};
pub use catalog::{Catalog, Component, ComponentType};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Build, BuildGuardError, BuildState, BuildStatus, Catalog, CompatibilityEngine,
        CompatibilityVerdict, Component, ComponentType, EngineConfig, Issue, Severity, SlotId,
    };
}
