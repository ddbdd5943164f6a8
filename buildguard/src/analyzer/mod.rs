//! Compatibility analysis: attribute extraction, rules, and candidate lists.

pub mod attributes;
pub mod candidates;
pub mod rules;

pub use attributes::{AttributeExtractor, KeywordExtractor, PartsTableExtractor};
pub use candidates::Candidate;
pub use rules::{
    BuildReport, BuildState, BuildStatus, CompatibilityEngine, CompatibilityVerdict, Issue,
    IssueStats, Severity,
};
