// crates/excuse-core/src/core/mod.rs
// ============================================================================
// Module: Excuse Core Types
// Description: Excuse record, verdicts, dependency kinds, and hints.
// Purpose: Provide the typed model mutated by analysis stages.
// Dependencies: regex, serde, serde_json
// ============================================================================

//! ## Overview
//! Core types model one excuse per candidate item together with the closed
//! enumerations consumed from the policy and dependency collaborators.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod dependency;
pub mod excuse;
pub mod hint;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use dependency::DependencyKind;
pub use excuse::ABSENT_VERSION;
pub use excuse::BreakDependency;
pub use excuse::DependencyMap;
pub use excuse::Excuse;
pub use excuse::ExcuseAge;
pub use excuse::VersionPair;
pub use hint::Hint;
pub use hint::HintKind;
pub use verdict::PolicyVerdict;
pub use verdict::VERDICT_DESCRIPTIONS;
pub use verdict::VerdictClass;
pub use verdict::describe_verdict;
pub use verdict::missing_description;
