// crates/excuse-core/src/core/dependency.rs
// ============================================================================
// Module: Excuse Dependency Kinds
// Description: Closed set of relation kinds recorded between excuse items.
// Purpose: Avoid stringly-typed kind comparisons in dependency bookkeeping.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Dependency kinds are supplied by the dependency-resolution engine. Only
//! [`DependencyKind::Depends`] edges feed downstream migration ordering; the
//! remaining kinds are reported for information.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Dependency Kind
// ============================================================================

/// Relation kind between an excuse item and an item it depends on.
///
/// # Invariants
/// - Display forms are stable; the HTML renderer sorts on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Runtime dependency.
    Depends,
    /// Dependency implied by another relation (for example a versioned break).
    ImplicitDependency,
    /// Architecture-dependent build dependency.
    BuildDepends,
    /// Architecture-independent build dependency.
    BuildDependsIndep,
    /// Source embedded at build time.
    BuiltUsing,
}

impl DependencyKind {
    /// Returns the human-readable display form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Depends => "Depends",
            Self::ImplicitDependency => "Implied dependency",
            Self::BuildDepends => "Build-Depends(-Arch)",
            Self::BuildDependsIndep => "Build-Depends-Indep",
            Self::BuiltUsing => "Built-Using",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
