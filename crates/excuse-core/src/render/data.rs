// crates/excuse-core/src/render/data.rs
// ============================================================================
// Module: Excuse Structured Document
// Description: Machine-consumable key/value rendering of an excuse.
// Purpose: Provide the published excuse document with stable field names.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ExcuseData`] is the published, field-for-field stable document form of
//! an excuse. Optional fields are omitted from serialization when empty so
//! consumers can rely on key presence as a signal.
//!
//! Invariants:
//! - `reason` is always present; it is empty when the excuse was forced and
//!   the reasons moved to `forced-reason`.
//! - Every list is sorted except `excuses` and `hints`, which keep insertion order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::Excuse;
use crate::core::Hint;
use crate::core::PolicyVerdict;

// ============================================================================
// SECTION: Document Types
// ============================================================================

/// Structured excuse document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExcuseData {
    /// HTML notes in insertion order.
    pub excuses: Vec<String>,
    /// Item name.
    pub item_name: String,
    /// Source name derived from the item name.
    pub source: String,
    /// Verdict by symbolic name.
    pub migration_policy_verdict: PolicyVerdict,
    /// Old version or the absent sentinel.
    pub old_version: String,
    /// New version or the absent sentinel.
    pub new_version: String,
    /// Maintainer, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
    /// Archive component, when the section is `component/section`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Policy diagnostics passed through verbatim.
    #[serde(rename = "policy_info", default, skip_serializing_if = "Option::is_none")]
    pub policy_info: Option<BTreeMap<String, Value>>,
    /// Missing builds, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_builds: Option<MissingBuilds>,
    /// Set when another package invalidated a dependency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalidated_by_other_package: Option<bool>,
    /// Dependency summary, when any dependency data exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyData>,
    /// Manual approval status, when approval is required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_approval_status: Option<ApprovalStatus>,
    /// Applied hints in insertion order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<HintData>>,
    /// Cruft binaries per source version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_binaries: Option<BTreeMap<String, Vec<String>>>,
    /// Reasons overridden by a force hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_reason: Option<Vec<String>>,
    /// Reasons for the verdict.
    pub reason: Vec<String>,
    /// Whether the item is a migration candidate.
    pub is_candidate: bool,
}

/// Missing build architectures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MissingBuilds {
    /// Architectures missing a build.
    pub on_architectures: Vec<String>,
    /// Out-of-date architectures missing a build.
    pub on_unimportant_architectures: Vec<String>,
}

/// Dependency summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyData {
    /// Invalidated dependencies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<Vec<String>>,
    /// Valid dependencies that must migrate first.
    pub migrate_after: Vec<String>,
    /// Break-type relations not otherwise reported.
    pub unimportant_dependencies: Vec<String>,
    /// Unsatisfiable dependency signatures per architecture.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsatisfiable_dependencies: Option<BTreeMap<String, Vec<String>>>,
}

/// Manual approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApprovalStatus {
    /// An unblock hint is present.
    Approved,
    /// No unblock hint is present.
    NotApproved,
}

/// Hint entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HintData {
    /// Hint kind tag.
    pub hint_type: String,
    /// User who issued the hint.
    pub hint_from: String,
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Derives the source name from an item name.
///
/// Strips the first `_` suffix, then the first `/` suffix, then one leading `-`.
#[must_use]
pub fn derive_source(name: &str) -> &str {
    let source = name.split('_').next().unwrap_or(name);
    let source = source.split('/').next().unwrap_or(source);
    source.strip_prefix('-').unwrap_or(source)
}

/// Renders the excuse as a structured document.
#[must_use]
pub fn render_data(excuse: &Excuse) -> ExcuseData {
    let reasons: Vec<String> = excuse.reasons().iter().cloned().collect();
    let (forced_reason, reason) =
        if excuse.is_forced() { (Some(reasons), Vec::new()) } else { (None, reasons) };

    ExcuseData {
        excuses: excuse.html_notes().to_vec(),
        item_name: excuse.name().to_string(),
        source: derive_source(excuse.name()).to_string(),
        migration_policy_verdict: excuse.verdict(),
        old_version: excuse.versions().old_or_absent().to_string(),
        new_version: excuse.versions().new_or_absent().to_string(),
        maintainer: excuse.maintainer().filter(|value| !value.is_empty()).map(str::to_string),
        component: excuse.component().map(str::to_string),
        policy_info: non_empty(excuse.policy_info().clone()),
        missing_builds: missing_builds(excuse),
        invalidated_by_other_package: (!excuse.invalid_deps().is_empty()).then_some(true),
        dependencies: dependency_data(excuse),
        manual_approval_status: approval_status(excuse),
        hints: hint_data(excuse),
        old_binaries: old_binaries(excuse),
        forced_reason,
        reason,
        is_candidate: excuse.is_acceptable(),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns `None` for an empty map.
fn non_empty<V>(map: BTreeMap<String, V>) -> Option<BTreeMap<String, V>> {
    (!map.is_empty()).then_some(map)
}

/// Builds the missing-builds section.
fn missing_builds(excuse: &Excuse) -> Option<MissingBuilds> {
    let on_architectures = excuse.missing_builds();
    let on_unimportant = excuse.missing_builds_out_of_date_arch();
    if on_architectures.is_empty() && on_unimportant.is_empty() {
        return None;
    }
    Some(MissingBuilds {
        on_architectures: on_architectures.iter().cloned().collect(),
        on_unimportant_architectures: on_unimportant.iter().cloned().collect(),
    })
}

/// Builds the dependency section.
fn dependency_data(excuse: &Excuse) -> Option<DependencyData> {
    let all_deps = excuse.all_deps();
    let invalid = excuse.invalid_deps();
    if all_deps.is_empty()
        && invalid.is_empty()
        && excuse.break_deps().is_empty()
        && excuse.unsat_deps().is_empty()
    {
        return None;
    }
    let migrate_after: Vec<String> =
        all_deps.keys().filter(|name| !invalid.contains(*name)).cloned().collect();
    let mut unimportant_dependencies: Vec<String> = excuse
        .break_deps()
        .iter()
        .filter(|dep| !all_deps.contains_key(&dep.name))
        .map(|dep| dep.name.clone())
        .collect();
    unimportant_dependencies.sort();
    let unsatisfiable: BTreeMap<String, Vec<String>> = excuse
        .unsat_deps()
        .iter()
        .map(|(arch, signatures)| (arch.clone(), signatures.iter().cloned().collect()))
        .collect();

    let blocked_by: Vec<String> = invalid.iter().cloned().collect();

    Some(DependencyData {
        blocked_by: (!blocked_by.is_empty()).then_some(blocked_by),
        migrate_after,
        unimportant_dependencies,
        unsatisfiable_dependencies: non_empty(unsatisfiable),
    })
}

/// Builds the manual approval status.
fn approval_status(excuse: &Excuse) -> Option<ApprovalStatus> {
    if !excuse.needs_approval() {
        return None;
    }
    if excuse.hints().iter().any(Hint::is_unblock) {
        Some(ApprovalStatus::Approved)
    } else {
        Some(ApprovalStatus::NotApproved)
    }
}

/// Builds the cruft binary map.
fn old_binaries(excuse: &Excuse) -> Option<BTreeMap<String, Vec<String>>> {
    let binaries: BTreeMap<String, Vec<String>> = excuse
        .old_binaries()
        .iter()
        .map(|(version, names)| (version.clone(), names.iter().cloned().collect()))
        .collect();
    non_empty(binaries)
}

/// Builds the hint list.
fn hint_data(excuse: &Excuse) -> Option<Vec<HintData>> {
    let hints = excuse.hints();
    if hints.is_empty() {
        return None;
    }
    Some(
        hints
            .iter()
            .map(|hint| HintData {
                hint_type: hint.kind.to_string(),
                hint_from: hint.user.clone(),
            })
            .collect(),
    )
}
