// crates/excuse-core/src/core/excuse.rs
// ============================================================================
// Module: Excuse Record
// Description: Mutable aggregation of migration evidence for one candidate item.
// Purpose: Own verdict-override policy and dependency bookkeeping.
// Dependencies: crate::core::{dependency, hint, verdict}, regex, serde_json
// ============================================================================

//! ## Overview
//! An [`Excuse`] is created once per candidate item and mutated by upstream
//! analysis stages as they discover dependencies, bugs, policy verdicts and
//! hints. Mutators absorb duplicates instead of rejecting them. Verdict writes
//! go through [`Excuse::set_verdict`] so a forced item never presents as
//! rejected, not even transiently.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::core::dependency::DependencyKind;
use crate::core::hint::Hint;
use crate::core::verdict::PolicyVerdict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Rendered form of a version that is absent on one side of the pair.
pub const ABSENT_VERSION: &str = "-";

/// Email annotations stripped from maintainer strings.
static EMAIL_ANNOTATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r" *<.*?>").ok());

// ============================================================================
// SECTION: Value Types
// ============================================================================

/// Old and new versions of an item; `None` marks an absent side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPair {
    /// Version currently in the target channel.
    pub old: Option<String>,
    /// Candidate version from the source channel.
    pub new: Option<String>,
}

impl VersionPair {
    /// Returns the old version or the absent sentinel.
    #[must_use]
    pub fn old_or_absent(&self) -> &str {
        self.old.as_deref().unwrap_or(ABSENT_VERSION)
    }

    /// Returns the new version or the absent sentinel.
    #[must_use]
    pub fn new_or_absent(&self) -> &str {
        self.new.as_deref().unwrap_or(ABSENT_VERSION)
    }
}

/// Age of the candidate and the minimum age it must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcuseAge {
    /// Days elapsed since the candidate entered the source channel.
    pub days_old: u32,
    /// Minimum days required before migration.
    pub min_days: u32,
}

impl ExcuseAge {
    /// Returns true when the candidate is younger than required.
    #[must_use]
    pub const fn is_too_young(self) -> bool {
        self.days_old < self.min_days
    }
}

/// Conflicting relation not captured as a regular dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BreakDependency {
    /// Item the relation points at.
    pub name: String,
    /// Architecture the relation was observed on.
    pub arch: String,
}

/// Dependency edges keyed by depended-on item, then by relation kind.
pub type DependencyMap = BTreeMap<String, BTreeMap<DependencyKind, Vec<String>>>;

// ============================================================================
// SECTION: Excuse
// ============================================================================

/// Accumulated rationale for promoting one candidate item.
///
/// # Invariants
/// - A forced excuse never holds a rejected verdict.
/// - Every kind entry in the dependency map holds at least one architecture.
/// - `dependency_order` lists each dependency map key once, in first-seen order.
/// - `sane_deps`, `break_deps` and `unsatisfiable_on_archs` are duplicate-free
///   and keep first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excuse {
    /// Item name (`source`, `source/arch`, `-source`, ...).
    name: String,
    /// Old/new version pair.
    versions: VersionPair,
    /// Maintainer with email annotations removed.
    maintainer: Option<String>,
    /// Candidate age, unset until provided.
    age: Option<ExcuseAge>,
    /// Archive section, possibly `component/section`.
    section: Option<String>,
    /// Current migration verdict.
    verdict: PolicyVerdict,
    /// Whether a force hint has been applied.
    forced: bool,
    /// Whether manual approval is required.
    needs_approval: bool,
    /// Applied hints in insertion order.
    hints: Vec<Hint>,
    /// Dependency edges with the architectures they were seen on.
    all_deps: DependencyMap,
    /// Dependency map keys in first-seen order.
    dependency_order: Vec<String>,
    /// Dependencies considered unproblematic.
    sane_deps: Vec<String>,
    /// Break-type relations.
    break_deps: Vec<BreakDependency>,
    /// Dependencies invalidated because the target cannot migrate.
    invalid_deps: BTreeSet<String>,
    /// Architectures with at least one unsatisfiable dependency.
    unsatisfiable_on_archs: Vec<String>,
    /// Unsatisfiable dependency signatures per architecture.
    unsat_deps: BTreeMap<String, BTreeSet<String>>,
    /// Bugs affecting the old version.
    old_bugs: BTreeSet<String>,
    /// Bugs affecting the new version.
    new_bugs: BTreeSet<String>,
    /// Reason tags.
    reasons: BTreeSet<String>,
    /// HTML-safe annotation lines.
    html_notes: Vec<String>,
    /// Architectures missing a build.
    missing_builds: BTreeSet<String>,
    /// Out-of-date architectures missing a build.
    missing_builds_out_of_date_arch: BTreeSet<String>,
    /// Cruft binaries keyed by the source version that built them.
    old_binaries: BTreeMap<String, BTreeSet<String>>,
    /// Opaque diagnostics keyed by policy name.
    policy_info: BTreeMap<String, Value>,
    /// Bounties keyed by policy name.
    bounty: BTreeMap<String, i64>,
    /// Penalties keyed by policy name.
    penalty: BTreeMap<String, i64>,
}

impl Excuse {
    /// Creates an excuse with default state for the named item.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: VersionPair::default(),
            maintainer: None,
            age: None,
            section: None,
            verdict: PolicyVerdict::RejectedPermanently,
            forced: false,
            needs_approval: false,
            hints: Vec::new(),
            all_deps: BTreeMap::new(),
            dependency_order: Vec::new(),
            sane_deps: Vec::new(),
            break_deps: Vec::new(),
            invalid_deps: BTreeSet::new(),
            unsatisfiable_on_archs: Vec::new(),
            unsat_deps: BTreeMap::new(),
            old_bugs: BTreeSet::new(),
            new_bugs: BTreeSet::new(),
            reasons: BTreeSet::new(),
            html_notes: Vec::new(),
            missing_builds: BTreeSet::new(),
            missing_builds_out_of_date_arch: BTreeSet::new(),
            old_binaries: BTreeMap::new(),
            policy_info: BTreeMap::new(),
            bounty: BTreeMap::new(),
            penalty: BTreeMap::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Identity and metadata
    // ------------------------------------------------------------------------

    /// Merges a version update; absent or empty sides are left unchanged.
    pub fn set_versions(&mut self, old: Option<&str>, new: Option<&str>) {
        if let Some(old) = old.filter(|value| !value.is_empty()) {
            self.versions.old = Some(old.to_string());
        }
        if let Some(new) = new.filter(|value| !value.is_empty()) {
            self.versions.new = Some(new.to_string());
        }
    }

    /// Stores the maintainer with email annotations removed.
    pub fn set_maintainer(&mut self, raw: &str) {
        let stripped = EMAIL_ANNOTATION
            .as_ref()
            .map_or_else(|| raw.to_string(), |re| re.replace_all(raw, "").into_owned());
        self.maintainer = Some(stripped);
    }

    /// Stores the archive section.
    pub fn set_section(&mut self, section: impl Into<String>) {
        self.section = Some(section.into());
    }

    /// Records the candidate age and the minimum required age.
    pub const fn set_age(&mut self, days_old: u32, min_days: u32) {
        self.age = Some(ExcuseAge {
            days_old,
            min_days,
        });
    }

    /// Sets whether manual approval is required.
    pub const fn set_needs_approval(&mut self, needs_approval: bool) {
        self.needs_approval = needs_approval;
    }

    // ------------------------------------------------------------------------
    // Verdict
    // ------------------------------------------------------------------------

    /// Assigns a verdict, rewriting rejections to `PassHinted` once forced.
    pub const fn set_verdict(&mut self, verdict: PolicyVerdict) {
        self.verdict = if self.forced && verdict.is_rejected() {
            PolicyVerdict::PassHinted
        } else {
            verdict
        };
    }

    /// Marks the excuse as forced.
    ///
    /// Returns true when the current verdict was a rejection and has been
    /// rewritten to `PassHinted`.
    pub const fn apply_force(&mut self) -> bool {
        self.forced = true;
        if self.verdict.is_rejected() {
            self.verdict = PolicyVerdict::PassHinted;
            return true;
        }
        false
    }

    // ------------------------------------------------------------------------
    // Dependency bookkeeping
    // ------------------------------------------------------------------------

    /// Records a dependency edge seen on `arch`.
    ///
    /// Architectures are appended even when already present.
    pub fn add_dependency(&mut self, kind: DependencyKind, name: &str, arch: &str) {
        if !self.all_deps.contains_key(name) {
            self.dependency_order.push(name.to_string());
        }
        self.all_deps
            .entry(name.to_string())
            .or_default()
            .entry(kind)
            .or_default()
            .push(arch.to_string());
    }

    /// Records an unproblematic dependency.
    pub fn add_sane_dependency(&mut self, name: &str) {
        if !self.sane_deps.iter().any(|existing| existing == name) {
            self.sane_deps.push(name.to_string());
        }
    }

    /// Records a break-type relation.
    pub fn add_break_dependency(&mut self, name: &str, arch: &str) {
        let present = self.break_deps.iter().any(|dep| dep.name == name && dep.arch == arch);
        if !present {
            self.break_deps.push(BreakDependency {
                name: name.to_string(),
                arch: arch.to_string(),
            });
        }
    }

    /// Records an architecture with unsatisfiable dependencies.
    pub fn add_unsatisfiable_arch(&mut self, arch: &str) {
        if !self.unsatisfiable_on_archs.iter().any(|existing| existing == arch) {
            self.unsatisfiable_on_archs.push(arch.to_string());
        }
    }

    /// Records an unsatisfiable dependency signature on `arch`.
    pub fn add_unsatisfiable_dependency(&mut self, signature: &str, arch: &str) {
        self.unsat_deps.entry(arch.to_string()).or_default().insert(signature.to_string());
    }

    /// Marks a dependency as invalidated.
    pub fn invalidate_dependency(&mut self, name: &str) {
        self.invalid_deps.insert(name.to_string());
    }

    /// Returns the items this excuse has a `Depends` edge on.
    #[must_use]
    pub fn depends_on(&self) -> BTreeSet<&str> {
        self.all_deps
            .iter()
            .filter(|(_, kinds)| kinds.contains_key(&DependencyKind::Depends))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    // ------------------------------------------------------------------------
    // Evidence
    // ------------------------------------------------------------------------

    /// Appends an HTML-safe annotation line.
    pub fn add_html_note(&mut self, note: impl Into<String>) {
        self.html_notes.push(note.into());
    }

    /// Records an architecture missing a build.
    pub fn add_missing_build(&mut self, arch: &str) {
        self.missing_builds.insert(arch.to_string());
    }

    /// Records an out-of-date architecture missing a build.
    pub fn add_missing_build_out_of_date(&mut self, arch: &str) {
        self.missing_builds_out_of_date_arch.insert(arch.to_string());
    }

    /// Records a cruft binary left over from `from_version`.
    pub fn add_old_binary(&mut self, binary: &str, from_version: &str) {
        self.old_binaries.entry(from_version.to_string()).or_default().insert(binary.to_string());
    }

    /// Appends a hint.
    pub fn add_hint(&mut self, hint: Hint) {
        self.hints.push(hint);
    }

    /// Merges bug sets for the old and new versions.
    pub fn set_bugs<I, J>(&mut self, old_bugs: I, new_bugs: J)
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        self.old_bugs.extend(old_bugs.into_iter().map(Into::into));
        self.new_bugs.extend(new_bugs.into_iter().map(Into::into));
    }

    /// Adds a reason tag.
    pub fn add_reason(&mut self, reason: impl Into<String>) {
        self.reasons.insert(reason.into());
    }

    /// Stores the diagnostic payload reported by `policy`.
    pub fn add_policy_info(&mut self, policy: impl Into<String>, info: Value) {
        self.policy_info.insert(policy.into(), info);
    }

    /// Stores the bounty granted by `policy`.
    pub fn add_bounty(&mut self, policy: impl Into<String>, value: i64) {
        self.bounty.insert(policy.into(), value);
    }

    /// Stores the penalty applied by `policy`.
    pub fn add_penalty(&mut self, policy: impl Into<String>, value: i64) {
        self.penalty.insert(policy.into(), value);
    }

    // ------------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------------

    /// Returns the presentation sort key.
    ///
    /// Unknown ages sort first as `-1`, then ascending by age and name.
    #[must_use]
    pub fn sort_key(&self) -> (i64, &str) {
        let days = self.age.map_or(-1, |age| i64::from(age.days_old));
        (days, self.name.as_str())
    }

    /// Returns true unless the verdict blocks migration.
    #[must_use]
    pub const fn is_acceptable(&self) -> bool {
        !self.verdict.is_rejected()
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version pair.
    #[must_use]
    pub const fn versions(&self) -> &VersionPair {
        &self.versions
    }

    /// Returns the maintainer.
    #[must_use]
    pub fn maintainer(&self) -> Option<&str> {
        self.maintainer.as_deref()
    }

    /// Returns the candidate age.
    #[must_use]
    pub const fn age(&self) -> Option<ExcuseAge> {
        self.age
    }

    /// Returns the section.
    #[must_use]
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Returns the component part of a `component/section` value.
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        self.section.as_deref().and_then(|section| section.split_once('/')).map(|(c, _)| c)
    }

    /// Returns the current verdict.
    #[must_use]
    pub const fn verdict(&self) -> PolicyVerdict {
        self.verdict
    }

    /// Returns whether a force hint has been applied.
    #[must_use]
    pub const fn is_forced(&self) -> bool {
        self.forced
    }

    /// Returns whether manual approval is required.
    #[must_use]
    pub const fn needs_approval(&self) -> bool {
        self.needs_approval
    }

    /// Returns the applied hints.
    #[must_use]
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Returns the dependency map.
    #[must_use]
    pub const fn all_deps(&self) -> &DependencyMap {
        &self.all_deps
    }

    /// Returns the dependency map keys in first-seen order.
    #[must_use]
    pub fn dependency_order(&self) -> &[String] {
        &self.dependency_order
    }

    /// Returns the unproblematic dependencies.
    #[must_use]
    pub fn sane_deps(&self) -> &[String] {
        &self.sane_deps
    }

    /// Returns the break-type relations.
    #[must_use]
    pub fn break_deps(&self) -> &[BreakDependency] {
        &self.break_deps
    }

    /// Returns the invalidated dependencies.
    #[must_use]
    pub const fn invalid_deps(&self) -> &BTreeSet<String> {
        &self.invalid_deps
    }

    /// Returns the architectures with unsatisfiable dependencies.
    #[must_use]
    pub fn unsatisfiable_on_archs(&self) -> &[String] {
        &self.unsatisfiable_on_archs
    }

    /// Returns unsatisfiable dependency signatures per architecture.
    #[must_use]
    pub const fn unsat_deps(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.unsat_deps
    }

    /// Returns the bugs affecting the old version.
    #[must_use]
    pub const fn old_bugs(&self) -> &BTreeSet<String> {
        &self.old_bugs
    }

    /// Returns the bugs affecting the new version.
    #[must_use]
    pub const fn new_bugs(&self) -> &BTreeSet<String> {
        &self.new_bugs
    }

    /// Returns the reason tags.
    #[must_use]
    pub const fn reasons(&self) -> &BTreeSet<String> {
        &self.reasons
    }

    /// Returns the annotation lines.
    #[must_use]
    pub fn html_notes(&self) -> &[String] {
        &self.html_notes
    }

    /// Returns the architectures missing a build.
    #[must_use]
    pub const fn missing_builds(&self) -> &BTreeSet<String> {
        &self.missing_builds
    }

    /// Returns the out-of-date architectures missing a build.
    #[must_use]
    pub const fn missing_builds_out_of_date_arch(&self) -> &BTreeSet<String> {
        &self.missing_builds_out_of_date_arch
    }

    /// Returns cruft binaries per source version.
    #[must_use]
    pub const fn old_binaries(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.old_binaries
    }

    /// Returns policy diagnostics.
    #[must_use]
    pub const fn policy_info(&self) -> &BTreeMap<String, Value> {
        &self.policy_info
    }

    /// Returns policy bounties.
    #[must_use]
    pub const fn bounty(&self) -> &BTreeMap<String, i64> {
        &self.bounty
    }

    /// Returns policy penalties.
    #[must_use]
    pub const fn penalty(&self) -> &BTreeMap<String, i64> {
        &self.penalty
    }
}
