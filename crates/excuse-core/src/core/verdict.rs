// crates/excuse-core/src/core/verdict.rs
// ============================================================================
// Module: Excuse Policy Verdicts
// Description: Closed migration verdict enumeration and its classification.
// Purpose: Give excuses a typed outcome with fixed human-readable summaries.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Policy verdicts are produced by the policy framework and recorded on each
//! excuse. Every verdict falls into exactly one [`VerdictClass`]; anything that
//! is not an accept outcome blocks migration. Human-readable summaries live in
//! a fixed process-wide table consumed by the HTML renderer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Verdict Class
// ============================================================================

/// Classification of a verdict outcome.
///
/// # Invariants
/// - `Accept` is the only class that allows migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictClass {
    /// Terminal accept; the item will attempt migration.
    Accept,
    /// Rejected for now; the outcome may change without intervention.
    Pending,
    /// Rejected until something external (approval, fix, other item) changes.
    Reject,
}

// ============================================================================
// SECTION: Policy Verdict
// ============================================================================

/// Migration verdict recorded on an excuse.
///
/// # Invariants
/// - Variants are ordered by severity; `Pass` is the mildest.
/// - Serialized names are stable symbolic names consumed by report readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyVerdict {
    /// The item passed all policies.
    Pass,
    /// The item passed because a hint overrode a rejection.
    PassHinted,
    /// Rejected for now (too young, tests pending).
    RejectedTemporarily,
    /// Waiting for another item to become ready.
    RejectedWaitingForAnotherItem,
    /// Blocked by another item which is itself blocked.
    RejectedBlockedByAnotherItem,
    /// Needs a manual approval.
    RejectedNeedsApproval,
    /// Rejected, but not enough information to tell whether it is permanent.
    RejectedCannotDetermineIfPermanent,
    /// Rejected; the item introduces a regression.
    RejectedPermanently,
}

impl PolicyVerdict {
    /// All verdicts in severity order.
    pub const ALL: [Self; 8] = [
        Self::Pass,
        Self::PassHinted,
        Self::RejectedTemporarily,
        Self::RejectedWaitingForAnotherItem,
        Self::RejectedBlockedByAnotherItem,
        Self::RejectedNeedsApproval,
        Self::RejectedCannotDetermineIfPermanent,
        Self::RejectedPermanently,
    ];

    /// Returns the classification of the verdict.
    #[must_use]
    pub const fn class(self) -> VerdictClass {
        match self {
            Self::Pass | Self::PassHinted => VerdictClass::Accept,
            Self::RejectedTemporarily | Self::RejectedWaitingForAnotherItem => {
                VerdictClass::Pending
            }
            Self::RejectedBlockedByAnotherItem
            | Self::RejectedNeedsApproval
            | Self::RejectedCannotDetermineIfPermanent
            | Self::RejectedPermanently => VerdictClass::Reject,
        }
    }

    /// Returns true when the verdict blocks migration.
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        !matches!(self.class(), VerdictClass::Accept)
    }

    /// Returns true when the verdict can only change through external action.
    #[must_use]
    pub const fn is_blocked(self) -> bool {
        matches!(self.class(), VerdictClass::Reject)
    }

    /// Returns the stable symbolic name of the verdict.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::PassHinted => "PASS_HINTED",
            Self::RejectedTemporarily => "REJECTED_TEMPORARILY",
            Self::RejectedWaitingForAnotherItem => "REJECTED_WAITING_FOR_ANOTHER_ITEM",
            Self::RejectedBlockedByAnotherItem => "REJECTED_BLOCKED_BY_ANOTHER_ITEM",
            Self::RejectedNeedsApproval => "REJECTED_NEEDS_APPROVAL",
            Self::RejectedCannotDetermineIfPermanent => "REJECTED_CANNOT_DETERMINE_IF_PERMANENT",
            Self::RejectedPermanently => "REJECTED_PERMANENTLY",
        }
    }

    /// Returns the more severe of two verdicts.
    #[must_use]
    pub fn worst_of(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for PolicyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Verdict Descriptions
// ============================================================================

/// Fixed verdict summaries used in the HTML migration status line.
pub const VERDICT_DESCRIPTIONS: &[(PolicyVerdict, &str)] = &[
    (
        PolicyVerdict::Pass,
        "Will attempt migration (Any information below is purely informational)",
    ),
    (
        PolicyVerdict::PassHinted,
        "Will attempt migration due to a hint (Any information below is purely informational)",
    ),
    (
        PolicyVerdict::RejectedTemporarily,
        "Waiting for test results, another package or too young (no action required now - check \
         later)",
    ),
    (
        PolicyVerdict::RejectedWaitingForAnotherItem,
        "Waiting for another item to be ready to migrate (no action required now - check later)",
    ),
    (
        PolicyVerdict::RejectedBlockedByAnotherItem,
        "BLOCKED: Cannot migrate due to another item, which is blocked (please check which \
         dependencies are stuck)",
    ),
    (
        PolicyVerdict::RejectedNeedsApproval,
        "BLOCKED: Needs an approval (either due to a freeze, the source suite or a manual hint)",
    ),
    (
        PolicyVerdict::RejectedCannotDetermineIfPermanent,
        "BLOCKED: Maybe temporary, maybe blocked but Britney is missing information (check below \
         or the buildds)",
    ),
    (PolicyVerdict::RejectedPermanently, "BLOCKED: Rejected/introduces a regression"),
];

/// Looks up a verdict summary in a description table.
#[must_use]
pub fn describe_verdict(
    table: &[(PolicyVerdict, &'static str)],
    verdict: PolicyVerdict,
) -> Option<&'static str> {
    table.iter().find(|(candidate, _)| *candidate == verdict).map(|(_, description)| *description)
}

/// Returns the placeholder shown when a verdict has no summary.
#[must_use]
pub fn missing_description(verdict: PolicyVerdict) -> String {
    format!("UNKNOWN: Missing description for {verdict} - Please file a bug against Britney")
}
