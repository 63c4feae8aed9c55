// crates/excuse-core/src/core/hint.rs
// ============================================================================
// Module: Excuse Hints
// Description: Manual hint records attached to excuses.
// Purpose: Carry hint kind and attribution from the hint subsystem.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Hints are supplied by the hint subsystem. The excuse only needs the hint
//! kind and the user who issued it; the kind set is open-ended.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Hint Kind
// ============================================================================

/// Hint kind tag (`unblock`, `force`, `age-days`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HintKind(String);

impl HintKind {
    /// Hint kind granting manual approval.
    pub const UNBLOCK: &'static str = "unblock";

    /// Creates a new hint kind.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Returns the kind as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for HintKind {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for HintKind {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Hint Record
// ============================================================================

/// Hint applied to an excuse.
///
/// # Invariants
/// - `user` is the attribution reported by the hint subsystem, not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    /// Hint kind tag.
    pub kind: HintKind,
    /// User who issued the hint.
    pub user: String,
}

impl Hint {
    /// Creates a hint record.
    #[must_use]
    pub fn new(kind: impl Into<HintKind>, user: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            user: user.into(),
        }
    }

    /// Returns true when the hint grants manual approval.
    #[must_use]
    pub fn is_unblock(&self) -> bool {
        self.kind.as_str() == HintKind::UNBLOCK
    }
}
