// crates/excuse-config/src/lib.rs
// ============================================================================
// Module: Excuse Config Library
// Description: Canonical config model and validation for excuse reports.
// Purpose: Single source of truth for excuses.toml semantics.
// Dependencies: excuse-core, serde, toml
// ============================================================================

//! ## Overview
//! `excuse-config` defines the configuration model for excuse report
//! assembly. It provides strict, fail-closed validation and converts the
//! validated model into [`excuse_core::ReportOptions`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
