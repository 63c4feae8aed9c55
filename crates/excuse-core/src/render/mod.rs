// crates/excuse-core/src/render/mod.rs
// ============================================================================
// Module: Excuse Renderers
// Description: Read-only HTML and structured renderings of an excuse.
// Purpose: Group the two presentation forms published for each excuse.
// Dependencies: crate::core, crate::telemetry
// ============================================================================

//! ## Overview
//! Renderers are pure functions of an [`crate::core::Excuse`]; they never
//! mutate the record and never fail on missing optional fields.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod data;
pub mod html;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use data::ApprovalStatus;
pub use data::DependencyData;
pub use data::ExcuseData;
pub use data::HintData;
pub use data::MissingBuilds;
pub use data::derive_source;
pub use data::render_data;
pub use html::HtmlRenderer;
pub use html::render_html;
