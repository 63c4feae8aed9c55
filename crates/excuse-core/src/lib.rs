// crates/excuse-core/src/lib.rs
// ============================================================================
// Module: Excuse Core Library
// Description: Public API surface for excuse records and their renderings.
// Purpose: Expose the record model, renderers, report assembly, and telemetry.
// Dependencies: crate::{core, render, report, telemetry}
// ============================================================================

//! ## Overview
//! Excuse core records why a candidate update may or may not migrate from a
//! staging channel into a stable channel, and renders that rationale as an
//! HTML fragment or a structured document. It performs no I/O and never
//! decides migration itself.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod render;
pub mod report;
pub mod telemetry;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use render::ExcuseData;
pub use render::HtmlRenderer;
pub use render::derive_source;
pub use render::render_data;
pub use render::render_html;
pub use report::DocumentFormat;
pub use report::ExcuseReport;
pub use report::ExcusesDocument;
pub use report::ReportError;
pub use report::ReportOptions;
pub use telemetry::LogObserver;
pub use telemetry::NoopObserver;
pub use telemetry::RenderEvent;
pub use telemetry::RenderObserver;
pub use telemetry::TelemetryError;
