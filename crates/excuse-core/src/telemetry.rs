// crates/excuse-core/src/telemetry.rs
// ============================================================================
// Module: Excuse Render Telemetry
// Description: Observability hooks for excuse rendering and report assembly.
// Purpose: Surface operator-relevant rendering events without hard deps.
// Dependencies: crate::core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Renderers never fail; conditions an operator should see are reported as
//! [`RenderEvent`] values through a [`RenderObserver`]. The default observer
//! discards events. [`LogObserver`] writes one JSON record per line to a
//! caller-supplied writer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;

use serde::Serialize;
use thiserror::Error;

use crate::core::PolicyVerdict;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Rendering event payload.
///
/// # Invariants
/// - Variants are stable for log consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RenderEvent {
    /// The HTML renderer fell back to the missing-description placeholder.
    MissingVerdictDescription {
        /// Item name of the excuse.
        item: String,
        /// Verdict lacking a description.
        verdict: PolicyVerdict,
    },
    /// An excuse was rendered into a report.
    ExcuseRendered {
        /// Item name of the excuse.
        item: String,
        /// Whether the excuse is a migration candidate.
        is_candidate: bool,
        /// Whether the excuse was forced.
        forced: bool,
    },
    /// A report was assembled.
    ReportAssembled {
        /// Number of excuses in the report.
        excuses: usize,
        /// Number of migration candidates in the report.
        candidates: usize,
    },
}

// ============================================================================
// SECTION: Observer Trait
// ============================================================================

/// Sink for rendering events.
pub trait RenderObserver: Send + Sync {
    /// Records a rendering event.
    fn record(&self, event: RenderEvent);
}

/// No-op observer.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopObserver;

impl RenderObserver for NoopObserver {
    fn record(&self, _event: RenderEvent) {}
}

// ============================================================================
// SECTION: Log Observer
// ============================================================================

/// Errors emitted while writing telemetry records.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Log observer failed to write.
    #[error("log write failed: {0}")]
    LogWriteFailed(String),
}

/// Observer writing newline-delimited JSON records.
pub struct LogObserver<W: Write + Send> {
    /// Output writer for log records.
    writer: Mutex<W>,
}

impl<W: Write + Send> LogObserver<W> {
    /// Creates a log observer over the provided writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Writes a single event record.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError`] when the writer fails or its lock is poisoned.
    pub fn try_record(&self, event: &RenderEvent) -> Result<(), TelemetryError> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| TelemetryError::LogWriteFailed("log writer mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, event)
            .map_err(|err| TelemetryError::LogWriteFailed(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| TelemetryError::LogWriteFailed(err.to_string()))?;
        drop(guard);
        Ok(())
    }

    /// Consumes the observer and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError`] when the writer lock is poisoned.
    pub fn into_inner(self) -> Result<W, TelemetryError> {
        self.writer
            .into_inner()
            .map_err(|_| TelemetryError::LogWriteFailed("log writer mutex poisoned".to_string()))
    }
}

impl<W: Write + Send> RenderObserver for LogObserver<W> {
    fn record(&self, event: RenderEvent) {
        // Rendering is best-effort; a broken log must not drop the report.
        let _ = self.try_record(&event);
    }
}
