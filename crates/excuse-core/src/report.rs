// crates/excuse-core/src/report.rs
// ============================================================================
// Module: Excuse Report Assembly
// Description: Combine many excuses into one HTML page and one document.
// Purpose: Order excuses for presentation and serialize the published report.
// Dependencies: crate::{core, render, telemetry}, serde, serde_json, serde_yaml,
// thiserror
// ============================================================================

//! ## Overview
//! A report orders excuses by [`Excuse::sort_key`], concatenates their HTML
//! fragments into a single list, and collects their structured documents
//! under a caller-supplied generation date. The core never reads the clock
//! and never writes files; callers persist the returned strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::Excuse;
use crate::render::ExcuseData;
use crate::render::HtmlRenderer;
use crate::render::render_data;
use crate::telemetry::RenderEvent;
use crate::telemetry::RenderObserver;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default report page title.
pub const DEFAULT_TITLE: &str = "Excuses";
/// Default maximum number of excuses in one report.
pub const DEFAULT_MAX_EXCUSES: usize = 100_000;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Serialization format for the structured report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// YAML document.
    #[default]
    Yaml,
    /// JSON document.
    Json,
}

/// Report assembly options.
///
/// # Invariants
/// - `max_excuses` is validated by the config layer; zero rejects every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Page title.
    pub title: String,
    /// Whether to wrap the excuse list in a full HTML page.
    pub wrap_page: bool,
    /// Structured document format.
    pub format: DocumentFormat,
    /// Maximum number of excuses accepted.
    pub max_excuses: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            wrap_page: true,
            format: DocumentFormat::default(),
            max_excuses: DEFAULT_MAX_EXCUSES,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted while assembling or serializing a report.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Too many excuses were supplied.
    #[error("report has {count} excuses, limit is {limit}")]
    TooManyExcuses {
        /// Number of excuses supplied.
        count: usize,
        /// Configured limit.
        limit: usize,
    },
    /// Serialization of the structured document failed.
    #[error("report serialization failed: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Structured report document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExcusesDocument {
    /// Caller-supplied generation timestamp.
    pub generated_date: String,
    /// Excuse documents in presentation order.
    pub sources: Vec<ExcuseData>,
}

/// Assembled excuse report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcuseReport {
    /// Rendered HTML.
    html: String,
    /// Structured document.
    document: ExcusesDocument,
    /// Format used by [`ExcuseReport::serialize_document`].
    format: DocumentFormat,
}

impl ExcuseReport {
    /// Assembles a report from excuses in presentation order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooManyExcuses`] when the input exceeds the limit.
    pub fn assemble(
        excuses: &[Excuse],
        generated_date: &str,
        options: &ReportOptions,
        observer: &dyn RenderObserver,
    ) -> Result<Self, ReportError> {
        if excuses.len() > options.max_excuses {
            return Err(ReportError::TooManyExcuses {
                count: excuses.len(),
                limit: options.max_excuses,
            });
        }
        let mut ordered: Vec<&Excuse> = excuses.iter().collect();
        ordered.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let renderer = HtmlRenderer::default();
        let mut html = String::new();
        if options.wrap_page {
            write_page_header(&mut html, &options.title, generated_date);
        }
        html.push_str("<ul>\n");
        let mut sources = Vec::with_capacity(ordered.len());
        let mut candidates = 0;
        for excuse in ordered {
            html.push_str("<li>");
            html.push_str(&renderer.render(excuse, observer));
            let data = render_data(excuse);
            if data.is_candidate {
                candidates += 1;
            }
            observer.record(RenderEvent::ExcuseRendered {
                item: excuse.name().to_string(),
                is_candidate: data.is_candidate,
                forced: excuse.is_forced(),
            });
            sources.push(data);
        }
        html.push_str("</ul>\n");
        if options.wrap_page {
            html.push_str("</body></html>\n");
        }
        observer.record(RenderEvent::ReportAssembled {
            excuses: sources.len(),
            candidates,
        });

        Ok(Self {
            html,
            document: ExcusesDocument {
                generated_date: generated_date.to_string(),
                sources,
            },
            format: options.format,
        })
    }

    /// Returns the rendered HTML.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Returns the structured document.
    #[must_use]
    pub const fn document(&self) -> &ExcusesDocument {
        &self.document
    }

    /// Serializes the structured document in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] when serialization fails.
    pub fn serialize_document(&self) -> Result<String, ReportError> {
        match self.format {
            DocumentFormat::Yaml => serde_yaml::to_string(&self.document)
                .map_err(|err| ReportError::Serialize(err.to_string())),
            DocumentFormat::Json => serde_json::to_string_pretty(&self.document)
                .map_err(|err| ReportError::Serialize(err.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes the page preamble with an escaped title.
fn write_page_header(out: &mut String, title: &str, generated_date: &str) {
    let title = escape_html(title);
    let generated_date = escape_html(generated_date);
    out.push_str(
        "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \
         \"http://www.w3.org/TR/html4/strict.dtd\">\n",
    );
    let _ = write!(
        out,
        "<html><head><title>{title}</title>\n<meta http-equiv=\"Content-Type\" \
         content=\"text/html;charset=utf-8\"></head><body>\n<h1>{title}</h1>\n<p>Generated: \
         {generated_date}</p>\n"
    );
}

/// Escapes the HTML metacharacters in caller-supplied text.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
