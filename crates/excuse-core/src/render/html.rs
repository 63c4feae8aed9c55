// crates/excuse-core/src/render/html.rs
// ============================================================================
// Module: Excuse HTML Renderer
// Description: Human-readable HTML fragment for a single excuse.
// Purpose: Produce anchor-addressable report entries for the excuses page.
// Dependencies: crate::core, crate::telemetry
// ============================================================================

//! ## Overview
//! The fragment opens with an anchor named after the item, followed by a
//! `<ul>` list of status lines. Optional lines are omitted when their field is
//! unset. A verdict missing from the description table renders a visible
//! placeholder and is reported to the observer instead of failing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::core::DependencyKind;
use crate::core::Excuse;
use crate::core::PolicyVerdict;
use crate::core::VERDICT_DESCRIPTIONS;
use crate::core::describe_verdict;
use crate::core::missing_description;
use crate::telemetry::NoopObserver;
use crate::telemetry::RenderEvent;
use crate::telemetry::RenderObserver;

// ============================================================================
// SECTION: Renderer
// ============================================================================

/// HTML renderer with a configurable verdict description table.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer<'a> {
    /// Verdict summaries used for the migration status line.
    descriptions: &'a [(PolicyVerdict, &'static str)],
}

impl Default for HtmlRenderer<'static> {
    fn default() -> Self {
        Self {
            descriptions: VERDICT_DESCRIPTIONS,
        }
    }
}

impl<'a> HtmlRenderer<'a> {
    /// Creates a renderer using the provided description table.
    #[must_use]
    pub const fn with_descriptions(descriptions: &'a [(PolicyVerdict, &'static str)]) -> Self {
        Self {
            descriptions,
        }
    }

    /// Renders the excuse as an HTML fragment.
    #[must_use]
    pub fn render(&self, excuse: &Excuse, observer: &dyn RenderObserver) -> String {
        let name = excuse.name();
        let versions = excuse.versions();
        let mut out = String::new();
        let _ = write!(
            out,
            "<a id=\"{name}\" name=\"{name}\">{name}</a> ({} to {})\n<ul>\n",
            versions.old_or_absent(),
            versions.new_or_absent()
        );
        let _ = writeln!(out, "<li>Migration status: {}", self.verdict_summary(excuse, observer));
        if let Some(maintainer) = excuse.maintainer().filter(|value| !value.is_empty()) {
            let _ = writeln!(out, "<li>Maintainer: {maintainer}");
        }
        if let Some(section) = excuse.section().filter(|value| value.contains('/')) {
            let _ = writeln!(out, "<li>Section: {section}");
        }
        if let Some(age) = excuse.age() {
            if age.min_days == 0 {
                let _ = writeln!(out, "<li>{} days old", age.days_old);
            } else if age.is_too_young() {
                let _ =
                    writeln!(out, "<li>Too young, only {} of {} days old", age.days_old, age.min_days);
            } else {
                let _ =
                    writeln!(out, "<li>{} days old (needed {} days)", age.days_old, age.min_days);
            }
        }
        for note in excuse.html_notes() {
            let _ = writeln!(out, "<li>{note}");
        }
        render_dependency_issues(&mut out, excuse);
        for dep in excuse.break_deps() {
            if !excuse.all_deps().contains_key(&dep.name) {
                let _ = writeln!(
                    out,
                    "<li>Ignoring {} depends: <a href=\"#{}\">{}</a>",
                    dep.arch, dep.name, dep.name
                );
            }
        }
        out.push_str("</ul>\n");
        out
    }

    /// Returns the verdict summary, reporting missing table entries.
    fn verdict_summary(&self, excuse: &Excuse, observer: &dyn RenderObserver) -> String {
        let verdict = excuse.verdict();
        describe_verdict(self.descriptions, verdict).map_or_else(
            || {
                observer.record(RenderEvent::MissingVerdictDescription {
                    item: excuse.name().to_string(),
                    verdict,
                });
                missing_description(verdict)
            },
            str::to_string,
        )
    }
}

/// Renders an excuse with the default description table and no telemetry.
#[must_use]
pub fn render_html(excuse: &Excuse) -> String {
    HtmlRenderer::default().render(excuse, &NoopObserver)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Writes one line per (depended-on item, kind), grouped by base item name.
///
/// Keys sharing a base name keep first-seen order, so the first key decides
/// whether a line carries the "(not considered)" suffix.
fn render_dependency_issues(out: &mut String, excuse: &Excuse) {
    let name = excuse.name();
    let mut entries: Vec<(&str, &String)> = excuse
        .dependency_order()
        .iter()
        .map(|key| (key.split('/').next().unwrap_or(key.as_str()), key))
        .collect();
    entries.sort_by_key(|(base, _)| *base);

    let mut last_base: Option<&str> = None;
    let mut seen: BTreeSet<DependencyKind> = BTreeSet::new();
    for (base, key) in entries {
        if last_base != Some(base) {
            seen.clear();
        }
        last_base = Some(base);
        let Some(kinds) = excuse.all_deps().get(key) else {
            continue;
        };
        let mut ordered: Vec<DependencyKind> = kinds.keys().copied().collect();
        ordered.sort_by_key(|kind| kind.as_str());
        let suffix = if excuse.invalid_deps().contains(key) { " (not considered)" } else { "" };
        for kind in ordered {
            if !seen.insert(kind) {
                continue;
            }
            let _ = writeln!(out, "<li>{kind}: {name} <a href=\"#{base}\">{base}</a>{suffix}");
        }
    }
}
