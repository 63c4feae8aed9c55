// crates/excuse-core/tests/proptest_excuse.rs
// ============================================================================
// Module: Excuse Property-Based Tests
// Description: Property tests for ordering and verdict override invariants.
// Purpose: Detect invariant violations across wide input ranges.
// ============================================================================

//! Property-based tests for excuse invariants.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use excuse_core::DependencyKind;
use excuse_core::Excuse;
use excuse_core::PolicyVerdict;
use excuse_core::render_data;
use excuse_core::render_html;
use proptest::prelude::*;

fn verdict_strategy() -> impl Strategy<Value = PolicyVerdict> {
    prop::sample::select(PolicyVerdict::ALL.to_vec())
}

fn kind_strategy() -> impl Strategy<Value = DependencyKind> {
    prop_oneof![
        Just(DependencyKind::Depends),
        Just(DependencyKind::ImplicitDependency),
        Just(DependencyKind::BuildDepends),
        Just(DependencyKind::BuildDependsIndep),
        Just(DependencyKind::BuiltUsing),
    ]
}

proptest! {
    #[test]
    fn sort_key_reflects_age(name in "[a-z0-9+.-]{1,12}", age in proptest::option::of(0u32 .. 400)) {
        let mut excuse = Excuse::new(name.clone());
        if let Some(days) = age {
            excuse.set_age(days, 5);
        }
        let expected = age.map_or(-1, i64::from);
        prop_assert_eq!(excuse.sort_key(), (expected, name.as_str()));
    }

    #[test]
    fn sorted_excuses_put_unknown_ages_first(
        entries in prop::collection::vec(("[a-z]{1,6}", proptest::option::of(0u32 .. 30)), 0 .. 20)
    ) {
        let mut excuses: Vec<Excuse> = entries
            .iter()
            .map(|(name, age)| {
                let mut excuse = Excuse::new(name.clone());
                if let Some(days) = age {
                    excuse.set_age(*days, 0);
                }
                excuse
            })
            .collect();
        excuses.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        for pair in excuses.windows(2) {
            let (left, right) = (pair[0].sort_key(), pair[1].sort_key());
            prop_assert!(left <= right);
            if pair[1].age().is_none() {
                prop_assert!(pair[0].age().is_none());
            }
        }
    }

    #[test]
    fn forced_excuse_never_rejects(verdicts in prop::collection::vec(verdict_strategy(), 1 .. 8)) {
        let mut excuse = Excuse::new("libfoo");
        excuse.apply_force();
        for verdict in verdicts {
            excuse.set_verdict(verdict);
            prop_assert!(excuse.is_acceptable());
            let expected = if verdict.is_rejected() { PolicyVerdict::PassHinted } else { verdict };
            prop_assert_eq!(excuse.verdict(), expected);
        }
    }

    #[test]
    fn unforced_verdict_is_stored_verbatim(verdict in verdict_strategy()) {
        let mut excuse = Excuse::new("libfoo");
        excuse.set_verdict(verdict);
        prop_assert_eq!(excuse.verdict(), verdict);
        prop_assert_eq!(excuse.is_acceptable(), !verdict.is_rejected());
        prop_assert_eq!(render_data(&excuse).is_candidate, excuse.is_acceptable());
    }

    #[test]
    fn dependency_kind_lists_are_never_empty(
        edges in prop::collection::vec((kind_strategy(), "[a-z]{1,4}", "[a-z0-9]{2,6}"), 0 .. 32)
    ) {
        let mut excuse = Excuse::new("libfoo");
        for (kind, name, arch) in &edges {
            excuse.add_dependency(*kind, name, arch);
        }
        let total: usize = excuse
            .all_deps()
            .values()
            .flat_map(|kinds| kinds.values())
            .map(|archs| {
                assert!(!archs.is_empty());
                archs.len()
            })
            .sum();
        prop_assert_eq!(total, edges.len());
    }

    #[test]
    fn html_rendering_never_fails(name in "[a-z/_-]{0,12}", verdict in verdict_strategy()) {
        let mut excuse = Excuse::new(name.clone());
        excuse.set_verdict(verdict);
        let html = render_html(&excuse);
        let header = format!("<a id=\"{name}\" name=\"{name}\">{name}</a> (- to -)\n<ul>\n");
        prop_assert!(html.starts_with(&header));
        prop_assert!(html.ends_with("</ul>\n"));
    }
}
