// crates/excuse-core/tests/render_data.rs
// ============================================================================
// Module: Excuse Structured Document Tests
// Description: Validate the published excuse document shape.
// Purpose: Keep key presence and ordering rules stable for consumers.
// Dependencies: excuse-core, serde_json
// ============================================================================

//! Structured document rendering tests.

use excuse_core::DependencyKind;
use excuse_core::Excuse;
use excuse_core::Hint;
use excuse_core::PolicyVerdict;
use excuse_core::render::ApprovalStatus;
use excuse_core::render_data;
use serde_json::Value;
use serde_json::json;

type TestResult = Result<(), String>;

fn ensure(condition: bool, message: &str) -> TestResult {
    if condition { Ok(()) } else { Err(message.to_string()) }
}

fn libfoo() -> Excuse {
    let mut excuse = Excuse::new("libfoo");
    excuse.set_versions(Some("1.0"), Some("1.1"));
    excuse.set_verdict(PolicyVerdict::Pass);
    excuse
}

fn to_json(excuse: &Excuse) -> Result<Value, String> {
    serde_json::to_value(render_data(excuse)).map_err(|err| err.to_string())
}

#[test]
fn passing_excuse_without_dependencies() -> TestResult {
    let value = to_json(&libfoo())?;
    let expected = json!({
        "excuses": [],
        "item-name": "libfoo",
        "source": "libfoo",
        "migration-policy-verdict": "PASS",
        "old-version": "1.0",
        "new-version": "1.1",
        "reason": [],
        "is-candidate": true,
    });
    ensure(value == expected, &format!("unexpected document: {value}"))
}

#[test]
fn invalidated_dependency_is_blocked_by() -> TestResult {
    let mut excuse = libfoo();
    excuse.invalidate_dependency("libbar");
    excuse.add_dependency(DependencyKind::Depends, "libbar", "amd64");
    let data = render_data(&excuse);
    let deps = data.dependencies.ok_or("dependencies missing")?;
    ensure(deps.blocked_by == Some(vec!["libbar".to_string()]), "blocked-by")?;
    ensure(deps.migrate_after.is_empty(), "migrate-after should be empty")?;
    ensure(data.invalidated_by_other_package == Some(true), "invalidated flag")?;

    let value = to_json(&excuse)?;
    ensure(value["dependencies"]["migrate-after"] == json!([]), "migrate-after key")?;
    ensure(value["invalidated-by-other-package"] == json!(true), "invalidated key")
}

#[test]
fn forced_excuse_moves_reasons() -> TestResult {
    let mut excuse = libfoo();
    excuse.set_verdict(PolicyVerdict::RejectedPermanently);
    excuse.add_reason("depends");
    excuse.add_reason("age");
    ensure(excuse.apply_force(), "force should change verdict")?;
    ensure(excuse.is_forced(), "forced flag")?;
    let data = render_data(&excuse);
    ensure(data.migration_policy_verdict == PolicyVerdict::PassHinted, "verdict")?;
    ensure(
        data.forced_reason == Some(vec!["age".to_string(), "depends".to_string()]),
        "forced-reason sorted",
    )?;
    ensure(data.reason.is_empty(), "reason emptied")?;
    ensure(data.is_candidate, "forced excuse is a candidate")
}

#[test]
fn unforced_reasons_are_sorted() -> TestResult {
    let mut excuse = libfoo();
    excuse.set_verdict(PolicyVerdict::RejectedTemporarily);
    excuse.add_reason("piuparts");
    excuse.add_reason("age");
    let value = to_json(&excuse)?;
    ensure(value["reason"] == json!(["age", "piuparts"]), "reason sorted")?;
    ensure(value.get("forced-reason").is_none(), "no forced-reason key")?;
    ensure(value["is-candidate"] == json!(false), "not a candidate")
}

#[test]
fn source_is_derived_from_item_name() -> TestResult {
    for (name, source) in
        [("foo_1.0", "foo"), ("foo/amd64", "foo"), ("-foo", "foo"), ("foo", "foo")]
    {
        let data = render_data(&Excuse::new(name));
        ensure(data.source == source, &format!("{name} -> {}", data.source))?;
        ensure(data.item_name == name, "item name preserved")?;
    }
    Ok(())
}

#[test]
fn conditional_sections_render_when_populated() -> TestResult {
    let mut excuse = libfoo();
    excuse.set_maintainer("Jane Doe <jane@example.org>");
    excuse.set_section("non-free/libs");
    excuse.add_policy_info("age", json!({"current-age": 3, "age-requirement": 5}));
    excuse.add_missing_build("s390x");
    excuse.add_missing_build("armel");
    excuse.add_missing_build_out_of_date("hppa");
    excuse.add_old_binary("libfoo0", "0.9");
    excuse.add_old_binary("libfoo0-dbg", "0.9");
    excuse.add_html_note("Piuparts passed");
    let value = to_json(&excuse)?;
    ensure(value["maintainer"] == json!("Jane Doe"), "maintainer")?;
    ensure(value["component"] == json!("non-free"), "component")?;
    ensure(value["policy_info"]["age"]["current-age"] == json!(3), "policy info")?;
    ensure(
        value["missing-builds"]
            == json!({
                "on-architectures": ["armel", "s390x"],
                "on-unimportant-architectures": ["hppa"],
            }),
        "missing builds",
    )?;
    ensure(value["old-binaries"] == json!({"0.9": ["libfoo0", "libfoo0-dbg"]}), "cruft")?;
    ensure(value["excuses"] == json!(["Piuparts passed"]), "notes")
}

#[test]
fn dependency_section_covers_breaks_and_unsatisfiable() -> TestResult {
    let mut excuse = libfoo();
    excuse.add_dependency(DependencyKind::Depends, "zlib", "amd64");
    excuse.add_dependency(DependencyKind::BuildDepends, "gcc", "amd64");
    excuse.add_break_dependency("zlib", "amd64");
    excuse.add_break_dependency("libold", "i386");
    excuse.add_break_dependency("libancient", "amd64");
    excuse.add_unsatisfiable_dependency("libc6 (>= 9)", "amd64");
    excuse.add_unsatisfiable_dependency("libbar (>= 2)", "amd64");
    let value = to_json(&excuse)?;
    let expected = json!({
        "migrate-after": ["gcc", "zlib"],
        "unimportant-dependencies": ["libancient", "libold"],
        "unsatisfiable-dependencies": {"amd64": ["libbar (>= 2)", "libc6 (>= 9)"]},
    });
    ensure(value["dependencies"] == expected, &format!("dependencies: {}", value["dependencies"]))
}

#[test]
fn manual_approval_status_follows_unblock_hints() -> TestResult {
    let mut excuse = libfoo();
    ensure(render_data(&excuse).manual_approval_status.is_none(), "no status by default")?;
    excuse.set_needs_approval(true);
    excuse.add_hint(Hint::new("age-days", "alice"));
    ensure(
        render_data(&excuse).manual_approval_status == Some(ApprovalStatus::NotApproved),
        "not approved without unblock",
    )?;
    excuse.add_hint(Hint::new("unblock", "bob"));
    let value = to_json(&excuse)?;
    ensure(value["manual-approval-status"] == json!("approved"), "approved")?;
    ensure(
        value["hints"]
            == json!([
                {"hint-type": "age-days", "hint-from": "alice"},
                {"hint-type": "unblock", "hint-from": "bob"},
            ]),
        "hints keep insertion order",
    )
}
