//! Config defaults and validation tests for excuse-config.
// crates/excuse-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate defaults, field limits, and report option mapping.
// Purpose: Ensure invalid settings fail closed and defaults stay stable.
// =============================================================================

use excuse_config::ExcuseConfig;
use excuse_core::DocumentFormat;
use excuse_core::ReportOptions;

type TestResult = Result<(), String>;

/// Assert that parsing the content fails with an error containing `needle`.
fn assert_invalid(content: &str, needle: &str) -> TestResult {
    match ExcuseConfig::from_toml(content) {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err(format!("expected invalid config for {content:?}")),
    }
}

#[test]
fn empty_config_uses_defaults() -> TestResult {
    let config = ExcuseConfig::from_toml("").map_err(|err| err.to_string())?;
    if config != ExcuseConfig::default() {
        return Err("empty config should equal defaults".to_string());
    }
    if config.report_options() != ReportOptions::default() {
        return Err("default config should map to default report options".to_string());
    }
    Ok(())
}

#[test]
fn report_options_follow_config() -> TestResult {
    let config = ExcuseConfig::from_toml(
        "[html]\ntitle = \"Stable excuses\"\nwrap_page = false\n\n[document]\nformat = \
         \"json\"\n\n[limits]\nmax_excuses = 10\n",
    )
    .map_err(|err| err.to_string())?;
    let expected = ReportOptions {
        title: "Stable excuses".to_string(),
        wrap_page: false,
        format: DocumentFormat::Json,
        max_excuses: 10,
    };
    if config.report_options() != expected {
        return Err(format!("unexpected options {:?}", config.report_options()));
    }
    Ok(())
}

#[test]
fn rejects_blank_title() -> TestResult {
    assert_invalid("[html]\ntitle = \"   \"\n", "html.title must be non-empty")
}

#[test]
fn rejects_long_title() -> TestResult {
    let content = format!("[html]\ntitle = \"{}\"\n", "t".repeat(257));
    assert_invalid(&content, "html.title exceeds 256 characters")
}

#[test]
fn rejects_zero_excuse_limit() -> TestResult {
    assert_invalid("[limits]\nmax_excuses = 0\n", "limits.max_excuses must be greater than zero")
}

#[test]
fn rejects_excuse_limit_above_ceiling() -> TestResult {
    assert_invalid("[limits]\nmax_excuses = 1000001\n", "limits.max_excuses exceeds 1000000")
}

#[test]
fn rejects_unknown_format() -> TestResult {
    assert_invalid("[document]\nformat = \"xml\"\n", "config parse error")
}

#[test]
fn rejects_unknown_keys() -> TestResult {
    assert_invalid("[html]\ncolour = \"blue\"\n", "config parse error")?;
    assert_invalid("[output]\npath = \"x\"\n", "config parse error")
}
