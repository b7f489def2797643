use vibewall_cli::ai::{build_provider, parse_items, parse_report, strip_fences};
use vibewall_core::config::AIConfig;
use vibewall_core::error::ProviderError;

#[test]
fn strip_fences_variants() {
    assert_eq!(strip_fences("```json\n[1]\n```"), "[1]");
    assert_eq!(strip_fences("```\n{}\n```"), "{}");
    assert_eq!(strip_fences("  [\"a\"]  "), "[\"a\"]");
}

#[test]
fn parse_items_plain_array() {
    let items = parse_items(r#"["Summer Sale", "Brand Awareness"]"#).unwrap();
    assert_eq!(items, vec!["Summer Sale", "Brand Awareness"]);
}

#[test]
fn parse_items_fenced_array() {
    let items = parse_items("```json\n[\"a\", \"b\"]\n```").unwrap();
    assert_eq!(items.len(), 2);
}

#[test]
fn parse_items_wrapped_in_known_key() {
    for key in ["items", "names", "results", "data"] {
        let raw = format!(r#"{{"{}": ["x", "y", "z"]}}"#, key);
        assert_eq!(parse_items(&raw).unwrap(), vec!["x", "y", "z"], "key {key}");
    }
}

#[test]
fn parse_items_wrapped_in_single_unknown_key() {
    let items = parse_items(r#"{"campaigns": ["Q3 Push"]}"#).unwrap();
    assert_eq!(items, vec!["Q3 Push"]);
}

#[test]
fn parse_items_rejects_other_shapes() {
    assert!(matches!(
        parse_items(r#"{"a": ["x"], "b": ["y"]}"#),
        Err(ProviderError::Parse(_))
    ));
    assert!(matches!(
        parse_items(r#"[1, 2, 3]"#),
        Err(ProviderError::Parse(_))
    ));
    assert!(parse_items("not json").is_err());
}

#[test]
fn parse_report_requires_core_fields() {
    assert!(parse_report(r#"{"summary": "s"}"#).is_err());
    let report =
        parse_report(r#"{"summary": "s", "recommendation": "r", "score": 50}"#).unwrap();
    assert_eq!(report.score, 50);
}

#[test]
fn provider_without_key_is_simulated() {
    let config = AIConfig {
        api_key: None,
        ..AIConfig::default()
    };
    // Forced simulation ignores any key in the environment
    assert!(build_provider(&config, true).unwrap().is_simulated());

    let keyed = AIConfig {
        api_key: Some("k".to_string()),
        ..AIConfig::default()
    };
    assert!(!build_provider(&keyed, false).unwrap().is_simulated());
}
