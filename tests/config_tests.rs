// Tests for settings deserialization: JSON and TOML forms, defaults, and
// error context on malformed input.
use bujo::config::{AutoLinkRule, Settings};
use bujo::model::{LineParser, TokenKind};

#[test]
fn test_settings_from_json() {
    let settings = Settings::from_json(
        r#"{"auto_link_rules": [{"pattern": "(EXAMPLE-\\d+)", "target": "https://x/$1"}]}"#,
    )
    .unwrap();
    assert_eq!(
        settings.auto_link_rules,
        vec![AutoLinkRule {
            pattern: r"(EXAMPLE-\d+)".to_string(),
            target: "https://x/$1".to_string(),
        }]
    );
}

#[test]
fn test_settings_from_toml() {
    let settings = Settings::from_toml(
        r#"
[[auto_link_rules]]
pattern = '(EXAMPLE-\d+)'
target = "https://x/$1"

[[auto_link_rules]]
pattern = 'BUG-(\d+)'
target = "https://bugs/$1"
"#,
    )
    .unwrap();
    assert_eq!(settings.auto_link_rules.len(), 2);
    assert_eq!(settings.auto_link_rules[1].target, "https://bugs/$1");
}

#[test]
fn test_missing_rules_default_to_empty() {
    let from_json = Settings::from_json("{}").unwrap();
    assert!(from_json.auto_link_rules.is_empty());

    let from_toml = Settings::from_toml("").unwrap();
    assert!(from_toml.auto_link_rules.is_empty());
}

#[test]
fn test_malformed_json_carries_context() {
    let err = Settings::from_json("{not json").unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse settings JSON"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn test_malformed_toml_carries_context() {
    let err = Settings::from_toml("auto_link_rules = 3").unwrap_err();
    assert!(
        err.to_string().contains("Failed to parse settings TOML"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn test_loaded_rules_drive_the_parser() {
    let settings = Settings::from_json(
        r#"{"auto_link_rules": [{"pattern": "(EXAMPLE-\\d+)", "target": "https://x/$1"}]}"#,
    )
    .unwrap();
    let parser = LineParser::new(&settings.auto_link_rules);
    let item = parser.parse("[ ] fix EXAMPLE-12");
    assert_eq!(
        item.token(TokenKind::Link).unwrap().value,
        "https://x/EXAMPLE-12"
    );
}
