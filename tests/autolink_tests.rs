// Tests for caller-configured auto-link rules: resolved link values, raw
// text preservation, precedence against built-in matchers, and graceful
// handling of broken patterns.
use bujo::config::AutoLinkRule;
use bujo::model::{LineParser, TokenKind, stringify};

fn rule(pattern: &str, target: &str) -> AutoLinkRule {
    AutoLinkRule {
        pattern: pattern.to_string(),
        target: target.to_string(),
    }
}

#[test]
fn test_rule_resolves_target_template() {
    let parser = LineParser::new(&[rule(r"(EXAMPLE-\d+)", "https://x/$1")]);
    let item = parser.parse("[ ] Fix EXAMPLE-7 soon");

    let link = item.token(TokenKind::Link).unwrap();
    assert_eq!(link.value, "https://x/EXAMPLE-7");
    // The raw text stays what the user typed; that is what round-trips.
    assert_eq!(link.raw, "EXAMPLE-7");
    assert_eq!(stringify(&item), "[ ] Fix EXAMPLE-7 soon");
}

#[test]
fn test_rule_matches_repeat() {
    let parser = LineParser::new(&[rule(r"(EXAMPLE-\d+)", "https://x/$1")]);
    let item = parser.parse("EXAMPLE-1 and EXAMPLE-1 again");

    let links: Vec<_> = item
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Link)
        .collect();
    assert_eq!(links.len(), 2);
    assert!(links.iter().all(|t| t.value == "https://x/EXAMPLE-1"));
    assert_eq!(stringify(&item), "EXAMPLE-1 and EXAMPLE-1 again");
}

#[test]
fn test_multiple_rules_apply_in_configuration_order() {
    let parser = LineParser::new(&[
        rule(r"BUG-(\d+)", "https://bugs/$1"),
        rule(r"PR-(\d+)", "https://prs/$1"),
    ]);
    let item = parser.parse("BUG-3 fixed by PR-9");

    let values: Vec<&str> = item
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Link)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(values, vec!["https://bugs/3", "https://prs/9"]);
}

#[test]
fn test_builtin_url_beats_rule_at_same_position() {
    // A rule that also matches plain URLs must not rewrite them.
    let parser = LineParser::new(&[rule(r"https?://\S+", "REWRITTEN")]);
    let item = parser.parse("see https://a.example/b");

    let link = item.token(TokenKind::Link).unwrap();
    assert_eq!(link.value, "https://a.example/b");
}

#[test]
fn test_rule_does_not_shadow_due_date_or_tags() {
    let parser = LineParser::new(&[rule(r"(EXAMPLE-\d+)", "https://x/$1")]);
    let item = parser.parse("[ ] EXAMPLE-2 #tag @2021-01-01");

    assert_eq!(item.tags, vec!["tag"]);
    assert!(item.due_date.is_some());
    assert_eq!(
        item.token(TokenKind::Link).unwrap().value,
        "https://x/EXAMPLE-2"
    );
}

#[test]
fn test_invalid_pattern_is_skipped() {
    let parser = LineParser::new(&[
        rule(r"(((", "https://broken/$1"),
        rule(r"(EXAMPLE-\d+)", "https://x/$1"),
    ]);
    assert_eq!(parser.rule_count(), 1);

    // Parsing still works; the valid rule still applies.
    let item = parser.parse("EXAMPLE-4");
    assert_eq!(
        item.token(TokenKind::Link).unwrap().value,
        "https://x/EXAMPLE-4"
    );
}

#[test]
fn test_no_rules_leaves_text_alone() {
    let parser = LineParser::default();
    let item = parser.parse("[ ] Fix EXAMPLE-7 soon");
    assert!(item.token(TokenKind::Link).is_none());
}
