// File: src/model/parser.rs
//
// Tokenizer for single lines of bullet-journal notation:
//
// [ ] Incomplete task      [x] Completed       [/] In progress
// [*] Important            [?] Question        [-] Note (not a task)
//
// Lines starting with `# ` are headings. Anything else is a note. Any line
// can carry tags (`#tag`), one due date (`@2021-01-01`), bare links
// (`https://...`), and matches of caller-configured auto-link rules.
//
// The scan is lossless: every byte of the input ends up in exactly one
// token, so concatenating the tokens' raw text reproduces the line.
use crate::config::AutoLinkRule;
use crate::model::{Item, ItemKind, TaskStatus, Token, TokenKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Sigil introducing a due date, as in `@2021-01-01`.
pub const DUE_SIGIL: char = '@';

pub(crate) const HEADING_MARKER: &str = "# ";

// Status markers only count when nothing but indentation precedes them.
static STATUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ \t]*(\[[ x/*?]\])").unwrap());

static DUE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\d{4}-\d{2}-\d{2}").unwrap());
// Tag names are ASCII letters, digits, and underscore only.
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"#[0-9A-Za-z_]+").unwrap());
static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

struct CompiledRule {
    pattern: Regex,
    target: String,
}

impl CompiledRule {
    /// Expands the rule's target template (`$1`, `${name}`, ...) against its
    /// own capture groups. The matched text itself is the fallback when the
    /// pattern somehow no longer matches the slice it produced.
    fn resolve(&self, raw: &str) -> String {
        match self.pattern.captures(raw) {
            Some(caps) => {
                let mut out = String::new();
                caps.expand(&self.target, &mut out);
                out
            }
            None => raw.to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum MatchKind {
    DueDate,
    Tag,
    Url,
    Rule(usize),
}

struct InlineMatch {
    start: usize,
    end: usize,
    /// Tie-break for matches starting at the same position: built-ins first,
    /// then auto-link rules in configuration order.
    precedence: usize,
    kind: MatchKind,
}

/// Parser for single lines, carrying the compiled auto-link rule set.
///
/// Construction compiles each rule's pattern once; `parse` is then a pure
/// function of the line. Cheap to share behind a reference; see
/// [`ParseCache`](crate::cache::ParseCache) for the memoized variant.
pub struct LineParser {
    rules: Vec<CompiledRule>,
}

impl LineParser {
    /// Builds a parser from the caller's auto-link rules. A rule whose
    /// pattern does not compile is skipped with a warning; rules are user
    /// settings, and a bad one must not take line parsing down with it.
    pub fn new(rules: &[AutoLinkRule]) -> Self {
        let rules = rules
            .iter()
            .filter_map(|rule| match Regex::new(&rule.pattern) {
                Ok(pattern) => Some(CompiledRule {
                    pattern,
                    target: rule.target.clone(),
                }),
                Err(err) => {
                    log::warn!("skipping auto-link rule {:?}: {err}", rule.pattern);
                    None
                }
            })
            .collect();
        Self { rules }
    }

    /// Number of rules that actually compiled.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Parses one line into an [`Item`]. Total: malformed constructs degrade
    /// to `Text` tokens, never an error.
    pub fn parse(&self, line: &str) -> Item {
        let mut kind = ItemKind::Note;
        let mut status = None;
        let mut text = line.to_string();
        let mut tokens: Vec<Token> = Vec::new();
        let mut content_start = 0;

        // Heading beats status; both can only anchor at the start of content
        // and a line cannot begin with `# ` and `[c]` at once.
        if line.starts_with(HEADING_MARKER) {
            kind = ItemKind::Heading;
            text = line[HEADING_MARKER.len()..].to_string();
            tokens.push(Token {
                kind: TokenKind::HeadingMarker,
                value: HEADING_MARKER.to_string(),
                raw: HEADING_MARKER.to_string(),
                start: 0,
            });
            content_start = HEADING_MARKER.len();
        } else if let Some(m) = STATUS.captures(line).and_then(|c| c.get(1)) {
            kind = ItemKind::Task;
            // Marker is pure ASCII: `[`, the status char, `]`.
            let c = m.as_str().as_bytes()[1] as char;
            status = Some(TaskStatus::from_char(c));
            text = format!("{}{}", &line[..m.start()], &line[m.end()..]);
            tokens.push(Token {
                kind: TokenKind::Status,
                value: c.to_string(),
                raw: m.as_str().to_string(),
                start: m.start(),
            });
            content_start = m.end();
        }

        let rest = &line[content_start..];
        let mut matches: Vec<InlineMatch> = Vec::new();
        for m in DUE_DATE.find_iter(rest) {
            matches.push(InlineMatch {
                start: m.start(),
                end: m.end(),
                precedence: 0,
                kind: MatchKind::DueDate,
            });
        }
        for m in TAG.find_iter(rest) {
            matches.push(InlineMatch {
                start: m.start(),
                end: m.end(),
                precedence: 1,
                kind: MatchKind::Tag,
            });
        }
        for m in URL.find_iter(rest) {
            matches.push(InlineMatch {
                start: m.start(),
                end: m.end(),
                precedence: 2,
                kind: MatchKind::Url,
            });
        }
        for (i, rule) in self.rules.iter().enumerate() {
            for m in rule.pattern.find_iter(rest) {
                matches.push(InlineMatch {
                    start: m.start(),
                    end: m.end(),
                    precedence: 3 + i,
                    kind: MatchKind::Rule(i),
                });
            }
        }
        matches.sort_by(|a, b| a.start.cmp(&b.start).then(a.precedence.cmp(&b.precedence)));

        let mut due_date = None;
        let mut tags: Vec<String> = Vec::new();
        let mut cursor = 0;
        for m in matches {
            if m.start < cursor {
                // Overlaps a match that started earlier.
                continue;
            }
            let raw = &rest[m.start..m.end];
            let start = content_start + m.start;
            let token = match m.kind {
                MatchKind::DueDate => {
                    let digits = &raw[DUE_SIGIL.len_utf8()..];
                    match NaiveDate::parse_from_str(digits, "%Y-%m-%d") {
                        Ok(date) if due_date.is_none() => {
                            due_date = Some(date);
                            Token {
                                kind: TokenKind::DueDate,
                                value: digits.to_string(),
                                raw: raw.to_string(),
                                start,
                            }
                        }
                        // Calendrically invalid dates, and every date after
                        // the first valid one, stay plain text.
                        _ => Token {
                            kind: TokenKind::Text,
                            value: raw.to_string(),
                            raw: raw.to_string(),
                            start,
                        },
                    }
                }
                MatchKind::Tag => {
                    let name = &raw[1..];
                    if !tags.iter().any(|t| t == name) {
                        tags.push(name.to_string());
                    }
                    Token {
                        kind: TokenKind::Tag,
                        value: name.to_string(),
                        raw: raw.to_string(),
                        start,
                    }
                }
                MatchKind::Url => Token {
                    kind: TokenKind::Link,
                    value: raw.to_string(),
                    raw: raw.to_string(),
                    start,
                },
                MatchKind::Rule(i) => Token {
                    kind: TokenKind::Link,
                    value: self.rules[i].resolve(raw),
                    raw: raw.to_string(),
                    start,
                },
            };
            cursor = m.end;
            tokens.push(token);
        }

        let tokens = fill_text_tokens(line, tokens);

        Item {
            raw: line.to_string(),
            kind,
            status,
            text,
            due_date,
            tags,
            tokens,
        }
    }
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new(&[])
    }
}

/// Reconstructs the line an item was parsed from: the concatenation of all
/// tokens' raw text in order. For any parsed item this equals `item.raw`.
pub fn stringify(item: &Item) -> String {
    item.tokens.iter().map(|t| t.raw.as_str()).collect()
}

/// Fills the gaps between matched tokens with `Text` tokens so the sequence
/// covers the whole line. A line with no matches (the empty line included)
/// becomes a single `Text` token.
fn fill_text_tokens(line: &str, matched: Vec<Token>) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(matched.len() * 2 + 1);
    let mut cursor = 0;
    for token in matched {
        if token.start > cursor {
            tokens.push(text_token(line, cursor, token.start));
        }
        cursor = token.end();
        tokens.push(token);
    }
    if cursor < line.len() || tokens.is_empty() {
        tokens.push(text_token(line, cursor, line.len()));
    }
    tokens
}

fn text_token(line: &str, start: usize, end: usize) -> Token {
    let raw = line[start..end].to_string();
    Token {
        kind: TokenKind::Text,
        value: raw.clone(),
        raw,
        start,
    }
}
