// File: src/cache.rs
//
// Memoization layer for repeated line parses. Editors re-parse every line on
// every keystroke; caching by raw line makes that cheap. The cache is purely
// a performance layer: outputs are identical with or without it.
//
// Swapping the rule set can change what any line parses to, so `set_rules`
// bumps a version counter and drops every memoized entry.
use crate::config::AutoLinkRule;
use crate::model::{Item, LineParser};
use std::collections::HashMap;

pub struct ParseCache {
    parser: LineParser,
    version: u64,
    memo: HashMap<String, Item>,
}

impl ParseCache {
    pub fn new() -> Self {
        Self::with_rules(&[])
    }

    pub fn with_rules(rules: &[AutoLinkRule]) -> Self {
        Self {
            parser: LineParser::new(rules),
            version: 0,
            memo: HashMap::new(),
        }
    }

    /// Replaces the active auto-link rules, invalidating the whole cache.
    pub fn set_rules(&mut self, rules: &[AutoLinkRule]) {
        self.parser = LineParser::new(rules);
        self.version += 1;
        let dropped = self.memo.len();
        self.memo.clear();
        log::debug!(
            "auto-link rules changed (v{}), dropped {dropped} memoized parses",
            self.version
        );
    }

    /// The rule-set version this cache is keyed on. Starts at 0 and
    /// increments on every `set_rules` call.
    pub fn rules_version(&self) -> u64 {
        self.version
    }

    /// Parses a line, serving a memoized clone when the same line was seen
    /// under the current rule set.
    pub fn parse(&mut self, line: &str) -> Item {
        if let Some(hit) = self.memo.get(line) {
            return hit.clone();
        }
        let item = self.parser.parse(line);
        self.memo.insert(line.to_string(), item.clone());
        item
    }

    /// The underlying parser, for mutation calls that should share this
    /// cache's rule set.
    pub fn parser(&self) -> &LineParser {
        &self.parser
    }

    pub fn len(&self) -> usize {
        self.memo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}

impl Default for ParseCache {
    fn default() -> Self {
        Self::new()
    }
}
