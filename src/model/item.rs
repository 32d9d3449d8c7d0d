// File: src/model/item.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::EnumIter;

/// Status of a task item, derived from the character inside its `[c]` marker.
///
/// `[-]` is deliberately absent: a `-` inside brackets means "not a task" and
/// such lines parse as notes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, EnumIter)]
pub enum TaskStatus {
    Incomplete,
    Completed,
    InProgress,
    Important,
    Question,
}

impl TaskStatus {
    /// The character written inside the brackets for this status.
    pub fn to_char(self) -> char {
        match self {
            TaskStatus::Incomplete => ' ',
            TaskStatus::Completed => 'x',
            TaskStatus::InProgress => '/',
            TaskStatus::Important => '*',
            TaskStatus::Question => '?',
        }
    }

    /// Maps a marker character back to a status. Unknown characters fall back
    /// to `Incomplete`; the parser's marker alphabet makes that unreachable
    /// in practice.
    pub fn from_char(c: char) -> Self {
        match c {
            'x' => TaskStatus::Completed,
            '/' => TaskStatus::InProgress,
            '*' => TaskStatus::Important,
            '?' => TaskStatus::Question,
            _ => TaskStatus::Incomplete,
        }
    }

    /// Sort weight: most actionable first, done last.
    pub(crate) fn weight(self) -> u32 {
        match self {
            TaskStatus::Important => 10_000,
            TaskStatus::InProgress => 1_000,
            TaskStatus::Incomplete => 100,
            TaskStatus::Question => 10,
            TaskStatus::Completed => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Task,
    Note,
    Heading,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    HeadingMarker,
    Status,
    DueDate,
    Tag,
    Link,
    Text,
}

/// A classified, positioned substring of a line.
///
/// `raw` is the exact substring the token occupies and `start` its byte
/// offset; concatenating all of an item's `raw` values in order reproduces
/// the original line. `value` is the semantic payload: the tag name without
/// `#`, the ISO date digits, the resolved link target, or the raw text
/// itself.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub raw: String,
    pub start: usize,
}

impl Token {
    /// Byte offset just past this token.
    pub fn end(&self) -> usize {
        self.start + self.raw.len()
    }
}

/// The parsed representation of one line: a task, note, or heading.
///
/// Items are immutable value objects. Because the derived fields (`status`,
/// `due_date`, `tags`, `tokens`) are all projections of `raw`, changing one
/// in place would desync them; use the setters on
/// [`LineParser`](crate::model::LineParser), which rewrite the raw line and
/// re-parse.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The original line, verbatim, including leading whitespace.
    pub raw: String,
    pub kind: ItemKind,
    /// `Some` exactly when `kind == Task`.
    pub status: Option<TaskStatus>,
    /// The line with its type marker removed (notes keep the full line).
    pub text: String,
    /// First calendrically valid `@YYYY-MM-DD` occurrence, if any.
    pub due_date: Option<NaiveDate>,
    /// Distinct tag names in first-occurrence order.
    pub tags: Vec<String>,
    /// Ordered, gapless token decomposition of `raw`.
    pub tokens: Vec<Token>,
}

impl Item {
    /// Leading whitespace prefix of the raw line (nesting depth).
    pub fn indent(&self) -> &str {
        let trimmed = self.raw.trim_start_matches([' ', '\t']);
        &self.raw[..self.raw.len() - trimmed.len()]
    }

    /// First token of the given kind, if any.
    pub fn token(&self, kind: TokenKind) -> Option<&Token> {
        self.tokens.iter().find(|t| t.kind == kind)
    }

    /// Compares two items for a stable sort, declining to order (`Equal`)
    /// every pair it is not explicitly licensed to move:
    ///
    /// 1. Different kinds, or anything that is not a task: `Equal`. Notes,
    ///    headings, and blank lines never move.
    /// 2. Different leading whitespace: `Equal`. Tasks at different nesting
    ///    depths never move relative to each other.
    /// 3. Status weight, descending: important, in progress, incomplete,
    ///    question, completed.
    /// 4. Due date: dated before undated, earlier dates first.
    /// 5. Otherwise `Equal`, so a stable sort keeps the original order.
    ///
    /// Only suitable for sorting groups of siblings. Sorting a whole page
    /// with this alone will separate parents from their indented children;
    /// grouping by indentation is the caller's job.
    pub fn compare(&self, other: &Item) -> Ordering {
        if self.kind != other.kind || self.kind != ItemKind::Task {
            return Ordering::Equal;
        }

        if self.indent() != other.indent() {
            return Ordering::Equal;
        }

        let wa = self.status.unwrap_or(TaskStatus::Incomplete).weight();
        let wb = other.status.unwrap_or(TaskStatus::Incomplete).weight();
        if wa != wb {
            return wb.cmp(&wa);
        }

        match (&self.due_date, &other.due_date) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
