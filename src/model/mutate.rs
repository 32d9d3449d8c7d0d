// File: src/model/mutate.rs
//
// Item mutation. Setters never edit tokens in place: each one rewrites the
// minimal substring of the OLD raw line, then re-parses the result, so the
// round-trip invariant holds for the new item by construction.
use crate::model::parser::{DUE_SIGIL, HEADING_MARKER, LineParser};
use crate::model::{Item, ItemKind, TaskStatus, TokenKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static TASK_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]*)\[.\] ").unwrap());
static NOTE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]*)\[-\] ").unwrap());

impl LineParser {
    /// Returns a copy of the item with its status marker changed. A defined
    /// no-op on notes and headings, since callers routinely set status
    /// generically without checking the kind first.
    pub fn set_status(&self, item: &Item, status: TaskStatus) -> Item {
        if item.kind != ItemKind::Task {
            return item.clone();
        }
        let Some(marker) = item.token(TokenKind::Status) else {
            return item.clone();
        };
        // The marker is `[c]` with ASCII brackets, so the status char lives
        // in exactly one byte at marker.start + 1.
        let mut raw = String::with_capacity(item.raw.len());
        raw.push_str(&item.raw[..marker.start + 1]);
        raw.push(status.to_char());
        raw.push_str(&item.raw[marker.start + 2..]);
        self.parse(&raw)
    }

    /// Returns a copy of the item with its due date added, replaced, or
    /// removed (`None`).
    pub fn set_due_date(&self, item: &Item, date: Option<NaiveDate>) -> Item {
        let old = item.token(TokenKind::DueDate);
        let raw = match (old, date) {
            (None, None) => return item.clone(),
            // Append, collapsing a single trailing space so the line never
            // ends up with doubled whitespace.
            (None, Some(date)) => {
                let base = item.raw.strip_suffix(' ').unwrap_or(&item.raw);
                format!("{base} {DUE_SIGIL}{}", date.format("%Y-%m-%d"))
            }
            // Remove the token plus at most one separating whitespace char.
            (Some(marker), None) => {
                let mut start = marker.start;
                if start > 0 && matches!(item.raw.as_bytes()[start - 1], b' ' | b'\t') {
                    start -= 1;
                }
                format!("{}{}", &item.raw[..start], &item.raw[marker.end()..])
            }
            // Replace the digits in place, leaving everything around them
            // untouched.
            (Some(marker), Some(date)) => format!(
                "{}{DUE_SIGIL}{}{}",
                &item.raw[..marker.start],
                date.format("%Y-%m-%d"),
                &item.raw[marker.end()..]
            ),
        };
        self.parse(&raw)
    }

    /// Returns a copy of the item converted to another kind: the old type
    /// marker is stripped, the new one applied, and the line re-parsed.
    ///
    /// Indentation survives every conversion except into a heading, which is
    /// not indentable. Converting a task to a note strips the bracket
    /// entirely rather than writing the reserved `[-]` marker; converting a
    /// `[-] ` note to a task replaces that marker with `[ ] `.
    pub fn set_kind(&self, item: &Item, kind: ItemKind) -> Item {
        if item.kind == kind {
            return item.clone();
        }

        let stripped = match item.kind {
            ItemKind::Task => TASK_MARKER.replace(&item.raw, "$1").into_owned(),
            ItemKind::Heading => item
                .raw
                .strip_prefix(HEADING_MARKER)
                .unwrap_or(&item.raw)
                .to_string(),
            ItemKind::Note => NOTE_MARKER.replace(&item.raw, "$1").into_owned(),
        };

        let raw = match kind {
            ItemKind::Task => {
                let indent = stripped.len() - stripped.trim_start_matches([' ', '\t']).len();
                format!("{}[ ] {}", &stripped[..indent], &stripped[indent..])
            }
            ItemKind::Heading => format!("{HEADING_MARKER}{}", stripped.trim_start()),
            ItemKind::Note => stripped,
        };

        let mut next = self.parse(&raw);
        // Pin the status deterministically instead of leaning on parser
        // defaults. Guarded on the re-parsed kind so degenerate lines (a
        // bracket with no trailing space survives the strip above) cannot
        // end up with a status that contradicts their kind.
        if kind == ItemKind::Task && next.kind == ItemKind::Task {
            next.status = Some(TaskStatus::Incomplete);
        } else if kind != ItemKind::Task && next.kind != ItemKind::Task {
            next.status = None;
        }
        next
    }

    /// Applies several changes as one logical operation. The callback works
    /// against a private [`Draft`]; intermediate states never escape.
    ///
    /// ```
    /// # use bujo::model::{ItemKind, LineParser, TaskStatus};
    /// let parser = LineParser::default();
    /// let note = parser.parse("pay rent");
    /// let done = parser.mutate(&note, |draft| {
    ///     draft.set_kind(ItemKind::Task);
    ///     draft.set_status(TaskStatus::Completed);
    /// });
    /// assert_eq!(done.raw, "[x] pay rent");
    /// ```
    pub fn mutate<F>(&self, item: &Item, f: F) -> Item
    where
        F: FnOnce(&mut Draft<'_>),
    {
        let mut draft = Draft {
            parser: self,
            item: item.clone(),
        };
        f(&mut draft);
        draft.item
    }
}

/// Working copy handed to [`LineParser::mutate`] callbacks. Only the three
/// sanctioned mutations exist; anything else on an item cannot be written.
pub struct Draft<'a> {
    parser: &'a LineParser,
    item: Item,
}

impl Draft<'_> {
    pub fn set_status(&mut self, status: TaskStatus) {
        self.item = self.parser.set_status(&self.item, status);
    }

    pub fn set_due_date(&mut self, date: Option<NaiveDate>) {
        self.item = self.parser.set_due_date(&self.item, date);
    }

    pub fn set_kind(&mut self, kind: ItemKind) {
        self.item = self.parser.set_kind(&self.item, kind);
    }

    /// The current state of the working copy.
    pub fn item(&self) -> &Item {
        &self.item
    }
}
