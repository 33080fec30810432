//! The todo.txt line grammar
//!
//! Every pattern here is anchored or scanned against plain text; nothing in
//! this module fails on arbitrary input. Stages that do not match leave the
//! text untouched so it falls through into the description.

use chrono::NaiveDate;
use regex::{Match, Regex};
use std::ops::Range;
use std::sync::LazyLock;

/// ISO date format used for both completion and creation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static COMPLETED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^x\s+").unwrap());
static PRIORITY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\(([A-Z]+)\)").unwrap());
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]{4}-[0-9]{2}-[0-9]{2})").unwrap());

static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\s+|^)\+(\S+)").unwrap());
static CONTEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\s+|^)@(\S+)").unwrap());
static KEYVALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s+|^)(\S+):([^\s$]+)").unwrap());
static KEYVALUE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+):([^\s$]+)").unwrap());

/// Parse an ISO `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
}

/// Format a date the way todo.txt stores it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Strip the `x ` completion marker. Returns the remainder when present.
pub(crate) fn strip_completion(line: &str) -> Option<&str> {
    COMPLETED_RE.find(line).map(|m| &line[m.end()..])
}

/// Strip a leading `(A)` priority.
pub(crate) fn strip_priority(line: &str) -> (Option<&str>, &str) {
    match PRIORITY_RE.captures(line) {
        Some(caps) => match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(letters)) => (Some(letters.as_str()), &line[whole.end()..]),
            _ => (None, line),
        },
        None => (None, line),
    }
}

/// Strip a leading ISO date.
///
/// A date-shaped prefix that is not a real calendar date (`2020-13-45`) is
/// not consumed.
pub(crate) fn strip_date(line: &str) -> (Option<NaiveDate>, &str) {
    let Some(caps) = DATE_RE.captures(line) else {
        return (None, line);
    };
    let (Some(whole), Some(text)) = (caps.get(0), caps.get(1)) else {
        return (None, line);
    };
    match parse_date(text.as_str()) {
        Ok(date) => (Some(date), &line[whole.end()..]),
        Err(_) => (None, line),
    }
}

/// The two single-name tag kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `+project`
    Project,
    /// `@context`
    Context,
}

impl TagKind {
    pub fn sigil(self) -> char {
        match self {
            Self::Project => '+',
            Self::Context => '@',
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Project => &PROJECT_RE,
            Self::Context => &CONTEXT_RE,
        }
    }
}

/// One `+name` / `@name` occurrence.
#[derive(Debug, Clone)]
pub(crate) struct TagMatch<'h> {
    /// The whole match, including the leading separator.
    pub span: Range<usize>,
    pub name: Match<'h>,
}

/// One `key:value` occurrence.
#[derive(Debug, Clone)]
pub(crate) struct KeyValueMatch<'h> {
    /// The whole match, including the leading separator.
    pub span: Range<usize>,
    pub key: Match<'h>,
    pub value: Match<'h>,
}

pub(crate) fn tag_matches(kind: TagKind, text: &str) -> impl Iterator<Item = TagMatch<'_>> {
    kind.regex().captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(TagMatch {
            span: whole.range(),
            name: caps.get(2)?,
        })
    })
}

pub(crate) fn keyvalue_matches(text: &str) -> impl Iterator<Item = KeyValueMatch<'_>> {
    KEYVALUE_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(KeyValueMatch {
            span: whole.range(),
            key: caps.get(2)?,
            value: caps.get(3)?,
        })
    })
}

/// Whether a single whitespace-free word starts like a `key:value` tag.
pub(crate) fn is_keyvalue_token(word: &str) -> bool {
    KEYVALUE_TOKEN_RE.is_match(word)
}

/// The scheme part of a key, i.e. everything before the first colon.
///
/// `https://host:8080/` scans as key `https://host`, which must still be
/// recognised as an `https` URL.
pub(crate) fn scheme_of(key: &str) -> &str {
    key.split(':').next().unwrap_or(key)
}
