//! Segmentation: splits the experience and projects blocks into entries.
//!
//! Both blocks run through the same three phases, configured by a `BlockGrammar`:
//!
//! 1. **Anchor.** The first short line (< 5 tokens) matching a heading of the block's section.
//!    No anchor means no block, and an empty entry list.
//! 2. **Bound.** Lines after the anchor up to, not including, the first line that looks like
//!    a heading of another section: shorter than 40 characters, matches a stop pattern, and is
//!    either all upper-case or has fewer than 4 tokens. Without a stop line the block runs
//!    to the end of the document.
//! 3. **Parse.** A single pass with one open entry at most. Entries are committed when the
//!    next entry starts or the block ends. There is no lookahead and no backtracking.
//!
//! Segmentation never fails. Odd layouts produce fewer or partial entries.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::matcher::{any_token, token_patterns, TokenPattern};
use crate::analysis::sections::Section;

/// One experience or project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub details: Vec<String>,
}

impl Entry {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            details: Vec::new(),
        }
    }
}

const BULLETS: &[char] = &['•', '-', '●', '▪', '*', '➢', '✓'];

const ANCHOR_MAX_TOKENS: usize = 5;
const STOP_MAX_CHARS: usize = 40;
const STOP_MAX_TOKENS: usize = 4;
const SHORT_TITLE_MAX_TOKENS: usize = 5;

/// How a non-bullet line that does not start an entry is attached to the open entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Joined onto the title with ` | ` until the entry has a detail, then onto the last detail.
    ExtendTitle,
    /// Joined onto the last detail; becomes the first detail when there is none yet.
    ExtendLastDetail,
}

/// Configuration for one anchor → bound → parse pass.
pub struct BlockGrammar {
    /// The block is anchored on a heading of this section.
    pub section: Section,
    pub stop_headers: Vec<TokenPattern>,
    /// `(line, entry_open)`. Only consulted for non-bullet lines.
    pub starts_entry: fn(&str, bool) -> bool,
    pub continuation: Continuation,
}

// ────────────────────────────────────────────────────────────────────────────
// Grammars
// ────────────────────────────────────────────────────────────────────────────

static JOB_TITLE_KEYWORDS: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "analyst",
        "intern",
        "developer",
        "engineer",
        "manager",
        "lead",
        "internship",
        "consultant",
        "specialist",
        "coordinator",
        "officer",
        "associate",
        "trainee",
    ])
});

static FORBIDDEN_PROJECT_TITLES: Lazy<Vec<TokenPattern>> = Lazy::new(|| {
    token_patterns(&[
        "technical",
        "skills",
        "core",
        "certifications",
        "education",
        "summary",
        "awards",
    ])
});

static MONTH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[\s,]*\d{2,4}\s*[-–—to]+\s*(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec|present|current|now)[a-z]*[\s,]*\d{0,4}",
    )
    .expect("month range pattern is valid")
});

static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b20\d{2}\s*[-–—to]+\s*(?:20\d{2}|present|current|now)\b")
        .expect("year range pattern is valid")
});

/// Headings of every other canonical section, plus `extra` headings that have no section
/// of their own.
fn stop_headers(own: Section, extra: &[&str]) -> Vec<TokenPattern> {
    Section::ALL
        .iter()
        .filter(|s| **s != own)
        .flat_map(|s| s.patterns().iter().cloned())
        .chain(token_patterns(extra))
        .collect()
}

static EXPERIENCE_GRAMMAR: Lazy<BlockGrammar> = Lazy::new(|| BlockGrammar {
    section: Section::Experience,
    stop_headers: stop_headers(Section::Experience, &["awards", "references"]),
    starts_entry: starts_experience_entry,
    continuation: Continuation::ExtendTitle,
});

static PROJECTS_GRAMMAR: Lazy<BlockGrammar> = Lazy::new(|| BlockGrammar {
    section: Section::Projects,
    stop_headers: stop_headers(Section::Projects, &["awards", "references", "work"]),
    starts_entry: starts_project_entry,
    continuation: Continuation::ExtendLastDetail,
});

/// A job-title keyword, or a date range while no entry is open.
fn starts_experience_entry(line: &str, entry_open: bool) -> bool {
    any_token(&JOB_TITLE_KEYWORDS, line) || (!entry_open && has_date_range(line))
}

/// A `|`-separated line, unless it is a short stray section label.
fn starts_project_entry(line: &str, _entry_open: bool) -> bool {
    if !line.contains('|') {
        return false;
    }
    let short = token_count(line) < SHORT_TITLE_MAX_TOKENS;
    !(short && any_token(&FORBIDDEN_PROJECT_TITLES, line))
}

fn has_date_range(line: &str) -> bool {
    MONTH_RANGE.is_match(line) || YEAR_RANGE.is_match(line)
}

// ────────────────────────────────────────────────────────────────────────────
// Line helpers
// ────────────────────────────────────────────────────────────────────────────

/// Trimmed, non-empty lines in reading order.
pub fn clean_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

fn token_count(line: &str) -> usize {
    line.split_whitespace().count()
}

fn is_bullet(line: &str) -> bool {
    line.starts_with(BULLETS)
}

fn strip_bullet(line: &str) -> &str {
    line.trim_start_matches(|c: char| BULLETS.contains(&c) || c.is_whitespace())
        .trim_end()
}

/// At least one cased character and no lower-case ones.
fn is_all_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

fn is_anchor(line: &str, grammar: &BlockGrammar) -> bool {
    token_count(line) < ANCHOR_MAX_TOKENS && any_token(grammar.section.patterns(), line)
}

fn is_stop(line: &str, grammar: &BlockGrammar) -> bool {
    line.chars().count() < STOP_MAX_CHARS
        && any_token(&grammar.stop_headers, line)
        && (is_all_upper(line) || token_count(line) < STOP_MAX_TOKENS)
}

fn bound_block<'a, 'b>(lines: &'a [&'b str], grammar: &BlockGrammar) -> &'a [&'b str] {
    let end = lines
        .iter()
        .position(|l| is_stop(l, grammar))
        .unwrap_or(lines.len());
    &lines[..end]
}

fn parse_entries(block: &[&str], grammar: &BlockGrammar) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut current: Option<Entry> = None;

    for &line in block {
        let bullet = is_bullet(line);

        if !bullet && (grammar.starts_entry)(line, current.is_some()) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(Entry::new(line));
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if bullet {
            let detail = strip_bullet(line);
            if !detail.is_empty() {
                entry.details.push(detail.to_string());
            }
            continue;
        }

        match (entry.details.last_mut(), grammar.continuation) {
            (Some(last), _) => {
                last.push(' ');
                last.push_str(line);
            }
            (None, Continuation::ExtendTitle) => {
                entry.title.push_str(" | ");
                entry.title.push_str(line);
            }
            (None, Continuation::ExtendLastDetail) => entry.details.push(line.to_string()),
        }
    }

    if let Some(done) = current {
        entries.push(done);
    }
    entries
}

/// Runs the anchor → bound → parse pass for one block over pre-cleaned lines.
pub fn segment_block(lines: &[&str], grammar: &BlockGrammar) -> Vec<Entry> {
    let Some(anchor) = lines.iter().position(|l| is_anchor(l, grammar)) else {
        return Vec::new();
    };
    let block = bound_block(&lines[anchor + 1..], grammar);
    parse_entries(block, grammar)
}

pub fn segment_experience(lines: &[&str]) -> Vec<Entry> {
    segment_block(lines, &EXPERIENCE_GRAMMAR)
}

pub fn segment_projects(lines: &[&str]) -> Vec<Entry> {
    segment_block(lines, &PROJECTS_GRAMMAR)
}
