//! Text search across journal entries
//!
//! Entries live in four folders (`daily`, `projects`, `people`, `memories`).
//! Matching is literal, per line, case-insensitive unless asked otherwise.
//! A date embedded in the file name (`YYYY-MM-DD`) drives the date filters;
//! undated files always pass them.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use journal_fs::{NormalizedPath, io};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Lines shown before and after each match
pub const CONTEXT_LINES: usize = 2;

static FILENAME_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap());

static RELATIVE_DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)([dwm])$").unwrap());

/// Kind of journal entry, derived from its top-level folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Daily,
    Project,
    People,
    Memory,
}

impl EntryType {
    pub const ALL: [EntryType; 4] = [
        EntryType::Daily,
        EntryType::Project,
        EntryType::People,
        EntryType::Memory,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Project => "project",
            Self::People => "people",
            Self::Memory => "memory",
        }
    }

    /// Folder holding entries of this type.
    pub fn folder(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Project => "projects",
            Self::People => "people",
            Self::Memory => "memories",
        }
    }

    /// Parse a comma-separated list such as `daily,project`.
    pub fn parse_list(s: &str) -> Result<Vec<EntryType>> {
        let mut types = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let entry_type = part.parse()?;
            if !types.contains(&entry_type) {
                types.push(entry_type);
            }
        }
        if types.is_empty() {
            return Err(Error::InvalidSearch {
                message: "no entry types specified".into(),
            });
        }
        Ok(types)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.id() == lower)
            .ok_or_else(|| Error::InvalidSearch {
                message: format!(
                    "invalid entry type '{s}'. Valid types: {}",
                    Self::ALL.map(|t| t.id()).join(", ")
                ),
            })
    }
}

/// What to look for and where
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    /// Empty means every type.
    pub entry_types: Vec<EntryType>,
    /// Inclusive lower bound on the file-name date.
    pub after: Option<NaiveDate>,
    /// Inclusive upper bound on the file-name date.
    pub before: Option<NaiveDate>,
    pub case_sensitive: bool,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Query for wiki-links to `reference`, e.g. `people/sarah` finds
    /// `[[people/sarah]]` and `[[people/sarah|Sarah]]`.
    pub fn for_reference(reference: &str) -> Result<Self> {
        let target = reference.trim();
        let target = target.strip_suffix(".md").unwrap_or(target);
        if target.is_empty() {
            return Err(Error::InvalidSearch {
                message: "reference cannot be empty".into(),
            });
        }
        Ok(Self::new(format!("[[{target}")))
    }

    fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(Error::InvalidSearch {
                message: "search text cannot be empty".into(),
            });
        }
        match (self.after, self.before) {
            (Some(after), Some(before)) if after > before => Err(Error::InvalidSearch {
                message: format!("--after ({after}) cannot be later than --before ({before})"),
            }),
            _ => Ok(()),
        }
    }

    fn types(&self) -> &[EntryType] {
        if self.entry_types.is_empty() {
            &EntryType::ALL
        } else {
            &self.entry_types
        }
    }

    fn admits(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            return true;
        };
        self.after.is_none_or(|after| date >= after) && self.before.is_none_or(|before| date <= before)
    }

    fn is_full(&self, found: usize) -> bool {
        self.limit.is_some_and(|limit| found >= limit)
    }
}

/// One matching line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Path relative to the journal root, `/`-separated.
    pub relative_path: String,
    pub entry_type: EntryType,
    pub entry_date: Option<NaiveDate>,
    /// 1-based
    pub line_number: usize,
    pub line: String,
    pub context_before: Vec<String>,
    pub context_after: Vec<String>,
}

/// Outcome of a search
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub files_scanned: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of distinct files with at least one hit.
    pub fn files_matched(&self) -> usize {
        let mut paths: Vec<&str> = self.hits.iter().map(|h| h.relative_path.as_str()).collect();
        paths.dedup();
        paths.len()
    }

    /// Render as a standalone markdown report.
    pub fn to_markdown(&self, query: &SearchQuery) -> String {
        let mut out = String::from("# Search Results\n\n");
        out.push_str(&format!("**Query**: \"{}\"\n", query.text));

        let mut filters = Vec::new();
        if let Some(after) = query.after {
            filters.push(format!("After {after}"));
        }
        if let Some(before) = query.before {
            filters.push(format!("Before {before}"));
        }
        if !query.entry_types.is_empty() && query.entry_types.len() < EntryType::ALL.len() {
            let types: Vec<_> = query.entry_types.iter().map(|t| t.id()).collect();
            filters.push(format!("Types: {}", types.join(", ")));
        }
        if !filters.is_empty() {
            out.push_str(&format!("**Filters**: {}\n", filters.join(", ")));
        }
        out.push_str(&format!(
            "**Results**: {} matches in {} files\n\n---\n",
            self.hits.len(),
            self.files_matched()
        ));

        for hit in &self.hits {
            let date = hit
                .entry_date
                .map_or_else(|| "Undated".to_string(), |d| d.to_string());
            out.push_str(&format!(
                "\n## {} (Line {})\n\n**Date**: {}\n\n```markdown\n",
                hit.relative_path, hit.line_number, date
            ));
            for line in hit
                .context_before
                .iter()
                .chain(std::iter::once(&hit.line))
                .chain(&hit.context_after)
            {
                out.push_str(line);
                out.push('\n');
            }
            out.push_str("```\n\n---\n");
        }
        out
    }
}

/// Date embedded in a file name, if any and if it is a real calendar date.
pub fn filename_date(file_name: &str) -> Option<NaiveDate> {
    let caps = FILENAME_DATE.captures(file_name)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `YYYY-MM-DD` or a relative `Nd`, `Nw`, `Nm` (30-day months)
/// counted back from `today`.
pub fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate> {
    let invalid = || Error::InvalidDate {
        value: value.to_string(),
    };
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    let caps = RELATIVE_DATE.captures(value).ok_or_else(invalid)?;
    let amount: u64 = caps[1].parse().map_err(|_| invalid())?;
    let per_unit = match &caps[2] {
        "d" => 1,
        "w" => 7,
        _ => 30,
    };
    let days = amount.checked_mul(per_unit).ok_or_else(invalid)?;
    today.checked_sub_days(Days::new(days)).ok_or_else(invalid)
}

/// Search the journal at `root`.
///
/// Folders are visited in [`EntryType::ALL`] order and files in name order,
/// so results are stable. Stops once `limit` hits are collected.
pub fn search(root: &NormalizedPath, query: &SearchQuery) -> Result<SearchResults> {
    query.validate()?;
    if !root.is_dir() {
        return Err(Error::JournalNotFound {
            path: root.to_native(),
        });
    }

    let matcher = RegexBuilder::new(&regex::escape(&query.text))
        .case_insensitive(!query.case_sensitive)
        .build()
        .map_err(|e| Error::InvalidSearch { message: e.to_string() })?;

    let mut results = SearchResults::default();
    'types: for entry_type in query.types() {
        let folder = root.join(entry_type.folder());
        if !folder.is_dir() {
            continue;
        }
        let files = WalkDir::new(folder.to_native())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "md"));

        for file in files {
            if query.is_full(results.hits.len()) {
                break 'types;
            }
            let path = NormalizedPath::new(file.path());
            let Some(relative_path) = path.relative_to(root) else {
                continue;
            };
            let entry_date = filename_date(&file.file_name().to_string_lossy());
            if !query.admits(entry_date) {
                continue;
            }

            let bytes = match io::read_bytes(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::warn!(path = %path, error = %err, "Skipping unreadable entry");
                    continue;
                }
            };
            results.files_scanned += 1;

            let content = String::from_utf8_lossy(&bytes);
            let lines: Vec<&str> = content.lines().collect();
            for (idx, line) in lines.iter().enumerate() {
                if !matcher.is_match(line) {
                    continue;
                }
                let start = idx.saturating_sub(CONTEXT_LINES);
                let end = (idx + 1 + CONTEXT_LINES).min(lines.len());
                results.hits.push(SearchHit {
                    relative_path: relative_path.clone(),
                    entry_type: *entry_type,
                    entry_date,
                    line_number: idx + 1,
                    line: line.to_string(),
                    context_before: lines[start..idx].iter().map(|l| l.to_string()).collect(),
                    context_after: lines[idx + 1..end].iter().map(|l| l.to_string()).collect(),
                });
                if query.is_full(results.hits.len()) {
                    break 'types;
                }
            }
        }
    }

    tracing::debug!(
        journal = %root,
        hits = results.hits.len(),
        files = results.files_scanned,
        "Search complete"
    );
    Ok(results)
}
