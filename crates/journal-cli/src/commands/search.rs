//! Search command implementation

use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use journal_core::{EntryType, SearchQuery, SearchResults, parse_date, search};
use journal_fs::{NormalizedPath, io};

use crate::context::Context;
use crate::error::{CliError, Result};

/// Search arguments as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SearchArgs {
    pub query: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub types: Option<String>,
    pub reference: Option<String>,
    pub export: Option<PathBuf>,
    pub case_sensitive: bool,
    pub limit: Option<usize>,
}

impl SearchArgs {
    fn into_query(self) -> Result<SearchQuery> {
        let mut query = match (self.reference, self.query) {
            (Some(reference), _) => SearchQuery::for_reference(&reference)?,
            (None, Some(text)) => SearchQuery::new(text),
            (None, None) => {
                return Err(CliError::user("Give search text or --ref <note>"));
            }
        };

        let today = Local::now().date_naive();
        query.after = self.after.map(|s| parse_date(&s, today)).transpose()?;
        query.before = self.before.map(|s| parse_date(&s, today)).transpose()?;
        if let Some(types) = self.types {
            query.entry_types = EntryType::parse_list(&types)?;
        }
        query.case_sensitive = self.case_sensitive;
        query.limit = self.limit;
        Ok(query)
    }
}

fn print_results(query: &SearchQuery, results: &SearchResults) {
    println!("{} {}", "Search:".cyan().bold(), query.text);

    let mut filters = Vec::new();
    if let Some(after) = query.after {
        filters.push(format!("After: {after}"));
    }
    if let Some(before) = query.before {
        filters.push(format!("Before: {before}"));
    }
    if !query.entry_types.is_empty() {
        let types: Vec<_> = query.entry_types.iter().map(|t| t.id()).collect();
        filters.push(format!("Types: {}", types.join(", ")));
    }
    if query.case_sensitive {
        filters.push("Case-sensitive".to_string());
    }
    if let Some(limit) = query.limit {
        filters.push(format!("Limit: {limit}"));
    }
    if !filters.is_empty() {
        println!("{}", format!("Filters: {}", filters.join(" | ")).dimmed());
    }

    if results.is_empty() {
        println!(
            "{} No results found ({} file(s) scanned)",
            "=>".yellow().bold(),
            results.files_scanned
        );
        return;
    }
    println!(
        "{} Found {} result(s) in {} file(s)",
        "OK".green().bold(),
        results.hits.len(),
        results.files_matched()
    );

    for hit in &results.hits {
        println!();
        let date = hit.entry_date.map(|d| format!(" {d}")).unwrap_or_default();
        println!(
            "{}:{} [{}{}]",
            hit.relative_path.cyan(),
            hit.line_number,
            hit.entry_type,
            date
        );
        for line in &hit.context_before {
            println!("   {}", line.dimmed());
        }
        println!(" > {}", hit.line.bold());
        for line in &hit.context_after {
            println!("   {}", line.dimmed());
        }
    }
}

fn export(path: &Path, query: &SearchQuery, results: &SearchResults) -> Result<()> {
    io::write_atomic(&NormalizedPath::new(path), results.to_markdown(query).as_bytes())?;
    println!(
        "{} Results exported to {}",
        "OK".green().bold(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Run the search command
pub fn run_search(ctx: &Context, args: SearchArgs) -> Result<()> {
    let (_, profile) = ctx.active()?;
    let export_path = args.export.clone();
    let query = args.into_query()?;

    let results = search(&profile.root(), &query)?;
    print_results(&query, &results);

    if let Some(path) = export_path {
        export(&path, &query, &results)?;
    }
    Ok(())
}
