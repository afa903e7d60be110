//! Library export ingest
//!
//! Reads a Playnite-style CSV export into [`LibraryEntry`] records.
//!
//! **Cleaning, in order:**
//! 1. Strip platform tags (" (Xbox)", " (Game Pass)", " (Switch)",
//!    " (PlayStation)") from names
//! 2. Drop rows whose categories mention "Apps"
//! 3. Drop rows without a completion status
//! 4. Drop duplicates on (name, release date), first row wins
//! 5. Drop rows whose categories mention "Ignore"
//!
//! Rows with a blank id or name are rejected individually and reported in
//! [`LibraryLoad::rejected`]; they never abort the load.

use crate::error::{InputError, LibraryError};
use crate::services::normalizer::Normalizer;
use crate::types::{CompletionStatus, LibraryEntry};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Platform tags removed from library names
pub const PLATFORM_TAGS: &[&str] = &[" (Xbox)", " (Game Pass)", " (Switch)", " (PlayStation)"];

const COL_ID: &str = "Id";
const COL_NAME: &str = "Name";
const COL_HIDDEN: &str = "Hidden";
const COL_CATEGORIES: &str = "Categories";
const COL_COMPLETION: &str = "CompletionStatus";
const COL_RELEASE: &str = "ReleaseDate";

/// Outcome of loading a library export
#[derive(Debug, Clone, Default)]
pub struct LibraryLoad {
    /// Entries that survived cleaning, in file order
    pub entries: Vec<LibraryEntry>,
    /// Rows that could not become entries
    pub rejected: Vec<InputError>,
    /// Rows removed by the cleaning rules
    pub excluded: usize,
}

/// Load a library export from `path`
pub fn load_library_csv(path: &Path, normalizer: &Normalizer) -> Result<LibraryLoad, LibraryError> {
    let file = std::fs::File::open(path)?;
    let load = parse_library_csv(file, normalizer)?;

    tracing::info!(
        path = %path.display(),
        entries = load.entries.len(),
        excluded = load.excluded,
        rejected = load.rejected.len(),
        "Loaded library export"
    );

    Ok(load)
}

/// Parse a library export from any reader
///
/// The header row is located among the first two lines, so an export
/// with a leading title line parses the same as one without.
pub fn parse_library_csv<R: Read>(reader: R, normalizer: &Normalizer) -> Result<LibraryLoad, LibraryError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = reader.records();

    let mut headers: Option<Vec<String>> = None;
    for _ in 0..2 {
        match records.next() {
            Some(record) => {
                let record = record?;
                let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
                if fields.iter().any(|f| f == COL_ID) && fields.iter().any(|f| f == COL_NAME) {
                    headers = Some(fields);
                    break;
                }
            }
            None => break,
        }
    }

    let headers = headers.ok_or_else(|| LibraryError::MissingColumn(COL_ID.to_string()))?;

    let idx = |name: &str| -> Result<usize, LibraryError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LibraryError::MissingColumn(name.to_string()))
    };
    let id_idx = idx(COL_ID)?;
    let name_idx = idx(COL_NAME)?;
    let hidden_idx = idx(COL_HIDDEN).ok();
    let categories_idx = idx(COL_CATEGORIES).ok();
    let completion_idx = idx(COL_COMPLETION).ok();
    let release_idx = idx(COL_RELEASE).ok();

    let mut load = LibraryLoad::default();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for record in records {
        let record = record?;
        let field = |index: Option<usize>| field_at(&record, index);

        let id = field(Some(id_idx));
        let name = strip_platform_tags(field(Some(name_idx)));
        let categories = field(categories_idx);
        let completion = field(completion_idx);
        let release_date = field(release_idx);

        if categories.contains("Apps") {
            tracing::debug!(id, name = %name, "Excluding app");
            load.excluded += 1;
            continue;
        }

        if completion.is_empty() {
            tracing::debug!(id, name = %name, "Excluding entry without completion status");
            load.excluded += 1;
            continue;
        }

        if !seen.insert((name.clone(), release_date.to_string())) {
            tracing::debug!(id, name = %name, release_date, "Excluding duplicate");
            load.excluded += 1;
            continue;
        }

        if categories.contains("Ignore") {
            tracing::debug!(id, name = %name, "Excluding ignored entry");
            load.excluded += 1;
            continue;
        }

        let entry = match LibraryEntry::new(id, name.as_str(), normalizer) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "Rejecting library row");
                load.rejected.push(err);
                continue;
            }
        };

        let hidden = match parse_flag(field(hidden_idx)) {
            Some(hidden) => hidden,
            None => {
                let err = InputError::InvalidField {
                    id: entry.id.clone(),
                    field: COL_HIDDEN,
                    value: field(hidden_idx).to_string(),
                };
                tracing::warn!(error = %err, "Rejecting library row");
                load.rejected.push(err);
                continue;
            }
        };

        let completion_status = completion
            .parse::<CompletionStatus>()
            .unwrap_or_default();
        let is_dlc = categories.contains("DLC") || categories.contains("Expansion");

        load.entries.push(
            entry
                .with_release_year(release_year(release_date))
                .with_hidden(hidden)
                .with_dlc(is_dlc)
                .with_completion_status(completion_status),
        );
    }

    Ok(load)
}

fn field_at(record: &csv::StringRecord, index: Option<usize>) -> &str {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .unwrap_or("")
}

/// Remove every platform tag from `name`
pub fn strip_platform_tags(name: &str) -> String {
    PLATFORM_TAGS
        .iter()
        .fold(name.to_string(), |acc, tag| acc.replace(tag, ""))
}

/// Year from a date string starting `YYYY`
pub fn release_year(date: &str) -> Option<i32> {
    let prefix = date.trim().get(..4)?;
    if prefix.chars().all(|c| c.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

/// Boolean column; blank counts as false
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" => Some(false),
        "true" | "1" | "yes" => Some(true),
        _ => None,
    }
}
