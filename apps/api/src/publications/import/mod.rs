//! Bibliography import. Turns an uploaded `.bib` or `.ris` file into
//! `NewPublication`s; records that cannot become a publication are
//! reported as skipped rather than failing the whole file.

pub mod bibtex;
pub mod ris;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::publication::{NewPublication, PublicationType};
use bibtex::{clean_tex, parse_bibtex, split_authors, BibtexEntry};
use ris::{parse_ris, RisRecord};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported bibliography format: {0}")]
    UnsupportedFormat(String),

    #[error("Bibliography file is not valid UTF-8")]
    InvalidEncoding,

    #[error("Malformed bibliography: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BibliographyFormat {
    Bibtex,
    Ris,
}

impl BibliographyFormat {
    /// Picks the format from the file extension, falling back to the first
    /// meaningful line of the contents.
    pub fn detect(file_name: &str, contents: &str) -> Result<Self, ImportError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("bib") | Some("bibtex") => return Ok(BibliographyFormat::Bibtex),
            Some("ris") => return Ok(BibliographyFormat::Ris),
            _ => {}
        }

        let first = contents
            .trim_start_matches('\u{feff}')
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();
        if first.starts_with('@') {
            Ok(BibliographyFormat::Bibtex)
        } else if first.starts_with("TY  -") {
            Ok(BibliographyFormat::Ris)
        } else {
            Err(ImportError::UnsupportedFormat(file_name.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Citation key for BibTeX, `#<n>` (1-based) for RIS.
    pub key: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub publications: Vec<NewPublication>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parses an uploaded bibliography. Fails only when the file is unreadable
/// or nothing in it parses at all.
pub fn parse_bibliography(file_name: &str, bytes: &[u8]) -> Result<ImportOutcome, ImportError> {
    let contents = std::str::from_utf8(bytes).map_err(|_| ImportError::InvalidEncoding)?;
    let format = BibliographyFormat::detect(file_name, contents)?;

    let outcome = match format {
        BibliographyFormat::Bibtex => import_bibtex(contents)?,
        BibliographyFormat::Ris => import_ris(contents)?,
    };

    info!(
        "Parsed {file_name} as {format:?}: {} importable, {} skipped",
        outcome.publications.len(),
        outcome.skipped.len()
    );
    Ok(outcome)
}

// ────────────────────────────────────────────────────────────────────────────
// BibTeX
// ────────────────────────────────────────────────────────────────────────────

fn import_bibtex(contents: &str) -> Result<ImportOutcome, ImportError> {
    let parsed = parse_bibtex(contents);
    if parsed.entries.is_empty() {
        return Err(ImportError::Malformed(match parsed.errors.first() {
            Some(first) => format!("{} at line {}", first.message, first.line),
            None => "no BibTeX entries found".to_string(),
        }));
    }
    for error in &parsed.errors {
        warn!("Skipping unparseable BibTeX at line {}: {}", error.line, error.message);
    }

    let mut outcome = ImportOutcome::default();
    for entry in &parsed.entries {
        match bibtex_to_publication(entry) {
            Ok(publication) => outcome.publications.push(publication),
            Err(reason) => outcome.skipped.push(SkippedRecord {
                key: entry.cite_key.clone(),
                reason,
            }),
        }
    }
    Ok(outcome)
}

fn bibtex_type(entry_type: &str) -> PublicationType {
    match entry_type {
        "book" | "booklet" => PublicationType::Book,
        "inbook" | "incollection" => PublicationType::Chapter,
        "inproceedings" | "conference" | "proceedings" => PublicationType::Conference,
        _ => PublicationType::Article,
    }
}

fn bibtex_to_publication(entry: &BibtexEntry) -> Result<NewPublication, String> {
    let text = |name: &str| entry.field(name).map(clean_tex).filter(|v| !v.is_empty());

    let title = text("title").ok_or("missing title")?;
    let authors = entry
        .field("author")
        .or_else(|| entry.field("editor"))
        .map(split_authors)
        .unwrap_or_default();
    if authors.is_empty() {
        return Err("missing authors".to_string());
    }
    let year = entry
        .field("year")
        .and_then(extract_year)
        .ok_or("missing or invalid year")?;

    Ok(NewPublication {
        title,
        authors,
        doi: text("doi"),
        abstract_text: text("abstract"),
        venue: text("journal")
            .or_else(|| text("booktitle"))
            .or_else(|| text("series")),
        year: Some(year),
        pub_type: bibtex_type(&entry.entry_type),
        publisher: text("publisher"),
        isbn: text("isbn"),
        ..Default::default()
    })
}

// ────────────────────────────────────────────────────────────────────────────
// RIS
// ────────────────────────────────────────────────────────────────────────────

fn import_ris(contents: &str) -> Result<ImportOutcome, ImportError> {
    let parsed = parse_ris(contents);
    if parsed.records.is_empty() {
        return Err(ImportError::Malformed("no RIS records found".to_string()));
    }
    if parsed.unterminated {
        warn!("RIS input contains a record without an ER tag");
    }

    let mut outcome = ImportOutcome::default();
    for (index, record) in parsed.records.iter().enumerate() {
        match ris_to_publication(record) {
            Ok(publication) => outcome.publications.push(publication),
            Err(reason) => outcome.skipped.push(SkippedRecord {
                key: format!("#{}", index + 1),
                reason,
            }),
        }
    }
    Ok(outcome)
}

fn ris_type(ris_type: &str) -> PublicationType {
    match ris_type {
        "BOOK" | "EBOOK" | "EDBOOK" => PublicationType::Book,
        "CHAP" | "ECHAP" => PublicationType::Chapter,
        "CONF" | "CPAPER" => PublicationType::Conference,
        _ => PublicationType::Article,
    }
}

fn ris_to_publication(record: &RisRecord) -> Result<NewPublication, String> {
    let text = |tags: &[&str]| record.first(tags).map(str::to_string);

    let title = text(&["TI", "T1"][..]).ok_or("missing title")?;
    let authors: Vec<String> = record
        .all(&["AU", "A1"])
        .into_iter()
        .map(str::to_string)
        .collect();
    if authors.is_empty() {
        return Err("missing authors".to_string());
    }
    let year = record
        .first(&["PY", "Y1", "DA"])
        .and_then(extract_year)
        .ok_or("missing or invalid year")?;

    Ok(NewPublication {
        title,
        authors,
        doi: text(&["DO"][..]),
        abstract_text: text(&["AB", "N2"][..]),
        venue: text(&["JO", "JF", "T2", "JA"][..]),
        year: Some(year),
        pub_type: ris_type(&record.ris_type),
        publisher: text(&["PB"][..]),
        isbn: text(&["SN"][..]),
        ..Default::default()
    })
}

/// First run of exactly four digits, e.g. `2024` from `2024/05/01/`.
fn extract_year(value: &str) -> Option<i32> {
    value
        .split(|c: char| !c.is_ascii_digit())
        .find(|run| run.len() == 4)
        .and_then(|run| run.parse().ok())
}
