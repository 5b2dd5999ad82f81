//! Markdown rendering of an assembled CV in one of three citation styles.

use serde::{Deserialize, Serialize};

use crate::cv::assembler::{
    CvDocument, CvEntry, CvSectionKind, AFFILIATIONS_TITLE, INTERESTS_TITLE,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CvTemplate {
    /// Standard APA-like.
    #[default]
    Apa,
    /// Modern IEEE-like.
    Ieee,
    /// Title and year only.
    Compact,
}

impl CvTemplate {
    pub fn label(&self) -> &'static str {
        match self {
            CvTemplate::Apa => "Standard APA-like",
            CvTemplate::Ieee => "Modern IEEE-like",
            CvTemplate::Compact => "Compact List",
        }
    }
}

pub fn render_markdown(doc: &CvDocument, template: CvTemplate) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", doc.header.name));
    match &doc.header.primary_affiliation {
        Some(affiliation) => md.push_str(&format!("{} | {}\n", doc.header.email, affiliation)),
        None => md.push_str(&format!("{}\n", doc.header.email)),
    }

    md.push_str(&format!("\n## {AFFILIATIONS_TITLE}\n\n"));
    for affiliation in &doc.affiliations {
        md.push_str(&format!("- {affiliation}\n"));
    }

    md.push_str(&format!("\n## {INTERESTS_TITLE}\n\n"));
    md.push_str(&format!("{}\n", doc.research_interests));

    for section in &doc.sections {
        md.push_str(&format!("\n## {}\n\n", section.title));
        for (i, entry) in section.entries.iter().enumerate() {
            md.push_str(&format!(
                "{}. {}\n",
                i + 1,
                format_entry(entry, section.kind, template)
            ));
        }
    }

    md
}

pub fn format_entry(entry: &CvEntry, kind: CvSectionKind, template: CvTemplate) -> String {
    match template {
        CvTemplate::Apa => format_apa(entry, kind),
        CvTemplate::Ieee => format_ieee(entry, kind),
        CvTemplate::Compact => format!("{} ({})", entry.title, entry.year),
    }
}

fn format_apa(entry: &CvEntry, kind: CvSectionKind) -> String {
    let lead = format!("**{}** ({}).", entry.authors.join(", "), entry.year);
    let venue = entry.venue.as_deref().unwrap_or_default();
    match kind {
        CvSectionKind::Articles => {
            let mut line = format!("{lead} {}. *{venue}*.", entry.title);
            if let Some(doi) = &entry.doi {
                line.push_str(&format!(" doi:{doi}"));
            }
            line
        }
        CvSectionKind::BooksAndChapters => format!(
            "{lead} *{}*. {}.",
            entry.title,
            entry.publisher.as_deref().unwrap_or_default()
        ),
        CvSectionKind::Conferences => {
            format!("{lead} {}. Paper presented at *{venue}*.", entry.title)
        }
    }
}

fn format_ieee(entry: &CvEntry, kind: CvSectionKind) -> String {
    let authors = entry.authors.join(", ");
    match kind {
        CvSectionKind::BooksAndChapters => {
            let publisher = entry
                .publisher
                .as_deref()
                .map(|p| format!(" {p},"))
                .unwrap_or_default();
            format!("{authors}, *{}*.{publisher} {}.", entry.title, entry.year)
        }
        CvSectionKind::Articles | CvSectionKind::Conferences => {
            let prefix = if kind == CvSectionKind::Conferences {
                "in "
            } else {
                ""
            };
            let venue = entry
                .venue
                .as_deref()
                .map(|v| format!(" {prefix}*{v}*,"))
                .unwrap_or_default();
            let doi = entry
                .doi
                .as_deref()
                .map(|d| format!(", doi: {d}"))
                .unwrap_or_default();
            format!("{authors}, \"{},\"{venue} {}{doi}.", entry.title, entry.year)
        }
    }
}
