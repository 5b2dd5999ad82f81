//! Turns the profile and publication list into an ordered,
//! sectioned document ready for rendering.

use serde::{Deserialize, Serialize};

use crate::models::profile::ResearcherProfile;
use crate::models::publication::{Publication, PublicationType};

pub const AFFILIATIONS_TITLE: &str = "Education & Affiliations";
pub const INTERESTS_TITLE: &str = "Research Interests";

/// Bibliography bucket. Declaration order is rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvSectionKind {
    Articles,
    BooksAndChapters,
    Conferences,
}

impl CvSectionKind {
    pub const ORDER: [CvSectionKind; 3] = [
        CvSectionKind::Articles,
        CvSectionKind::BooksAndChapters,
        CvSectionKind::Conferences,
    ];

    /// Exhaustive on purpose: a new publication type will not compile until
    /// it is given a bucket.
    pub fn for_type(pub_type: PublicationType) -> Self {
        match pub_type {
            PublicationType::Article => CvSectionKind::Articles,
            PublicationType::Book | PublicationType::Chapter => CvSectionKind::BooksAndChapters,
            PublicationType::Conference => CvSectionKind::Conferences,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CvSectionKind::Articles => "Peer-Reviewed Articles",
            CvSectionKind::BooksAndChapters => "Books and Chapters",
            CvSectionKind::Conferences => "Conference Presentations",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvHeader {
    pub name: String,
    pub email: String,
    pub primary_affiliation: Option<String>,
}

/// One bibliography line. Which fields a renderer uses depends on the
/// section kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvEntry {
    pub publication_id: String,
    pub authors: Vec<String>,
    pub year: i32,
    pub title: String,
    pub venue: Option<String>,
    pub doi: Option<String>,
    pub publisher: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvSection {
    pub kind: CvSectionKind,
    pub title: String,
    pub entries: Vec<CvEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvDocument {
    pub header: CvHeader,
    pub affiliations: Vec<String>,
    /// Interests joined with ", ".
    pub research_interests: String,
    /// Non-empty bibliography sections in fixed order.
    pub sections: Vec<CvSection>,
}

impl CvDocument {
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

/// Builds the CV document.
///
/// Publications are sorted by year, newest first. The sort is stable so
/// same-year entries keep their list order. Empty sections are left out.
pub fn assemble_cv(profile: &ResearcherProfile, publications: &[Publication]) -> CvDocument {
    let mut sorted: Vec<&Publication> = publications.iter().collect();
    sorted.sort_by(|a, b| b.year.cmp(&a.year));

    let sections = CvSectionKind::ORDER
        .iter()
        .filter_map(|kind| {
            let entries: Vec<CvEntry> = sorted
                .iter()
                .filter(|p| CvSectionKind::for_type(p.pub_type) == *kind)
                .map(|p| to_entry(p))
                .collect();
            (!entries.is_empty()).then(|| CvSection {
                kind: *kind,
                title: kind.title().to_string(),
                entries,
            })
        })
        .collect();

    CvDocument {
        header: CvHeader {
            name: profile.name.clone(),
            email: profile.email.clone(),
            primary_affiliation: profile.primary_affiliation().map(str::to_string),
        },
        affiliations: profile.affiliations.clone(),
        research_interests: profile.interests().join(", "),
        sections,
    }
}

fn to_entry(publication: &Publication) -> CvEntry {
    CvEntry {
        publication_id: publication.id.clone(),
        authors: publication.authors.clone(),
        year: publication.year,
        title: publication.title.clone(),
        venue: publication.venue.clone(),
        doi: publication.doi.clone(),
        publisher: publication.publisher.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::publication::Visibility;
    use crate::session::seed::{initial_profile, initial_publications};

    fn publication(id: &str, year: i32, pub_type: PublicationType) -> Publication {
        Publication {
            id: id.to_string(),
            title: format!("Title {id}"),
            authors: vec!["A. Author".to_string()],
            doi: None,
            abstract_text: None,
            venue: None,
            year,
            pub_type,
            publisher: None,
            isbn: None,
            files: Vec::new(),
            visibility: Visibility::Public,
        }
    }

    fn ids(section: &CvSection) -> Vec<&str> {
        section.entries.iter().map(|e| e.publication_id.as_str()).collect()
    }

    #[test]
    fn test_empty_publications_keep_header_blocks() {
        let doc = assemble_cv(&initial_profile(), &[]);
        assert!(doc.sections.is_empty());
        assert_eq!(doc.header.name, "Dr. Evelyn Reed");
        assert_eq!(doc.header.email, "e.reed@university.edu");
        assert_eq!(
            doc.header.primary_affiliation.as_deref(),
            Some("University of Fictional Science")
        );
        assert_eq!(doc.affiliations.len(), 2);
        assert_eq!(
            doc.research_interests,
            "Artificial Intelligence, Natural Language Processing, Computational Linguistics"
        );
    }

    #[test]
    fn test_seed_fixture_sections_in_year_order() {
        let doc = assemble_cv(&initial_profile(), &initial_publications());
        let kinds: Vec<_> = doc.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CvSectionKind::Articles,
                CvSectionKind::BooksAndChapters,
                CvSectionKind::Conferences
            ]
        );
        assert_eq!(ids(&doc.sections[0]), vec!["pub-1"]);
        assert_eq!(ids(&doc.sections[1]), vec!["pub-3"]);
        assert_eq!(ids(&doc.sections[2]), vec!["pub-2"]);
        assert_eq!(doc.sections[1].entries[0].publisher.as_deref(), Some("Academic Press"));
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let pubs = vec![
            publication("a", 2019, PublicationType::Article),
            publication("b", 2021, PublicationType::Article),
            publication("c", 2019, PublicationType::Article),
            publication("d", 2021, PublicationType::Article),
        ];
        let doc = assemble_cv(&initial_profile(), &pubs);
        assert_eq!(ids(&doc.sections[0]), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_books_and_chapters_share_a_section() {
        let pubs = vec![
            publication("book", 2020, PublicationType::Book),
            publication("chapter", 2022, PublicationType::Chapter),
        ];
        let doc = assemble_cv(&initial_profile(), &pubs);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].kind, CvSectionKind::BooksAndChapters);
        assert_eq!(ids(&doc.sections[0]), vec!["chapter", "book"]);
    }

    #[test]
    fn test_every_publication_lands_in_exactly_one_section() {
        let pubs = vec![
            publication("1", 2020, PublicationType::Article),
            publication("2", 2018, PublicationType::Book),
            publication("3", 2024, PublicationType::Chapter),
            publication("4", 2021, PublicationType::Conference),
            publication("5", 2021, PublicationType::Article),
        ];
        let doc = assemble_cv(&initial_profile(), &pubs);
        assert_eq!(doc.entry_count(), pubs.len());
        for p in &pubs {
            let hits = doc
                .sections
                .iter()
                .flat_map(|s| &s.entries)
                .filter(|e| e.publication_id == p.id)
                .count();
            assert_eq!(hits, 1, "publication {} appeared {hits} times", p.id);
        }
    }

    #[test]
    fn test_empty_sections_omitted() {
        let pubs = vec![publication("only", 2020, PublicationType::Conference)];
        let doc = assemble_cv(&initial_profile(), &pubs);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].title, "Conference Presentations");
    }

    #[test]
    fn test_profile_without_affiliations_or_interests() {
        let mut profile = initial_profile();
        profile.affiliations.clear();
        profile.research_interests = None;
        let doc = assemble_cv(&profile, &[]);
        assert_eq!(doc.header.primary_affiliation, None);
        assert_eq!(doc.research_interests, "");
    }
}
