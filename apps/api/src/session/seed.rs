//! Mock data the session starts from.

use crate::models::advert::{Advert, AdvertType, PromoLevel};
use crate::models::profile::{Location, ResearcherProfile};
use crate::models::publication::{Publication, PublicationType, Visibility};

pub fn initial_profile() -> ResearcherProfile {
    ResearcherProfile {
        id: "user-1".to_string(),
        name: "Dr. Evelyn Reed".to_string(),
        email: "e.reed@university.edu".to_string(),
        orcid: Some("0000-0002-1825-0097".to_string()),
        affiliations: strings(&[
            "University of Fictional Science",
            "Institute of Advanced Studies",
        ]),
        location: location("United States", "California", "Santa Clara County"),
        bio: Some(
            "AI researcher focusing on large language models and their applications in \
             scientific discovery. Passionate about open-source and collaborative research."
                .to_string(),
        ),
        research_interests: Some(strings(&[
            "Artificial Intelligence",
            "Natural Language Processing",
            "Computational Linguistics",
        ])),
    }
}

pub fn initial_publications() -> Vec<Publication> {
    vec![
        Publication {
            id: "pub-1".to_string(),
            title: "The Foundations of Modern AI".to_string(),
            authors: strings(&["E. Reed", "J. Doe"]),
            doi: Some("10.1000/xyz123".to_string()),
            abstract_text: None,
            venue: Some("Journal of Artificial Intelligence Research".to_string()),
            year: 2023,
            pub_type: PublicationType::Article,
            publisher: None,
            isbn: None,
            files: Vec::new(),
            visibility: Visibility::Public,
        },
        Publication {
            id: "pub-2".to_string(),
            title: "A Novel Architecture for Neural Networks".to_string(),
            authors: strings(&["E. Reed", "A. Smith"]),
            doi: Some("10.1001/abc456".to_string()),
            abstract_text: None,
            venue: Some(
                "Proceedings of the International Conference on Machine Learning".to_string(),
            ),
            year: 2022,
            pub_type: PublicationType::Conference,
            publisher: None,
            isbn: None,
            files: Vec::new(),
            visibility: Visibility::Public,
        },
        Publication {
            id: "pub-3".to_string(),
            title: "Computational Thinking".to_string(),
            authors: strings(&["E. Reed"]),
            doi: None,
            abstract_text: None,
            venue: None,
            year: 2021,
            pub_type: PublicationType::Book,
            publisher: Some("Academic Press".to_string()),
            isbn: Some("978-3-16-148410-0".to_string()),
            files: Vec::new(),
            visibility: Visibility::Public,
        },
    ]
}

pub fn initial_adverts() -> Vec<Advert> {
    vec![
        Advert {
            id: "ad-1".to_string(),
            creator: "Journal of AI Ethics".to_string(),
            advert_type: AdvertType::Cfp,
            title: "Call for Papers: Special Issue on AI in Society".to_string(),
            content: "Submit your latest research on the societal impact of AI. \
                      Deadline: Dec 31, 2024."
                .to_string(),
            promo_level: PromoLevel::Featured,
        },
        Advert {
            id: "ad-2".to_string(),
            creator: "Tech Publishing House".to_string(),
            advert_type: AdvertType::Book,
            title: "New Book: \"Deep Learning in Practice\"".to_string(),
            content: "A hands-on guide to building and deploying deep learning models. \
                      Available now!"
                .to_string(),
            promo_level: PromoLevel::Free,
        },
    ]
}

/// Directory snapshot. The first entry is the session owner as seeded;
/// later profile edits do not flow back into it.
pub fn initial_directory() -> Vec<ResearcherProfile> {
    vec![
        initial_profile(),
        ResearcherProfile {
            id: "user-2".to_string(),
            name: "Dr. Kenji Tanaka".to_string(),
            email: "k.tanaka@tokyo.ac.jp".to_string(),
            orcid: Some("0000-0001-2345-6789".to_string()),
            affiliations: strings(&["University of Tokyo"]),
            location: location("Japan", "Tokyo", "Bunkyo"),
            bio: Some("Specialist in quantum computing and theoretical physics.".to_string()),
            research_interests: Some(strings(&["Quantum Mechanics", "Algorithms"])),
        },
        ResearcherProfile {
            id: "user-3".to_string(),
            name: "Dr. Maria Garcia".to_string(),
            email: "m.garcia@madrid.es".to_string(),
            orcid: Some("0000-0003-9876-5432".to_string()),
            affiliations: strings(&["Complutense University of Madrid"]),
            location: location("Spain", "Madrid", "Madrid"),
            bio: Some("Biomedical engineer developing new imaging techniques.".to_string()),
            research_interests: Some(strings(&["Biomedical Imaging", "Medical Devices"])),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn location(country: &str, state: &str, lga: &str) -> Location {
    Location {
        country: country.to_string(),
        state: state.to_string(),
        lga: lga.to_string(),
    }
}
