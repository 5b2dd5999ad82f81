use serde::{Deserialize, Serialize};

use crate::models::profile::ResearcherProfile;

/// One edit to one known profile field.
///
/// Wire form: `{"field": "country", "value": "Japan"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileUpdate {
    Name(String),
    Email(String),
    Orcid(Option<String>),
    Affiliations(Vec<String>),
    Country(String),
    State(String),
    Lga(String),
    Bio(Option<String>),
    ResearchInterests(Vec<String>),
}

impl ProfileUpdate {
    pub fn apply(self, profile: &mut ResearcherProfile) {
        match self {
            ProfileUpdate::Name(name) => profile.name = name,
            ProfileUpdate::Email(email) => profile.email = email,
            ProfileUpdate::Orcid(orcid) => profile.orcid = orcid.filter(|o| !o.trim().is_empty()),
            ProfileUpdate::Affiliations(items) => profile.affiliations = clean_list(items),
            ProfileUpdate::Country(country) => profile.location.country = country,
            ProfileUpdate::State(state) => profile.location.state = state,
            ProfileUpdate::Lga(lga) => profile.location.lga = lga,
            ProfileUpdate::Bio(bio) => profile.bio = bio,
            ProfileUpdate::ResearchInterests(items) => {
                profile.research_interests = Some(clean_list(items))
            }
        }
    }
}

/// Trims every item and drops the blank ones.
pub fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}
