use serde::{Deserialize, Serialize};

const ORCID_BASE_URL: &str = "https://orcid.org";

/// Where a researcher is based. `lga` is the local-government-area level
/// below state/province.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub state: String,
    pub lga: String,
}

/// A researcher profile. Used both for the session owner and for the
/// read-only directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearcherProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub orcid: Option<String>,
    #[serde(default)]
    pub affiliations: Vec<String>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub research_interests: Option<Vec<String>>,
}

impl ResearcherProfile {
    /// Public ORCID record URL, when an identifier is present.
    pub fn orcid_url(&self) -> Option<String> {
        self.orcid
            .as_deref()
            .filter(|o| !o.is_empty())
            .map(|o| format!("{ORCID_BASE_URL}/{o}"))
    }

    pub fn primary_affiliation(&self) -> Option<&str> {
        self.affiliations.first().map(String::as_str)
    }

    pub fn interests(&self) -> &[String] {
        self.research_interests.as_deref().unwrap_or(&[])
    }
}
