use serde::{Deserialize, Serialize};

use crate::models::profile::ResearcherProfile;
use crate::models::publication::Publication;

/// Points awarded per satisfied check. Five checks, so the score is always
/// a multiple of 20 in 0..=100.
pub const POINTS_PER_CHECK: u8 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessField {
    Name,
    Affiliations,
    Orcid,
    Publications,
    Country,
}

impl CompletenessField {
    const ALL: [CompletenessField; 5] = [
        CompletenessField::Name,
        CompletenessField::Affiliations,
        CompletenessField::Orcid,
        CompletenessField::Publications,
        CompletenessField::Country,
    ];

    fn is_satisfied(&self, profile: &ResearcherProfile, publications: &[Publication]) -> bool {
        match self {
            CompletenessField::Name => !profile.name.is_empty(),
            CompletenessField::Affiliations => !profile.affiliations.is_empty(),
            CompletenessField::Orcid => profile.orcid.as_deref().is_some_and(|o| !o.is_empty()),
            CompletenessField::Publications => !publications.is_empty(),
            CompletenessField::Country => !profile.location.country.is_empty(),
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            CompletenessField::Name => "Add your display name",
            CompletenessField::Affiliations => "Add at least one affiliation",
            CompletenessField::Orcid => "Link your ORCID iD",
            CompletenessField::Publications => "Add or import your first publication",
            CompletenessField::Country => "Set the country you are based in",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessCheck {
    pub field: CompletenessField,
    pub satisfied: bool,
    pub points: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// 0 – 100, multiple of 20.
    pub score: u8,
    pub checks: Vec<CompletenessCheck>,
    pub recommendations: Vec<String>,
}

/// Scores profile completeness: 20 points each for a name, at least one
/// affiliation, an ORCID iD, at least one publication and a country.
pub fn compute_completeness(
    profile: &ResearcherProfile,
    publications: &[Publication],
) -> CompletenessReport {
    let checks: Vec<CompletenessCheck> = CompletenessField::ALL
        .iter()
        .map(|field| {
            let satisfied = field.is_satisfied(profile, publications);
            CompletenessCheck {
                field: *field,
                satisfied,
                points: if satisfied { POINTS_PER_CHECK } else { 0 },
            }
        })
        .collect();

    let score = checks.iter().map(|c| c.points).sum();
    let recommendations = checks
        .iter()
        .filter(|c| !c.satisfied)
        .map(|c| c.field.recommendation().to_string())
        .collect();

    CompletenessReport {
        score,
        checks,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::seed::{initial_profile, initial_publications};

    #[test]
    fn test_seed_profile_is_complete() {
        let report = compute_completeness(&initial_profile(), &initial_publications());
        assert_eq!(report.score, 100);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_removing_orcid_drops_twenty() {
        let mut profile = initial_profile();
        profile.orcid = None;
        let report = compute_completeness(&profile, &initial_publications());
        assert_eq!(report.score, 80);
        assert_eq!(report.recommendations, vec!["Link your ORCID iD"]);
    }

    #[test]
    fn test_empty_orcid_counts_as_missing() {
        let mut profile = initial_profile();
        profile.orcid = Some(String::new());
        assert_eq!(compute_completeness(&profile, &initial_publications()).score, 80);
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        let mut profile = initial_profile();
        profile.name.clear();
        profile.affiliations.clear();
        profile.orcid = None;
        profile.location.country.clear();
        let report = compute_completeness(&profile, &[]);
        assert_eq!(report.score, 0);
        assert_eq!(report.recommendations.len(), 5);
    }

    #[test]
    fn test_optional_fields_do_not_score() {
        let mut profile = initial_profile();
        profile.bio = None;
        profile.research_interests = None;
        profile.location.state.clear();
        assert_eq!(compute_completeness(&profile, &initial_publications()).score, 100);
    }

    #[test]
    fn test_score_is_multiple_of_twenty_and_monotonic() {
        let publications = initial_publications();
        // Walk every subset of the five checks.
        for mask in 0u8..32 {
            let mut profile = initial_profile();
            if mask & 1 == 0 {
                profile.name.clear();
            }
            if mask & 2 == 0 {
                profile.affiliations.clear();
            }
            if mask & 4 == 0 {
                profile.orcid = None;
            }
            if mask & 8 == 0 {
                profile.location.country.clear();
            }
            let pubs: &[Publication] = if mask & 16 == 0 { &[] } else { &publications };

            let score = compute_completeness(&profile, pubs).score;
            assert_eq!(score % POINTS_PER_CHECK, 0);
            assert_eq!(score, mask.count_ones() as u8 * POINTS_PER_CHECK);
        }
    }
}
