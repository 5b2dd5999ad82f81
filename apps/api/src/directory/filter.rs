use serde::{Deserialize, Serialize};

use crate::models::profile::ResearcherProfile;

/// Directory search criteria. A blank or absent criterion matches everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub interest: Option<String>,
}

impl DirectoryFilter {
    /// Selecting a country clears the state, since state choices depend
    /// on the country.
    pub fn set_country(&mut self, country: Option<String>) {
        self.country = country;
        self.state = None;
    }

    /// Clears a state that is not offered for the selected country, the same
    /// reset `set_country` applies when the country changes.
    pub fn reconcile_state(&mut self, directory: &[ResearcherProfile]) {
        let valid = match active(&self.state) {
            None => return,
            Some(state) => state_options(directory, self.country.as_deref())
                .iter()
                .any(|s| s == state),
        };
        if !valid {
            let country = self.country.take();
            self.set_country(country);
        }
    }

    pub fn matches(&self, profile: &ResearcherProfile) -> bool {
        let country_match = active(&self.country)
            .map_or(true, |country| profile.location.country == country);
        let state_match =
            active(&self.state).map_or(true, |state| profile.location.state == state);
        let interest_match = active(&self.interest).map_or(true, |needle| {
            let needle = needle.to_lowercase();
            profile
                .interests()
                .iter()
                .any(|interest| interest.to_lowercase().contains(&needle))
        });
        country_match && state_match && interest_match
    }
}

fn active(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().filter(|c| !c.is_empty())
}

/// Entries matching every supplied criterion, in directory order.
pub fn filter_directory<'a>(
    directory: &'a [ResearcherProfile],
    filter: &DirectoryFilter,
) -> Vec<&'a ResearcherProfile> {
    directory.iter().filter(|p| filter.matches(p)).collect()
}

/// Distinct countries in first-seen order.
pub fn country_options(directory: &[ResearcherProfile]) -> Vec<String> {
    distinct(directory.iter().map(|p| p.location.country.as_str()))
}

/// Distinct states within `country`, first-seen order. Empty when no
/// country is selected.
pub fn state_options(directory: &[ResearcherProfile], country: Option<&str>) -> Vec<String> {
    match country.filter(|c| !c.is_empty()) {
        None => Vec::new(),
        Some(country) => distinct(
            directory
                .iter()
                .filter(|p| p.location.country == country)
                .map(|p| p.location.state.as_str()),
        ),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|v| v == value) {
            out.push(value.to_string());
        }
    }
    out
}
