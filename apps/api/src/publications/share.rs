use reqwest::Url;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::publication::Publication;

const TWITTER_INTENT_URL: &str = "https://twitter.com/intent/tweet";
const LINKEDIN_SHARE_URL: &str = "https://www.linkedin.com/sharing/share-offsite/";
const FACEBOOK_SHARER_URL: &str = "https://www.facebook.com/sharer/sharer.php";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub publication_url: String,
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
    pub doi: Option<String>,
}

pub fn publication_url(base_url: &str, id: &str) -> String {
    format!("{}/publication/{id}", base_url.trim_end_matches('/'))
}

pub fn share_links(base_url: &str, publication: &Publication) -> Result<ShareLinks, AppError> {
    let page = publication_url(base_url, &publication.id);

    let twitter = Url::parse_with_params(
        TWITTER_INTENT_URL,
        &[("url", page.as_str()), ("text", publication.title.as_str())],
    )
    .map_err(anyhow::Error::from)?;
    let linkedin = Url::parse_with_params(LINKEDIN_SHARE_URL, &[("url", page.as_str())])
        .map_err(anyhow::Error::from)?;
    let facebook = Url::parse_with_params(FACEBOOK_SHARER_URL, &[("u", page.as_str())])
        .map_err(anyhow::Error::from)?;

    Ok(ShareLinks {
        twitter: twitter.into(),
        linkedin: linkedin.into(),
        facebook: facebook.into(),
        doi: publication.doi_url(),
        publication_url: page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::seed::initial_publications;

    #[test]
    fn test_share_links_are_encoded() {
        let publication = &initial_publications()[0];
        let links = share_links("http://localhost:8080/", publication).unwrap();

        assert_eq!(
            links.publication_url,
            format!("http://localhost:8080/publication/{}", publication.id)
        );
        let encoded_page = format!("http%3A%2F%2Flocalhost%3A8080%2Fpublication%2F{}", publication.id);
        assert!(links.twitter.starts_with("https://twitter.com/intent/tweet?url="));
        assert!(links.twitter.contains(&encoded_page));
        assert!(!links.twitter.contains(' '));
        assert_eq!(
            links.linkedin,
            format!("https://www.linkedin.com/sharing/share-offsite/?url={encoded_page}")
        );
        assert_eq!(
            links.facebook,
            format!("https://www.facebook.com/sharer/sharer.php?u={encoded_page}")
        );
    }

    #[test]
    fn test_doi_link_only_when_present() {
        let mut publication = initial_publications()[0].clone();
        publication.doi = Some("10.1000/abc".to_string());
        let links = share_links("http://x", &publication).unwrap();
        assert_eq!(links.doi.as_deref(), Some("https://doi.org/10.1000/abc"));

        publication.doi = None;
        assert_eq!(share_links("http://x", &publication).unwrap().doi, None);
    }
}
