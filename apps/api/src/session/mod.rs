//! The researcher's session: the only mutable state in the service.
//!
//! `AppState` holds one `Session` behind an `Arc<RwLock<_>>`. Every change
//! goes through the methods here; handlers never reach into the fields.

pub mod seed;
pub mod updates;

use chrono::{Datelike, Utc};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::advert::{Advert, NewAdvert};
use crate::models::profile::ResearcherProfile;
use crate::models::publication::{Attachment, NewPublication, Publication, Visibility};

pub use updates::ProfileUpdate;
use updates::clean_list;

#[derive(Debug, Clone)]
pub struct Session {
    profile: ResearcherProfile,
    publications: Vec<Publication>,
    adverts: Vec<Advert>,
    directory: Vec<ResearcherProfile>,
}

impl Session {
    pub fn new(
        profile: ResearcherProfile,
        publications: Vec<Publication>,
        adverts: Vec<Advert>,
        directory: Vec<ResearcherProfile>,
    ) -> Self {
        Self {
            profile,
            publications,
            adverts,
            directory,
        }
    }

    /// A session loaded with the mock data.
    pub fn seeded() -> Self {
        Self::new(
            seed::initial_profile(),
            seed::initial_publications(),
            seed::initial_adverts(),
            seed::initial_directory(),
        )
    }

    pub fn profile(&self) -> &ResearcherProfile {
        &self.profile
    }

    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }

    pub fn adverts(&self) -> &[Advert] {
        &self.adverts
    }

    pub fn directory(&self) -> &[ResearcherProfile] {
        &self.directory
    }

    // ── Profile ─────────────────────────────────────────────────────────────

    /// Commits a whole edit form. The profile id never changes.
    pub fn replace_profile(&mut self, mut profile: ResearcherProfile) {
        profile.id = self.profile.id.clone();
        profile.affiliations = clean_list(profile.affiliations);
        profile.research_interests = profile.research_interests.map(clean_list);
        profile.orcid = profile.orcid.filter(|o| !o.trim().is_empty());
        self.profile = profile;
        info!("Profile {} replaced", self.profile.id);
    }

    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        update.apply(&mut self.profile);
    }

    /// Last write wins: overlapping generations simply overwrite each other.
    pub fn set_bio(&mut self, bio: String) {
        self.profile.bio = Some(bio);
    }

    // ── Publications ────────────────────────────────────────────────────────

    /// Adds a publication at the top of the list.
    pub fn add_publication(&mut self, new: NewPublication) -> Result<&Publication, AppError> {
        let publication = build_publication(new)?;
        info!("Adding publication {} ({})", publication.id, publication.title);
        self.publications.insert(0, publication);
        Ok(&self.publications[0])
    }

    /// Adds a batch so that the first item ends up on top. Items are
    /// validated up front; a failing batch leaves the list untouched.
    pub fn add_publications(
        &mut self,
        batch: Vec<NewPublication>,
    ) -> Result<Vec<Publication>, AppError> {
        let built = batch
            .into_iter()
            .map(build_publication)
            .collect::<Result<Vec<_>, _>>()?;
        info!("Adding {} publications", built.len());
        self.publications.splice(0..0, built.iter().cloned());
        Ok(built)
    }

    /// Replaces the stored publication with the same id. Attachments stay
    /// with the stored copy since clients only ever see their metadata.
    pub fn update_publication(&mut self, mut updated: Publication) -> Result<&Publication, AppError> {
        validate_publication_fields(&updated.title, &mut updated.authors)?;
        let slot = self.publication_mut(&updated.id)?;
        updated.files = std::mem::take(&mut slot.files);
        *slot = updated;
        info!("Updated publication {}", slot.id);
        Ok(slot)
    }

    pub fn set_publication_visibility(
        &mut self,
        id: &str,
        visibility: Visibility,
    ) -> Result<&Publication, AppError> {
        let slot = self.publication_mut(id)?;
        slot.visibility = visibility;
        Ok(slot)
    }

    pub fn publication(&self, id: &str) -> Result<&Publication, AppError> {
        self.publications
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Publication {id} not found")))
    }

    pub fn attach_file(&mut self, id: &str, attachment: Attachment) -> Result<&Attachment, AppError> {
        let slot = self.publication_mut(id)?;
        info!(
            "Attached {} ({} bytes) to publication {}",
            attachment.file_name, attachment.size, id
        );
        let index = slot.files.len();
        slot.files.push(attachment);
        Ok(&slot.files[index])
    }

    pub fn attachment(&self, id: &str, file_id: &str) -> Result<&Attachment, AppError> {
        self.publication(id)?
            .files
            .iter()
            .find(|f| f.id == file_id)
            .ok_or_else(|| AppError::NotFound(format!("File {file_id} not found on {id}")))
    }

    fn publication_mut(&mut self, id: &str) -> Result<&mut Publication, AppError> {
        self.publications
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Publication {id} not found")))
    }

    // ── Adverts ─────────────────────────────────────────────────────────────

    pub fn add_advert(&mut self, new: NewAdvert) -> Result<&Advert, AppError> {
        if [&new.title, &new.creator, &new.content]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(AppError::Validation(
                "title, creator and content are required".to_string(),
            ));
        }
        let advert = Advert {
            id: format!("ad-{}", Uuid::new_v4().simple()),
            creator: new.creator,
            advert_type: new.advert_type,
            title: new.title,
            content: new.content,
            promo_level: new.promo_level,
        };
        info!("Adding advert {} ({})", advert.id, advert.title);
        self.adverts.insert(0, advert);
        Ok(&self.adverts[0])
    }
}

fn build_publication(new: NewPublication) -> Result<Publication, AppError> {
    let mut authors = new.authors;
    validate_publication_fields(&new.title, &mut authors)?;
    Ok(Publication {
        id: format!("pub-{}", Uuid::new_v4().simple()),
        title: new.title.trim().to_string(),
        authors,
        doi: non_blank(new.doi),
        abstract_text: non_blank(new.abstract_text),
        venue: non_blank(new.venue),
        year: new.year.unwrap_or_else(|| Utc::now().year()),
        pub_type: new.pub_type,
        publisher: non_blank(new.publisher),
        isbn: non_blank(new.isbn),
        files: Vec::new(),
        visibility: new.visibility,
    })
}

/// Presence guard shared by the add and edit paths. Cleans `authors` in place.
fn validate_publication_fields(title: &str, authors: &mut Vec<String>) -> Result<(), AppError> {
    *authors = clean_list(std::mem::take(authors));
    if title.trim().is_empty() {
        return Err(AppError::Validation("title is required".to_string()));
    }
    if authors.is_empty() {
        return Err(AppError::Validation(
            "at least one author is required".to_string(),
        ));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
