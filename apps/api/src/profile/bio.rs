//! Bio generation: the one call out to the generative-text API.
//!
//! Never fails: a missing credential or any call error turns into a fixed
//! human-readable message that is stored like a real biography.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::LlmClient;
use crate::models::profile::ResearcherProfile;
use crate::profile::prompts::{BIO_PROMPT_TEMPLATE, INTERESTS_NOT_SPECIFIED};

pub const BIO_UNCONFIGURED_MESSAGE: &str =
    "API key not configured. Please set the API_KEY environment variable.";
pub const BIO_FAILURE_MESSAGE: &str =
    "An error occurred while generating the biography. Please try again later.";

/// Produces a biography for a profile. Carried in `AppState` as
/// `Arc<dyn BioGenerator>` so tests can swap the backend.
#[async_trait]
pub trait BioGenerator: Send + Sync {
    async fn generate(&self, profile: &ResearcherProfile) -> String;
}

/// Production generator backed by the LLM client. `None` means no
/// credential was configured.
pub struct LlmBioGenerator {
    llm: Option<LlmClient>,
}

impl LlmBioGenerator {
    pub fn new(llm: Option<LlmClient>) -> Self {
        if llm.is_none() {
            warn!("API_KEY not set. Bio generation will return a static message.");
        }
        Self { llm }
    }
}

#[async_trait]
impl BioGenerator for LlmBioGenerator {
    async fn generate(&self, profile: &ResearcherProfile) -> String {
        let Some(llm) = &self.llm else {
            return BIO_UNCONFIGURED_MESSAGE.to_string();
        };

        match llm.generate_text(&build_bio_prompt(profile)).await {
            Ok(bio) => {
                info!("Generated bio for {} ({} chars)", profile.id, bio.len());
                bio
            }
            Err(e) => {
                warn!("Bio generation failed for {}: {e}", profile.id);
                BIO_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

pub fn build_bio_prompt(profile: &ResearcherProfile) -> String {
    let interests = match profile.interests() {
        [] => INTERESTS_NOT_SPECIFIED.to_string(),
        items => items.join(", "),
    };
    BIO_PROMPT_TEMPLATE
        .replace("{name}", &profile.name)
        .replace("{affiliations}", &profile.affiliations.join(", "))
        .replace("{interests}", &interests)
}
