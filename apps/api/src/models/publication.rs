use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DOI_BASE_URL: &str = "https://doi.org";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationType {
    #[default]
    Article,
    Book,
    Chapter,
    Conference,
}

/// Access-scope label. Stored and editable only; nothing enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Collaborators,
}

/// A file attached to a publication for the lifetime of the session.
/// The payload is never parsed and never leaves memory except through the
/// download endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub file_name: String,
    pub content_type: String,
    pub size: usize,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip)]
    pub data: Bytes,
}

impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.data == other.data
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    pub year: i32,
    pub pub_type: PublicationType,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub files: Vec<Attachment>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl Publication {
    pub fn doi_url(&self) -> Option<String> {
        self.doi
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!("{DOI_BASE_URL}/{d}"))
    }
}

/// A publication as submitted by the add form or produced by an import,
/// before the session assigns it an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPublication {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Defaults to the current calendar year when omitted.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub pub_type: PublicationType,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}
