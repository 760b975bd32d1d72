use std::fmt;

use serde::{Deserialize, Serialize};

/// Row id of a paper, assigned by storage on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(pub i64);

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationKind {
    JournalArticle,
    ConferencePaper,
}

impl PublicationKind {
    /// Derives the kind from the Crossref work-type string. Any value
    /// containing "journal" (case-insensitive) is a journal article;
    /// everything else, including a missing type, is a conference paper.
    pub fn from_work_type(work_type: Option<&str>) -> Self {
        match work_type {
            Some(value) if value.to_lowercase().contains("journal") => {
                PublicationKind::JournalArticle
            }
            _ => PublicationKind::ConferencePaper,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PublicationKind::JournalArticle => "Journal Article",
            PublicationKind::ConferencePaper => "Conference Paper",
        }
    }
}

impl fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical intermediate form of one Crossref work, owned by the
/// normalizer for the duration of a single import step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedWork {
    pub title: String,
    pub year: Option<i64>,
    pub doi: Option<String>,
    pub kind: PublicationKind,
    pub venue_name: String,
    pub authors: Vec<String>,
}

/// Read model for the papers listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaperSummary {
    pub id: PaperId,
    pub title: String,
    pub year: Option<i64>,
    pub doi: Option<String>,
    pub venue_name: String,
}
