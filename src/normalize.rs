use crate::crossref::CrossrefWork;
use crate::domain::{NormalizedWork, PublicationKind};

pub const FALLBACK_TITLE: &str = "Untitled";
pub const FALLBACK_VENUE: &str = "Unknown Venue";
pub const FALLBACK_AUTHOR: &str = "Unknown Author";

/// Maps one raw Crossref work into its canonical import shape. Pure and
/// infallible: every missing or malformed field degrades to a documented
/// fallback instead of erroring.
pub fn normalize_work(raw: &CrossrefWork) -> NormalizedWork {
    NormalizedWork {
        title: first_or_fallback(raw.title.as_deref(), FALLBACK_TITLE),
        year: extract_year(raw),
        doi: raw.doi.clone(),
        kind: PublicationKind::from_work_type(raw.work_type.as_deref()),
        venue_name: first_or_fallback(raw.container_title.as_deref(), FALLBACK_VENUE),
        authors: normalize_authors(raw),
    }
}

fn first_or_fallback(values: Option<&[String]>, fallback: &str) -> String {
    values
        .and_then(|list| list.first())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

/// First integer of the first `date-parts` inner list. A missing `issued`,
/// an empty outer list, an empty inner list, or a null leading component
/// all yield no year.
fn extract_year(raw: &CrossrefWork) -> Option<i64> {
    raw.issued
        .as_ref()
        .and_then(|issued| issued.date_parts.as_ref())
        .and_then(|parts| parts.first())
        .and_then(|inner| inner.first())
        .copied()
        .flatten()
}

/// Author names are given+family joined by a single space and trimmed. An
/// entry that trims to empty keeps a placeholder name; an absent list, an
/// empty list, or a list where every entry trims to empty collapses to
/// exactly one placeholder author.
fn normalize_authors(raw: &CrossrefWork) -> Vec<String> {
    let entries = raw.author.as_deref().unwrap_or(&[]);
    let mut names = Vec::with_capacity(entries.len());
    let mut any_named = false;
    for entry in entries {
        let given = entry.given.as_deref().unwrap_or("");
        let family = entry.family.as_deref().unwrap_or("");
        let name = format!("{given} {family}").trim().to_string();
        if name.is_empty() {
            names.push(FALLBACK_AUTHOR.to_string());
        } else {
            any_named = true;
            names.push(name);
        }
    }
    if !any_named {
        return vec![FALLBACK_AUTHOR.to_string()];
    }
    names
}
