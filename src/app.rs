use serde::Serialize;
use tracing::{debug, info};

use crate::crossref::CrossrefClient;
use crate::domain::{NormalizedWork, PaperId, PaperSummary};
use crate::error::CitedexError;
use crate::normalize::normalize_work;
use crate::store::PaperStore;

/// Every venue row is recorded as a journal and every author at position 1,
/// matching the catalog's documented simplifications.
const VENUE_KIND: &str = "Journal";
const AUTHORSHIP_POSITION: i64 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ImportResult {
    pub fetched: usize,
    pub inserted: u64,
    pub skipped: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListResult {
    pub papers: Vec<PaperSummary>,
}

#[derive(Clone)]
pub struct App<C: CrossrefClient> {
    crossref: C,
}

impl<C: CrossrefClient> App<C> {
    pub fn new(crossref: C) -> Self {
        Self { crossref }
    }

    /// Imports one bounded page of Crossref search results into the catalog.
    ///
    /// The provider fetch resolves fully before any storage mutation. Records
    /// are then processed strictly in input order: normalize, check the DOI
    /// against the catalog, and either skip or insert venue, paper, authors
    /// and authorships. One commit finalizes the whole batch; any per-record
    /// failure propagates immediately and leaves the unit of work to be
    /// rolled back by the caller dropping the store.
    pub fn import<S: PaperStore>(
        &self,
        store: &mut S,
        keywords: &str,
        rows: u32,
    ) -> Result<ImportResult, CitedexError> {
        if keywords.trim().is_empty() {
            return Err(CitedexError::EmptyQuery);
        }

        info!(keywords, rows, "searching Crossref");
        let works = self.crossref.search(keywords, rows)?;
        let fetched = works.len();

        let mut inserted = 0u64;
        let mut skipped = 0u64;
        for raw in &works {
            let work = normalize_work(raw);
            if let Some(doi) = work.doi.as_deref() {
                if let Some(existing) = store.find_paper_id_by_doi(doi)? {
                    debug!(doi, paper_id = existing.0, "already in catalog, skipping");
                    skipped += 1;
                    continue;
                }
            }
            let paper_id = write_work(store, &work)?;
            debug!(title = work.title.as_str(), paper_id = paper_id.0, "inserted");
            inserted += 1;
        }

        store.commit()?;
        info!(fetched, inserted, skipped, "import committed");
        Ok(ImportResult {
            fetched,
            inserted,
            skipped,
        })
    }

    /// Read-only listing of the most recently inserted papers.
    pub fn list_papers<S: PaperStore>(
        &self,
        store: &S,
        limit: u32,
    ) -> Result<ListResult, CitedexError> {
        let papers = store.list_recent_papers(limit)?;
        Ok(ListResult { papers })
    }
}

/// Persists one normalized work in dependency order: venue before paper,
/// paper before any authorship, each author immediately before its own
/// authorship row. Generated ids flow into the dependent inserts.
pub fn write_work<S: PaperStore>(
    store: &S,
    work: &NormalizedWork,
) -> Result<PaperId, CitedexError> {
    let venue_id = store.insert_venue(&work.venue_name, VENUE_KIND)?;
    let paper_id = store.insert_paper(
        &work.title,
        work.year,
        work.doi.as_deref(),
        venue_id,
        work.kind,
    )?;
    for name in &work.authors {
        let author_id = store.insert_author(name)?;
        store.insert_authorship(paper_id, author_id, AUTHORSHIP_POSITION)?;
    }
    Ok(paper_id)
}
