use rusqlite::{Connection, OptionalExtension, Transaction, params};

use crate::domain::{AuthorId, PaperId, PaperSummary, PublicationKind, VenueId};
use crate::error::CitedexError;

/// Storage collaborator for one import batch: a DOI lookup, the ordered
/// entity inserts, the recent-papers read model, and unit-of-work control.
/// Implementations hand back generated row ids so dependent inserts can
/// reference them within the same unit of work.
pub trait PaperStore {
    fn find_paper_id_by_doi(&self, doi: &str) -> Result<Option<PaperId>, CitedexError>;

    fn insert_venue(&self, name: &str, kind: &str) -> Result<VenueId, CitedexError>;

    fn insert_paper(
        &self,
        title: &str,
        year: Option<i64>,
        doi: Option<&str>,
        venue_id: VenueId,
        kind: PublicationKind,
    ) -> Result<PaperId, CitedexError>;

    fn insert_author(&self, name: &str) -> Result<AuthorId, CitedexError>;

    fn insert_authorship(
        &self,
        paper_id: PaperId,
        author_id: AuthorId,
        position: i64,
    ) -> Result<(), CitedexError>;

    fn list_recent_papers(&self, limit: u32) -> Result<Vec<PaperSummary>, CitedexError>;

    /// Finalizes every write issued through this store. Valid at most once;
    /// afterwards the store only reports `UnitOfWorkClosed`.
    fn commit(&mut self) -> Result<(), CitedexError>;

    /// Discards every write issued through this store.
    fn rollback(&mut self) -> Result<(), CitedexError>;
}

/// SQLite-backed store scoped to one transaction. Dropping it without a
/// commit rolls the whole batch back, which is also the failure path: the
/// importer propagates the error and the driving layer drops the store.
pub struct SqlitePaperStore<'conn> {
    tx: Option<Transaction<'conn>>,
}

impl<'conn> SqlitePaperStore<'conn> {
    pub fn begin(conn: &'conn mut Connection) -> Result<Self, CitedexError> {
        let tx = conn.transaction()?;
        Ok(Self { tx: Some(tx) })
    }

    fn tx(&self) -> Result<&Transaction<'conn>, CitedexError> {
        self.tx.as_ref().ok_or(CitedexError::UnitOfWorkClosed)
    }
}

impl PaperStore for SqlitePaperStore<'_> {
    fn find_paper_id_by_doi(&self, doi: &str) -> Result<Option<PaperId>, CitedexError> {
        let id = self
            .tx()?
            .query_row(
                "SELECT id FROM papers WHERE doi = ?1 LIMIT 1;",
                [doi],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(id.map(PaperId))
    }

    fn insert_venue(&self, name: &str, kind: &str) -> Result<VenueId, CitedexError> {
        let tx = self.tx()?;
        tx.execute(
            "INSERT INTO venues (name, kind) VALUES (?1, ?2);",
            params![name, kind],
        )?;
        Ok(VenueId(tx.last_insert_rowid()))
    }

    fn insert_paper(
        &self,
        title: &str,
        year: Option<i64>,
        doi: Option<&str>,
        venue_id: VenueId,
        kind: PublicationKind,
    ) -> Result<PaperId, CitedexError> {
        let tx = self.tx()?;
        tx.execute(
            "INSERT INTO papers (title, year, doi, venue_id, kind)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![title, year, doi, venue_id.0, kind.as_str()],
        )?;
        Ok(PaperId(tx.last_insert_rowid()))
    }

    fn insert_author(&self, name: &str) -> Result<AuthorId, CitedexError> {
        let tx = self.tx()?;
        tx.execute("INSERT INTO authors (name) VALUES (?1);", [name])?;
        Ok(AuthorId(tx.last_insert_rowid()))
    }

    fn insert_authorship(
        &self,
        paper_id: PaperId,
        author_id: AuthorId,
        position: i64,
    ) -> Result<(), CitedexError> {
        self.tx()?.execute(
            "INSERT INTO authorships (paper_id, author_id, position)
             VALUES (?1, ?2, ?3);",
            params![paper_id.0, author_id.0, position],
        )?;
        Ok(())
    }

    fn list_recent_papers(&self, limit: u32) -> Result<Vec<PaperSummary>, CitedexError> {
        let tx = self.tx()?;
        let mut stmt = tx.prepare(
            "SELECT p.id, p.title, p.year, p.doi, v.name
             FROM papers p
             JOIN venues v ON p.venue_id = v.id
             ORDER BY p.id DESC
             LIMIT ?1;",
        )?;
        let mut rows = stmt.query([limit])?;
        let mut papers = Vec::new();
        while let Some(row) = rows.next()? {
            papers.push(PaperSummary {
                id: PaperId(row.get(0)?),
                title: row.get(1)?,
                year: row.get(2)?,
                doi: row.get(3)?,
                venue_name: row.get(4)?,
            });
        }
        Ok(papers)
    }

    fn commit(&mut self) -> Result<(), CitedexError> {
        let tx = self.tx.take().ok_or(CitedexError::UnitOfWorkClosed)?;
        tx.commit()?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), CitedexError> {
        let tx = self.tx.take().ok_or(CitedexError::UnitOfWorkClosed)?;
        tx.rollback()?;
        Ok(())
    }
}
