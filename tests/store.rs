use assert_matches::assert_matches;

use citedex::db::{open_db, open_db_in_memory};
use citedex::domain::PublicationKind;
use citedex::error::CitedexError;
use citedex::store::{PaperStore, SqlitePaperStore};

#[test]
fn insert_chain_propagates_generated_ids() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqlitePaperStore::begin(&mut conn).unwrap();

    let venue_id = store.insert_venue("J. Test", "Journal").unwrap();
    let paper_id = store
        .insert_paper(
            "A Study",
            Some(2020),
            Some("10.1/x"),
            venue_id,
            PublicationKind::JournalArticle,
        )
        .unwrap();
    let author_id = store.insert_author("A B").unwrap();
    store.insert_authorship(paper_id, author_id, 1).unwrap();

    let papers = store.list_recent_papers(50).unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].id, paper_id);
    assert_eq!(papers[0].title, "A Study");
    assert_eq!(papers[0].year, Some(2020));
    assert_eq!(papers[0].doi.as_deref(), Some("10.1/x"));
    assert_eq!(papers[0].venue_name, "J. Test");
}

#[test]
fn doi_lookup_finds_only_exact_matches() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqlitePaperStore::begin(&mut conn).unwrap();

    let venue_id = store.insert_venue("J. Test", "Journal").unwrap();
    let paper_id = store
        .insert_paper(
            "A Study",
            None,
            Some("10.1/x"),
            venue_id,
            PublicationKind::ConferencePaper,
        )
        .unwrap();

    assert_eq!(store.find_paper_id_by_doi("10.1/x").unwrap(), Some(paper_id));
    assert_eq!(store.find_paper_id_by_doi("10.1/y").unwrap(), None);
    assert_eq!(store.find_paper_id_by_doi("10.1/X").unwrap(), None);
}

#[test]
fn repeated_venue_and_author_names_insert_fresh_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqlitePaperStore::begin(&mut conn).unwrap();

    let first = store.insert_venue("J. Test", "Journal").unwrap();
    let second = store.insert_venue("J. Test", "Journal").unwrap();
    assert_ne!(first, second);

    let first = store.insert_author("A B").unwrap();
    let second = store.insert_author("A B").unwrap();
    assert_ne!(first, second);
}

#[test]
fn commit_persists_across_units_of_work() {
    let temp = tempfile::tempdir().unwrap();
    let db_path = temp.path().join("catalog.db");

    let mut conn = open_db(&db_path).unwrap();
    let mut store = SqlitePaperStore::begin(&mut conn).unwrap();
    let venue_id = store.insert_venue("J. Test", "Journal").unwrap();
    store
        .insert_paper(
            "A Study",
            Some(2020),
            Some("10.1/x"),
            venue_id,
            PublicationKind::JournalArticle,
        )
        .unwrap();
    store.commit().unwrap();
    drop(store);
    drop(conn);

    let mut conn = open_db(&db_path).unwrap();
    let store = SqlitePaperStore::begin(&mut conn).unwrap();
    assert!(store.find_paper_id_by_doi("10.1/x").unwrap().is_some());
}

#[test]
fn dropping_an_uncommitted_store_rolls_back() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let store = SqlitePaperStore::begin(&mut conn).unwrap();
        store.insert_venue("J. Test", "Journal").unwrap();
    }

    let store = SqlitePaperStore::begin(&mut conn).unwrap();
    assert!(store.list_recent_papers(50).unwrap().is_empty());
    drop(store);

    let venues: i64 = conn
        .query_row("SELECT COUNT(*) FROM venues;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(venues, 0);
}

#[test]
fn finished_unit_of_work_rejects_further_use() {
    let mut conn = open_db_in_memory().unwrap();
    let mut store = SqlitePaperStore::begin(&mut conn).unwrap();
    store.commit().unwrap();

    assert_matches!(
        store.insert_venue("J. Test", "Journal"),
        Err(CitedexError::UnitOfWorkClosed)
    );
    assert_matches!(store.commit(), Err(CitedexError::UnitOfWorkClosed));
    assert_matches!(store.rollback(), Err(CitedexError::UnitOfWorkClosed));
}

#[test]
fn listing_is_most_recent_first_and_bounded() {
    let mut conn = open_db_in_memory().unwrap();
    let store = SqlitePaperStore::begin(&mut conn).unwrap();

    let venue_id = store.insert_venue("J. Test", "Journal").unwrap();
    for title in ["first", "second", "third"] {
        store
            .insert_paper(title, None, None, venue_id, PublicationKind::ConferencePaper)
            .unwrap();
    }

    let papers = store.list_recent_papers(2).unwrap();
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[0].title, "third");
    assert_eq!(papers[1].title, "second");
}
