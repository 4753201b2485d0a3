mod harness;

use std::sync::Arc;
use std::time::Duration;

use clientdb::adapter::outbound::memory::{MemoryDocumentStore, MemoryRelationalStore};
use clientdb::application::client::{ClientService, ClientServiceConfig};
use clientdb::domain::metadata::decode_from_relational;
use clientdb::domain::{ListRequest, MetadataEntry, PublicClientView, StoreKind};
use clientdb::error::{Error, StoreError};
use clientdb::port::outbound::store::{DocumentClientStore, RelationalClientStore};
use clientdb::testkit::client::{acme_draft, draft, draft_with_email};
use clientdb::testkit::store::{
    FailingRelationalStore, LateCommitRelationalStore, StallingStore, UndeletableDocumentStore,
};
use harness::temp_db::TempDb;

fn service(
    relational: Arc<dyn RelationalClientStore>,
    document: Arc<dyn DocumentClientStore>,
    compensate: bool,
) -> ClientService {
    ClientService::new(
        relational,
        document,
        ClientServiceConfig {
            store_timeout: Duration::from_millis(200),
            compensate_partial_writes: compensate,
        },
    )
}

fn document_listing() -> ListRequest {
    ListRequest::default()
}

fn relational_listing() -> ListRequest {
    ListRequest {
        use_sql_database: true,
        ..ListRequest::default()
    }
}

#[tokio::test]
async fn sqlite_and_document_stores_hold_the_same_client() {
    let db = TempDb::create("dual-write");
    let relational = Arc::new(db.store(2).await);
    let service = service(relational, Arc::new(MemoryDocumentStore::new()), true);

    let created = service.create(acme_draft()).await.unwrap();
    let PublicClientView::Relational(row) = &created else {
        panic!("create should answer with the relational view: {created:?}");
    };
    assert_eq!(
        decode_from_relational(&row.metadata).unwrap(),
        vec![MetadataEntry::new("tier", "gold")]
    );

    let from_sql = service.get(&created.id(), StoreKind::Relational).await.unwrap();
    assert_eq!(from_sql, created);

    let documents = service.list(&document_listing()).await.unwrap();
    assert_eq!(documents.len(), 1);
    let PublicClientView::Document(document) = &documents[0] else {
        panic!("document listing returned {documents:?}");
    };
    assert_eq!(document.client_email, row.client_email);
    assert_eq!(document.metadata, vec![MetadataEntry::new("tier", "gold")]);
}

#[tokio::test]
async fn failed_relational_write_is_compensated() {
    let document = Arc::new(MemoryDocumentStore::new());
    let service = service(
        Arc::new(FailingRelationalStore::unavailable()),
        document.clone(),
        true,
    );

    let err = service.create(acme_draft()).await.unwrap_err();

    assert!(
        matches!(err, Error::PartialWrite { compensated: true, .. }),
        "{err:?}"
    );
    assert!(document.is_empty());
}

#[tokio::test]
async fn compensation_can_be_turned_off() {
    let document = Arc::new(MemoryDocumentStore::new());
    let service = service(
        Arc::new(FailingRelationalStore::unavailable()),
        document.clone(),
        false,
    );

    let err = service.create(acme_draft()).await.unwrap_err();

    assert!(
        matches!(err, Error::PartialWrite { compensated: false, .. }),
        "{err:?}"
    );
    assert_eq!(document.len(), 1);
}

#[tokio::test]
async fn failed_compensation_is_reported() {
    let document = Arc::new(UndeletableDocumentStore::new());
    let service = service(
        Arc::new(FailingRelationalStore::unavailable()),
        document.clone(),
        true,
    );

    let err = service.create(acme_draft()).await.unwrap_err();

    assert!(
        matches!(err, Error::PartialWrite { compensated: false, .. }),
        "{err:?}"
    );
    assert_eq!(document.len(), 1);
}

#[tokio::test]
async fn stalled_relational_write_keeps_document_uncompensated() {
    let document = Arc::new(MemoryDocumentStore::new());
    let service = service(Arc::new(StallingStore), document.clone(), true);

    let err = service.create(acme_draft()).await.unwrap_err();

    match err {
        Error::PartialWrite {
            compensated,
            source,
            ..
        } => {
            assert!(!compensated);
            assert!(matches!(source, StoreError::Timeout { .. }), "{source:?}");
        }
        other => panic!("expected partial write, got {other:?}"),
    }
    assert_eq!(document.len(), 1);
}

#[tokio::test]
async fn late_relational_commit_keeps_both_stores_written() {
    let relational = Arc::new(LateCommitRelationalStore::new(Duration::from_millis(400)));
    let document = Arc::new(MemoryDocumentStore::new());
    let service = service(relational.clone(), document.clone(), true);

    let err = service.create(acme_draft()).await.unwrap_err();
    assert!(
        matches!(err, Error::PartialWrite { compensated: false, .. }),
        "{err:?}"
    );

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(relational.len(), 1);
    assert_eq!(document.len(), 1);
}

#[tokio::test]
async fn locked_sqlite_file_never_leaves_a_compensated_row_behind() {
    let db = TempDb::create("locked");
    let relational = Arc::new(db.store_with_timeout(1, Duration::from_millis(200)).await);
    let document = Arc::new(MemoryDocumentStore::new());
    let service = service(relational, document.clone(), true);

    let lock = db.lock_exclusive();
    let err = service.create(acme_draft()).await.unwrap_err();
    tokio::time::sleep(Duration::from_millis(300)).await;
    lock.release();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let Error::PartialWrite {
        compensated,
        source,
        ..
    } = err
    else {
        panic!("expected partial write, got {err:?}");
    };
    if compensated {
        assert!(document.is_empty());
        assert_eq!(db.row_count(), 0);
    } else {
        assert!(source.is_timeout(), "{source:?}");
        assert_eq!(document.len(), 1);
    }
}

#[tokio::test]
async fn stalled_document_write_leaves_relational_store_untouched() {
    let relational = Arc::new(MemoryRelationalStore::new());
    let service = service(relational.clone(), Arc::new(StallingStore), true);

    let err = service.create(acme_draft()).await.unwrap_err();

    assert!(
        matches!(err, Error::Store(StoreError::Timeout { .. })),
        "{err:?}"
    );
    assert!(relational.is_empty());
}

#[tokio::test]
async fn invalid_draft_touches_neither_store() {
    let relational = Arc::new(MemoryRelationalStore::new());
    let document = Arc::new(MemoryDocumentStore::new());
    let service = service(relational.clone(), document.clone(), true);

    let err = service
        .create(draft(1, "Acme", "not-an-email", vec![]))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)), "{err:?}");
    assert!(relational.is_empty());
    assert!(document.is_empty());
}

#[tokio::test]
async fn both_listings_agree_on_membership() {
    let db = TempDb::create("membership");
    let service = service(
        Arc::new(db.store(2).await),
        Arc::new(MemoryDocumentStore::new()),
        true,
    );
    for email in ["a@acme.com", "b@acme.com", "c@acme.com"] {
        service.create(draft_with_email(email)).await.unwrap();
    }

    let mut from_sql: Vec<String> = service
        .list(&relational_listing())
        .await
        .unwrap()
        .iter()
        .map(|view| view.client_email().to_string())
        .collect();
    let mut from_documents: Vec<String> = service
        .list(&document_listing())
        .await
        .unwrap()
        .iter()
        .map(|view| view.client_email().to_string())
        .collect();
    from_sql.sort();
    from_documents.sort();

    assert_eq!(from_sql, from_documents);
    assert_eq!(from_sql.len(), 3);
}
