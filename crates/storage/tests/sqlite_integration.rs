use quiz_core::model::{QuestionKey, QuizQuestion};
use storage::repository::{KeyValueStore, Namespace, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_key_value_round_trip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let questions = repo.key_value(Namespace::Questions);
    assert_eq!(questions.namespace(), Namespace::Questions);
    assert_eq!(questions.get("1").await.unwrap(), None);

    questions.put("1", r#"{"question":"Q","options":["A","B"],"answer":1}"#).await.unwrap();
    let stored = questions.get("1").await.unwrap().expect("stored value");
    let parsed = QuizQuestion::from_json(QuestionKey::new(1), &stored).unwrap();
    assert_eq!(parsed.correct_option_index, 1);

    questions.put("1", r#"{"question":"Q2","options":[],"answer":0}"#).await.unwrap();
    let replaced = questions.get("1").await.unwrap().unwrap();
    assert!(replaced.contains("Q2"));
}

#[tokio::test]
async fn sqlite_namespaces_do_not_overlap() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_namespaces?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.key_value(Namespace::Sessions).put("1", r#"{"user":"ana"}"#).await.unwrap();
    assert!(repo.key_value(Namespace::Questions).get("1").await.unwrap().is_none());
    assert!(repo.key_value(Namespace::Sessions).get("1").await.unwrap().is_some());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(row.0, 1);
}

#[tokio::test]
async fn storage_sqlite_wires_both_namespaces() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage.questions.put("7", "{}").await.unwrap();
    assert_eq!(storage.questions.get("7").await.unwrap().as_deref(), Some("{}"));
    assert!(storage.sessions.get("7").await.unwrap().is_none());
}
