use chrono::Duration;
use course_core::model::{Email, MemberId};
use course_core::time::fixed_now;
use storage::repository::{
    KeyValueRepository, MemberRecord, MemberRepository, Storage, StorageError,
};
use storage::sqlite::SqliteRepository;

fn build_member(email: &str, active: bool) -> MemberRecord {
    MemberRecord {
        id: MemberId::generate(),
        email: Email::parse(email).unwrap(),
        password: "panetone".into(),
        display_name: None,
        is_active: active,
        purchase_date: Some(fixed_now() - Duration::days(1)),
        created_at: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_key_value_round_trip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_kv_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get_value("course_progress").await.unwrap(), None);

    repo.put_value("course_progress", "[1,2]").await.unwrap();
    repo.put_value("course_progress", "[1,2,3]").await.unwrap();
    assert_eq!(
        repo.get_value("course_progress").await.unwrap().as_deref(),
        Some("[1,2,3]")
    );

    repo.remove_value("course_progress").await.unwrap();
    assert_eq!(repo.get_value("course_progress").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_member_lookup_filters_inactive() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_members?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let active = build_member("ana@example.com", true);
    repo.upsert_member(&active).await.unwrap();
    repo.upsert_member(&build_member("old@example.com", false))
        .await
        .unwrap();

    let found = repo
        .find_active_by_email(&Email::parse("Ana@Example.com").unwrap())
        .await
        .unwrap()
        .expect("active member");
    assert_eq!(found.id, active.id);
    assert_eq!(found.created_at, active.created_at);
    assert_eq!(found.purchase_date, active.purchase_date);

    let missing = repo
        .find_active_by_email(&Email::parse("old@example.com").unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn sqlite_member_upsert_updates_by_email() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_member_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let original = build_member("ana@example.com", true);
    repo.upsert_member(&original).await.unwrap();

    let mut updated = original.clone();
    updated.id = MemberId::generate();
    updated.password = "new-password".into();
    repo.upsert_member(&updated).await.unwrap();

    let found = repo
        .find_active_by_email(&original.email)
        .await
        .unwrap()
        .expect("member");
    assert_eq!(found.id, original.id);
    assert_eq!(found.password, "new-password");
}

#[tokio::test]
async fn sqlite_member_upsert_rejects_reused_id() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_member_conflict?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let first = build_member("ana@example.com", true);
    repo.upsert_member(&first).await.unwrap();

    let mut clash = build_member("bia@example.com", true);
    clash.id = first.id;
    let err = repo.upsert_member(&clash).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict));
}

#[tokio::test]
async fn storage_sqlite_migrates_twice() {
    let url = "sqlite:file:memdb_storage_twice?mode=memory&cache=shared";
    let first = Storage::sqlite(url).await.expect("first open");
    first.kv.put_value("user_session", "{}").await.unwrap();

    let second = Storage::sqlite(url).await.expect("second open");
    assert_eq!(
        second.kv.get_value("user_session").await.unwrap().as_deref(),
        Some("{}")
    );
}
