//! Tests for OwnershipTransferService and member listing

use rally_groups::{
    DomainEvent, ErrorKind, EventSender, GroupMember, GroupStore, MemberRole, MemberStatus,
    MemberStore, OwnershipTransferService,
};
use sea_orm::DatabaseConnection;
use tempfile::NamedTempFile;

async fn create_test_db(path: &tempfile::NamedTempFile) -> DatabaseConnection {
    let db = sea_orm::Database::connect(&format!(
        "sqlite:{}?mode=rwc",
        path.path().to_str().unwrap().replace("\\", "/")
    ))
    .await
    .expect("Failed to connect to database");

    // Run migrations
    <rally_groups::migration::Migrator as rally_groups::migration::MigratorTrait>::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

fn member(id: &str, group_id: &str, user_id: &str, role: MemberRole, joined_at: i64) -> GroupMember {
    GroupMember {
        id: id.to_string(),
        group_id: group_id.to_string(),
        user_id: user_id.to_string(),
        role,
        status: MemberStatus::Accepted,
        joined_at,
    }
}

/// g1 owned by alice (m1), with bob (m2) as a plain member
async fn seed_group(db: &DatabaseConnection) {
    GroupStore::new(db.clone())
        .create("g1", "Reading club", "alice")
        .await
        .expect("Failed to create group");
    MemberStore::insert(db, &member("m1", "g1", "alice", MemberRole::Owner, 1_000))
        .await
        .expect("Failed to seed m1");
    MemberStore::insert(db, &member("m2", "g1", "bob", MemberRole::Member, 2_000))
        .await
        .expect("Failed to seed m2");
}

fn role_of<'a>(members: &'a [GroupMember], id: &str) -> MemberRole {
    members.iter().find(|m| m.id == id).expect("member missing").role
}

#[tokio::test]
async fn test_transfer_swaps_roles_and_owner_pointer() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    seed_group(&db).await;

    let service = OwnershipTransferService::new(db.clone());
    service
        .transfer_ownership("g1", "m2")
        .await
        .expect("Transfer must succeed");

    let members = MemberStore::new(db.clone()).list_by_group("g1").await.unwrap();
    assert_eq!(role_of(&members, "m1"), MemberRole::Admin);
    assert_eq!(role_of(&members, "m2"), MemberRole::Owner);

    let owners = members.iter().filter(|m| m.role == MemberRole::Owner).count();
    assert_eq!(owners, 1, "exactly one owner after transfer");

    let group = GroupStore::new(db).get("g1").await.unwrap().unwrap();
    assert_eq!(group.owner_user_id, "bob");
}

#[tokio::test]
async fn test_transfer_is_idempotent() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    seed_group(&db).await;

    let service = OwnershipTransferService::new(db.clone());
    service.transfer_ownership("g1", "m2").await.unwrap();
    service.transfer_ownership("g1", "m2").await.unwrap();

    let members = MemberStore::new(db.clone()).list_by_group("g1").await.unwrap();
    assert_eq!(role_of(&members, "m1"), MemberRole::Admin);
    assert_eq!(role_of(&members, "m2"), MemberRole::Owner);
    assert_eq!(
        members.iter().filter(|m| m.role == MemberRole::Owner).count(),
        1
    );

    let group = GroupStore::new(db).get("g1").await.unwrap().unwrap();
    assert_eq!(group.owner_user_id, "bob");
}

#[tokio::test]
async fn test_transfer_to_unknown_member_changes_nothing() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    seed_group(&db).await;

    let service = OwnershipTransferService::new(db.clone());
    let err = service
        .transfer_ownership("g1", "m_ghost")
        .await
        .expect_err("Unknown member must fail");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // The whole transaction rolled back: prior owner keeps the role
    let members = MemberStore::new(db.clone()).list_by_group("g1").await.unwrap();
    assert_eq!(role_of(&members, "m1"), MemberRole::Owner);
    assert_eq!(role_of(&members, "m2"), MemberRole::Member);

    let group = GroupStore::new(db).get("g1").await.unwrap().unwrap();
    assert_eq!(group.owner_user_id, "alice");
}

#[tokio::test]
async fn test_transfer_to_member_of_another_group_is_rejected() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    seed_group(&db).await;
    MemberStore::insert(&db, &member("m3", "g2", "carol", MemberRole::Owner, 3_000))
        .await
        .unwrap();

    let service = OwnershipTransferService::new(db.clone());
    let err = service.transfer_ownership("g1", "m3").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Neither group was touched
    let g1 = MemberStore::new(db.clone()).list_by_group("g1").await.unwrap();
    assert_eq!(role_of(&g1, "m1"), MemberRole::Owner);
    let g2 = MemberStore::new(db).list_by_group("g2").await.unwrap();
    assert_eq!(role_of(&g2, "m3"), MemberRole::Owner);
}

#[tokio::test]
async fn test_transfer_repairs_ownerless_group() {
    // No current owner: a data-integrity anomaly upstream. The transfer
    // still proceeds and restores single ownership as a postcondition.
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    GroupStore::new(db.clone())
        .create("g3", "Orphans", "nobody")
        .await
        .unwrap();
    MemberStore::insert(&db, &member("m4", "g3", "dave", MemberRole::Member, 1_000))
        .await
        .unwrap();
    MemberStore::insert(&db, &member("m5", "g3", "erin", MemberRole::Member, 2_000))
        .await
        .unwrap();

    let service = OwnershipTransferService::new(db.clone());
    service.transfer_ownership("g3", "m5").await.unwrap();

    let members = MemberStore::new(db.clone()).list_by_group("g3").await.unwrap();
    assert_eq!(role_of(&members, "m5"), MemberRole::Owner);
    assert_eq!(
        members.iter().filter(|m| m.role == MemberRole::Owner).count(),
        1
    );

    let group = GroupStore::new(db).get("g3").await.unwrap().unwrap();
    assert_eq!(group.owner_user_id, "erin");
}

#[tokio::test]
async fn test_transfer_rejects_blank_input() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    let service = OwnershipTransferService::new(db);

    let err = service.transfer_ownership("g1", "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = service.transfer_ownership(" ", "m2").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_transfer_emits_ownership_event() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    seed_group(&db).await;

    let (events, mut rx) = EventSender::channel();
    let service = OwnershipTransferService::new(db).with_events(events);
    service.transfer_ownership("g1", "m2").await.unwrap();

    let event = rx.recv().await.expect("Event must be emitted after commit");
    assert_eq!(
        event,
        DomainEvent::OwnershipTransferred {
            group_id: "g1".to_string(),
            new_owner_member_id: "m2".to_string(),
            new_owner_user_id: "bob".to_string(),
        }
    );
}

#[tokio::test]
async fn test_list_members_orders_by_most_recent_join() {
    let temp_file = NamedTempFile::new().unwrap();
    let db = create_test_db(&temp_file).await;
    MemberStore::insert(&db, &member("m1", "g1", "alice", MemberRole::Owner, 1_000))
        .await
        .unwrap();
    MemberStore::insert(&db, &member("m2", "g1", "bob", MemberRole::Member, 3_000))
        .await
        .unwrap();
    MemberStore::insert(&db, &member("m3", "g1", "carol", MemberRole::Member, 2_000))
        .await
        .unwrap();
    MemberStore::insert(&db, &member("m9", "g2", "zoe", MemberRole::Owner, 9_000))
        .await
        .unwrap();

    let members = MemberStore::new(db).list_by_group("g1").await.unwrap();
    let ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["m2", "m3", "m1"]);
}
