//! Settlement and NPC relationships through the full stack.

use echoledger_domain::{NpcId, RelationType, SettlementId};

use super::*;

#[tokio::test]
async fn reversed_upsert_updates_the_same_record() {
    let app = test_app().await;
    let a = seed_settlement(&app, "Aldmoor", "north").await;
    let b = seed_settlement(&app, "Briarholt", "north").await;
    let relationships = &app.use_cases.settlement.relationships;

    let created = relationships
        .upsert(a.id, b.id, 70)
        .await
        .expect("upsert");
    let updated = relationships
        .upsert(b.id, a.id, 40)
        .await
        .expect("upsert");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.score, 40);
    assert_eq!(updated.settlement_a, a.id);
    assert_eq!(updated.settlement_b, b.id);
    assert!(updated.last_updated > created.last_updated);
    assert_eq!(updated.start_date, created.start_date);

    for id in [a.id, b.id] {
        let all = relationships.for_settlement(id).await.expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].score, 40);
    }
    let between = relationships
        .between(b.id, a.id)
        .await
        .expect("between")
        .expect("present");
    assert_eq!(between, updated);
}

#[tokio::test]
async fn upsert_with_unknown_settlement_is_a_constraint_violation() {
    let app = test_app().await;
    let a = seed_settlement(&app, "Aldmoor", "north").await;

    let err = app
        .use_cases
        .settlement
        .relationships
        .upsert(a.id, SettlementId::new(), 55)
        .await
        .expect_err("rejected by storage");

    assert!(err.is_constraint_violation());
    assert!(app
        .use_cases
        .settlement
        .relationships
        .for_settlement(a.id)
        .await
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn several_relationship_types_coexist_for_one_pair() {
    let app = test_app().await;
    let home = seed_settlement(&app, "Thornwick", "north").await;
    let x = seed_npc(&app, "Xan", &home).await;
    let y = seed_npc(&app, "Yara", &home).await;
    let relationships = &app.use_cases.npc.relationships;

    let family = relationships
        .create(x.id, y.id, RelationType::Family, 80, None)
        .await
        .expect("create")
        .expect("both exist");
    let enemy = relationships
        .create(y.id, x.id, RelationType::Enemy, -40, None)
        .await
        .expect("create")
        .expect("both exist");

    let for_x = relationships.for_npc(x.id, false).await.expect("list");
    assert_eq!(for_x.len(), 2);
    assert!(for_x.contains(&family));
    assert!(for_x.contains(&enemy));

    relationships.end(enemy.id).await.expect("end").expect("present");
    let active = relationships.for_npc(x.id, true).await.expect("list");
    assert_eq!(active, vec![family]);
}

#[tokio::test]
async fn relationship_with_unknown_npc_creates_nothing() {
    let app = test_app().await;
    let home = seed_settlement(&app, "Thornwick", "north").await;
    let x = seed_npc(&app, "Xan", &home).await;

    let result = app
        .use_cases
        .npc
        .relationships
        .create(x.id, NpcId::new(), RelationType::Friend, 10, None)
        .await
        .expect("create");

    assert!(result.is_none());
    assert!(app
        .use_cases
        .npc
        .relationships
        .for_npc(x.id, false)
        .await
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn relationship_events_accumulate_newest_first() {
    let app = test_app().await;
    let home = seed_settlement(&app, "Thornwick", "north").await;
    let x = seed_npc(&app, "Xan", &home).await;
    let y = seed_npc(&app, "Yara", &home).await;
    let relationships = &app.use_cases.npc.relationships;
    let rel = relationships
        .create(x.id, y.id, RelationType::Romantic, 50, None)
        .await
        .expect("create")
        .expect("both exist");

    relationships
        .record_event(rel.id, "courted", "Flowers at the well", None)
        .await
        .expect("event")
        .expect("relationship exists");
    relationships
        .record_event(rel.id, "married", "Temple of the Echo", None)
        .await
        .expect("event")
        .expect("relationship exists");

    let events = relationships.events(rel.id).await.expect("events");
    let kinds: Vec<&str> = events.iter().map(|e| e.event_type.as_str()).collect();
    assert_eq!(kinds, vec!["married", "courted"]);
}
