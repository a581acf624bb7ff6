//! SQLite NPC repository implementation.

use async_trait::async_trait;
use echoledger_domain::*;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::helpers::{
    encode_json, encode_opt_time, encode_time, encode_time_of_day, map_sqlx, RowExt,
};
use crate::infrastructure::ports::{NpcRepo, RepoError};

const NPC_COLUMNS: &str = "id, name, age, birth_date, gender, sexuality, occupation, \
     marital_status, is_alive, location_id, devotion, independent_thinking, health, happiness, \
     wealth, memory_id, last_conversation_time, attributes, created_at, updated_at, death_date";

const RELATIONSHIP_COLUMNS: &str = "id, initiator_id, recipient_id, relationship_type, \
     strength, start_date, end_date, is_active, details";

const ROUTINE_COLUMNS: &str =
    "id, npc_id, activity_type, start_time, end_time, location_id, description, priority";

/// Repository for NPCs and everything attached to them.
pub struct SqliteNpcRepo {
    pool: SqlitePool,
}

impl SqliteNpcRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// Row conversion
// =============================================================================

fn row_to_npc(row: &SqliteRow) -> Result<Npc, RepoError> {
    let mut npc = Npc::new(
        row.get_value::<String>("name")?,
        row.get_value("age")?,
        row.get_time("birth_date")?,
        row.get_label("gender")?,
        row.get_value::<String>("occupation")?,
        row.get_id("location_id")?,
        row.get_time("created_at")?,
    )
    .with_id(row.get_id("id")?)
    .with_devotion(row.get_value("devotion")?)
    .with_sexuality(row.get_label("sexuality")?)
    .with_marital_status(row.get_label("marital_status")?)
    .with_independent_thinking(row.get_value("independent_thinking")?)
    .with_attributes(row.get_json("attributes")?);

    npc.is_alive = row.get_value("is_alive")?;
    npc.health = row.get_value("health")?;
    npc.happiness = row.get_value("happiness")?;
    npc.wealth = row.get_value("wealth")?;
    npc.memory_id = row.get_value("memory_id")?;
    npc.last_conversation_time = row.get_opt_time("last_conversation_time")?;
    npc.updated_at = row.get_time("updated_at")?;
    npc.death_date = row.get_opt_time("death_date")?;
    Ok(npc)
}

fn row_to_personality(row: &SqliteRow) -> Result<NpcPersonality, RepoError> {
    Ok(NpcPersonality {
        id: row.get_id("id")?,
        npc_id: row.get_id("npc_id")?,
        extraversion: row.get_value("extraversion")?,
        agreeableness: row.get_value("agreeableness")?,
        conscientiousness: row.get_value("conscientiousness")?,
        neuroticism: row.get_value("neuroticism")?,
        openness: row.get_value("openness")?,
        memory_reliability: row.get_value("memory_reliability")?,
    })
}

fn row_to_history(row: &SqliteRow) -> Result<NpcDevotionHistoryEntry, RepoError> {
    Ok(NpcDevotionHistoryEntry::from_storage(
        row.get_id("id")?,
        row.get_id("npc_id")?,
        row.get_value("previous_devotion")?,
        row.get_value("new_devotion")?,
        row.get_value("reason")?,
        row.get_time("change_date")?,
        row.get_json("details")?,
    ))
}

fn row_to_relationship(row: &SqliteRow) -> Result<NpcRelationship, RepoError> {
    Ok(NpcRelationship {
        id: row.get_id("id")?,
        initiator: row.get_id("initiator_id")?,
        recipient: row.get_id("recipient_id")?,
        relationship_type: row.get_label("relationship_type")?,
        strength: row.get_value("strength")?,
        start_date: row.get_time("start_date")?,
        end_date: row.get_opt_time("end_date")?,
        is_active: row.get_value("is_active")?,
        details: row.get_json("details")?,
    })
}

fn row_to_event(row: &SqliteRow) -> Result<RelationshipEvent, RepoError> {
    Ok(RelationshipEvent {
        id: row.get_id("id")?,
        relationship_id: row.get_id("relationship_id")?,
        event_date: row.get_time("event_date")?,
        event_type: row.get_value("event_type")?,
        description: row.get_value("description")?,
        details: row.get_json("details")?,
    })
}

fn row_to_activity(row: &SqliteRow) -> Result<DailyRoutineActivity, RepoError> {
    Ok(DailyRoutineActivity {
        id: row.get_id("id")?,
        npc_id: row.get_id("npc_id")?,
        activity_type: row.get_label("activity_type")?,
        start_time: row.get_time_of_day("start_time")?,
        end_time: row.get_time_of_day("end_time")?,
        location_id: row.get_opt_id("location_id")?,
        description: row.get_value("description")?,
        priority: row.get_value("priority")?,
    })
}

fn push_conjunction(qb: &mut QueryBuilder<'_, Sqlite>, has_where: &mut bool) {
    qb.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

#[async_trait]
impl NpcRepo for SqliteNpcRepo {
    // =========================================================================
    // CRUD
    // =========================================================================

    async fn get(&self, id: NpcId) -> Result<Option<Npc>, RepoError> {
        let row = sqlx::query(&format!("SELECT {NPC_COLUMNS} FROM npcs WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx("npc.get"))?;

        row.as_ref().map(row_to_npc).transpose()
    }

    async fn create(
        &self,
        npc: &Npc,
        personality: Option<NpcPersonality>,
    ) -> Result<(), RepoError> {
        let attributes = encode_json(&npc.attributes)?;
        let mut tx = self.pool.begin().await.map_err(map_sqlx("npc.create"))?;

        sqlx::query(&format!(
            "INSERT INTO npcs ({NPC_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(npc.id.to_string())
        .bind(&npc.name)
        .bind(npc.age)
        .bind(encode_time(npc.birth_date))
        .bind(npc.gender.as_str())
        .bind(npc.sexuality.as_str())
        .bind(&npc.occupation)
        .bind(npc.marital_status.as_str())
        .bind(npc.is_alive)
        .bind(npc.location_id.to_string())
        .bind(npc.devotion())
        .bind(npc.independent_thinking)
        .bind(npc.health)
        .bind(npc.happiness)
        .bind(npc.wealth)
        .bind(npc.memory_id.as_deref())
        .bind(encode_opt_time(npc.last_conversation_time))
        .bind(attributes)
        .bind(encode_time(npc.created_at))
        .bind(encode_time(npc.updated_at))
        .bind(encode_opt_time(npc.death_date))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx("npc.create"))?;

        if let Some(personality) = personality {
            sqlx::query(
                "INSERT INTO npc_personalities (id, npc_id, extraversion, agreeableness, \
                 conscientiousness, neuroticism, openness, memory_reliability) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(personality.id.to_string())
            .bind(npc.id.to_string())
            .bind(personality.extraversion)
            .bind(personality.agreeableness)
            .bind(personality.conscientiousness)
            .bind(personality.neuroticism)
            .bind(personality.openness)
            .bind(personality.memory_reliability)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx("npc.create_personality"))?;
        }

        tx.commit().await.map_err(map_sqlx("npc.create"))?;
        Ok(())
    }

    async fn get_personality(&self, npc_id: NpcId) -> Result<Option<NpcPersonality>, RepoError> {
        let row = sqlx::query(
            "SELECT id, npc_id, extraversion, agreeableness, conscientiousness, neuroticism, \
             openness, memory_reliability FROM npc_personalities WHERE npc_id = ?",
        )
        .bind(npc_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("npc.get_personality"))?;

        row.as_ref().map(row_to_personality).transpose()
    }

    async fn update(&self, npc: &Npc) -> Result<(), RepoError> {
        let attributes = encode_json(&npc.attributes)?;

        // devotion and created_at are not part of the statement
        let result = sqlx::query(
            "UPDATE npcs SET name = ?, age = ?, birth_date = ?, gender = ?, sexuality = ?, \
             occupation = ?, marital_status = ?, is_alive = ?, location_id = ?, \
             independent_thinking = ?, health = ?, happiness = ?, wealth = ?, memory_id = ?, \
             last_conversation_time = ?, attributes = ?, updated_at = ?, death_date = ? \
             WHERE id = ?",
        )
        .bind(&npc.name)
        .bind(npc.age)
        .bind(encode_time(npc.birth_date))
        .bind(npc.gender.as_str())
        .bind(npc.sexuality.as_str())
        .bind(&npc.occupation)
        .bind(npc.marital_status.as_str())
        .bind(npc.is_alive)
        .bind(npc.location_id.to_string())
        .bind(npc.independent_thinking)
        .bind(npc.health)
        .bind(npc.happiness)
        .bind(npc.wealth)
        .bind(npc.memory_id.as_deref())
        .bind(encode_opt_time(npc.last_conversation_time))
        .bind(attributes)
        .bind(encode_time(npc.updated_at))
        .bind(encode_opt_time(npc.death_date))
        .bind(npc.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("npc.update"))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Npc", npc.id));
        }
        Ok(())
    }

    async fn list(&self, filter: &NpcFilter, page: Page) -> Result<Vec<Npc>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {NPC_COLUMNS} FROM npcs"));
        let mut has_where = false;

        if let Some(settlement_id) = filter.settlement_id {
            push_conjunction(&mut qb, &mut has_where);
            qb.push("location_id = ").push_bind(settlement_id.to_string());
        }
        if let Some(is_alive) = filter.is_alive {
            push_conjunction(&mut qb, &mut has_where);
            qb.push("is_alive = ").push_bind(is_alive);
        }

        qb.push(" ORDER BY created_at, rowid LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(page.offset));

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("npc.list"))?;

        rows.iter().map(row_to_npc).collect()
    }

    // =========================================================================
    // Devotion ledger
    // =========================================================================

    async fn record_devotion_change(
        &self,
        npc: &Npc,
        entry: &NpcDevotionHistoryEntry,
    ) -> Result<(), RepoError> {
        let details = encode_json(entry.details())?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx("npc.record_devotion_change"))?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM npcs WHERE id = ?")
            .bind(npc.id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx("npc.record_devotion_change"))?;
        if exists.is_none() {
            return Err(RepoError::not_found("Npc", npc.id));
        }

        sqlx::query(
            "INSERT INTO npc_devotion_history \
             (id, npc_id, previous_devotion, new_devotion, reason, change_date, details) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(entry.id().to_string())
        .bind(entry.entity_id().to_string())
        .bind(entry.previous_devotion())
        .bind(entry.new_devotion())
        .bind(entry.reason())
        .bind(encode_time(entry.change_date()))
        .bind(details)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx("npc.record_devotion_change"))?;

        sqlx::query("UPDATE npcs SET devotion = ?, updated_at = ? WHERE id = ?")
            .bind(npc.devotion())
            .bind(encode_time(npc.updated_at))
            .bind(npc.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx("npc.record_devotion_change"))?;

        tx.commit()
            .await
            .map_err(map_sqlx("npc.record_devotion_change"))?;
        Ok(())
    }

    async fn devotion_history(
        &self,
        npc_id: NpcId,
        page: Page,
    ) -> Result<Vec<NpcDevotionHistoryEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, npc_id, previous_devotion, new_devotion, reason, change_date, details \
             FROM npc_devotion_history WHERE npc_id = ? \
             ORDER BY change_date DESC, rowid DESC LIMIT ? OFFSET ?",
        )
        .bind(npc_id.to_string())
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("npc.devotion_history"))?;

        rows.iter().map(row_to_history).collect()
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    async fn save_relationship(&self, relationship: &NpcRelationship) -> Result<(), RepoError> {
        let details = encode_json(&relationship.details)?;

        sqlx::query(&format!(
            "INSERT INTO npc_relationships ({RELATIONSHIP_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET relationship_type = excluded.relationship_type, \
             strength = excluded.strength, end_date = excluded.end_date, \
             is_active = excluded.is_active, details = excluded.details"
        ))
        .bind(relationship.id.to_string())
        .bind(relationship.initiator.to_string())
        .bind(relationship.recipient.to_string())
        .bind(relationship.relationship_type.as_str())
        .bind(relationship.strength)
        .bind(encode_time(relationship.start_date))
        .bind(encode_opt_time(relationship.end_date))
        .bind(relationship.is_active)
        .bind(details)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("npc.save_relationship"))?;

        Ok(())
    }

    async fn get_relationship(
        &self,
        id: NpcRelationshipId,
    ) -> Result<Option<NpcRelationship>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM npc_relationships WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("npc.get_relationship"))?;

        row.as_ref().map(row_to_relationship).transpose()
    }

    async fn relationships_for(
        &self,
        npc_id: NpcId,
        active_only: bool,
    ) -> Result<Vec<NpcRelationship>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM npc_relationships WHERE (initiator_id = "
        ));
        qb.push_bind(npc_id.to_string())
            .push(" OR recipient_id = ")
            .push_bind(npc_id.to_string())
            .push(")");
        if active_only {
            qb.push(" AND is_active = 1");
        }
        qb.push(" ORDER BY start_date, rowid");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("npc.relationships_for"))?;

        rows.iter().map(row_to_relationship).collect()
    }

    async fn save_relationship_event(&self, event: &RelationshipEvent) -> Result<(), RepoError> {
        let details = encode_json(&event.details)?;

        sqlx::query(
            "INSERT INTO npc_relationship_events \
             (id, relationship_id, event_date, event_type, description, details) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(event.id.to_string())
        .bind(event.relationship_id.to_string())
        .bind(encode_time(event.event_date))
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(details)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("npc.save_relationship_event"))?;

        Ok(())
    }

    async fn relationship_events(
        &self,
        relationship_id: NpcRelationshipId,
    ) -> Result<Vec<RelationshipEvent>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, relationship_id, event_date, event_type, description, details \
             FROM npc_relationship_events WHERE relationship_id = ? \
             ORDER BY event_date DESC, rowid DESC",
        )
        .bind(relationship_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("npc.relationship_events"))?;

        rows.iter().map(row_to_event).collect()
    }

    // =========================================================================
    // Daily routine
    // =========================================================================

    async fn add_routine_activity(
        &self,
        activity: &DailyRoutineActivity,
    ) -> Result<(), RepoError> {
        sqlx::query(&format!(
            "INSERT INTO npc_routine_activities ({ROUTINE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(activity.id.to_string())
        .bind(activity.npc_id.to_string())
        .bind(activity.activity_type.as_str())
        .bind(encode_time_of_day(activity.start_time))
        .bind(encode_time_of_day(activity.end_time))
        .bind(activity.location_id.map(|id| id.to_string()))
        .bind(&activity.description)
        .bind(activity.priority)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("npc.add_routine_activity"))?;

        Ok(())
    }

    async fn routine(&self, npc_id: NpcId) -> Result<Vec<DailyRoutineActivity>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {ROUTINE_COLUMNS} FROM npc_routine_activities WHERE npc_id = ? \
             ORDER BY start_time, priority DESC"
        ))
        .bind(npc_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("npc.routine"))?;

        rows.iter().map(row_to_activity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::SettlementRepo;
    use crate::infrastructure::sqlite::{memory_pool, SqliteSettlementRepo};
    use chrono::{DateTime, NaiveTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    async fn setup() -> (SqliteNpcRepo, Settlement) {
        let pool = memory_pool().await;
        let settlement = Settlement::new(
            "Harrowgate",
            SettlementType::City,
            "north",
            (0.0, 0.0),
            EconomyType::Ore,
            at(1),
        );
        SqliteSettlementRepo::new(pool.clone())
            .create(&settlement)
            .await
            .expect("create settlement");
        (SqliteNpcRepo::new(pool), settlement)
    }

    fn npc_in(settlement: &Settlement, name: &str) -> Npc {
        let born = Utc.with_ymd_and_hms(1998, 2, 14, 0, 0, 0).unwrap();
        Npc::new(name, 27, born, Gender::Male, "miner", settlement.id, at(1))
    }

    #[tokio::test]
    async fn create_and_get_round_trips_every_field() {
        let (repo, settlement) = setup().await;
        let mut npc = npc_in(&settlement, "Osric")
            .with_devotion(-20)
            .with_sexuality(Sexuality::Bisexual)
            .with_attributes(Attributes::new().with("scar", "left cheek"));
        npc.memory_id = Some("mem-77".into());
        npc.last_conversation_time = Some(at(3));
        let personality = NpcPersonality::new(npc.id).with_traits(10, 20, 30, 40, 60);

        repo.create(&npc, Some(personality.clone()))
            .await
            .expect("create");

        let stored = repo.get(npc.id).await.expect("get").expect("present");
        assert_eq!(stored, npc);
        let stored_personality = repo
            .get_personality(npc.id)
            .await
            .expect("get personality")
            .expect("present");
        assert_eq!(stored_personality, personality);
    }

    #[tokio::test]
    async fn create_rolls_back_when_personality_is_rejected() {
        let (repo, settlement) = setup().await;
        let npc = npc_in(&settlement, "Brant");
        let personality = NpcPersonality::new(npc.id).with_memory_reliability(250);

        let err = repo
            .create(&npc, Some(personality))
            .await
            .expect_err("out of range personality");

        assert!(err.is_constraint_violation());
        assert_eq!(repo.get(npc.id).await.expect("get"), None);
    }

    #[tokio::test]
    async fn create_with_unknown_settlement_is_a_constraint_violation() {
        let (repo, _) = setup().await;
        let born = Utc.with_ymd_and_hms(1998, 2, 14, 0, 0, 0).unwrap();
        let npc = Npc::new("Lost", 30, born, Gender::Other, "wanderer", SettlementId::new(), at(1));

        let err = repo.create(&npc, None).await.expect_err("orphan npc");
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn update_never_writes_devotion() {
        let (repo, settlement) = setup().await;
        let npc = npc_in(&settlement, "Edda").with_devotion(10);
        repo.create(&npc, None).await.expect("create");

        // A stale copy carrying a different devotion must not leak it into storage.
        let mut stale = npc.clone().with_devotion(99);
        stale.occupation = "baker".into();
        repo.update(&stale).await.expect("update");

        let stored = repo.get(npc.id).await.expect("get").expect("present");
        assert_eq!(stored.occupation, "baker");
        assert_eq!(stored.devotion(), 10);
    }

    #[tokio::test]
    async fn update_of_missing_npc_is_not_found() {
        let (repo, settlement) = setup().await;
        let err = repo
            .update(&npc_in(&settlement, "Ghost"))
            .await
            .expect_err("missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_applies_filters_and_page() {
        let (repo, settlement) = setup().await;
        for name in ["A", "B", "C"] {
            repo.create(&npc_in(&settlement, name), None)
                .await
                .expect("create");
        }
        let mut dead = npc_in(&settlement, "D");
        dead.is_alive = false;
        repo.create(&dead, None).await.expect("create");

        let alive = repo
            .list(&NpcFilter::default().alive(true), Page::default())
            .await
            .expect("list");
        assert_eq!(alive.len(), 3);
        assert!(alive.iter().all(|n| n.is_alive));

        let everyone_here = repo
            .list(
                &NpcFilter::default().in_settlement(settlement.id),
                Page::new(1, 2),
            )
            .await
            .expect("list");
        assert_eq!(everyone_here.len(), 2);

        let elsewhere = repo
            .list(
                &NpcFilter::default().in_settlement(SettlementId::new()),
                Page::default(),
            )
            .await
            .expect("list");
        assert!(elsewhere.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_devotion_leaves_no_trace() {
        let (repo, settlement) = setup().await;
        let mut npc = npc_in(&settlement, "Vell");
        repo.create(&npc, None).await.expect("create");

        let entry = npc.record_devotion(150, "zealotry", None, at(2));
        let err = repo
            .record_devotion_change(&npc, &entry)
            .await
            .expect_err("check constraint");

        assert!(err.is_constraint_violation());
        let stored = repo.get(npc.id).await.expect("get").expect("present");
        assert_eq!(stored.devotion(), 50);
        assert_eq!(stored.updated_at, at(1));
        let history = repo
            .devotion_history(npc.id, Page::history())
            .await
            .expect("history");
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn devotion_change_for_missing_npc_is_not_found() {
        let (repo, settlement) = setup().await;
        let mut npc = npc_in(&settlement, "Never saved");
        let entry = npc.record_devotion(5, "rumour", None, at(2));

        let err = repo
            .record_devotion_change(&npc, &entry)
            .await
            .expect_err("missing");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn history_is_newest_first_with_ties_in_insertion_order() {
        let (repo, settlement) = setup().await;
        let mut npc = npc_in(&settlement, "Iona");
        repo.create(&npc, None).await.expect("create");

        for (value, day) in [(40, 2), (30, 3), (20, 3)] {
            let entry = npc.record_devotion(value, "sermon", None, at(day));
            repo.record_devotion_change(&npc, &entry)
                .await
                .expect("record");
        }

        let history = repo
            .devotion_history(npc.id, Page::history())
            .await
            .expect("history");
        let values: Vec<i32> = history.iter().map(|e| e.new_devotion()).collect();
        assert_eq!(values, vec![20, 30, 40]);
        assert_eq!(history[0].previous_devotion(), 30);

        let second_page = repo
            .devotion_history(npc.id, Page::new(1, 1))
            .await
            .expect("history");
        assert_eq!(second_page[0].new_devotion(), 30);
    }

    #[tokio::test]
    async fn relationships_match_either_side_and_filter_inactive() {
        let (repo, settlement) = setup().await;
        let (x, y, z) = (
            npc_in(&settlement, "X"),
            npc_in(&settlement, "Y"),
            npc_in(&settlement, "Z"),
        );
        for npc in [&x, &y, &z] {
            repo.create(npc, None).await.expect("create");
        }

        let family = NpcRelationship::new(x.id, y.id, RelationType::Family, at(2));
        let enemy = NpcRelationship::new(x.id, y.id, RelationType::Enemy, at(3));
        let former = NpcRelationship::new(z.id, x.id, RelationType::Friend, at(2)).ended(at(4));
        for rel in [&family, &enemy, &former] {
            repo.save_relationship(rel).await.expect("save");
        }

        let all = repo.relationships_for(x.id, false).await.expect("list");
        assert_eq!(all.len(), 3);

        let active = repo.relationships_for(x.id, true).await.expect("list");
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|r| r.is_active));

        let for_y = repo.relationships_for(y.id, false).await.expect("list");
        assert_eq!(for_y.len(), 2);
    }

    #[tokio::test]
    async fn relationship_events_are_newest_first() {
        let (repo, settlement) = setup().await;
        let (x, y) = (npc_in(&settlement, "X"), npc_in(&settlement, "Y"));
        repo.create(&x, None).await.expect("create");
        repo.create(&y, None).await.expect("create");
        let rel = NpcRelationship::new(x.id, y.id, RelationType::Romantic, at(2));
        repo.save_relationship(&rel).await.expect("save");

        let met = RelationshipEvent::new(rel.id, "met", "At the harvest fair", None, at(2));
        let married = RelationshipEvent::new(rel.id, "married", "Temple wedding", None, at(9));
        repo.save_relationship_event(&met).await.expect("event");
        repo.save_relationship_event(&married).await.expect("event");

        let events = repo.relationship_events(rel.id).await.expect("events");
        assert_eq!(events, vec![married, met]);
    }

    #[tokio::test]
    async fn routine_is_ordered_by_start_time() {
        let (repo, settlement) = setup().await;
        let npc = npc_in(&settlement, "Tamsin");
        repo.create(&npc, None).await.expect("create");

        let time = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let work = DailyRoutineActivity::new(npc.id, ActivityType::Work, time(8), time(17), "Mine")
            .at(settlement.id);
        let sleep = DailyRoutineActivity::new(npc.id, ActivityType::Sleep, time(0), time(6), "Bed");
        let pray = DailyRoutineActivity::new(npc.id, ActivityType::Worship, time(8), time(9), "Shrine")
            .with_priority(5);
        for activity in [&work, &sleep, &pray] {
            repo.add_routine_activity(activity).await.expect("add");
        }

        let routine = repo.routine(npc.id).await.expect("routine");
        assert_eq!(routine, vec![sleep, pray, work]);
    }
}
