//! SQLite settlement repository implementation.

use async_trait::async_trait;
use echoledger_domain::*;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::helpers::{encode_json, encode_time, map_sqlx, RowExt};
use crate::infrastructure::ports::{RepoError, SettlementRepo};

const SETTLEMENT_COLUMNS: &str = "id, name, settlement_type, population, founded_date, \
     coordinates_x, coordinates_y, region, primary_economy, secondary_economy, wealth_rating, \
     trade_activity, devotion, independent_thinking, is_active, safety_rating, quality_of_life, \
     cultural_traits, notable_features, attributes, created_at, updated_at";

const LOCATION_COLUMNS: &str = "id, settlement_id, name, location_type, description, capacity, \
     is_public, coordinates_x, coordinates_y, attributes";

const RELATIONSHIP_COLUMNS: &str = "id, settlement_a_id, settlement_b_id, score, start_date, \
     last_updated, trade_volume, details";

/// Repository for settlements, their locations and their relationships.
pub struct SqliteSettlementRepo {
    pool: SqlitePool,
}

impl SqliteSettlementRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// =============================================================================
// Row conversion
// =============================================================================

fn row_to_settlement(row: &SqliteRow) -> Result<Settlement, RepoError> {
    let mut settlement = Settlement::new(
        row.get_value::<String>("name")?,
        row.get_label("settlement_type")?,
        row.get_value::<String>("region")?,
        (row.get_value("coordinates_x")?, row.get_value("coordinates_y")?),
        row.get_label("primary_economy")?,
        row.get_time("created_at")?,
    )
    .with_id(row.get_id("id")?)
    .with_devotion(row.get_value("devotion")?)
    .with_population(row.get_value("population")?)
    .with_founded_date(row.get_time("founded_date")?)
    .with_independent_thinking(row.get_value("independent_thinking")?)
    .with_attributes(row.get_json("attributes")?);

    settlement.secondary_economy = row.get_opt_label("secondary_economy")?;
    settlement.wealth_rating = row.get_value("wealth_rating")?;
    settlement.trade_activity = row.get_value("trade_activity")?;
    settlement.is_active = row.get_value("is_active")?;
    settlement.safety_rating = row.get_value("safety_rating")?;
    settlement.quality_of_life = row.get_value("quality_of_life")?;
    settlement.cultural_traits = row.get_json("cultural_traits")?;
    settlement.notable_features = row.get_json("notable_features")?;
    settlement.updated_at = row.get_time("updated_at")?;
    Ok(settlement)
}

fn row_to_history(row: &SqliteRow) -> Result<SettlementDevotionHistoryEntry, RepoError> {
    Ok(SettlementDevotionHistoryEntry::from_storage(
        row.get_id("id")?,
        row.get_id("settlement_id")?,
        row.get_value("previous_devotion")?,
        row.get_value("new_devotion")?,
        row.get_value("reason")?,
        row.get_time("change_date")?,
        row.get_json("details")?,
    ))
}

fn row_to_location(row: &SqliteRow) -> Result<SettlementLocation, RepoError> {
    Ok(SettlementLocation {
        id: row.get_id("id")?,
        settlement_id: row.get_id("settlement_id")?,
        name: row.get_value("name")?,
        location_type: row.get_value("location_type")?,
        description: row.get_value("description")?,
        capacity: row.get_value("capacity")?,
        is_public: row.get_value("is_public")?,
        coordinates_x: row.get_value("coordinates_x")?,
        coordinates_y: row.get_value("coordinates_y")?,
        attributes: row.get_json("attributes")?,
    })
}

fn row_to_relationship(row: &SqliteRow) -> Result<SettlementRelationship, RepoError> {
    Ok(SettlementRelationship {
        id: row.get_id("id")?,
        settlement_a: row.get_id("settlement_a_id")?,
        settlement_b: row.get_id("settlement_b_id")?,
        score: row.get_value("score")?,
        start_date: row.get_time("start_date")?,
        last_updated: row.get_time("last_updated")?,
        trade_volume: row.get_value("trade_volume")?,
        details: row.get_json("details")?,
    })
}

fn push_conjunction(qb: &mut QueryBuilder<'_, Sqlite>, has_where: &mut bool) {
    qb.push(if *has_where { " AND " } else { " WHERE " });
    *has_where = true;
}

/// Append the listing predicate. Count and page queries must share it.
fn push_settlement_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &SettlementFilter) {
    let mut has_where = false;

    if let Some(region) = filter.region() {
        push_conjunction(qb, &mut has_where);
        qb.push("region = ").push_bind(region.to_string());
    }
    if let Some(settlement_type) = filter.settlement_type {
        push_conjunction(qb, &mut has_where);
        qb.push("settlement_type = ").push_bind(settlement_type.as_str());
    }
    if let Some(is_active) = filter.is_active {
        push_conjunction(qb, &mut has_where);
        qb.push("is_active = ").push_bind(is_active);
    }
}

#[async_trait]
impl SettlementRepo for SqliteSettlementRepo {
    // =========================================================================
    // CRUD
    // =========================================================================

    async fn get(&self, id: SettlementId) -> Result<Option<Settlement>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {SETTLEMENT_COLUMNS} FROM settlements WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("settlement.get"))?;

        row.as_ref().map(row_to_settlement).transpose()
    }

    async fn create(&self, settlement: &Settlement) -> Result<(), RepoError> {
        let cultural_traits = encode_json(&settlement.cultural_traits)?;
        let notable_features = encode_json(&settlement.notable_features)?;
        let attributes = encode_json(&settlement.attributes)?;

        sqlx::query(&format!(
            "INSERT INTO settlements ({SETTLEMENT_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(settlement.id.to_string())
        .bind(&settlement.name)
        .bind(settlement.settlement_type.as_str())
        .bind(settlement.population)
        .bind(encode_time(settlement.founded_date))
        .bind(settlement.coordinates_x)
        .bind(settlement.coordinates_y)
        .bind(&settlement.region)
        .bind(settlement.primary_economy.as_str())
        .bind(settlement.secondary_economy.map(|e| e.as_str()))
        .bind(settlement.wealth_rating)
        .bind(settlement.trade_activity)
        .bind(settlement.devotion())
        .bind(settlement.independent_thinking)
        .bind(settlement.is_active)
        .bind(settlement.safety_rating)
        .bind(settlement.quality_of_life)
        .bind(cultural_traits)
        .bind(notable_features)
        .bind(attributes)
        .bind(encode_time(settlement.created_at))
        .bind(encode_time(settlement.updated_at))
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("settlement.create"))?;

        Ok(())
    }

    async fn update(&self, settlement: &Settlement) -> Result<(), RepoError> {
        let cultural_traits = encode_json(&settlement.cultural_traits)?;
        let notable_features = encode_json(&settlement.notable_features)?;
        let attributes = encode_json(&settlement.attributes)?;

        // devotion and created_at are not part of the statement
        let result = sqlx::query(
            "UPDATE settlements SET name = ?, settlement_type = ?, population = ?, \
             founded_date = ?, coordinates_x = ?, coordinates_y = ?, region = ?, \
             primary_economy = ?, secondary_economy = ?, wealth_rating = ?, trade_activity = ?, \
             independent_thinking = ?, is_active = ?, safety_rating = ?, quality_of_life = ?, \
             cultural_traits = ?, notable_features = ?, attributes = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&settlement.name)
        .bind(settlement.settlement_type.as_str())
        .bind(settlement.population)
        .bind(encode_time(settlement.founded_date))
        .bind(settlement.coordinates_x)
        .bind(settlement.coordinates_y)
        .bind(&settlement.region)
        .bind(settlement.primary_economy.as_str())
        .bind(settlement.secondary_economy.map(|e| e.as_str()))
        .bind(settlement.wealth_rating)
        .bind(settlement.trade_activity)
        .bind(settlement.independent_thinking)
        .bind(settlement.is_active)
        .bind(settlement.safety_rating)
        .bind(settlement.quality_of_life)
        .bind(cultural_traits)
        .bind(notable_features)
        .bind(attributes)
        .bind(encode_time(settlement.updated_at))
        .bind(settlement.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("settlement.update"))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Settlement", settlement.id));
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &SettlementFilter,
        page: Page,
    ) -> Result<(Vec<Settlement>, u64), RepoError> {
        // Both reads see the same snapshot.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx("settlement.list"))?;

        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM settlements");
        push_settlement_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx("settlement.list_count"))?;

        let mut page_qb =
            QueryBuilder::<Sqlite>::new(format!("SELECT {SETTLEMENT_COLUMNS} FROM settlements"));
        push_settlement_filter(&mut page_qb, filter);
        page_qb
            .push(" ORDER BY name, rowid LIMIT ")
            .push_bind(i64::from(page.limit))
            .push(" OFFSET ")
            .push_bind(i64::from(page.offset));
        let rows = page_qb
            .build()
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx("settlement.list"))?;

        tx.commit().await.map_err(map_sqlx("settlement.list"))?;

        let settlements = rows
            .iter()
            .map(row_to_settlement)
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).map_err(RepoError::serialization)?;
        Ok((settlements, total))
    }

    // =========================================================================
    // Devotion ledger
    // =========================================================================

    async fn record_devotion_change(
        &self,
        settlement: &Settlement,
        entry: &SettlementDevotionHistoryEntry,
    ) -> Result<(), RepoError> {
        let details = encode_json(entry.details())?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx("settlement.record_devotion_change"))?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM settlements WHERE id = ?")
            .bind(settlement.id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx("settlement.record_devotion_change"))?;
        if exists.is_none() {
            return Err(RepoError::not_found("Settlement", settlement.id));
        }

        sqlx::query(
            "INSERT INTO settlement_devotion_history \
             (id, settlement_id, previous_devotion, new_devotion, reason, change_date, details) \
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
        .map_err(map_sqlx("settlement.record_devotion_change"))?;

        sqlx::query("UPDATE settlements SET devotion = ?, updated_at = ? WHERE id = ?")
            .bind(settlement.devotion())
            .bind(encode_time(settlement.updated_at))
            .bind(settlement.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx("settlement.record_devotion_change"))?;

        tx.commit()
            .await
            .map_err(map_sqlx("settlement.record_devotion_change"))?;
        Ok(())
    }

    async fn devotion_history(
        &self,
        settlement_id: SettlementId,
        page: Page,
    ) -> Result<Vec<SettlementDevotionHistoryEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, settlement_id, previous_devotion, new_devotion, reason, change_date, \
             details FROM settlement_devotion_history WHERE settlement_id = ? \
             ORDER BY change_date DESC, rowid DESC LIMIT ? OFFSET ?",
        )
        .bind(settlement_id.to_string())
        .bind(i64::from(page.limit))
        .bind(i64::from(page.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("settlement.devotion_history"))?;

        rows.iter().map(row_to_history).collect()
    }

    // =========================================================================
    // Locations
    // =========================================================================

    async fn save_location(&self, location: &SettlementLocation) -> Result<(), RepoError> {
        let attributes = encode_json(&location.attributes)?;

        sqlx::query(&format!(
            "INSERT INTO settlement_locations ({LOCATION_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ))
        .bind(location.id.to_string())
        .bind(location.settlement_id.to_string())
        .bind(&location.name)
        .bind(&location.location_type)
        .bind(&location.description)
        .bind(location.capacity)
        .bind(location.is_public)
        .bind(location.coordinates_x)
        .bind(location.coordinates_y)
        .bind(attributes)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx("settlement.save_location"))?;

        Ok(())
    }

    async fn locations(
        &self,
        settlement_id: SettlementId,
        filter: &LocationFilter,
    ) -> Result<Vec<SettlementLocation>, RepoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {LOCATION_COLUMNS} FROM settlement_locations WHERE settlement_id = "
        ));
        qb.push_bind(settlement_id.to_string());
        if let Some(location_type) = filter.location_type() {
            qb.push(" AND location_type = ")
                .push_bind(location_type.to_string());
        }
        if let Some(is_public) = filter.is_public {
            qb.push(" AND is_public = ").push_bind(is_public);
        }
        qb.push(" ORDER BY name, rowid");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx("settlement.locations"))?;

        rows.iter().map(row_to_location).collect()
    }

    // =========================================================================
    // Relationships
    // =========================================================================

    async fn upsert_relationship(
        &self,
        candidate: &SettlementRelationship,
    ) -> Result<SettlementRelationship, RepoError> {
        let pair = candidate.pair();
        let details = encode_json(&candidate.details)?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(map_sqlx("settlement.upsert_relationship"))?;

        // An existing row for the pair keeps its id, creation order and start date.
        sqlx::query(
            "INSERT INTO settlement_relationships \
             (id, settlement_a_id, settlement_b_id, pair_low_id, pair_high_id, score, \
             start_date, last_updated, trade_volume, details) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(pair_low_id, pair_high_id) DO UPDATE SET \
             score = excluded.score, last_updated = excluded.last_updated",
        )
        .bind(candidate.id.to_string())
        .bind(candidate.settlement_a.to_string())
        .bind(candidate.settlement_b.to_string())
        .bind(pair.low().to_string())
        .bind(pair.high().to_string())
        .bind(candidate.score)
        .bind(encode_time(candidate.start_date))
        .bind(encode_time(candidate.last_updated))
        .bind(candidate.trade_volume)
        .bind(details)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx("settlement.upsert_relationship"))?;

        let row = sqlx::query(&format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM settlement_relationships \
             WHERE pair_low_id = ? AND pair_high_id = ?"
        ))
        .bind(pair.low().to_string())
        .bind(pair.high().to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx("settlement.upsert_relationship"))?;
        let stored = row_to_relationship(&row)?;

        tx.commit()
            .await
            .map_err(map_sqlx("settlement.upsert_relationship"))?;
        Ok(stored)
    }

    async fn relationship_between(
        &self,
        pair: CanonicalPair<SettlementId>,
    ) -> Result<Option<SettlementRelationship>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM settlement_relationships \
             WHERE pair_low_id = ? AND pair_high_id = ?"
        ))
        .bind(pair.low().to_string())
        .bind(pair.high().to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx("settlement.relationship_between"))?;

        row.as_ref().map(row_to_relationship).transpose()
    }

    async fn relationships_for(
        &self,
        settlement_id: SettlementId,
    ) -> Result<Vec<SettlementRelationship>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM settlement_relationships \
             WHERE pair_low_id = ? OR pair_high_id = ? ORDER BY start_date, rowid"
        ))
        .bind(settlement_id.to_string())
        .bind(settlement_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx("settlement.relationships_for"))?;

        rows.iter().map(row_to_relationship).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::{connect, ensure_schema, memory_pool};
    use crate::infrastructure::config::StoreConfig;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, day, 8, 0, 0).unwrap()
    }

    fn settlement(name: &str, region: &str) -> Settlement {
        Settlement::new(
            name,
            SettlementType::Village,
            region,
            (1.0, 2.0),
            EconomyType::Crops,
            at(1),
        )
    }

    async fn seeded(names: &[&str]) -> (SqliteSettlementRepo, Vec<Settlement>) {
        let repo = SqliteSettlementRepo::new(memory_pool().await);
        let mut created = Vec::new();
        for name in names {
            let s = settlement(name, "north");
            repo.create(&s).await.expect("create");
            created.push(s);
        }
        (repo, created)
    }

    #[tokio::test]
    async fn create_and_get_round_trips_every_field() {
        let repo = SqliteSettlementRepo::new(memory_pool().await);
        let s = settlement("Emberfall", "south")
            .with_population(1200)
            .with_devotion(-35)
            .with_secondary_economy(EconomyType::Wine)
            .with_cultural_trait("fire dancing")
            .with_notable_feature("obsidian gate")
            .with_attributes(Attributes::new().with("festival_month", 9));

        repo.create(&s).await.expect("create");

        let stored = repo.get(s.id).await.expect("get").expect("present");
        assert_eq!(stored, s);
        assert_eq!(repo.get(SettlementId::new()).await.expect("get"), None);
    }

    #[tokio::test]
    async fn update_never_writes_devotion() {
        let (repo, created) = seeded(&["Brindle"]).await;
        let mut stale = created[0].clone().with_devotion(-90);
        stale.apply_patch(
            SettlementPatch {
                population: Some(77),
                ..Default::default()
            },
            at(4),
        );

        repo.update(&stale).await.expect("update");

        let stored = repo.get(stale.id).await.expect("get").expect("present");
        assert_eq!(stored.population, 77);
        assert_eq!(stored.updated_at, at(4));
        assert_eq!(stored.devotion(), 50);
    }

    #[tokio::test]
    async fn list_total_ignores_pagination() {
        let repo = SqliteSettlementRepo::new(memory_pool().await);
        for (name, region) in [
            ("Aster", "north"),
            ("Birch", "north"),
            ("Cairn", "north"),
            ("Dune", "south"),
        ] {
            repo.create(&settlement(name, region)).await.expect("create");
        }
        let north = SettlementFilter::default().in_region("north");

        for page in [Page::new(0, 1), Page::new(2, 10), Page::new(5, 10)] {
            let (rows, total) = repo.list(&north, page).await.expect("list");
            assert_eq!(total, 3);
            assert!(rows.iter().all(|s| s.region == "north"));
        }

        let (rows, _) = repo.list(&north, Page::new(1, 1)).await.expect("list");
        assert_eq!(rows[0].name, "Birch");

        // Empty region is no filter at all.
        let (_, total) = repo
            .list(&SettlementFilter::default().in_region(""), Page::default())
            .await
            .expect("list");
        assert_eq!(total, 4);
    }

    #[tokio::test]
    async fn list_combines_filters_with_and() {
        let repo = SqliteSettlementRepo::new(memory_pool().await);
        let city = Settlement::new(
            "Highmere",
            SettlementType::City,
            "north",
            (0.0, 0.0),
            EconomyType::Ore,
            at(1),
        );
        let ruined = settlement("Ashford", "north").inactive();
        repo.create(&city).await.expect("create");
        repo.create(&ruined).await.expect("create");
        repo.create(&settlement("Fen", "north")).await.expect("create");

        let filter = SettlementFilter::default()
            .in_region("north")
            .of_type(SettlementType::Village)
            .active(true);
        let (rows, total) = repo.list(&filter, Page::default()).await.expect("list");

        assert_eq!(total, 1);
        assert_eq!(rows[0].name, "Fen");
    }

    #[tokio::test]
    async fn upsert_is_symmetric() {
        let (repo, created) = seeded(&["A", "B"]).await;
        let (a, b) = (created[0].id, created[1].id);

        let first = repo
            .upsert_relationship(&SettlementRelationship::new(a, b, 70, at(2)))
            .await
            .expect("insert");
        let second = repo
            .upsert_relationship(&SettlementRelationship::new(b, a, 40, at(3)))
            .await
            .expect("update");

        assert_eq!(second.id, first.id);
        assert_eq!(second.score, 40);
        assert_eq!(second.last_updated, at(3));
        assert_eq!(second.start_date, at(2));
        assert_eq!((second.settlement_a, second.settlement_b), (a, b));

        let all = repo.relationships_for(a).await.expect("list");
        assert_eq!(all, vec![second.clone()]);
        let between = repo
            .relationship_between(CanonicalPair::new(b, a))
            .await
            .expect("between");
        assert_eq!(between, Some(second));
    }

    #[tokio::test]
    async fn upsert_rejects_score_out_of_range() {
        let (repo, created) = seeded(&["A", "B"]).await;
        let err = repo
            .upsert_relationship(&SettlementRelationship::new(
                created[0].id,
                created[1].id,
                101,
                at(2),
            ))
            .await
            .expect_err("check constraint");

        assert!(err.is_constraint_violation());
        assert!(repo.relationships_for(created[0].id).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn relationships_for_sees_both_sides() {
        let (repo, created) = seeded(&["A", "B", "C"]).await;
        let (a, b, c) = (created[0].id, created[1].id, created[2].id);
        repo.upsert_relationship(&SettlementRelationship::new(a, b, 60, at(2)))
            .await
            .expect("upsert");
        repo.upsert_relationship(&SettlementRelationship::new(c, a, 20, at(3)))
            .await
            .expect("upsert");

        assert_eq!(repo.relationships_for(a).await.expect("list").len(), 2);
        assert_eq!(repo.relationships_for(b).await.expect("list").len(), 1);
        assert_eq!(repo.relationships_for(c).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_devotion_leaves_no_trace() {
        let (repo, created) = seeded(&["Brindle"]).await;
        let mut s = created[0].clone();

        let entry = s.record_devotion(-101, "uprising", None, at(5));
        let err = repo
            .record_devotion_change(&s, &entry)
            .await
            .expect_err("check constraint");

        assert!(err.is_constraint_violation());
        let stored = repo.get(s.id).await.expect("get").expect("present");
        assert_eq!(stored.devotion(), 50);
        assert!(repo
            .devotion_history(s.id, Page::history())
            .await
            .expect("history")
            .is_empty());
    }

    #[tokio::test]
    async fn locations_filter_by_type_and_visibility() {
        let (repo, created) = seeded(&["Brindle"]).await;
        let id = created[0].id;
        let tavern = SettlementLocation::new(id, "The Drowned Rat", "tavern", "Loud").with_capacity(40);
        let shrine = SettlementLocation::new(id, "Echo Shrine", "temple", "Quiet");
        let cellar = SettlementLocation::new(id, "Smugglers' Cellar", "tavern", "Hidden").private();
        for location in [&tavern, &shrine, &cellar] {
            repo.save_location(location).await.expect("save");
        }

        let taverns = repo
            .locations(id, &LocationFilter::default().of_type("tavern"))
            .await
            .expect("list");
        assert_eq!(taverns.len(), 2);

        let public_taverns = repo
            .locations(id, &LocationFilter::default().of_type("tavern").public(true))
            .await
            .expect("list");
        assert_eq!(public_taverns, vec![tavern]);

        let everything = repo
            .locations(id, &LocationFilter::default().of_type(""))
            .await
            .expect("list");
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn data_survives_reopening_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = StoreConfig {
            database_url: format!("sqlite://{}", dir.path().join("world.db").display()),
            max_connections: 2,
            create_if_missing: true,
        };
        let s = settlement("Persistence", "east");
        {
            let pool = connect(&config).await.expect("connect");
            ensure_schema(&pool).await.expect("schema");
            SqliteSettlementRepo::new(pool.clone())
                .create(&s)
                .await
                .expect("create");
            pool.close().await;
        }

        let pool = connect(&config).await.expect("reconnect");
        ensure_schema(&pool).await.expect("schema");
        let stored = SqliteSettlementRepo::new(pool)
            .get(s.id)
            .await
            .expect("get")
            .expect("present");
        assert_eq!(stored, s);
    }
}
