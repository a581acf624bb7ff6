//! Table and index definitions, applied idempotently at startup.

use sqlx::SqlitePool;

use super::helpers::map_sqlx;
use crate::infrastructure::ports::RepoError;

const SCHEMA: &[&str] = &[
    // -------------------------------------------------------------------------
    // Settlements
    // -------------------------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS settlements (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        settlement_type TEXT NOT NULL,
        population INTEGER NOT NULL DEFAULT 0,
        founded_date TEXT NOT NULL,
        coordinates_x REAL NOT NULL,
        coordinates_y REAL NOT NULL,
        region TEXT NOT NULL,
        primary_economy TEXT NOT NULL,
        secondary_economy TEXT,
        wealth_rating INTEGER NOT NULL CHECK (wealth_rating BETWEEN 0 AND 100),
        trade_activity INTEGER NOT NULL CHECK (trade_activity BETWEEN 0 AND 100),
        devotion INTEGER NOT NULL CHECK (devotion BETWEEN -100 AND 100),
        independent_thinking INTEGER NOT NULL CHECK (independent_thinking BETWEEN 0 AND 100),
        is_active INTEGER NOT NULL,
        safety_rating INTEGER NOT NULL CHECK (safety_rating BETWEEN 0 AND 100),
        quality_of_life INTEGER NOT NULL CHECK (quality_of_life BETWEEN 0 AND 100),
        cultural_traits TEXT NOT NULL,
        notable_features TEXT NOT NULL,
        attributes TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_settlement_name ON settlements(name)",
    "CREATE INDEX IF NOT EXISTS idx_settlement_region ON settlements(region)",
    "CREATE INDEX IF NOT EXISTS idx_settlement_type ON settlements(settlement_type)",
    "CREATE INDEX IF NOT EXISTS idx_settlement_population ON settlements(population)",
    "CREATE INDEX IF NOT EXISTS idx_settlement_coordinates ON settlements(coordinates_x, coordinates_y)",
    r#"
    CREATE TABLE IF NOT EXISTS settlement_locations (
        id TEXT PRIMARY KEY,
        settlement_id TEXT NOT NULL REFERENCES settlements(id),
        name TEXT NOT NULL,
        location_type TEXT NOT NULL,
        description TEXT NOT NULL,
        capacity INTEGER,
        is_public INTEGER NOT NULL,
        coordinates_x REAL,
        coordinates_y REAL,
        attributes TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_settlement_location_owner ON settlement_locations(settlement_id)",
    "CREATE INDEX IF NOT EXISTS idx_settlement_location_type ON settlement_locations(location_type)",
    "CREATE INDEX IF NOT EXISTS idx_settlement_location_public ON settlement_locations(is_public)",
    // Callers' order lives in settlement_a/b; identity is the canonical pair.
    r#"
    CREATE TABLE IF NOT EXISTS settlement_relationships (
        id TEXT PRIMARY KEY,
        settlement_a_id TEXT NOT NULL REFERENCES settlements(id),
        settlement_b_id TEXT NOT NULL REFERENCES settlements(id),
        pair_low_id TEXT NOT NULL,
        pair_high_id TEXT NOT NULL,
        score INTEGER NOT NULL CHECK (score BETWEEN 0 AND 100),
        start_date TEXT NOT NULL,
        last_updated TEXT NOT NULL,
        trade_volume INTEGER NOT NULL DEFAULT 0,
        details TEXT NOT NULL,
        CHECK (pair_low_id <= pair_high_id),
        UNIQUE (pair_low_id, pair_high_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_settlement_relationship_high ON settlement_relationships(pair_high_id)",
    r#"
    CREATE TABLE IF NOT EXISTS settlement_devotion_history (
        id TEXT PRIMARY KEY,
        settlement_id TEXT NOT NULL REFERENCES settlements(id),
        previous_devotion INTEGER NOT NULL,
        new_devotion INTEGER NOT NULL,
        reason TEXT NOT NULL,
        change_date TEXT NOT NULL,
        details TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_settlement_devotion_history ON settlement_devotion_history(settlement_id, change_date)",
    // -------------------------------------------------------------------------
    // NPCs
    // -------------------------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS npcs (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        age INTEGER NOT NULL,
        birth_date TEXT NOT NULL,
        gender TEXT NOT NULL,
        sexuality TEXT NOT NULL,
        occupation TEXT NOT NULL,
        marital_status TEXT NOT NULL,
        is_alive INTEGER NOT NULL,
        location_id TEXT NOT NULL REFERENCES settlements(id),
        devotion INTEGER NOT NULL CHECK (devotion BETWEEN -100 AND 100),
        independent_thinking INTEGER NOT NULL CHECK (independent_thinking BETWEEN 0 AND 100),
        health INTEGER NOT NULL CHECK (health BETWEEN 0 AND 100),
        happiness INTEGER NOT NULL CHECK (happiness BETWEEN 0 AND 100),
        wealth INTEGER NOT NULL CHECK (wealth BETWEEN 0 AND 100),
        memory_id TEXT,
        last_conversation_time TEXT,
        attributes TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        death_date TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_npc_name ON npcs(name)",
    "CREATE INDEX IF NOT EXISTS idx_npc_location ON npcs(location_id)",
    "CREATE INDEX IF NOT EXISTS idx_npc_alive ON npcs(is_alive)",
    r#"
    CREATE TABLE IF NOT EXISTS npc_personalities (
        id TEXT PRIMARY KEY,
        npc_id TEXT NOT NULL UNIQUE REFERENCES npcs(id),
        extraversion INTEGER NOT NULL CHECK (extraversion BETWEEN 0 AND 100),
        agreeableness INTEGER NOT NULL CHECK (agreeableness BETWEEN 0 AND 100),
        conscientiousness INTEGER NOT NULL CHECK (conscientiousness BETWEEN 0 AND 100),
        neuroticism INTEGER NOT NULL CHECK (neuroticism BETWEEN 0 AND 100),
        openness INTEGER NOT NULL CHECK (openness BETWEEN 0 AND 100),
        memory_reliability INTEGER NOT NULL CHECK (memory_reliability BETWEEN 0 AND 100)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS npc_relationships (
        id TEXT PRIMARY KEY,
        initiator_id TEXT NOT NULL REFERENCES npcs(id),
        recipient_id TEXT NOT NULL REFERENCES npcs(id),
        relationship_type TEXT NOT NULL,
        strength INTEGER NOT NULL DEFAULT 0,
        start_date TEXT NOT NULL,
        end_date TEXT,
        is_active INTEGER NOT NULL,
        details TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_relationship_npc_pair ON npc_relationships(initiator_id, recipient_id)",
    "CREATE INDEX IF NOT EXISTS idx_relationship_recipient ON npc_relationships(recipient_id)",
    r#"
    CREATE TABLE IF NOT EXISTS npc_relationship_events (
        id TEXT PRIMARY KEY,
        relationship_id TEXT NOT NULL REFERENCES npc_relationships(id),
        event_date TEXT NOT NULL,
        event_type TEXT NOT NULL,
        description TEXT NOT NULL,
        details TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_relationship_event_date ON npc_relationship_events(relationship_id, event_date)",
    r#"
    CREATE TABLE IF NOT EXISTS npc_devotion_history (
        id TEXT PRIMARY KEY,
        npc_id TEXT NOT NULL REFERENCES npcs(id),
        previous_devotion INTEGER NOT NULL,
        new_devotion INTEGER NOT NULL,
        reason TEXT NOT NULL,
        change_date TEXT NOT NULL,
        details TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_npc_devotion_history ON npc_devotion_history(npc_id, change_date)",
    r#"
    CREATE TABLE IF NOT EXISTS npc_routine_activities (
        id TEXT PRIMARY KEY,
        npc_id TEXT NOT NULL REFERENCES npcs(id),
        activity_type TEXT NOT NULL,
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        location_id TEXT REFERENCES settlements(id),
        description TEXT NOT NULL,
        priority INTEGER NOT NULL DEFAULT 1
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_routine_npc ON npc_routine_activities(npc_id)",
    "CREATE INDEX IF NOT EXISTS idx_routine_time ON npc_routine_activities(start_time, end_time)",
    "CREATE INDEX IF NOT EXISTS idx_routine_activity_type ON npc_routine_activities(activity_type)",
];

/// Create every table and index that does not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(map_sqlx("ensure_schema"))?;
    }
    tracing::debug!(statements = SCHEMA.len(), "SQLite schema ensured");
    Ok(())
}
