//! E2E test helpers for constructing the full application stack.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use echoledger_domain::{EconomyType, Gender, Npc, Settlement, SettlementType};

use crate::app::App;
use crate::infrastructure::clock::SteppingClock;
use crate::infrastructure::sqlite::{memory_pool, SqliteRepositories};

/// First instant handed out by the test clock.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap()
}

/// App over a fresh in-memory store. Every clock read is one minute after the last.
pub async fn test_app() -> App {
    let pool = memory_pool().await;
    App::new(
        SqliteRepositories::new(pool),
        Arc::new(SteppingClock::new(epoch(), Duration::minutes(1))),
    )
}

pub async fn seed_settlement(app: &App, name: &str, region: &str) -> Settlement {
    let draft = Settlement::new(
        name,
        SettlementType::Village,
        region,
        (0.0, 0.0),
        EconomyType::Crops,
        epoch(),
    );
    app.use_cases
        .settlement
        .records
        .create(draft)
        .await
        .expect("seed settlement")
}

pub async fn seed_npc(app: &App, name: &str, home: &Settlement) -> Npc {
    let born = Utc.with_ymd_and_hms(1995, 5, 5, 0, 0, 0).unwrap();
    let draft = Npc::new(name, 30, born, Gender::Female, "farmer", home.id, epoch());
    app.use_cases
        .npc
        .records
        .create(draft, None)
        .await
        .expect("seed npc")
}
