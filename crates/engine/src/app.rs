//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::StoreConfig,
    ports::{ClockPort, NpcRepo, RepoError, SettlementRepo},
    sqlite::{self, SqliteRepositories},
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repository ports and use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
///
/// Per ADR-009, all fields are `Arc<dyn PortTrait>` - port traits injected directly.
pub struct Repositories {
    pub npc: Arc<dyn NpcRepo>,
    pub settlement: Arc<dyn SettlementRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub npc: use_cases::NpcUseCases,
    pub settlement: use_cases::SettlementUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        let npc_repo: Arc<dyn NpcRepo> = repos.npc;
        let settlement_repo: Arc<dyn SettlementRepo> = repos.settlement;

        let npc = use_cases::NpcUseCases::new(
            Arc::new(use_cases::NpcRecords::new(npc_repo.clone(), clock.clone())),
            Arc::new(use_cases::NpcDevotion::new(npc_repo.clone(), clock.clone())),
            Arc::new(use_cases::NpcRelationships::new(
                npc_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::NpcRoutine::new(npc_repo.clone())),
        );

        let settlement = use_cases::SettlementUseCases::new(
            Arc::new(use_cases::SettlementRecords::new(
                settlement_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::SettlementDevotion::new(
                settlement_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::SettlementRelationships::new(
                settlement_repo.clone(),
                clock,
            )),
            Arc::new(use_cases::SettlementLocations::new(settlement_repo.clone())),
        );

        Self {
            repositories: Repositories {
                npc: npc_repo,
                settlement: settlement_repo,
            },
            use_cases: UseCases { npc, settlement },
        }
    }

    /// Open the store described by `config`, ensure its schema and wire the
    /// app on the system clock.
    pub async fn connect(config: &StoreConfig) -> Result<Self, RepoError> {
        let pool = sqlite::connect(config).await?;
        sqlite::ensure_schema(&pool).await?;
        Ok(Self::new(
            SqliteRepositories::new(pool),
            Arc::new(SystemClock::new()),
        ))
    }
}
