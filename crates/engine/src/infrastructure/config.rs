//! Store configuration loaded from the environment.

/// Connection settings for the SQLite store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// sqlx connection URL, e.g. `sqlite:echoledger.db` or `sqlite::memory:`
    pub database_url: String,
    pub max_connections: u32,
    /// Create the database file when it does not exist yet
    pub create_if_missing: bool,
}

impl StoreConfig {
    pub const DEFAULT_DATABASE_URL: &'static str = "sqlite:echoledger.db";
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Recognised keys:
    /// - `ECHOLEDGER_DATABASE_URL` (falls back to `DATABASE_URL`)
    /// - `ECHOLEDGER_DB_MAX_CONNECTIONS`
    /// - `ECHOLEDGER_DB_CREATE_IF_MISSING`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("ECHOLEDGER_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATABASE_URL.into());

        let max_connections = match lookup("ECHOLEDGER_DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = Self::DEFAULT_MAX_CONNECTIONS,
                        "Invalid ECHOLEDGER_DB_MAX_CONNECTIONS, using default"
                    );
                    Self::DEFAULT_MAX_CONNECTIONS
                }
            },
            None => Self::DEFAULT_MAX_CONNECTIONS,
        };

        let create_if_missing = match lookup("ECHOLEDGER_DB_CREATE_IF_MISSING") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    tracing::warn!(value = %raw, "Invalid ECHOLEDGER_DB_CREATE_IF_MISSING, using true");
                    true
                }
            },
            None => true,
        };

        Self {
            database_url,
            max_connections,
            create_if_missing,
        }
    }

    /// A private in-memory database on a single connection.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            max_connections: 1,
            create_if_missing: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
