use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Text;
use diesel::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_review_engine",
    include_str!("../migrations/001_review_engine.sql"),
)];

/// Per-connection pragmas applied whenever r2d2 opens a connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub busy_timeout_ms: u32,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 30_000,
        }
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(manager)
}

#[derive(QueryableByName)]
struct AppliedMigration {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Applies every embedded migration that has not been recorded yet.
pub fn run_migrations(conn: &mut SqliteConnection) -> QueryResult<usize> {
    conn.batch_execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )?;

    let applied: Vec<String> = diesel::sql_query("SELECT name FROM _migrations ORDER BY id")
        .load::<AppliedMigration>(conn)?
        .into_iter()
        .map(|row| row.name)
        .collect();

    let mut count = 0;
    for (name, sql) in MIGRATIONS {
        if applied.iter().any(|a| a == name) {
            continue;
        }
        log::info!("Applying migration {}", name);
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            conn.batch_execute(sql)?;
            diesel::sql_query("INSERT INTO _migrations (name) VALUES (?)")
                .bind::<Text, _>(*name)
                .execute(conn)?;
            Ok(())
        })?;
        count += 1;
    }

    Ok(count)
}
