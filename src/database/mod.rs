pub mod action;
pub mod model;
pub mod schema;

use std::fmt;
use std::time::Duration;

use diesel::{prelude::*, r2d2, sql_query};

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
pub type Pool = r2d2::Pool<r2d2::ConnectionManager<SqliteConnection>>;

const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL
)";

/// Creates the tables on every fresh connection.
#[derive(Debug)]
struct EnsureSchema;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for EnsureSchema {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        sql_query(CREATE_USERS)
            .execute(conn)
            .map(|_| ())
            .map_err(r2d2::Error::QueryError)
    }
}

/// Initialize database connection pool for `database_url`.
///
/// Connections are opened lazily so the server comes up even when the store
/// is unreachable; see [`ready_state`].
pub fn initialize_db_pool(database_url: &str) -> Pool {
    build_pool(database_url, 10, CONNECTION_TIMEOUT)
}

pub fn build_pool(database_url: &str, max_size: u32, timeout: Duration) -> Pool {
    let manager = r2d2::ConnectionManager::<SqliteConnection>::new(database_url);

    r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(timeout)
        .connection_customizer(Box::new(EnsureSchema))
        .build_unchecked(manager)
}

/// Connectivity of the backing store, numbered like driver ready states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Disconnected,
    Connected,
}

impl ReadyState {
    pub fn code(&self) -> u8 {
        match self {
            ReadyState::Disconnected => 0,
            ReadyState::Connected => 1,
        }
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyState::Connected => f.write_str("Connected"),
            state => write!(f, "Disconnected (State: {})", state.code()),
        }
    }
}

/// Checks out a connection and runs a trivial query. Blocks up to a second.
pub fn ready_state(pool: &Pool) -> ReadyState {
    let probe = pool
        .get_timeout(PROBE_TIMEOUT)
        .map_err(Error::from)
        .and_then(|mut conn| sql_query("SELECT 1").execute(&mut *conn).map_err(Error::from));

    match probe {
        Ok(_) => ReadyState::Connected,
        Err(e) => {
            log::debug!("database probe failed: {}", e);
            ReadyState::Disconnected
        }
    }
}

#[cfg(test)]
pub(crate) fn test_pool() -> Pool {
    // a single connection keeps every query on the same in-memory database
    build_pool(":memory:", 1, CONNECTION_TIMEOUT)
}
