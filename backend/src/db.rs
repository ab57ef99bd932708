use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

/// Schema statements, executed one by one at startup. Every table is keyed
/// by rowid and carries creation and last-modification timestamps.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        is_staff INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS auth_tokens (
        user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
        token TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS condominiums (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name_condominium TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        condominium_id INTEGER NOT NULL REFERENCES condominiums(id) ON DELETE CASCADE,
        department_number INTEGER NOT NULL CHECK (department_number BETWEEN 0 AND 9999),
        department_block INTEGER NOT NULL CHECK (department_block BETWEEN 0 AND 9999),
        number_habitants INTEGER NOT NULL CHECK (number_habitants BETWEEN 0 AND 4),
        department_owner TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS habitant_profiles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
        department_id INTEGER NOT NULL UNIQUE REFERENCES departments(id) ON DELETE CASCADE,
        p_number TEXT NOT NULL,
        p_number_emergency TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        condominium_id INTEGER NOT NULL REFERENCES condominiums(id) ON DELETE CASCADE,
        owner_department TEXT NOT NULL,
        comment_title TEXT NOT NULL DEFAULT '',
        comment TEXT NOT NULL DEFAULT '',
        flaw_title TEXT NOT NULL DEFAULT '',
        flaw TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS financial_stats (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        condominium_id INTEGER NOT NULL REFERENCES condominiums(id) ON DELETE CASCADE,
        type_detail TEXT NOT NULL,
        income REAL NOT NULL CHECK (income >= 0),
        expenses REAL NOT NULL CHECK (expenses >= 0),
        details TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS priority_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        condominium_id INTEGER NOT NULL REFERENCES condominiums(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        detail TEXT NOT NULL,
        priority INTEGER NOT NULL DEFAULT 0,
        upgrade INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'to_do' CHECK (status IN ('to_do', 'doing', 'done')),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    "#,
];

/// DbConnection manages the pooled SQLite store shared by all repositories.
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if necessary) the database at `url` and ensure the
    /// schema exists. Foreign keys are off by default in SQLite; cascade
    /// deletion relies on them being enabled per connection.
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a uniquely named in-memory database for a single test.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("sqlite:file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(pool).await?;
        }

        Ok(())
    }

    /// Get the underlying SQLite pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
