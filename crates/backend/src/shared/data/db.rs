use contracts::domain::a001_store::aggregate::Store;
use contracts::domain::a002_campaign::aggregate::Campaign;
use contracts::domain::common::AggregateRoot;
use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

const CREATE_STORE_TABLE: &str = r#"
    CREATE TABLE a001_store (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL,
        description TEXT NOT NULL,
        comment TEXT,
        region TEXT,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_CAMPAIGN_TABLE: &str = r#"
    CREATE TABLE a002_campaign (
        id TEXT PRIMARY KEY NOT NULL,
        code TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        comment TEXT,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        goal_type TEXT NOT NULL DEFAULT 'quantity',
        status TEXT NOT NULL DEFAULT 'active',
        no_targets INTEGER NOT NULL DEFAULT 0,
        supplier_ids TEXT NOT NULL DEFAULT '',
        brand_ids TEXT NOT NULL DEFAULT '',
        family_ids TEXT NOT NULL DEFAULT '',
        group_ids TEXT NOT NULL DEFAULT '',
        product_codes TEXT NOT NULL DEFAULT '',
        is_deleted INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        version INTEGER NOT NULL DEFAULT 0
    );
"#;

const CREATE_PARTICIPANT_TABLE: &str = r#"
    CREATE TABLE a003_campaign_participant (
        id TEXT PRIMARY KEY NOT NULL,
        campaign_id TEXT NOT NULL,
        store_id TEXT NOT NULL,
        store_code INTEGER NOT NULL DEFAULT 0,
        group_id TEXT NOT NULL DEFAULT '1',
        target_quantity REAL NOT NULL DEFAULT 0,
        target_value REAL NOT NULL DEFAULT 0,
        realized_quantity REAL NOT NULL DEFAULT 0,
        realized_value REAL NOT NULL DEFAULT 0,
        percent_of_target REAL NOT NULL DEFAULT 0,
        updated_at TEXT,
        UNIQUE (campaign_id, store_id)
    );
"#;

const CREATE_GOAL_PERIOD_TABLE: &str = r#"
    CREATE TABLE a004_goal_period (
        id TEXT PRIMARY KEY NOT NULL,
        description TEXT,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1
    );
"#;

/// Build a sqlite URL that also works for Windows drive paths
fn build_sqlite_url(path: &std::path::Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/campaigns.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = build_sqlite_url(&absolute_path);
    let conn = Database::connect(&db_url).await?;

    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Create the tables that do not exist yet
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    ensure_table(conn, &Store::full_name(), CREATE_STORE_TABLE).await?;
    ensure_table(conn, &Campaign::full_name(), CREATE_CAMPAIGN_TABLE).await?;
    ensure_table(conn, "a003_campaign_participant", CREATE_PARTICIPANT_TABLE).await?;
    ensure_table(conn, "a004_goal_period", CREATE_GOAL_PERIOD_TABLE).await?;
    Ok(())
}

async fn ensure_table(conn: &DatabaseConnection, name: &str, ddl: &str) -> anyhow::Result<()> {
    let existing = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [name.into()],
        ))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", name);
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, ddl.to_string()))
            .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

/// Shared database for service tests. The global connection lives in one
/// runtime and one temporary SQLite file for the whole test binary; tests
/// take turns on it and keep to their own records.
#[cfg(test)]
pub mod testing {
    use once_cell::sync::Lazy;
    use std::future::Future;
    use std::sync::Mutex;

    static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("test runtime")
    });

    static TURN: Mutex<()> = Mutex::new(());

    pub fn run_with_db<F: Future<Output = ()>>(test: F) {
        let _turn = TURN.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        RUNTIME.block_on(async {
            if super::DB_CONN.get().is_none() {
                let path = std::env::temp_dir()
                    .join(format!("campaigns-test-{}.db", uuid::Uuid::new_v4()));
                super::initialize_database(Some(&path.to_string_lossy()))
                    .await
                    .expect("test database");
            }
            test.await
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sqlite_url() {
        assert_eq!(
            build_sqlite_url(std::path::Path::new("/tmp/app.db")),
            "sqlite:///tmp/app.db?mode=rwc"
        );
        assert_eq!(
            build_sqlite_url(std::path::Path::new("C:\\data\\app.db")),
            "sqlite:///C:/data/app.db?mode=rwc"
        );
    }

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let conn = Database::connect("sqlite::memory:").await.unwrap();
        bootstrap_schema(&conn).await.unwrap();
        bootstrap_schema(&conn).await.unwrap();

        let tables = conn
            .query_all(Statement::from_string(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type='table' AND name LIKE 'a00%';"
                    .to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(tables.len(), 4);
    }
}
