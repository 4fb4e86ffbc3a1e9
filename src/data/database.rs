use diesel::{Connection, SqliteConnection};
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::{deadpool, AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use dotenvy::dotenv;
use futures_util::FutureExt;
use once_cell::sync::Lazy;
use std::env;

/// SQLite reached through diesel-async's sync wrapper, pooled with deadpool.
pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub struct Database {
    pool: Pool<DbConnection>,
}

impl Database {
    pub async fn new() -> Self {
        Database {
            pool: DB_POOL.clone(),
        }
    }

    pub async fn get_connection(&self) -> Result<Object<DbConnection>, deadpool::PoolError> {
        self.pool.get().await
    }
}

/// Lazily initialized global database connection pool. The embedded schema
/// migration runs once, before the first connection is handed out.
static DB_POOL: Lazy<Pool<DbConnection>> = Lazy::new(|| {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "bangazon.sqlite3".to_string());

    {
        let mut conn =
            SqliteConnection::establish(&database_url).expect("Failed to open the database");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Failed to run database migrations");
    }

    let mut config = ManagerConfig::default();
    config.custom_setup = Box::new(|url: &str| {
        let url = url.to_string();
        async move {
            let mut conn = DbConnection::establish(&url).await?;

            // SQLite ships with foreign key enforcement switched off.
            diesel::sql_query("PRAGMA foreign_keys = ON")
                .execute(&mut conn)
                .await
                .map_err(diesel::ConnectionError::CouldntSetupConfiguration)?;
            diesel::sql_query("PRAGMA busy_timeout = 5000")
                .execute(&mut conn)
                .await
                .map_err(diesel::ConnectionError::CouldntSetupConfiguration)?;

            Ok(conn)
        }
        .boxed()
    });

    let manager = AsyncDieselConnectionManager::<DbConnection>::new_with_config(database_url, config);
    let pool = Pool::builder(manager)
        .build()
        .expect("Failed to create database connection pool");

    tracing::info!("DB connection pool created");

    pool
});
