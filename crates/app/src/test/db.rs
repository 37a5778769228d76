//! Per-test Postgres databases inside one shared container.

use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

use crate::database::migrate;

const USER: &str = "storefront_test";
const PASSWORD: &str = "storefront_test_password";

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

/// Databases queued for dropping once their `TestDb` goes away.
static DROP_QUEUE: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

/// Database names are interpolated into DDL, so only plain identifiers pass.
fn is_safe_database_name(name: &str) -> bool {
    (1..=63).contains(&name.len())
        && name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

async fn start_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name(USER)
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

async fn container_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER.get_or_init(start_container).await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}")
}

async fn spawn_drop_queue() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(name) = receiver.recv().await {
            if let Err(error) = drop_database(&name).await {
                eprintln!("Failed to drop test database '{name}': {error}");
            }
        }
    });

    sender
}

async fn drop_database(name: &str) -> Result<(), sqlx::Error> {
    if !is_safe_database_name(name) {
        return Ok(());
    }

    let mut conn = PgConnection::connect(&container_url("postgres").await).await?;

    sqlx::query(&format!("DROP DATABASE IF EXISTS \"{name}\""))
        .execute(&mut conn)
        .await?;

    conn.close().await
}

/// A freshly migrated database, dropped in the background after use.
///
/// Services commit their own transactions, so isolation comes from every test
/// getting its own database rather than from rollback.
#[derive(Debug)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();

        let thread = format!("{:?}", std::thread::current().id())
            .replace(|c: char| !c.is_ascii_alphanumeric(), "");

        Self::with_name(&format!("storefront_test_{nanos}_{thread}")).await
    }

    async fn with_name(name: &str) -> Self {
        assert!(is_safe_database_name(name), "unsafe database name '{name}'");

        DROP_QUEUE.get_or_init(spawn_drop_queue).await;

        let mut conn = PgConnection::connect(&container_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close()
            .await
            .expect("Failed to close admin connection");

        let pool = PgPool::connect(&container_url(name).await)
            .await
            .expect("Failed to create pool for test database");

        migrate(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self {
            pool,
            name: name.to_string(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(queue) = DROP_QUEUE.get() {
            let _ = queue.send(self.name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_identifiers_are_safe() {
        assert!(is_safe_database_name("storefront_test_1"));
        assert!(is_safe_database_name("_leading_underscore"));

        assert!(!is_safe_database_name(""));
        assert!(!is_safe_database_name(&"a".repeat(64)));
        assert!(!is_safe_database_name("1starts_with_digit"));
        assert!(!is_safe_database_name("has-hyphen"));
        assert!(!is_safe_database_name("quote\"injection"));
    }

    #[tokio::test]
    async fn new_database_is_migrated() {
        let db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('customers', 'products', 'carts', 'cart_lines', 'orders', 'order_lines')",
        )
        .fetch_one(db.pool())
        .await
        .expect("Failed to count tables");

        assert_eq!(tables, 6);
    }
}
