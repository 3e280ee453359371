use std::path::Path;

use sqlx::{Sqlite, migrate::MigrateDatabase};
use sqlx_migrator::{Migrate, Plan};

use crate::Config;

/// Creates the database when missing and applies every pending migration.
#[tracing::instrument(skip(config))]
pub async fn migrate(config: &Config) -> anyhow::Result<()> {
    if !Sqlite::database_exists(&config.database.url).await? {
        tracing::info!(url = %config.database.url, "creating database");
        Sqlite::create_database(&config.database.url).await?;
    }

    let pool = crate::create_pool(&config.database.url, 1).await?;
    let mut conn = pool.acquire().await?;
    meal_planner_db::migrator()?
        .run(&mut *conn, &Plan::apply_all())
        .await?;
    drop(conn);
    pool.close().await;

    tracing::info!("migrations completed");

    Ok(())
}

/// Drops the database file then migrates from scratch.
#[tracing::instrument(skip(config))]
pub async fn reset(config: &Config) -> anyhow::Result<()> {
    if Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!(url = %config.database.url, "dropping database");
        Sqlite::drop_database(&config.database.url).await?;
    }

    for suffix in ["-wal", "-shm"] {
        let path = format!("{}{suffix}", database_path(&config.database.url));
        if Path::new(&path).exists() {
            std::fs::remove_file(&path)?;
        }
    }

    migrate(config).await
}

fn database_path(url: &str) -> &str {
    let path = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"));
    let path = path.unwrap_or(url);

    path.split('?').next().unwrap_or(path)
}
