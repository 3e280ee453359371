use std::{path::PathBuf, str::FromStr};

use meal_planner_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    meal_planner_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        read_db: pool.clone(),
        write_db: pool,
    })
}

#[allow(dead_code)]
pub async fn seed_family(
    state: &State,
    family_id: &str,
    family_name: &str,
    members: &[&str],
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO family (id, name, created_by, created_at) VALUES (?, ?, ?, 0)")
        .bind(family_id)
        .bind(family_name)
        .bind(members.first().copied().unwrap_or("nobody"))
        .execute(&state.write_db)
        .await?;

    for user_id in members {
        sqlx::query(
            "INSERT INTO family_member (family_id, user_id, role, display_name, created_at) VALUES (?, ?, 'member', ?, 0)",
        )
        .bind(family_id)
        .bind(user_id)
        .bind(user_id)
        .execute(&state.write_db)
        .await?;
    }

    Ok(())
}
