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
pub async fn create_users(state: &State, ids: &[&str]) -> anyhow::Result<()> {
    for id in ids {
        sqlx::query("INSERT INTO user (id, user_name, password, created_at) VALUES (?, ?, 'x', 0)")
            .bind(id)
            .bind(format!("{id} name"))
            .execute(&state.write_db)
            .await?;
    }

    Ok(())
}

#[allow(dead_code)]
pub async fn create_family(
    state: &State,
    family_id: &str,
    holder: &str,
) -> anyhow::Result<meal_planner_family::Command> {
    let cmd = meal_planner_family::Command(state.clone());
    cmd.create(meal_planner_family::CreateInput {
        family_id: Some(family_id.to_owned()),
        family_name: format!("{family_id} family"),
        user_id: holder.to_owned(),
    })
    .await?;

    Ok(cmd)
}
