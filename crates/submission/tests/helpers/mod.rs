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

/// Family with one user per entry; the first becomes the holder.
#[allow(dead_code)]
pub async fn seed_family(state: &State, family_id: &str, members: &[&str]) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO family (id, name, created_by, created_at) VALUES (?, ?, ?, 0)")
        .bind(family_id)
        .bind(format!("{family_id} family"))
        .bind(members.first().copied().unwrap_or("nobody"))
        .execute(&state.write_db)
        .await?;

    for (idx, user_id) in members.iter().enumerate() {
        sqlx::query("INSERT OR IGNORE INTO user (id, user_name, password, created_at) VALUES (?, ?, 'x', 0)")
            .bind(user_id)
            .bind(format!("{user_id} name"))
            .execute(&state.write_db)
            .await?;

        sqlx::query(
            "INSERT INTO family_member (family_id, user_id, role, display_name, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(family_id)
        .bind(user_id)
        .bind(if idx == 0 { "holder" } else { "member" })
        .bind(format!("{user_id} display"))
        .bind(idx as i64)
        .execute(&state.write_db)
        .await?;
    }

    Ok(())
}

#[allow(dead_code)]
pub fn submission(
    family_id: &str,
    user_id: &str,
    meal_date: &str,
    meal_type: &str,
) -> meal_planner_submission::SubmitInput {
    meal_planner_submission::SubmitInput {
        family_id: family_id.to_owned(),
        user_id: user_id.to_owned(),
        role: "member".to_owned(),
        display_name: user_id.to_owned(),
        meal_date: meal_date.to_owned(),
        meal_type: meal_type.to_owned(),
        preferences: serde_json::json!({"likes": ["tofu"]}),
        ..Default::default()
    }
}
