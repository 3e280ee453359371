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
pub fn nominate(user_id: &str, dish: &str) -> meal_planner_wheel::NominateInput {
    meal_planner_wheel::NominateInput {
        family_id: "fam_1".to_owned(),
        meal_date: "2099-01-02".to_owned(),
        meal_type: "dinner".to_owned(),
        user_id: user_id.to_owned(),
        dish: Some(dish.to_owned()),
        dishes: None,
    }
}

#[allow(dead_code)]
pub fn vote(user_id: &str, candidate_id: i64) -> meal_planner_wheel::VoteInput {
    meal_planner_wheel::VoteInput {
        family_id: "fam_1".to_owned(),
        meal_date: "2099-01-02".to_owned(),
        meal_type: "dinner".to_owned(),
        user_id: user_id.to_owned(),
        candidate_id: Some(meal_planner_wheel::CandidateRef::Number(candidate_id)),
    }
}
