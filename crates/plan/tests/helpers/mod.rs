use std::{
    collections::VecDeque,
    path::PathBuf,
    str::FromStr,
    sync::{Arc, Mutex},
};

use meal_planner_plan::PlanModel;
use meal_planner_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub const DATE: &str = "2099-01-02";

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

/// Family `fam_1` named "Smith"; the first member is the holder.
pub async fn seed_family(state: &State, members: &[&str]) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO family (id, name, created_by, created_at) VALUES ('fam_1', 'Smith', ?, 0)")
        .bind(members.first().copied().unwrap_or("nobody"))
        .execute(&state.write_db)
        .await?;

    for (idx, user_id) in members.iter().enumerate() {
        sqlx::query("INSERT INTO user (id, user_name, password, created_at) VALUES (?, ?, 'x', 0)")
            .bind(user_id)
            .bind(format!("{user_id} name"))
            .execute(&state.write_db)
            .await?;

        sqlx::query(
            "INSERT INTO family_member (family_id, user_id, role, display_name, created_at) VALUES ('fam_1', ?, ?, ?, ?)",
        )
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
pub async fn submit(state: &State, user_id: &str, remark: Option<&str>) -> anyhow::Result<()> {
    meal_planner_submission::Command(state.clone())
        .submit(meal_planner_submission::SubmitInput {
            family_id: "fam_1".to_owned(),
            user_id: user_id.to_owned(),
            role: "member".to_owned(),
            display_name: user_id.to_owned(),
            meal_date: DATE.to_owned(),
            meal_type: "dinner".to_owned(),
            preferences: serde_json::json!({"likes": ["tofu"]}),
            remark: remark.map(str::to_owned),
            ..Default::default()
        })
        .await?;

    Ok(())
}

#[allow(dead_code)]
pub fn generate_input() -> meal_planner_plan::GenerateInput {
    meal_planner_plan::GenerateInput {
        family_id: "fam_1".to_owned(),
        meal_date: DATE.to_owned(),
        meal_type: "dinner".to_owned(),
        ..Default::default()
    }
}

/// Answers with queued replies and records every user prompt.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<anyhow::Result<String>>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<anyhow::Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::default(),
        })
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl PlanModel for ScriptedModel {
    async fn complete(
        &self,
        _system: &str,
        user: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(user.to_owned());

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("model unavailable")))
    }
}
