#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use meal_planner::AppState;
use meal_planner_image::{ImageResolver, ThumbnailSource};
use meal_planner_plan::PlanModel;
use meal_planner_shared::State;
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use tower::ServiceExt;

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

/// Never reached in debug mode.
struct Offline;

#[async_trait::async_trait]
impl PlanModel for Offline {
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> anyhow::Result<String> {
        anyhow::bail!("offline")
    }
}

struct NoThumbnails;

#[async_trait::async_trait]
impl ThumbnailSource for NoThumbnails {
    async fn thumbnail(&self, _name: &str) -> Option<String> {
        None
    }
}

/// Router over a migrated database with the model in debug mode.
pub async fn setup_app(path: PathBuf) -> anyhow::Result<Router> {
    let state = setup_test_state(path).await?;
    let plan_command = meal_planner_plan::Command::new(state.clone(), Arc::new(Offline), true);
    let images = ImageResolver::new(Arc::new(NoThumbnails), Duration::from_secs(60));

    Ok(meal_planner::router(AppState::new(state, plan_command, images)))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))?,
        None => request.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

pub async fn get(app: &Router, uri: &str) -> anyhow::Result<(StatusCode, Value)> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    send(app, Method::POST, uri, Some(body)).await
}

/// Registers `users` and puts them in family `fam_1`, the first one as holder.
pub async fn seed_family(app: &Router, users: &[&str]) -> anyhow::Result<()> {
    for user_id in users {
        let (status, _) = post(
            app,
            "/api/user/register",
            serde_json::json!({"user_id": user_id, "user_name": format!("{user_id} name"), "user_pass": "secret"}),
        )
        .await?;
        anyhow::ensure!(status == StatusCode::OK, "register {user_id}: {status}");
    }

    let (status, _) = post(
        app,
        "/api/family/create",
        serde_json::json!({"family_id": "fam_1", "family_name": "Smith", "user_id": users[0]}),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "create family: {status}");

    for user_id in &users[1..] {
        let (status, _) = post(
            app,
            "/api/family/join",
            serde_json::json!({"family_id": "fam_1", "user_id": user_id}),
        )
        .await?;
        anyhow::ensure!(status == StatusCode::OK, "join {user_id}: {status}");
    }

    Ok(())
}
