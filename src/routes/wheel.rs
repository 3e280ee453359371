use axum::{
    Json,
    extract::{Path, Query, State},
};
use meal_planner_wheel::{LatestPick, NominateInput, PickInput, Session, VoteInput, WheelState};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::Result, routes::AppState};

#[derive(Deserialize)]
pub struct SessionParams {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
    pub user_id: Option<String>,
}

impl SessionParams {
    fn session(&self) -> meal_planner_shared::Result<Session> {
        Session::new(&self.family_id, &self.meal_date, &self.meal_type)
    }
}

pub async fn state(
    State(app_state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> Result<Json<WheelState>> {
    let session = params.session()?;
    let user_id = params
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|user_id| !user_id.is_empty());

    Ok(Json(app_state.wheels().state(&session, user_id).await?))
}

pub async fn nominate(
    State(app_state): State<AppState>,
    Json(input): Json<NominateInput>,
) -> Result<Json<Value>> {
    let candidate_id = app_state.wheel_command.nominate(input).await?;

    Ok(Json(json!({"ok": true, "candidate_id": candidate_id.to_string()})))
}

pub async fn vote(
    State(app_state): State<AppState>,
    Json(input): Json<VoteInput>,
) -> Result<Json<Value>> {
    let action = app_state.wheel_command.vote(input).await?;

    Ok(Json(json!({"ok": true, "action": action})))
}

#[derive(Deserialize)]
pub struct RenameBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
}

pub async fn rename_candidate(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<RenameBody>,
) -> Result<Json<Value>> {
    app_state
        .wheel_command
        .rename_candidate(id, &body.user_id, &body.name)
        .await?;

    Ok(Json(json!({"ok": true})))
}

#[derive(Deserialize)]
pub struct ProposerParams {
    #[serde(default)]
    pub user_id: String,
}

pub async fn delete_candidate(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<ProposerParams>,
) -> Result<Json<Value>> {
    app_state
        .wheel_command
        .delete_candidate(id, &params.user_id)
        .await?;

    Ok(Json(json!({"ok": true})))
}

pub async fn pick(
    State(app_state): State<AppState>,
    Json(input): Json<PickInput>,
) -> Result<Json<Value>> {
    app_state.wheel_command.pick(input).await?;

    Ok(Json(json!({"ok": true})))
}

pub async fn latest_pick(
    State(app_state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> Result<Json<LatestPick>> {
    let session = params.session()?;

    Ok(Json(app_state.wheels().latest_pick(&session).await?))
}
