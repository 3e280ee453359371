use axum::{
    Json,
    extract::{Path, State},
};
use meal_planner_message::{InboxMessage, PlanGeneratedInput, SendInput};
use meal_planner_shared::MealType;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{error::Result, routes::AppState};

pub async fn inbox(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<InboxMessage>>> {
    Ok(Json(app_state.messages().inbox(user_id).await?))
}

pub async fn unread_count(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    let unread_count = app_state.messages().unread_count(user_id).await?;

    Ok(Json(json!({ "unread_count": unread_count })))
}

pub async fn read(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>> {
    app_state.message_command.mark_read(id).await?;

    Ok(Json(json!({"ok": true})))
}

pub async fn read_all(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    let updated = app_state.message_command.mark_all_read(user_id).await?;

    Ok(Json(json!({"ok": true, "updated": updated})))
}

#[derive(Deserialize)]
pub struct SendBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub message_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub action_url: Option<String>,
}

pub async fn send(
    State(app_state): State<AppState>,
    Json(body): Json<SendBody>,
) -> Result<Json<Value>> {
    let message_id = app_state
        .message_command
        .send(SendInput {
            user_id: body.user_id,
            message_type: body.message_type,
            title: body.title,
            content: body.content,
            action_url: body.action_url,
        })
        .await?;

    Ok(Json(json!({"ok": true, "message_id": message_id})))
}

#[derive(Deserialize)]
pub struct PlanGeneratedBody {
    #[serde(default)]
    pub family_id: String,
    pub plan_id: i64,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub meal_date: String,
}

#[tracing::instrument(skip_all, fields(family_id = %body.family_id, plan_id = body.plan_id))]
pub async fn plan_generated(
    State(app_state): State<AppState>,
    Json(body): Json<PlanGeneratedBody>,
) -> Result<Json<Value>> {
    let notified = app_state
        .message_command
        .notify_plan_generated(PlanGeneratedInput {
            family_id: body.family_id,
            plan_id: body.plan_id,
            meal_type: MealType::parse(&body.meal_type)?,
            meal_date: body.meal_date,
        })
        .await?;

    Ok(Json(json!({
        "ok": true,
        "message": format!("Notified {notified} users"),
    })))
}
