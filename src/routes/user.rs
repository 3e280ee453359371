use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::{AppError, Result},
    routes::AppState,
};

#[derive(Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_pass: String,
}

#[tracing::instrument(skip_all, fields(user_id = %body.user_id))]
pub async fn register(
    State(app_state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<Json<Value>> {
    app_state
        .user_command
        .register(meal_planner_user::RegisterInput {
            user_id: body.user_id.trim().to_owned(),
            user_name: body.user_name.trim().to_owned(),
            password: body.user_pass,
        })
        .await?;

    Ok(Json(json!({
        "ok": true,
        "user_id": body.user_id.trim(),
        "message": "Registration successful",
    })))
}

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_pass: String,
}

#[tracing::instrument(skip_all, fields(user_id = %body.user_id))]
pub async fn login(
    State(app_state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<Value>> {
    let logged_in = app_state
        .user_command
        .login(meal_planner_user::LoginInput {
            user_id: body.user_id.trim().to_owned(),
            password: body.user_pass,
        })
        .await?;

    Ok(Json(json!({
        "ok": true,
        "user_id": logged_in.user_id,
        "user_name": logged_in.user_name,
        "message": "Login successful",
    })))
}

#[derive(Deserialize)]
pub struct UpdateBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
}

#[tracing::instrument(skip_all, fields(user_id = %body.user_id))]
pub async fn update(
    State(app_state): State<AppState>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<Value>> {
    app_state
        .user_command
        .update(meal_planner_user::UpdateInput {
            user_id: body.user_id,
            user_name: body.user_name.trim().to_owned(),
        })
        .await?;

    Ok(Json(json!({"ok": true, "message": "User updated"})))
}

pub async fn families(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<meal_planner_user::JoinedFamily>>> {
    Ok(Json(app_state.users().families(user_id).await?))
}

pub async fn owned_families(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<meal_planner_user::JoinedFamily>>> {
    Ok(Json(app_state.users().owned_families(user_id).await?))
}

pub async fn exists(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    let exists = app_state.users().exists(user_id).await?;

    Ok(Json(json!({ "exists": exists })))
}

pub async fn detail(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<meal_planner_user::UserDetail>> {
    let Some(detail) = app_state.users().detail(user_id).await? else {
        return Err(AppError::not_found("User not found"));
    };

    Ok(Json(detail))
}
