use axum::{
    Json,
    extract::{Path, Query, State},
};
use meal_planner_submission::{SubmissionCount, SubmissionView, SubmitInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::{AppError, Result},
    routes::AppState,
};

#[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
pub async fn submit(
    State(app_state): State<AppState>,
    Json(input): Json<SubmitInput>,
) -> Result<Json<Value>> {
    app_state.submission_command.submit(input).await?;

    Ok(Json(json!({"ok": true, "message": "Submission saved"})))
}

pub async fn submit_by_meal_code(
    State(app_state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let meal_code = body
        .get("meal_code")
        .and_then(Value::as_str)
        .unwrap_or_default();
    app_state.submission_command.submit_by_meal_code(meal_code)?;

    Ok(Json(json!({"ok": true})))
}

#[derive(Deserialize)]
pub struct OwnerParams {
    #[serde(default)]
    pub user_id: String,
}

pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<OwnerParams>,
) -> Result<Json<Value>> {
    app_state
        .submission_command
        .delete(id, &params.user_id)
        .await?;

    Ok(Json(json!({"ok": true, "message": "Submission deleted"})))
}

#[derive(Deserialize)]
pub struct MyParams {
    #[serde(default = "all_families")]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn all_families() -> String {
    "all".to_owned()
}

fn default_limit() -> u64 {
    100
}

pub async fn my(
    State(app_state): State<AppState>,
    Query(params): Query<MyParams>,
) -> Result<Json<Vec<SubmissionView>>> {
    if params.user_id.trim().is_empty() {
        return Err(AppError::bad_request("user_id is required"));
    }

    let submissions = app_state
        .submissions()
        .list_my(&params.family_id, &params.user_id, params.limit)
        .await?;

    Ok(Json(submissions))
}

pub async fn by_family(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<Vec<SubmissionView>>> {
    Ok(Json(app_state.submissions().by_family(&family_id).await?))
}

#[derive(Deserialize)]
pub struct AtParams {
    #[serde(default)]
    pub meal_date: String,
}

pub async fn at(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
    Query(params): Query<AtParams>,
) -> Result<Json<Vec<SubmissionView>>> {
    let meal_date = meal_planner_shared::format_date(meal_planner_shared::parse_date(
        &params.meal_date,
    )?);

    Ok(Json(
        app_state.submissions().at(&family_id, &meal_date).await?,
    ))
}

pub async fn meals(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<Vec<SubmissionCount>>> {
    let submission_count = app_state.submissions().count(&family_id).await?;

    Ok(Json(vec![SubmissionCount { submission_count }]))
}

pub async fn detail(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SubmissionView>> {
    app_state
        .submissions()
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Submission not found"))
}
