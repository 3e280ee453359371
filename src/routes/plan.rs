use axum::{
    Json,
    extract::{Path, Query, State},
};
use meal_planner_family::ActiveContext;
use meal_planner_plan::{GenerateInput, IngestInput, PlanRecord};
use serde::Deserialize;
use serde_json::{Value, json};
use time::OffsetDateTime;

use crate::{
    error::{AppError, Result},
    routes::{AppState, ok_json},
};

pub async fn generate(
    State(app_state): State<AppState>,
    Json(input): Json<GenerateInput>,
) -> Result<Json<Value>> {
    let plan = app_state.plan_command.generate(input).await?;

    ok_json(plan)
}

pub async fn ingest(
    State(app_state): State<AppState>,
    Json(input): Json<IngestInput>,
) -> Result<Json<Value>> {
    let plan = app_state.plan_command.ingest(input).await?;

    ok_json(plan)
}

pub async fn get(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlanRecord>> {
    match app_state.plans().get(id).await? {
        Some(plan) => Ok(Json(plan)),
        None => Err(AppError::not_found("Plan not found")),
    }
}

#[derive(Deserialize)]
pub struct ByFamilyParams {
    #[serde(default)]
    pub with_json: bool,
}

pub async fn by_family(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
    Query(params): Query<ByFamilyParams>,
) -> Result<Json<Vec<PlanRecord>>> {
    Ok(Json(
        app_state
            .plans()
            .by_family(&family_id, params.with_json)
            .await?,
    ))
}

#[derive(Deserialize)]
pub struct LatestParams {
    pub date: Option<String>,
}

pub async fn latest(
    State(app_state): State<AppState>,
    Query(params): Query<LatestParams>,
) -> Result<Json<PlanRecord>> {
    let date = match params.date.as_deref().map(str::trim) {
        Some(date) if !date.is_empty() => {
            meal_planner_shared::format_date(meal_planner_shared::parse_date(date)?)
        }
        _ => meal_planner_shared::today_string(),
    };

    match app_state.plans().latest(&date).await? {
        Some(plan) => Ok(Json(plan)),
        None => Err(AppError::not_found("No plan for date")),
    }
}

pub async fn by_meal_code(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<PlanRecord>>> {
    Ok(Json(app_state.plans().by_meal_code(&code).await?))
}

#[derive(Deserialize)]
pub struct FeedbackParams {
    #[serde(default)]
    pub feedback: String,
}

pub async fn feedback(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<FeedbackParams>,
) -> Result<Json<Value>> {
    app_state.plan_command.feedback(id, &params.feedback).await?;

    Ok(Json(json!({"ok": true})))
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    #[serde(default)]
    pub user_id: String,
}

#[tracing::instrument(skip(app_state))]
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserParams>,
) -> Result<Json<Value>> {
    app_state.plan_command.delete(id, &params.user_id).await?;

    Ok(Json(json!({"ok": true})))
}

#[derive(Deserialize)]
pub struct CommentParams {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub comment_text: String,
}

pub async fn comment(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<CommentParams>,
) -> Result<Json<Value>> {
    let (user_name, text) = (params.user_name.trim(), params.comment_text.trim());
    if user_name.is_empty() || text.is_empty() {
        return Err(AppError::bad_request("Missing user_name or comment_text"));
    }

    let comment = app_state.plan_command.comment(id, user_name, text).await?;

    Ok(Json(json!({
        "ok": true,
        "message": "Comment added",
        "comment": comment,
    })))
}

#[tracing::instrument(skip(app_state))]
pub async fn regenerate(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UserParams>,
) -> Result<Json<Value>> {
    let plan = app_state.plan_command.regenerate(id, &params.user_id).await?;

    ok_json(plan)
}

#[derive(Deserialize)]
pub struct ContextParams {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
}

pub async fn active_context(
    State(app_state): State<AppState>,
    Query(params): Query<ContextParams>,
) -> Result<Json<ActiveContext>> {
    if params.family_id.trim().is_empty() {
        return Err(AppError::bad_request("Missing family_id"));
    }

    match app_state
        .families()
        .active_context(params.family_id.trim(), OffsetDateTime::now_utc())
        .await?
    {
        Some(context) => Ok(Json(context)),
        None => Err(AppError::not_found("Family not found")),
    }
}

pub async fn set_active_context(
    State(app_state): State<AppState>,
    Query(params): Query<ContextParams>,
) -> Result<Json<Value>> {
    let context = app_state
        .family_command
        .set_active_meal(meal_planner_family::SetActiveMealInput {
            family_id: params.family_id,
            user_id: params.user_id,
            meal_date: params.meal_date,
            meal_type: params.meal_type,
        })
        .await?;

    ok_json(context)
}
