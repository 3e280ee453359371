use axum::{
    Json,
    extract::{Path, State},
};
use meal_planner_family::{MealTimes, MealTimesInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::{AppError, Result},
    routes::{AppState, ok_json},
};

#[derive(Deserialize)]
pub struct CreateBody {
    pub family_id: Option<String>,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub user_id: String,
}

#[tracing::instrument(skip_all, fields(user_id = %body.user_id))]
pub async fn create(
    State(app_state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> Result<Json<Value>> {
    let created = app_state
        .family_command
        .create(meal_planner_family::CreateInput {
            family_id: body.family_id,
            family_name: body.family_name.trim().to_owned(),
            user_id: body.user_id,
        })
        .await?;

    Ok(Json(json!({
        "ok": true,
        "family_id": created.family_id,
        "family_name": created.family_name,
        "message": "Family created",
    })))
}

#[derive(Deserialize)]
pub struct JoinBody {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
    pub role: Option<String>,
    pub display_name: Option<String>,
}

#[tracing::instrument(skip_all, fields(family_id = %body.family_id, user_id = %body.user_id))]
pub async fn join(
    State(app_state): State<AppState>,
    Json(body): Json<JoinBody>,
) -> Result<Json<Value>> {
    let joined = app_state
        .family_command
        .join(meal_planner_family::JoinInput {
            family_id: body.family_id,
            user_id: body.user_id,
            role: body.role,
            display_name: body.display_name,
        })
        .await?;

    ok_json(joined)
}

#[derive(Deserialize)]
pub struct InviteBody {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub invited_user_id: String,
}

#[tracing::instrument(skip_all, fields(family_id = %body.family_id))]
pub async fn invite(
    State(app_state): State<AppState>,
    Json(body): Json<InviteBody>,
) -> Result<Json<Value>> {
    let user_name = app_state
        .family_command
        .invite(meal_planner_family::InviteInput {
            family_id: body.family_id,
            invited_user_id: body.invited_user_id,
        })
        .await?;

    Ok(Json(json!({
        "ok": true,
        "message": format!("{user_name} has been added to the family"),
    })))
}

#[derive(Deserialize)]
pub struct FamilyBody {
    #[serde(default)]
    pub family_id: String,
}

pub async fn delete(
    State(app_state): State<AppState>,
    Json(body): Json<FamilyBody>,
) -> Result<Json<Value>> {
    app_state.family_command.delete(&body.family_id).await?;

    Ok(Json(json!({"ok": true, "message": "Family deleted"})))
}

#[derive(Deserialize)]
pub struct MemberBody {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
}

pub async fn remove_member(
    State(app_state): State<AppState>,
    Json(body): Json<MemberBody>,
) -> Result<Json<Value>> {
    app_state
        .family_command
        .remove_member(&body.family_id, &body.user_id)
        .await?;

    Ok(Json(json!({"ok": true, "message": "Member removed"})))
}

pub async fn members(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<Vec<meal_planner_family::Member>>> {
    Ok(Json(app_state.families().members(&family_id).await?))
}

pub async fn new_members_count(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    let since = meal_planner_shared::now() - 24 * 60 * 60;
    let count = app_state
        .families()
        .new_members_count(&user_id, since)
        .await?;

    Ok(Json(json!({ "new_members_count": count })))
}

async fn load_meal_times(app_state: &AppState, family_id: &str) -> Result<MealTimes> {
    app_state
        .families()
        .meal_times(family_id)
        .await?
        .ok_or_else(|| AppError::not_found("Family not found"))
}

pub async fn meal_times(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<MealTimes>> {
    Ok(Json(load_meal_times(&app_state, &family_id).await?))
}

pub async fn settings(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<Value>> {
    let meal_times = load_meal_times(&app_state, &family_id).await?;

    Ok(Json(json!({ "meal_times": meal_times })))
}

pub async fn update_meal_times(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
    Json(input): Json<MealTimesInput>,
) -> Result<Json<Value>> {
    let meal_times = app_state
        .family_command
        .update_meal_times(&family_id, input)
        .await?;

    Ok(Json(json!({"ok": true, "meal_times": meal_times})))
}

/// Accepts the times flat or wrapped in `meal_times`.
pub async fn update_settings_meal_times(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>> {
    let times = match body.get("meal_times") {
        Some(nested @ Value::Object(_)) => nested.clone(),
        _ => body,
    };
    let input: MealTimesInput = serde_json::from_value(times).unwrap_or_default();

    update_meal_times(State(app_state), Path(family_id), Json(input)).await
}

pub async fn active_meal(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<meal_planner_family::ActiveMeal>> {
    let active = app_state
        .families()
        .active_meal(&family_id)
        .await?
        .ok_or_else(|| AppError::not_found("Family not found"))?;

    Ok(Json(active))
}

#[derive(Deserialize)]
pub struct ActiveMealBody {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub meal_date: String,
    #[serde(default)]
    pub meal_type: String,
}

#[tracing::instrument(skip_all, fields(family_id = %family_id, user_id = %body.user_id))]
pub async fn set_active_meal(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
    Json(body): Json<ActiveMealBody>,
) -> Result<Json<Value>> {
    let context = app_state
        .family_command
        .set_active_meal(meal_planner_family::SetActiveMealInput {
            family_id,
            user_id: body.user_id,
            meal_date: body.meal_date,
            meal_type: body.meal_type,
        })
        .await?;

    ok_json(context)
}
