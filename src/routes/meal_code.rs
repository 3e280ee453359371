use axum::{
    Json,
    extract::{Path, State},
};
use meal_planner_shared::MealType;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::Result,
    routes::{AppState, ok_json},
};

#[derive(Deserialize)]
pub struct CreateBody {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default = "one")]
    pub participant_count: u32,
    #[serde(default)]
    pub meal_time: String,
    #[serde(default)]
    pub meal_type: String,
}

fn one() -> u32 {
    1
}

#[tracing::instrument(skip_all, fields(family_id = %body.family_id))]
pub async fn create(
    State(app_state): State<AppState>,
    Json(body): Json<CreateBody>,
) -> Result<Json<Value>> {
    let meal_type = match body.meal_type.trim() {
        "" => MealType::Dinner,
        value => MealType::parse(value)?,
    };

    let created = app_state
        .family_command
        .create_meal_code(meal_planner_family::meal_code::CreateMealCodeInput {
            family_id: body.family_id,
            user_id: body.user_id,
            participant_count: body.participant_count,
            meal_time: body.meal_time,
            meal_type,
        })
        .await?;

    ok_json(created)
}

pub async fn lookup(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<meal_planner_family::meal_code::MealCodeLookup>> {
    Ok(Json(app_state.families().lookup_meal_code(&code).await?))
}

pub async fn validate(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>> {
    let lookup = app_state.families().lookup_meal_code(&code).await?;

    Ok(Json(json!({
        "valid": true,
        "meal_code": code,
        "family_id": lookup.family_id,
        "family_name": lookup.family_name,
        "meal_date": lookup.meal_date,
        "meal_type": lookup.meal_type,
    })))
}

pub async fn user_codes(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<meal_planner_family::meal_code::IssuedMealCode>>> {
    let codes = app_state
        .families()
        .holder_meal_codes(&user_id, &meal_planner_shared::today_string())
        .await?;

    Ok(Json(codes))
}
