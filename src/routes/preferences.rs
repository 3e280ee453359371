use axum::{
    Json,
    extract::{Path, Query, State},
};
use meal_planner_submission::preferences::{MemberPreference, MergedPreference, SavePreferenceInput};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::{AppError, Result},
    routes::AppState,
};

#[tracing::instrument(skip_all, fields(family_id = %input.family_id, user_id = %input.user_id))]
pub async fn save(
    State(app_state): State<AppState>,
    Json(input): Json<SavePreferenceInput>,
) -> Result<Json<Value>> {
    app_state.submission_command.save_preference(input).await?;

    Ok(Json(json!({"ok": true, "message": "Preference saved"})))
}

pub async fn family(
    State(app_state): State<AppState>,
    Path(family_id): Path<String>,
) -> Result<Json<Vec<MemberPreference>>> {
    Ok(Json(
        app_state.submissions().family_preferences(&family_id).await?,
    ))
}

#[derive(Deserialize)]
pub struct MergedParams {
    #[serde(default)]
    pub family_id: String,
    #[serde(default)]
    pub user_id: String,
}

pub async fn merged(
    State(app_state): State<AppState>,
    Query(params): Query<MergedParams>,
) -> Result<Json<MergedPreference>> {
    if params.family_id.trim().is_empty() || params.user_id.trim().is_empty() {
        return Err(AppError::bad_request("Missing family_id or user_id"));
    }

    Ok(Json(
        app_state
            .submissions()
            .merged_preference(&params.family_id, &params.user_id)
            .await?,
    ))
}
