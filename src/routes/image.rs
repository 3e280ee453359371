use axum::{
    Json,
    extract::{Query, State},
};
use meal_planner_image::ImageSize;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::routes::AppState;

#[derive(Deserialize)]
pub struct ImageParams {
    #[serde(default)]
    pub name: String,
    pub square: Option<i64>,
    pub w: Option<i64>,
    pub h: Option<i64>,
}

async fn resolve(app_state: &AppState, name: &str, size: ImageSize) -> Json<Value> {
    let src = app_state.images.resolve(name.trim(), size).await;

    Json(json!({ "src": src }))
}

pub async fn scrape(
    State(app_state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Json<Value> {
    resolve(&app_state, &params.name, ImageSize::default()).await
}

pub async fn dish(
    State(app_state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Json<Value> {
    resolve(&app_state, &params.name, ImageSize::square(params.square)).await
}

pub async fn for_dish(
    State(app_state): State<AppState>,
    Query(params): Query<ImageParams>,
) -> Json<Value> {
    resolve(&app_state, &params.name, ImageSize::frame(params.w, params.h)).await
}
